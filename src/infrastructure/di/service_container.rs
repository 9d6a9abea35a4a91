//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{ArithmeticService, HierarchyService, RangeService};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub hierarchy: HierarchyService,
    pub range: RangeService,
    pub arithmetic: ArithmeticService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> ApplicationResult<Self> {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> ApplicationResult<Self> {
        let settings = Arc::new(settings);
        let hierarchy = HierarchyService::new(Arc::clone(&fs));
        let range = RangeService::from_config(&settings.range)?;
        let arithmetic = ArithmeticService::from_config(&settings.interest)?;

        Ok(Self {
            settings,
            fs,
            hierarchy,
            range,
            arithmetic,
        })
    }
}
