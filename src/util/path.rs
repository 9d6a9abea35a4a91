use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Expand `~`, `$VAR` and `${VAR}` in a path. Unset variables leave the input unchanged.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

pub trait PathExt {
    fn is_declaration_file(&self) -> bool;
}

impl PathExt for Path {
    fn is_declaration_file(&self) -> bool {
        self.extension() == Some(OsStr::new("toml"))
    }
}
