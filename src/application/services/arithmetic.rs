//! Arithmetic service: range-checked simple interest and chained division errors.

use tracing::{debug, instrument};

use crate::application::dispatch::HandlerSet;
use crate::application::kinds::{standard_kinds, VALUE_ERROR, ZERO_DIVISION_ERROR};
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::InterestConfig;
use crate::domain::{Failure, KindId, KindRegistry};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterestReport {
    Interest(f64),
    /// The rejected rate
    RateOutOfRange(f64),
}

pub struct ArithmeticService {
    max_rate: f64,
    kinds: KindRegistry,
}

impl ArithmeticService {
    pub fn new(max_rate: f64) -> ApplicationResult<Self> {
        if max_rate.is_nan() || max_rate < 0.0 {
            return Err(ApplicationError::Config {
                message: format!("interest.max_rate must be a non-negative number, got {max_rate}"),
            });
        }
        Ok(Self {
            max_rate,
            kinds: standard_kinds()?,
        })
    }

    pub fn from_config(config: &InterestConfig) -> ApplicationResult<Self> {
        Self::new(config.max_rate)
    }

    pub fn kinds(&self) -> &KindRegistry {
        &self.kinds
    }

    fn kind(&self, name: &str) -> KindId {
        self.kinds.lookup(name).unwrap_or_else(|| self.kinds.root())
    }

    fn raise(&self, name: &str, message: impl Into<String>) -> Failure {
        self.kinds.raise(self.kind(name), message)
    }

    /// `amount * years * rate / 100`; a rate above the maximum raises `ValueError(rate)`.
    pub fn simple_interest(&self, amount: f64, years: f64, rate: f64) -> Result<f64, Failure> {
        if rate > self.max_rate {
            return Err(self.raise(VALUE_ERROR, rate.to_string()));
        }
        Ok((amount * years * rate) / 100.0)
    }

    /// [`simple_interest`](Self::simple_interest) with the range failure handled.
    #[instrument(level = "debug", skip(self))]
    pub fn interest(&self, amount: f64, years: f64, rate: f64) -> ApplicationResult<InterestReport> {
        let mut handlers = HandlerSet::new(&self.kinds);
        handlers.on_named(VALUE_ERROR, move |_| Ok(InterestReport::RateOutOfRange(rate)))?;

        let report = handlers.dispatch(|| {
            self.simple_interest(amount, years, rate)
                .map(InterestReport::Interest)
        })?;
        debug!("interest report: {:?}", report);
        Ok(report)
    }

    /// Divide, re-raising division by zero as `ValueError("Division failed")`
    /// with the `ZeroDivisionError` as its cause.
    #[instrument(level = "debug", skip(self))]
    pub fn divide(&self, a: f64, b: f64) -> Result<f64, Failure> {
        let mut handlers = HandlerSet::new(&self.kinds);
        let failed = self.raise(VALUE_ERROR, "Division failed");
        handlers.on(self.kind(ZERO_DIVISION_ERROR), move |_| Err(failed.clone()));

        handlers
            .dispatch(|| {
                if b == 0.0 {
                    Err(self.raise(ZERO_DIVISION_ERROR, "division by zero"))
                } else {
                    Ok(a / b)
                }
            })
            .map_err(|e| e.into_failure())
    }
}
