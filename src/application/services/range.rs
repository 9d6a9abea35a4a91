//! Range prompt service
//!
//! Reads integers until one falls inside the configured range. Out-of-range
//! and unparsable input raise failures that are routed through a handler set,
//! each handler choosing the message shown before prompting again.

use std::io::{BufRead, Write};

use tracing::{debug, instrument};

use crate::application::dispatch::HandlerSet;
use crate::application::kinds::{
    standard_kinds, VALUE_ERROR, VALUE_TOO_LARGE_ERROR, VALUE_TOO_SMALL_ERROR,
};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::RangeConfig;
use crate::domain::{Failure, KindRegistry};

pub const BELOW_RANGE: &str = "Value is below range..try again";
pub const ABOVE_RANGE: &str = "value out of range...try again";
pub const NOT_A_NUMBER: &str = "not a whole number...try again";
pub const IN_RANGE: &str = "Great! value in correct range.";

/// Outcome of one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Accepted(i64),
    Retry(&'static str),
}

pub struct RangeService {
    min: i64,
    max: i64,
    kinds: KindRegistry,
}

impl RangeService {
    /// Inclusive range `[min, max]`.
    pub fn new(min: i64, max: i64) -> ApplicationResult<Self> {
        if min > max {
            return Err(ApplicationError::Config {
                message: format!("range.min ({min}) is greater than range.max ({max})"),
            });
        }
        Ok(Self {
            min,
            max,
            kinds: standard_kinds()?,
        })
    }

    pub fn from_config(config: &RangeConfig) -> ApplicationResult<Self> {
        Self::new(config.min, config.max)
    }

    pub fn kinds(&self) -> &KindRegistry {
        &self.kinds
    }

    pub fn prompt(&self) -> String {
        format!("Enter any value in {} to {} range: ", self.min, self.max)
    }

    pub fn check(&self, value: i64) -> Result<i64, Failure> {
        if value < self.min {
            Err(self.raise(VALUE_TOO_SMALL_ERROR, value.to_string()))
        } else if value > self.max {
            Err(self.raise(VALUE_TOO_LARGE_ERROR, value.to_string()))
        } else {
            Ok(value)
        }
    }

    /// Parse one line of input and check it against the range.
    pub fn parse(&self, line: &str) -> Result<i64, Failure> {
        let trimmed = line.trim();
        let value = trimmed.parse::<i64>().map_err(|_| {
            self.raise(
                VALUE_ERROR,
                format!("invalid literal for int() with base 10: {trimmed:?}"),
            )
        })?;
        self.check(value)
    }

    fn raise(&self, name: &str, message: String) -> Failure {
        // Only called with names registered by `standard_kinds`.
        let kind = self.kinds.lookup(name).unwrap_or_else(|| self.kinds.root());
        self.kinds.raise(kind, message)
    }

    /// Classify one line: accepted value or the retry message to show.
    #[instrument(level = "debug", skip(self))]
    pub fn attempt(&self, line: &str) -> ApplicationResult<Attempt> {
        let mut handlers = HandlerSet::new(&self.kinds);
        handlers
            .on_named(VALUE_TOO_SMALL_ERROR, |_| Ok(Attempt::Retry(BELOW_RANGE)))?
            .on_named(VALUE_TOO_LARGE_ERROR, |_| Ok(Attempt::Retry(ABOVE_RANGE)))?
            .on_named(VALUE_ERROR, |_| Ok(Attempt::Retry(NOT_A_NUMBER)))?;

        Ok(handlers.dispatch(|| self.parse(line).map(Attempt::Accepted))?)
    }

    /// Prompt on `output` and read `input` until a value is in range.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> ApplicationResult<i64> {
        let mut line = String::new();
        loop {
            write!(output, "{}", self.prompt()).with_context("write prompt")?;
            output.flush().with_context("flush prompt")?;

            line.clear();
            let read = input.read_line(&mut line).with_context("read input")?;
            if read == 0 {
                return Err(ApplicationError::Input {
                    message: "input ended before a value in range was entered".to_string(),
                });
            }

            match self.attempt(&line)? {
                Attempt::Accepted(value) => {
                    writeln!(output, "{IN_RANGE}").with_context("write result")?;
                    debug!("accepted {}", value);
                    return Ok(value);
                }
                Attempt::Retry(message) => {
                    writeln!(output, "{message}").with_context("write retry message")?;
                }
            }
        }
    }
}
