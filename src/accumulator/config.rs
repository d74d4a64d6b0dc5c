// src/accumulator/config.rs

use derive_builder::Builder;
use tokio::sync::Semaphore;

#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct Config {
    /// Label attached to log lines and flush spans
    #[builder(default = "String::from(\"batch\")")]
    pub(crate) name: String,

    /// Maximum number of detached flushes running at once, unbounded when `None`
    #[builder(default = "None")]
    pub(crate) max_in_flight: Option<usize>,
}

impl ConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.max_in_flight {
            Some(Some(0)) => Err("max_in_flight must be greater than zero".to_string()),
            Some(Some(limit)) if limit > Semaphore::MAX_PERMITS => Err(format!(
                "max_in_flight must not exceed {}",
                Semaphore::MAX_PERMITS
            )),
            _ => Ok(()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            name: String::from("batch"),
            max_in_flight: None,
        }
    }
}

impl Config {
    /// Returns the accumulator name used in logs
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cap on concurrently running flushes
    #[inline]
    pub fn max_in_flight(&self) -> Option<usize> {
        self.max_in_flight
    }
}
