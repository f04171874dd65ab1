//! # Scene Configuration
//!
//! Capacities and policies for a scene and its runtime, loaded once at
//! startup from TOML or built in code.
//!
//! ```toml
//! max_entities = 512
//! max_component_types = 64
//! query_pool_size = 16
//! capacity_policy = "warn"
//! removal_policy = "deferred"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EcsError, EcsResult};

/// Hard upper bound on entity slots per scene.
pub const MAX_ENTITIES: usize = 1000;

/// Hard upper bound on component types per scene (mask width in bits).
///
/// Internal id 0 is never handed out, so at most `MAX_COMPONENT_TYPES - 1`
/// types can be registered.
pub const MAX_COMPONENT_TYPES: usize = 200;

/// Default number of pre-allocated query slots.
pub const DEFAULT_QUERY_POOL_SIZE: usize = 64;

/// What happens when an entity or component type capacity is exceeded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityPolicy {
    /// Return the sentinel failure value and nothing else.
    #[default]
    Silent,
    /// Return the sentinel failure value and emit a warning.
    Warn,
    /// Treat the overrun as fatal.
    Panic,
}

/// What removing a component (or destroying an entity) does to pool bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// Clear the mask bit only. Stale bytes stay in the pool until the next
    /// assign re-zeroes them.
    #[default]
    Deferred,
    /// Clear the mask bit and zero the slot bytes immediately.
    Scrub,
}

/// Configuration for a scene and its runtime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcsConfig {
    /// Maximum number of entity slots (1..=1000).
    pub max_entities: usize,
    /// Mask width; internal ids range over `1..max_component_types`.
    pub max_component_types: usize,
    /// Initial number of recycled query slots.
    pub query_pool_size: usize,
    /// Behaviour on capacity overrun.
    pub capacity_policy: CapacityPolicy,
    /// Behaviour of component removal.
    pub removal_policy: RemovalPolicy,
}

impl Default for EcsConfig {
    fn default() -> Self {
        Self {
            max_entities: MAX_ENTITIES,
            max_component_types: MAX_COMPONENT_TYPES,
            query_pool_size: DEFAULT_QUERY_POOL_SIZE,
            capacity_policy: CapacityPolicy::Silent,
            removal_policy: RemovalPolicy::Deferred,
        }
    }
}

impl EcsConfig {
    /// Parses and validates a configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] if the document does not parse or
    /// a value is out of range.
    pub fn from_toml_str(source: &str) -> EcsResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| EcsError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::ConfigIo`] if the file cannot be read, otherwise
    /// the errors of [`EcsConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> EcsResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| EcsError::ConfigIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks every value against the hard limits.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> EcsResult<()> {
        if self.max_entities == 0 || self.max_entities > MAX_ENTITIES {
            return Err(EcsError::InvalidConfig(format!(
                "max_entities must be in 1..={MAX_ENTITIES}, got {}",
                self.max_entities
            )));
        }
        if self.max_component_types < 2 || self.max_component_types > MAX_COMPONENT_TYPES {
            return Err(EcsError::InvalidConfig(format!(
                "max_component_types must be in 2..={MAX_COMPONENT_TYPES}, got {}",
                self.max_component_types
            )));
        }
        if self.query_pool_size == 0 {
            return Err(EcsError::InvalidConfig(
                "query_pool_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
