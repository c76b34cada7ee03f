//! Runtime configuration.
//!
//! # Module Structure
//!
//! - `environment` - ordered, named property sources
//! - `error` - ConfigError
//! - `post_processor` - loads a property file into the Environment at startup
//! - `properties` - flat `key=value` file loader
//! - `remapper` - PropertyRemapper trait and the database mapping table
//!
//! # Example
//!
//! ```ignore
//! use gateway_admin_core::env::{DatabasePropertiesPostProcessor, Environment};
//!
//! let mut environment = Environment::from_process_env();
//! DatabasePropertiesPostProcessor::from_environment(&environment)
//!     .post_process(&mut environment)?;
//! let url = environment.get("spring.datasource.url");
//! ```

pub use environment::{Environment, PropertySource, SYSTEM_ENVIRONMENT};
pub use error::ConfigError;
pub use post_processor::{
    DatabasePropertiesPostProcessor, PropertyFilePostProcessor, DB_PROPERTIES_ENV,
    DEFAULT_DB_PROPERTIES_FILE,
};
pub use properties::Properties;
pub use remapper::{
    DatabasePropertiesRemapper, MappingTable, PropertyMapping, PropertyRemapper,
    DB_PROPERTY_MAPPINGS,
};

mod environment;
mod error;
mod post_processor;

pub mod properties;
pub mod remapper;
