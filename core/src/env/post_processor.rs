//! Startup post-processing of the [`Environment`].

use std::path::{Path, PathBuf};

use super::environment::{Environment, PropertySource};
use super::error::ConfigError;
use super::properties;
use super::remapper::{DatabasePropertiesRemapper, PropertyRemapper};

/// Environment key naming the database properties file.
pub const DB_PROPERTIES_ENV: &str = "GATEWAY_ADMIN_DB_PROPERTIES";

pub const DEFAULT_DB_PROPERTIES_FILE: &str = "/etc/gateway-admin/db.properties";

/// Loads a property file, remaps it, and registers the result in the
/// environment with the highest precedence.
#[derive(Debug, Clone)]
pub struct PropertyFilePostProcessor<R> {
    path: PathBuf,
    remapper: R,
}

/// The database settings post-processor.
pub type DatabasePropertiesPostProcessor = PropertyFilePostProcessor<DatabasePropertiesRemapper<'static>>;

impl<R: PropertyRemapper> PropertyFilePostProcessor<R> {
    pub fn new(path: impl Into<PathBuf>, remapper: R) -> Self {
        PropertyFilePostProcessor {
            path: path.into(),
            remapper,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn post_process(&self, environment: &mut Environment) -> Result<(), ConfigError> {
        let raw = properties::load(&self.path)?;
        let remapped = self.remapper.apply(&raw);

        for key in remapped.keys() {
            tracing::debug!(
                source = self.remapper.property_source_name(),
                key = %key,
                "applied property"
            );
        }
        tracing::info!(
            path = %self.path.display(),
            read = raw.len(),
            applied = remapped.len(),
            "loaded property file"
        );

        environment.add_first(PropertySource::new(
            self.remapper.property_source_name(),
            remapped,
        ));
        Ok(())
    }
}

impl DatabasePropertiesPostProcessor {
    /// Resolves the file path from [`DB_PROPERTIES_ENV`], falling back to
    /// [`DEFAULT_DB_PROPERTIES_FILE`].
    pub fn from_environment(environment: &Environment) -> Self {
        let path = environment.get_or(DB_PROPERTIES_ENV, DEFAULT_DB_PROPERTIES_FILE);
        PropertyFilePostProcessor::new(path, DatabasePropertiesRemapper::default())
    }
}
