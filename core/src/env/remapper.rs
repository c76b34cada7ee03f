//! Remapping of externally supplied property names into the runtime
//! configuration namespace.
//!
//! Several remappers may read the same file: each one only claims the keys
//! of its own table and silently drops the rest.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::error::ConfigError;
use super::properties::Properties;

/// One `source -> target` pair of a remapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyMapping {
    pub source_key: &'static str,
    pub target_key: &'static str,
}

/// Database connection settings, from the serverconf file naming to the
/// datasource naming used at runtime.
pub const DB_PROPERTY_MAPPINGS: [PropertyMapping; 4] = [
    PropertyMapping {
        source_key: "serverconf.hibernate.connection.username",
        target_key: "spring.datasource.username",
    },
    PropertyMapping {
        source_key: "serverconf.hibernate.connection.password",
        target_key: "spring.datasource.password",
    },
    PropertyMapping {
        source_key: "serverconf.hibernate.connection.url",
        target_key: "spring.datasource.url",
    },
    PropertyMapping {
        source_key: "serverconf.hibernate.hikari.dataSource.currentSchema",
        target_key: "spring.datasource.hikari.data-source-properties.currentSchema",
    },
];

/// Immutable, exact-match, case-sensitive lookup table.
#[derive(Debug, Clone)]
pub struct MappingTable {
    entries: HashMap<&'static str, &'static str>,
}

impl MappingTable {
    /// Builds a table. Source keys are expected to be unique; a repeated
    /// source key keeps its last target.
    pub fn new(mappings: &[PropertyMapping]) -> Self {
        MappingTable {
            entries: mappings
                .iter()
                .map(|m| (m.source_key, m.target_key))
                .collect(),
        }
    }

    /// The process-wide database table, built on first use.
    pub fn database() -> &'static MappingTable {
        static TABLE: OnceLock<MappingTable> = OnceLock::new();
        TABLE.get_or_init(|| MappingTable::new(&DB_PROPERTY_MAPPINGS))
    }

    pub fn contains(&self, source_key: &str) -> bool {
        self.entries.contains_key(source_key)
    }

    pub fn get(&self, source_key: &str) -> Option<&'static str> {
        self.entries.get(source_key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Claims a subset of a property file and renames it.
pub trait PropertyRemapper {
    /// Name of the property source the remapped values are published under.
    fn property_source_name(&self) -> &str;

    fn is_supported(&self, key: &str) -> bool;

    /// Target key for a supported source key.
    fn remap(&self, key: &str) -> Result<String, ConfigError>;

    /// Renames every supported entry and drops the others. Values are kept.
    fn apply(&self, raw: &Properties) -> Properties {
        raw.iter()
            .filter(|(key, _)| self.is_supported(key))
            .filter_map(|(key, value)| self.remap(key).ok().map(|target| (target, value.clone())))
            .collect()
    }
}

/// Remaps database settings using a shared [`MappingTable`].
#[derive(Debug, Clone, Copy)]
pub struct DatabasePropertiesRemapper<'a> {
    table: &'a MappingTable,
}

impl<'a> DatabasePropertiesRemapper<'a> {
    pub const PROPERTY_SOURCE_NAME: &'static str = "fromDbPropertiesFile";

    pub fn new(table: &'a MappingTable) -> Self {
        DatabasePropertiesRemapper { table }
    }
}

impl Default for DatabasePropertiesRemapper<'static> {
    fn default() -> Self {
        DatabasePropertiesRemapper::new(MappingTable::database())
    }
}

impl PropertyRemapper for DatabasePropertiesRemapper<'_> {
    fn property_source_name(&self) -> &str {
        Self::PROPERTY_SOURCE_NAME
    }

    fn is_supported(&self, key: &str) -> bool {
        self.table.contains(key)
    }

    fn remap(&self, key: &str) -> Result<String, ConfigError> {
        self.table
            .get(key)
            .map(String::from)
            .ok_or_else(|| ConfigError::UnknownKey {
                key: key.to_string(),
            })
    }
}
