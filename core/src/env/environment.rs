//! Ordered, named property sources.
//!
//! Lookups walk the sources front to back and return the first hit, so a
//! source added with [`Environment::add_first`] overrides everything already
//! registered.

use std::env;

use super::properties::Properties;

/// Name of the source built from the process environment.
pub const SYSTEM_ENVIRONMENT: &str = "systemEnvironment";

/// A named set of properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySource {
    name: String,
    properties: Properties,
}

impl PropertySource {
    pub fn new(name: impl Into<String>, properties: Properties) -> Self {
        PropertySource {
            name: name.into(),
            properties,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Runtime configuration: a precedence-ordered list of property sources.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    sources: Vec<PropertySource>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// An environment holding a single source built from the process
    /// environment variables. Variables that are not valid unicode are
    /// skipped.
    pub fn from_process_env() -> Self {
        let properties = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        let mut environment = Environment::new();
        environment.add_last(PropertySource::new(SYSTEM_ENVIRONMENT, properties));
        environment
    }

    /// Registers a source with the highest precedence. A source with the
    /// same name is replaced.
    pub fn add_first(&mut self, source: PropertySource) {
        self.remove(source.name());
        self.sources.insert(0, source);
    }

    /// Registers a source with the lowest precedence. A source with the same
    /// name is replaced.
    pub fn add_last(&mut self, source: PropertySource) {
        self.remove(source.name());
        self.sources.push(source);
    }

    pub fn remove(&mut self, name: &str) -> Option<PropertySource> {
        let index = self.sources.iter().position(|s| s.name() == name)?;
        Some(self.sources.remove(index))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.sources.iter().find_map(|source| source.get(key))
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn source(&self, name: &str) -> Option<&PropertySource> {
        self.sources.iter().find(|s| s.name() == name)
    }

    /// Source names in precedence order.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(PropertySource::name).collect()
    }
}
