//! Environment post-processing tests.
//!
//! Database properties file loading, remapping and precedence.

use std::io::Write;

use gateway_admin_core::env::{
    ConfigError, DatabasePropertiesPostProcessor, DatabasePropertiesRemapper, Environment,
    PropertyRemapper, PropertySource, DB_PROPERTIES_ENV,
};

fn properties_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn environment_pointing_at(path: &str, extra: &[(&str, &str)]) -> Environment {
    let mut properties: Vec<(String, String)> = extra
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    properties.push((DB_PROPERTIES_ENV.to_string(), path.to_string()));

    let mut environment = Environment::new();
    environment.add_last(PropertySource::new(
        "systemEnvironment",
        properties.into_iter().collect(),
    ));
    environment
}

#[test]
fn test_full_database_file() {
    let file = properties_file(
        "\
# serverconf database
serverconf.hibernate.connection.username = serverconf
serverconf.hibernate.connection.password = p@ss=word
serverconf.hibernate.connection.url = jdbc:postgresql://127.0.0.1:5432/serverconf
serverconf.hibernate.hikari.dataSource.currentSchema = serverconf,public
serverconf.hibernate.dialect = ee.ria.xroad.common.db.CustomPostgreSQLDialect
messagelog.hibernate.connection.url = jdbc:postgresql://127.0.0.1:5432/messagelog
",
    );
    let mut environment = environment_pointing_at(file.path().to_str().unwrap(), &[]);

    DatabasePropertiesPostProcessor::from_environment(&environment)
        .post_process(&mut environment)
        .unwrap();

    assert_eq!(environment.get("spring.datasource.username"), Some("serverconf"));
    assert_eq!(environment.get("spring.datasource.password"), Some("p@ss=word"));
    assert_eq!(
        environment.get("spring.datasource.url"),
        Some("jdbc:postgresql://127.0.0.1:5432/serverconf")
    );
    assert_eq!(
        environment.get("spring.datasource.hikari.data-source-properties.currentSchema"),
        Some("serverconf,public")
    );
    assert!(!environment.contains("serverconf.hibernate.dialect"));
    assert!(!environment.contains("messagelog.hibernate.connection.url"));

    let source = environment
        .source(DatabasePropertiesRemapper::PROPERTY_SOURCE_NAME)
        .unwrap();
    assert_eq!(source.len(), 4);
}

#[test]
fn test_database_source_overrides_process_environment() {
    let file = properties_file("serverconf.hibernate.connection.url=jdbc:test\nunrelated.key=x\n");
    let mut environment = environment_pointing_at(
        file.path().to_str().unwrap(),
        &[("spring.datasource.url", "jdbc:from-env"), ("unrelated.key", "env")],
    );

    DatabasePropertiesPostProcessor::from_environment(&environment)
        .post_process(&mut environment)
        .unwrap();

    assert_eq!(
        environment.source_names(),
        vec!["fromDbPropertiesFile", "systemEnvironment"]
    );
    assert_eq!(environment.get("spring.datasource.url"), Some("jdbc:test"));
    // Dropped keys never shadow other sources.
    assert_eq!(environment.get("unrelated.key"), Some("env"));
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.properties");
    let mut environment = environment_pointing_at(path.to_str().unwrap(), &[]);

    let err = DatabasePropertiesPostProcessor::from_environment(&environment)
        .post_process(&mut environment)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Load { .. }));

    let io_err = std::io::Error::from(err);
    assert_eq!(io_err.kind(), std::io::ErrorKind::NotFound);
    assert!(io_err.to_string().contains("db.properties"));
}

#[test]
fn test_malformed_line_reports_position() {
    let file = properties_file("# header\nserverconf.hibernate.connection.url=jdbc:test\noops\n");
    let mut environment = environment_pointing_at(file.path().to_str().unwrap(), &[]);

    let err = DatabasePropertiesPostProcessor::from_environment(&environment)
        .post_process(&mut environment)
        .unwrap_err();
    match err {
        ConfigError::Parse { line, content, .. } => {
            assert_eq!(line, 3);
            assert_eq!(content, "oops");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(environment.get("spring.datasource.url").is_none());
}

#[test]
fn test_remapper_is_independent_of_environment() {
    let remapper = DatabasePropertiesRemapper::default();
    assert_eq!(remapper.property_source_name(), "fromDbPropertiesFile");
    assert_eq!(
        remapper.remap("serverconf.hibernate.connection.username").unwrap(),
        "spring.datasource.username"
    );
    assert!(matches!(
        remapper.remap("spring.datasource.username"),
        Err(ConfigError::UnknownKey { .. })
    ));
}
