//! Gateway Admin Demo Server
//!
//! Serves the API key management endpoints with API key authentication and
//! audit logging, on top of an environment that includes the remapped
//! database properties file.

use std::io;
use std::path::Path;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing_subscriber::EnvFilter;

use gateway_admin_core::env::{DatabasePropertiesPostProcessor, Environment};
use gateway_admin_core::http::controller::api_keys;
use gateway_admin_core::http::security::api_key::{
    ApiKeyAuthenticator, ApiKeyService, InMemoryApiKeyService,
};
use gateway_admin_core::http::security::audit::{Auditor, FileAuditLogger, TracingAuditLogger};
use gateway_admin_core::http::security::SecurityTransform;

const BIND_ENV: &str = "GATEWAY_ADMIN_BIND";
const AUDIT_LOG_ENV: &str = "GATEWAY_ADMIN_AUDIT_LOG";
const LOG_JSON_ENV: &str = "GATEWAY_ADMIN_LOG_JSON";
const BOOTSTRAP_ROLES_ENV: &str = "GATEWAY_ADMIN_BOOTSTRAP_ROLES";

const DEFAULT_BIND: &str = "127.0.0.1:4000";
const DEFAULT_BOOTSTRAP_ROLES: &str = "SYSTEM_ADMINISTRATOR";

/// Installs the global subscriber. `RUST_LOG` wins over the `info` default.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Audit records go to a JSON lines file when one is configured, to the
/// `audit` tracing target otherwise.
fn auditor(environment: &Environment) -> io::Result<Auditor> {
    match environment.get(AUDIT_LOG_ENV) {
        Some(path) => {
            let logger = FileAuditLogger::new(Path::new(path)).map_err(io::Error::other)?;
            tracing::info!(path = %path, "audit records appended to file");
            Ok(Auditor::new(logger))
        }
        None => Ok(Auditor::new(TracingAuditLogger)),
    }
}

fn bootstrap_roles(environment: &Environment) -> Vec<String> {
    environment
        .get_or(BOOTSTRAP_ROLES_ENV, DEFAULT_BOOTSTRAP_ROLES)
        .split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(String::from)
        .collect()
}

fn print_startup_info(bind: &str, key: &str, roles: &[String]) {
    println!("=== Gateway Admin Demo ===");
    println!();
    println!("Server: http://{}", bind);
    println!();
    println!("Bootstrap API key [{}]:", roles.join(", "));
    println!("  {}", key);
    println!();
    println!("Routes:");
    println!("  POST   /api/v1/api-keys      - CREATE_API_KEY (audited)");
    println!("  GET    /api/v1/api-keys      - VIEW_API_KEYS");
    println!("  GET    /api/v1/api-keys/{{id}} - VIEW_API_KEYS");
    println!("  PUT    /api/v1/api-keys/{{id}} - UPDATE_API_KEY (audited)");
    println!("  DELETE /api/v1/api-keys/{{id}} - REVOKE_API_KEY (audited)");
    println!();
    println!("Examples:");
    println!("  curl -H 'Authorization: ApiKey {}' http://{}/api/v1/api-keys", key, bind);
    println!(
        "  curl -H 'Authorization: ApiKey {}' -H 'Content-Type: application/json' \\",
        key
    );
    println!("       -d '[\"SECURITY_OFFICER\"]' http://{}/api/v1/api-keys", bind);
    println!();
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let mut environment = Environment::from_process_env();
    init_tracing(environment.get(LOG_JSON_ENV) == Some("1"));

    DatabasePropertiesPostProcessor::from_environment(&environment)
        .post_process(&mut environment)
        .map_err(|err| {
            tracing::error!(error = %err, "cannot load database properties");
            io::Error::from(err)
        })?;

    let keys: Arc<dyn ApiKeyService> = Arc::new(InMemoryApiKeyService::new());
    let roles = bootstrap_roles(&environment);
    let bootstrap = keys
        .create(&roles)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;

    let auditor = auditor(&environment)?;
    let bind = environment.get_or(BIND_ENV, DEFAULT_BIND).to_string();
    print_startup_info(&bind, &bootstrap.key, &roles);

    HttpServer::new(move || {
        App::new()
            .wrap(SecurityTransform::new(ApiKeyAuthenticator::new(keys.clone())))
            .app_data(web::Data::from(keys.clone()))
            .configure(api_keys::configure(auditor.clone()))
    })
    .bind(bind.as_str())?
    .run()
    .await
}
