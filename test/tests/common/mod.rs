//! Common test utilities and configuration.
//!
//! This module provides shared test infrastructure including:
//! - A key service seeded with one key per role
//! - Test app builder recording audit events in memory
//! - Helper functions

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};

use gateway_admin_core::http::controller::api_keys;
use gateway_admin_core::http::security::api_key::{
    ApiKeyAuthenticator, ApiKeyService, InMemoryApiKeyService,
};
use gateway_admin_core::http::security::audit::{Auditor, InMemoryAuditLog};
use gateway_admin_core::http::security::SecurityTransform;

// =============================================================================
// Test Configuration
// =============================================================================

/// Plaintext keys seeded before each test.
///
/// - admin: SYSTEM_ADMINISTRATOR, every API key permission (id 1)
/// - officer: SECURITY_OFFICER, VIEW_API_KEYS only (id 2)
/// - observer: SERVER_OBSERVER, no permission (id 3)
pub struct TestKeys {
    pub admin: String,
    pub officer: String,
    pub observer: String,
}

pub struct TestContext {
    pub keys: Arc<dyn ApiKeyService>,
    pub audit: InMemoryAuditLog,
    pub credentials: TestKeys,
}

impl TestContext {
    pub fn new() -> Self {
        let keys: Arc<dyn ApiKeyService> = Arc::new(InMemoryApiKeyService::new());
        let seed = |role: &str| {
            keys.create(&[role.to_string()])
                .expect("seed key")
                .key
        };
        let credentials = TestKeys {
            admin: seed("SYSTEM_ADMINISTRATOR"),
            officer: seed("SECURITY_OFFICER"),
            observer: seed("SERVER_OBSERVER"),
        };

        TestContext {
            keys,
            audit: InMemoryAuditLog::new(),
            credentials,
        }
    }
}

/// Helper function to create the API key Authorization header value.
pub fn api_key(plaintext: &str) -> String {
    format!("ApiKey {}", plaintext)
}

/// Principal name of the key with the given id.
pub fn principal(id: u64) -> String {
    format!("api-key-{}", id)
}

// =============================================================================
// Test App Factory
// =============================================================================

/// Creates the test application wired like the demo server, with audit
/// records captured in `ctx.audit`.
pub async fn create_test_app(
    ctx: &TestContext,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .wrap(SecurityTransform::new(ApiKeyAuthenticator::new(ctx.keys.clone())))
            .app_data(web::Data::from(ctx.keys.clone()))
            .configure(api_keys::configure(Auditor::new(ctx.audit.clone()))),
    )
    .await
}
