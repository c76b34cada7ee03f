//! API key management endpoints.
//!
//! | Method | Path                       | Permission       | Audit event      |
//! |--------|----------------------------|------------------|------------------|
//! | POST   | `/api/v1/api-keys`         | `CREATE_API_KEY` | `API_KEY_CREATE` |
//! | GET    | `/api/v1/api-keys`         | `VIEW_API_KEYS`  |                  |
//! | GET    | `/api/v1/api-keys/{id}`    | `VIEW_API_KEYS`  |                  |
//! | PUT    | `/api/v1/api-keys/{id}`    | `UPDATE_API_KEY` | `API_KEY_UPDATE` |
//! | DELETE | `/api/v1/api-keys/{id}`    | `REVOKE_API_KEY` | `API_KEY_REMOVE` |
//!
//! The key service is read from `web::Data<dyn ApiKeyService>` and the user
//! from the security middleware, so both must be registered on the app.

use actix_web::{guard, web, Error, HttpResponse};

use crate::http::security::api_key::{ApiKeyService, PublicApiKeyData};
use crate::http::security::audit::{property, AuditTransform, Auditor, RequestAudit, RestApiAuditEvent};
use crate::http::security::{AuthenticatedUser, Permission};

pub const API_KEYS_V1_PATH: &str = "/api/v1/api-keys";

/// Registers the API key routes. Mutating routes are wrapped in an
/// [`AuditTransform`] bound to their event.
///
/// ```ignore
/// let keys: Arc<dyn ApiKeyService> = Arc::new(InMemoryApiKeyService::new());
/// App::new()
///     .wrap(SecurityTransform::new(ApiKeyAuthenticator::new(keys.clone())))
///     .app_data(web::Data::from(keys))
///     .configure(api_keys::configure(auditor))
/// ```
pub fn configure(auditor: Auditor) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let item = format!("{}/{{id}}", API_KEYS_V1_PATH);

        cfg.service(
            web::resource(API_KEYS_V1_PATH)
                .guard(guard::Post())
                .wrap(AuditTransform::new(auditor.clone(), RestApiAuditEvent::ApiKeyCreate))
                .to(create_key),
        )
        .service(web::resource(API_KEYS_V1_PATH).route(web::get().to(list_keys)))
        .service(
            web::resource(item.as_str())
                .guard(guard::Put())
                .wrap(AuditTransform::new(auditor.clone(), RestApiAuditEvent::ApiKeyUpdate))
                .to(update_key),
        )
        .service(
            web::resource(item.as_str())
                .guard(guard::Delete())
                .wrap(AuditTransform::new(auditor, RestApiAuditEvent::ApiKeyRemove))
                .to(revoke_key),
        )
        .service(web::resource(item.as_str()).route(web::get().to(get_key)));
    }
}

async fn create_key(
    user: AuthenticatedUser,
    audit: RequestAudit,
    service: web::Data<dyn ApiKeyService>,
    roles: web::Json<Vec<String>>,
) -> Result<HttpResponse, Error> {
    user.require(Permission::CreateApiKey)?;
    audit.add_data(property::API_KEY_ROLES, roles.to_vec());

    let created = service.create(&roles)?;
    audit.add_data(property::API_KEY_ID, created.id);
    audit.add_data(
        property::API_KEY_ROLES,
        created
            .roles
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>(),
    );
    tracing::info!(id = created.id, by = %user.get_username(), "api key created");

    Ok(HttpResponse::Ok().json(PublicApiKeyData::from(created)))
}

async fn update_key(
    user: AuthenticatedUser,
    audit: RequestAudit,
    service: web::Data<dyn ApiKeyService>,
    id: web::Path<u64>,
    roles: web::Json<Vec<String>>,
) -> Result<HttpResponse, Error> {
    user.require(Permission::UpdateApiKey)?;
    let id = id.into_inner();
    audit.add_data(property::API_KEY_ID, id);
    audit.add_data(property::API_KEY_ROLES, roles.to_vec());

    let updated = service.update(id, &roles)?;
    audit.add_data(property::API_KEY_ROLES, updated.role_names());
    tracing::info!(id, by = %user.get_username(), "api key updated");

    Ok(HttpResponse::Ok().json(PublicApiKeyData::from(&updated)))
}

async fn get_key(
    user: AuthenticatedUser,
    service: web::Data<dyn ApiKeyService>,
    id: web::Path<u64>,
) -> Result<HttpResponse, Error> {
    user.require(Permission::ViewApiKeys)?;
    let key = service.get(id.into_inner())?;
    Ok(HttpResponse::Ok().json(PublicApiKeyData::from(&key)))
}

async fn list_keys(
    user: AuthenticatedUser,
    service: web::Data<dyn ApiKeyService>,
) -> Result<HttpResponse, Error> {
    user.require(Permission::ViewApiKeys)?;
    let keys: Vec<PublicApiKeyData> = service.list().iter().map(PublicApiKeyData::from).collect();
    Ok(HttpResponse::Ok().json(keys))
}

async fn revoke_key(
    user: AuthenticatedUser,
    audit: RequestAudit,
    service: web::Data<dyn ApiKeyService>,
    id: web::Path<u64>,
) -> Result<HttpResponse, Error> {
    user.require(Permission::RevokeApiKey)?;
    let id = id.into_inner();
    audit.add_data(property::API_KEY_ID, id);

    service.remove(id)?;
    tracing::info!(id, by = %user.get_username(), "api key revoked");

    Ok(HttpResponse::Ok().finish())
}
