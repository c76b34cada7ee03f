//! Audit interception for mutating routes.
//!
//! [`AuditTransform`] is wrapped on a route at registration time. For every
//! request it creates a recorder, starts the route's event, exposes the
//! recorder to the handler through [`RequestAudit`], and flushes it once the
//! handler finishes: failure when the handler produced an error (or an error
//! status), success otherwise. Nested layers share the outermost layer's
//! recorder, which is the only one that flushes.
//!
//! ```ignore
//! web::resource("/api-keys")
//!     .wrap(AuditTransform::new(auditor.clone(), RestApiAuditEvent::ApiKeyCreate))
//!     .route(web::post().to(create_key))
//! ```

use std::cell::RefCell;
use std::fmt;
use std::future::{ready, Ready};
use std::rc::Rc;

use actix_service::{Service, Transform};
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use serde_json::Value;

use super::event::RestApiAuditEvent;
use super::recorder::{AuditEventRecorder, Auditor};

/// Audit middleware factory bound to one event.
pub struct AuditTransform {
    auditor: Auditor,
    event: RestApiAuditEvent,
}

impl AuditTransform {
    pub fn new(auditor: Auditor, event: RestApiAuditEvent) -> Self {
        AuditTransform { auditor, event }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuditTransform
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuditService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuditService {
            auditor: self.auditor.clone(),
            event: self.event,
            service: Rc::new(service),
        }))
    }
}

/// Audit middleware service.
pub struct AuditService<S> {
    auditor: Auditor,
    event: RestApiAuditEvent,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuditService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // An outer layer already owns the recorder and will flush it.
        let outer = req
            .extensions()
            .get::<RequestAudit>()
            .filter(|audit| audit.is_attached())
            .cloned();
        if let Some(audit) = outer {
            audit.begin(self.event);
            return Box::pin(self.service.call(req));
        }

        let mut recorder = self.auditor.recorder();
        recorder.begin(self.event);

        let audit = RequestAudit::attached(recorder);
        req.extensions_mut().insert(audit.clone());

        let fut = self.service.call(req);
        Box::pin(async move {
            match fut.await {
                Ok(res) => {
                    let status = res.status();
                    if let Some(err) = res.response().error() {
                        audit.log_failure(err);
                    } else if status.is_client_error() || status.is_server_error() {
                        audit.log_failure(status.canonical_reason().unwrap_or("request failed"));
                    } else {
                        audit.log_success();
                    }
                    Ok(res)
                }
                Err(err) => {
                    audit.log_failure(&err);
                    Err(err)
                }
            }
        })
    }
}

/// Handler-side access to the current request's audit recorder.
///
/// Extracting it on a route without [`AuditTransform`] yields a detached
/// handle whose calls do nothing.
///
/// ```ignore
/// async fn revoke(audit: RequestAudit, id: web::Path<u64>) -> impl Responder {
///     audit.add_data(property::API_KEY_ID, *id);
///     // ...
/// }
/// ```
#[derive(Clone, Default)]
pub struct RequestAudit(Option<Rc<RefCell<AuditEventRecorder>>>);

impl RequestAudit {
    fn attached(recorder: AuditEventRecorder) -> Self {
        RequestAudit(Some(Rc::new(RefCell::new(recorder))))
    }

    pub fn is_attached(&self) -> bool {
        self.0.is_some()
    }

    pub fn begin(&self, event_name: impl Into<String>) {
        self.with(|r| r.begin(event_name));
    }

    pub fn add_data(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.with(|r| r.add_data(key, value));
    }

    pub fn event_name(&self) -> Option<String> {
        self.0
            .as_ref()
            .and_then(|r| r.borrow().event_name().map(String::from))
    }

    pub fn has_logged(&self) -> bool {
        self.0.as_ref().is_some_and(|r| r.borrow().has_logged())
    }

    pub fn log_success(&self) {
        self.with(|r| r.log_success());
    }

    pub fn log_failure(&self, error: impl fmt::Display) {
        self.with(|r| r.log_failure(error));
    }

    fn with(&self, f: impl FnOnce(&mut AuditEventRecorder)) {
        if let Some(recorder) = &self.0 {
            f(&mut recorder.borrow_mut());
        }
    }
}

impl FromRequest for RequestAudit {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let audit = req.extensions().get::<RequestAudit>().cloned();
        if audit.is_none() {
            tracing::debug!(path = %req.path(), "no audit interceptor on route");
        }
        ready(Ok(audit.unwrap_or_default()))
    }
}
