//! Application factory
//!
//! Wires the shared state, middleware and routes into an Actix-web
//! application. Member endpoints sit behind [`AuthGate`].

use std::sync::Arc;

use actix_web::{error::JsonPayloadError, web, App, HttpRequest, HttpResponse};
use mp_core::repositories::{OrderRepository, UserRepository};
use mp_core::services::CacheStore;
use mp_shared::config::ServerConfig;
use mp_shared::{error_codes, CorsConfig, ErrorResponse};
use tracing_actix_web::TracingLogger;

use crate::handlers::error::ApiError;
use crate::middleware::auth::{AuthGate, IdentityResolverWrapper};
use crate::middleware::cors::create_cors;
use crate::middleware::request_id::{RequestIdHeader, RequestIdRootSpan};
use crate::routes::{account, order, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<U, C, O>(
    app_state: web::Data<AppState<U, C, O>>,
    server: &ServerConfig,
    cors: &CorsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    O: OrderRepository + 'static,
{
    let resolver: Arc<dyn IdentityResolverWrapper> = app_state.identity.clone();
    let auth = AuthGate::new(resolver);

    let json_config = web::JsonConfig::default()
        .limit(server.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .wrap(create_cors(cors))
        .wrap(RequestIdHeader)
        .wrap(TracingLogger::<RequestIdRootSpan>::new())
        .route("/health", web::get().to(health_check::<U, C, O>))
        .route("/register", web::post().to(account::register::<U, C, O>))
        .route("/login", web::post().to(account::login::<U, C, O>))
        .service(
            web::resource("/info")
                .wrap(auth.clone())
                .route(web::get().to(account::info)),
        )
        .service(
            web::scope("/member")
                .wrap(auth)
                .route("/order", web::post().to(order::create_order::<U, C, O>))
                .route("/order/{id}", web::get().to(order::get_order::<U, C, O>)),
        )
        .default_service(web::route().to(not_found))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest {
        message: err.to_string(),
    }
    .into()
}

/// Health check endpoint handler
async fn health_check<U, C, O>(state: web::Data<AppState<U, C, O>>) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    O: OrderRepository + 'static,
{
    state.health.respond().await
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
