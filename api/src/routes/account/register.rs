use actix_web::{web, HttpResponse};
use mp_core::repositories::{OrderRepository, UserRepository};
use mp_core::services::CacheStore;
use mp_shared::ApiResponse;
use validator::Validate;

use crate::dto::auth::{AuthResponse, RegisterRequest};
use crate::handlers::error::ApiError;
use crate::routes::AppState;

/// Handler for POST /register
///
/// # Request Body
///
/// ```json
/// {
///     "name": "alice",
///     "telephone": "13812345678",
///     "password": "secret1",
///     "gender": "female",
///     "avatar": ""
/// }
/// ```
///
/// # Responses
/// - `200` with the new user's token
/// - `400` on invalid input
/// - `409` when the telephone is already registered
pub async fn register<U, C, O>(
    state: web::Data<AppState<U, C, O>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    O: OrderRepository + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    let account = state.accounts.register(request.into()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(AuthResponse::from(account))))
}
