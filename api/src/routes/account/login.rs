use actix_web::{web, HttpResponse};
use mp_core::repositories::{OrderRepository, UserRepository};
use mp_core::services::CacheStore;
use mp_shared::ApiResponse;
use validator::Validate;

use crate::dto::auth::{AuthResponse, LoginRequest};
use crate::handlers::error::ApiError;
use crate::routes::AppState;

/// Handler for POST /login
///
/// Unknown telephones answer `404 USER_NOT_FOUND`, wrong passwords
/// `401 INVALID_CREDENTIALS`.
pub async fn login<U, C, O>(
    state: web::Data<AppState<U, C, O>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    O: OrderRepository + 'static,
{
    request.validate()?;

    let account = state
        .accounts
        .login(&request.telephone, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(AuthResponse::from(account))))
}
