use actix_web::{web, HttpResponse};
use mp_core::repositories::{OrderRepository, UserRepository};
use mp_core::services::CacheStore;
use mp_shared::ApiResponse;
use validator::Validate;

use crate::dto::order::{CreateOrderRequest, CreateOrderResponse};
use crate::handlers::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::routes::AppState;

/// Handler for POST /member/order
///
/// # Request Body
///
/// ```json
/// { "goodId": 7, "addressId": 3 }
/// ```
///
/// # Responses
/// - `200` `{"success":true,"data":{"orderId":N},...}`
/// - `400 INVALID_REFERENCE` when the good or address does not exist
/// - `409 GOOD_ALREADY_SOLD` when another buyer got there first
/// - `503 SERVICE_UNAVAILABLE` on store failure
pub async fn create_order<U, C, O>(
    state: web::Data<AppState<U, C, O>>,
    current: CurrentUser,
    request: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    O: OrderRepository + 'static,
{
    request.validate()?;

    let order = state
        .orders
        .create_order(current.user(), request.good_id, request.address_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(CreateOrderResponse {
        order_id: order.id,
    })))
}
