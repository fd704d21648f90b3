use actix_web::{web, HttpResponse};
use mp_core::repositories::{OrderRepository, UserRepository};
use mp_core::services::CacheStore;
use mp_shared::ApiResponse;

use crate::dto::order::OrderView;
use crate::handlers::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::routes::AppState;

/// Handler for GET /member/order/{id}
///
/// Orders of other buyers answer 404 like missing ones.
pub async fn get_order<U, C, O>(
    state: web::Data<AppState<U, C, O>>,
    current: CurrentUser,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
    O: OrderRepository + 'static,
{
    let order = state
        .orders
        .get_order(current.user(), path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(OrderView::from(order))))
}
