use actix_web::HttpResponse;
use mp_shared::ApiResponse;

use crate::dto::auth::UserView;
use crate::middleware::auth::CurrentUser;

/// Handler for GET /info
///
/// Answers from the identity already resolved by the auth gate.
pub async fn info(current: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(UserView::from(current.user())))
}
