use actix_web::{web, HttpResponse, ResponseError};
use crate::{
    database::UserStore,
    models::UserResponse,
    services::user_service::{self, ClicksResponse, MessageResponse, SetClicksRequest, UserQuery},
};

#[utoipa::path(
    get,
    path = "/api/clicks",
    tag = "Clicks",
    params(UserQuery),
    responses(
        (status = 200, description = "Current click count", body = ClicksResponse),
        (status = 404, description = "User not found", body = MessageResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    )
)]
pub async fn get_clicks(
    store: web::Data<dyn UserStore>,
    query: web::Query<UserQuery>,
) -> HttpResponse {
    let user_id = query.user_id.as_deref();

    log::info!("🖱️  GET /api/clicks - userID={:?}", user_id);

    match user_service::get_clicks(store.get_ref(), user_id).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::warn!("⚠️  Failed to fetch clicks for userID={:?}: {}", user_id, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/clicks",
    tag = "Clicks",
    request_body = SetClicksRequest,
    responses(
        (status = 200, description = "Updated user document", body = UserResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    )
)]
pub async fn set_clicks(
    store: web::Data<dyn UserStore>,
    request: web::Json<SetClicksRequest>,
) -> HttpResponse {
    log::info!(
        "🖱️  Received update request: userID={:?}, clicks={:?}",
        request.user_id, request.clicks
    );

    match user_service::set_clicks(store.get_ref(), &request).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => {
            log::error!("❌ Error updating user clicks: {}", e);
            e.error_response()
        }
    }
}
