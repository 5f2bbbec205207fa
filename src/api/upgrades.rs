use actix_web::{web, HttpResponse, ResponseError};
use crate::{
    database::UserStore,
    models::UserResponse,
    services::user_service::{self, AddUpgradeRequest, MessageResponse, UpgradesResponse, UserQuery},
};

#[utoipa::path(
    post,
    path = "/api/upgrades",
    tag = "Upgrades",
    request_body = AddUpgradeRequest,
    responses(
        (status = 200, description = "Updated user document", body = UserResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    )
)]
pub async fn add_upgrade(
    store: web::Data<dyn UserStore>,
    request: web::Json<AddUpgradeRequest>,
) -> HttpResponse {
    log::info!(
        "🛒 POST /api/upgrades - userID={:?}, upgradeName={:?}",
        request.user_id, request.upgrade_name
    );

    match user_service::add_upgrade(store.get_ref(), &request).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => {
            log::error!("❌ Error storing upgrade: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/upgrades",
    tag = "Upgrades",
    params(UserQuery),
    responses(
        (status = 200, description = "Purchased upgrades", body = UpgradesResponse),
        (status = 400, description = "Invalid userID format", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    )
)]
pub async fn list_upgrades(
    store: web::Data<dyn UserStore>,
    query: web::Query<UserQuery>,
) -> HttpResponse {
    let user_id = query.user_id.as_deref();

    log::info!("📋 GET /api/upgrades - userID={:?}", user_id);

    match user_service::list_upgrades(store.get_ref(), user_id).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error fetching upgrades: {}", e);
            e.error_response()
        }
    }
}
