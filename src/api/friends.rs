use actix_web::{web, HttpResponse, ResponseError};
use crate::{
    database::UserStore,
    models::UserResponse,
    services::user_service::{self, AddFriendRequest, FriendsResponse, MessageResponse, UserQuery},
};

#[utoipa::path(
    get,
    path = "/api/friends",
    tag = "Friends",
    params(UserQuery),
    responses(
        (status = 200, description = "Friend userIDs", body = FriendsResponse),
        (status = 400, description = "Invalid userID format", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    )
)]
pub async fn list_friends(
    store: web::Data<dyn UserStore>,
    query: web::Query<UserQuery>,
) -> HttpResponse {
    let user_id = query.user_id.as_deref();

    log::info!("👥 GET /api/friends - userID={:?}", user_id);

    match user_service::list_friends(store.get_ref(), user_id).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error fetching friends: {}", e);
            e.error_response()
        }
    }
}

/// Vínculo mútuo: o amigo também recebe userID na sua lista
#[utoipa::path(
    post,
    path = "/api/friends/add",
    tag = "Friends",
    request_body = AddFriendRequest,
    responses(
        (status = 200, description = "Updated user document (userID side)", body = UserResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    )
)]
pub async fn add_friend(
    store: web::Data<dyn UserStore>,
    request: web::Json<AddFriendRequest>,
) -> HttpResponse {
    log::info!(
        "🤝 POST /api/friends/add - userID={:?}, friendID={:?}",
        request.user_id, request.friend_id
    );

    match user_service::add_friend(store.get_ref(), &request).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => {
            log::error!("❌ Error adding friend: {}", e);
            e.error_response()
        }
    }
}
