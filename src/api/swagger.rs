use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Clicker Service API",
        version = "1.0.0",
        description = "Backend for a clicker game.\n\n**Features:**\n- Click counters per user\n- Purchased upgrades\n- Mutual friend lists\n- Health monitoring and metrics\n\nWrites create the user on first use (upsert)."
    ),
    paths(
        // Clicks
        crate::api::clicks::get_clicks,
        crate::api::clicks::set_clicks,

        // Upgrades
        crate::api::upgrades::add_upgrade,
        crate::api::upgrades::list_upgrades,

        // Friends
        crate::api::friends::list_friends,
        crate::api::friends::add_friend,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::models::UserResponse,
            crate::services::user_service::SetClicksRequest,
            crate::services::user_service::AddUpgradeRequest,
            crate::services::user_service::AddFriendRequest,
            crate::services::user_service::ClicksResponse,
            crate::services::user_service::UpgradesResponse,
            crate::services::user_service::FriendsResponse,
            crate::services::user_service::MessageResponse,
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
        )
    ),
    tags(
        (name = "Clicks", description = "Read and overwrite a user's click counter."),
        (name = "Upgrades", description = "Record and list purchased upgrades. Adding is idempotent."),
        (name = "Friends", description = "Mutual friend lists keyed by userID."),
        (name = "Health", description = "Health check and system metrics endpoints for monitoring service status."),
    )
)]
pub struct ApiDoc;
