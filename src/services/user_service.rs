// ==================== USER RECORD SERVICE ====================
// Cliques, upgrades e amizades do jogador, um documento User por userID.
// Toda escrita é upsert: o primeiro write cria o usuário.

use crate::{
    database::{UserStore, WriteMode},
    models::{User, UserResponse},
    utils::{coerce, error::AppError},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

// ==================== REQUEST/RESPONSE MODELS ====================

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    #[serde(rename = "userID")]
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SetClicksRequest {
    #[serde(rename = "userID", default)]
    #[schema(value_type = Option<i64>)]
    pub user_id: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub clicks: Option<Value>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddUpgradeRequest {
    #[serde(rename = "userID", default)]
    #[schema(value_type = Option<i64>)]
    pub user_id: Option<Value>,
    #[serde(rename = "upgradeName", default)]
    #[schema(value_type = Option<String>)]
    pub upgrade_name: Option<Value>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddFriendRequest {
    #[serde(rename = "userID", default)]
    #[schema(value_type = Option<i64>)]
    pub user_id: Option<Value>,
    #[serde(rename = "friendID", default)]
    #[schema(value_type = Option<i64>)]
    pub friend_id: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ClicksResponse {
    pub clicks: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct UpgradesResponse {
    pub upgrades: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct FriendsResponse {
    pub friends: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// ==================== SERVICE FUNCTIONS ====================

/// Documento devolvido por um upsert; ausente só se o banco não respeitou o upsert
fn upserted(user: Option<User>, user_id: i64) -> Result<UserResponse, AppError> {
    user.map(UserResponse::from)
        .ok_or_else(|| AppError::Internal(format!("Upsert returned no document for userID {}", user_id)))
}

async fn find_existing(store: &dyn UserStore, user_id: Option<i64>) -> Result<User, AppError> {
    match user_id {
        Some(id) => store.find_user(id).await?.ok_or_else(AppError::user_not_found),
        None => Err(AppError::user_not_found()),
    }
}

/// GET /api/clicks
pub async fn get_clicks(store: &dyn UserStore, raw_user_id: Option<&str>) -> Result<ClicksResponse, AppError> {
    let user_id = coerce::loose_query_id(raw_user_id)?;
    let user = find_existing(store, user_id).await?;
    Ok(ClicksResponse { clicks: user.clicks })
}

/// POST /api/clicks - sobrescreve o contador (não incrementa)
pub async fn set_clicks(store: &dyn UserStore, request: &SetClicksRequest) -> Result<UserResponse, AppError> {
    let user_id = coerce::cast_integer(request.user_id.as_ref(), "userID")?;
    let clicks = coerce::cast_optional_integer(request.clicks.as_ref(), "clicks")?;

    let user = store.set_clicks(user_id, clicks, WriteMode::Upsert).await?;
    upserted(user, user_id)
}

/// POST /api/upgrades - idempotente
pub async fn add_upgrade(store: &dyn UserStore, request: &AddUpgradeRequest) -> Result<UserResponse, AppError> {
    let user_id = coerce::cast_integer(request.user_id.as_ref(), "userID")?;
    let upgrade = coerce::cast_string(request.upgrade_name.as_ref(), "upgrades")?;

    let user = store.add_upgrade(user_id, &upgrade, WriteMode::Upsert).await?;
    upserted(user, user_id)
}

/// GET /api/upgrades
pub async fn list_upgrades(store: &dyn UserStore, raw_user_id: Option<&str>) -> Result<UpgradesResponse, AppError> {
    let user_id = coerce::numeric_query_id(raw_user_id)?;
    let user = find_existing(store, user_id).await?;
    Ok(UpgradesResponse { upgrades: user.upgrades })
}

/// GET /api/friends
pub async fn list_friends(store: &dyn UserStore, raw_user_id: Option<&str>) -> Result<FriendsResponse, AppError> {
    let user_id = coerce::numeric_query_id(raw_user_id)?;
    let user = find_existing(store, user_id).await?;
    Ok(FriendsResponse { friends: user.friends })
}

/// POST /api/friends/add - vínculo nos dois documentos, devolve o lado userID
pub async fn add_friend(store: &dyn UserStore, request: &AddFriendRequest) -> Result<UserResponse, AppError> {
    let user_id = coerce::cast_integer(request.user_id.as_ref(), "userID")?;
    let friend_id = coerce::cast_integer(request.friend_id.as_ref(), "friends")?;

    let user = store.link_friends(user_id, friend_id, WriteMode::Upsert).await?;
    upserted(user, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryUserStore;
    use serde_json::json;

    fn clicks_request(user_id: Value, clicks: Value) -> SetClicksRequest {
        SetClicksRequest { user_id: Some(user_id), clicks: Some(clicks) }
    }

    fn upgrade_request(user_id: i64, name: &str) -> AddUpgradeRequest {
        AddUpgradeRequest { user_id: Some(json!(user_id)), upgrade_name: Some(json!(name)) }
    }

    fn friend_request(user_id: i64, friend_id: i64) -> AddFriendRequest {
        AddFriendRequest { user_id: Some(json!(user_id)), friend_id: Some(json!(friend_id)) }
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let store = MemoryUserStore::default();
        for id in ["1", "999", "-4"] {
            assert_eq!(get_clicks(&store, Some(id)).await, Err(AppError::user_not_found()));
        }
        assert_eq!(list_upgrades(&store, Some("1")).await, Err(AppError::user_not_found()));
        assert_eq!(list_friends(&store, Some("1")).await, Err(AppError::user_not_found()));
    }

    #[tokio::test]
    async fn test_set_then_get_clicks() {
        let store = MemoryUserStore::default();
        let user = set_clicks(&store, &clicks_request(json!(5), json!(10))).await.unwrap();
        assert_eq!(user.user_id, 5);
        assert_eq!(user.clicks, 10);
        assert!(user.upgrades.is_empty());

        assert_eq!(get_clicks(&store, Some("5")).await.unwrap(), ClicksResponse { clicks: 10 });

        // Sobrescreve, não soma
        set_clicks(&store, &clicks_request(json!("5"), json!(3))).await.unwrap();
        assert_eq!(get_clicks(&store, Some("5")).await.unwrap(), ClicksResponse { clicks: 3 });
    }

    #[tokio::test]
    async fn test_set_clicks_without_value_keeps_counter() {
        let store = MemoryUserStore::default();
        set_clicks(&store, &clicks_request(json!(2), json!(8))).await.unwrap();

        let request = SetClicksRequest { user_id: Some(json!(2)), clicks: None };
        let user = set_clicks(&store, &request).await.unwrap();
        assert_eq!(user.clicks, 8);

        // null tem o mesmo efeito que ausente: o contador é inteiro, nunca nulo
        let user = set_clicks(&store, &clicks_request(json!(2), Value::Null)).await.unwrap();
        assert_eq!(user.clicks, 8);
        assert_eq!(get_clicks(&store, Some("2")).await.unwrap(), ClicksResponse { clicks: 8 });
    }

    #[tokio::test]
    async fn test_get_clicks_with_non_matching_number_is_not_found() {
        let store = MemoryUserStore::default();
        set_clicks(&store, &clicks_request(json!(1), json!(4))).await.unwrap();

        for id in ["1.5", "", "1e20", "Infinity"] {
            assert_eq!(get_clicks(&store, Some(id)).await, Err(AppError::user_not_found()), "{id:?}");
        }
        assert_eq!(list_upgrades(&store, Some("1.5")).await, Err(AppError::user_not_found()));
    }

    #[tokio::test]
    async fn test_uncastable_ids_are_internal_errors() {
        let store = MemoryUserStore::default();
        assert!(matches!(get_clicks(&store, Some("abc")).await, Err(AppError::Internal(_))));
        assert!(matches!(get_clicks(&store, None).await, Err(AppError::Internal(_))));

        let request = SetClicksRequest { user_id: None, clicks: Some(json!(1)) };
        assert!(matches!(set_clicks(&store, &request).await, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_add_upgrade_is_idempotent() {
        let store = MemoryUserStore::default();
        add_upgrade(&store, &upgrade_request(5, "x")).await.unwrap();
        let user = add_upgrade(&store, &upgrade_request(5, "x")).await.unwrap();
        assert_eq!(user.upgrades, vec!["x".to_string()]);

        add_upgrade(&store, &upgrade_request(5, "y")).await.unwrap();
        let upgrades = list_upgrades(&store, Some("5")).await.unwrap();
        assert_eq!(upgrades.upgrades, vec!["x".to_string(), "y".to_string()]);
    }

    #[tokio::test]
    async fn test_list_requires_numeric_id() {
        let store = MemoryUserStore::default();
        assert_eq!(list_upgrades(&store, Some("abc")).await, Err(AppError::invalid_user_id()));
        assert_eq!(list_friends(&store, Some("abc")).await, Err(AppError::invalid_user_id()));
        assert_eq!(list_friends(&store, None).await, Err(AppError::invalid_user_id()));
        // Numérico mas não inteiro: nunca existe
        assert_eq!(list_friends(&store, Some("1.5")).await, Err(AppError::user_not_found()));
    }

    #[tokio::test]
    async fn test_add_friend_is_symmetric() {
        let store = MemoryUserStore::default();
        let user = add_friend(&store, &friend_request(1, 2)).await.unwrap();
        assert_eq!(user.user_id, 1);
        assert_eq!(user.friends, vec![2]);

        assert_eq!(list_friends(&store, Some("1")).await.unwrap().friends, vec![2]);
        assert_eq!(list_friends(&store, Some("2")).await.unwrap().friends, vec![1]);

        // Repetir não duplica
        add_friend(&store, &friend_request(2, 1)).await.unwrap();
        assert_eq!(list_friends(&store, Some("1")).await.unwrap().friends, vec![2]);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_message() {
        let store = MemoryUserStore::default();
        store.go_offline();
        let err = set_clicks(&store, &clicks_request(json!(1), json!(1))).await.unwrap_err();
        assert_eq!(err, AppError::Internal("connection refused".into()));
    }
}
