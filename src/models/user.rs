use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Documento da collection "users"
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<ObjectId>,
    #[serde(rename = "userID")]
    pub user_id: i64,  // chave externa, única (não é o _id do MongoDB)
    #[serde(default)]
    pub clicks: i64,
    #[serde(default)]
    pub upgrades: Vec<String>,
    #[serde(default)]
    pub friends: Vec<i64>,
}

/// User como devolvido pela API (`_id` em hexadecimal)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub clicks: i64,
    pub upgrades: Vec<String>,
    pub friends: Vec<i64>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            user_id: user.user_id,
            clicks: user.clicks,
            upgrades: user.upgrades,
            friends: user.friends,
        }
    }
}
