use crate::{models::User, utils::error::AppError};
use async_trait::async_trait;

/// O que fazer quando o userID alvo de uma escrita ainda não existe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Cria o documento com os valores padrão
    Upsert,
    /// Não cria; a escrita devolve `None`
    UpdateOnly,
}

impl WriteMode {
    pub fn upsert(self) -> bool {
        matches!(self, WriteMode::Upsert)
    }
}

/// Acesso ao documento User. Cada método é uma operação atômica
/// sobre um único documento, exceto `link_friends`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;

    async fn find_user(&self, user_id: i64) -> Result<Option<User>, AppError>;

    /// `clicks = None` não altera o contador (só garante o documento em modo Upsert).
    async fn set_clicks(
        &self,
        user_id: i64,
        clicks: Option<i64>,
        mode: WriteMode,
    ) -> Result<Option<User>, AppError>;

    async fn add_upgrade(
        &self,
        user_id: i64,
        upgrade: &str,
        mode: WriteMode,
    ) -> Result<Option<User>, AppError>;

    async fn add_friend(
        &self,
        user_id: i64,
        friend_id: i64,
        mode: WriteMode,
    ) -> Result<Option<User>, AppError>;

    async fn remove_friend(&self, user_id: i64, friend_id: i64) -> Result<(), AppError>;

    /// Amizade mútua. Devolve o documento do lado `user_id`.
    async fn link_friends(
        &self,
        user_id: i64,
        friend_id: i64,
        mode: WriteMode,
    ) -> Result<Option<User>, AppError> {
        link_sequentially(self, user_id, friend_id, mode).await
    }
}

/// Duas escritas em sequência. Se a segunda falhar, desfaz a primeira
/// (quando foi ela que criou o vínculo) e propaga o erro.
pub async fn link_sequentially<S>(
    store: &S,
    user_id: i64,
    friend_id: i64,
    mode: WriteMode,
) -> Result<Option<User>, AppError>
where
    S: UserStore + ?Sized,
{
    let already_linked = store
        .find_user(user_id)
        .await?
        .map(|u| u.friends.contains(&friend_id))
        .unwrap_or(false);

    let user = store.add_friend(user_id, friend_id, mode).await?;

    if let Err(e) = store.add_friend(friend_id, user_id, mode).await {
        log::error!(
            "❌ Failed to add reverse friend link {} -> {}: {}",
            friend_id, user_id, e
        );

        if !already_linked && user.is_some() {
            if let Err(undo) = store.remove_friend(user_id, friend_id).await {
                log::error!(
                    "❌ Friend link {} -> {} left asymmetric: {}",
                    user_id, friend_id, undo
                );
            }
        }

        return Err(e);
    }

    Ok(user)
}
