// Implementação do UserStore sobre a collection "users" do MongoDB.

use super::user_store::{link_sequentially, UserStore, WriteMode};
use super::MongoDB;
use crate::{models::User, utils::error::AppError};
use async_trait::async_trait;
use mongodb::{
    bson::{doc, Document},
    error::ErrorKind,
    options::ReturnDocument,
    ClientSession, Collection,
};

const COLLECTION: &str = "users";

/// IllegalOperation: servidor standalone não aceita transações
const ILLEGAL_OPERATION: i32 = 20;

/// Valores padrão aplicados só na criação, exceto o campo que a escrita altera
/// (o MongoDB recusa o mesmo caminho em $setOnInsert e $set/$addToSet).
fn insert_defaults(touched: Option<&str>) -> Document {
    let mut defaults = doc! { "clicks": 0_i64, "upgrades": [], "friends": [] };
    if let Some(field) = touched {
        defaults.remove(field);
    }
    defaults
}

fn clicks_update(clicks: Option<i64>) -> Document {
    match clicks {
        Some(clicks) => doc! {
            "$set": { "clicks": clicks },
            "$setOnInsert": insert_defaults(Some("clicks")),
        },
        None => doc! { "$setOnInsert": insert_defaults(None) },
    }
}

fn upgrade_update(upgrade: &str) -> Document {
    doc! {
        "$addToSet": { "upgrades": upgrade },
        "$setOnInsert": insert_defaults(Some("upgrades")),
    }
}

fn friend_update(friend_id: i64) -> Document {
    doc! {
        "$addToSet": { "friends": friend_id },
        "$setOnInsert": insert_defaults(Some("friends")),
    }
}

fn is_transaction_unsupported(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Command(cmd) => cmd.code == ILLEGAL_OPERATION,
        _ => false,
    }
}

/// Como `link_friends` grava os dois lados do vínculo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FriendLinkPath {
    Transaction,
    Sequential,
}

impl MongoDB {
    fn friend_link_path(&self) -> FriendLinkPath {
        if self.transactions_enabled() {
            FriendLinkPath::Transaction
        } else {
            FriendLinkPath::Sequential
        }
    }

    pub(crate) fn users(&self) -> Collection<User> {
        self.collection::<User>(COLLECTION)
    }

    async fn update_user(
        &self,
        user_id: i64,
        update: Document,
        mode: WriteMode,
    ) -> Result<Option<User>, AppError> {
        let user = self
            .users()
            .find_one_and_update(doc! { "userID": user_id }, update)
            .upsert(mode.upsert())
            .return_document(ReturnDocument::After)
            .await?;
        Ok(user)
    }

    async fn link_in_transaction(
        &self,
        session: &mut ClientSession,
        user_id: i64,
        friend_id: i64,
        mode: WriteMode,
    ) -> Result<Option<User>, mongodb::error::Error> {
        let user = self
            .users()
            .find_one_and_update(doc! { "userID": user_id }, friend_update(friend_id))
            .upsert(mode.upsert())
            .return_document(ReturnDocument::After)
            .session(&mut *session)
            .await?;

        self.users()
            .find_one_and_update(doc! { "userID": friend_id }, friend_update(user_id))
            .upsert(mode.upsert())
            .session(&mut *session)
            .await?;

        session.commit_transaction().await?;
        Ok(user)
    }
}

#[async_trait]
impl UserStore for MongoDB {
    async fn ping(&self) -> Result<(), AppError> {
        MongoDB::ping(self).await.map_err(AppError::from)
    }

    async fn find_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        let user = self.users().find_one(doc! { "userID": user_id }).await?;
        Ok(user)
    }

    async fn set_clicks(&self, user_id: i64, clicks: Option<i64>, mode: WriteMode) -> Result<Option<User>, AppError> {
        self.update_user(user_id, clicks_update(clicks), mode).await
    }

    async fn add_upgrade(&self, user_id: i64, upgrade: &str, mode: WriteMode) -> Result<Option<User>, AppError> {
        self.update_user(user_id, upgrade_update(upgrade), mode).await
    }

    async fn add_friend(&self, user_id: i64, friend_id: i64, mode: WriteMode) -> Result<Option<User>, AppError> {
        self.update_user(user_id, friend_update(friend_id), mode).await
    }

    async fn remove_friend(&self, user_id: i64, friend_id: i64) -> Result<(), AppError> {
        self.users()
            .update_one(doc! { "userID": user_id }, doc! { "$pull": { "friends": friend_id } })
            .await?;
        Ok(())
    }

    async fn link_friends(&self, user_id: i64, friend_id: i64, mode: WriteMode) -> Result<Option<User>, AppError> {
        if self.friend_link_path() == FriendLinkPath::Sequential {
            return link_sequentially(self, user_id, friend_id, mode).await;
        }

        let mut session = self.client().start_session().await?;

        // O driver recusa start_transaction em deployments sem suporte
        if let Err(e) = session.start_transaction().await {
            log::warn!("⚠️  Transactions unavailable, linking friends sequentially: {}", e);
            self.disable_transactions();
            return link_sequentially(self, user_id, friend_id, mode).await;
        }

        match self.link_in_transaction(&mut session, user_id, friend_id, mode).await {
            Ok(user) => Ok(user),
            Err(e) => {
                if let Err(abort) = session.abort_transaction().await {
                    log::debug!("Friend link transaction abort: {}", abort);
                }

                if is_transaction_unsupported(&e) {
                    log::warn!("⚠️  MongoDB does not support transactions, linking friends sequentially: {}", e);
                    self.disable_transactions();
                    return link_sequentially(self, user_id, friend_id, mode).await;
                }

                Err(e.into())
            }
        }
    }
}
