// UserStore em memória para testes, com injeção de falhas de escrita.

use super::user_store::{UserStore, WriteMode};
use crate::{models::User, utils::error::AppError};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<i64, User>>,
    failing: Mutex<HashSet<i64>>,
    offline: Mutex<bool>,
}

impl MemoryUserStore {
    /// Toda escrita cujo alvo seja `user_id` passa a falhar
    pub fn fail_writes_for(&self, user_id: i64) {
        self.failing.lock().unwrap().insert(user_id);
    }

    /// Simula o banco fora do ar: todas as operações falham
    pub fn go_offline(&self) {
        *self.offline.lock().unwrap() = true;
    }

    fn check_online(&self) -> Result<(), AppError> {
        if *self.offline.lock().unwrap() {
            return Err(AppError::Internal("connection refused".into()));
        }
        Ok(())
    }

    fn write<F>(&self, user_id: i64, mode: WriteMode, apply: F) -> Result<Option<User>, AppError>
    where
        F: FnOnce(&mut User),
    {
        self.check_online()?;
        if self.failing.lock().unwrap().contains(&user_id) {
            return Err(AppError::Internal(format!("write to user {} failed", user_id)));
        }

        let mut users = self.users.lock().unwrap();
        if !users.contains_key(&user_id) {
            if !mode.upsert() {
                return Ok(None);
            }
            users.insert(user_id, User {
                id: Some(ObjectId::new()),
                user_id,
                clicks: 0,
                upgrades: Vec::new(),
                friends: Vec::new(),
            });
        }

        let user = users.get_mut(&user_id).unwrap();
        apply(user);
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.check_online()
    }

    async fn find_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        self.check_online()?;
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }

    async fn set_clicks(&self, user_id: i64, clicks: Option<i64>, mode: WriteMode) -> Result<Option<User>, AppError> {
        self.write(user_id, mode, |user| {
            if let Some(clicks) = clicks {
                user.clicks = clicks;
            }
        })
    }

    async fn add_upgrade(&self, user_id: i64, upgrade: &str, mode: WriteMode) -> Result<Option<User>, AppError> {
        self.write(user_id, mode, |user| {
            if !user.upgrades.iter().any(|u| u == upgrade) {
                user.upgrades.push(upgrade.to_string());
            }
        })
    }

    async fn add_friend(&self, user_id: i64, friend_id: i64, mode: WriteMode) -> Result<Option<User>, AppError> {
        self.write(user_id, mode, |user| {
            if !user.friends.contains(&friend_id) {
                user.friends.push(friend_id);
            }
        })
    }

    async fn remove_friend(&self, user_id: i64, friend_id: i64) -> Result<(), AppError> {
        self.check_online()?;
        if let Some(user) = self.users.lock().unwrap().get_mut(&user_id) {
            user.friends.retain(|f| *f != friend_id);
        }
        Ok(())
    }
}
