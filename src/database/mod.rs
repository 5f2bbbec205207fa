pub mod user_store;
mod users;
#[cfg(test)]
pub mod memory;

pub use user_store::*;

use crate::config::Config;
use mongodb::{bson::doc, options::ClientOptions, Client, Collection, Database};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Nome padrão quando nem a URI nem MONGODB_DATABASE indicam o banco
const DEFAULT_DATABASE: &str = "test";

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
    /// Desligado na primeira vez que o servidor recusa transações (standalone)
    transactions: Arc<AtomicBool>,
}

impl MongoDB {
    /// Monta o client sem abrir conexão; falha apenas se a URI for inválida.
    pub async fn new(config: &Config) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(&config.mongodb_uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));  // 5min idle

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let db_name = config
            .database_name
            .clone()
            .or_else(|| client_options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        Ok(Self {
            client,
            db,
            transactions: Arc::new(AtomicBool::new(config.use_transactions)),
        })
    }

    /// Testa a conexão e cria os índices.
    ///
    /// Falhas são apenas logadas: as requisições falharão individualmente.
    pub async fn initialize(&self) {
        match self.ping().await {
            Ok(()) => log::info!("✅ MongoDB connected: {}", self.db.name()),
            Err(e) => {
                log::error!("❌ MongoDB connection failed: {}", e);
                return;
            }
        }

        self.ensure_indexes().await;
    }

    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn ensure_indexes(&self) {
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        // userID é a identidade externa: no máximo um documento por valor
        let index = IndexModel::builder()
            .keys(doc! { "userID": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match self.users().create_index(index).await {
            Ok(_) => log::info!("   ✅ Index created: users(userID) unique"),
            Err(e) => log::warn!("   ⚠️  Could not create users(userID) index: {}", e),
        }
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn transactions_enabled(&self) -> bool {
        self.transactions.load(Ordering::Relaxed)
    }

    pub(crate) fn disable_transactions(&self) {
        self.transactions.store(false, Ordering::Relaxed);
    }
}
