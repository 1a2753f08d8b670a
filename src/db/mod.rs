use std::time::Duration;

use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection, Database as MongoDatabase,
};

use crate::{config::Config, errors::AppResult};

pub const QUESTIONS_COLLECTION: &str = "questions";
pub const SESSIONS_COLLECTION: &str = "sessions";
pub const COUNTERS_COLLECTION: &str = "counters";

#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(&config.mongo_conn_string).await?;

        let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
        client_options.server_api = Some(server_api);
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        client_options.max_pool_size = Some(10);
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = Self {
            client,
            db_name: config.mongo_db_name.clone(),
        };
        db.health_check().await?;

        log::info!("Connected to MongoDB database '{}'", db.db_name);
        Ok(db)
    }

    fn database(&self) -> MongoDatabase {
        self.client.database(&self.db_name)
    }

    pub fn get_collection<T>(&self, collection_name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.database().collection(collection_name)
    }

    /// Untyped handle on the id sequence documents (`{ _id: <name>, seq: <i64> }`).
    pub fn counters(&self) -> Collection<Document> {
        self.get_collection(COUNTERS_COLLECTION)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
