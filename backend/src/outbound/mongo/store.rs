//! Process-wide document store handles.
//!
//! Opened once before the HTTP server binds, shared read-only by every
//! handler through application state, and closed after the server stops.

use mongodb::bson::{Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use thiserror::Error;
use tracing::info;

/// Collection holding user profiles.
pub const USERS_COLLECTION: &str = "users";
/// Collection holding product records.
pub const PRODUCTS_COLLECTION: &str = "products";

const APP_NAME: &str = "storefront";

/// Errors raised while opening the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The connection string could not be parsed.
    #[error("invalid MongoDB connection string: {0}")]
    InvalidUri(#[source] mongodb::error::Error),
    /// The client could not be built from the parsed options.
    #[error("failed to build MongoDB client: {0}")]
    Client(#[source] mongodb::error::Error),
    /// The server did not answer the startup ping.
    #[error("MongoDB database {database} is unreachable: {source}")]
    Unreachable {
        /// Database that was pinged.
        database: String,
        /// Driver error.
        #[source]
        source: mongodb::error::Error,
    },
}

/// Connection parameters for [`StoreHandles::connect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    uri: String,
    database_name: String,
}

impl StoreConfig {
    /// Target `database_name` on the deployment at `uri`.
    pub fn new(uri: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database_name: database_name.into(),
        }
    }

    /// MongoDB connection string.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Logical database holding the collections.
    #[must_use]
    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}

/// Named collection references sharing one client.
///
/// Cloning is cheap; clones share the client's connection pool.
#[derive(Debug, Clone)]
pub struct StoreHandles {
    client: Client,
    database: Database,
    users: Collection<Document>,
    products: Collection<Document>,
}

impl StoreHandles {
    /// Connect, ping the database, and open the collection handles.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the URI is invalid, the client cannot be
    /// built, or the ping fails.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(config.uri())
            .await
            .map_err(StoreError::InvalidUri)?;
        options.app_name = Some(APP_NAME.to_owned());
        let client = Client::with_options(options).map_err(StoreError::Client)?;
        let database = client.database(config.database_name());

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| StoreError::Unreachable {
                database: config.database_name().to_owned(),
                source,
            })?;

        let handles = Self::from_database(client, database);
        info!(
            database = handles.database.name(),
            users = handles.users.name(),
            products = handles.products.name(),
            "store handles opened"
        );
        Ok(handles)
    }

    fn from_database(client: Client, database: Database) -> Self {
        let users = database.collection::<Document>(USERS_COLLECTION);
        let products = database.collection::<Document>(PRODUCTS_COLLECTION);
        Self {
            client,
            database,
            users,
            products,
        }
    }

    /// Handle on the `users` collection.
    #[must_use]
    pub fn users(&self) -> &Collection<Document> {
        &self.users
    }

    /// Handle on the `products` collection.
    #[must_use]
    pub fn products(&self) -> &Collection<Document> {
        &self.products
    }

    /// Close the client, waiting for in-flight operations to finish.
    ///
    /// Clones taken earlier keep working until their operations end, but no
    /// new connections are opened.
    pub async fn shutdown(self) {
        let database = self.database.name().to_owned();
        self.client.shutdown().await;
        info!(database = %database, "store handles released");
    }
}
