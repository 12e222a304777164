//! MongoDB access for the catalog collections.
//!
//! The client is created once in `main` and handed to handlers through
//! `AppState`; nothing here caches a global connection.

pub mod catalog;

use mongodb::bson::doc;
use mongodb::{Client, Collection, Database};

pub const STREAMS: &str = "streams";
pub const COINS: &str = "coins";
pub const CHAINS: &str = "chains";

/// Connect to `uri` and return a handle to `db_name`.
///
/// Pings the server so a bad URI or unreachable host fails at startup
/// rather than on the first request. Errors are logged and returned.
pub async fn connect(uri: &str, db_name: &str) -> Result<(Client, Database), mongodb::error::Error> {
    let client = match Client::with_uri_str(uri).await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "MongoDB connection error");
            return Err(e);
        }
    };

    let db = client.database(db_name);
    if let Err(e) = db.run_command(doc! { "ping": 1 }).await {
        tracing::error!(error = %e, database = %db_name, "MongoDB connection error");
        return Err(e);
    }

    tracing::info!(database = %db_name, "Connected to MongoDB");
    Ok((client, db))
}

/// Typed handle to the collection called `name`.
pub fn collection<T>(db: &Database, name: &str) -> Collection<T>
where
    T: Send + Sync,
{
    db.collection::<T>(name)
}
