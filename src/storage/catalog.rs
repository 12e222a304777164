//! Read queries over the `streams`, `coins` and `chains` collections.

use super::{collection, CHAINS, COINS, STREAMS};
use crate::models::{Chain, Coin, Stream};
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::Database;
use serde::de::DeserializeOwned;

/// Upper bound on documents returned by a list query.
const LIST_MAX_DOCS: i64 = 10_000;

/// Every document matching `filter`, up to [`LIST_MAX_DOCS`].
///
/// Hitting the cap is logged; callers get the truncated list.
async fn find_all<T>(
    db: &Database,
    name: &str,
    filter: Document,
) -> Result<Vec<T>, mongodb::error::Error>
where
    T: DeserializeOwned + Send + Sync + Unpin,
{
    let cursor = collection::<T>(db, name)
        .find(filter)
        .limit(LIST_MAX_DOCS)
        .await?;
    let docs: Vec<T> = cursor.try_collect().await?;
    if is_truncated(docs.len()) {
        tracing::warn!(
            collection = %name,
            limit = LIST_MAX_DOCS,
            "List query hit the document cap, results truncated"
        );
    }
    Ok(docs)
}

fn is_truncated(returned: usize) -> bool {
    returned as i64 >= LIST_MAX_DOCS
}

/// All streams, optionally only those paying in `coin_key`.
pub async fn list_streams(
    db: &Database,
    coin_key: Option<&str>,
) -> Result<Vec<Stream>, mongodb::error::Error> {
    let filter = match coin_key {
        Some(key) => doc! { "coinKey": key },
        None => doc! {},
    };
    find_all(db, STREAMS, filter).await
}

pub async fn list_coins(db: &Database) -> Result<Vec<Coin>, mongodb::error::Error> {
    find_all(db, COINS, doc! {}).await
}

pub async fn get_coin(db: &Database, key: &str) -> Result<Option<Coin>, mongodb::error::Error> {
    collection::<Coin>(db, COINS).find_one(doc! { "key": key }).await
}

pub async fn list_chains(db: &Database) -> Result<Vec<Chain>, mongodb::error::Error> {
    find_all(db, CHAINS, doc! {}).await
}

pub async fn get_chain(
    db: &Database,
    chain_id: &str,
) -> Result<Option<Chain>, mongodb::error::Error> {
    collection::<Chain>(db, CHAINS)
        .find_one(doc! { "chainId": chain_id })
        .await
}
