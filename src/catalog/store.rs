use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::models::{NewShirt, ShirtRecord};

/// Which records a listing returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "userId", rename_all = "camelCase")]
pub enum ShirtQuery {
    All,
    ByUser(String),
}

/// Document store for shirt records.
///
/// Listings are ordered newest first. `create_shirt` assigns the id and the
/// creation timestamp; callers never supply either.
pub trait ShirtStore: Send + Sync {
    fn create_shirt(&self, shirt: NewShirt)
        -> impl Future<Output = anyhow::Result<String>> + Send;

    fn list_shirts(
        &self,
        query: ShirtQuery,
    ) -> impl Future<Output = anyhow::Result<Vec<ShirtRecord>>> + Send;

    fn get_shirt(
        &self,
        id: &str,
    ) -> impl Future<Output = anyhow::Result<Option<ShirtRecord>>> + Send;
}
