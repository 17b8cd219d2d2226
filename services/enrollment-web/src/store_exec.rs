use std::sync::Arc;

use enrollment::DatasetStore;

pub async fn with_store_blocking<R, F>(
    store: Arc<DatasetStore>,
    f: F,
) -> Result<R, tokio::task::JoinError>
where
    R: Send + 'static,
    F: FnOnce(&DatasetStore) -> R + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&store)).await
}
