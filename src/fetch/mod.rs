mod celestrak;
mod directory;
mod error;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::propagate::ElementSet;

pub use celestrak::{CelestrakSource, DEFAULT_CELESTRAK_URL};
pub use directory::DirectorySource;
pub use error::RetrievalError;

/// Where raw element-set text comes from.
pub trait ElementSource: Send + Sync + 'static {
    fn fetch(
        &self,
        catalog_id: u32,
    ) -> impl Future<Output = Result<String, RetrievalError>> + Send;
}

/// Retrieves and parses one element set, checking it describes the requested object.
pub async fn retrieve<S: ElementSource + ?Sized>(
    source: &S,
    catalog_id: u32,
) -> Result<ElementSet, RetrievalError> {
    let text = source.fetch(catalog_id).await?;
    let set = ElementSet::from_tle(&text)?;
    if set.catalog_id() != u64::from(catalog_id) {
        return Err(RetrievalError::Mismatch {
            expected: catalog_id,
            found: set.catalog_id(),
        });
    }
    Ok(set)
}

/// Retrieves all element sets concurrently and waits for every request to
/// settle. Results come back in the order of `catalog_ids`.
pub async fn fetch_all<S: ElementSource>(
    source: Arc<S>,
    catalog_ids: &[u32],
) -> Vec<(u32, Result<ElementSet, RetrievalError>)> {
    let mut tasks = JoinSet::new();
    for &catalog_id in catalog_ids {
        let source = source.clone();
        tasks.spawn(async move { (catalog_id, retrieve(source.as_ref(), catalog_id).await) });
    }

    let mut settled = HashMap::with_capacity(catalog_ids.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((catalog_id, result)) => {
                settled.insert(catalog_id, result);
            }
            Err(e) => log::error!("element set retrieval task failed: {}", e),
        }
    }

    catalog_ids
        .iter()
        .map(|&catalog_id| {
            let result = settled.remove(&catalog_id).unwrap_or_else(|| {
                Err(RetrievalError::Task(format!(
                    "no result for catalog {}",
                    catalog_id
                )))
            });
            (catalog_id, result)
        })
        .collect()
}

/// Fails every object with the error that kept the source from opening.
pub fn source_unavailable(
    catalog_ids: &[u32],
    err: RetrievalError,
) -> Vec<(u32, Result<ElementSet, RetrievalError>)> {
    log::error!("Element set source unavailable: {}", err);
    let err = Arc::new(err);
    catalog_ids
        .iter()
        .map(|&id| (id, Err(RetrievalError::SourceUnavailable(err.clone()))))
        .collect()
}
