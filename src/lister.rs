//! List every document of a collection

use crate::models::Record;
use crate::store::{FindAll, StoreResult};

/// Return all documents the collection yields
///
/// An empty result is returned as an explicit empty `Vec`, never as an
/// error. Store errors (including a failure mid-cursor) propagate.
pub fn list_all<C: FindAll + ?Sized>(collection: &C) -> StoreResult<Vec<Record>> {
    let documents = collection.find_all()?.collect::<StoreResult<Vec<_>>>()?;
    if documents.is_empty() {
        tracing::debug!("Collection yielded no documents");
        return Ok(Vec::new());
    }
    Ok(documents)
}
