//! Destination schema retrieval.
//!
//! One read call per run; the resulting map is immutable for the
//! run's duration. A schema failure is fatal: without the destination's
//! type tags nothing can be encoded.

use crate::error::Result;
use crate::model::SchemaMap;
use crate::notion::NotionApi;

/// Fetch the destination database's property-name → type-tag map.
///
/// # Errors
///
/// Propagates collaborator errors unchanged; callers treat this as a
/// pre-loop fatal failure.
pub async fn fetch_schema<A: NotionApi>(api: &A, db_id: &str) -> Result<SchemaMap> {
    api.retrieve_schema(db_id).await
}
