//! Eligible-page selection with cursor pagination.
//!
//! A master page is eligible when its "Sync Status" select is
//! "Not Synced" AND its "Sync?" select is "True" - both exact-match
//! filters, combined with a logical AND on the server side.

use tracing::debug;

use crate::error::Result;
use crate::model::{Page, SyncStatus};
use crate::notion::NotionApi;

/// Largest page size the Notion API accepts per query.
const MAX_PAGE_SIZE: u32 = 100;

/// Build the eligibility filter for the master database query.
#[must_use]
pub fn eligibility_filter() -> serde_json::Value {
    serde_json::json!({
        "and": [
            {"property": "Sync Status", "select": {"equals": SyncStatus::NotSynced.as_str()}},
            {"property": "Sync?", "select": {"equals": "True"}}
        ]
    })
}

/// Retrieve all eligible pages, following cursors until the collaborator
/// reports no further pages or `limit` is reached.
///
/// A page size hint of `min(limit, 100)` is sent when `limit` is set;
/// otherwise the API default applies. Never returns more than `limit`
/// pages: a final page that overshoots is truncated. Result order is
/// fetch order; no domain ordering is implied.
///
/// # Errors
///
/// Propagates collaborator errors unchanged; callers treat this as a
/// pre-loop fatal failure.
pub async fn select_eligible<A: NotionApi>(
    api: &A,
    db_id: &str,
    limit: Option<usize>,
) -> Result<Vec<Page>> {
    let filter = eligibility_filter();
    let page_size =
        limit.map(|l| u32::try_from(l.min(MAX_PAGE_SIZE as usize)).unwrap_or(MAX_PAGE_SIZE));

    let mut pages: Vec<Page> = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let batch = api
            .query_database(db_id, &filter, page_size, cursor.as_deref())
            .await?;
        debug!(
            fetched = batch.results.len(),
            accumulated = pages.len() + batch.results.len(),
            has_more = batch.has_more,
            "fetched result page"
        );
        pages.extend(batch.results);

        if let Some(limit) = limit {
            if pages.len() >= limit {
                pages.truncate(limit);
                break;
            }
        }
        if !batch.has_more {
            break;
        }
        cursor = batch.next_cursor;
    }

    Ok(pages)
}
