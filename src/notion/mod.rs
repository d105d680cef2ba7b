//! Notion API collaborator.
//!
//! The sync core talks to Notion through the [`NotionApi`] trait; the
//! real HTTP implementation lives in [`client`]. Keeping the seam at a
//! trait lets the engine and selector run against an in-memory mock in
//! tests.

mod client;

pub use client::NotionClient;

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::Result;
use crate::model::{Page, Property, SchemaMap};

/// One page of query results.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryPage {
    /// Pages in this result page, in the API's order.
    pub results: Vec<Page>,
    /// Whether more result pages exist past `next_cursor`.
    #[serde(default)]
    pub has_more: bool,
    /// Cursor for the next result page, when `has_more` is true.
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Interface to the remote tabular-data collaborator.
///
/// All methods are one blocking round-trip from the caller's point of
/// view; the engine awaits each call in turn and never overlaps them.
pub trait NotionApi: Send + Sync {
    /// Query a database with an exact-match filter, one result page at
    /// a time.
    fn query_database(
        &self,
        db_id: &str,
        filter: &serde_json::Value,
        page_size: Option<u32>,
        cursor: Option<&str>,
    ) -> impl std::future::Future<Output = Result<QueryPage>> + Send;

    /// Retrieve a database's schema as a property-name → type-tag map.
    fn retrieve_schema(
        &self,
        db_id: &str,
    ) -> impl std::future::Future<Output = Result<SchemaMap>> + Send;

    /// Create a new page in a database. Always a create, never an
    /// upsert; the destination ends up with one new page per call.
    fn create_page(
        &self,
        db_id: &str,
        properties: HashMap<String, Property>,
    ) -> impl std::future::Future<Output = Result<Page>> + Send;

    /// Patch properties on an existing page.
    fn update_page(
        &self,
        page_id: &str,
        properties: HashMap<String, Property>,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
