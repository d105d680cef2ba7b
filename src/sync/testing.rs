//! In-memory `NotionApi` mock shared by the selector and engine tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::model::{Page, Property, SchemaMap};
use crate::notion::{NotionApi, QueryPage};

#[derive(Default)]
struct MockState {
    query_pages: Vec<Vec<Page>>,
    next_query: usize,
    query_page_sizes: Vec<Option<u32>>,
    schema: SchemaMap,
    creates: Vec<(String, HashMap<String, Property>)>,
    fail_create_calls: Vec<usize>,
    updates: Vec<(String, HashMap<String, Property>)>,
    fail_update_pages: Vec<String>,
}

/// Scripted collaborator: serves canned query pages in order, records
/// every write, and fails on demand.
#[derive(Default)]
pub struct MockApi {
    state: Mutex<MockState>,
}

impl MockApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these result pages, in order, one per query call.
    #[must_use]
    pub fn with_query_pages(self, pages: Vec<Vec<Page>>) -> Self {
        self.state.lock().unwrap().query_pages = pages;
        self
    }

    #[must_use]
    pub fn with_schema(self, schema: SchemaMap) -> Self {
        self.state.lock().unwrap().schema = schema;
        self
    }

    /// Fail the nth `create_page` call (0-based).
    #[must_use]
    pub fn fail_create_call(self, index: usize) -> Self {
        self.state.lock().unwrap().fail_create_calls.push(index);
        self
    }

    /// Fail `update_page` for a given page id.
    #[must_use]
    pub fn fail_update_for(self, page_id: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .fail_update_pages
            .push(page_id.to_string());
        self
    }

    pub fn query_calls(&self) -> usize {
        self.state.lock().unwrap().next_query
    }

    pub fn query_page_sizes(&self) -> Vec<Option<u32>> {
        self.state.lock().unwrap().query_page_sizes.clone()
    }

    pub fn creates(&self) -> Vec<(String, HashMap<String, Property>)> {
        self.state.lock().unwrap().creates.clone()
    }

    pub fn updates(&self) -> Vec<(String, HashMap<String, Property>)> {
        self.state.lock().unwrap().updates.clone()
    }
}

impl NotionApi for MockApi {
    async fn query_database(
        &self,
        _db_id: &str,
        _filter: &serde_json::Value,
        page_size: Option<u32>,
        _cursor: Option<&str>,
    ) -> Result<QueryPage> {
        let mut state = self.state.lock().unwrap();
        state.query_page_sizes.push(page_size);
        let index = state.next_query;
        state.next_query += 1;

        let results = state.query_pages.get(index).cloned().unwrap_or_default();
        let has_more = index + 1 < state.query_pages.len();
        Ok(QueryPage {
            results,
            has_more,
            next_cursor: has_more.then(|| format!("cursor-{index}")),
        })
    }

    async fn retrieve_schema(&self, _db_id: &str) -> Result<SchemaMap> {
        Ok(self.state.lock().unwrap().schema.clone())
    }

    async fn create_page(
        &self,
        db_id: &str,
        properties: HashMap<String, Property>,
    ) -> Result<Page> {
        let mut state = self.state.lock().unwrap();
        let call = state.creates.len();
        state.creates.push((db_id.to_string(), properties));
        if state.fail_create_calls.contains(&call) {
            return Err(Error::Api {
                status: 500,
                message: "create failed".to_string(),
            });
        }
        Ok(Page {
            id: format!("created-{call}"),
            properties: HashMap::new(),
        })
    }

    async fn update_page(
        &self,
        page_id: &str,
        properties: HashMap<String, Property>,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state
            .updates
            .push((page_id.to_string(), properties));
        if state.fail_update_pages.iter().any(|p| p == page_id) {
            return Err(Error::Api {
                status: 500,
                message: "update failed".to_string(),
            });
        }
        Ok(())
    }
}
