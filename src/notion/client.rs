//! HTTP implementation of the Notion collaborator.
//!
//! Thin wrapper over the REST API: bearer auth, a pinned
//! `Notion-Version`, JSON in, JSON out. Non-2xx responses are turned
//! into a structured [`Error::Api`] carrying the status code and the
//! message from Notion's error body.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Page, Property, PropertyKind, SchemaMap};

use super::{NotionApi, QueryPage};

const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

/// Notion REST API client.
pub struct NotionClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NotionClient {
    /// Create a client for the production API endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint (used by wire tests).
    #[must_use]
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.request(reqwest::Method::POST, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
    }
}

/// Error body returned by Notion on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

/// Check the response status, then deserialize the success body.
async fn read_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) if !body.message.is_empty() => body.message,
            _ => status.canonical_reason().unwrap_or("request failed").to_string(),
        };
        return Err(Error::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json::<T>().await?)
}

/// Query request body; optional knobs are omitted when unset.
#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    filter: &'a serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CreatePageRequest {
    parent: PageParent,
    properties: HashMap<String, Property>,
}

#[derive(Debug, Serialize)]
struct PageParent {
    database_id: String,
}

#[derive(Debug, Serialize)]
struct UpdatePageRequest {
    properties: HashMap<String, Property>,
}

/// Database object; only the schema portion is read.
#[derive(Debug, Deserialize)]
struct DatabaseObject {
    #[serde(default)]
    properties: HashMap<String, SchemaProperty>,
}

#[derive(Debug, Deserialize)]
struct SchemaProperty {
    #[serde(rename = "type")]
    kind: PropertyKind,
}

impl NotionApi for NotionClient {
    async fn query_database(
        &self,
        db_id: &str,
        filter: &serde_json::Value,
        page_size: Option<u32>,
        cursor: Option<&str>,
    ) -> Result<QueryPage> {
        let body = QueryRequest {
            filter,
            page_size,
            start_cursor: cursor,
        };
        let response = self
            .post(&format!("/databases/{db_id}/query"))
            .json(&body)
            .send()
            .await?;
        read_json(response).await
    }

    async fn retrieve_schema(&self, db_id: &str) -> Result<SchemaMap> {
        let response = self
            .request(reqwest::Method::GET, &format!("/databases/{db_id}"))
            .send()
            .await?;
        let db: DatabaseObject = read_json(response).await?;
        Ok(db
            .properties
            .into_iter()
            .map(|(name, prop)| (name, prop.kind))
            .collect())
    }

    async fn create_page(
        &self,
        db_id: &str,
        properties: HashMap<String, Property>,
    ) -> Result<Page> {
        let body = CreatePageRequest {
            parent: PageParent {
                database_id: db_id.to_string(),
            },
            properties,
        };
        let response = self.post("/pages").json(&body).send().await?;
        read_json(response).await
    }

    async fn update_page(
        &self,
        page_id: &str,
        properties: HashMap<String, Property>,
    ) -> Result<()> {
        let body = UpdatePageRequest { properties };
        let response = self
            .request(reqwest::Method::PATCH, &format!("/pages/{page_id}"))
            .json(&body)
            .send()
            .await?;
        // The updated page body is not needed; drain it for the status check.
        let _: serde_json::Value = read_json(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> NotionClient {
        NotionClient::with_base_url("secret_test", server.uri())
    }

    #[tokio::test]
    async fn retrieve_schema_maps_names_to_kinds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/databases/db1"))
            .and(header("Notion-Version", NOTION_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "properties": {
                    "Name": {"id": "title", "type": "title"},
                    "Likes": {"id": "abc", "type": "number"},
                    "Niche": {"id": "def", "type": "select"},
                    "Summary": {"id": "ghi", "type": "rollup"}
                }
            })))
            .mount(&server)
            .await;

        let schema = client_for(&server).retrieve_schema("db1").await.unwrap();
        assert_eq!(schema["Name"], PropertyKind::Title);
        assert_eq!(schema["Likes"], PropertyKind::Number);
        assert_eq!(schema["Niche"], PropertyKind::Select);
        assert_eq!(schema["Summary"], PropertyKind::Unsupported);
    }

    #[tokio::test]
    async fn query_sends_filter_and_cursor() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/databases/db1/query"))
            .and(body_partial_json(serde_json::json!({
                "filter": {"and": []},
                "page_size": 50,
                "start_cursor": "cur1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"id": "p1", "properties": {}}],
                "has_more": false,
                "next_cursor": null
            })))
            .mount(&server)
            .await;

        let filter = serde_json::json!({"and": []});
        let page = client_for(&server)
            .query_database("db1", &filter, Some(50), Some("cur1"))
            .await
            .unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, "p1");
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn non_success_becomes_api_error_with_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/databases/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "object": "error",
                "status": 404,
                "code": "object_not_found",
                "message": "Could not find database"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .retrieve_schema("missing")
            .await
            .unwrap_err();
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Could not find database");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_page_posts_parent_and_properties() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pages"))
            .and(body_partial_json(serde_json::json!({
                "parent": {"database_id": "slave1"},
                "properties": {
                    "Name": {"type": "title", "title": [
                        {"type": "text", "text": {"content": "Post"}}
                    ]}
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "new-page",
                "properties": {}
            })))
            .mount(&server)
            .await;

        let mut properties = HashMap::new();
        properties.insert(
            "Name".to_string(),
            Property::Title {
                title: vec![crate::model::RichText::text("Post")],
            },
        );
        let page = client_for(&server)
            .create_page("slave1", properties)
            .await
            .unwrap();
        assert_eq!(page.id, "new-page");
    }
}
