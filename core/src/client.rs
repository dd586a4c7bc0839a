//! Stateless request builder and response parser for the blog API.
//!
//! # Design
//! `BlogClient` holds only the resource URL. Each operation is split into a
//! `build_*` method producing an `HttpRequest` and a `parse_*` method
//! consuming an `HttpResponse`; the round trip in between belongs to a
//! `Transport`. Any 2xx counts as success, so servers answering a create
//! with 200 or a delete with 204 are accepted alongside the documented
//! 201/200.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Post, PostDraft};

/// Path of the blog collection under the configured host.
pub const RESOURCE_PATH: &str = "/api/blogs";

#[derive(Debug, Clone)]
pub struct BlogClient {
    resource_url: String,
}

impl BlogClient {
    /// `base_url` is the host, e.g. `http://localhost:5000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            resource_url: format!("{}{RESOURCE_PATH}", base_url.trim_end_matches('/')),
        }
    }

    pub fn resource_url(&self) -> &str {
        &self.resource_url
    }

    pub fn build_list_all(&self) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/", self.resource_url), None)
    }

    pub fn build_get_by_id(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, self.item_url(id), None)
    }

    pub fn build_create(&self, draft: &PostDraft) -> Result<HttpRequest, ApiError> {
        let body = encode(draft)?;
        Ok(self.request(HttpMethod::Post, format!("{}/", self.resource_url), Some(body)))
    }

    pub fn build_update(&self, id: &str, draft: &PostDraft) -> Result<HttpRequest, ApiError> {
        let body = encode(draft)?;
        Ok(self.request(HttpMethod::Put, self.item_url(id), Some(body)))
    }

    pub fn build_delete_by_id(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, self.item_url(id), None)
    }

    pub fn parse_list_all(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        decode(response)
    }

    pub fn parse_get_by_id(&self, response: HttpResponse) -> Result<Post, ApiError> {
        decode(response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Post, ApiError> {
        decode(response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Post, ApiError> {
        decode(response)
    }

    /// The confirmation body is not interpreted.
    pub fn parse_delete_by_id(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{id}", self.resource_url)
    }

    fn request(&self, method: HttpMethod, url: String, body: Option<String>) -> HttpRequest {
        let headers = match body {
            Some(_) => vec![("content-type".to_string(), "application/json".to_string())],
            None => Vec::new(),
        };
        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }
}

fn encode(draft: &PostDraft) -> Result<String, ApiError> {
    serde_json::to_string(draft).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::from_status(response.status, &response.body))
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST_JSON: &str = r#"{"_id":"65f0c1","title":"A","content":"x","author":"Bob"}"#;

    fn client() -> BlogClient {
        BlogClient::new("http://localhost:5000")
    }

    #[test]
    fn build_list_all_targets_collection() {
        let req = client().build_list_all();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:5000/api/blogs/");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_by_id_targets_item() {
        let req = client().build_get_by_id("65f0c1");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:5000/api/blogs/65f0c1");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_sends_json_draft() {
        let req = client().build_create(&PostDraft::new("B", "y", "Sue")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:5000/api/blogs/");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "B");
        assert_eq!(body["author"], "Sue");
        assert!(body.get("_id").is_none());
    }

    #[test]
    fn build_update_puts_full_draft() {
        let req = client()
            .build_update("65f0c1", &PostDraft::new("A2", "x", "Bob"))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:5000/api/blogs/65f0c1");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"title":"A2","content":"x","author":"Bob"}));
    }

    #[test]
    fn build_delete_by_id_has_no_body() {
        let req = client().build_delete_by_id("65f0c1");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:5000/api/blogs/65f0c1");
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = BlogClient::new("http://localhost:5000/");
        assert_eq!(client.resource_url(), "http://localhost:5000/api/blogs");
    }

    #[test]
    fn parse_list_all_success() {
        let posts = client()
            .parse_list_all(HttpResponse::new(200, format!("[{POST_JSON}]")))
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "65f0c1");
        assert_eq!(posts[0].author, "Bob");
    }

    #[test]
    fn parse_list_all_server_error_is_transport() {
        let err = client()
            .parse_list_all(HttpResponse::new(500, "boom"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn parse_list_all_bad_json() {
        let err = client()
            .parse_list_all(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_get_by_id_not_found() {
        let err = client()
            .parse_get_by_id(HttpResponse::new(404, r#"{"message":"Blog not found"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_accepts_201_and_200() {
        let c = client();
        assert_eq!(c.parse_create(HttpResponse::new(201, POST_JSON)).unwrap().title, "A");
        assert_eq!(c.parse_create(HttpResponse::new(200, POST_JSON)).unwrap().title, "A");
    }

    #[test]
    fn parse_create_validation_error() {
        let err = client()
            .parse_create(HttpResponse::new(400, r#"{"message":"author is required"}"#))
            .unwrap_err();
        match err {
            ApiError::Validation(msg) => assert_eq!(msg, "author is required"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn parse_update_success() {
        let post = client().parse_update(HttpResponse::new(200, POST_JSON)).unwrap();
        assert_eq!(post.id, "65f0c1");
    }

    #[test]
    fn parse_delete_by_id_accepts_confirmation_or_empty() {
        let c = client();
        assert!(c
            .parse_delete_by_id(HttpResponse::new(200, r#"{"message":"Blog deleted successfully"}"#))
            .is_ok());
        assert!(c.parse_delete_by_id(HttpResponse::new(204, "")).is_ok());
    }

    #[test]
    fn parse_delete_by_id_not_found() {
        let err = client()
            .parse_delete_by_id(HttpResponse::new(404, ""))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }
}
