//! `BlogClient` paired with a `Transport`: the five record operations as
//! direct calls.

use tracing::debug;

use crate::client::BlogClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Post, PostDraft};

#[derive(Debug, Clone)]
pub struct BlogApi<T> {
    client: BlogClient,
    transport: T,
}

impl<T: Transport> BlogApi<T> {
    pub fn new(client: BlogClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn list_all(&self) -> Result<Vec<Post>, ApiError> {
        let response = self.send(self.client.build_list_all())?;
        self.client.parse_list_all(response)
    }

    pub fn get_by_id(&self, id: &str) -> Result<Post, ApiError> {
        let response = self.send(self.client.build_get_by_id(id))?;
        self.client.parse_get_by_id(response)
    }

    pub fn create(&self, draft: &PostDraft) -> Result<Post, ApiError> {
        let response = self.send(self.client.build_create(draft)?)?;
        self.client.parse_create(response)
    }

    pub fn update(&self, id: &str, draft: &PostDraft) -> Result<Post, ApiError> {
        let response = self.send(self.client.build_update(id, draft)?)?;
        self.client.parse_update(response)
    }

    pub fn delete_by_id(&self, id: &str) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_by_id(id))?;
        self.client.parse_delete_by_id(response)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "sending request");
        self.transport.execute(&request)
    }
}
