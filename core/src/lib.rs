//! Client core for the blog dashboard.
//!
//! # Overview
//! `BlogClient` builds and parses the five requests of the `/api/blogs`
//! resource without touching the network. `BlogApi` pairs it with a
//! `Transport` for direct calls. `Dashboard` is the collection view
//! controller: it owns the list, the create/edit draft and the loading flag,
//! and re-fetches the whole collection after every successful mutation.
//!
//! # Design
//! - I/O is always the host's job (`Transport`); the client and the
//!   dashboard only exchange `HttpRequest` / `HttpResponse` values.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod http;
pub mod render;
pub mod transport;
pub mod types;

pub use api::BlogApi;
pub use client::BlogClient;
pub use config::{ConfigError, DashboardConfig};
pub use dashboard::{Dashboard, DashboardState, FormDraft, Operation, Pending};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Post, PostDraft};
