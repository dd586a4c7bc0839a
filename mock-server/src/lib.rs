//! In-memory implementation of the `/api/blogs` resource.
//!
//! Posts are kept in insertion order and get a 24-hex-digit `_id`, the shape
//! a document store would hand out. `title` and `author` are required and
//! must be non-empty on create and update; `content` is free text and
//! defaults to empty.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PostInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// Fields of a validated `PostInput`.
struct Fields {
    title: String,
    content: String,
    author: String,
}

impl PostInput {
    fn validate(self) -> Result<Fields, String> {
        fn required(name: &str, value: Option<String>) -> Result<String, String> {
            match value {
                Some(v) if !v.trim().is_empty() => Ok(v),
                _ => Err(format!("{name} is required")),
            }
        }
        Ok(Fields {
            title: required("title", self.title)?,
            content: self.content.unwrap_or_default(),
            author: required("author", self.author)?,
        })
    }
}

pub type Db = Arc<RwLock<Vec<Post>>>;

type ApiResult<T> = Result<T, (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router over a store seeded with `posts`.
pub fn app_with(posts: Vec<Post>) -> Router {
    let db: Db = Arc::new(RwLock::new(posts));
    Router::new()
        .route("/api/blogs", get(list_posts).post(create_post))
        .route("/api/blogs/", get(list_posts).post(create_post))
        .route(
            "/api/blogs/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Vec::new()).await
}

pub async fn run_with(listener: TcpListener, posts: Vec<Post>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(posts)).await
}

pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()[..24].to_string()
}

fn error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message.into() })))
}

fn not_found() -> (StatusCode, Json<Value>) {
    error(StatusCode::NOT_FOUND, "Blog not found")
}

fn parse_input(input: Result<Json<PostInput>, JsonRejection>) -> ApiResult<Fields> {
    let Json(input) = input.map_err(|e| error(StatusCode::BAD_REQUEST, e.body_text()))?;
    input
        .validate()
        .map_err(|msg| error(StatusCode::BAD_REQUEST, msg))
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    Json(db.read().await.clone())
}

async fn get_post(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Post>> {
    let posts = db.read().await;
    posts
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}

async fn create_post(
    State(db): State<Db>,
    input: Result<Json<PostInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let fields = parse_input(input)?;
    let post = Post {
        id: new_id(),
        title: fields.title,
        content: fields.content,
        author: fields.author,
    };
    db.write().await.push(post.clone());
    tracing::debug!(id = %post.id, "created post");
    Ok((StatusCode::CREATED, Json(post)))
}

async fn update_post(
    State(db): State<Db>,
    Path(id): Path<String>,
    input: Result<Json<PostInput>, JsonRejection>,
) -> ApiResult<Json<Post>> {
    let mut posts = db.write().await;
    let post = posts.iter_mut().find(|p| p.id == id).ok_or_else(not_found)?;
    let fields = parse_input(input)?;
    post.title = fields.title;
    post.content = fields.content;
    post.author = fields.author;
    tracing::debug!(%id, "updated post");
    Ok(Json(post.clone()))
}

async fn delete_post(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let mut posts = db.write().await;
    let before = posts.len();
    posts.retain(|p| p.id != id);
    if posts.len() == before {
        return Err(not_found());
    }
    tracing::debug!(%id, "deleted post");
    Ok(Json(json!({ "message": "Blog deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_serializes_with_underscore_id() {
        let post = Post {
            id: "65f0c1a2b3c4d5e6f7a8b9c0".to_string(),
            title: "Test".to_string(),
            content: "Body".to_string(),
            author: "Bob".to_string(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["_id"], "65f0c1a2b3c4d5e6f7a8b9c0");
        assert_eq!(json["title"], "Test");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn new_id_is_24_hex_digits() {
        let id = new_id();
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, new_id());
    }

    #[test]
    fn input_requires_title_and_author() {
        let input: PostInput = serde_json::from_str(r#"{"title":"A","content":"x"}"#).unwrap();
        assert_eq!(input.validate().err().as_deref(), Some("author is required"));

        let input: PostInput = serde_json::from_str(r#"{"content":"x","author":"Bob"}"#).unwrap();
        assert_eq!(input.validate().err().as_deref(), Some("title is required"));
    }

    #[test]
    fn input_allows_empty_or_missing_content() {
        let input: PostInput =
            serde_json::from_str(r#"{"title":"A","content":"","author":"Bob"}"#).unwrap();
        assert_eq!(input.validate().unwrap().content, "");

        let input: PostInput = serde_json::from_str(r#"{"title":"A","author":"Bob"}"#).unwrap();
        assert_eq!(input.validate().unwrap().content, "");
    }

    #[test]
    fn input_rejects_blank_title() {
        let input: PostInput =
            serde_json::from_str(r#"{"title":"  ","content":"x","author":"Bob"}"#).unwrap();
        assert_eq!(input.validate().err().as_deref(), Some("title is required"));
    }

    #[test]
    fn input_accepts_complete_post() {
        let input: PostInput =
            serde_json::from_str(r#"{"title":"A","content":"x","author":"Bob"}"#).unwrap();
        let fields = input.validate().unwrap();
        assert_eq!(fields.title, "A");
        assert_eq!(fields.author, "Bob");
    }
}
