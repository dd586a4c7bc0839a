//! Post record and the editable draft used by the create/edit form.
//!
//! These mirror the mock-server schema but are defined independently;
//! integration tests catch drift between the two.

use serde::{Deserialize, Serialize};

/// A blog post as stored by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
}

impl Post {
    /// The editable fields of this post.
    pub fn draft(&self) -> PostDraft {
        PostDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            author: self.author.clone(),
        }
    }
}

/// Request payload for both create and update. The server assigns ids, so
/// none is sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub author: String,
}

impl PostDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: author.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty() && self.author.is_empty()
    }
}
