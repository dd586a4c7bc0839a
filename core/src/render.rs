//! Plain-text rendering of a `DashboardState`.
//!
//! Purely presentational: the views borrow the state and never change it.

use std::fmt;

use crate::dashboard::DashboardState;
use crate::types::Post;

pub const HEADING: &str = "Welcome to the Blog Dashboard";
pub const TAGLINE: &str = "Manage your blog posts effortlessly and create engaging content.";

/// Content lines shown per card before clamping.
pub const CONTENT_LINES: usize = 5;

/// The whole dashboard: heading, cards and the dialog when open.
pub struct DashboardView<'a>(pub &'a DashboardState);

/// A single post card.
pub struct CardView<'a>(pub &'a Post);

struct DialogView<'a>(&'a DashboardState);

pub fn render(state: &DashboardState) -> String {
    DashboardView(state).to_string()
}

pub fn render_card(post: &Post) -> String {
    CardView(post).to_string()
}

pub fn dialog_title(edit_mode: bool) -> &'static str {
    if edit_mode {
        "Edit Blog Post"
    } else {
        "Create Blog Post"
    }
}

pub fn submit_label(edit_mode: bool) -> &'static str {
    if edit_mode {
        "Update"
    } else {
        "Create"
    }
}

impl fmt::Display for DashboardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        writeln!(f, "{HEADING}")?;
        writeln!(f, "{TAGLINE}")?;
        if state.loading {
            writeln!(f, "[loading...]")?;
        }
        writeln!(f)?;

        if state.posts.is_empty() {
            writeln!(f, "(no posts)")?;
        }
        for post in &state.posts {
            writeln!(f, "{}", CardView(post))?;
        }

        if state.dialog_open {
            write!(f, "{}", DialogView(state))?;
        }
        Ok(())
    }
}

impl fmt::Display for CardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let post = self.0;
        writeln!(f, "[{}] {}", post.id, post.title)?;
        writeln!(f, "By {}", post.author)?;

        let mut lines = post.content.lines();
        for line in lines.by_ref().take(CONTENT_LINES) {
            writeln!(f, "  {line}")?;
        }
        if lines.next().is_some() {
            writeln!(f, "  ...")?;
        }
        Ok(())
    }
}

impl fmt::Display for DialogView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        let fields = &state.draft.fields;
        writeln!(f, "== {} ==", dialog_title(state.edit_mode))?;
        writeln!(f, "Title:   {}", fields.title)?;
        writeln!(f, "Content: {}", fields.content)?;
        writeln!(f, "Author:  {}", fields.author)?;
        writeln!(f, "[Cancel] [{}]", submit_label(state.edit_mode))
    }
}
