//! Collection view controller for the blog dashboard.
//!
//! # Design
//! `Dashboard` owns the whole view state (`DashboardState`) and never talks
//! to the network. Every transition that needs the server returns a
//! `Pending` (what is being done plus the `HttpRequest` to send). The host
//! executes it and hands the outcome to `Dashboard::complete`, which may in
//! turn return the follow-up fetch. `drive` runs that loop against a
//! `Transport` for callers that do not need to interleave anything.
//!
//! The local list is only ever replaced wholesale by a successful fetch.
//! Create, update and delete each end with a fresh fetch instead of patching
//! `posts`, so what is shown is always the last successful server read.
//!
//! Nothing serialises operations: two submits in a row produce two requests,
//! and fetch responses are applied in whatever order they are completed.

use tracing::{error, info, warn};

use crate::client::BlogClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Post, PostDraft};

/// The form behind the create/edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    /// Set when editing an existing post; submit then updates this id.
    pub id: Option<String>,
    pub fields: PostDraft,
}

impl FormDraft {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.fields.is_empty()
    }
}

/// Everything the rendering layer needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub posts: Vec<Post>,
    pub draft: FormDraft,
    pub dialog_open: bool,
    pub edit_mode: bool,
    pub loading: bool,
}

/// Which transition a request belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Update { id: String },
    Delete { id: String },
}

/// A request issued by the dashboard and not yet completed.
#[derive(Debug, Clone)]
#[must_use = "a pending request does nothing until executed and completed"]
pub struct Pending {
    pub operation: Operation,
    pub request: HttpRequest,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    client: BlogClient,
    state: DashboardState,
    in_flight: usize,
}

impl Dashboard {
    pub fn new(client: BlogClient) -> Self {
        Self {
            client,
            state: DashboardState::default(),
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn find(&self, id: &str) -> Option<&Post> {
        self.state.posts.iter().find(|p| p.id == id)
    }

    /// Fetch the full collection. Used for the initial load and after every
    /// successful mutation.
    pub fn load(&mut self) -> Pending {
        self.begin(Operation::Fetch, self.client.build_list_all())
    }

    pub fn open_for_create(&mut self) {
        self.state.edit_mode = false;
        self.state.draft = FormDraft::default();
        self.state.dialog_open = true;
    }

    pub fn open_for_edit(&mut self, post: &Post) {
        self.state.edit_mode = true;
        self.state.draft = FormDraft {
            id: Some(post.id.clone()),
            fields: post.draft(),
        };
        self.state.dialog_open = true;
    }

    /// Form input. The id and mode are not editable.
    pub fn draft_mut(&mut self) -> &mut PostDraft {
        &mut self.state.draft.fields
    }

    /// Close the dialog and discard the draft. Never touches the network.
    pub fn cancel(&mut self) {
        self.state.dialog_open = false;
        self.reset_draft();
    }

    /// Send the draft: an update when it carries an id, a create otherwise.
    /// Returns `None` when there is no open dialog or the draft cannot be
    /// encoded.
    pub fn submit(&mut self) -> Option<Pending> {
        if !self.state.dialog_open {
            warn!("submit ignored: dialog is not open");
            return None;
        }
        let draft = &self.state.draft;
        let built = match &draft.id {
            Some(id) => self
                .client
                .build_update(id, &draft.fields)
                .map(|req| (Operation::Update { id: id.clone() }, req)),
            None => self
                .client
                .build_create(&draft.fields)
                .map(|req| (Operation::Create, req)),
        };
        match built {
            Ok((operation, request)) => Some(self.begin(operation, request)),
            Err(err) => {
                error!(error = %err, "error encoding blog draft");
                None
            }
        }
    }

    pub fn delete(&mut self, post: &Post) -> Pending {
        let request = self.client.build_delete_by_id(&post.id);
        self.begin(Operation::Delete { id: post.id.clone() }, request)
    }

    /// Apply the outcome of a request previously returned by this dashboard.
    /// Returns the re-fetch that must follow a successful mutation.
    pub fn complete(
        &mut self,
        operation: Operation,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Option<Pending> {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.state.loading = self.in_flight > 0;

        match operation {
            Operation::Fetch => {
                match outcome.and_then(|r| self.client.parse_list_all(r)) {
                    Ok(posts) => {
                        info!(count = posts.len(), "blogs fetched");
                        self.state.posts = posts;
                    }
                    Err(err) => error!(error = %err, "error fetching blogs"),
                }
                None
            }
            Operation::Create => match outcome.and_then(|r| self.client.parse_create(r)) {
                Ok(post) => {
                    info!(id = %post.id, "blog created");
                    Some(self.close_and_reload())
                }
                Err(err) => {
                    error!(error = %err, "error creating blog");
                    None
                }
            },
            Operation::Update { id } => match outcome.and_then(|r| self.client.parse_update(r)) {
                Ok(_) => {
                    info!(%id, "blog updated");
                    Some(self.close_and_reload())
                }
                Err(err) => {
                    error!(%id, error = %err, "error updating blog");
                    None
                }
            },
            Operation::Delete { id } => {
                match outcome.and_then(|r| self.client.parse_delete_by_id(r)) {
                    Ok(()) => {
                        info!(%id, "blog deleted");
                        Some(self.load())
                    }
                    Err(err) => {
                        error!(%id, error = %err, "error deleting blog");
                        None
                    }
                }
            }
        }
    }

    /// Execute `pending` alone and return its follow-up, if any. A mutation
    /// succeeded exactly when this returns `Some`, whatever later happens to
    /// the re-fetch.
    pub fn step<T: Transport>(&mut self, pending: Pending, transport: &T) -> Option<Pending> {
        let outcome = transport.execute(&pending.request);
        self.complete(pending.operation, outcome)
    }

    /// Execute `pending` and every follow-up it triggers.
    pub fn drive<T: Transport>(&mut self, pending: Pending, transport: &T) {
        let mut next = Some(pending);
        while let Some(pending) = next {
            next = self.step(pending, transport);
        }
    }

    fn begin(&mut self, operation: Operation, request: HttpRequest) -> Pending {
        self.in_flight += 1;
        self.state.loading = true;
        Pending { operation, request }
    }

    fn close_and_reload(&mut self) -> Pending {
        self.state.dialog_open = false;
        self.reset_draft();
        self.load()
    }

    fn reset_draft(&mut self) {
        self.state.draft = FormDraft::default();
        self.state.edit_mode = false;
    }
}
