//! Collaborators supplied by the host site: the media source the player reads
//! from and the named document actions the form buttons trigger.

pub mod client;
pub mod forms;

pub use client::{DocClient, SessionMediaSource};
pub use forms::{form_layout, FormButton, FormLayout};

use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum HostError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Host returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Response is missing field: {0}")]
    MissingField(&'static str),
}

/// Document types the review client knows how to lay out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Doctype {
    DriftSession,
    DriftTest,
    DriftTestDefinition,
}

impl Doctype {
    pub fn as_str(self) -> &'static str {
        match self {
            Doctype::DriftSession => "Drift Session",
            Doctype::DriftTest => "Drift Test",
            Doctype::DriftTestDefinition => "Drift Test Definition",
        }
    }
}

impl fmt::Display for Doctype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Doctype {
    type Err = String;

    /// Accepts the display name ("Drift Session") or a slug ("drift-session", "session").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "drift session" | "session" => Ok(Doctype::DriftSession),
            "drift test" | "test" => Ok(Doctype::DriftTest),
            "drift test definition" | "definition" => Ok(Doctype::DriftTestDefinition),
            _ => Err(s.to_string()),
        }
    }
}

/// Reference to one remote document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocRef {
    pub doctype: Doctype,
    pub name: String,
}

impl DocRef {
    pub fn new(doctype: Doctype, name: impl Into<String>) -> Self {
        Self {
            doctype,
            name: name.into(),
        }
    }
}

impl fmt::Display for DocRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.doctype, self.name)
    }
}

/// Snapshot of a remote document's fields
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub doc: DocRef,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(doc: DocRef, fields: Map<String, Value>) -> Self {
        Self { doc, fields }
    }

    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn status(&self) -> Option<&str> {
        self.field_str("status")
    }
}

/// Named remote operations exposed by the host documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostAction {
    DestroyRemoteSession,
    DeleteDownloadedVideos,
    CreateTest,
    Execute,
    ListRecordedVideos,
}

impl HostAction {
    /// Whitelisted document method invoked for this action
    pub fn method(self) -> &'static str {
        match self {
            HostAction::DestroyRemoteSession => "destroy_remote_session",
            HostAction::DeleteDownloadedVideos => "delete_downloaded_videos",
            HostAction::CreateTest => "create_test",
            HostAction::Execute => "next",
            HostAction::ListRecordedVideos => "get_recorded_video_urls",
        }
    }
}

/// Result of a successful action call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActionReply {
    /// The method's return value (`message` in the response body)
    pub value: Value,
    /// User-facing messages the host queued during the call
    pub messages: Vec<String>,
}

/// Source of the ordered media URLs for the current session.
///
/// The raw payload is returned untouched; the player decides whether it is
/// usable.
#[async_trait::async_trait]
pub trait MediaSource: Send + Sync {
    async fn list_media_urls(&self) -> Result<Value, HostError>;
}

/// Invoker for named, side-effecting document actions
#[async_trait::async_trait]
pub trait HostActions: Send + Sync {
    async fn invoke(&self, doc: &DocRef, action: HostAction) -> Result<ActionReply, HostError>;

    /// Fetch the current state of `doc`
    async fn reload(&self, doc: &DocRef) -> Result<Document, HostError>;
}

/// Outcome of a form button press
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub reply: ActionReply,
    pub document: Document,
}

/// Invoke `action` on `doc` and refresh the document on success
pub async fn run_form_action(
    actions: &dyn HostActions,
    doc: &DocRef,
    action: HostAction,
) -> Result<ActionOutcome, HostError> {
    info!("Running {} on {}", action.method(), doc);

    let reply = match actions.invoke(doc, action).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Action {} on {} failed: {}", action.method(), doc, e);
            return Err(e);
        }
    };

    let document = actions.reload(doc).await?;
    Ok(ActionOutcome { reply, document })
}
