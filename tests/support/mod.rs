#![allow(dead_code)]

use drift_review::host::{
    ActionReply, DocRef, Document, HostAction, HostActions, HostError, MediaSource,
};
use drift_review::playback::{
    LoadToken, PlaybackRate, PlaybackSurface, PlaylistController, PlaylistHandle, SurfaceError,
};
use serde_json::{json, Map, Value};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Mutex;
use tokio::sync::mpsc as tokio_mpsc;

use drift_review::playback::surface::SurfaceEventSender;

/// Initialize tracing for tests with proper test output handling
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// One call made on a [`MockSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Load { url: String, token: LoadToken },
    Play { token: LoadToken },
    Pause,
    SetRate(PlaybackRate),
}

/// Shared view of everything a [`MockSurface`] was asked to do
#[derive(Clone, Default)]
pub struct SurfaceLog {
    calls: Rc<RefCell<Vec<SurfaceCall>>>,
    reject_loads: Rc<RefCell<bool>>,
}

impl SurfaceLog {
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// URLs loaded so far, in order
    pub fn loads(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Load { url, .. } => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_rate(&self) -> Option<PlaybackRate> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            SurfaceCall::SetRate(rate) => Some(*rate),
            _ => None,
        })
    }

    pub fn play_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, SurfaceCall::Play { .. }))
            .count()
    }

    /// Make every later `load` fail synchronously
    pub fn reject_loads(&self) {
        *self.reject_loads.borrow_mut() = true;
    }
}

/// Surface that records calls and never reports anything by itself.
/// Tests inject the lifecycle events they want.
pub struct MockSurface {
    log: SurfaceLog,
}

impl MockSurface {
    pub fn new() -> (Self, SurfaceLog) {
        let log = SurfaceLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl PlaybackSurface for MockSurface {
    fn load(&mut self, url: &str, token: LoadToken) -> Result<(), SurfaceError> {
        self.log.calls.borrow_mut().push(SurfaceCall::Load {
            url: url.to_string(),
            token,
        });
        if *self.log.reject_loads.borrow() {
            return Err(SurfaceError::Rejected("unsupported source".to_string()));
        }
        Ok(())
    }

    fn play(&mut self, token: LoadToken) {
        self.log.calls.borrow_mut().push(SurfaceCall::Play { token });
    }

    fn pause(&mut self) {
        self.log.calls.borrow_mut().push(SurfaceCall::Pause);
    }

    fn set_rate(&mut self, rate: PlaybackRate) {
        self.log.calls.borrow_mut().push(SurfaceCall::SetRate(rate));
    }
}

/// Controller wired to a [`MockSurface`]
pub struct ControllerFixture {
    pub controller: PlaylistController,
    pub handle: PlaylistHandle,
    pub surface: SurfaceLog,
    pub surface_tx: SurfaceEventSender,
}

impl ControllerFixture {
    pub fn new() -> Self {
        tracing_init();

        let (surface, log) = MockSurface::new();
        let (surface_tx, surface_rx) = tokio_mpsc::unbounded_channel();
        let (controller, handle) = PlaylistController::new(Box::new(surface), surface_rx);

        Self {
            controller,
            handle,
            surface: log,
            surface_tx,
        }
    }

    /// Fixture with `urls` already opened (item 0 loading)
    pub fn opened(urls: &[&str]) -> Self {
        let mut fixture = Self::new();
        fixture.controller.open_with_payload(&json!(urls));
        fixture
    }
}

/// Provider returning a fixed payload
pub struct StaticMediaSource {
    pub payload: Value,
}

impl StaticMediaSource {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }
}

#[async_trait::async_trait]
impl MediaSource for StaticMediaSource {
    async fn list_media_urls(&self) -> Result<Value, HostError> {
        Ok(self.payload.clone())
    }
}

/// Provider whose fetch always fails
pub struct FailingMediaSource;

#[async_trait::async_trait]
impl MediaSource for FailingMediaSource {
    async fn list_media_urls(&self) -> Result<Value, HostError> {
        Err(HostError::Status {
            status: 500,
            body: "Internal Server Error".to_string(),
        })
    }
}

/// Host actions fake that records invocations and reloads
#[derive(Default)]
pub struct RecordingHostActions {
    pub fail_invoke: bool,
    pub invoked: Mutex<Vec<(DocRef, HostAction)>>,
    pub reloads: Mutex<Vec<DocRef>>,
    pub fields: Map<String, Value>,
}

impl RecordingHostActions {
    pub fn with_fields(fields: Value) -> Self {
        Self {
            fields: fields.as_object().cloned().unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_invoke: true,
            ..Self::default()
        }
    }
}

#[async_trait::async_trait]
impl HostActions for RecordingHostActions {
    async fn invoke(&self, doc: &DocRef, action: HostAction) -> Result<ActionReply, HostError> {
        self.invoked.lock().unwrap().push((doc.clone(), action));
        if self.fail_invoke {
            return Err(HostError::Status {
                status: 417,
                body: "Expectation Failed".to_string(),
            });
        }
        Ok(ActionReply {
            value: Value::Null,
            messages: vec![format!("{} done", action.method())],
        })
    }

    async fn reload(&self, doc: &DocRef) -> Result<Document, HostError> {
        self.reloads.lock().unwrap().push(doc.clone());
        Ok(Document::new(doc.clone(), self.fields.clone()))
    }
}
