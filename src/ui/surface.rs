//! Playback surfaces backed by a `<video>` element in the desktop webview.
//!
//! Both surfaces share one JavaScript bridge. It binds the element's
//! lifecycle listeners once and forwards them, stamped with the load token,
//! through a long-lived eval channel.

use crate::playback::{
    LoadToken, PlaybackRate, PlaybackSurface, SurfaceError, SurfaceEvent, SurfaceEventKind,
    SurfaceKind,
};
use crate::playback::surface::SurfaceEventSender;
use dioxus::prelude::*;
use serde::Deserialize;
use tracing::{debug, warn};

const BRIDGE_JS: &str = r#"
const bridge = window.__driftPlayer || (window.__driftPlayer = {});
bridge.videoId = __VIDEO_ID__;
bridge.token = null;
bridge.nudge = false;
bridge.emit = (kind, extra) => {
  dioxus.send(Object.assign({ kind, token: bridge.token }, extra || {}));
};
bridge.element = () => {
  const el = document.getElementById(bridge.videoId);
  if (el && !el.__driftBound) {
    el.__driftBound = true;
    el.addEventListener("loadedmetadata", () => {
      if (bridge.nudge && el.currentTime === 0) {
        try { el.currentTime = 0.01; } catch (_err) {}
      }
      bridge.emit("metadata", { duration: Number.isFinite(el.duration) ? el.duration : null });
    });
    el.addEventListener("playing", () => bridge.emit("playing"));
    el.addEventListener("pause", () => {
      if (!el.ended) bridge.emit("paused");
    });
    el.addEventListener("ended", () => bridge.emit("ended"));
    el.addEventListener("error", () => {
      const code = el.error ? el.error.code : 0;
      bridge.emit("failed", { reason: "media error " + code });
    });
  }
  return el;
};
await new Promise(() => {});
"#;

/// Play request for the load `token`. A newer load makes the request stale:
/// either the token no longer matches or the pending promise was aborted.
/// `muted` is applied only once the token has been checked.
fn play_script(token: LoadToken, muted: Option<bool>) -> String {
    let mute = muted
        .map(|muted| format!("el.muted = {};", muted))
        .unwrap_or_default();
    format!(
        r#"
const bridge = window.__driftPlayer;
const el = bridge && bridge.element();
if (!el) return {{ ok: false, stale: false, name: null, reason: "video element not found" }};
if (bridge.token !== {token}) return {{ ok: false, stale: true, name: null, reason: null }};
{mute}
try {{
  await el.play();
  return {{ ok: true, stale: bridge.token !== {token}, name: null, reason: null }};
}} catch (err) {{
  return {{ ok: false, stale: bridge.token !== {token}, name: err && err.name, reason: String(err) }};
}}
"#,
        token = token.0,
        mute = mute,
    )
}

/// Message posted by the bridge's element listeners
#[derive(Debug, Deserialize)]
struct BridgeMessage {
    kind: String,
    token: Option<LoadToken>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    reason: Option<String>,
}

impl BridgeMessage {
    fn into_event(self) -> Option<SurfaceEvent> {
        let token = self.token?;
        let kind = match self.kind.as_str() {
            "metadata" => SurfaceEventKind::MetadataLoaded {
                duration: self.duration,
            },
            "playing" => SurfaceEventKind::Playing,
            "paused" => SurfaceEventKind::Paused,
            "ended" => SurfaceEventKind::Ended,
            "failed" => SurfaceEventKind::Failed {
                reason: self.reason.unwrap_or_else(|| "unknown media error".to_string()),
            },
            other => {
                debug!("Unknown bridge message kind: {}", other);
                return None;
            }
        };
        Some(SurfaceEvent::new(token, kind))
    }
}

#[derive(Debug, Deserialize)]
struct PlayOutcome {
    ok: bool,
    #[serde(default)]
    stale: bool,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

/// What became of one play request
#[derive(Debug, Clone, PartialEq, Eq)]
enum PlayResult {
    Started,
    /// A newer load replaced the element's source; nothing to report
    Stale,
    Refused(String),
}

impl From<PlayOutcome> for PlayResult {
    fn from(outcome: PlayOutcome) -> Self {
        if outcome.stale || outcome.name.as_deref() == Some("AbortError") {
            PlayResult::Stale
        } else if outcome.ok {
            PlayResult::Started
        } else {
            PlayResult::Refused(
                outcome
                    .reason
                    .unwrap_or_else(|| "play() rejected".to_string()),
            )
        }
    }
}

/// Handle on the bridge installed for one video element
#[derive(Clone)]
pub struct ElementBridge {
    events: SurfaceEventSender,
}

impl ElementBridge {
    /// Install the bridge for `video_id` and start forwarding its events.
    /// Must be called from inside a Dioxus scope.
    pub fn mount(video_id: &str, events: SurfaceEventSender) -> Self {
        let video_id = serde_json::to_string(video_id).unwrap_or_else(|_| "\"\"".to_string());
        let mut eval = document::eval(&BRIDGE_JS.replace("__VIDEO_ID__", &video_id));

        let forward = events.clone();
        spawn(async move {
            loop {
                match eval.recv::<BridgeMessage>().await {
                    Ok(message) => {
                        if let Some(event) = message.into_event() {
                            if forward.send(event).is_err() {
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        warn!("Video bridge closed: {}", e);
                        break;
                    }
                }
            }
        });

        Self { events }
    }

    fn run(&self, script: String) {
        let _ = document::eval(&script);
    }

    fn load(&self, url: &str, token: LoadToken, nudge: bool) -> Result<(), SurfaceError> {
        let url = serde_json::to_string(url)
            .map_err(|e| SurfaceError::Rejected(format!("unencodable url: {}", e)))?;
        // The element may not be rendered yet; retry for a few frames
        self.run(format!(
            r#"
const bridge = window.__driftPlayer;
if (bridge) {{
  bridge.token = {token};
  bridge.nudge = {nudge};
  const attempt = (n) => {{
    const el = bridge.element();
    if (!el) {{
      if (n < 60) requestAnimationFrame(() => attempt(n + 1));
      else bridge.emit("failed", {{ reason: "video element not found" }});
      return;
    }}
    el.src = {url};
    el.load();
  }};
  attempt(0);
}}
"#,
            token = token.0,
            nudge = nudge,
            url = url,
        ));
        Ok(())
    }

    async fn try_play(&self, token: LoadToken, muted: Option<bool>) -> PlayResult {
        let eval = document::eval(&play_script(token, muted));
        match eval.join::<PlayOutcome>().await {
            Ok(outcome) => outcome.into(),
            Err(e) => PlayResult::Refused(e.to_string()),
        }
    }

    fn pause(&self) {
        self.run(
            r#"const bridge = window.__driftPlayer;
const el = bridge && bridge.element();
if (el) el.pause();"#
                .to_string(),
        );
    }

    fn set_rate(&self, rate: PlaybackRate) {
        self.run(format!(
            r#"const bridge = window.__driftPlayer;
const el = bridge && bridge.element();
if (el) {{ el.defaultPlaybackRate = {rate}; el.playbackRate = {rate}; }}"#,
            rate = rate.multiplier()
        ));
    }

    fn report(&self, token: LoadToken, kind: SurfaceEventKind) {
        let _ = self.events.send(SurfaceEvent::new(token, kind));
    }
}

/// Plain element: native controls, a refused play is reported as is
pub struct BareVideoSurface {
    bridge: ElementBridge,
}

impl BareVideoSurface {
    pub fn new(bridge: ElementBridge) -> Self {
        Self { bridge }
    }
}

impl PlaybackSurface for BareVideoSurface {
    fn load(&mut self, url: &str, token: LoadToken) -> Result<(), SurfaceError> {
        self.bridge.load(url, token, false)
    }

    fn play(&mut self, token: LoadToken) {
        let bridge = self.bridge.clone();
        spawn(async move {
            // Native controls own the mute state here
            if let PlayResult::Refused(reason) = bridge.try_play(token, None).await {
                bridge.report(token, SurfaceEventKind::PlayRefused { reason });
            }
        });
    }

    fn pause(&mut self) {
        self.bridge.pause();
    }

    fn set_rate(&mut self, rate: PlaybackRate) {
        self.bridge.set_rate(rate);
    }
}

/// Element driven only through the widget's own controls.
///
/// Every play starts unmuted; a refused one is retried once muted, since
/// autoplay policies usually allow muted playback. The next play the user
/// asks for restores sound. The first frame is decoded as soon as metadata
/// arrives so a paused item is not a black box.
pub struct EnhancedVideoSurface {
    bridge: ElementBridge,
}

impl EnhancedVideoSurface {
    pub fn new(bridge: ElementBridge) -> Self {
        Self { bridge }
    }
}

impl PlaybackSurface for EnhancedVideoSurface {
    fn load(&mut self, url: &str, token: LoadToken) -> Result<(), SurfaceError> {
        self.bridge.load(url, token, true)
    }

    fn play(&mut self, token: LoadToken) {
        let bridge = self.bridge.clone();
        spawn(async move {
            let PlayResult::Refused(reason) = bridge.try_play(token, Some(false)).await else {
                return;
            };
            debug!("Play refused ({}), retrying muted", reason);
            if let PlayResult::Refused(reason) = bridge.try_play(token, Some(true)).await {
                bridge.report(token, SurfaceEventKind::PlayRefused { reason });
            }
        });
    }

    fn pause(&mut self) {
        self.bridge.pause();
    }

    fn set_rate(&mut self, rate: PlaybackRate) {
        self.bridge.set_rate(rate);
    }
}

/// Mount the configured surface for `video_id`
pub fn mount_surface(
    kind: SurfaceKind,
    video_id: &str,
    events: SurfaceEventSender,
) -> Box<dyn PlaybackSurface> {
    let bridge = ElementBridge::mount(video_id, events);
    match kind {
        SurfaceKind::Bare => Box::new(BareVideoSurface::new(bridge)),
        SurfaceKind::Enhanced => Box::new(EnhancedVideoSurface::new(bridge)),
    }
}
