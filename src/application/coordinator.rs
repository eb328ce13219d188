//! Submission surface for translation and lexicon requests.
//!
//! The coordinator owns the busy/idle state of the two triggers and the
//! single result area. Views never touch that state directly: they
//! [`subscribe`](Coordinator::subscribe) to a [`watch`] channel of
//! [`Surface`] snapshots and render whatever arrives.

use crate::domain::error::SignAidError;
use crate::domain::model::{RequestKind, TranslationRequest, TranslationResult};
use crate::domain::traits::TranslationService;
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tracing::{debug, info, warn};

pub const TRANSLATE_IDLE_LABEL: &str = "Translate to PSL";
pub const TRANSLATE_BUSY_LABEL: &str = "Translating...";
pub const LEXICON_IDLE_LABEL: &str = "Fetch HamNoSys";
pub const LEXICON_BUSY_LABEL: &str = "Fetching...";

pub const TRANSPORT_ERROR_TEXT: &str = "Error occurred while processing.";
pub const CANCELLED_TEXT: &str = "Request cancelled.";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Pending,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Control {
    pub label: &'static str,
    pub enabled: bool,
}

/// Everything a view needs to draw the submission surface
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Surface {
    pub phase: Phase,
    pub translate: Control,
    pub lexicon: Control,
    pub output: String,
    /// Kind of the request that produced `output`
    pub kind: Option<RequestKind>,
    pub result: Option<TranslationResult>,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            translate: Control {
                label: TRANSLATE_IDLE_LABEL,
                enabled: true,
            },
            lexicon: Control {
                label: LEXICON_IDLE_LABEL,
                enabled: true,
            },
            output: String::new(),
            kind: None,
            result: None,
        }
    }
}

impl Surface {
    fn begin(&mut self, kind: RequestKind) {
        self.phase = Phase::Pending;
        self.translate = Control {
            label: TRANSLATE_BUSY_LABEL,
            enabled: false,
        };
        self.lexicon = Control {
            label: LEXICON_BUSY_LABEL,
            enabled: false,
        };
        self.output.clear();
        self.kind = Some(kind);
        self.result = None;
    }

    fn finish(&mut self, kind: RequestKind, output: String, result: TranslationResult) {
        let idle = Surface::default();
        self.phase = idle.phase;
        self.translate = idle.translate;
        self.lexicon = idle.lexicon;
        self.output = output;
        self.kind = Some(kind);
        self.result = Some(result);
    }

    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Pending
    }
}

/// Text written to the result area for a settled request
pub fn render_outcome(kind: RequestKind, outcome: &Result<String, SignAidError>) -> String {
    match outcome {
        Ok(payload) => format!("{}: {}", kind.result_label(), payload),
        Err(SignAidError::Transport(_)) => TRANSPORT_ERROR_TEXT.to_string(),
        Err(SignAidError::Cancelled) => CANCELLED_TEXT.to_string(),
        Err(e) => format!("Error: {}", e),
    }
}

/// Returns the surface to idle if a submission is dropped mid-flight.
struct PendingGuard<'a> {
    coordinator: &'a Coordinator,
    kind: RequestKind,
    settled: bool,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!("{:?} request dropped before it settled", self.kind);
        self.coordinator.clear_abort();
        let outcome = Err(SignAidError::Cancelled);
        self.coordinator.settle(self.kind, &outcome);
    }
}

/// Mediates between a trigger and the translation service
///
/// At most one request is in flight; the network call is bounded by a
/// timeout and can be aborted.
pub struct Coordinator {
    service: Arc<dyn TranslationService>,
    surface: watch::Sender<Surface>,
    abort: Mutex<Option<oneshot::Sender<()>>>,
    timeout: Duration,
}

impl Coordinator {
    pub fn new(service: Arc<dyn TranslationService>) -> Self {
        Self::with_timeout(service, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(service: Arc<dyn TranslationService>, timeout: Duration) -> Self {
        let (surface, _) = watch::channel(Surface::default());
        Self {
            service,
            surface,
            abort: Mutex::new(None),
            timeout,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Surface> {
        self.surface.subscribe()
    }

    pub fn snapshot(&self) -> Surface {
        self.surface.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.surface.borrow().is_busy()
    }

    /// Submit `text` as a translation or lexicon request.
    ///
    /// Empty input is rejected without a network call or a pending phase.
    /// A second submission while one is pending returns
    /// [`SignAidError::Busy`] and leaves the surface untouched.
    pub async fn submit(&self, kind: RequestKind, text: &str) -> TranslationResult {
        if self.is_busy() {
            return TranslationResult::failure(&SignAidError::Busy);
        }

        let request = match TranslationRequest::new(kind, text) {
            Ok(request) => request,
            Err(e) => {
                debug!("Rejected empty {:?} submission", kind);
                let outcome = Err(e);
                return self.settle(kind, &outcome);
            }
        };

        let abort_rx = match self.claim() {
            Some(rx) => rx,
            None => return TranslationResult::failure(&SignAidError::Busy),
        };

        self.surface.send_modify(|s| s.begin(kind));
        let mut guard = PendingGuard {
            coordinator: self,
            kind,
            settled: false,
        };

        info!("Submitting {:?} request ({} chars)", kind, request.text.len());
        let call = self.service.call(kind.endpoint(), request.body());
        let outcome = tokio::select! {
            res = tokio::time::timeout(self.timeout, call) => match res {
                Ok(outcome) => outcome,
                Err(_) => Err(SignAidError::Timeout(self.timeout)),
            },
            _ = abort_rx => Err(SignAidError::Cancelled),
        };

        self.clear_abort();
        guard.settled = true;
        if let Err(e) = &outcome {
            warn!("{:?} request failed: {}", kind, e);
        }
        self.settle(kind, &outcome)
    }

    /// Cancel the in-flight request, if any. Returns whether one was pending.
    pub fn abort(&self) -> bool {
        let sender = self
            .abort
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match sender {
            Some(tx) => {
                info!("Aborting in-flight request");
                let _ = tx.send(());
                true
            }
            None => false,
        }
    }

    fn claim(&self) -> Option<oneshot::Receiver<()>> {
        let mut slot = self.abort.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() || self.is_busy() {
            return None;
        }
        let (tx, rx) = oneshot::channel();
        *slot = Some(tx);
        Some(rx)
    }

    fn clear_abort(&self) {
        self.abort
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    fn settle(&self, kind: RequestKind, outcome: &Result<String, SignAidError>) -> TranslationResult {
        let output = render_outcome(kind, outcome);
        let result = TranslationResult::from(outcome);
        let published = result.clone();
        self.surface
            .send_modify(move |s| s.finish(kind, output, published));
        result
    }
}
