// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per-session wave state and the handle exposed to callers.

use hostpage_core::asset::{InlineAsset, LinkedAsset};
use hostpage_core::document::LoadOutcome;
use hostpage_core::event::{DocumentSignal, ScriptSignal, SignalBus};
use hostpage_core::session::{SessionPhase, WaveKind};
use hostpage_core::{ActivationError, Document, InjectionTarget, SessionId};
use hostpage_lanes::{InlineScriptLane, LoadObserver, WaveProgress, WaveState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// State owned by one render session, shared by its load callbacks, its
/// second stage and its handles.
pub(crate) struct SessionShared {
    id: SessionId,
    linked: WaveState,
    inline: WaveState,
    phase: watch::Sender<SessionPhase>,
    bus: Arc<SignalBus<DocumentSignal>>,
}

impl SessionShared {
    pub(crate) fn new(
        id: SessionId,
        linked_total: usize,
        inline_total: usize,
        bus: Arc<SignalBus<DocumentSignal>>,
    ) -> Self {
        let (phase, _) = watch::channel(SessionPhase::Pending);
        Self {
            id,
            linked: WaveState::new(WaveKind::LinkedScripts, linked_total),
            inline: WaveState::new(WaveKind::InlineScripts, inline_total),
            phase,
            bus,
        }
    }

    pub(crate) fn id(&self) -> SessionId {
        self.id
    }

    pub(crate) fn linked(&self) -> &WaveState {
        &self.linked
    }

    pub(crate) fn inline(&self) -> &WaveState {
        &self.inline
    }

    /// Announces `signal` on the bus, then moves the session to `next`.
    ///
    /// Only called by the caller that closed the wave, which excludes a
    /// concurrent [`fail`](Self::fail) of the same wave. The event is
    /// published before the phase changes so the second stage can never
    /// announce its own signal ahead of the first one.
    fn close_wave(&self, signal: ScriptSignal, next: SessionPhase) {
        log::info!(
            "Session {}: '{}' ({} linked, {} inline).",
            self.id,
            signal.event_name(),
            self.linked.total(),
            self.inline.total()
        );
        self.bus.publish(DocumentSignal {
            session: self.id,
            signal,
        });
        self.phase.send_if_modified(|phase| {
            if phase.is_terminal() {
                return false;
            }
            *phase = next;
            true
        });
    }

    /// Closes the linked wave if it has nothing to wait for.
    pub(crate) fn close_linked_if_empty(&self) {
        if self.linked.signal_if_empty() {
            self.close_wave(
                ScriptSignal::ExternalScriptsLoaded,
                SessionPhase::LinkedScriptsReady,
            );
        }
    }

    fn wave(&self, kind: WaveKind) -> &WaveState {
        match kind {
            WaveKind::LinkedScripts => &self.linked,
            WaveKind::InlineScripts => &self.inline,
        }
    }

    /// Abandons `wave` and moves the session to `Failed`.
    ///
    /// A wave that already signaled cannot fail, and an abandoned wave can
    /// no longer signal, so a session never announces a wave it reported
    /// as failed.
    ///
    /// ## Returns
    /// `false` if the wave had already closed; the error is then dropped.
    pub(crate) fn fail(&self, wave: WaveKind, error: ActivationError) -> bool {
        let state = self.wave(wave);
        if !state.abandon() {
            log::debug!(
                "Session {}: {} already closed, dropping '{}'.",
                self.id,
                state.kind(),
                error
            );
            return false;
        }
        log::warn!(
            "Session {}: {} abandoned, the page cannot become ready: {}",
            self.id,
            state.kind(),
            error
        );
        self.phase.send_if_modified(|phase| {
            if phase.is_terminal() {
                return false;
            }
            *phase = SessionPhase::Failed(error);
            true
        });
        true
    }

    fn subscribe(&self) -> watch::Receiver<SessionPhase> {
        self.phase.subscribe()
    }

    /// Second stage: waits for the linked wave, then injects the inline scripts.
    pub(crate) async fn run_inline_stage(
        self: Arc<Self>,
        document: Arc<dyn Document>,
        target: InjectionTarget,
        scripts: Vec<InlineAsset>,
        lane: InlineScriptLane,
        timeout: Option<Duration>,
    ) {
        let mut phase = self.subscribe();
        let linked_ready = match timeout {
            Some(limit) => {
                let waited =
                    tokio::time::timeout(limit, wait_for_signal(&mut phase, WaveKind::LinkedScripts))
                        .await;
                match waited {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        let error = ActivationError::TimedOut {
                            wave: WaveKind::LinkedScripts,
                            timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                        };
                        if self.fail(WaveKind::LinkedScripts, error) {
                            return;
                        }
                        // The last load landed as the timer fired.
                        wait_for_signal(&mut phase, WaveKind::LinkedScripts).await
                    }
                }
            }
            None => wait_for_signal(&mut phase, WaveKind::LinkedScripts).await,
        };
        if linked_ready.is_err() {
            return;
        }

        let injected = lane.inject(&*document, &target, &scripts, |_, _| {
            self.inline.record_injection();
            if self.inline.record_completion() == WaveProgress::Completed {
                self.close_wave(ScriptSignal::ScriptsLoaded, SessionPhase::ScriptsReady);
            }
        });
        match injected {
            Ok(_) => {
                if self.inline.signal_if_empty() {
                    self.close_wave(ScriptSignal::ScriptsLoaded, SessionPhase::ScriptsReady);
                }
            }
            Err(error) => {
                self.fail(WaveKind::InlineScripts, ActivationError::Document(error));
            }
        }
    }
}

impl LoadObserver for SessionShared {
    fn settled(&self, asset: &LinkedAsset, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Loaded => match self.linked.record_completion() {
                WaveProgress::Completed => self.close_wave(
                    ScriptSignal::ExternalScriptsLoaded,
                    SessionPhase::LinkedScriptsReady,
                ),
                WaveProgress::Pending { completed, total } => log::debug!(
                    "Session {}: '{}' loaded ({}/{}).",
                    self.id,
                    asset.name,
                    completed,
                    total
                ),
                WaveProgress::AlreadySignaled => {
                    log::debug!("Session {}: late load of '{}' ignored.", self.id, asset.name)
                }
            },
            LoadOutcome::Failed(reason) => {
                self.fail(
                    WaveKind::LinkedScripts,
                    ActivationError::AssetLoadFailed {
                        name: asset.name.clone(),
                        reason,
                    },
                );
            }
        }
    }
}

async fn wait_for_signal(
    phase: &mut watch::Receiver<SessionPhase>,
    wave: WaveKind,
) -> Result<(), ActivationError> {
    let current = phase
        .wait_for(|p| p.has_signaled(wave) || matches!(p, SessionPhase::Failed(_)))
        .await
        .map_err(|_| ActivationError::SessionDropped)?;
    match &*current {
        SessionPhase::Failed(error) => Err(error.clone()),
        _ => Ok(()),
    }
}

/// Counters of a session, mirroring what the hosted page component exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Linked scripts reported as loaded.
    pub scripts_loaded: usize,
    /// Linked scripts of the session.
    pub linked_total: usize,
    /// Inline scripts inserted so far.
    pub inline_scripts_injected: usize,
    /// Inline scripts of the session.
    pub inline_total: usize,
    /// Current lifecycle phase.
    pub phase: SessionPhase,
}

/// Caller-side view of a render session.
///
/// Cheap to clone. Waiting on a handle never misses a signal: the session
/// phase is state, not an event, so a handle created after the wave closed
/// resolves immediately.
#[derive(Clone)]
pub struct SessionHandle {
    shared: Arc<SessionShared>,
    phase: watch::Receiver<SessionPhase>,
}

impl SessionHandle {
    pub(crate) fn new(shared: Arc<SessionShared>) -> Self {
        let phase = shared.subscribe();
        Self { shared, phase }
    }

    /// The session id, as carried by its bus signals.
    pub fn id(&self) -> SessionId {
        self.shared.id()
    }

    /// The current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase.borrow().clone()
    }

    /// A snapshot of the session counters.
    pub fn state(&self) -> SessionState {
        SessionState {
            scripts_loaded: self.shared.linked().completed(),
            linked_total: self.shared.linked().total(),
            inline_scripts_injected: self.shared.inline().injected(),
            inline_total: self.shared.inline().total(),
            phase: self.phase(),
        }
    }

    /// Resolves once every linked script loaded.
    pub async fn linked_scripts_ready(&self) -> Result<(), ActivationError> {
        let mut phase = self.phase.clone();
        wait_for_signal(&mut phase, WaveKind::LinkedScripts).await
    }

    /// Resolves once every inline script was injected.
    pub async fn scripts_ready(&self) -> Result<(), ActivationError> {
        let mut phase = self.phase.clone();
        wait_for_signal(&mut phase, WaveKind::InlineScripts).await
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("id", &self.id())
            .field("state", &self.state())
            .finish()
    }
}
