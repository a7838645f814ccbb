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

//! The WaveOrchestrator turns the asset lists of a page into a render session.

use std::sync::Arc;

use hostpage_core::asset::{AssetDescriptor, ExclusionFilter, PartitionedAssets};
use hostpage_core::event::{document_signals, DocumentSignal, SignalBus};
use hostpage_core::lane::Lane;
use hostpage_core::session::WaveKind;
use hostpage_core::{ActivationConfig, ActivationError, Document, InjectionTarget, SessionId};
use hostpage_lanes::{InlineScriptLane, LinkedScriptLane, LoadObserver, StyleLane};
use tokio::runtime::Handle;

use super::session::{SessionHandle, SessionShared};

/// Drives styles, linked scripts and inline scripts of a page into a document.
///
/// Each call to [`activate`](Self::activate) starts an independent session.
/// The orchestrator itself holds no per-session state and can be shared.
pub struct WaveOrchestrator {
    config: ActivationConfig,
    filter: ExclusionFilter,
    styles: StyleLane,
    linked: LinkedScriptLane,
    inline: InlineScriptLane,
    bus: Arc<SignalBus<DocumentSignal>>,
}

impl WaveOrchestrator {
    /// Creates an orchestrator publishing on the process-wide signal bus.
    pub fn new(config: ActivationConfig) -> Self {
        Self {
            filter: config.exclusion_filter(),
            styles: StyleLane::new(),
            linked: LinkedScriptLane::from_config(&config),
            inline: InlineScriptLane::new(),
            bus: document_signals(),
            config,
        }
    }

    /// Publishes the session signals on `bus` instead of the global one.
    pub fn with_bus(mut self, bus: Arc<SignalBus<DocumentSignal>>) -> Self {
        self.bus = bus;
        self
    }

    /// The bus the sessions publish on.
    pub fn bus(&self) -> &Arc<SignalBus<DocumentSignal>> {
        &self.bus
    }

    /// Starts a render session for the given asset lists.
    ///
    /// Styles and linked scripts are inserted before this returns; inline
    /// scripts are deferred to a task spawned on the current Tokio runtime
    /// that waits for the linked wave.
    ///
    /// ## Errors
    /// - [`ActivationError::NoRuntime`] when called outside a Tokio runtime,
    ///   before anything was inserted.
    /// - [`ActivationError::Document`] when the document rejects an insertion.
    pub fn activate(
        &self,
        document: Arc<dyn Document>,
        target: InjectionTarget,
        css: &[AssetDescriptor],
        javascript: &[AssetDescriptor],
    ) -> Result<SessionHandle, ActivationError> {
        let runtime = Handle::try_current().map_err(|_| ActivationError::NoRuntime)?;

        let styles = self.filter.apply(css);
        let scripts = PartitionedAssets::from_descriptors(javascript, &self.filter);

        let shared = Arc::new(SessionShared::new(
            SessionId::new(),
            scripts.linked.len(),
            scripts.inline.len(),
            Arc::clone(&self.bus),
        ));
        log::info!(
            "Session {} started: {} style(s), {} linked script(s), {} inline script(s), {:?} target.",
            shared.id(),
            styles.len(),
            scripts.linked.len(),
            scripts.inline.len(),
            target.isolation()
        );

        self.styles.inject(&*document, &target, &styles)?;

        let observer: Arc<dyn LoadObserver> = Arc::clone(&shared) as Arc<dyn LoadObserver>;
        match self
            .linked
            .inject(&*document, &target, &scripts.linked, observer)
        {
            Ok(nodes) => {
                for _ in &nodes {
                    shared.linked().record_injection();
                }
            }
            Err(error) => {
                let error = ActivationError::Document(error);
                shared.fail(WaveKind::LinkedScripts, error.clone());
                return Err(error);
            }
        }
        shared.close_linked_if_empty();

        log::debug!(
            "Session {}: {} deferred until the linked wave closes.",
            shared.id(),
            self.inline.strategy_name()
        );
        runtime.spawn(Arc::clone(&shared).run_inline_stage(
            document,
            target,
            scripts.inline,
            self.inline,
            self.config.load_timeout(),
        ));

        Ok(SessionHandle::new(shared))
    }
}

impl Default for WaveOrchestrator {
    fn default() -> Self {
        Self::new(ActivationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostpage_core::event::ScriptSignal;
    use hostpage_core::session::{SessionPhase, WaveKind};
    use hostpage_core::{ElementSpec, Isolation};
    use hostpage_infra::MemoryDocument;

    fn mounted(isolation: Isolation) -> (Arc<MemoryDocument>, InjectionTarget) {
        let doc = Arc::new(MemoryDocument::new());
        let host = doc.append_host_element("hosted-search-page").unwrap();
        let root = match isolation {
            Isolation::Isolated => doc.attach_shadow(host).unwrap(),
            Isolation::Shared => host,
        };
        let container = doc
            .create_element(&ElementSpec::container("hostedSearchPage"))
            .unwrap();
        doc.append_child(root, container).unwrap();
        let target = InjectionTarget::resolve(&*doc, isolation, root, container);
        (doc, target)
    }

    fn orchestrator(config: ActivationConfig) -> (WaveOrchestrator, flume::Receiver<DocumentSignal>) {
        let orchestrator = WaveOrchestrator::new(config).with_bus(Arc::new(SignalBus::new()));
        let events = orchestrator.bus().subscribe();
        (orchestrator, events)
    }

    #[test]
    fn activation_requires_a_runtime() {
        let (doc, target) = mounted(Isolation::Shared);
        let (orchestrator, _) = orchestrator(ActivationConfig::default());
        let js = [AssetDescriptor::linked("A", "https://static/a.js")];

        let error = orchestrator.activate(doc.clone(), target, &[], &js).unwrap_err();
        assert_eq!(error, ActivationError::NoRuntime);
        assert!(doc.all_elements_by_tag("script").is_empty());
    }

    #[tokio::test]
    async fn empty_script_list_signals_both_waves() {
        let (doc, target) = mounted(Isolation::Shared);
        let (orchestrator, events) = orchestrator(ActivationConfig::default());

        let session = orchestrator.activate(doc, target, &[], &[]).unwrap();
        session.scripts_ready().await.unwrap();

        let first = events.recv_async().await.unwrap();
        let second = events.recv_async().await.unwrap();
        assert_eq!(first.signal, ScriptSignal::ExternalScriptsLoaded);
        assert_eq!(second.signal, ScriptSignal::ScriptsLoaded);
        assert_eq!(first.session, session.id());
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn failed_load_fails_the_session() {
        let (doc, target) = mounted(Isolation::Isolated);
        let (orchestrator, events) = orchestrator(ActivationConfig::default());
        let js = [
            AssetDescriptor::linked("A", "https://static/a.js"),
            AssetDescriptor::inline("B", "init()"),
        ];

        let session = orchestrator.activate(doc.clone(), target, &[], &js).unwrap();
        let pending = doc.pending_loads();
        assert!(doc.fail_load(pending[0], "404"));

        let error = session.scripts_ready().await.unwrap_err();
        assert_eq!(
            error,
            ActivationError::AssetLoadFailed {
                name: "A".into(),
                reason: "404".into()
            }
        );
        assert!(events.try_recv().is_err());
        assert_eq!(doc.all_elements_by_tag("script").len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn starved_wave_times_out() {
        let (doc, target) = mounted(Isolation::Shared);
        let config = ActivationConfig {
            load_timeout_ms: Some(250),
            ..ActivationConfig::default()
        };
        let (orchestrator, _) = orchestrator(config);
        let js = [AssetDescriptor::linked("A", "https://static/a.js")];

        let session = orchestrator.activate(doc, target, &[], &js).unwrap();

        let error = session.linked_scripts_ready().await.unwrap_err();
        assert_eq!(
            error,
            ActivationError::TimedOut {
                wave: WaveKind::LinkedScripts,
                timeout_ms: 250
            }
        );
        assert!(matches!(session.phase(), SessionPhase::Failed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn late_load_after_timeout_stays_silent() {
        let (doc, target) = mounted(Isolation::Shared);
        let config = ActivationConfig {
            load_timeout_ms: Some(100),
            ..ActivationConfig::default()
        };
        let (orchestrator, events) = orchestrator(config);
        let js = [
            AssetDescriptor::linked("A", "https://static/a.js"),
            AssetDescriptor::inline("B", "initB()"),
        ];

        let session = orchestrator.activate(doc.clone(), target, &[], &js).unwrap();
        let error = session.linked_scripts_ready().await.unwrap_err();
        assert!(matches!(error, ActivationError::TimedOut { .. }));

        // The script shows up after the session gave up on it.
        assert_eq!(doc.complete_all_loads(), 1);
        tokio::task::yield_now().await;

        assert!(events.try_recv().is_err());
        assert!(matches!(
            session.phase(),
            SessionPhase::Failed(ActivationError::TimedOut { .. })
        ));
        assert_eq!(session.state().scripts_loaded, 0);
        assert_eq!(doc.all_elements_by_tag("script").len(), 1);
    }

    #[tokio::test]
    async fn loads_after_a_failed_load_stay_silent() {
        let (doc, target) = mounted(Isolation::Shared);
        let (orchestrator, events) = orchestrator(ActivationConfig::default());
        let js = [
            AssetDescriptor::linked("A", "https://static/a.js"),
            AssetDescriptor::linked("B", "https://static/b.js"),
        ];

        let session = orchestrator.activate(doc.clone(), target, &[], &js).unwrap();
        let pending = doc.pending_loads();
        assert!(doc.complete_load(pending[0]));
        assert!(doc.fail_load(pending[1], "blocked"));

        assert!(session.scripts_ready().await.is_err());
        assert!(events.try_recv().is_err());
        assert!(matches!(
            session.phase(),
            SessionPhase::Failed(ActivationError::AssetLoadFailed { .. })
        ));
    }
}
