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

use std::sync::{Arc, Mutex};

use hostpage_agents::{HostedPageAgent, WaveOrchestrator};
use hostpage_core::asset::{AssetDescriptor, PageDefinition};
use hostpage_core::event::{DocumentSignal, ScriptSignal, SignalBus};
use hostpage_core::session::SessionPhase;
use hostpage_core::{ActivationConfig, ConfigureRequest, Document, Isolation, NodeId};
use hostpage_infra::{MemoryDocument, StaticPageSource};

// --- HELPERS ---

struct Harness {
    doc: Arc<MemoryDocument>,
    agent: HostedPageAgent,
    bus: Arc<SignalBus<DocumentSignal>>,
    events: flume::Receiver<DocumentSignal>,
}

fn harness(isolation: Isolation, pages: Vec<(&str, PageDefinition)>) -> Harness {
    let doc = Arc::new(MemoryDocument::new());
    let host = doc.append_host_element("hosted-search-page").unwrap();

    let source = pages
        .into_iter()
        .fold(StaticPageSource::new(), |source, (id, page)| {
            source.with_page("acme", id, page)
        });
    let bus = Arc::new(SignalBus::new());
    let events = bus.subscribe();
    let orchestrator = WaveOrchestrator::new(ActivationConfig::default()).with_bus(bus.clone());

    let mut agent = HostedPageAgent::new(doc.clone(), Arc::new(source), orchestrator);
    agent.mount(host, isolation).unwrap();
    Harness {
        doc,
        agent,
        bus,
        events,
    }
}

fn request(page_id: &str) -> ConfigureRequest {
    ConfigureRequest {
        org_id: "acme".into(),
        page_id: page_id.into(),
        api_key: "key".into(),
        html_only: None,
        rest_uri: None,
    }
}

fn page(javascript: Vec<AssetDescriptor>) -> PageDefinition {
    PageDefinition {
        id: "search".into(),
        html: "<div class=\"CoveoSearchInterface\"></div>".into(),
        javascript,
        ..PageDefinition::default()
    }
}

fn scripts(doc: &MemoryDocument) -> Vec<NodeId> {
    doc.all_elements_by_tag("script")
}

async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

// --- SCENARIOS ---

#[tokio::test]
async fn test_linked_then_inline_scenario() {
    // --- 1. ARRANGE ---
    let js = vec![
        AssetDescriptor::linked("A", "https://static/a.js"),
        AssetDescriptor::inline("B", "initB()"),
    ];
    let mut h = harness(Isolation::Isolated, vec![("search", page(js))]);

    // --- 2. ACT ---
    let rendered = h.agent.configure(request("search")).await.unwrap();
    let session = rendered.session.expect("assets are activated");

    // Only the linked script is in place while its load is pending.
    settle().await;
    assert_eq!(scripts(&h.doc).len(), 1);
    assert_eq!(session.phase(), SessionPhase::Pending);
    assert!(h.events.try_recv().is_err());

    assert_eq!(h.doc.complete_all_loads(), 1);
    session.scripts_ready().await.unwrap();

    // --- 3. ASSERT ---
    let signals: Vec<_> = h.events.try_iter().map(|e| e.signal).collect();
    assert_eq!(
        signals,
        [ScriptSignal::ExternalScriptsLoaded, ScriptSignal::ScriptsLoaded]
    );

    let nodes = scripts(&h.doc);
    assert_eq!(nodes.len(), 2);
    let a = h.doc.element(nodes[0]).unwrap();
    let b = h.doc.element(nodes[1]).unwrap();
    assert_eq!(a.attribute("src"), Some("https://static/a.js"));
    assert_eq!(b.text.as_deref(), Some("initB()"));

    // Both scripts sit in the shadow root, before the page container.
    let mount = h.agent.mount_point().unwrap();
    assert_eq!(
        h.doc.children(mount.root()),
        vec![nodes[0], nodes[1], mount.container()]
    );

    let state = session.state();
    assert_eq!(state.scripts_loaded, 1);
    assert_eq!(state.inline_scripts_injected, 1);
    assert_eq!(state.phase, SessionPhase::ScriptsReady);
}

#[tokio::test]
async fn test_inline_scripts_wait_for_linked_ready() {
    let js = vec![
        AssetDescriptor::linked("A", "https://static/a.js"),
        AssetDescriptor::inline("B", "initB()"),
        AssetDescriptor::linked("C", "https://static/c.js"),
        AssetDescriptor::inline("D", "initD()"),
    ];
    let mut h = harness(Isolation::Shared, vec![("search", page(js))]);

    // Count the scripts present at the instant the linked wave is announced.
    let seen = Arc::new(Mutex::new(None));
    {
        let seen = seen.clone();
        let doc = h.doc.clone();
        h.bus.once("CoveoExternalScriptsLoaded", move |_| {
            *seen.lock().unwrap() = Some(doc.all_elements_by_tag("script").len());
        });
    }

    let session = h
        .agent
        .configure(request("search"))
        .await
        .unwrap()
        .session
        .unwrap();

    // Completion order is the reverse of insertion order.
    let pending = h.doc.pending_loads();
    assert_eq!(pending.len(), 2);
    assert!(h.doc.complete_load(pending[1]));
    settle().await;
    assert_eq!(session.state().scripts_loaded, 1);
    assert_eq!(scripts(&h.doc).len(), 2);
    assert!(h.doc.complete_load(pending[0]));

    session.scripts_ready().await.unwrap();
    assert_eq!(*seen.lock().unwrap(), Some(2));

    let head_scripts: Vec<_> = h
        .doc
        .children(h.doc.head())
        .into_iter()
        .filter_map(|node| h.doc.element(node))
        .map(|el| el.attribute("src").map(str::to_string).or(el.text.clone()))
        .collect();
    assert_eq!(
        head_scripts,
        [
            Some("https://static/a.js".to_string()),
            Some("https://static/c.js".to_string()),
            Some("initB()".to_string()),
            Some("initD()".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_empty_script_list_signals_immediately() {
    let mut h = harness(Isolation::Shared, vec![("search", page(Vec::new()))]);

    let session = h
        .agent
        .configure(request("search"))
        .await
        .unwrap()
        .session
        .unwrap();
    session.scripts_ready().await.unwrap();

    let signals: Vec<_> = h.events.try_iter().map(|e| e.signal).collect();
    assert_eq!(
        signals,
        [ScriptSignal::ExternalScriptsLoaded, ScriptSignal::ScriptsLoaded]
    );
    assert!(scripts(&h.doc).is_empty());
}

#[tokio::test]
async fn test_editor_assets_are_never_rendered() {
    let mut definition = page(vec![
        AssetDescriptor::linked("CoveoSearchUI", "https://static/ui.js"),
        AssetDescriptor::linked("InterfaceEditorHelper", "https://static/editor.js"),
    ]);
    definition.css = vec![
        AssetDescriptor::linked("CoveoFullSearch", "https://static/full.css"),
        AssetDescriptor::linked("InterfaceEditorStyles", "https://static/editor.css"),
    ];
    let mut h = harness(Isolation::Shared, vec![("search", definition)]);

    let session = h
        .agent
        .configure(request("search"))
        .await
        .unwrap()
        .session
        .unwrap();

    let nodes = scripts(&h.doc);
    assert_eq!(nodes.len(), 1);
    let primary = h.doc.element(nodes[0]).unwrap();
    assert_eq!(primary.attribute("src"), Some("https://static/ui.js"));
    assert!(primary.classes.iter().any(|c| c == "coveo-script"));

    let links = h.doc.all_elements_by_tag("link");
    assert_eq!(links.len(), 1);
    assert_eq!(
        h.doc.element(links[0]).unwrap().attribute("id"),
        Some("CoveoFullSearch")
    );

    // The excluded script does not count in the wave total.
    assert_eq!(session.state().linked_total, 1);
    h.doc.complete_all_loads();
    session.linked_scripts_ready().await.unwrap();
}

#[tokio::test]
async fn test_two_configure_calls_are_independent_sessions() {
    let first_js = vec![
        AssetDescriptor::linked("A", "https://static/a.js"),
        AssetDescriptor::linked("B", "https://static/b.js"),
    ];
    let second_js = vec![AssetDescriptor::linked("C", "https://static/c.js")];
    let mut h = harness(
        Isolation::Shared,
        vec![("first", page(first_js)), ("second", page(second_js))],
    );

    let first = h.agent.configure(request("first")).await.unwrap().session.unwrap();
    let second = h.agent.configure(request("second")).await.unwrap().session.unwrap();

    assert_ne!(first.id(), second.id());
    assert_eq!(first.state().linked_total, 2);
    assert_eq!(second.state().linked_total, 1);
    assert_eq!(h.agent.session().map(|s| s.id()), Some(second.id()));

    // Completing the second session's script only closes the second session.
    let pending = h.doc.pending_loads();
    assert_eq!(pending.len(), 3);
    assert!(h.doc.complete_load(pending[2]));
    second.scripts_ready().await.unwrap();
    assert_eq!(first.phase(), SessionPhase::Pending);

    let events: Vec<_> = h.events.try_iter().collect();
    assert!(events.iter().all(|e| e.session == second.id()));
    assert_eq!(events.len(), 2);

    h.doc.complete_all_loads();
    first.scripts_ready().await.unwrap();
}

#[tokio::test]
async fn test_late_subscriber_still_resolves() {
    let js = vec![AssetDescriptor::linked("A", "https://static/a.js")];
    let mut h = harness(Isolation::Shared, vec![("search", page(js))]);

    let session = h
        .agent
        .configure(request("search"))
        .await
        .unwrap()
        .session
        .unwrap();
    h.doc.complete_all_loads();
    session.scripts_ready().await.unwrap();

    // A handle cloned after both signals resolves without a new event.
    let late = session.clone();
    late.linked_scripts_ready().await.unwrap();
    late.scripts_ready().await.unwrap();
    assert_eq!(h.events.try_iter().count(), 2);
}
