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

//! Wires the in-memory document, a page source and the hosted page agent.

use std::sync::Arc;

use anyhow::{Context, Result};
use hostpage_agents::{HostedPageAgent, WaveOrchestrator};
use hostpage_core::event::{BusEvent, DocumentSignal, SignalBus};
use hostpage_core::PageSource;
use hostpage_infra::{FilePageSource, HttpPageSource, MemoryDocument};

use crate::config::RuntimeConfig;
use crate::report::{RunReport, SessionReport};

/// Tag of the element hosting the page.
const HOST_TAG: &str = "hosted-search-page";

/// How far the runtime drives the render session.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Report every linked script as loaded, then wait for both waves.
    pub complete_loads: bool,
}

/// Renders the configured page and reports the resulting document.
pub async fn run(
    config: &RuntimeConfig,
    bus: Arc<SignalBus<DocumentSignal>>,
    options: RunOptions,
) -> Result<RunReport> {
    let document = Arc::new(MemoryDocument::new());
    let host = document
        .append_host_element(HOST_TAG)
        .context("Failed to create the host element")?;

    let source: Arc<dyn PageSource> = match &config.page.file {
        Some(path) => Arc::new(FilePageSource::new(path)),
        None => Arc::new(HttpPageSource::new()),
    };
    let orchestrator = WaveOrchestrator::new(config.activation.clone()).with_bus(Arc::clone(&bus));
    let signals = bus.subscribe();

    let mut agent = HostedPageAgent::new(document.clone(), source, orchestrator);
    agent
        .mount(host, config.page.isolation())
        .context("Failed to mount the hosted page")?;

    let rendered = agent
        .configure(config.page.configure_request())
        .await
        .with_context(|| format!("Failed to render page '{}'", config.page.page_id))?;

    if let (true, Some(session)) = (options.complete_loads, &rendered.session) {
        let completed = document.complete_all_loads();
        log::info!("Reported {} linked script(s) as loaded.", completed);
        session
            .scripts_ready()
            .await
            .context("The render session did not become ready")?;
    }

    Ok(RunReport {
        page_id: rendered.page_id.clone(),
        title: rendered.title.clone(),
        session: rendered.session.as_ref().map(SessionReport::from),
        signals: signals
            .try_iter()
            .map(|signal| signal.event_name().to_string())
            .collect(),
        document: document.snapshot(),
    })
}
