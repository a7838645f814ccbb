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

use hostpage_agents::SessionHandle;
use hostpage_core::session::SessionPhase;
use hostpage_infra::NodeSnapshot;
use serde::Serialize;

/// Counters of the render session, as printed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    pub id: String,
    pub phase: String,
    pub scripts_loaded: usize,
    pub linked_total: usize,
    pub inline_scripts_injected: usize,
    pub inline_total: usize,
    pub error: Option<String>,
}

impl From<&SessionHandle> for SessionReport {
    fn from(session: &SessionHandle) -> Self {
        let state = session.state();
        let (phase, error) = match &state.phase {
            SessionPhase::Pending => ("pending", None),
            SessionPhase::LinkedScriptsReady => ("linked_scripts_ready", None),
            SessionPhase::ScriptsReady => ("scripts_ready", None),
            SessionPhase::Failed(error) => ("failed", Some(error.to_string())),
        };
        Self {
            id: session.id().to_string(),
            phase: phase.to_string(),
            scripts_loaded: state.scripts_loaded,
            linked_total: state.linked_total,
            inline_scripts_injected: state.inline_scripts_injected,
            inline_total: state.inline_total,
            error,
        }
    }
}

/// Everything the runtime prints once the page is rendered.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub page_id: String,
    pub title: String,
    pub session: Option<SessionReport>,
    /// Signals received on the document bus, in publication order.
    pub signals: Vec<String>,
    pub document: NodeSnapshot,
}
