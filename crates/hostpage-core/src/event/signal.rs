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

use super::bus::{BusEvent, SignalBus};
use crate::session::SessionId;
use std::sync::{Arc, OnceLock};

/// Document-level completion events. Their names are part of the public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptSignal {
    /// Every linked script of the session finished loading.
    ExternalScriptsLoaded,
    /// Every inline script of the session was injected.
    ScriptsLoaded,
}

impl ScriptSignal {
    /// The event name seen by external listeners.
    pub const fn event_name(self) -> &'static str {
        match self {
            ScriptSignal::ExternalScriptsLoaded => "CoveoExternalScriptsLoaded",
            ScriptSignal::ScriptsLoaded => "CoveoScriptsLoaded",
        }
    }
}

/// A [`ScriptSignal`] raised by a specific render session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentSignal {
    /// The session that completed the wave.
    pub session: SessionId,
    /// The completed wave.
    pub signal: ScriptSignal,
}

impl BusEvent for DocumentSignal {
    fn event_name(&self) -> &str {
        self.signal.event_name()
    }
}

static DOCUMENT_SIGNALS: OnceLock<Arc<SignalBus<DocumentSignal>>> = OnceLock::new();

/// Returns the process-wide bus carrying [`DocumentSignal`]s.
pub fn document_signals() -> Arc<SignalBus<DocumentSignal>> {
    Arc::clone(DOCUMENT_SIGNALS.get_or_init(|| Arc::new(SignalBus::new())))
}
