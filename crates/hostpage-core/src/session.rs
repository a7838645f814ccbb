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

//! Identity and lifecycle vocabulary of a render session.

use crate::error::ActivationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of one render session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a fresh, random session id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The tracked waves of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaveKind {
    /// Scripts loaded from a URL.
    LinkedScripts,
    /// Scripts carrying literal content, injected after the linked wave.
    InlineScripts,
}

impl fmt::Display for WaveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaveKind::LinkedScripts => write!(f, "linked script wave"),
            WaveKind::InlineScripts => write!(f, "inline script wave"),
        }
    }
}

/// Lifecycle of a render session.
///
/// `Pending → LinkedScriptsReady → ScriptsReady`, or `Failed` from any
/// non-terminal phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the linked scripts.
    Pending,
    /// Every linked script loaded; inline scripts are being injected.
    LinkedScriptsReady,
    /// Every inline script was injected.
    ScriptsReady,
    /// The session can no longer become ready.
    Failed(ActivationError),
}

impl SessionPhase {
    /// Returns `true` once the session reached (or went past) `wave`'s signal.
    pub fn has_signaled(&self, wave: WaveKind) -> bool {
        match (self, wave) {
            (SessionPhase::LinkedScriptsReady, WaveKind::LinkedScripts) => true,
            (SessionPhase::ScriptsReady, _) => true,
            _ => false,
        }
    }

    /// Returns `true` if no further transition can happen.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::ScriptsReady | SessionPhase::Failed(_))
    }
}
