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

//! # Lane Abstraction
//!
//! A **Lane** is a processing strategy for one kind of asset. The orchestrator
//! composes one lane per kind (styles, linked scripts, inline scripts) and
//! drives them in a fixed order.
//!
//! `Lane` only carries identity and classification; the domain-specific
//! injection methods live on the concrete lanes in `hostpage-lanes`.

use std::fmt;

/// Classification of lane types, used for logging and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneKind {
    /// Fire-and-forget stylesheet injection.
    Style,
    /// Linked scripts, tracked until loaded (first wave).
    LinkedScript,
    /// Inline scripts, deferred until the first wave signals (second wave).
    InlineScript,
}

impl fmt::Display for LaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneKind::Style => write!(f, "Style"),
            LaneKind::LinkedScript => write!(f, "LinkedScript"),
            LaneKind::InlineScript => write!(f, "InlineScript"),
        }
    }
}

/// The common interface shared by all lanes.
pub trait Lane: Send + Sync {
    /// Human readable name of the strategy, e.g. `"DeferredInlineScripts"`.
    fn strategy_name(&self) -> &'static str;

    /// The kind of asset this lane handles.
    fn lane_kind(&self) -> LaneKind;
}
