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

//! Asset activation: filtering, the two script waves and their signals.
//!
//! A render session moves through `Pending → LinkedScriptsReady →
//! ScriptsReady`. Styles and linked scripts are inserted synchronously by
//! [`WaveOrchestrator::activate`]; inline scripts wait for the linked wave in
//! a Tokio task. Both transitions are announced on the signal bus before the
//! session phase changes.

mod orchestrator;
mod session;

pub use orchestrator::WaveOrchestrator;
pub use session::{SessionHandle, SessionState};
