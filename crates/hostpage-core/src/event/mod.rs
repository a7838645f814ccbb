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

//! Provides the completion signal bus.
//!
//! The [`SignalBus`] is a generic, thread-safe broadcast point: every
//! subscriber receives every published event, and `once` listeners remove
//! themselves after their first matching delivery.
//!
//! [`document_signals`] returns the process-wide bus on which render sessions
//! announce [`ScriptSignal`]s for listeners outside the orchestrator.

mod bus;
mod signal;

pub use self::bus::{BusEvent, SignalBus};
pub use self::signal::{document_signals, DocumentSignal, ScriptSignal};
