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

//! # Hostpage Agents
//!
//! The agents drive the lanes of `hostpage-lanes`:
//! - [`activation_agent`] owns the two-wave orchestration of a page's assets
//!   and the render sessions it produces.
//! - [`page_agent`] is the hosted page component itself: it mounts the page
//!   container, fetches the page definition, renders its markup and hands
//!   the assets to the orchestrator.

#![warn(missing_docs)]

pub mod activation_agent;
pub mod page_agent;

pub use activation_agent::{SessionHandle, SessionState, WaveOrchestrator};
pub use page_agent::{HostedPageAgent, PageMount, RenderedPage, CONTAINER_ID};
