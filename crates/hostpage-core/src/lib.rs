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

//! # Hostpage Core
//!
//! Foundational crate containing the asset model, document contracts, and the
//! completion signal bus shared by every other crate of the hosted page stack.
//!
//! Nothing in here knows how a page is fetched or how a document is actually
//! mutated; those concerns live behind the [`PageSource`] and [`Document`]
//! traits and are implemented in higher-level crates.

#![warn(missing_docs)]

pub mod asset;
pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod lane;
pub mod session;
pub mod source;

pub use config::{ActivationConfig, ConfigureRequest, HostedPageOptions, PageRequest};
pub use document::{Document, ElementSpec, InjectionTarget, InsertionPoint, Isolation, NodeId};
pub use error::{ActivationError, DocumentError, PageError};
pub use session::SessionId;
pub use source::PageSource;
