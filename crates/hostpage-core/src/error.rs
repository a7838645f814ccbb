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

//! Error types shared across the hosted page crates.

use crate::document::NodeId;
use crate::session::WaveKind;
use thiserror::Error;

/// Errors raised by a [`Document`](crate::Document) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The node handle does not belong to the document.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// The anchor of an insert-before is not a child of the parent.
    #[error("node {anchor} is not a child of {parent}")]
    NotAChild {
        /// The parent the insertion targeted.
        parent: NodeId,
        /// The anchor that was expected under it.
        anchor: NodeId,
    },

    /// The host already owns an isolated subtree.
    #[error("node {0} already has a shadow root")]
    ShadowAlreadyAttached(NodeId),

    /// A load callback was already registered for the node.
    #[error("node {0} already has a load callback")]
    LoadCallbackTaken(NodeId),

    /// Any other failure of the backing document.
    #[error("document backend failure: {0}")]
    Backend(String),
}

/// Errors raised while obtaining a page definition.
#[derive(Debug, Error)]
pub enum PageError {
    /// The options do not identify a page.
    #[error("invalid hosted page options: {0}")]
    InvalidOptions(String),

    /// The page could not be fetched.
    #[error("failed to fetch page from {location}")]
    Fetch {
        /// URL or path the page was requested from.
        location: String,
        /// Underlying transport error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The page service answered with a non-success status.
    #[error("page service answered {status} for {location}")]
    Status {
        /// URL the page was requested from.
        location: String,
        /// HTTP status code.
        status: u16,
    },

    /// The payload is not a valid page definition.
    #[error("malformed page definition from {location}")]
    Decode {
        /// URL or path the page was requested from.
        location: String,
        /// Underlying decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// `configure` was called before the component was mounted.
    #[error("the hosted page is not mounted into a document")]
    NotMounted,

    /// The page markup could not be rendered.
    #[error("failed to render the page")]
    Render(#[from] DocumentError),

    /// The page assets could not be activated.
    #[error("failed to activate the page assets")]
    Activation(#[from] ActivationError),
}

/// Reasons a render session cannot reach its ready state.
///
/// Cloneable so it can be broadcast to every waiter of a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivationError {
    /// A linked asset reported a failed load; its wave will never signal.
    #[error("asset '{name}' failed to load: {reason}")]
    AssetLoadFailed {
        /// Name of the asset.
        name: String,
        /// Reason reported by the document.
        reason: String,
    },

    /// A wave did not signal within the configured timeout.
    #[error("{wave} did not complete within {timeout_ms} ms")]
    TimedOut {
        /// The starved wave.
        wave: WaveKind,
        /// The configured timeout.
        timeout_ms: u64,
    },

    /// The document rejected an asset insertion.
    #[error("asset injection failed: {0}")]
    Document(#[from] DocumentError),

    /// Activation needs an async runtime to drive the deferred wave.
    #[error("no async runtime available to drive the inline script wave")]
    NoRuntime,

    /// Every handle to the session state was dropped before it completed.
    #[error("the render session was dropped before completing")]
    SessionDropped,
}
