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

use super::{Document, NodeId};
use crate::error::DocumentError;
use serde::{Deserialize, Serialize};

/// Whether the hosted page lives in its own isolated subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Isolation {
    /// Assets go to the shared document head.
    #[default]
    Shared,
    /// Assets go into the isolated root, before the page container.
    Isolated,
}

impl Isolation {
    /// Maps the host's `attachShadow` flag.
    pub fn from_flag(isolate: bool) -> Self {
        if isolate {
            Isolation::Isolated
        } else {
            Isolation::Shared
        }
    }
}

/// Where a new asset node is physically inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionPoint {
    /// Insert into `root`, right before `anchor`.
    Before {
        /// The isolated root.
        root: NodeId,
        /// The page container.
        anchor: NodeId,
    },
    /// Append to the shared document head.
    DocumentHead(NodeId),
}

impl InsertionPoint {
    /// Inserts `node` at this point.
    pub fn insert(&self, document: &dyn Document, node: NodeId) -> Result<(), DocumentError> {
        match *self {
            InsertionPoint::Before { root, anchor } => document.insert_before(root, node, anchor),
            InsertionPoint::DocumentHead(head) => document.append_child(head, node),
        }
    }
}

/// The injection policy of one render session.
///
/// Resolved once when the session is created; every insertion of the session
/// goes through the same [`InsertionPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectionTarget {
    isolation: Isolation,
    root: NodeId,
    container: NodeId,
    point: InsertionPoint,
}

impl InjectionTarget {
    /// Resolves the insertion point for a mounted page.
    ///
    /// `root` is the node the page container was mounted into (the isolated
    /// root when isolation is on), `container` is the page container itself.
    pub fn resolve(
        document: &dyn Document,
        isolation: Isolation,
        root: NodeId,
        container: NodeId,
    ) -> Self {
        let point = match isolation {
            Isolation::Isolated => InsertionPoint::Before {
                root,
                anchor: container,
            },
            Isolation::Shared => InsertionPoint::DocumentHead(document.head()),
        };
        log::debug!("Injection target resolved: {:?} -> {:?}", isolation, point);
        Self {
            isolation,
            root,
            container,
            point,
        }
    }

    /// Inserts `node` at the resolved insertion point.
    pub fn insert(&self, document: &dyn Document, node: NodeId) -> Result<(), DocumentError> {
        log::trace!("Inserting node {} at {:?}.", node, self.point);
        self.point.insert(document, node)
    }

    /// The isolation policy this target was resolved with.
    pub fn isolation(&self) -> Isolation {
        self.isolation
    }

    /// The root the page container lives in.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The page container receiving the page markup.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// The resolved insertion point.
    pub fn point(&self) -> InsertionPoint {
        self.point
    }
}
