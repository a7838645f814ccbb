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

use hostpage_core::{Document, DocumentError, ElementSpec, InjectionTarget, Isolation, NodeId};

/// Id of the element the page markup is rendered into.
pub const CONTAINER_ID: &str = "hostedSearchPage";

/// Where a hosted page lives in its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMount {
    host: NodeId,
    root: NodeId,
    container: NodeId,
    isolation: Isolation,
}

impl PageMount {
    /// Mounts the page container under `host`.
    ///
    /// With [`Isolation::Isolated`] the container goes into a shadow root
    /// attached to `host`, otherwise directly under `host`.
    pub fn attach(
        document: &dyn Document,
        host: NodeId,
        isolation: Isolation,
    ) -> Result<Self, DocumentError> {
        let root = match isolation {
            Isolation::Isolated => document.attach_shadow(host)?,
            Isolation::Shared => host,
        };
        let container = document.create_element(&ElementSpec::container(CONTAINER_ID))?;
        document.append_child(root, container)?;
        log::debug!(
            "Page container {} mounted under {} ({:?}).",
            container,
            root,
            isolation
        );
        Ok(Self {
            host,
            root,
            container,
            isolation,
        })
    }

    /// Resolves the injection target of a new render session.
    pub fn injection_target(&self, document: &dyn Document) -> InjectionTarget {
        InjectionTarget::resolve(document, self.isolation, self.root, self.container)
    }

    /// The host element.
    pub fn host(&self) -> NodeId {
        self.host
    }

    /// The shadow root when isolated, the host otherwise.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The page container.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// The isolation policy of the mount.
    pub fn isolation(&self) -> Isolation {
        self.isolation
    }
}
