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

//! Abstract interface over the host document.
//!
//! The orchestrator never touches a concrete DOM. It describes the nodes it
//! needs with [`ElementSpec`], hands them to a [`Document`] implementation,
//! and learns about external resource loads through one-shot
//! [`LoadCallback`]s registered on the created nodes.

mod target;

pub use self::target::{InjectionTarget, InsertionPoint, Isolation};

use crate::error::DocumentError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque handle to a node owned by a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of an external resource load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The resource finished loading.
    Loaded,
    /// The resource could not be loaded.
    Failed(String),
}

/// Callback invoked once when the resource behind a node settles.
///
/// Being `FnOnce`, a callback can never report the same node twice.
pub type LoadCallback = Box<dyn FnOnce(LoadOutcome) + Send + 'static>;

/// Description of an element to create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSpec {
    /// Tag name, e.g. `script`.
    pub tag: String,
    /// Attributes, in a deterministic order.
    pub attributes: BTreeMap<String, String>,
    /// Class list.
    pub classes: Vec<String>,
    /// Text content appended into the element.
    pub text: Option<String>,
    /// Script `async` flag. `Some(false)` keeps execution order across linked scripts.
    pub async_load: Option<bool>,
}

impl ElementSpec {
    /// Creates a bare element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Sets an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Adds a class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// `<link rel="stylesheet" href=.. id=..>`
    pub fn stylesheet(id: impl Into<String>, href: impl Into<String>) -> Self {
        Self::new("link")
            .with_attribute("rel", "stylesheet")
            .with_attribute("href", href)
            .with_attribute("id", id)
    }

    /// `<style>` carrying literal CSS.
    pub fn inline_style(content: impl Into<String>) -> Self {
        Self::new("style").with_text(content)
    }

    /// `<script type="text/javascript" src=..>` loaded in insertion order.
    pub fn linked_script(src: impl Into<String>) -> Self {
        let mut spec = Self::new("script")
            .with_attribute("type", "text/javascript")
            .with_attribute("src", src);
        spec.async_load = Some(false);
        spec
    }

    /// `<script type="text/javascript">` carrying literal code.
    pub fn inline_script(content: impl Into<String>) -> Self {
        Self::new("script")
            .with_attribute("type", "text/javascript")
            .with_text(content)
    }

    /// `<div id=..>`
    pub fn container(id: impl Into<String>) -> Self {
        Self::new("div").with_attribute("id", id)
    }

    /// Returns the value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// The host document the hosted page is rendered into.
///
/// Implementations must be shareable across threads: load callbacks and the
/// second activation stage may run on a different thread than the one that
/// created the session.
pub trait Document: Send + Sync {
    /// Returns the shared document head.
    fn head(&self) -> NodeId;

    /// Creates a detached element.
    fn create_element(&self, spec: &ElementSpec) -> Result<NodeId, DocumentError>;

    /// Appends `child` as the last child of `parent`.
    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DocumentError>;

    /// Inserts `child` into `parent` right before `anchor`.
    fn insert_before(
        &self,
        parent: NodeId,
        child: NodeId,
        anchor: NodeId,
    ) -> Result<(), DocumentError>;

    /// Attaches an isolated subtree (shadow root) to `host` and returns its root.
    fn attach_shadow(&self, host: NodeId) -> Result<NodeId, DocumentError>;

    /// Replaces the content of `node` with raw markup.
    fn set_inner_html(&self, node: NodeId, html: &str) -> Result<(), DocumentError>;

    /// Registers a one-shot callback fired when the resource behind `node` settles.
    ///
    /// Must be called before the node is inserted so a synchronous load cannot
    /// be missed.
    fn on_load(&self, node: NodeId, callback: LoadCallback) -> Result<(), DocumentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linked_script_keeps_execution_order() {
        let spec = ElementSpec::linked_script("https://static/a.js");
        assert_eq!(spec.tag, "script");
        assert_eq!(spec.attribute("src"), Some("https://static/a.js"));
        assert_eq!(spec.attribute("type"), Some("text/javascript"));
        assert_eq!(spec.async_load, Some(false));
    }

    #[test]
    fn stylesheet_is_tagged_with_its_name() {
        let spec = ElementSpec::stylesheet("Theme", "https://static/theme.css");
        assert_eq!(spec.attribute("rel"), Some("stylesheet"));
        assert_eq!(spec.attribute("id"), Some("Theme"));
    }
}
