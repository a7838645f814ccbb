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

use hostpage_core::NodeId;
use serde::Serialize;
use std::collections::BTreeMap;

/// What a snapshot node is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SnapshotKind {
    /// The document node.
    Document,
    /// An element.
    Element {
        /// Tag name.
        tag: String,
        /// Attributes.
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
        /// Class list.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        classes: Vec<String>,
        /// Text content.
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        /// Script `async` flag.
        #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
        async_load: Option<bool>,
    },
    /// An isolated subtree root.
    ShadowRoot,
    /// Raw markup set through `set_inner_html`.
    Markup {
        /// The markup.
        html: String,
    },
}

/// A serializable copy of a node and its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    /// Handle of the node.
    pub node: NodeId,
    /// Kind and payload.
    #[serde(flatten)]
    pub kind: SnapshotKind,
    /// Whether a load callback is still waiting on this node.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub pending_load: bool,
    /// The isolated subtree attached to this node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_root: Option<Box<NodeSnapshot>>,
    /// Children in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    /// Returns the tag name if this is an element.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            SnapshotKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryDocument;
    use hostpage_core::{Document, ElementSpec};

    #[test]
    fn snapshot_serializes_to_json() {
        let doc = MemoryDocument::new();
        let script = doc
            .create_element(&ElementSpec::linked_script("https://static/a.js"))
            .unwrap();
        doc.on_load(script, Box::new(|_| {})).unwrap();
        doc.append_child(doc.head(), script).unwrap();

        let json = serde_json::to_value(doc.snapshot()).unwrap();
        let head = &json["children"][0]["children"][0];
        assert_eq!(head["tag"], "head");
        let script = &head["children"][0];
        assert_eq!(script["type"], "element");
        assert_eq!(script["attributes"]["src"], "https://static/a.js");
        assert_eq!(script["async"], false);
        assert_eq!(script["pending_load"], true);
    }
}
