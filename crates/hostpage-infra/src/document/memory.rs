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

use super::snapshot::{NodeSnapshot, SnapshotKind};
use hostpage_core::document::{LoadCallback, LoadOutcome};
use hostpage_core::{Document, DocumentError, ElementSpec, NodeId};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone)]
enum NodeKind {
    Document,
    Element(ElementSpec),
    ShadowRoot { host: NodeId },
    Markup(String),
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    shadow_root: Option<NodeId>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            shadow_root: None,
        }
    }
}

struct Tree {
    next_id: u64,
    nodes: HashMap<NodeId, Node>,
    document: NodeId,
    head: NodeId,
    body: NodeId,
    load_callbacks: BTreeMap<NodeId, LoadCallback>,
    insertions: Vec<NodeId>,
}

impl Tree {
    fn new() -> Self {
        let mut tree = Self {
            next_id: 0,
            nodes: HashMap::new(),
            document: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            load_callbacks: BTreeMap::new(),
            insertions: Vec::new(),
        };
        tree.document = tree.alloc(NodeKind::Document);
        let html = tree.alloc(NodeKind::Element(ElementSpec::new("html")));
        tree.head = tree.alloc(NodeKind::Element(ElementSpec::new("head")));
        tree.body = tree.alloc(NodeKind::Element(ElementSpec::new("body")));
        tree.link(tree.document, html);
        tree.link(html, tree.head);
        tree.link(html, tree.body);
        tree.insertions.clear();
        tree
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(kind));
        id
    }

    /// Appends without validation; only used while building the skeleton.
    fn link(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    fn node(&self, id: NodeId) -> Result<&Node, DocumentError> {
        self.nodes.get(&id).ok_or(DocumentError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DocumentError> {
        self.nodes.get_mut(&id).ok_or(DocumentError::UnknownNode(id))
    }

    fn detach(&mut self, child: NodeId) -> Result<(), DocumentError> {
        if let Some(parent) = self.node_mut(child)?.parent.take() {
            self.node_mut(parent)?.children.retain(|c| *c != child);
        }
        Ok(())
    }

    fn attach(
        &mut self,
        parent: NodeId,
        child: NodeId,
        anchor: Option<NodeId>,
    ) -> Result<(), DocumentError> {
        self.node(parent)?;
        self.node(child)?;
        if let Some(anchor) = anchor {
            if !self.node(parent)?.children.contains(&anchor) {
                return Err(DocumentError::NotAChild { parent, anchor });
            }
        }

        self.detach(child)?;
        let siblings = &mut self.node_mut(parent)?.children;
        let index = anchor
            .and_then(|anchor| siblings.iter().position(|c| *c == anchor))
            .unwrap_or(siblings.len());
        siblings.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        self.insertions.push(child);
        Ok(())
    }

    fn snapshot(&self, id: NodeId) -> Option<NodeSnapshot> {
        let node = self.nodes.get(&id)?;
        let kind = match &node.kind {
            NodeKind::Document => SnapshotKind::Document,
            NodeKind::Element(spec) => SnapshotKind::Element {
                tag: spec.tag.clone(),
                attributes: spec.attributes.clone(),
                classes: spec.classes.clone(),
                text: spec.text.clone(),
                async_load: spec.async_load,
            },
            NodeKind::ShadowRoot { .. } => SnapshotKind::ShadowRoot,
            NodeKind::Markup(html) => SnapshotKind::Markup { html: html.clone() },
        };
        Some(NodeSnapshot {
            node: id,
            kind,
            pending_load: self.load_callbacks.contains_key(&id),
            shadow_root: node
                .shadow_root
                .and_then(|root| self.snapshot(root))
                .map(Box::new),
            children: node
                .children
                .iter()
                .filter_map(|child| self.snapshot(*child))
                .collect(),
        })
    }

    fn collect_elements(&self, id: NodeId, tag: &str, found: &mut Vec<NodeId>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if let NodeKind::Element(spec) = &node.kind {
            if spec.tag == tag {
                found.push(id);
            }
        }
        if let Some(root) = node.shadow_root {
            self.collect_elements(root, tag, found);
        }
        for child in &node.children {
            self.collect_elements(*child, tag, found);
        }
    }
}

/// A headless, in-memory document.
///
/// Models just enough of a DOM to host a page: a head and a body, elements
/// with attributes and text, isolated subtrees, raw markup containers and
/// pending resource loads. Loads never settle on their own: the embedder (or
/// a test) drives them through [`complete_load`](Self::complete_load) and
/// [`fail_load`](Self::fail_load), in any order.
pub struct MemoryDocument {
    tree: Mutex<Tree>,
}

impl MemoryDocument {
    /// Creates a document containing `<html><head></head><body></body></html>`.
    pub fn new() -> Self {
        Self {
            tree: Mutex::new(Tree::new()),
        }
    }

    fn tree(&self) -> MutexGuard<'_, Tree> {
        self.tree.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The `<body>` element.
    pub fn body(&self) -> NodeId {
        self.tree().body
    }

    /// Creates an element named `tag` and appends it to the body.
    pub fn append_host_element(&self, tag: &str) -> Result<NodeId, DocumentError> {
        let body = self.body();
        let host = self.create_element(&ElementSpec::new(tag))?;
        self.append_child(body, host)?;
        Ok(host)
    }

    /// The description of an element node.
    pub fn element(&self, node: NodeId) -> Option<ElementSpec> {
        match &self.tree().nodes.get(&node)?.kind {
            NodeKind::Element(spec) => Some(spec.clone()),
            _ => None,
        }
    }

    /// The children of a node, in document order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree()
            .nodes
            .get(&node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// The parent of a node, if attached.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree().nodes.get(&node)?.parent
    }

    /// The isolated root attached to `host`.
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.tree().nodes.get(&host)?.shadow_root
    }

    /// The host of an isolated root.
    pub fn shadow_host(&self, root: NodeId) -> Option<NodeId> {
        match self.tree().nodes.get(&root)?.kind {
            NodeKind::ShadowRoot { host } => Some(host),
            _ => None,
        }
    }

    /// The raw markup set on `node` through [`Document::set_inner_html`].
    pub fn inner_html(&self, node: NodeId) -> Option<String> {
        let tree = self.tree();
        tree.nodes
            .get(&node)?
            .children
            .iter()
            .find_map(|child| match &tree.nodes.get(child)?.kind {
                NodeKind::Markup(html) => Some(html.clone()),
                _ => None,
            })
    }

    /// Every element named `tag` under `root`, isolated subtrees included, in tree order.
    pub fn elements_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.tree().collect_elements(root, tag, &mut found);
        found
    }

    /// Every element named `tag` in the document.
    pub fn all_elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        let document = self.tree().document;
        self.elements_by_tag(document, tag)
    }

    /// Every node inserted so far, in insertion order.
    pub fn insertions(&self) -> Vec<NodeId> {
        self.tree().insertions.clone()
    }

    /// Nodes whose load callback has not fired yet, in creation order.
    pub fn pending_loads(&self) -> Vec<NodeId> {
        self.tree().load_callbacks.keys().copied().collect()
    }

    /// Settles the load of `node` successfully.
    ///
    /// ## Returns
    /// `false` if no callback was pending for the node.
    pub fn complete_load(&self, node: NodeId) -> bool {
        self.settle(node, LoadOutcome::Loaded)
    }

    /// Settles the load of `node` with a failure.
    pub fn fail_load(&self, node: NodeId, reason: impl Into<String>) -> bool {
        self.settle(node, LoadOutcome::Failed(reason.into()))
    }

    /// Completes every pending load, in creation order.
    ///
    /// ## Returns
    /// The number of callbacks fired.
    pub fn complete_all_loads(&self) -> usize {
        let mut fired = 0;
        loop {
            let pending = self.pending_loads();
            if pending.is_empty() {
                return fired;
            }
            fired += pending
                .into_iter()
                .filter(|node| self.complete_load(*node))
                .count();
        }
    }

    fn settle(&self, node: NodeId, outcome: LoadOutcome) -> bool {
        // The callback runs without the lock so it may touch the document.
        let callback = self.tree().load_callbacks.remove(&node);
        match callback {
            Some(callback) => {
                log::trace!("Load of {} settled: {:?}", node, outcome);
                callback(outcome);
                true
            }
            None => false,
        }
    }

    /// A serializable view of the whole document.
    pub fn snapshot(&self) -> NodeSnapshot {
        let tree = self.tree();
        let document = tree.document;
        tree.snapshot(document).unwrap_or_else(|| NodeSnapshot {
            node: document,
            kind: SnapshotKind::Document,
            pending_load: false,
            shadow_root: None,
            children: Vec::new(),
        })
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tree = self.tree();
        f.debug_struct("MemoryDocument")
            .field("nodes", &tree.nodes.len())
            .field("pending_loads", &tree.load_callbacks.len())
            .finish()
    }
}

impl Document for MemoryDocument {
    fn head(&self) -> NodeId {
        self.tree().head
    }

    fn create_element(&self, spec: &ElementSpec) -> Result<NodeId, DocumentError> {
        Ok(self.tree().alloc(NodeKind::Element(spec.clone())))
    }

    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DocumentError> {
        self.tree().attach(parent, child, None)
    }

    fn insert_before(
        &self,
        parent: NodeId,
        child: NodeId,
        anchor: NodeId,
    ) -> Result<(), DocumentError> {
        self.tree().attach(parent, child, Some(anchor))
    }

    fn attach_shadow(&self, host: NodeId) -> Result<NodeId, DocumentError> {
        let mut tree = self.tree();
        if tree.node(host)?.shadow_root.is_some() {
            return Err(DocumentError::ShadowAlreadyAttached(host));
        }
        let root = tree.alloc(NodeKind::ShadowRoot { host });
        tree.node_mut(host)?.shadow_root = Some(root);
        Ok(root)
    }

    fn set_inner_html(&self, node: NodeId, html: &str) -> Result<(), DocumentError> {
        let mut tree = self.tree();
        let previous = std::mem::take(&mut tree.node_mut(node)?.children);
        for child in previous {
            tree.node_mut(child)?.parent = None;
        }
        let markup = tree.alloc(NodeKind::Markup(html.to_string()));
        tree.link(node, markup);
        Ok(())
    }

    fn on_load(&self, node: NodeId, callback: LoadCallback) -> Result<(), DocumentError> {
        let mut tree = self.tree();
        tree.node(node)?;
        if tree.load_callbacks.contains_key(&node) {
            return Err(DocumentError::LoadCallbackTaken(node));
        }
        tree.load_callbacks.insert(node, callback);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn skeleton_has_head_and_body() {
        let doc = MemoryDocument::new();
        assert_eq!(doc.element(doc.head()).unwrap().tag, "head");
        assert_eq!(doc.element(doc.body()).unwrap().tag, "body");
        assert!(doc.insertions().is_empty());
    }

    #[test]
    fn insert_before_respects_anchor() {
        let doc = MemoryDocument::new();
        let host = doc.append_host_element("hosted-search-page").unwrap();
        let a = doc.create_element(&ElementSpec::new("a")).unwrap();
        let b = doc.create_element(&ElementSpec::new("b")).unwrap();
        doc.append_child(host, a).unwrap();
        doc.insert_before(host, b, a).unwrap();

        assert_eq!(doc.children(host), vec![b, a]);
        assert_eq!(doc.parent(b), Some(host));
    }

    #[test]
    fn insert_before_foreign_anchor_fails() {
        let doc = MemoryDocument::new();
        let host = doc.append_host_element("div").unwrap();
        let stray = doc.create_element(&ElementSpec::new("span")).unwrap();
        let child = doc.create_element(&ElementSpec::new("p")).unwrap();

        assert_eq!(
            doc.insert_before(host, child, stray),
            Err(DocumentError::NotAChild {
                parent: host,
                anchor: stray
            })
        );
    }

    #[test]
    fn shadow_root_attaches_once() {
        let doc = MemoryDocument::new();
        let host = doc.append_host_element("hosted-search-page").unwrap();
        let root = doc.attach_shadow(host).unwrap();

        assert_eq!(doc.shadow_root(host), Some(root));
        assert_eq!(doc.shadow_host(root), Some(host));
        assert_eq!(
            doc.attach_shadow(host),
            Err(DocumentError::ShadowAlreadyAttached(host))
        );
    }

    #[test]
    fn inner_html_replaces_content() {
        let doc = MemoryDocument::new();
        let container = doc.append_host_element("div").unwrap();
        doc.set_inner_html(container, "<p>one</p>").unwrap();
        doc.set_inner_html(container, "<p>two</p>").unwrap();

        assert_eq!(doc.inner_html(container).as_deref(), Some("<p>two</p>"));
        assert_eq!(doc.children(container).len(), 1);
    }

    #[test]
    fn load_callbacks_fire_once() {
        let doc = MemoryDocument::new();
        let script = doc
            .create_element(&ElementSpec::linked_script("https://static/a.js"))
            .unwrap();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        doc.on_load(
            script,
            Box::new(move |outcome| {
                assert_eq!(outcome, LoadOutcome::Loaded);
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();

        assert_eq!(doc.pending_loads(), vec![script]);
        assert!(doc.complete_load(script));
        assert!(!doc.complete_load(script));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(doc.pending_loads().is_empty());
    }

    #[test]
    fn second_load_callback_is_rejected() {
        let doc = MemoryDocument::new();
        let script = doc
            .create_element(&ElementSpec::linked_script("https://static/a.js"))
            .unwrap();
        doc.on_load(script, Box::new(|_| {})).unwrap();
        assert_eq!(
            doc.on_load(script, Box::new(|_| {})),
            Err(DocumentError::LoadCallbackTaken(script))
        );
    }

    #[test]
    fn elements_by_tag_walks_isolated_subtrees() {
        let doc = MemoryDocument::new();
        let host = doc.append_host_element("hosted-search-page").unwrap();
        let root = doc.attach_shadow(host).unwrap();
        let script = doc.create_element(&ElementSpec::inline_script("x()")).unwrap();
        doc.append_child(root, script).unwrap();

        assert_eq!(doc.all_elements_by_tag("script"), vec![script]);
    }
}
