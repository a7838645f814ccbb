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

use hostpage_core::asset::LinkedAsset;
use hostpage_core::document::LoadOutcome;
use hostpage_core::lane::{Lane, LaneKind};
use hostpage_core::{ActivationConfig, Document, DocumentError, ElementSpec, InjectionTarget, NodeId};
use std::sync::Arc;

/// Receives the settlement of every linked script of a wave.
///
/// Each script reports at most once: the underlying callback is one-shot.
pub trait LoadObserver: Send + Sync + 'static {
    /// Called when `asset` finished loading or failed.
    fn settled(&self, asset: &LinkedAsset, outcome: LoadOutcome);
}

/// First wave: inserts linked scripts immediately and tracks their loads.
#[derive(Debug, Clone)]
pub struct LinkedScriptLane {
    primary_script_name: String,
    primary_script_class: String,
}

impl Lane for LinkedScriptLane {
    fn strategy_name(&self) -> &'static str {
        "OrderedLinkedScripts"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::LinkedScript
    }
}

impl LinkedScriptLane {
    /// Creates a lane marking the script named `primary_script_name` with `primary_script_class`.
    pub fn new(primary_script_name: impl Into<String>, primary_script_class: impl Into<String>) -> Self {
        Self {
            primary_script_name: primary_script_name.into(),
            primary_script_class: primary_script_class.into(),
        }
    }

    /// Creates a lane from the activation configuration.
    pub fn from_config(config: &ActivationConfig) -> Self {
        Self::new(
            config.primary_script_name.as_str(),
            config.primary_script_class.as_str(),
        )
    }

    /// Builds the element describing a linked script.
    ///
    /// Scripts keep `async = false` so they execute in insertion order.
    pub fn element_for(&self, asset: &LinkedAsset) -> ElementSpec {
        let spec = ElementSpec::linked_script(asset.url.as_str());
        if asset.name == self.primary_script_name {
            spec.with_class(self.primary_script_class.as_str())
        } else {
            spec
        }
    }

    /// Inserts every script and registers its load callback.
    ///
    /// The callback is registered before the node is inserted. Completion
    /// order is up to the document; `observer` only learns which asset settled.
    ///
    /// ## Returns
    /// The inserted nodes, in insertion order.
    pub fn inject(
        &self,
        document: &dyn Document,
        target: &InjectionTarget,
        scripts: &[LinkedAsset],
        observer: Arc<dyn LoadObserver>,
    ) -> Result<Vec<NodeId>, DocumentError> {
        let mut nodes = Vec::with_capacity(scripts.len());
        for script in scripts {
            let node = document.create_element(&self.element_for(script))?;

            let observer = Arc::clone(&observer);
            let asset = script.clone();
            document.on_load(
                node,
                Box::new(move |outcome| observer.settled(&asset, outcome)),
            )?;

            target.insert(document, node)?;
            log::trace!("{}: inserted '{}' as {}.", self.lane_kind(), script.name, node);
            nodes.push(node);
        }
        log::debug!(
            "{}: {} linked script(s) injected.",
            self.strategy_name(),
            nodes.len()
        );
        Ok(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostpage_core::Isolation;
    use hostpage_infra::MemoryDocument;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<(String, LoadOutcome)>>);

    impl LoadObserver for Recorder {
        fn settled(&self, asset: &LinkedAsset, outcome: LoadOutcome) {
            self.0.lock().unwrap().push((asset.name.clone(), outcome));
        }
    }

    fn linked(name: &str) -> LinkedAsset {
        LinkedAsset {
            name: name.to_string(),
            url: format!("https://static/{name}.js"),
        }
    }

    fn isolated_target(doc: &MemoryDocument) -> InjectionTarget {
        let host = doc.append_host_element("hosted-search-page").unwrap();
        let root = doc.attach_shadow(host).unwrap();
        let container = doc.create_element(&ElementSpec::container("hostedSearchPage")).unwrap();
        doc.append_child(root, container).unwrap();
        InjectionTarget::resolve(doc, Isolation::Isolated, root, container)
    }

    #[test]
    fn scripts_are_inserted_before_the_container_in_order() {
        let doc = MemoryDocument::new();
        let target = isolated_target(&doc);
        let lane = LinkedScriptLane::from_config(&ActivationConfig::default());
        let recorder = Arc::new(Recorder::default());

        let nodes = lane
            .inject(&doc, &target, &[linked("CoveoSearchUI"), linked("Templates")], recorder)
            .unwrap();

        assert_eq!(
            doc.children(target.root()),
            vec![nodes[0], nodes[1], target.container()]
        );
        let primary = doc.element(nodes[0]).unwrap();
        assert_eq!(primary.classes, vec!["coveo-script".to_string()]);
        assert_eq!(primary.async_load, Some(false));
        assert!(doc.element(nodes[1]).unwrap().classes.is_empty());
    }

    #[test]
    fn loads_are_reported_in_completion_order() {
        let doc = MemoryDocument::new();
        let target = isolated_target(&doc);
        let lane = LinkedScriptLane::new("CoveoSearchUI", "coveo-script");
        let recorder = Arc::new(Recorder::default());

        let nodes = lane
            .inject(
                &doc,
                &target,
                &[linked("A"), linked("B")],
                Arc::clone(&recorder) as Arc<dyn LoadObserver>,
            )
            .unwrap();

        assert!(doc.complete_load(nodes[1]));
        assert!(doc.fail_load(nodes[0], "404"));
        assert!(!doc.complete_load(nodes[1]));

        let settled = recorder.0.lock().unwrap().clone();
        assert_eq!(
            settled,
            vec![
                ("B".to_string(), LoadOutcome::Loaded),
                ("A".to_string(), LoadOutcome::Failed("404".to_string())),
            ]
        );
    }
}
