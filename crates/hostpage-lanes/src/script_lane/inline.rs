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

use hostpage_core::asset::InlineAsset;
use hostpage_core::lane::{Lane, LaneKind};
use hostpage_core::{Document, DocumentError, ElementSpec, InjectionTarget, NodeId};

/// Second wave: inserts inline scripts carrying their literal content.
///
/// The lane does not decide *when* it runs; the orchestrator calls it once
/// the linked script wave signaled.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineScriptLane;

impl Lane for InlineScriptLane {
    fn strategy_name(&self) -> &'static str {
        "DeferredInlineScripts"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::InlineScript
    }
}

impl InlineScriptLane {
    /// Creates the lane.
    pub fn new() -> Self {
        Self
    }

    /// Creates and inserts a single inline script.
    pub fn inject_one(
        &self,
        document: &dyn Document,
        target: &InjectionTarget,
        script: &InlineAsset,
    ) -> Result<NodeId, DocumentError> {
        let node = document.create_element(&ElementSpec::inline_script(script.content.as_str()))?;
        target.insert(document, node)?;
        log::trace!("{}: inserted '{}' as {}.", self.lane_kind(), script.name, node);
        Ok(node)
    }

    /// Inserts every script in order, calling `on_injected` after each insertion.
    ///
    /// Stops at the first document error; scripts already inserted stay in place.
    pub fn inject<F>(
        &self,
        document: &dyn Document,
        target: &InjectionTarget,
        scripts: &[InlineAsset],
        mut on_injected: F,
    ) -> Result<Vec<NodeId>, DocumentError>
    where
        F: FnMut(&InlineAsset, NodeId),
    {
        let mut nodes = Vec::with_capacity(scripts.len());
        for script in scripts {
            let node = self.inject_one(document, target, script)?;
            on_injected(script, node);
            nodes.push(node);
        }
        Ok(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostpage_core::Isolation;
    use hostpage_infra::MemoryDocument;

    #[test]
    fn inline_scripts_carry_their_content() {
        let doc = MemoryDocument::new();
        let host = doc.append_host_element("hosted-search-page").unwrap();
        let target = InjectionTarget::resolve(&doc, Isolation::Shared, host, host);
        let scripts = vec![
            InlineAsset {
                name: "Init".into(),
                content: "Coveo.init(document.body)".into(),
            },
            InlineAsset {
                name: "Analytics".into(),
                content: "track()".into(),
            },
        ];

        let mut seen = Vec::new();
        let nodes = InlineScriptLane::new()
            .inject(&doc, &target, &scripts, |asset, _| seen.push(asset.name.clone()))
            .unwrap();

        assert_eq!(seen, ["Init", "Analytics"]);
        assert_eq!(doc.children(doc.head()), nodes);
        let first = doc.element(nodes[0]).unwrap();
        assert_eq!(first.attribute("type"), Some("text/javascript"));
        assert_eq!(first.attribute("src"), None);
        assert_eq!(first.text.as_deref(), Some("Coveo.init(document.body)"));
    }
}
