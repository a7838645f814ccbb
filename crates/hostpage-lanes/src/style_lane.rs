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

//! Fire-and-forget stylesheet injection.

use hostpage_core::asset::{AssetKind, ClassifiedAsset};
use hostpage_core::lane::{Lane, LaneKind};
use hostpage_core::{Document, DocumentError, ElementSpec, InjectionTarget, NodeId};

/// Injects style assets synchronously, in input order, without tracking them.
///
/// Linked styles become `<link rel="stylesheet">` tagged with the asset name,
/// inline styles become `<style>` nodes carrying the literal CSS.
#[derive(Debug, Default, Clone, Copy)]
pub struct StyleLane;

impl Lane for StyleLane {
    fn strategy_name(&self) -> &'static str {
        "ImmediateStyles"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Style
    }
}

impl StyleLane {
    /// Creates the lane.
    pub fn new() -> Self {
        Self
    }

    /// Builds the element describing a style asset.
    pub fn element_for(asset: &ClassifiedAsset) -> ElementSpec {
        match &asset.kind {
            AssetKind::Linked { url } => ElementSpec::stylesheet(asset.name.as_str(), url.as_str()),
            AssetKind::Inline { content } => ElementSpec::inline_style(content.as_str()),
        }
    }

    /// Creates and inserts one node per style.
    ///
    /// ## Returns
    /// The inserted nodes, in insertion order.
    pub fn inject(
        &self,
        document: &dyn Document,
        target: &InjectionTarget,
        styles: &[ClassifiedAsset],
    ) -> Result<Vec<NodeId>, DocumentError> {
        let mut nodes = Vec::with_capacity(styles.len());
        for style in styles {
            let node = document.create_element(&Self::element_for(style))?;
            target.insert(document, node)?;
            log::trace!("{}: inserted style '{}' as {}.", self.lane_kind(), style.name, node);
            nodes.push(node);
        }
        log::debug!("{}: {} style(s) injected.", self.strategy_name(), nodes.len());
        Ok(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostpage_core::asset::{AssetDescriptor, ExclusionFilter};
    use hostpage_core::Isolation;
    use hostpage_infra::MemoryDocument;

    #[test]
    fn styles_land_in_head_in_order() {
        let doc = MemoryDocument::new();
        let host = doc.append_host_element("hosted-search-page").unwrap();
        let target = InjectionTarget::resolve(&doc, Isolation::Shared, host, host);

        let styles = ExclusionFilter::default().apply(&[
            AssetDescriptor::linked("Theme", "https://static/theme.css"),
            AssetDescriptor::linked("InterfaceEditorStyles", "https://static/editor.css"),
            AssetDescriptor::inline("Overrides", ".coveo { color: red }"),
        ]);

        let nodes = StyleLane::new().inject(&doc, &target, &styles).unwrap();

        assert_eq!(doc.children(doc.head()), nodes);
        let link = doc.element(nodes[0]).unwrap();
        assert_eq!(link.tag, "link");
        assert_eq!(link.attribute("id"), Some("Theme"));
        assert_eq!(link.attribute("href"), Some("https://static/theme.css"));
        let style = doc.element(nodes[1]).unwrap();
        assert_eq!(style.tag, "style");
        assert_eq!(style.text.as_deref(), Some(".coveo { color: red }"));
    }

    #[test]
    fn styles_are_not_tracked() {
        let doc = MemoryDocument::new();
        let host = doc.append_host_element("hosted-search-page").unwrap();
        let target = InjectionTarget::resolve(&doc, Isolation::Shared, host, host);
        let styles = ExclusionFilter::default()
            .apply(&[AssetDescriptor::linked("Theme", "https://static/theme.css")]);

        StyleLane::new().inject(&doc, &target, &styles).unwrap();

        assert!(doc.pending_loads().is_empty());
    }
}
