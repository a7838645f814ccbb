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

use super::descriptor::{AssetDescriptor, AssetSource};

/// Name fragment identifying assets that only make sense inside the page editor.
pub const DEFAULT_EXCLUSION_PATTERN: &str = "InterfaceEditor";

/// Removes editor/tooling-only assets from a descriptor list.
///
/// A descriptor is excluded when its name contains the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionFilter {
    pattern: String,
}

impl ExclusionFilter {
    /// Creates a filter excluding every descriptor whose name contains `pattern`.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Returns `true` if the descriptor must never reach the document.
    pub fn excludes(&self, descriptor: &AssetDescriptor) -> bool {
        !self.pattern.is_empty() && descriptor.name.contains(&self.pattern)
    }

    /// Filters and classifies a descriptor list, preserving input order.
    ///
    /// Excluded descriptors and descriptors with neither a URL nor inline
    /// content are dropped.
    pub fn apply(&self, descriptors: &[AssetDescriptor]) -> Vec<ClassifiedAsset> {
        descriptors
            .iter()
            .filter(|descriptor| {
                if self.excludes(descriptor) {
                    log::debug!("Excluding editor-only asset '{}'.", descriptor.name);
                    return false;
                }
                true
            })
            .filter_map(|descriptor| {
                let classified = ClassifiedAsset::from_descriptor(descriptor);
                if classified.is_none() {
                    log::debug!(
                        "Dropping asset '{}': it has neither a URL nor inline content.",
                        descriptor.name
                    );
                }
                classified
            })
            .collect()
    }
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSION_PATTERN)
    }
}

/// The payload of a classified asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetKind {
    /// An external resource.
    Linked {
        /// Location of the resource.
        url: String,
    },
    /// Literal content.
    Inline {
        /// The content to embed.
        content: String,
    },
}

/// An asset that survived filtering, with its classification resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedAsset {
    /// Name of the originating descriptor.
    pub name: String,
    /// How the asset is materialized.
    pub kind: AssetKind,
}

impl ClassifiedAsset {
    fn from_descriptor(descriptor: &AssetDescriptor) -> Option<Self> {
        let kind = match descriptor.source()? {
            AssetSource::Linked(url) => AssetKind::Linked { url: url.to_owned() },
            AssetSource::Inline(content) => AssetKind::Inline {
                content: content.to_owned(),
            },
        };
        Some(Self {
            name: descriptor.name.clone(),
            kind,
        })
    }
}

/// A linked asset of the first wave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedAsset {
    /// Name of the originating descriptor.
    pub name: String,
    /// Location of the resource.
    pub url: String,
}

/// An inline asset of the second wave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAsset {
    /// Name of the originating descriptor.
    pub name: String,
    /// The content to embed.
    pub content: String,
}

/// The two disjoint, order-preserving partitions of a filtered asset list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionedAssets {
    /// Assets with a URL, in input order.
    pub linked: Vec<LinkedAsset>,
    /// Assets with inline content and no URL, in input order.
    pub inline: Vec<InlineAsset>,
}

impl PartitionedAssets {
    /// Filters `descriptors` with `filter`, then splits them into linked and inline.
    pub fn from_descriptors(descriptors: &[AssetDescriptor], filter: &ExclusionFilter) -> Self {
        filter.apply(descriptors).into_iter().collect()
    }

    /// Returns `true` if neither partition holds an asset.
    pub fn is_empty(&self) -> bool {
        self.linked.is_empty() && self.inline.is_empty()
    }
}

impl FromIterator<ClassifiedAsset> for PartitionedAssets {
    fn from_iter<I: IntoIterator<Item = ClassifiedAsset>>(iter: I) -> Self {
        let mut partitions = Self::default();
        for asset in iter {
            match asset.kind {
                AssetKind::Linked { url } => partitions.linked.push(LinkedAsset {
                    name: asset.name,
                    url,
                }),
                AssetKind::Inline { content } => partitions.inline.push(InlineAsset {
                    name: asset.name,
                    content,
                }),
            }
        }
        partitions
    }
}
