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

use serde::{Deserialize, Serialize};

/// A single loadable unit of a hosted page, as delivered by the page service.
///
/// The field names on the wire are `Name`, `URL` and `InlineContent`.
/// A descriptor is immutable once constructed; the orchestrator only ever
/// reads it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// Identifier of the asset. Used for exclusion and as the `id` of linked stylesheets.
    #[serde(rename = "Name", default)]
    pub name: String,

    /// Location of an external resource.
    #[serde(rename = "URL", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Literal content of an inline asset.
    #[serde(
        rename = "InlineContent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub inline_content: Option<String>,
}

/// How a descriptor has to be materialized in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSource<'a> {
    /// An external resource referenced by URL.
    Linked(&'a str),
    /// Literal content embedded in the node.
    Inline(&'a str),
}

impl AssetDescriptor {
    /// Creates a descriptor for an external resource.
    pub fn linked(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: Some(url.into()),
            inline_content: None,
        }
    }

    /// Creates a descriptor carrying literal content.
    pub fn inline(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
            inline_content: Some(content.into()),
        }
    }

    /// Classifies the descriptor.
    ///
    /// A non-empty URL wins over inline content. A descriptor with neither a
    /// URL nor inline content yields `None` and is dropped by the partition step.
    pub fn source(&self) -> Option<AssetSource<'_>> {
        match (non_empty(&self.url), non_empty(&self.inline_content)) {
            (Some(url), _) => Some(AssetSource::Linked(url)),
            (None, Some(content)) => Some(AssetSource::Inline(content)),
            (None, None) => None,
        }
    }

    /// Returns `true` if the descriptor references an external resource.
    pub fn is_linked(&self) -> bool {
        matches!(self.source(), Some(AssetSource::Linked(_)))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_the_discriminant() {
        let both = AssetDescriptor {
            name: "Both".into(),
            url: Some("https://cdn/x.js".into()),
            inline_content: Some("console.log(1)".into()),
        };
        assert_eq!(both.source(), Some(AssetSource::Linked("https://cdn/x.js")));

        let inline = AssetDescriptor::inline("B", "console.log(1)");
        assert_eq!(inline.source(), Some(AssetSource::Inline("console.log(1)")));
    }

    #[test]
    fn empty_fields_count_as_absent() {
        let empty = AssetDescriptor {
            name: "Empty".into(),
            url: Some(String::new()),
            inline_content: Some(String::new()),
        };
        assert_eq!(empty.source(), None);
        assert!(!empty.is_linked());
    }

    #[test]
    fn deserializes_service_field_names() {
        let json = r#"{"Name":"CoveoSearchUI","URL":"https://static/js/CoveoJsSearch.js"}"#;
        let descriptor: AssetDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.name, "CoveoSearchUI");
        assert!(descriptor.is_linked());
        assert_eq!(descriptor.inline_content, None);
    }
}
