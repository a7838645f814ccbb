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

use super::descriptor::AssetDescriptor;
use serde::{Deserialize, Serialize};

/// The page record returned by the page service.
///
/// Serves as the single input of a render pass: the markup goes into the page
/// container, the two asset lists go to the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDefinition {
    /// Identifier of the page.
    #[serde(default)]
    pub id: String,

    /// Human readable name of the page.
    #[serde(default)]
    pub name: String,

    /// Title of the page.
    #[serde(default)]
    pub title: String,

    /// Last modification timestamp, as formatted by the service.
    #[serde(default)]
    pub last_modified: String,

    /// Base markup rendered into the page container.
    #[serde(default)]
    pub html: String,

    /// Style assets. A missing list is treated as empty.
    #[serde(default, deserialize_with = "nullable_list")]
    pub css: Vec<AssetDescriptor>,

    /// Script assets. A missing list is treated as empty.
    #[serde(default, deserialize_with = "nullable_list")]
    pub javascript: Vec<AssetDescriptor>,
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<AssetDescriptor>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<AssetDescriptor>>::deserialize(deserializer)?.unwrap_or_default())
}
