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

//! Provides the data model for the loadable units of a hosted page.
//!
//! A hosted page ships two heterogeneous lists of assets, one for styles and
//! one for scripts. Every entry is an [`AssetDescriptor`]: either a *linked*
//! asset pointing at a URL, or an *inline* asset carrying literal content.
//!
//! The key components are:
//! - [`AssetDescriptor`]: the raw, immutable descriptor as delivered by the page service.
//! - [`AssetSource`]: the classification of a descriptor (linked, inline, or nothing).
//! - [`ExclusionFilter`] and [`PartitionedAssets`]: the stable filter/partition
//!   step that runs before any node is created.
//! - [`PageDefinition`]: the full page record the descriptors arrive in.

mod descriptor;
mod page;
mod partition;

pub use descriptor::*;
pub use page::*;
pub use partition::*;
