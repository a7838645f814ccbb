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

//! Contract for obtaining page definitions.

use crate::asset::PageDefinition;
use crate::config::PageRequest;
use crate::error::PageError;
use async_trait::async_trait;

/// Provides page definitions, typically from the remote page service.
///
/// Failures are surfaced as-is to the caller of `configure`; sources never retry.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the page described by `request`.
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageDefinition, PageError>;
}
