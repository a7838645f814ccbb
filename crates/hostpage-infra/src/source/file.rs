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

use async_trait::async_trait;
use hostpage_core::asset::PageDefinition;
use hostpage_core::{PageError, PageRequest, PageSource};
use std::collections::HashMap;
use std::path::PathBuf;

/// Reads a page definition saved as JSON on disk, whatever the request.
#[derive(Debug, Clone)]
pub struct FilePageSource {
    path: PathBuf,
}

impl FilePageSource {
    /// Creates a source serving the page stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PageSource for FilePageSource {
    async fn fetch_page(&self, _request: &PageRequest) -> Result<PageDefinition, PageError> {
        let location = self.path.display().to_string();
        log::info!("Reading page definition from {}.", location);

        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| PageError::Fetch {
                location: location.clone(),
                source: Box::new(e),
            })?;
        serde_json::from_slice(&bytes).map_err(|source| PageError::Decode { location, source })
    }
}

/// Serves page definitions held in memory, keyed by organization and page id.
#[derive(Debug, Clone, Default)]
pub struct StaticPageSource {
    pages: HashMap<(String, String), PageDefinition>,
}

impl StaticPageSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page served for `org_id` / `page_id`.
    pub fn with_page(
        mut self,
        org_id: impl Into<String>,
        page_id: impl Into<String>,
        page: PageDefinition,
    ) -> Self {
        self.pages.insert((org_id.into(), page_id.into()), page);
        self
    }
}

#[async_trait]
impl PageSource for StaticPageSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageDefinition, PageError> {
        let key = (request.org_id.clone(), request.page_id.clone());
        self.pages.get(&key).cloned().ok_or_else(|| PageError::Status {
            location: request.endpoint(),
            status: 404,
        })
    }
}
