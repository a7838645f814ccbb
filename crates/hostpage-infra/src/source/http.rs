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
use reqwest::header::{ACCEPT, AUTHORIZATION};

/// Fetches page definitions from the remote page service.
///
/// Issues `GET {rest_uri}/rest/organizations/{org}/pages/{page}` with a
/// bearer token. Failures are not retried.
#[derive(Debug, Clone, Default)]
pub struct HttpPageSource {
    client: reqwest::Client,
}

impl HttpPageSource {
    /// Creates a source with a default HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source reusing an existing HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageDefinition, PageError> {
        let location = request.endpoint();
        log::info!(
            "Fetching page '{}' of organization '{}'.",
            request.page_id,
            request.org_id
        );

        let response = self
            .client
            .get(&location)
            .header(AUTHORIZATION, format!("Bearer {}", request.api_key))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| PageError::Fetch {
                location: location.clone(),
                source: Box::new(e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::Status {
                location,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| PageError::Fetch {
            location: location.clone(),
            source: Box::new(e),
        })?;

        let page: PageDefinition = serde_json::from_slice(&body)
            .map_err(|source| PageError::Decode { location, source })?;
        log::debug!(
            "Page '{}' fetched: {} style(s), {} script(s).",
            page.id,
            page.css.len(),
            page.javascript.len()
        );
        Ok(page)
    }
}
