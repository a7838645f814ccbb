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

//! Configuration of the hosted page component and of asset activation.

use crate::asset::{ExclusionFilter, DEFAULT_EXCLUSION_PATTERN};
use crate::error::PageError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default page service endpoint.
pub const DEFAULT_REST_URI: &str = "https://platform.cloud.coveo.com";

/// Configuration of the asset-activation orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationConfig {
    /// Assets whose name contains this fragment are never injected.
    pub exclusion_pattern: String,
    /// Name of the distinguished linked script receiving the marker class.
    pub primary_script_name: String,
    /// Marker class put on the primary script.
    pub primary_script_class: String,
    /// Time the linked script wave may take before the session fails.
    /// `None` waits forever.
    pub load_timeout_ms: Option<u64>,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            exclusion_pattern: DEFAULT_EXCLUSION_PATTERN.to_string(),
            primary_script_name: "CoveoSearchUI".to_string(),
            primary_script_class: "coveo-script".to_string(),
            load_timeout_ms: None,
        }
    }
}

impl ActivationConfig {
    /// Builds the exclusion filter for this configuration.
    pub fn exclusion_filter(&self) -> ExclusionFilter {
        ExclusionFilter::new(self.exclusion_pattern.clone())
    }

    /// The load timeout, if any.
    pub fn load_timeout(&self) -> Option<Duration> {
        self.load_timeout_ms.map(Duration::from_millis)
    }
}

/// The effective options of a hosted page component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostedPageOptions {
    /// Organization owning the page.
    pub org_id: String,
    /// Identifier of the page.
    pub page_id: String,
    /// Key used as bearer token against the page service.
    pub api_key: String,
    /// Render the markup only, without any asset.
    pub html_only: bool,
    /// Base URI of the page service.
    pub rest_uri: String,
}

impl Default for HostedPageOptions {
    fn default() -> Self {
        Self {
            org_id: String::new(),
            page_id: String::new(),
            api_key: String::new(),
            html_only: false,
            rest_uri: DEFAULT_REST_URI.to_string(),
        }
    }
}

/// Options passed to a `configure` call.
///
/// Required fields replace the current options; optional fields only replace
/// them when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureRequest {
    /// Organization owning the page.
    pub org_id: String,
    /// Identifier of the page.
    pub page_id: String,
    /// Key used as bearer token against the page service.
    pub api_key: String,
    /// Render the markup only.
    #[serde(default)]
    pub html_only: Option<bool>,
    /// Base URI of the page service.
    #[serde(default)]
    pub rest_uri: Option<String>,
}

impl HostedPageOptions {
    /// Merges a configure request onto the current options.
    pub fn apply(&mut self, request: ConfigureRequest) {
        self.org_id = request.org_id;
        self.page_id = request.page_id;
        self.api_key = request.api_key;
        if let Some(html_only) = request.html_only {
            self.html_only = html_only;
        }
        if let Some(rest_uri) = request.rest_uri {
            self.rest_uri = rest_uri;
        }
    }

    /// Builds the page request described by the options.
    pub fn page_request(&self) -> Result<PageRequest, PageError> {
        if self.org_id.is_empty() || self.page_id.is_empty() {
            return Err(PageError::InvalidOptions(
                "both an organization id and a page id are required".to_string(),
            ));
        }
        Ok(PageRequest {
            org_id: self.org_id.clone(),
            page_id: self.page_id.clone(),
            api_key: self.api_key.clone(),
            rest_uri: self.rest_uri.clone(),
        })
    }
}

/// An authenticated read of one page definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Organization owning the page.
    pub org_id: String,
    /// Identifier of the page.
    pub page_id: String,
    /// Bearer token.
    pub api_key: String,
    /// Base URI of the page service.
    pub rest_uri: String,
}

impl PageRequest {
    /// `{rest_uri}/rest/organizations/{org_id}/pages/{page_id}`
    pub fn endpoint(&self) -> String {
        format!(
            "{}/rest/organizations/{}/pages/{}",
            self.rest_uri.trim_end_matches('/'),
            self.org_id,
            self.page_id
        )
    }
}
