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

//! The `hostpage.toml` configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hostpage_core::config::DEFAULT_REST_URI;
use hostpage_core::{ActivationConfig, ConfigureRequest, Isolation};
use serde::{Deserialize, Serialize};

/// The `[page]` section: which page to render and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSection {
    /// Organization owning the page.
    pub org_id: String,
    /// Identifier of the page.
    pub page_id: String,
    /// Bearer token for the page service.
    pub api_key: String,
    /// Base URI of the page service.
    pub rest_uri: String,
    /// Render the markup only.
    pub html_only: bool,
    /// Mount the page into an isolated subtree.
    pub isolate: bool,
    /// Read the page definition from this JSON file instead of the service.
    pub file: Option<PathBuf>,
}

impl Default for PageSection {
    fn default() -> Self {
        Self {
            org_id: String::new(),
            page_id: String::new(),
            api_key: String::new(),
            rest_uri: DEFAULT_REST_URI.to_string(),
            html_only: false,
            isolate: false,
            file: None,
        }
    }
}

impl PageSection {
    /// The configure request described by this section.
    pub fn configure_request(&self) -> ConfigureRequest {
        ConfigureRequest {
            org_id: self.org_id.clone(),
            page_id: self.page_id.clone(),
            api_key: self.api_key.clone(),
            html_only: Some(self.html_only),
            rest_uri: Some(self.rest_uri.clone()),
        }
    }

    /// The mount isolation policy.
    pub fn isolation(&self) -> Isolation {
        Isolation::from_flag(self.isolate)
    }
}

/// Root of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// The `[page]` section.
    pub page: PageSection,
    /// The `[activation]` section.
    pub activation: ActivationConfig,
}

impl RuntimeConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse the runtime configuration")
    }

    /// Loads the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file at '{}'", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse TOML from '{}'", path.display()))
    }

    /// Loads `path` when given, the defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                log::info!("Loading configuration from '{}'.", path.display());
                Self::load(path)
            }
            None => {
                log::debug!("No configuration file given. Using defaults.");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_fall_back_to_defaults() {
        let config = RuntimeConfig::from_toml(
            r#"
            [page]
            org_id = "acme"
            page_id = "search"
            isolate = true

            [activation]
            load_timeout_ms = 5000
            "#,
        )
        .unwrap();

        assert_eq!(config.page.rest_uri, DEFAULT_REST_URI);
        assert_eq!(config.page.isolation(), Isolation::Isolated);
        assert_eq!(config.activation.exclusion_pattern, "InterfaceEditor");
        assert_eq!(config.activation.load_timeout_ms, Some(5000));
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert!(RuntimeConfig::from_toml("[page]\nisolate = \"yes\"").is_err());
    }
}
