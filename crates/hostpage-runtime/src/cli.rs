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

//! Command-line interface of the `hostpage` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::config::RuntimeConfig;

/// Flags override the values of the configuration file.
#[derive(Debug, Parser)]
#[command(name = "hostpage")]
#[command(about = "Renders a hosted page into an in-memory document", long_about = None)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Organization owning the page.
    #[arg(long)]
    pub org_id: Option<String>,

    /// Identifier of the page.
    #[arg(long)]
    pub page_id: Option<String>,

    /// Bearer token for the page service.
    #[arg(long, env = "HOSTPAGE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URI of the page service.
    #[arg(long)]
    pub rest_uri: Option<String>,

    /// Render the markup only.
    #[arg(long)]
    pub html_only: bool,

    /// Mount the page into an isolated subtree.
    #[arg(long)]
    pub isolate: bool,

    /// Read the page definition from a JSON file instead of the service.
    #[arg(long)]
    pub page_file: Option<PathBuf>,

    /// Report every linked script as loaded and wait for both signals.
    #[arg(long)]
    pub complete_loads: bool,

    /// Fail the session when the linked scripts take longer than this.
    #[arg(long)]
    pub load_timeout_ms: Option<u64>,
}

impl Cli {
    /// Applies the flags on top of `config`.
    pub fn apply(&self, config: &mut RuntimeConfig) {
        let page = &mut config.page;
        if let Some(org_id) = &self.org_id {
            page.org_id.clone_from(org_id);
        }
        if let Some(page_id) = &self.page_id {
            page.page_id.clone_from(page_id);
        }
        if let Some(api_key) = &self.api_key {
            page.api_key.clone_from(api_key);
        }
        if let Some(rest_uri) = &self.rest_uri {
            page.rest_uri.clone_from(rest_uri);
        }
        if let Some(file) = &self.page_file {
            page.file = Some(file.clone());
        }
        page.html_only |= self.html_only;
        page.isolate |= self.isolate;
        if self.load_timeout_ms.is_some() {
            config.activation.load_timeout_ms = self.load_timeout_ms;
        }
    }
}
