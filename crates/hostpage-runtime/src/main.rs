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

// Hostpage runtime
// Renders a hosted page into an in-memory document and prints the result.

use anyhow::Result;
use clap::Parser;
use hostpage_core::event::document_signals;
use hostpage_runtime::cli::Cli;
use hostpage_runtime::config::RuntimeConfig;
use hostpage_runtime::{run, RunOptions};

#[tokio::main]
async fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("reqwest", log::LevelFilter::Warn)
        .init();

    let cli = Cli::parse();
    let mut config = RuntimeConfig::load_or_default(cli.config.as_deref())?;
    cli.apply(&mut config);

    let options = RunOptions {
        complete_loads: cli.complete_loads,
    };
    let report = run(&config, document_signals(), options).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
