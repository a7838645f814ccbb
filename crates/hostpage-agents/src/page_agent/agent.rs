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

//! The HostedPageAgent is the hosted page component.
//!
//! It owns the component options, mounts the page container into the host
//! document and, on every `configure` call, fetches the page definition,
//! renders its markup and starts a new render session for its assets.

use std::sync::Arc;

use hostpage_core::asset::PageDefinition;
use hostpage_core::{
    ConfigureRequest, Document, HostedPageOptions, Isolation, NodeId, PageError, PageSource,
};

use super::mount::PageMount;
use crate::activation_agent::{SessionHandle, WaveOrchestrator};

/// Outcome of a `configure` call.
///
/// Returned once the markup is rendered and the initial assets are inserted,
/// not once the script waves signal; use [`RenderedPage::session`] for that.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Identifier of the rendered page.
    pub page_id: String,
    /// Title of the rendered page.
    pub title: String,
    /// The render session, absent in html-only mode.
    pub session: Option<SessionHandle>,
}

/// A hosted page mounted into a document.
pub struct HostedPageAgent {
    document: Arc<dyn Document>,
    source: Arc<dyn PageSource>,
    orchestrator: WaveOrchestrator,
    options: HostedPageOptions,
    mount: Option<PageMount>,
    session: Option<SessionHandle>,
    last_error: Option<String>,
}

impl HostedPageAgent {
    /// Creates an unmounted agent.
    pub fn new(
        document: Arc<dyn Document>,
        source: Arc<dyn PageSource>,
        orchestrator: WaveOrchestrator,
    ) -> Self {
        Self {
            document,
            source,
            orchestrator,
            options: HostedPageOptions::default(),
            mount: None,
            session: None,
            last_error: None,
        }
    }

    /// Mounts the page container under `host`.
    ///
    /// Mounting twice keeps the first mount.
    pub fn mount(&mut self, host: NodeId, isolation: Isolation) -> Result<PageMount, PageError> {
        if let Some(mount) = self.mount {
            log::debug!("Hosted page already mounted under {}.", mount.host());
            return Ok(mount);
        }
        let mount = PageMount::attach(&*self.document, host, isolation)?;
        self.mount = Some(mount);
        Ok(mount)
    }

    /// Merges `request` into the options, then fetches and renders the page.
    ///
    /// Each successful call starts a new render session; previous sessions
    /// keep running. Failures are returned and kept as [`last_error`](Self::last_error).
    pub async fn configure(&mut self, request: ConfigureRequest) -> Result<RenderedPage, PageError> {
        self.options.apply(request);
        match self.fetch_and_render().await {
            Ok(page) => {
                self.last_error = None;
                Ok(page)
            }
            Err(error) => {
                log::error!("Hosted page '{}' failed: {}", self.options.page_id, error);
                self.last_error = Some(error.to_string());
                Err(error)
            }
        }
    }

    async fn fetch_and_render(&mut self) -> Result<RenderedPage, PageError> {
        let request = self.options.page_request()?;
        if self.mount.is_none() {
            return Err(PageError::NotMounted);
        }
        let source = Arc::clone(&self.source);
        let page = source.fetch_page(&request).await?;
        self.render(&page)
    }

    /// Renders `page` into the mounted container and activates its assets.
    pub fn render(&mut self, page: &PageDefinition) -> Result<RenderedPage, PageError> {
        let mount = self.mount.ok_or(PageError::NotMounted)?;
        self.document.set_inner_html(mount.container(), &page.html)?;

        let session = if self.options.html_only {
            log::info!("Page '{}' rendered without assets.", page.id);
            None
        } else {
            let target = mount.injection_target(&*self.document);
            let handle = self.orchestrator.activate(
                Arc::clone(&self.document),
                target,
                &page.css,
                &page.javascript,
            )?;
            Some(handle)
        };
        self.session.clone_from(&session);

        Ok(RenderedPage {
            page_id: page.id.clone(),
            title: page.title.clone(),
            session,
        })
    }

    /// The current options.
    pub fn options(&self) -> &HostedPageOptions {
        &self.options
    }

    /// The mount, if any.
    pub fn mount_point(&self) -> Option<PageMount> {
        self.mount
    }

    /// The session of the page rendered last, `None` after an html-only render.
    pub fn session(&self) -> Option<&SessionHandle> {
        self.session.as_ref()
    }

    /// The error of the last failed `configure` call, cleared by a successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
