//! Page renderer.
//!
//! [`Renderer`] is the entry point of the crate. It resolves a template name
//! to a compiled template (from the cache, or by building it from disk) and
//! executes it against a [`TemplateData`] payload.
//!
//! # Resolution
//!
//! ```text
//! get_template(name)
//!   ├─ cache hit  ─────────────────────────────────► template
//!   └─ cache miss ─► TemplateBuilder::build ─► cache.put ─► template
//! ```
//!
//! Both render entry points share this path:
//!
//! - [`render_to`](Renderer::render_to) streams output into a [`ResponseSink`].
//!   Runtime failures are written to the sink as a 500 response *and* returned.
//! - [`render_to_string`](Renderer::render_to_string) buffers output and returns
//!   it whole, or an error with no output at all.
//!
//! # Concurrency
//!
//! Rendering only needs `&self`, so one renderer can be shared between request
//! handlers through an `Arc`. Configuration changes need `&mut self` and are
//! meant to happen before serving starts.

use std::io;
use std::path::PathBuf;

use http::StatusCode;

use crate::builder::TemplateBuilder;
use crate::cache::TemplateCache;
use crate::config::RendererConfig;
use crate::data::TemplateData;
use crate::discovery::collect_by_tag;
use crate::engine::{CompiledTemplate, MiniJinjaEngine, SharedTemplate, TemplateEngine};
use crate::error::{BuildError, DiscoveryError, ExecutionError, RenderError};
use crate::sink::{ResponseSink, SinkWriter};

/// Renders named templates from a template directory.
///
/// # Example
///
/// ```rust,ignore
/// use standout_page::{Renderer, RendererConfig, TemplateData};
///
/// let mut renderer = Renderer::with_config(
///     RendererConfig::new().with_template_root_dir("./templates"),
/// );
/// renderer.load_layouts_and_partials(&["layout", "partial"])?;
///
/// let html = renderer.render_to_string(
///     "home.page.jinja",
///     Some(&TemplateData::new().with("payload", "hello")),
/// )?;
/// ```
pub struct Renderer {
    config: RendererConfig,
    cache: TemplateCache,
    engine: Box<dyn TemplateEngine>,
}

impl Renderer {
    /// Creates a renderer with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RendererConfig::default())
    }

    /// Creates a renderer using the MiniJinja engine.
    pub fn with_config(config: RendererConfig) -> Self {
        Self::with_engine(config, Box::new(MiniJinjaEngine::new()))
    }

    /// Creates a renderer with a custom template engine.
    pub fn with_engine(config: RendererConfig, engine: Box<dyn TemplateEngine>) -> Self {
        let cache = TemplateCache::new(config.use_cache);
        Self {
            config,
            cache,
            engine,
        }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Turns the template cache on or off.
    pub fn set_use_cache(&mut self, use_cache: bool) {
        self.config.use_cache = use_cache;
        self.cache.set_enabled(use_cache);
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.config.debug = debug;
    }

    /// Replaces the partials compiled alongside every page.
    pub fn set_partials<I, P>(&mut self, partials: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.config.partials = partials.into_iter().map(Into::into).collect();
    }

    /// Scans the template root for files whose path contains one of `tags`
    /// and uses them as the partials list.
    ///
    /// On error the current partials are left untouched.
    ///
    /// ```rust,ignore
    /// renderer.load_layouts_and_partials(&["layout", "partial"])?;
    /// ```
    pub fn load_layouts_and_partials<S: AsRef<str>>(
        &mut self,
        tags: &[S],
    ) -> Result<(), DiscoveryError> {
        let partials = collect_by_tag(
            &self.config.template_root_dir,
            &self.config.extension,
            tags,
        )?;

        if self.config.debug {
            tracing::debug!(
                root = %self.config.template_root_dir.display(),
                count = partials.len(),
                "Loaded layouts and partials"
            );
        }

        self.config.partials = partials;
        Ok(())
    }

    /// Resolves `name` to a compiled template without executing it.
    ///
    /// Returns the cached template when caching is on and the name was built
    /// before; otherwise builds it from disk, which also populates the cache.
    ///
    /// # Errors
    ///
    /// Returns the [`BuildError`] of a failed build unchanged.
    pub fn get_template(&self, name: &str) -> Result<SharedTemplate, BuildError> {
        if let Some(template) = self.cache.get(name) {
            if self.config.debug {
                tracing::debug!(template = name, "Reading template from cache");
            }
            return Ok(template);
        }

        TemplateBuilder::new(self.engine.as_ref(), &self.cache, &self.config.template_root_dir)
            .with_debug(self.config.debug)
            .build(name, &self.config.partials, &self.config.functions)
    }

    /// Renders `name` into `sink`.
    ///
    /// Without a payload the template runs against an empty [`TemplateData`].
    ///
    /// # Errors
    ///
    /// - A [`BuildError`] is returned as is and nothing is written to the sink.
    /// - An [`ExecutionError`] is written to the sink as a
    ///   `500 Internal Server Error` and also returned.
    pub fn render_to(
        &self,
        sink: &mut dyn ResponseSink,
        name: &str,
        data: Option<&TemplateData>,
    ) -> Result<(), RenderError> {
        let template = self.get_template(name)?;

        let result = {
            let mut writer = SinkWriter::new(&mut *sink);
            execute(template.as_ref(), data, &mut writer)
        };

        if let Err(err) = result {
            tracing::warn!(template = name, error = %err, "Template execution failed");
            sink.write_error(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
            return Err(err.into());
        }
        Ok(())
    }

    /// Renders `name` to a string.
    ///
    /// Output is buffered; on any error no output is returned.
    pub fn render_to_string(
        &self,
        name: &str,
        data: Option<&TemplateData>,
    ) -> Result<String, RenderError> {
        let template = self.get_template(name)?;

        let mut buffer = Vec::new();
        execute(template.as_ref(), data, &mut buffer)?;
        Ok(String::from_utf8(buffer).map_err(ExecutionError::from)?)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

fn execute(
    template: &dyn CompiledTemplate,
    data: Option<&TemplateData>,
    out: &mut dyn io::Write,
) -> Result<(), ExecutionError> {
    let value = match data {
        Some(data) => data.to_value()?,
        None => TemplateData::default().to_value()?,
    };
    template.execute(&value, out)
}
