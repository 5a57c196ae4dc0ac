//! # Standout Page - Cached Server-Side Template Rendering
//!
//! `standout-page` renders named templates from a directory into HTTP response
//! bodies or strings. Templates are compiled together with shared layouts and
//! partials, cached by name, and executed against an arbitrary payload.
//!
//! ## Core Concepts
//!
//! - [`Renderer`]: Resolves and executes templates; shareable across threads
//! - [`RendererConfig`]: Root directory, cache switch, partials, helper functions
//! - [`TemplateData`]: Schema-less payload, addressed in templates as `Data.<key>`
//! - [`TemplateCache`]: Per-renderer map from name to compiled template
//! - [`collect_by_tag`]: Finds layouts and partials by file-name marker
//! - [`ResponseSink`]: Where rendered output (or a failure status) goes
//!
//! ## Quick Start
//!
//! ```text
//! templates/
//! ├── base.layout.jinja   <html>{% block content %}{% endblock %}</html>
//! └── home.page.jinja     {% extends "base.layout.jinja" %}
//!                         {% block content %}{{ Data.payload }}{% endblock %}
//! ```
//!
//! ```rust,ignore
//! use standout_page::{Renderer, RendererConfig, TemplateData};
//!
//! let mut renderer = Renderer::with_config(RendererConfig::new());
//! renderer.load_layouts_and_partials(&["layout"])?;
//!
//! let data = TemplateData::new().with("payload", "hello");
//!
//! // Into a string
//! let html = renderer.render_to_string("home.page.jinja", Some(&data))?;
//!
//! // Into an HTTP response
//! let mut response = http::Response::new(Vec::new());
//! renderer.render_to(&mut response, "home.page.jinja", Some(&data))?;
//! ```
//!
//! ## Helper Functions
//!
//! ```rust,ignore
//! use standout_page::{FunctionTable, RendererConfig};
//!
//! let functions = FunctionTable::new().with("year", || 2024);
//! let config = RendererConfig::new().with_functions(functions);
//! // templates can now call {{ year() }}
//! ```
//!
//! ## Caching
//!
//! With `use_cache` on (the default), the first render of a name builds it from
//! disk and later renders reuse the compiled template. Turn it off during
//! development to see template edits without restarting. Failed builds are
//! never cached. See [`cache`] for the full policy.
//!
//! ## Errors
//!
//! Discovery fails with [`DiscoveryError`], resolution with [`BuildError`], and
//! execution with [`ExecutionError`]. The render entry points wrap the last two
//! in [`RenderError`].

pub mod builder;
pub mod cache;
pub mod config;
pub mod data;
pub mod discovery;
pub mod engine;
mod error;
mod renderer;
pub mod sink;

pub use builder::TemplateBuilder;
pub use cache::TemplateCache;
pub use config::{FunctionTable, RendererConfig, DEFAULT_EXTENSION, DEFAULT_TEMPLATE_DIR};
pub use data::TemplateData;
pub use discovery::{collect_by_tag, find_files};
pub use engine::{CompiledTemplate, MiniJinjaEngine, SharedTemplate, TemplateEngine, TemplateSource};
pub use error::{BuildError, ConfigError, DiscoveryError, EngineError, ExecutionError, RenderError};
pub use renderer::Renderer;
pub use sink::ResponseSink;

// Re-export for custom engines and sinks
pub use http::StatusCode;
pub use minijinja;
