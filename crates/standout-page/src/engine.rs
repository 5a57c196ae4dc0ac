//! Template engine abstraction.
//!
//! This module defines the [`TemplateEngine`] trait, which turns an ordered set
//! of template sources into a [`CompiledTemplate`]. The builder and cache only
//! ever see the traits, so the backend can be swapped. The default
//! implementation is [`MiniJinjaEngine`].

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};

use crate::config::FunctionTable;
use crate::data::TemplateData;
use crate::error::{BuildError, ExecutionError};

/// One source file handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    /// Name other templates use to refer to this one (root-relative, `/`-separated).
    pub name: String,
    /// Where the content was read from.
    pub path: PathBuf,
    /// Raw template text.
    pub content: String,
}

impl TemplateSource {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            content: content.into(),
        }
    }
}

/// An executable template produced by a [`TemplateEngine`].
///
/// Compiled templates are immutable and may be executed from many threads at once.
pub trait CompiledTemplate: Send + Sync {
    /// The name the template was compiled under.
    fn name(&self) -> &str;

    /// Runs the template against `data`, streaming output into `out`.
    fn execute(
        &self,
        data: &serde_json::Value,
        out: &mut dyn io::Write,
    ) -> Result<(), ExecutionError>;
}

/// A compiled template shared between the cache and its callers.
pub type SharedTemplate = Arc<dyn CompiledTemplate>;

impl dyn CompiledTemplate {
    /// Runs the template against a payload and returns the output as a string.
    ///
    /// Useful for executing a template obtained from
    /// [`Renderer::get_template`](crate::Renderer::get_template) several times.
    pub fn render(&self, data: &TemplateData) -> Result<String, ExecutionError> {
        let value = data.to_value()?;
        let mut buffer = Vec::new();
        self.execute(&value, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl fmt::Debug for dyn CompiledTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTemplate")
            .field("name", &self.name())
            .finish()
    }
}

/// Compiles template sources into an executable template.
///
/// The last entry of `sources` is the target template and is registered
/// under `name`; the entries before it are partials the target may extend or
/// include. Functions in the table must be callable from every source.
pub trait TemplateEngine: Send + Sync {
    fn compile(
        &self,
        name: &str,
        sources: Vec<TemplateSource>,
        functions: &FunctionTable,
    ) -> Result<SharedTemplate, BuildError>;
}

/// MiniJinja-based template engine.
///
/// Each compiled template owns its own [`Environment`] holding the partials,
/// the target page and the helper functions. Output is HTML-escaped and
/// undefined values are errors by default.
///
/// # Example
///
/// ```rust
/// use standout_page::{
///     FunctionTable, MiniJinjaEngine, TemplateData, TemplateEngine, TemplateSource,
/// };
///
/// let engine = MiniJinjaEngine::new();
/// let sources = vec![
///     TemplateSource::new(
///         "base.layout.jinja",
///         "base.layout.jinja",
///         "<main>{% block content %}{% endblock %}</main>",
///     ),
///     TemplateSource::new(
///         "home.page.jinja",
///         "home.page.jinja",
///         r#"{% extends "base.layout.jinja" %}{% block content %}{{ Data.payload }}{% endblock %}"#,
///     ),
/// ];
///
/// let template = engine.compile("home.page.jinja", sources, &FunctionTable::new()).unwrap();
/// let output = template.render(&TemplateData::new().with("payload", "hello")).unwrap();
/// assert_eq!(output, "<main>hello</main>");
/// ```
#[derive(Debug, Clone)]
pub struct MiniJinjaEngine {
    undefined: UndefinedBehavior,
    auto_escape: AutoEscape,
}

impl MiniJinjaEngine {
    pub fn new() -> Self {
        Self {
            undefined: UndefinedBehavior::Strict,
            auto_escape: AutoEscape::Html,
        }
    }

    /// Sets how templates treat access to values missing from the payload.
    pub fn with_undefined_behavior(mut self, undefined: UndefinedBehavior) -> Self {
        self.undefined = undefined;
        self
    }

    /// Sets the escaping applied to every template.
    pub fn with_auto_escape(mut self, auto_escape: AutoEscape) -> Self {
        self.auto_escape = auto_escape;
        self
    }

    fn environment(&self, functions: &FunctionTable) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_undefined_behavior(self.undefined);

        let auto_escape = self.auto_escape.clone();
        env.set_auto_escape_callback(move |_name| auto_escape.clone());

        for (name, function) in functions.iter() {
            env.add_global(name.to_string(), function.clone());
        }
        env
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn compile(
        &self,
        name: &str,
        sources: Vec<TemplateSource>,
        functions: &FunctionTable,
    ) -> Result<SharedTemplate, BuildError> {
        let mut env = self.environment(functions);

        for source in sources {
            env.add_template_owned(source.name, source.content)
                .map_err(|e| BuildError::compile(name, e))?;
        }

        // The target must be present under its own name to be executable.
        env.get_template(name)
            .map_err(|e| BuildError::compile(name, e))?;

        Ok(Arc::new(MiniJinjaTemplate {
            name: name.to_string(),
            env,
        }))
    }
}

/// A page compiled by [`MiniJinjaEngine`].
struct MiniJinjaTemplate {
    name: String,
    env: Environment<'static>,
}

impl CompiledTemplate for MiniJinjaTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(
        &self,
        data: &serde_json::Value,
        out: &mut dyn io::Write,
    ) -> Result<(), ExecutionError> {
        let template = self
            .env
            .get_template(&self.name)
            .map_err(|e| ExecutionError::execute(&self.name, e))?;

        template
            .render_to_write(Value::from_serialize(data), out)
            .map_err(|e| ExecutionError::execute(&self.name, e))?;
        Ok(())
    }
}
