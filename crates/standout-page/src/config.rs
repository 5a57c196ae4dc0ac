//! Renderer configuration.
//!
//! A [`RendererConfig`] is built once at startup and owned by a single
//! [`Renderer`](crate::Renderer). It can be assembled in code or loaded from
//! YAML; every field has a default:
//!
//! ```yaml
//! template_root_dir: ./templates
//! use_cache: true
//! debug: false
//! extension: jinja
//! partials:
//!   - base.layout.jinja
//! ```
//!
//! Helper functions can't be expressed in YAML and are attached with
//! [`RendererConfig::with_functions`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use minijinja::functions::Function;
use minijinja::value::{FunctionArgs, FunctionResult, Value};
use serde::Deserialize;

use crate::error::ConfigError;

/// Default directory holding the templates.
pub const DEFAULT_TEMPLATE_DIR: &str = "./templates";

/// Default template file extension (without the dot).
pub const DEFAULT_EXTENSION: &str = "jinja";

/// Named helper functions made callable from every template.
///
/// ```rust
/// use standout_page::FunctionTable;
///
/// let mut functions = FunctionTable::new();
/// functions.insert("year", || 2024);
/// functions.insert("shout", |s: String| s.to_uppercase());
/// assert_eq!(functions.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: BTreeMap<String, Value>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function under `name`, replacing any previous entry.
    pub fn insert<F, Rv, Args>(&mut self, name: impl Into<String>, f: F)
    where
        F: Function<Rv, Args>,
        Rv: FunctionResult,
        Args: for<'a> FunctionArgs<'a>,
    {
        self.functions.insert(name.into(), Value::from_function(f));
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with<F, Rv, Args>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Function<Rv, Args>,
        Rv: FunctionResult,
        Args: for<'a> FunctionArgs<'a>,
    {
        self.insert(name, f);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Iterates over `(name, callable)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.functions.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Configuration for a [`Renderer`](crate::Renderer).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Directory every template and partial path is resolved against.
    pub template_root_dir: PathBuf,
    /// Keep compiled templates in memory. Turn off to pick up edits without a restart.
    pub use_cache: bool,
    /// Emit cache and disk tracing events.
    pub debug: bool,
    /// Layouts and partials compiled alongside every page, in order, relative to the root.
    pub partials: Vec<PathBuf>,
    /// Template file extension used by discovery.
    pub extension: String,
    /// Helper functions available to every template.
    #[serde(skip)]
    pub functions: FunctionTable,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            template_root_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            use_cache: true,
            debug: false,
            partials: Vec::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            functions: FunctionTable::default(),
        }
    }
}

impl RendererConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from YAML. Missing fields take their defaults.
    ///
    /// ```rust
    /// use standout_page::RendererConfig;
    ///
    /// let yaml = "template_root_dir: views\nuse_cache: false";
    /// let config = RendererConfig::from_yaml(yaml).unwrap();
    /// assert!(!config.use_cache);
    /// assert_eq!(config.extension, "jinja");
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn with_template_root_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_root_dir = dir.into();
        self
    }

    pub fn with_use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_partials<I, P>(mut self, partials: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.partials = partials.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_functions(mut self, functions: FunctionTable) -> Self {
        self.functions = functions;
        self
    }

    pub fn template_root_dir(&self) -> &Path {
        &self.template_root_dir
    }
}
