//! Building templates from disk.
//!
//! [`TemplateBuilder`] assembles the source list for a page, hands it to the
//! engine and stores the result in the cache:
//!
//! ```text
//! partials (configured order)  ──┐
//!                                ├─► read ─► engine.compile ─► cache.put
//! <root>/<name>  (target, last) ─┘
//! ```
//!
//! Every path is joined onto the template root with [`Path::join`]. Partials
//! are registered in the engine under their root-relative name, so a page
//! refers to `base.layout.jinja` or `partials/nav.partial.jinja`.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::cache::TemplateCache;
use crate::config::FunctionTable;
use crate::engine::{SharedTemplate, TemplateEngine, TemplateSource};
use crate::error::BuildError;

/// Compiles a named template together with the configured partials.
///
/// A builder borrows the engine, the cache and the root directory; the
/// [`Renderer`](crate::Renderer) creates one per resolution.
pub struct TemplateBuilder<'a> {
    engine: &'a dyn TemplateEngine,
    cache: &'a TemplateCache,
    root: &'a Path,
    debug: bool,
}

impl<'a> TemplateBuilder<'a> {
    pub fn new(engine: &'a dyn TemplateEngine, cache: &'a TemplateCache, root: &'a Path) -> Self {
        Self {
            engine,
            cache,
            root,
            debug: false,
        }
    }

    /// Enables tracing of disk builds.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Returns the files a build of `name` reads, in order: partials first, target last.
    pub fn source_paths(&self, name: &str, partials: &[PathBuf]) -> Vec<PathBuf> {
        partials
            .iter()
            .map(|partial| self.root.join(partial))
            .chain(std::iter::once(self.root.join(name)))
            .collect()
    }

    /// Reads and compiles `name` with `partials`, binding `functions`.
    ///
    /// On success the template is stored in the cache under `name` (when the
    /// cache is enabled) and returned.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Read`] if any file is missing or unreadable and
    /// [`BuildError::Compile`] if the engine rejects the sources. Nothing is
    /// cached on failure.
    pub fn build(
        &self,
        name: &str,
        partials: &[PathBuf],
        functions: &FunctionTable,
    ) -> Result<SharedTemplate, BuildError> {
        let mut sources = Vec::with_capacity(partials.len() + 1);
        for path in self.source_paths(name, partials) {
            let content = fs::read_to_string(&path).map_err(|source| BuildError::Read {
                path: path.clone(),
                source,
            })?;
            sources.push(TemplateSource::new(self.source_name(&path), path, content));
        }

        // The target is always addressed by the name it was requested under.
        if let Some(target) = sources.last_mut() {
            target.name = name.to_string();
        }

        let template = self.engine.compile(name, sources, functions)?;
        self.cache.put(name, template.clone());

        if self.debug {
            tracing::debug!(
                template = name,
                partials = partials.len(),
                "Reading template from disk"
            );
        }

        Ok(template)
    }

    /// Engine-facing name for a source file: its `/`-separated path below the
    /// root, or its file name when it lives elsewhere.
    fn source_name(&self, path: &Path) -> String {
        match path.strip_prefix(self.root) {
            Ok(relative) => normalized_name(relative),
            Err(_) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| normalized_name(path)),
        }
    }
}

fn normalized_name(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
