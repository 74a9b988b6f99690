//! Dataset documents
//!
//! Renders one HTML page per dataset: title, version labels, each
//! transformation with highlighted SQL, then direct and full dependencies.

use minijinja::Environment;
use serde::Serialize;
use sqlscribe_core::Dataset;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::highlight::highlight_sql;

const TEMPLATE_NAME: &str = "dataset.html";
const TEMPLATE: &str = include_str!("templates/dataset.html");

/// Error during document rendering
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Serialize)]
struct TokenView<'a> {
    text: &'a str,
    color: Option<&'static str>,
}

/// Values available to the document template
#[derive(Debug, Clone, Serialize)]
struct DocumentContext<'a> {
    name: &'a str,
    workflow: &'a str,
    version: &'a str,
    date_modified: &'a str,
    transformations: Vec<Vec<TokenView<'a>>>,
    direct: &'a BTreeSet<String>,
    full: &'a BTreeSet<String>,
}

/// Renders dataset documents from the built-in template
pub struct DocumentRenderer {
    env: Environment<'static>,
}

impl DocumentRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, TEMPLATE)?;
        Ok(Self { env })
    }

    /// Render a dataset document to a string
    pub fn render(
        &self,
        dataset: &Dataset,
        direct: &BTreeSet<String>,
        full: &BTreeSet<String>,
    ) -> Result<String, RenderError> {
        let highlighted: Vec<_> = dataset
            .transformations
            .iter()
            .map(String::as_str)
            .map(highlight_sql)
            .collect();

        let context = DocumentContext {
            name: &dataset.name,
            workflow: &dataset.workflow,
            version: &dataset.version,
            date_modified: &dataset.date_modified,
            transformations: highlighted
                .iter()
                .map(|tokens| {
                    tokens
                        .iter()
                        .map(|t| TokenView { text: &t.text, color: t.kind.color() })
                        .collect()
                })
                .collect(),
            direct,
            full,
        };

        let template = self.env.get_template(TEMPLATE_NAME)?;
        let html = template.render(&context)?;

        Ok(html)
    }

    /// Render and write `<out_dir>/<workflow>/<dataset>.html`, returning the path
    pub fn write(
        &self,
        out_dir: &Path,
        dataset: &Dataset,
        direct: &BTreeSet<String>,
        full: &BTreeSet<String>,
    ) -> Result<PathBuf, RenderError> {
        let html = self.render(dataset, direct, full)?;

        let dir = out_dir.join(path_component(&dataset.workflow));
        std::fs::create_dir_all(&dir)
            .map_err(|source| RenderError::Io { path: dir.clone(), source })?;

        let path = dir.join(format!("{}.html", path_component(&dataset.name)));
        std::fs::write(&path, html)
            .map_err(|source| RenderError::Io { path: path.clone(), source })?;

        tracing::debug!(dataset = %dataset.name, path = %path.display(), "saved document");
        Ok(path)
    }
}

/// Map a name to a single path component below the output directory
fn path_component(name: &str) -> String {
    match name {
        "" | "." | ".." => "_".to_string(),
        _ => name.replace(['/', '\\'], "_"),
    }
}
