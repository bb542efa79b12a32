use std::path::PathBuf;
use std::sync::Arc;

use axum::response::Html;
use minijinja::{path_loader, Environment};
use serde::Serialize;
use tracing::debug;

use crate::error::AppError;

/// Logical page names the handlers render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Index,
    EditUser,
    AddUser,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            View::Index => "index",
            View::EditUser => "editUser",
            View::AddUser => "addUser",
        }
    }

    /// `{name}.html`, resolved against the template directory.
    pub fn template(self) -> String {
        format!("{}.html", self.name())
    }
}

/// Template environment loading `*.html` files from one directory.
/// Templates are read lazily and cached by the environment.
#[derive(Clone)]
pub struct Views {
    env: Arc<Environment<'static>>,
}

impl Views {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        debug!(dir = %dir.display(), "template directory");
        let mut env = Environment::new();
        env.set_loader(path_loader(dir));
        Self { env: Arc::new(env) }
    }

    pub fn render<S: Serialize>(&self, view: View, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(&view.template())?.render(ctx)
    }

    pub fn page<S: Serialize>(&self, view: View, ctx: S) -> Result<Html<String>, AppError> {
        Ok(Html(self.render(view, ctx)?))
    }
}

#[cfg(test)]
pub(crate) fn test_views() -> Views {
    Views::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
}
