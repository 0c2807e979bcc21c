//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! File and browser I/O never happens inside [`update`]; it is queued on the
//! model and run by the loop right after the message is applied.

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use input::{TOOLBAR, ToolbarItem};
pub use model::{
    Form, FormField, FormKind, Model, Overlay, PendingEffect, STATUS_ROWS, TOOLBAR_ROWS,
    ToastLevel,
};
pub use update::{Message, update};

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::files;
use crate::template::{ProjectInfo, TemplateKind};

/// Owns the startup options and runs the terminal session.
pub struct App {
    file_path: Option<PathBuf>,
    template: TemplateKind,
    project_info: ProjectInfo,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    pub fn new() -> Self {
        Self {
            file_path: None,
            template: TemplateKind::Basic,
            project_info: ProjectInfo::default(),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Start with this file instead of a template.
    pub fn with_file(mut self, path: Option<PathBuf>) -> Self {
        self.file_path = path;
        self
    }

    /// Template loaded at startup when no file is given.
    pub const fn with_template(mut self, template: TemplateKind) -> Self {
        self.template = template;
        self
    }

    pub fn with_project_info(mut self, info: ProjectInfo) -> Self {
        self.project_info = info;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// Build the initial model for a terminal of the given size.
    ///
    /// # Errors
    ///
    /// Returns an error if the startup file cannot be read.
    pub fn initial_model(&self, terminal_size: (u16, u16)) -> Result<Model> {
        let text = match &self.file_path {
            Some(path) => files::import_text(path)
                .with_context(|| format!("Failed to open {}", path.display()))?,
            None => self.template.render(&self.project_info),
        };
        let mut model = Model::new(&text, self.project_info.clone(), terminal_size);
        model.file_path.clone_from(&self.file_path);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        Ok(model)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
