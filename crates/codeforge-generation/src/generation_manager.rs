//! Generation manager for orchestrating render, validate and write
//!
//! A [`GenerationTask`] pairs a template identifier and target path with a
//! pure render function. The manager renders tasks in parallel, validates
//! TypeScript outputs, and writes results through an injected
//! [`FileSystem`] in input order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use codeforge_config::{GeneratorConfig, ValidationSettings};
use codeforge_files::FileSystem;
use rayon::prelude::*;
use tracing::{debug, info, info_span};

use crate::code_validator::CodeValidator;
use crate::error::{GenerationError, Result};
use crate::models::GeneratedFile;

type RenderFn<'a> = Box<dyn Fn() -> Result<String> + Send + Sync + 'a>;

/// Configuration for the generation manager
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationManagerConfig {
    /// Render and validate without writing
    pub dry_run: bool,
    /// Validation applied before writing; `None` skips validation
    pub validation: Option<ValidationSettings>,
}

impl Default for GenerationManagerConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            validation: Some(ValidationSettings::default()),
        }
    }
}

impl From<&GeneratorConfig> for GenerationManagerConfig {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            dry_run: config.dry_run,
            validation: config
                .validation
                .enabled
                .then(|| config.validation.clone()),
        }
    }
}

/// One file to generate: a template id, a target path and a render function
pub struct GenerationTask<'a> {
    template_id: String,
    path: PathBuf,
    render: RenderFn<'a>,
}

impl<'a> GenerationTask<'a> {
    /// Bind `render` to `options`
    ///
    /// The render function must be pure; it may run on any thread.
    pub fn new<O, R>(
        template_id: impl Into<String>,
        path: impl Into<PathBuf>,
        options: O,
        render: R,
    ) -> Self
    where
        O: Send + Sync + 'a,
        R: Fn(&O) -> Result<String> + Send + Sync + 'a,
    {
        Self {
            template_id: template_id.into(),
            path: path.into(),
            render: Box::new(move || render(&options)),
        }
    }

    /// Template identifier
    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    /// Target path as given, possibly relative to the workspace root
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for GenerationTask<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationTask")
            .field("template_id", &self.template_id)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Orchestrates rendering, validation and writing of generated files
pub struct GenerationManager {
    fs: Arc<dyn FileSystem>,
    config: GenerationManagerConfig,
    validator: Option<CodeValidator>,
}

impl GenerationManager {
    /// Creates a manager with default configuration
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self::with_config(fs, GenerationManagerConfig::default())
    }

    /// Creates a manager with custom configuration
    pub fn with_config(fs: Arc<dyn FileSystem>, config: GenerationManagerConfig) -> Self {
        let validator = config.validation.clone().map(CodeValidator::from);
        Self {
            fs,
            config,
            validator,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &GenerationManagerConfig {
        &self.config
    }

    /// Render and validate one task without writing it
    ///
    /// # Errors
    /// Any failure is wrapped with the task's template id and absolute path
    pub fn render_task(&self, task: &GenerationTask<'_>) -> Result<GeneratedFile> {
        let path = self.fs.resolve(&task.path);
        let span = info_span!("generate", template = %task.template_id, path = %path.display());
        let _guard = span.enter();

        let rendered = (task.render)()
            .map_err(|e| e.in_template(&task.template_id, &path))?;
        let file = GeneratedFile::new(path, rendered);

        if let Some(validator) = &self.validator {
            let warnings = validator
                .validate_file(&file)
                .map_err(|e| GenerationError::from(e).in_template(&task.template_id, &file.path))?;
            debug!(warnings = warnings.len(), "Validated");
        }
        Ok(file)
    }

    /// Render, validate and write one task
    ///
    /// # Returns
    /// The generated file; in dry-run mode nothing is written
    pub fn generate_file(&self, task: &GenerationTask<'_>) -> Result<GeneratedFile> {
        let file = self.render_task(task)?;
        self.write(&task.template_id, &file)?;
        Ok(file)
    }

    /// Render every task in parallel, then write them in input order
    ///
    /// Rendering and validation must succeed for all tasks before anything
    /// is written. Writes stop at the first failure; files already written
    /// stay on disk.
    ///
    /// # Returns
    /// Absolute paths in the order of `tasks`
    pub fn generate_files(&self, tasks: &[GenerationTask<'_>]) -> Result<Vec<PathBuf>> {
        let files = tasks
            .par_iter()
            .map(|task| self.render_task(task))
            .collect::<Result<Vec<_>>>()?;

        for (task, file) in tasks.iter().zip(&files) {
            self.write(&task.template_id, file)?;
        }

        info!(
            files = files.len(),
            dry_run = self.config.dry_run,
            "Generation complete"
        );
        Ok(files.into_iter().map(|f| f.path).collect())
    }

    fn write(&self, template_id: &str, file: &GeneratedFile) -> Result<()> {
        let span = info_span!("generate", template = %template_id, path = %file.path.display());
        let _guard = span.enter();

        if self.config.dry_run {
            debug!("Dry run, skipping write");
            return Ok(());
        }

        if let Some(parent) = file.path.parent() {
            if !parent.as_os_str().is_empty() && !self.fs.exists(parent) {
                self.fs
                    .make_directory(parent)
                    .map_err(|e| GenerationError::from(e).in_template(template_id, &file.path))?;
            }
        }
        self.fs
            .write_file(&file.path, &file.content)
            .map_err(|e| GenerationError::from(e).in_template(template_id, &file.path))?;
        debug!(bytes = file.content.len(), "Wrote file");
        Ok(())
    }
}
