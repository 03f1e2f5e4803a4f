//! Tree rendering for Stencil templates.
//! Walks a template directory, renders every path component and every file
//! body through a [`TemplateRenderer`], and writes the result under the
//! output root with the same relative layout.

use crate::context::Context;
use crate::error::{Error, Result};
use crate::ignore::IgnoreList;
use crate::renderer::TemplateRenderer;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A template file rendered in memory, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub source: PathBuf,
    pub target: PathBuf,
    pub content: String,
}

/// Renders a template tree into an output directory.
pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
    template_root: &'a Path,
    output_root: &'a Path,
    context: &'a Context,
    ignored: &'a IgnoreList,
}

impl<'a> Processor<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        template_root: &'a Path,
        output_root: &'a Path,
        context: &'a Context,
        ignored: &'a IgnoreList,
    ) -> Self {
        Self {
            engine,
            template_root,
            output_root,
            context,
            ignored,
        }
    }

    fn relative_path<'p>(&self, path: &'p Path) -> Result<&'p Path> {
        path.strip_prefix(self.template_root)
            .map_err(|e| Error::TemplateError(e.to_string()))
    }

    fn is_ignored(&self, entry: &DirEntry, nested_output: Option<&Path>) -> bool {
        match self.relative_path(entry.path()) {
            Ok(relative) if !relative.as_os_str().is_empty() => {
                if nested_output.is_some_and(|output| relative.starts_with(output)) {
                    debug!("Skipping '{}', it is the output directory", relative.display());
                    return true;
                }
                let ignored = self.ignored.is_ignored(relative);
                if ignored {
                    debug!("Skipping '{}' from ignore list", relative.display());
                }
                ignored
            }
            _ => false,
        }
    }

    /// Locates the output root inside the template root, if it lives there.
    ///
    /// Both roots must exist.
    ///
    /// # Errors
    /// * `Error::TemplateError` if both roots are the same directory
    fn nested_output_dir(&self) -> Result<Option<PathBuf>> {
        let template_root = self.template_root.canonicalize()?;
        let output_root = self.output_root.canonicalize()?;
        match output_root.strip_prefix(&template_root) {
            Ok(relative) if relative.as_os_str().is_empty() => Err(Error::TemplateError(format!(
                "output directory '{}' is the template directory",
                self.output_root.display()
            ))),
            Ok(relative) => Ok(Some(relative.to_path_buf())),
            Err(_) => Ok(None),
        }
    }

    /// Renders a single template file without touching the output tree.
    ///
    /// # Errors
    /// * `Error::InvalidPathComponent` if a path component renders to an unusable name
    /// * `Error::TemplateError` if the path is not valid UTF-8
    /// * `Error::IoError` if the file cannot be read as UTF-8 text
    pub fn process(&self, source: &Path) -> Result<RenderedFile> {
        let relative = self.relative_path(source)?;
        debug!("Processing source file: {}", relative.display());

        let rendered_relative = render_path(self.engine, relative, self.context)?;
        let target = self.output_root.join(&rendered_relative);
        debug!("Processed target file: {}", rendered_relative.display());

        let content = fs::read_to_string(source)?;
        let content = self.engine.render(&content, self.context)?;

        Ok(RenderedFile {
            source: source.to_path_buf(),
            target,
            content,
        })
    }

    /// Renders and writes every non-ignored file under the template root.
    ///
    /// # Returns
    /// * `Result<Vec<PathBuf>>` - Written target paths, in walk order
    pub fn run(&self) -> Result<Vec<PathBuf>> {
        if !self.template_root.is_dir() {
            return Err(Error::TemplateError(format!(
                "template directory '{}' does not exist",
                self.template_root.display()
            )));
        }
        fs::create_dir_all(self.output_root)?;
        let nested_output = self.nested_output_dir()?;

        let mut written = Vec::new();
        let walker = WalkDir::new(self.template_root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_ignored(entry, nested_output.as_deref()));

        for entry in walker {
            let entry = entry.map_err(|e| Error::IoError(e.into()))?;
            if !entry.path().is_file() {
                continue;
            }

            let rendered = self.process(entry.path())?;
            write_file(&rendered.target, &rendered.content)?;
            written.push(rendered.target);
        }

        Ok(written)
    }
}

/// Ensures the output directory is safe to write to.
///
/// # Arguments
/// * `output_dir` - Target directory path for generated output
/// * `force` - Whether to overwrite existing directory
///
/// # Errors
/// * Returns `Error::OutputDirectoryExistsError` if directory exists and force is false
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !force {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}

/// Renders each component of a relative path independently.
///
/// # Errors
/// * `Error::TemplateError` if a component is not valid UTF-8
/// * `Error::InvalidPathComponent` if a rendered component is empty, `.`, `..`
///   or contains a path separator
pub fn render_path(
    engine: &dyn TemplateRenderer,
    relative: &Path,
    context: &Context,
) -> Result<PathBuf> {
    let mut rendered_path = PathBuf::new();
    for part in relative.iter() {
        let part = part.to_str().ok_or_else(|| {
            Error::TemplateError(format!("path '{}' is not valid UTF-8", relative.display()))
        })?;
        let rendered = engine.render(part, context)?;
        validate_component(part, &rendered)?;
        rendered_path.push(rendered);
    }
    Ok(rendered_path)
}

/// Checks that a rendered path component names a plain file or directory.
pub fn validate_component(part: &str, rendered: &str) -> Result<()> {
    let reason = if rendered.is_empty() {
        "empty"
    } else if rendered == "." || rendered == ".." {
        "special directory name"
    } else if rendered.contains(['/', '\\']) {
        "contains a path separator"
    } else {
        return Ok(());
    };

    Err(Error::InvalidPathComponent {
        part: part.to_string(),
        rendered: rendered.to_string(),
        reason: reason.to_string(),
    })
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    debug!("Writing file: {}", path.display());
    fs::write(path, content).map_err(Error::IoError)
}

/// Renders the template tree at `source_dir` into `dest_dir`.
///
/// # Arguments
/// * `engine` - Renderer applied to path components and file contents
/// * `source_dir` - Template root
/// * `dest_dir` - Output root, created if missing
/// * `context` - Variable values
/// * `ignored` - Relative paths to skip
pub fn render_tree<S, D>(
    engine: &dyn TemplateRenderer,
    source_dir: S,
    dest_dir: D,
    context: &Context,
    ignored: &IgnoreList,
) -> Result<()>
where
    S: AsRef<Path>,
    D: AsRef<Path>,
{
    Processor::new(
        engine,
        source_dir.as_ref(),
        dest_dir.as_ref(),
        context,
        ignored,
    )
    .run()
    .map(|_| ())
}
