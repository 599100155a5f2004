// src/render/backend.rs
//! Layout and drawing backends.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use super::dot::to_dot;
use super::request::RenderRequest;
use crate::error::{ModgraphError, Result};

/// Something that turns a [`RenderRequest`] into a file.
pub trait RenderBackend {
    /// Lays out and draws `request` into `output`.
    ///
    /// # Errors
    /// Returns an error if the output cannot be produced.
    fn render(&self, request: &RenderRequest, output: &Path) -> Result<()>;
}

/// Graphviz output format, picked from the output file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
    Pdf,
    Jpg,
    Dot,
}

impl OutputFormat {
    /// Unknown or missing extensions fall back to PNG.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        match ext.as_deref() {
            Some("svg") => Self::Svg,
            Some("pdf") => Self::Pdf,
            Some("jpg" | "jpeg") => Self::Jpg,
            Some("dot" | "gv") => Self::Dot,
            _ => Self::Png,
        }
    }

    #[must_use]
    pub fn flag(self) -> &'static str {
        match self {
            Self::Png => "-Tpng",
            Self::Svg => "-Tsvg",
            Self::Pdf => "-Tpdf",
            Self::Jpg => "-Tjpg",
            Self::Dot => "-Tdot",
        }
    }
}

/// Pipes DOT through the Graphviz program named by the request layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphvizBackend;

impl RenderBackend for GraphvizBackend {
    fn render(&self, request: &RenderRequest, output: &Path) -> Result<()> {
        ensure_parent(output)?;
        let dot = to_dot(request);
        let format = OutputFormat::from_path(output);
        if format == OutputFormat::Dot {
            return write_text(output, &dot);
        }

        let program = request.layout.program();
        let binary = which::which(program).map_err(|e| {
            ModgraphError::Backend(format!("Graphviz program '{program}' not found: {e}"))
        })?;
        debug!("running {} {} -o {}", binary.display(), format.flag(), output.display());

        let mut command = Command::new(&binary);
        command.arg(format.flag()).arg("-o").arg(output);
        pipe_through(command, program, &dot)
    }
}

/// Feeds `input` to `command` on stdin and waits for it.
///
/// The child is always waited on, so its stderr explains a failed write
/// (for example a broken pipe after an early exit).
fn pipe_through(mut command: Command, program: &str, input: &str) -> Result<()> {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ModgraphError::Backend(format!("failed to spawn {program}: {e}")))?;

    let written = child
        .stdin
        .take()
        .map_or(Ok(()), |mut stdin| stdin.write_all(input.as_bytes()));

    let result = child
        .wait_with_output()
        .map_err(|e| ModgraphError::Backend(format!("failed to wait for {program}: {e}")))?;
    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(ModgraphError::Backend(format!(
            "{program} exited with {}: {}",
            result.status,
            stderr.trim()
        )));
    }
    written.map_err(|e| ModgraphError::Backend(format!("failed to write to {program}: {e}")))
}

/// Writes DOT source next to the requested output (`.dot` extension).
#[derive(Debug, Clone, Copy, Default)]
pub struct DotBackend;

impl DotBackend {
    #[must_use]
    pub fn target(output: &Path) -> PathBuf {
        output.with_extension("dot")
    }
}

impl RenderBackend for DotBackend {
    fn render(&self, request: &RenderRequest, output: &Path) -> Result<()> {
        let target = Self::target(output);
        ensure_parent(&target)?;
        write_text(&target, &to_dot(request))
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| ModgraphError::io(e, dir))
        }
        _ => Ok(()),
    }
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|e| ModgraphError::io(e, path))
}
