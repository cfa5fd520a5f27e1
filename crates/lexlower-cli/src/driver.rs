//! File discovery, parallel lowering and output for one CLI run.

use anyhow::{Context, Result, bail};
use lexlower_core::{Emit, LowerError, LowerOutput, LoweringSession};
use rayon::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::args::CliArgs;
use crate::config::{ResolvedOptions, resolve_args};
use crate::reporter::Reporter;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_DIAGNOSTICS: i32 = 1;
pub const EXIT_INTERNAL_ERROR: i32 = 2;

const SOURCE_EXTENSION: &str = "js";

/// One input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    /// Path below `--out-dir` the output is written to.
    pub relative: PathBuf,
}

#[derive(Debug)]
pub struct FileResult {
    pub input: InputFile,
    /// Name used in diagnostics.
    pub display_name: String,
    pub outcome: Result<LowerOutput, LowerError>,
}

#[derive(Debug)]
pub struct RunResult {
    pub files: Vec<FileResult>,
    pub options: ResolvedOptions,
    pub out_dir: Option<PathBuf>,
}

impl RunResult {
    /// Number of error diagnostics across all files.
    pub fn error_count(&self) -> usize {
        self.files
            .iter()
            .map(|file| match &file.outcome {
                Ok(_) => 0,
                Err(LowerError::Diagnostics(diagnostics)) => {
                    diagnostics.iter().filter(|d| d.is_error()).count()
                }
                Err(LowerError::Internal(_)) => 1,
            })
            .sum()
    }

    pub fn failed_files(&self) -> usize {
        self.files.iter().filter(|file| file.outcome.is_err()).count()
    }

    pub fn exit_code(&self) -> i32 {
        let internal = self
            .files
            .iter()
            .any(|file| matches!(file.outcome, Err(LowerError::Internal(_))));
        if internal {
            EXIT_INTERNAL_ERROR
        } else if self.failed_files() > 0 {
            EXIT_DIAGNOSTICS
        } else {
            EXIT_SUCCESS
        }
    }
}

// =============================================================================
// Discovery
// =============================================================================

/// Expand the command-line inputs: files are taken as given, directories
/// are searched recursively for `.js` files in name order.
pub fn collect_input_files(inputs: &[PathBuf], cwd: &Path) -> Result<Vec<InputFile>> {
    let mut files = Vec::new();
    for input in inputs {
        let path = cwd.join(input);
        if path.is_dir() {
            for entry in WalkDir::new(&path).sort_by_file_name() {
                let entry = entry.with_context(|| format!("failed to walk {}", path.display()))?;
                let is_source = entry.file_type().is_file()
                    && entry
                        .path()
                        .extension()
                        .is_some_and(|extension| extension == SOURCE_EXTENSION);
                if !is_source {
                    continue;
                }
                let relative = entry
                    .path()
                    .strip_prefix(&path)
                    .unwrap_or(entry.path())
                    .to_path_buf();
                files.push(InputFile {
                    path: entry.path().to_path_buf(),
                    relative,
                });
            }
        } else if path.is_file() {
            let relative = path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| input.clone());
            files.push(InputFile { path, relative });
        } else {
            bail!("file not found: {}", input.display());
        }
    }
    Ok(files)
}

// =============================================================================
// Run
// =============================================================================

/// Lower every input with one shared session. Files are processed in
/// parallel; results keep input order.
#[tracing::instrument(level = "debug", skip_all, fields(inputs = args.files.len()))]
pub fn run(args: &CliArgs, cwd: &Path) -> Result<RunResult> {
    let options = resolve_args(args, cwd)?;
    let inputs = collect_input_files(&args.files, cwd)?;
    if inputs.is_empty() {
        bail!("no .{SOURCE_EXTENSION} files found");
    }
    if inputs.len() > 1 && args.out_dir.is_none() && !options.stats {
        bail!("lowering several files needs --out-dir");
    }

    let session = LoweringSession::new(options.lower.clone());
    let files = inputs
        .into_par_iter()
        .map(|input| -> Result<FileResult> {
            let source = std::fs::read_to_string(&input.path)
                .with_context(|| format!("failed to read {}", input.path.display()))?;
            let display_name = input
                .path
                .strip_prefix(cwd)
                .unwrap_or(&input.path)
                .display()
                .to_string();
            let outcome = session.lower_file(&display_name, &source);
            debug!(file = %display_name, ok = outcome.is_ok(), "lowered file");
            Ok(FileResult {
                input,
                display_name,
                outcome,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let out_dir = args.out_dir.as_ref().map(|dir| cwd.join(dir));
    if let Some(out_dir) = &out_dir
        && !options.stats
    {
        write_outputs(&files, out_dir)?;
    }

    let result = RunResult {
        files,
        options,
        out_dir,
    };
    info!(
        files = result.files.len(),
        failed = result.failed_files(),
        "run finished"
    );
    Ok(result)
}

/// Text of an emitted file: the lowered source, or the tree as pretty JSON.
pub fn emit_contents(emit: &Emit) -> Result<String> {
    match emit {
        Emit::Text(text) => Ok(text.clone()),
        Emit::Tree(tree) => {
            let mut json = serde_json::to_string_pretty(tree).context("failed to serialize tree")?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn write_outputs(files: &[FileResult], out_dir: &Path) -> Result<()> {
    for file in files {
        let Ok(output) = &file.outcome else {
            continue;
        };
        let mut target = out_dir.join(&file.input.relative);
        if matches!(output.emit, Emit::Tree(_)) {
            target.set_extension("json");
        }
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&target, emit_contents(&output.emit)?)
            .with_context(|| format!("failed to write {}", target.display()))?;
        debug!(path = %target.display(), "wrote output");
    }
    Ok(())
}

// =============================================================================
// Printing
// =============================================================================

/// Print lowered sources or statistics to `out` and diagnostics to `err`.
pub fn print_results(
    result: &RunResult,
    reporter: &Reporter,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    let several = result.files.len() > 1;
    for file in &result.files {
        let name = &file.display_name;
        match &file.outcome {
            Err(LowerError::Diagnostics(diagnostics)) => {
                writeln!(err, "{}", reporter.render(name, diagnostics))?;
            }
            Err(error @ LowerError::Internal(_)) => {
                writeln!(err, "{name}: {error}")?;
            }
            Ok(output) => {
                if !output.warnings.is_empty() {
                    writeln!(err, "{}", reporter.render(name, &output.warnings))?;
                }
                if result.options.stats {
                    if several {
                        writeln!(out, "{name}:")?;
                    }
                    write!(out, "{}", output.stats)?;
                } else if result.out_dir.is_none() {
                    write!(out, "{}", emit_contents(&output.emit)?)?;
                }
            }
        }
    }
    if let Some(summary) = reporter.summary(result.error_count(), result.failed_files()) {
        writeln!(err, "{summary}")?;
    }
    Ok(())
}
