//! The lowering pipeline for one source text.

use lexlower_binder::BinderState;
use lexlower_checker::CheckerState;
use lexlower_common::{Diagnostic, LineMap};
use lexlower_lowering::{LoweringState, LoweringStats, apply_edits};
use lexlower_parser::{ParserState, estree::to_estree};
use serde::Serialize;
use tracing::debug;

use crate::error::LowerError;
use crate::options::LowerOptions;

/// What a successful run produces.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Emit {
    /// The patched source text.
    Text(String),
    /// The lowered syntax tree in ESTree shape.
    Tree(serde_json::Value),
}

impl Emit {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Tree(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LowerOutput {
    pub emit: Emit,
    pub stats: LoweringStats,
    /// Advisories that did not block lowering.
    pub warnings: Vec<Diagnostic>,
}

/// Runs the pipeline with a fixed set of options.
///
/// A session keeps no state between calls, so one session can lower many
/// files, including from several threads at once.
#[derive(Clone, Debug, Default)]
pub struct LoweringSession {
    options: LowerOptions,
}

impl LoweringSession {
    pub fn new(options: LowerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LowerOptions {
        &self.options
    }

    /// Lower `source`. `file_name` is only used in logs.
    #[tracing::instrument(level = "debug", skip(self, source), fields(len = source.len()))]
    pub fn lower_file(&self, file_name: &str, source: &str) -> Result<LowerOutput, LowerError> {
        let line_map = LineMap::build(source);

        let mut parser = ParserState::new(file_name.to_string(), source.to_string());
        let root = parser.parse_source_file();
        if !parser.get_diagnostics().is_empty() {
            let diagnostics = parser
                .get_diagnostics()
                .iter()
                .map(|d| {
                    let line = line_map.line_number(d.start);
                    Diagnostic::error(line, d.start, d.length, d.message.clone(), d.code)
                })
                .collect();
            return Err(LowerError::Diagnostics(diagnostics));
        }
        let mut arena = parser.into_arena();

        let mut binder = BinderState::new(self.options.binder_options());
        binder.bind_source_file(&arena, root, &line_map);
        let mut diagnostics = binder.take_diagnostics();

        let mut checker =
            CheckerState::new(&arena, &mut binder, &line_map, self.options.checker_options());
        checker.check_source_file(root);
        diagnostics.extend(checker.take_diagnostics());

        if diagnostics.iter().any(Diagnostic::is_error) {
            debug!(diagnostics = diagnostics.len(), "input rejected");
            return Err(LowerError::Diagnostics(diagnostics));
        }

        let mut lowering = LoweringState::new(&mut arena, &mut binder, &line_map);
        lowering.lower_source_file(root)?;
        let (edits, stats) = lowering.into_parts();

        let emit = if self.options.emit_tree {
            Emit::Tree(to_estree(&arena, root, &line_map))
        } else {
            Emit::Text(apply_edits(source, edits)?)
        };
        Ok(LowerOutput {
            emit,
            stats,
            warnings: diagnostics,
        })
    }
}

/// Lower `source` with `options`.
pub fn lower(source: &str, options: &LowerOptions) -> Result<LowerOutput, LowerError> {
    LoweringSession::new(options.clone()).lower_file("<input>", source)
}

/// Lower `source` to text, ignoring `emit_tree`.
pub fn lower_source(source: &str, options: &LowerOptions) -> Result<String, LowerError> {
    let options = LowerOptions {
        emit_tree: false,
        ..options.clone()
    };
    let output = lower(source, &options)?;
    match output.emit {
        Emit::Text(text) => Ok(text),
        Emit::Tree(tree) => Ok(tree.to_string()),
    }
}
