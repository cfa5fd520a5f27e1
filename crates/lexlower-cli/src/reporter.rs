use colored::Colorize;
use lexlower_common::{Diagnostic, DiagnosticCategory, DiagnosticLine, DiagnosticRelatedInformation};

/// Renders diagnostics for the terminal.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, file: &str, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(file, diagnostic));
        }
        out
    }

    /// `file:line - error[1005]: message`, followed by one indented line per
    /// piece of related information.
    pub fn format_diagnostic(&self, file: &str, diagnostic: &Diagnostic) -> String {
        let mut output = self.format_location(file, diagnostic.line);
        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category, diagnostic.code));
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        for related in &diagnostic.related_information {
            output.push('\n');
            output.push_str(&self.format_related(file, related));
        }
        output
    }

    fn format_related(&self, file: &str, related: &DiagnosticRelatedInformation) -> String {
        format!(
            "    {} - {}",
            self.format_location(file, related.line),
            related.message_text
        )
    }

    fn format_location(&self, file: &str, line: DiagnosticLine) -> String {
        let location = match line {
            DiagnosticLine::Line(line) => format!("{file}:{line}"),
            DiagnosticLine::Global => file.to_string(),
        };
        if self.color {
            location.cyan().to_string()
        } else {
            location
        }
    }

    fn format_category(&self, category: DiagnosticCategory, code: u32) -> String {
        let label = format!("{}[{code}]", category.as_str());
        if !self.color {
            return label;
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Message => label.blue().to_string(),
        }
    }

    /// `Found 2 errors in 1 file.`, or `None` when there is nothing to say.
    pub fn summary(&self, errors: usize, files: usize) -> Option<String> {
        if errors == 0 {
            return None;
        }
        let errors_word = if errors == 1 { "error" } else { "errors" };
        let files_word = if files == 1 { "file" } else { "files" };
        let text = format!("Found {errors} {errors_word} in {files} {files_word}.");
        Some(if self.color {
            text.bold().to_string()
        } else {
            text
        })
    }
}
