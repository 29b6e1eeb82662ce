use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use std::fmt;

use crate::tag::Span;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The scenario will fail at runtime.
    Error,
    /// The scenario works but probably not as intended.
    Warning,
}

/// A finding about one authored text, with the byte span it points at.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// How bad it is.
    pub severity: Severity,
    /// Where the text lives in the scenario, e.g. `characters.king.treasure[1]`.
    pub origin: String,
    /// The authored text the span indexes into.
    pub source: String,
    /// Byte range inside `source`.
    pub span: Span,
    /// Human-readable description.
    pub message: String,
    /// Optional label shown under the span.
    pub label: Option<String>,
}

impl Diagnostic {
    /// Create an error.
    pub fn error(
        origin: impl Into<String>,
        source: impl Into<String>,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            origin: origin.into(),
            source: source.into(),
            span,
            message: message.into(),
            label: None,
        }
    }

    /// Create a warning.
    pub fn warning(
        origin: impl Into<String>,
        source: impl Into<String>,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(origin, source, span, message)
        }
    }

    /// Attach a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Check if this is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{prefix}: {}: {}", self.origin, self.message)
    }
}

/// Render diagnostics using ariadne for pretty terminal output.
pub fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let mut output = Vec::new();

    for diag in diagnostics {
        let kind = match diag.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
        };
        let color = match diag.severity {
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
        };

        let origin = diag.origin.as_str();
        let span = (origin, diag.span.clone());
        // spans are byte offsets into the authored text
        let mut report = Report::build(kind, span)
            .with_config(Config::default().with_index_type(IndexType::Byte))
            .with_message(&diag.message);

        let label_text = diag.label.as_deref().unwrap_or(&diag.message);
        report = report.with_label(
            Label::new((origin, diag.span.clone()))
                .with_message(label_text)
                .with_color(color),
        );

        report
            .finish()
            .write((origin, Source::from(diag.source.as_str())), &mut output)
            .ok();
    }

    String::from_utf8(output).unwrap_or_default()
}
