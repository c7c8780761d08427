//! Diagnostic records for translation decisions.
//!
//! Every fallback or heuristic the converter applies leaves exactly one
//! record here, tagged with the source span it explains. The sink is
//! append-only and ordered by walk order; nothing is deduplicated or
//! dropped, and the full list is returned to the caller with the target
//! tree. Rendering goes through ariadne with colors off so the output is
//! stable enough to assert against.

use std::fmt;
use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use recast_common::{LineIndex, Span};
use serde::Serialize;

// ── Codes and severities ─────────────────────────────────────────────────

/// Which rule produced a record.
///
/// The code identifies the rule; the severity on the record says how
/// serious this particular occurrence is. A code keeps its identity even
/// when an occurrence is escalated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Code {
    /// A name or type the semantic model could not resolve; a documented
    /// default was applied.
    UnresolvedSymbol,
    /// A form with more than one valid rendering, translated using the
    /// documented default.
    AmbiguousTranslation,
    /// A source construct with no translation rule; the node was replaced
    /// with a placeholder.
    UnsupportedConstruct,
    /// A recognized legacy runtime call with no registered equivalent; the
    /// call was emitted unchanged.
    RuntimeMappingGap,
}

impl Code {
    pub fn as_str(&self) -> &'static str {
        match self {
            Code::UnresolvedSymbol => "W0001",
            Code::AmbiguousTranslation => "W0002",
            Code::RuntimeMappingGap => "W0003",
            Code::UnsupportedConstruct => "E0001",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{s}")
    }
}

// ── Records ──────────────────────────────────────────────────────────────

/// One translation decision, attached to the source node it explains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub code: Code,
    pub severity: Severity,
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    pub fn unresolved_symbol(span: Span, message: impl Into<String>) -> Self {
        Self {
            code: Code::UnresolvedSymbol,
            severity: Severity::Warning,
            span,
            message: message.into(),
        }
    }

    pub fn ambiguous(span: Span, message: impl Into<String>) -> Self {
        Self {
            code: Code::AmbiguousTranslation,
            severity: Severity::Warning,
            span,
            message: message.into(),
        }
    }

    pub fn unsupported(span: Span, message: impl Into<String>) -> Self {
        Self {
            code: Code::UnsupportedConstruct,
            severity: Severity::Error,
            span,
            message: message.into(),
        }
    }

    pub fn mapping_gap(span: Span, message: impl Into<String>) -> Self {
        Self {
            code: Code::RuntimeMappingGap,
            severity: Severity::Warning,
            span,
            message: message.into(),
        }
    }

    /// Replace the code's default severity for this occurrence.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

// ── Sink ─────────────────────────────────────────────────────────────────

/// Append-only, ordered record sink for one conversion unit.
#[derive(Debug, Default)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.records.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.records
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.records
    }
}

// ── Rendering ────────────────────────────────────────────────────────────

/// One-line summaries in `file:line:col: severity[code]: message` form, in
/// record order.
pub fn summarize(diagnostics: &[Diagnostic], filename: &str, index: &LineIndex) -> Vec<String> {
    diagnostics
        .iter()
        .map(|d| {
            let (line, col) = index.line_col(d.span.start);
            format!(
                "{filename}:{line}:{col}: {}[{}]: {}",
                d.severity, d.code, d.message
            )
        })
        .collect()
}

/// Render one record into a labeled, colorless ariadne report over the
/// original source text.
pub fn render_diagnostic(diagnostic: &Diagnostic, source: &str) -> String {
    let config = Config::default().with_color(false);
    let source_len = source.len();

    // Clamp a range to be valid within source bounds; ariadne needs at
    // least a 1-char span.
    let clamp = |r: Range<usize>| -> Range<usize> {
        let s = r.start.min(source_len);
        let e = r.end.min(source_len).max(s);
        if s == e {
            s..e.saturating_add(1).min(source_len)
        } else {
            s..e
        }
    };

    let range = clamp(diagnostic.span.range());
    let (kind, color) = match diagnostic.severity {
        Severity::Error => (ReportKind::Error, Color::Red),
        Severity::Warning => (ReportKind::Warning, Color::Yellow),
        Severity::Info => (ReportKind::Advice, Color::Blue),
    };
    let (label, help) = match diagnostic.code {
        Code::UnresolvedSymbol => ("no declaration found for this name", None),
        Code::AmbiguousTranslation => (
            "translated using the documented default",
            Some("check the rendered form against the original intent"),
        ),
        Code::UnsupportedConstruct => (
            "no translation rule for this construct",
            Some("port this statement by hand"),
        ),
        Code::RuntimeMappingGap => (
            "no registered runtime equivalent",
            Some("the call is emitted unchanged"),
        ),
    };

    let mut builder = Report::build(kind, range.clone())
        .with_code(diagnostic.code.as_str())
        .with_message(&diagnostic.message)
        .with_config(config)
        .with_label(Label::new(range).with_message(label).with_color(color));
    if let Some(help) = help {
        builder.set_help(help);
    }
    let report = builder.finish();

    let mut buf = Vec::new();
    report
        .write(Source::from(source), &mut buf)
        .expect("failed to write diagnostic");
    String::from_utf8(buf).expect("diagnostic output should be valid UTF-8")
}
