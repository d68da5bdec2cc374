//! Skip-with-warning reporting for the resolution stages.
//!
//! Resolver, calculator and trajectory builder never fail on bad records.
//! They drop them and describe what was dropped to a [`DiagnosticSink`]
//! supplied by the caller.

use serde::Serialize;

/// A recoverable problem found while resolving offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Diagnostic {
    /// An offset is defined but no instruction uses it.
    UnusedDefinition { offset: String },
    /// An instruction uses an offset that has no definition.
    UndefinedOffset { offset: String, reference: String },
    /// An offset is applied relative to a reference missing from the frame.
    UnknownReference { offset: String, reference: String },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnusedDefinition { offset } => {
                write!(f, "Offset {} is defined but never used", offset)
            }
            Diagnostic::UndefinedOffset { offset, reference } => {
                write!(f, "Offset not found: {} (used with {})", offset, reference)
            }
            Diagnostic::UnknownReference { offset, reference } => {
                write!(f, "Reference position {} not found for {}", reference, offset)
            }
        }
    }
}

/// Receiver for diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in report order.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Logs every diagnostic at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
    }
}
