//! Sinks for non-fatal decoding issues

use crate::error::Warning;

/// Receiver for [`Warning`]s raised while decoding
///
/// Reporting never changes how a document is parsed. A decoder without a
/// sink produces the same tree, it only loses the observability.
pub trait Diagnostics {
    fn report(&mut self, warning: Warning);
}

/// Collects warnings in order of appearance
impl Diagnostics for Vec<Warning> {
    fn report(&mut self, warning: Warning) {
        self.push(warning);
    }
}

/// Drops every warning
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreDiagnostics;

impl Diagnostics for IgnoreDiagnostics {
    fn report(&mut self, _warning: Warning) {}
}

/// Forwards every warning to `tracing` at `WARN` level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&mut self, warning: Warning) {
        match warning {
            Warning::TruncatedAttribute {
                tag,
                needed,
                remaining,
            } => tracing::warn!(?tag, needed, remaining, "truncated attribute, attribute reading stopped"),
            Warning::UnknownAttribute { tag, remaining } => {
                tracing::warn!(tag, remaining, "unknown attribute, attribute reading stopped")
            }
            Warning::TruncatedString {
                kind,
                declared,
                available,
            } => tracing::warn!(?kind, ?declared, available, "truncated name"),
            Warning::MissingCatalogueEntry { id } => {
                tracing::warn!(id, "item missing from catalogue, assuming no count byte")
            }
            Warning::DiscardedChildren { kind, count } => {
                tracing::warn!(?kind, count, "children under terminal node discarded")
            }
            Warning::TrailingBytes { offset, len } => {
                tracing::warn!(offset, len, "trailing bytes after root node")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_collects_in_order() {
        let mut warnings: Vec<Warning> = Vec::new();
        warnings.report(Warning::MissingCatalogueEntry { id: 1 });
        warnings.report(Warning::TrailingBytes { offset: 10, len: 2 });
        assert_eq!(
            warnings,
            vec![
                Warning::MissingCatalogueEntry { id: 1 },
                Warning::TrailingBytes { offset: 10, len: 2 },
            ]
        );
    }

    #[test]
    fn tracing_sink_accepts_every_warning() {
        let mut sink = TracingDiagnostics;
        sink.report(Warning::UnknownAttribute {
            tag: 0x42,
            remaining: 3,
        });
        sink.report(Warning::DiscardedChildren {
            kind: crate::NodeKind::Town,
            count: 1,
        });
    }
}
