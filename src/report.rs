/*! Run accounting.

Totals reported at the end of a load: what was skipped during parsing, what
was generated, and how the store writes went.
!*/

/// Outcome of a whole load run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Malformed input lines that were counted and dropped.
    pub lines_skipped: usize,
    /// Records generated from the index.
    pub records_generated: usize,
    /// Write requests the store acknowledged.
    pub written: usize,
    /// Write requests that exhausted their retries.
    pub failed: usize,
}

impl RunReport {
    /// A run succeeds when every generated write made it to the store.
    /// Skipped input lines do not fail a run.
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}
