//! Id generation for scenario entries
//!
//! Ids are minted through a generator owned by the caller and passed into
//! construction code, so no counter lives in process-wide state and tests
//! get reproducible ids.

/// Source of unique entry ids
pub trait IdGenerator {
    /// Next id, namespaced by `prefix` (e.g. "hire", "cost", "scenario")
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Deterministic counter-based ids: `hire-1`, `cost-2`, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    issued: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue numbering after `issued` ids, e.g. when editing a loaded scenario
    pub fn starting_after(issued: u64) -> Self {
        Self { issued }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> String {
        self.issued += 1;
        format!("{}-{}", prefix, self.issued)
    }
}
