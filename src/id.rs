//! Word identifier generation.

use uuid::Uuid;

use crate::types::WordId;

/// Source of unique word identifiers, injected into the timeline builder.
pub trait IdGenerator: Send + Sync {
    /// Produce the next identifier.
    fn next_id(&mut self) -> WordId;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGen;

impl IdGenerator for UuidIdGen {
    fn next_id(&mut self) -> WordId {
        WordId(Uuid::new_v4().to_string())
    }
}

/// Deterministic sequential IDs for tests and golden-file snapshots
/// where stable word IDs are required.
#[derive(Debug, Default, Clone)]
pub struct SequentialIdGen(u64);

impl SequentialIdGen {
    /// Start counting from zero.
    pub const fn new() -> Self {
        Self(0)
    }
}

impl IdGenerator for SequentialIdGen {
    fn next_id(&mut self) -> WordId {
        let id = self.0;
        self.0 += 1;
        WordId(id.to_string())
    }
}
