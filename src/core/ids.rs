//! Sequential identifier generation
//!
//! Account and loan ids are supplied by the caller; the engine only
//! generates ids for the facts it creates itself (transactions, loan
//! payments). A prefixed monotonic counter is unique within one engine
//! instance and keeps test output deterministic.

/// Prefixed monotonic id source, e.g. `TXN-000001`, `TXN-000002`, ...
#[derive(Debug)]
pub struct SequentialId {
    prefix: &'static str,
    next: u64,
}

impl SequentialId {
    /// Create a generator for the given prefix, starting at 1
    pub fn new(prefix: &'static str) -> Self {
        SequentialId { prefix, next: 1 }
    }

    /// Produce the next id
    pub fn next(&mut self) -> String {
        let id = format!("{}-{:06}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_and_prefixed() {
        let mut ids = SequentialId::new("TXN");
        assert_eq!(ids.next(), "TXN-000001");
        assert_eq!(ids.next(), "TXN-000002");

        let mut other = SequentialId::new("PAY");
        assert_eq!(other.next(), "PAY-000001");
    }
}
