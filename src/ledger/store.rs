//! Success counts and the working URL cache.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use dashmap::DashMap;

use crate::candidate::Candidate;
use crate::observability::metrics;

/// Owned snapshot of success counts keyed by candidate.
pub type ConnectionStats = HashMap<Candidate, u64>;

/// Connection-success ledger plus the "last known good" endpoint.
///
/// Shared by reference (usually behind an `Arc`) between the resolver and
/// every caller that needs the current API base URL.
#[derive(Debug, Default)]
pub struct ConnectionLedger {
    counts: DashMap<Candidate, u64>,
    working: ArcSwapOption<Candidate>,
}

impl ConnectionLedger {
    /// Create an empty ledger with no working URL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a confirmed success and make `candidate` the working URL.
    ///
    /// Returns the new count for `candidate`.
    pub fn record_success(&self, candidate: &Candidate) -> u64 {
        let count = {
            let mut entry = self.counts.entry(candidate.clone()).or_insert(0);
            *entry += 1;
            *entry
        };
        self.working.store(Some(Arc::new(candidate.clone())));

        metrics::record_ledger_size(self.counts.len());
        tracing::debug!(url = %candidate, successes = count, "Recorded successful connection");
        count
    }

    /// Recorded success count for one candidate (0 if never seen).
    pub fn successes(&self, candidate: &Candidate) -> u64 {
        self.counts.get(candidate).map(|r| *r.value()).unwrap_or(0)
    }

    /// Copy of every recorded count.
    pub fn stats(&self) -> ConnectionStats {
        self.counts
            .iter()
            .map(|r| (r.key().clone(), *r.value()))
            .collect()
    }

    /// Clear all counts. The working URL is left in place.
    pub fn reset(&self) {
        self.counts.clear();
        metrics::record_ledger_size(0);
        tracing::debug!("Connection stats reset");
    }

    /// The cached working URL, if any.
    pub fn working_url(&self) -> Option<Candidate> {
        self.working.load_full().map(|c| (*c).clone())
    }

    /// Forget the working URL so the next resolution runs in full.
    pub fn clear_working_url(&self) {
        self.working.store(None);
        tracing::debug!("Working URL cleared");
    }

    /// Reorder candidates most-reliable-first.
    ///
    /// Sorts descending by success count; equal counts keep their input
    /// order.
    pub fn prioritize(&self, candidates: &[Candidate]) -> Vec<Candidate> {
        let mut ordered = candidates.to_vec();
        ordered.sort_by_key(|c| Reverse(self.successes(c)));
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(url: &str) -> Candidate {
        Candidate::new(url)
    }

    #[test]
    fn test_prioritize_by_success_count() {
        let ledger = ConnectionLedger::new();
        for _ in 0..3 {
            ledger.record_success(&c("A"));
        }
        for _ in 0..5 {
            ledger.record_success(&c("B"));
        }

        let ordered = ledger.prioritize(&[c("A"), c("B"), c("C")]);
        assert_eq!(ordered, vec![c("B"), c("A"), c("C")]);
    }

    #[test]
    fn test_prioritize_ties_keep_input_order() {
        let ledger = ConnectionLedger::new();
        ledger.record_success(&c("Z"));

        let ordered = ledger.prioritize(&[c("X"), c("Y"), c("Z"), c("W")]);
        assert_eq!(ordered, vec![c("Z"), c("X"), c("Y"), c("W")]);
    }

    #[test]
    fn test_record_twice_counts_two() {
        let ledger = ConnectionLedger::new();
        let url = c("http://10.0.0.9/api");
        assert_eq!(ledger.record_success(&url), 1);
        assert_eq!(ledger.record_success(&url), 2);

        let stats = ledger.stats();
        assert_eq!(stats.get(&url), Some(&2));
        assert_eq!(stats.len(), 1);
        assert_eq!(ledger.working_url(), Some(url));
    }

    #[test]
    fn test_working_url_follows_latest_success() {
        let ledger = ConnectionLedger::new();
        assert_eq!(ledger.working_url(), None);

        ledger.record_success(&c("A"));
        ledger.record_success(&c("B"));
        assert_eq!(ledger.working_url(), Some(c("B")));
    }

    #[test]
    fn test_reset_keeps_working_url() {
        let ledger = ConnectionLedger::new();
        ledger.record_success(&c("A"));
        ledger.record_success(&c("B"));
        ledger.record_success(&c("B"));

        ledger.reset();
        assert!(ledger.stats().is_empty());
        assert_eq!(ledger.working_url(), Some(c("B")));
        assert_eq!(
            ledger.prioritize(&[c("A"), c("B"), c("C")]),
            vec![c("A"), c("B"), c("C")]
        );

        ledger.clear_working_url();
        assert_eq!(ledger.working_url(), None);
    }

    #[test]
    fn test_stats_is_a_snapshot() {
        let ledger = ConnectionLedger::new();
        ledger.record_success(&c("A"));

        let mut snapshot = ledger.stats();
        snapshot.insert(c("A"), 100);
        snapshot.insert(c("B"), 7);

        assert_eq!(ledger.successes(&c("A")), 1);
        assert_eq!(ledger.successes(&c("B")), 0);
    }
}
