use std::collections::HashSet;

use crate::data_structures::internal::node::{HEAD_VALUE, TAIL_VALUE};
use crate::error::InvariantViolation;

/// Accumulates what a diagnostic walk sees and reconciles it with the
/// mutation counters.
///
/// A set walks its live nodes head to tail, sentinels included, feeding each
/// value to [`ListAudit::visit`] and each counter it owns to
/// [`ListAudit::record_counters`]. Nothing here touches the list.
///
/// Only the first violation is kept, mirroring a fail-fast assertion.
///
#[derive(Debug, Default)]
pub(crate) struct ListAudit {
    first: Option<i32>,
    last: Option<i32>,
    seen: HashSet<i32>,
    nodes: usize,
    adds: usize,
    removes: usize,
    violation: Option<InvariantViolation>,
}

impl ListAudit {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record one live node, in traversal order.
    pub(crate) fn visit(&mut self, value: i32) {
        self.nodes += 1;

        if let Some(previous) = self.last {
            if !self.seen.insert(value) {
                self.fail(InvariantViolation::Duplicate(value));
            } else if previous >= value {
                self.fail(InvariantViolation::Unordered { previous, value });
            }
        } else {
            self.first = Some(value);
            self.seen.insert(value);
        }

        self.last = Some(value);
    }

    /// Fold a mutation counter pair into the running totals.
    pub(crate) fn record_counters(&mut self, adds: usize, removes: usize) {
        self.adds += adds;
        self.removes += removes;
    }

    /// Live members seen, sentinels excluded.
    pub(crate) fn members(&self) -> usize {
        self.nodes.saturating_sub(2)
    }

    /// Check the sentinels and the size reconciliation, then report the first
    /// violation seen, if any.
    pub(crate) fn finish(mut self) -> Result<(), InvariantViolation> {
        if let Some(violation) = self.violation.take() {
            return Err(violation);
        }

        match self.first {
            Some(HEAD_VALUE) => {}
            Some(value) => return Err(InvariantViolation::HeadSentinel(value)),
            None => return Err(InvariantViolation::HeadSentinel(TAIL_VALUE)),
        }

        let last = self.last.unwrap_or(HEAD_VALUE);
        if last != TAIL_VALUE {
            return Err(InvariantViolation::TailSentinel(last));
        }

        let actual = self.nodes as i64;
        let expected = 2 + self.adds as i64 - self.removes as i64;
        if actual != expected {
            return Err(InvariantViolation::SizeMismatch { actual, expected });
        }

        Ok(())
    }

    fn fail(&mut self, violation: InvariantViolation) {
        if self.violation.is_none() {
            self.violation = Some(violation);
        }
    }
}
