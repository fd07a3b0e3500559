//! Sequenced state slots.
//!
//! A [`Slot`] holds one piece of last-writer-wins dashboard state. Every operation
//! that may write the slot takes a [`Ticket`] before its round-trip and settles it
//! afterwards; the slot's [`UpdatePolicy`] decides whether a settlement lands.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// How a slot resolves completions of overlapping operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdatePolicy {
    /// Every successful completion overwrites, so the last to finish wins.
    LastCompleted,
    /// A completion lands only if it started after the last one that landed.
    #[default]
    LatestIssued,
}

impl fmt::Display for UpdatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdatePolicy::LastCompleted => f.write_str("last-completed"),
            UpdatePolicy::LatestIssued => f.write_str("latest-issued"),
        }
    }
}

impl FromStr for UpdatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last-completed" => Ok(UpdatePolicy::LastCompleted),
            "latest-issued" => Ok(UpdatePolicy::LatestIssued),
            other => Err(format!(
                "unknown update policy '{}', expected 'last-completed' or 'latest-issued'",
                other
            )),
        }
    }
}

/// Sequence number handed to an operation when it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// Outcome of settling a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    Stale,
}

#[derive(Debug)]
struct SlotInner<T> {
    value: Option<T>,
    issued: u64,
    // Ticket of the value currently held; failed operations never advance it.
    applied: u64,
}

/// A single piece of shared state guarded by request sequencing.
#[derive(Debug)]
pub struct Slot<T> {
    name: &'static str,
    policy: UpdatePolicy,
    inner: Mutex<SlotInner<T>>,
}

impl<T: Clone> Slot<T> {
    pub fn new(name: &'static str, policy: UpdatePolicy) -> Self {
        Self {
            name,
            policy,
            inner: Mutex::new(SlotInner {
                value: None,
                issued: 0,
                applied: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotInner<T>> {
        // The critical sections never panic midway, so a poisoned value is still valid.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn policy(&self) -> UpdatePolicy {
        self.policy
    }

    /// Register a new in-flight operation.
    pub fn begin(&self) -> Ticket {
        let mut inner = self.lock();
        inner.issued += 1;
        Ticket(inner.issued)
    }

    /// Offer the result of a successful operation to the slot.
    pub fn settle(&self, ticket: Ticket, value: T) -> Settlement {
        let mut inner = self.lock();
        let accept = match self.policy {
            UpdatePolicy::LastCompleted => true,
            UpdatePolicy::LatestIssued => ticket.0 > inner.applied,
        };

        if accept {
            inner.value = Some(value);
            inner.applied = ticket.0;
            Settlement::Applied
        } else {
            debug!(
                "Discarding stale {} update #{} (newer #{} already applied)",
                self.name, ticket.0, inner.applied
            );
            Settlement::Stale
        }
    }

    /// Current value, if any operation has landed yet.
    pub fn get(&self) -> Option<T> {
        self.lock().value.clone()
    }

    /// Number of tickets handed out so far.
    pub fn issued(&self) -> u64 {
        self.lock().issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_issued_drops_older_ticket() {
        let slot = Slot::new("command", UpdatePolicy::LatestIssued);
        let first = slot.begin();
        let second = slot.begin();

        assert_eq!(slot.settle(second, "b"), Settlement::Applied);
        assert_eq!(slot.settle(first, "a"), Settlement::Stale);
        assert_eq!(slot.get(), Some("b"));
    }

    #[test]
    fn test_last_completed_accepts_every_settlement() {
        let slot = Slot::new("command", UpdatePolicy::LastCompleted);
        let first = slot.begin();
        let second = slot.begin();

        assert_eq!(slot.settle(second, "b"), Settlement::Applied);
        assert_eq!(slot.settle(first, "a"), Settlement::Applied);
        assert_eq!(slot.get(), Some("a"));
    }

    #[test]
    fn test_unsettled_ticket_leaves_value() {
        let slot = Slot::new("series", UpdatePolicy::LatestIssued);
        let ok = slot.begin();
        slot.settle(ok, 1);
        let _failed = slot.begin();
        assert_eq!(slot.get(), Some(1));
        assert_eq!(slot.issued(), 2);
    }

    #[test]
    fn test_failed_newer_ticket_does_not_block_older() {
        let slot = Slot::new("command", UpdatePolicy::LatestIssued);
        let older = slot.begin();
        let _failed = slot.begin();

        assert_eq!(slot.settle(older, "fetched"), Settlement::Applied);
        assert_eq!(slot.get(), Some("fetched"));
    }

    #[test]
    fn test_newest_success_still_wins_over_late_older_one() {
        let slot = Slot::new("command", UpdatePolicy::LatestIssued);
        let first = slot.begin();
        let second = slot.begin();
        let third = slot.begin();

        assert_eq!(slot.settle(third, 3), Settlement::Applied);
        assert_eq!(slot.settle(first, 1), Settlement::Stale);
        assert_eq!(slot.settle(second, 2), Settlement::Stale);
        assert_eq!(slot.get(), Some(3));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "last-completed".parse::<UpdatePolicy>(),
            Ok(UpdatePolicy::LastCompleted)
        );
        assert!("newest".parse::<UpdatePolicy>().is_err());
        assert_eq!(UpdatePolicy::default().to_string(), "latest-issued");
    }
}
