use chrono::{DateTime, Utc};

use crate::domain::TransactionId;
use crate::errors::{LedgerError, Result};

/// Clock abstracts access to the current timestamp so the store stays deterministic in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Millisecond timestamp from `clock`, bumped past `last` when the clock has
/// not moved forward since the previous id. Fails once `last` is `i64::MAX`.
pub fn next_transaction_id(clock: &dyn Clock, last: Option<TransactionId>) -> Result<TransactionId> {
    let candidate = clock.now().timestamp_millis();
    match last {
        Some(previous) if candidate <= previous => previous
            .checked_add(1)
            .ok_or(LedgerError::IdExhausted(previous)),
        _ => Ok(candidate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ids_follow_the_clock() {
        let clock = FixedClock(Utc.timestamp_millis_opt(1_700_000_000_123).unwrap());
        assert_eq!(next_transaction_id(&clock, None).unwrap(), 1_700_000_000_123);
        assert_eq!(next_transaction_id(&clock, Some(5)).unwrap(), 1_700_000_000_123);
    }

    #[test]
    fn ids_stay_increasing_when_clock_stalls() {
        let clock = FixedClock(Utc.timestamp_millis_opt(1_000).unwrap());
        let first = next_transaction_id(&clock, None).unwrap();
        let second = next_transaction_id(&clock, Some(first)).unwrap();
        let third = next_transaction_id(&clock, Some(5_000)).unwrap();
        assert_eq!(second, first + 1);
        assert_eq!(third, 5_001);
    }

    #[test]
    fn largest_id_leaves_no_successor() {
        let clock = FixedClock(Utc.timestamp_millis_opt(1_000).unwrap());
        assert!(matches!(
            next_transaction_id(&clock, Some(i64::MAX)),
            Err(LedgerError::IdExhausted(i64::MAX))
        ));
        assert_eq!(next_transaction_id(&clock, Some(i64::MAX - 1)).unwrap(), i64::MAX);
    }
}
