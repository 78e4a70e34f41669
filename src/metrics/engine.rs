//! Diet metrics over a user's meal ledger.
//!
//! The ledger is read in update order (`updated_at`, then `update_seq`) and
//! reduced to one in-diet flag per meal. All metrics, including the best
//! streak, come from a single pass over that sequence.

use std::cmp::Ordering;

use thiserror::Error;

use crate::meals::LedgerEntry;

/// Aggregates derived from one ordered pass over the in-diet flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub total: u64,
    pub in_diet: u64,
    pub out_of_diet: u64,
    pub best_streak: u64,
}

impl Metrics {
    pub fn from_ordered(flags: &OrderedFlags) -> Self {
        compute_metrics(flags.as_slice())
    }
}

/// Single pass: `current` counts the running in-diet streak and resets on an
/// out-of-diet meal, `best` keeps the largest value it reached.
pub fn compute_metrics(flags: &[bool]) -> Metrics {
    let mut in_diet = 0u64;
    let mut current = 0u64;
    let mut best = 0u64;

    for &flag in flags {
        if flag {
            in_diet += 1;
            current += 1;
            if current > best {
                best = current;
            }
        } else {
            current = 0;
        }
    }

    let total = flags.len() as u64;
    Metrics {
        total,
        in_diet,
        out_of_diet: total - in_diet,
        best_streak: best,
    }
}

/// The caller handed over ledger entries the streak cannot be computed from.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("ledger entry {position} sorts before its predecessor")]
    Unordered { position: usize },

    #[error("ledger entry {position} shares its ordering key with its predecessor")]
    AmbiguousOrder { position: usize },
}

/// In-diet flags in ascending update order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedFlags(Vec<bool>);

impl OrderedFlags {
    /// Accepts entries that are already strictly ascending by
    /// (`updated_at`, `update_seq`).
    pub fn from_entries(entries: &[LedgerEntry]) -> Result<Self, PreconditionError> {
        for (position, pair) in entries.windows(2).enumerate() {
            match order_key_cmp(&pair[0], &pair[1]) {
                Ordering::Less => {}
                Ordering::Equal => {
                    return Err(PreconditionError::AmbiguousOrder {
                        position: position + 1,
                    })
                }
                Ordering::Greater => {
                    return Err(PreconditionError::Unordered {
                        position: position + 1,
                    })
                }
            }
        }
        Ok(Self(entries.iter().map(|e| e.is_in_diet).collect()))
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

/// Sorts entries into update order. The sort is stable, so entries with
/// equal keys keep the order they were given in.
pub fn sort_update_order(entries: &mut [LedgerEntry]) {
    entries.sort_by(order_key_cmp);
}

fn order_key_cmp(a: &LedgerEntry, b: &LedgerEntry) -> Ordering {
    a.updated_at
        .cmp(&b.updated_at)
        .then(a.update_seq.cmp(&b.update_seq))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use time::OffsetDateTime;

    const T: bool = true;
    const F: bool = false;

    fn entry(updated_at: OffsetDateTime, update_seq: i64, is_in_diet: bool) -> LedgerEntry {
        LedgerEntry {
            updated_at,
            update_seq,
            is_in_diet,
        }
    }

    fn check_invariants(flags: &[bool]) {
        let m = compute_metrics(flags);
        assert_eq!(m.total, m.in_diet + m.out_of_diet, "{flags:?}");
        assert!(m.best_streak <= m.in_diet, "{flags:?}");
    }

    #[test]
    fn empty_sequence_is_all_zero() {
        assert_eq!(compute_metrics(&[]), Metrics::default());
    }

    #[test]
    fn single_meal() {
        assert_eq!(compute_metrics(&[T]).best_streak, 1);
        assert_eq!(compute_metrics(&[F]).best_streak, 0);
        assert_eq!(compute_metrics(&[F]).out_of_diet, 1);
    }

    #[test]
    fn all_out_of_diet_has_no_streak() {
        let m = compute_metrics(&[F, F, F]);
        assert_eq!(m.total, 3);
        assert_eq!(m.in_diet, 0);
        assert_eq!(m.best_streak, 0);
    }

    #[test]
    fn streak_depends_on_order() {
        assert_eq!(compute_metrics(&[T, F, T, T]).best_streak, 2);
        assert_eq!(compute_metrics(&[T, T, F, T]).best_streak, 2);
        assert_eq!(compute_metrics(&[T, T, T, F]).best_streak, 3);
    }

    #[test]
    fn six_meal_log() {
        let m = compute_metrics(&[F, T, T, T, F, T]);
        assert_eq!(
            m,
            Metrics {
                total: 6,
                in_diet: 4,
                out_of_diet: 2,
                best_streak: 3,
            }
        );
    }

    #[test]
    fn repeated_runs_agree() {
        let flags = [T, F, T, T, T, F, F, T];
        assert_eq!(compute_metrics(&flags), compute_metrics(&flags));
    }

    #[test]
    fn invariants_hold_for_every_sequence_up_to_eight() {
        for len in 0..=8usize {
            for bits in 0u32..(1 << len) {
                let flags: Vec<bool> = (0..len).map(|i| bits & (1 << i) != 0).collect();
                check_invariants(&flags);
            }
        }
    }

    #[test]
    fn from_entries_accepts_ascending_keys() {
        let at = datetime!(2022-08-12 15:00 UTC);
        let entries = vec![
            entry(at, 1, F),
            entry(at, 2, T),
            entry(datetime!(2022-08-13 09:00 UTC), 3, T),
        ];
        let flags = OrderedFlags::from_entries(&entries).unwrap();
        assert_eq!(flags.as_slice(), &[F, T, T]);
        assert_eq!(Metrics::from_ordered(&flags).best_streak, 2);
    }

    #[test]
    fn from_entries_rejects_out_of_order() {
        let entries = vec![
            entry(datetime!(2022-08-13 09:00 UTC), 1, T),
            entry(datetime!(2022-08-12 09:00 UTC), 2, T),
        ];
        assert_eq!(
            OrderedFlags::from_entries(&entries),
            Err(PreconditionError::Unordered { position: 1 })
        );
    }

    #[test]
    fn from_entries_rejects_duplicate_keys() {
        let at = datetime!(2022-08-12 09:00 UTC);
        let entries = vec![entry(at, 1, T), entry(at, 2, F), entry(at, 2, T)];
        assert_eq!(
            OrderedFlags::from_entries(&entries),
            Err(PreconditionError::AmbiguousOrder { position: 2 })
        );
    }

    #[test]
    fn sort_orders_by_time_then_seq() {
        let mut entries = vec![
            entry(datetime!(2022-08-14 10:00 UTC), 5, F),
            entry(datetime!(2022-08-12 10:00 UTC), 9, T),
            entry(datetime!(2022-08-12 10:00 UTC), 2, T),
        ];
        sort_update_order(&mut entries);
        let seqs: Vec<i64> = entries.iter().map(|e| e.update_seq).collect();
        assert_eq!(seqs, vec![2, 9, 5]);
        let flags = OrderedFlags::from_entries(&entries).unwrap();
        assert_eq!(flags.as_slice(), &[T, T, F]);
    }

    #[test]
    fn sort_keeps_input_order_for_equal_keys() {
        let at = datetime!(2022-08-12 10:00 UTC);
        let mut entries = vec![
            entry(datetime!(2022-08-13 10:00 UTC), 0, T),
            entry(at, 1, F),
            entry(at, 1, T),
        ];
        sort_update_order(&mut entries);
        let flags: Vec<bool> = entries.iter().map(|e| e.is_in_diet).collect();
        assert_eq!(flags, vec![F, T, T]);
    }
}
