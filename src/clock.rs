//! Monotonically-observed wall clock and record id generation.
//!
//! Record timestamps and ids both come from `now_millis`, which observes the
//! wall clock but never returns the same value twice within a process. That
//! single property carries two invariants: an `update` always strictly
//! increases `updatedAt`, and the timestamp component of two ids minted
//! back-to-back never collides.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use uuid::Uuid;

/// Number of random suffix characters in a generated id.
const ID_SUFFIX_LEN: usize = 9;

static LAST_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Current Unix time in milliseconds, observed monotonically: consecutive
/// calls return strictly increasing values even if the wall clock stalls or
/// steps backwards.
pub fn now_millis() -> i64 {
    let wall = Utc::now().timestamp_millis();
    let mut last = LAST_MILLIS.load(Ordering::Relaxed);
    loop {
        let next = wall.max(last + 1);
        match LAST_MILLIS.compare_exchange_weak(last, next, Ordering::SeqCst, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(observed) => last = observed,
        }
    }
}

/// Generate a record id of the form `{prefix}-{millis}-{suffix}`.
///
/// The monotonic timestamp alone guarantees uniqueness within one running
/// session; the random suffix keeps ids collision-resistant across sessions
/// and machines. Not cryptographically unique, and not required to be.
pub fn generate_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", prefix, now_millis(), &suffix[..ID_SUFFIX_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn now_millis_strictly_increases() {
        let mut prev = now_millis();
        for _ in 0..1000 {
            let next = now_millis();
            assert!(next > prev, "expected {} > {}", next, prev);
            prev = next;
        }
    }

    #[test]
    fn generated_ids_are_pairwise_distinct() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id("script")).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn generated_id_shape() {
        let id = generate_id("snippet");
        let parts: Vec<&str> = id.splitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "snippet");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
    }
}
