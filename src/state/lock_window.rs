use chrono::{DateTime, Utc};
use scorecast_api::Match;

/// True iff no match kicks off strictly after `now`.
///
/// An empty fixture list therefore counts as locked.
pub fn is_locked(matches: &[Match], now: DateTime<Utc>) -> bool {
    !matches.iter().any(|m| m.kicks_off_after(now))
}

/// Lock state captured once per bootstrap.
///
/// This is a snapshot, not a live clock comparison: a session that runs past
/// the last kickoff stays unlocked until the next bootstrap (or reload)
/// re-evaluates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockWindow {
    locked: bool,
    evaluated_at: DateTime<Utc>,
}

impl LockWindow {
    pub fn evaluate(matches: &[Match], now: DateTime<Utc>) -> Self {
        Self { locked: is_locked(matches, now), evaluated_at: now }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn evaluated_at(&self) -> DateTime<Utc> {
        self.evaluated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_store::fixture_match;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    fn kickoffs(dates: &[DateTime<Utc>]) -> Vec<Match> {
        dates
            .iter()
            .enumerate()
            .map(|(i, &kickoff_at)| Match { kickoff_at, ..fixture_match(i as u32 + 1, 2000) })
            .collect()
    }

    #[test]
    fn any_future_kickoff_keeps_window_open() {
        let ms = kickoffs(&[at(2099, 1, 1), at(2000, 1, 1)]);
        assert!(!is_locked(&ms, at(2024, 6, 1)));
    }

    #[test]
    fn all_past_kickoffs_lock_the_window() {
        let ms = kickoffs(&[at(2000, 1, 1), at(2001, 1, 1)]);
        assert!(is_locked(&ms, at(2024, 6, 1)));
    }

    #[test]
    fn kickoff_exactly_now_is_not_in_the_future() {
        let now = at(2026, 6, 11);
        assert!(is_locked(&kickoffs(&[now]), now));
    }

    #[test]
    fn empty_fixture_list_is_locked() {
        assert!(is_locked(&[], at(2024, 6, 1)));
    }

    #[test]
    fn snapshot_keeps_bootstrap_result() {
        let ms = kickoffs(&[at(2026, 6, 11)]);
        let window = LockWindow::evaluate(&ms, at(2026, 6, 1));
        assert!(!window.is_locked());
        assert_eq!(window.evaluated_at(), at(2026, 6, 1));
        // Time moving past kickoff does not change an existing snapshot.
        assert!(is_locked(&ms, at(2026, 7, 1)));
        assert!(!window.is_locked());
    }
}
