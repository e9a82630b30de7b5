//! In-memory Remote Store used by the state tests.

use chrono::{TimeZone, Utc};
use scorecast_api::{
    ApiError, ApiResult, GroupStanding, LeaderboardEntry, Match, PointsSummary, Prediction,
    RemoteStore, Session, TeamRef,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A group-stage fixture kicking off on June 1st of `year`.
pub fn fixture_match(id: u32, year: i32) -> Match {
    Match {
        id,
        home_team: TeamRef { id: id * 2, name: format!("Home {id}") },
        away_team: TeamRef { id: id * 2 + 1, name: format!("Away {id}") },
        kickoff_at: Utc.with_ymd_and_hms(year, 6, 1, 18, 0, 0).unwrap(),
        stage: "Group A".to_string(),
        result: None,
    }
}

pub fn session() -> Session {
    Session { token: "tok".to_string(), username: "ana".to_string() }
}

#[derive(Default)]
pub struct MemoryStore {
    pub matches: Vec<Match>,
    pub predictions: Mutex<Vec<Prediction>>,
    pub points: Mutex<PointsSummary>,
    /// Summary the "server" computes after an accepted bulk save.
    pub points_after_save: Option<PointsSummary>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub standings: Vec<GroupStanding>,
    pub fail_matches: bool,
    pub fail_save: bool,
    pub fail_points: bool,
    pub saved: Mutex<Vec<Vec<Prediction>>>,
    pub points_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn with_matches(matches: Vec<Match>) -> Self {
        Self { matches, ..Self::default() }
    }

    pub fn points_calls(&self) -> usize {
        self.points_calls.load(Ordering::SeqCst)
    }

    pub fn save_calls(&self) -> Vec<Vec<Prediction>> {
        self.saved.lock().unwrap().clone()
    }

    fn check(&self, session: &Session) -> ApiResult<()> {
        if session.token.is_empty() {
            return Err(ApiError::Unauthorized { url: "memory".into(), message: None });
        }
        Ok(())
    }

    fn authenticate(&self, username: &str, password: &str) -> ApiResult<Session> {
        if password != "pw" {
            return Err(ApiError::Unauthorized {
                url: "memory".into(),
                message: Some("Invalid credentials".into()),
            });
        }
        Ok(Session { token: format!("tok-{username}"), username: username.to_string() })
    }
}

impl RemoteStore for MemoryStore {
    async fn register(&self, username: &str, password: &str) -> ApiResult<Session> {
        self.authenticate(username, password)
    }

    async fn login(&self, username: &str, password: &str) -> ApiResult<Session> {
        self.authenticate(username, password)
    }

    async fn fetch_matches(&self, session: &Session) -> ApiResult<Vec<Match>> {
        self.check(session)?;
        if self.fail_matches {
            return Err(ApiError::Other("matches unavailable".into()));
        }
        Ok(self.matches.clone())
    }

    async fn fetch_my_predictions(&self, session: &Session) -> ApiResult<Vec<Prediction>> {
        self.check(session)?;
        Ok(self.predictions.lock().unwrap().clone())
    }

    async fn save_predictions(&self, session: &Session, predictions: &[Prediction]) -> ApiResult<()> {
        self.check(session)?;
        self.saved.lock().unwrap().push(predictions.to_vec());
        if self.fail_save {
            return Err(ApiError::Api {
                status: 503,
                url: "memory".into(),
                message: Some("Service unavailable".into()),
            });
        }
        let mut stored = self.predictions.lock().unwrap();
        for p in predictions {
            stored.retain(|s| s.match_id != p.match_id);
            stored.push(*p);
        }
        if let Some(summary) = &self.points_after_save {
            *self.points.lock().unwrap() = summary.clone();
        }
        Ok(())
    }

    async fn fetch_points(&self, session: &Session) -> ApiResult<PointsSummary> {
        self.check(session)?;
        self.points_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_points {
            return Err(ApiError::Other("points unavailable".into()));
        }
        Ok(self.points.lock().unwrap().clone())
    }

    async fn fetch_leaderboard(&self, session: &Session) -> ApiResult<Vec<LeaderboardEntry>> {
        self.check(session)?;
        Ok(self.leaderboard.clone())
    }

    async fn fetch_group_standings(&self, session: &Session) -> ApiResult<Vec<GroupStanding>> {
        self.check(session)?;
        Ok(self.standings.clone())
    }
}
