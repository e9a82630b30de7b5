pub mod client;
pub mod store;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use client::{ApiError, ApiResult, ErrorKind, ScorecastApi};
pub use store::RemoteStore;

pub type MatchId = u32;

// ---------------------------------------------------------------------------
// Domain types, independent of the server's wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: MatchId,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
    pub kickoff_at: DateTime<Utc>,
    pub stage: String, // "Group A", "Round of 16", ...
    /// Final score, only present once the match has been played.
    pub result: Option<ScorePair>,
}

impl Match {
    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    /// True when kickoff is strictly after `now`.
    pub fn kicks_off_after(&self, now: DateTime<Utc>) -> bool {
        self.kickoff_at > now
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamRef {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScorePair {
    pub home: u16,
    pub away: u16,
}

impl ScorePair {
    pub fn new(home: u16, away: u16) -> Self {
        Self { home, away }
    }

    pub fn get(&self, field: Field) -> u16 {
        match field {
            Field::Home => self.home,
            Field::Away => self.away,
        }
    }

    pub fn set(&mut self, field: Field, value: u16) {
        match field {
            Field::Home => self.home = value,
            Field::Away => self.away = value,
        }
    }
}

/// Which side of a score pair an edit targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Field {
    #[default]
    Home,
    Away,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Home => "home",
            Field::Away => "away",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Field::Home => Field::Away,
            Field::Away => Field::Home,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub match_id: MatchId,
    pub score: ScorePair,
}

impl Prediction {
    pub fn new(match_id: MatchId, home: u16, away: u16) -> Self {
        Self { match_id, score: ScorePair { home, away } }
    }
}

/// Points awarded by the server. The client never recomputes these.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointsSummary {
    pub total: i64,
    pub per_match: BTreeMap<MatchId, i64>,
}

impl PointsSummary {
    pub fn points_for(&self, match_id: MatchId) -> Option<i64> {
        self.per_match.get(&match_id).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub user_id: u32,
    pub username: String,
    pub total_points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupStanding {
    pub group: String,
    pub team: String,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl GroupStanding {
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}

/// Authenticated session context. Passed explicitly to every authenticated
/// Remote Store call; created at login/register and dropped at logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn label(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Register => "Register",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }
}
