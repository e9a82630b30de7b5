//! Raw wire types for the Scorecast REST API.
//! These map to the clean domain types via the `From` impls at the bottom.
//!
//! Every field the domain needs is required here: a payload that is missing
//! one, carries the wrong type, or holds a negative score fails to
//! deserialize instead of leaking half-formed data inward.
use crate::{
    GroupStanding, LeaderboardEntry, Match, MatchId, PointsSummary, Prediction, ScorePair,
    Session, TeamRef,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Deserialize)]
pub struct AuthUser {
    pub username: String,
}

/// Error body shape used by the server for 4xx/5xx responses.
#[derive(Debug, Deserialize, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Matches + predictions
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Clone)]
pub struct MatchRecord {
    pub id: MatchId,
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub home_team_name: String,
    pub away_team_name: String,
    pub kickoff_at: DateTime<Utc>, // ISO 8601
    pub stage: String,
    /// Null until the match has been played.
    pub result_home: Option<u16>,
    pub result_away: Option<u16>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PredictionRecord {
    pub match_id: MatchId,
    pub predicted_home: u16,
    pub predicted_away: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionUpsert {
    pub match_id: MatchId,
    pub home: u16,
    pub away: u16,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkSaveRequest {
    pub predictions: Vec<PredictionUpsert>,
}

// ---------------------------------------------------------------------------
// Points + boards
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsResponse {
    #[serde(alias = "total")]
    pub total_points: i64,
    pub per_match: Vec<MatchPointsRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPointsRecord {
    pub match_id: MatchId,
    pub points: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRecord {
    pub user_id: u32,
    pub username: String,
    pub total_points: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRecord {
    pub group: String,
    pub team: String,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

// ---------------------------------------------------------------------------
// Mapping: wire types → domain types
// ---------------------------------------------------------------------------

impl From<AuthResponse> for Session {
    fn from(raw: AuthResponse) -> Self {
        Session { token: raw.token, username: raw.user.username }
    }
}

impl From<MatchRecord> for Match {
    fn from(raw: MatchRecord) -> Self {
        // A half-filled result (one side null) is treated as not yet played.
        let result = raw
            .result_home
            .zip(raw.result_away)
            .map(|(home, away)| ScorePair { home, away });
        Match {
            id: raw.id,
            home_team: TeamRef { id: raw.home_team_id, name: raw.home_team_name },
            away_team: TeamRef { id: raw.away_team_id, name: raw.away_team_name },
            kickoff_at: raw.kickoff_at,
            stage: raw.stage,
            result,
        }
    }
}

impl From<PredictionRecord> for Prediction {
    fn from(raw: PredictionRecord) -> Self {
        Prediction::new(raw.match_id, raw.predicted_home, raw.predicted_away)
    }
}

impl From<&Prediction> for PredictionUpsert {
    fn from(p: &Prediction) -> Self {
        PredictionUpsert { match_id: p.match_id, home: p.score.home, away: p.score.away }
    }
}

impl From<PointsResponse> for PointsSummary {
    fn from(raw: PointsResponse) -> Self {
        PointsSummary {
            total: raw.total_points,
            per_match: raw.per_match.into_iter().map(|m| (m.match_id, m.points)).collect(),
        }
    }
}

impl From<LeaderboardRecord> for LeaderboardEntry {
    fn from(raw: LeaderboardRecord) -> Self {
        LeaderboardEntry {
            user_id: raw.user_id,
            username: raw.username,
            total_points: raw.total_points,
        }
    }
}

impl From<StandingRecord> for GroupStanding {
    fn from(raw: StandingRecord) -> Self {
        GroupStanding {
            group: raw.group,
            team: raw.team,
            goals_for: raw.goals_for,
            goals_against: raw.goals_against,
            points: raw.points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn match_record_maps_result_only_when_both_sides_present() {
        let raw: MatchRecord = serde_json::from_str(
            r#"{"id":7,"home_team_id":1,"away_team_id":2,"home_team_name":"Brazil",
                "away_team_name":"Serbia","kickoff_at":"2026-06-12T18:00:00Z",
                "stage":"Group G","result_home":2,"result_away":null}"#,
        )
        .unwrap();
        let m = Match::from(raw);
        assert_eq!(m.id, 7);
        assert_eq!(m.home_team.name, "Brazil");
        assert_eq!(m.kickoff_at, Utc.with_ymd_and_hms(2026, 6, 12, 18, 0, 0).unwrap());
        assert!(m.result.is_none(), "half-filled result must not count as played");
    }

    #[test]
    fn negative_predicted_score_is_rejected() {
        let parsed = serde_json::from_str::<PredictionRecord>(
            r#"{"match_id":3,"predicted_home":-1,"predicted_away":0}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn points_accept_total_alias() {
        let raw: PointsResponse =
            serde_json::from_str(r#"{"total":12,"perMatch":[{"matchId":4,"points":7}]}"#).unwrap();
        let summary = PointsSummary::from(raw);
        assert_eq!(summary.total, 12);
        assert_eq!(summary.points_for(4), Some(7));
        assert_eq!(summary.points_for(5), None);
    }

    #[test]
    fn bulk_request_serializes_camel_case() {
        let body = BulkSaveRequest {
            predictions: vec![PredictionUpsert::from(&Prediction::new(5, 2, 1))],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"predictions":[{"matchId":5,"home":2,"away":1}]})
        );
    }
}
