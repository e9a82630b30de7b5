use crate::client::ApiResult;
use crate::{GroupStanding, LeaderboardEntry, Match, PointsSummary, Prediction, Session};
use std::future::Future;

/// Operations the client consumes from the authoritative Remote Store.
///
/// Every authenticated call takes the session explicitly; nothing here reads
/// ambient token storage.
pub trait RemoteStore {
    fn register(&self, username: &str, password: &str)
    -> impl Future<Output = ApiResult<Session>> + Send;

    fn login(&self, username: &str, password: &str)
    -> impl Future<Output = ApiResult<Session>> + Send;

    fn fetch_matches(&self, session: &Session) -> impl Future<Output = ApiResult<Vec<Match>>> + Send;

    fn fetch_my_predictions(
        &self,
        session: &Session,
    ) -> impl Future<Output = ApiResult<Vec<Prediction>>> + Send;

    /// Bulk upsert. Atomic from the caller's point of view: either every
    /// prediction is accepted or an error comes back.
    fn save_predictions(
        &self,
        session: &Session,
        predictions: &[Prediction],
    ) -> impl Future<Output = ApiResult<()>> + Send;

    fn fetch_points(&self, session: &Session) -> impl Future<Output = ApiResult<PointsSummary>> + Send;

    fn fetch_leaderboard(
        &self,
        session: &Session,
    ) -> impl Future<Output = ApiResult<Vec<LeaderboardEntry>>> + Send;

    fn fetch_group_standings(
        &self,
        session: &Session,
    ) -> impl Future<Output = ApiResult<Vec<GroupStanding>>> + Send;
}
