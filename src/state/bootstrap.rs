use futures_util::future::try_join3;
use log::debug;
use scorecast_api::{ApiResult, Match, PointsSummary, Prediction, RemoteStore, Session};

/// Everything a session needs before the user can start editing.
#[derive(Debug, Clone, Default)]
pub struct BootstrapData {
    pub matches: Vec<Match>,
    pub predictions: Vec<Prediction>,
    pub points: PointsSummary,
}

/// Fetch matches, existing predictions and points concurrently.
/// The first failing fetch fails the whole bootstrap.
pub async fn bootstrap<S: RemoteStore>(store: &S, session: &Session) -> ApiResult<BootstrapData> {
    debug!("bootstrapping session for {}", session.username);
    let (matches, predictions, points) = try_join3(
        store.fetch_matches(session),
        store.fetch_my_predictions(session),
        store.fetch_points(session),
    )
    .await?;
    debug!("bootstrap loaded {} matches, {} predictions", matches.len(), predictions.len());
    Ok(BootstrapData { matches, predictions, points })
}
