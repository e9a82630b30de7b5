use crate::state::predictions::PredictionBuffer;
use log::{debug, error};
use scorecast_api::{ApiError, ApiResult, PointsSummary, Prediction, RemoteStore, Session};

/// A projection of the buffer frozen at the moment a save was issued.
///
/// Edits made after `prepare` are not part of this submission; they go out
/// with the next save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    predictions: Vec<Prediction>,
}

/// Outcome of an accepted bulk save.
#[derive(Debug)]
pub struct SaveReceipt {
    pub submitted: usize,
    /// The follow-up points refresh. A failure here does not undo the save.
    pub points: ApiResult<PointsSummary>,
}

impl Submission {
    pub fn prepare(buffer: &PredictionBuffer) -> Self {
        Self { predictions: buffer.project() }
    }

    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    /// Send the whole set as one bulk upsert, then refresh points.
    ///
    /// No retries; a failed upsert is returned as-is for the caller to surface.
    /// The coordinator keeps no state between calls, so callers must not
    /// issue a second submission while one is in flight.
    pub async fn submit<S: RemoteStore>(self, store: &S, session: &Session) -> Result<SaveReceipt, ApiError> {
        debug!("submitting {} prediction(s)", self.len());
        store.save_predictions(session, &self.predictions).await?;

        let points = refresh_points(store, session).await;
        if let Err(e) = &points {
            error!("points refresh after save failed: {e}");
        }
        Ok(SaveReceipt { submitted: self.len(), points })
    }
}

/// Project `buffer` and submit it. The buffer is only borrowed, so it is
/// left exactly as it was whether the save succeeds or fails.
pub async fn save<S: RemoteStore>(
    store: &S,
    session: &Session,
    buffer: &PredictionBuffer,
) -> Result<SaveReceipt, ApiError> {
    Submission::prepare(buffer).submit(store, session).await
}

/// Re-fetch the authoritative points summary. Callers replace their cached
/// summary wholesale with the result.
pub async fn refresh_points<S: RemoteStore>(store: &S, session: &Session) -> ApiResult<PointsSummary> {
    debug!("refreshing points summary");
    store.fetch_points(session).await
}
