use crate::state::boards::Boards;
use crate::state::bootstrap::BootstrapData;
use crate::state::network::LoadingState;
use crate::state::submission::Submission;
use crossterm::event::KeyEvent;
use scorecast_api::{AuthMode, PointsSummary, Session};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    Authenticate { mode: AuthMode, username: String, password: String },
    Bootstrap { session: Session },
    SavePredictions { session: Session, submission: Submission },
    RefreshPoints { session: Session },
    LoadBoards { session: Session },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    Authenticated { session: Session },
    AuthFailed { message: String },
    Bootstrapped { data: BootstrapData },
    BootstrapFailed { message: String },
    /// The bulk save was accepted. `points` is the follow-up refresh.
    Saved { submitted: usize, points: Result<PointsSummary, String> },
    SaveFailed { message: String },
    PointsRefreshed { points: PointsSummary },
    BoardsLoaded { boards: Boards },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    RefreshTick,
}
