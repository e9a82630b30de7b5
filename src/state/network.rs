use crate::state::boards::load_boards;
use crate::state::bootstrap::bootstrap;
use crate::state::messages::{NetworkRequest, NetworkResponse};
use crate::state::submission::{Submission, refresh_points};
use log::{debug, error};
use scorecast_api::{ApiError, AuthMode, RemoteStore, ScorecastApi, Session};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// How a failed request is reported back to the UI loop.
#[derive(Debug, Clone, Copy)]
enum Failure {
    Auth,
    Bootstrap,
    Save,
    Background,
}

impl Failure {
    fn of(request: &NetworkRequest) -> Self {
        match request {
            NetworkRequest::Authenticate { .. } => Failure::Auth,
            NetworkRequest::Bootstrap { .. } => Failure::Bootstrap,
            NetworkRequest::SavePredictions { .. } => Failure::Save,
            NetworkRequest::RefreshPoints { .. } | NetworkRequest::LoadBoards { .. } => {
                Failure::Background
            }
        }
    }

    fn into_response(self, err: ApiError) -> NetworkResponse {
        match self {
            Failure::Auth => NetworkResponse::AuthFailed { message: err.banner("Authentication failed") },
            Failure::Bootstrap => NetworkResponse::BootstrapFailed {
                message: err.banner("Failed to load data from server"),
            },
            Failure::Save => NetworkResponse::SaveFailed { message: err.banner("Failed to save predictions") },
            Failure::Background => NetworkResponse::Error { message: err.to_string() },
        }
    }
}

/// Drains network requests one at a time, so Remote Store calls never block
/// the UI loop.
pub struct NetworkWorker<S = ScorecastApi> {
    client: S,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl<S: RemoteStore> NetworkWorker<S> {
    pub fn new(
        client: S,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let failure = Failure::of(&request);
            let result = match request {
                NetworkRequest::Authenticate { mode, username, password } => {
                    self.handle_authenticate(mode, &username, &password).await
                }
                NetworkRequest::Bootstrap { session } => self.handle_bootstrap(&session).await,
                NetworkRequest::SavePredictions { session, submission } => {
                    self.handle_save(&session, submission).await
                }
                NetworkRequest::RefreshPoints { session } => self.handle_refresh_points(&session).await,
                NetworkRequest::LoadBoards { session } => self.handle_load_boards(&session).await,
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| {
                error!("Network request failed: {err}");
                failure.into_response(err)
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_authenticate(
        &self,
        mode: AuthMode,
        username: &str,
        password: &str,
    ) -> Result<NetworkResponse, ApiError> {
        debug!("{} request for {username}", mode.label());
        let session = match mode {
            AuthMode::Login => self.client.login(username, password).await?,
            AuthMode::Register => self.client.register(username, password).await?,
        };
        Ok(NetworkResponse::Authenticated { session })
    }

    async fn handle_bootstrap(&self, session: &Session) -> Result<NetworkResponse, ApiError> {
        let data = bootstrap(&self.client, session).await?;
        Ok(NetworkResponse::Bootstrapped { data })
    }

    async fn handle_save(&self, session: &Session, submission: Submission) -> Result<NetworkResponse, ApiError> {
        let receipt = submission.submit(&self.client, session).await?;
        Ok(NetworkResponse::Saved {
            submitted: receipt.submitted,
            points: receipt.points.map_err(|e| e.to_string()),
        })
    }

    async fn handle_refresh_points(&self, session: &Session) -> Result<NetworkResponse, ApiError> {
        let points = refresh_points(&self.client, session).await?;
        Ok(NetworkResponse::PointsRefreshed { points })
    }

    async fn handle_load_boards(&self, session: &Session) -> Result<NetworkResponse, ApiError> {
        let boards = load_boards(&self.client, session).await?;
        Ok(NetworkResponse::BoardsLoaded { boards })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
