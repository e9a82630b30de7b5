use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, Banner, MatchesState};
use crate::state::boards::Boards;
use crate::state::bootstrap::BootstrapData;
use crate::state::messages::NetworkRequest;
use crate::state::predictions::BufferError;
use crate::state::session_store::SessionStore;
use crate::state::submission::Submission;
use chrono::{DateTime, Utc};
use log::{debug, error, warn};
use scorecast_api::{PointsSummary, ScorePair, Session};
use std::fmt;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Matches,
    Dashboard,
    Leaderboard,
    Standings,
    Help,
}

/// Why a save was not issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveBlocked {
    LoggedOut,
    Locked,
    InFlight,
}

impl fmt::Display for SaveBlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveBlocked::LoggedOut => write!(f, "Log in to save predictions"),
            SaveBlocked::Locked => write!(f, "Prediction window closed"),
            SaveBlocked::InFlight => write!(f, "Save already in progress"),
        }
    }
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    session_store: SessionStore,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let session_store = SessionStore::new(settings.session_file.clone());
        let session = session_store.load();
        debug!(
            "session file {} ({})",
            session_store.path().display(),
            if session.is_some() { "restored" } else { "empty" }
        );

        let app = Self {
            state: AppState::new(session),
            settings,
            session_store,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    /// Requests to issue right after startup: a stored session goes
    /// straight to bootstrap.
    pub fn startup_requests(&mut self) -> Vec<NetworkRequest> {
        self.session_requests()
    }

    fn session_requests(&mut self) -> Vec<NetworkRequest> {
        let Some(session) = self.state.session.clone() else {
            return Vec::new();
        };
        self.state.bootstrapping = true;
        self.state.banner = Some(Banner::Info("Loading, please wait...".to_string()));
        vec![
            NetworkRequest::Bootstrap { session: session.clone() },
            NetworkRequest::LoadBoards { session },
        ]
    }

    // -----------------------------------------------------------------------
    // Auth
    // -----------------------------------------------------------------------

    pub fn submit_auth(&mut self) -> Option<NetworkRequest> {
        let (username, password) = self.state.auth.credentials()?;
        self.state.auth.submitting = true;
        self.state.auth.error = None;
        Some(NetworkRequest::Authenticate { mode: self.state.auth.mode, username, password })
    }

    pub fn on_authenticated(&mut self, session: Session) -> Vec<NetworkRequest> {
        if let Err(e) = self.session_store.save(&session) {
            // The session still works for this run; it just won't survive a restart.
            error!("could not persist session: {e}");
        }
        debug!("logged in as {}", session.username);
        // Nothing from a previous session may carry over.
        let show_logs = self.state.show_logs;
        self.state = AppState::new(Some(session));
        self.state.show_logs = show_logs;
        self.session_requests()
    }

    pub fn on_auth_failed(&mut self, message: String) {
        self.state.auth.submitting = false;
        self.state.auth.error = Some(message);
    }

    /// Drop the session and everything loaded for it.
    pub fn logout(&mut self) {
        if let Err(e) = self.session_store.clear() {
            warn!("could not remove stored session: {e}");
        }
        let show_logs = self.state.show_logs;
        self.state = AppState::new(None);
        self.state.show_logs = show_logs;
    }

    // -----------------------------------------------------------------------
    // Bootstrap
    // -----------------------------------------------------------------------

    pub fn request_reload(&mut self) -> Vec<NetworkRequest> {
        if self.state.bootstrapping {
            return Vec::new();
        }
        self.session_requests()
    }

    pub fn on_bootstrapped(&mut self, data: BootstrapData, now: DateTime<Utc>) {
        if !self.state.is_logged_in() {
            return;
        }
        self.state.bootstrapping = false;
        self.state.banner = None;
        self.state.matches.load(&data, now);
        self.state.points = Some(data.points);
    }

    /// The session stays logged in with whatever was loaded before.
    pub fn on_bootstrap_failed(&mut self, message: String) {
        self.state.bootstrapping = false;
        self.state.banner = Some(Banner::Error(message));
    }

    // -----------------------------------------------------------------------
    // Editing (gated by the lock snapshot)
    // -----------------------------------------------------------------------

    pub fn edit_digit(&mut self, digit: char) {
        self.edit(|m| m.type_digit(digit).map(Some));
    }

    pub fn edit_backspace(&mut self) {
        self.edit(MatchesState::backspace);
    }

    pub fn edit_step(&mut self, delta: i32) {
        self.edit(|m| m.step(delta).map(Some));
    }

    fn edit(&mut self, f: impl FnOnce(&mut MatchesState) -> Result<Option<ScorePair>, BufferError>) {
        if !self.state.matches.edits_permitted() {
            debug!("edit ignored: prediction window closed");
            return;
        }
        if let Err(e) = f(&mut self.state.matches) {
            warn!("edit rejected: {e}");
        }
    }

    // -----------------------------------------------------------------------
    // Save + points
    // -----------------------------------------------------------------------

    /// Snapshot the buffer for submission. Refused while locked or while a
    /// previous save is still in flight.
    pub fn begin_save(&mut self) -> Result<NetworkRequest, SaveBlocked> {
        let Some(session) = self.state.session.clone() else {
            return Err(SaveBlocked::LoggedOut);
        };
        if self.state.save_in_flight {
            return Err(SaveBlocked::InFlight);
        }
        if !self.state.matches.edits_permitted() {
            self.state.banner = Some(Banner::Error(SaveBlocked::Locked.to_string()));
            return Err(SaveBlocked::Locked);
        }

        let submission = Submission::prepare(&self.state.matches.buffer);
        debug!("save issued with {} prediction(s)", submission.len());
        self.state.save_in_flight = true;
        self.state.banner = Some(Banner::Info("Loading, please wait...".to_string()));
        Ok(NetworkRequest::SavePredictions { session, submission })
    }

    pub fn on_saved(&mut self, submitted: usize, points: Result<PointsSummary, String>) {
        if !self.state.is_logged_in() {
            debug!("dropping save result for an ended session");
            return;
        }
        self.state.save_in_flight = false;
        debug!("{submitted} prediction(s) accepted");
        match points {
            Ok(points) => {
                self.state.points = Some(points);
                self.state.banner = Some(Banner::Success("Predictions saved successfully".to_string()));
            }
            Err(e) => {
                warn!("points refresh failed after save: {e}");
                self.state.banner = Some(Banner::Error(
                    "Predictions saved successfully, but points could not be refreshed".to_string(),
                ));
            }
        }
    }

    /// The buffer is left exactly as the user edited it.
    pub fn on_save_failed(&mut self, message: String) {
        if !self.state.is_logged_in() {
            return;
        }
        self.state.save_in_flight = false;
        self.state.banner = Some(Banner::Error(message));
    }

    pub fn request_points_refresh(&self) -> Option<NetworkRequest> {
        let session = self.state.session.clone()?;
        Some(NetworkRequest::RefreshPoints { session })
    }

    pub fn on_points_refreshed(&mut self, points: PointsSummary) {
        if self.state.is_logged_in() {
            self.state.points = Some(points);
        }
    }

    // -----------------------------------------------------------------------
    // Boards
    // -----------------------------------------------------------------------

    pub fn request_boards(&self) -> Option<NetworkRequest> {
        let session = self.state.session.clone()?;
        Some(NetworkRequest::LoadBoards { session })
    }

    pub fn on_boards_loaded(&mut self, boards: Boards) {
        if self.state.is_logged_in() {
            self.state.boards = boards;
        }
    }

    pub fn on_error(&mut self, message: String) {
        self.state.banner = Some(Banner::Error(message));
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        if next == MenuItem::Leaderboard {
            self.state.leaderboard_scroll = 0;
        }
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn dismiss_banner(&mut self) {
        self.state.banner = None;
    }
}
