use crate::app::MenuItem;
use crate::state::boards::Boards;
use crate::state::bootstrap::BootstrapData;
use crate::state::lock_window::LockWindow;
use crate::state::predictions::{BufferError, PredictionBuffer, coerce_score};
use chrono::{DateTime, Utc};
use scorecast_api::{AuthMode, Field, Match, MatchId, PointsSummary, ScorePair, Session};

// ---------------------------------------------------------------------------
// Banners
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Info(String),
    Success(String),
    Error(String),
}

impl Banner {
    pub fn text(&self) -> &str {
        match self {
            Banner::Info(s) | Banner::Success(s) | Banner::Error(s) => s,
        }
    }
}

// ---------------------------------------------------------------------------
// Auth form state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthField {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Default)]
pub struct AuthFormState {
    pub mode: AuthMode,
    pub focus: AuthField,
    pub username: String,
    pub password: String,
    pub submitting: bool,
    pub error: Option<String>,
}

impl AuthFormState {
    pub fn push_char(&mut self, c: char) {
        match self.focus {
            AuthField::Username => self.username.push(c),
            AuthField::Password => self.password.push(c),
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            AuthField::Username => self.username.pop(),
            AuthField::Password => self.password.pop(),
        };
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            AuthField::Username => AuthField::Password,
            AuthField::Password => AuthField::Username,
        };
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
        self.error = None;
    }

    /// Both fields are required. Returns the trimmed username and the raw
    /// password when the form can be submitted.
    pub fn credentials(&self) -> Option<(String, String)> {
        let username = self.username.trim();
        if username.is_empty() || self.password.is_empty() || self.submitting {
            return None;
        }
        Some((username.to_string(), self.password.clone()))
    }
}

// ---------------------------------------------------------------------------
// Matches + prediction buffer state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MatchesState {
    pub matches: Vec<Match>,
    pub buffer: PredictionBuffer,
    /// None until the first successful bootstrap.
    pub lock: Option<LockWindow>,
    pub selected: usize,
    pub field: Field,
    /// Digits typed into the focused cell since focus last moved.
    pub input: String,
}

impl MatchesState {
    /// Rebuild buffer and lock snapshot from a fresh bootstrap.
    pub fn load(&mut self, data: &BootstrapData, now: DateTime<Utc>) {
        let mut matches = data.matches.clone();
        matches.sort_by(|a, b| a.kickoff_at.cmp(&b.kickoff_at).then_with(|| a.id.cmp(&b.id)));
        self.buffer = PredictionBuffer::reconcile(&matches, &data.predictions);
        self.lock = Some(LockWindow::evaluate(&matches, now));
        self.matches = matches;
        self.selected = self.selected.min(self.matches.len().saturating_sub(1));
        self.input.clear();
    }

    pub fn edits_permitted(&self) -> bool {
        self.lock.is_some_and(|l| !l.is_locked())
    }

    pub fn selected_match(&self) -> Option<&Match> {
        self.matches.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.matches.len() {
            self.selected += 1;
            self.input.clear();
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.input.clear();
        }
    }

    pub fn toggle_field(&mut self) {
        self.field = self.field.toggle();
        self.input.clear();
    }

    /// Append a digit to the focused cell and store the coerced value.
    pub fn type_digit(&mut self, digit: char) -> Result<ScorePair, BufferError> {
        let id = self.focused_id()?;
        self.input.push(digit);
        let value = coerce_score(&self.input);
        self.buffer.set_field(id, self.field, value)
    }

    /// Drop the last typed digit. Empty input stores 0, but only for a match
    /// that already has an entry.
    pub fn backspace(&mut self) -> Result<Option<ScorePair>, BufferError> {
        let id = self.focused_id()?;
        if self.input.is_empty() && self.buffer.get(id).is_none() {
            return Ok(None);
        }
        self.input.pop();
        let value = coerce_score(&self.input);
        self.buffer.set_field(id, self.field, value).map(Some)
    }

    pub fn step(&mut self, delta: i32) -> Result<ScorePair, BufferError> {
        let id = self.focused_id()?;
        self.input.clear();
        self.buffer.step_field(id, self.field, delta)
    }

    fn focused_id(&self) -> Result<MatchId, BufferError> {
        // An empty fixture list has nothing to focus; report it like an unknown id.
        self.selected_match().map(|m| m.id).ok_or(BufferError::UnknownMatch(0))
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub session: Option<Session>,
    pub auth: AuthFormState,
    pub matches: MatchesState,
    pub points: Option<PointsSummary>,
    pub boards: Boards,
    pub banner: Option<Banner>,
    pub bootstrapping: bool,
    pub save_in_flight: bool,
    pub leaderboard_scroll: u16,
}

impl AppState {
    pub fn new(session: Option<Session>) -> Self {
        Self { session, ..Self::default() }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }
}
