pub mod app_settings;
pub mod app_state;
pub mod boards;
pub mod bootstrap;
pub mod lock_window;
pub mod messages;
pub mod network;
pub mod predictions;
pub mod refresher;
pub mod session_store;
pub mod submission;

#[cfg(test)]
pub mod test_store;
