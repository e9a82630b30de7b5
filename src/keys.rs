use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    let outgoing = if guard.state.is_logged_in() {
        handle_main_keys(&mut guard, key_event)
    } else {
        handle_auth_keys(&mut guard, key_event)
    };

    drop(guard);
    for request in outgoing {
        let _ = network_requests.send(request).await;
    }
}

fn quit() -> ! {
    crate::cleanup_terminal();
    std::process::exit(0);
}

fn handle_auth_keys(app: &mut App, key_event: KeyEvent) -> Vec<NetworkRequest> {
    match (key_event.code, key_event.modifiers) {
        (KeyCode::Esc, _) | (Char('c'), KeyModifiers::CONTROL) => quit(),
        (KeyCode::Enter, _) => return app.submit_auth().into_iter().collect(),
        _ => {}
    }

    let form = &mut app.state.auth;
    match (key_event.code, key_event.modifiers) {
        (KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down, _) => form.next_field(),
        (KeyCode::Left | KeyCode::Right, _) => form.toggle_mode(),
        (KeyCode::Backspace, _) => form.pop_char(),
        (Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => form.push_char(c),
        _ => {}
    }
    Vec::new()
}

fn handle_main_keys(app: &mut App, key_event: KeyEvent) -> Vec<NetworkRequest> {
    let mut outgoing = Vec::new();

    match (app.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => quit(),

        // Matches: score entry takes the digits before tab switching does
        (MenuItem::Matches, Char(c @ '0'..='9'), _) => app.edit_digit(c),
        (MenuItem::Matches, KeyCode::Backspace, _) => app.edit_backspace(),
        (MenuItem::Matches, Char('+') | Char('='), _) => app.edit_step(1),
        (MenuItem::Matches, Char('-'), _) => app.edit_step(-1),
        (MenuItem::Matches, Char('j') | KeyCode::Down, _) => app.state.matches.select_next(),
        (MenuItem::Matches, Char('k') | KeyCode::Up, _) => app.state.matches.select_prev(),
        (MenuItem::Matches, Char('h') | Char('l') | KeyCode::Left | KeyCode::Right | KeyCode::Tab, _) => {
            app.state.matches.toggle_field()
        }
        (MenuItem::Matches, Char('s'), _) => match app.begin_save() {
            Ok(request) => outgoing.push(request),
            Err(blocked) => debug!("save not issued: {blocked}"),
        },
        (MenuItem::Matches, Char('r'), _) => outgoing.extend(app.request_reload()),

        // Tab switching. Digits are score entry on Matches, so BackTab cycles tabs from anywhere.
        (_, Char('1'), _) => app.update_tab(MenuItem::Matches),
        (_, Char('2'), _) => app.update_tab(MenuItem::Dashboard),
        (_, Char('3'), _) => app.update_tab(MenuItem::Leaderboard),
        (_, Char('4'), _) => app.update_tab(MenuItem::Standings),
        (_, KeyCode::BackTab, _) => app.update_tab(next_tab(app.state.active_tab)),
        (_, Char('?'), _) => app.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => app.exit_help(),

        // Dashboard
        (MenuItem::Dashboard, Char('r'), _) => outgoing.extend(app.request_points_refresh()),

        // Boards
        (MenuItem::Leaderboard, Char('j') | KeyCode::Down, _) => {
            app.state.leaderboard_scroll = app.state.leaderboard_scroll.saturating_add(1);
        }
        (MenuItem::Leaderboard, Char('k') | KeyCode::Up, _) => {
            app.state.leaderboard_scroll = app.state.leaderboard_scroll.saturating_sub(1);
        }
        (MenuItem::Leaderboard | MenuItem::Standings, Char('r'), _) => {
            outgoing.extend(app.request_boards())
        }

        // Global
        (_, KeyCode::Esc, _) => app.dismiss_banner(),
        (_, Char('L'), _) => app.logout(),
        (_, Char('f'), _) => app.toggle_full_screen(),
        (_, Char('"'), _) => app.toggle_show_logs(),

        _ => {}
    }

    outgoing
}

fn next_tab(current: MenuItem) -> MenuItem {
    match current {
        MenuItem::Matches => MenuItem::Dashboard,
        MenuItem::Dashboard => MenuItem::Leaderboard,
        MenuItem::Leaderboard => MenuItem::Standings,
        MenuItem::Standings | MenuItem::Help => MenuItem::Matches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use crate::state::bootstrap::BootstrapData;
    use crate::state::test_store::{fixture_match, session};
    use chrono::Utc;
    use scorecast_api::{PointsSummary, ScorePair};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(dir: &tempfile::TempDir, year: i32) -> App {
        let mut app = App::new(AppSettings {
            session_file: dir.path().join("session.json"),
            ..AppSettings::default()
        });
        app.on_authenticated(session());
        app.on_bootstrapped(
            BootstrapData {
                matches: vec![fixture_match(1, year), fixture_match(2, year)],
                predictions: vec![],
                points: PointsSummary::default(),
            },
            Utc::now(),
        );
        app
    }

    #[test]
    fn digits_edit_scores_on_matches_tab() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir, 2099);
        handle_main_keys(&mut app, key(Char('2')));
        handle_main_keys(&mut app, key(KeyCode::Tab));
        handle_main_keys(&mut app, key(Char('1')));
        assert_eq!(app.state.matches.buffer.get(1), Some(ScorePair::new(2, 1)));
        assert_eq!(app.state.active_tab, MenuItem::Matches);
    }

    #[test]
    fn digits_switch_tabs_elsewhere() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir, 2099);
        app.update_tab(MenuItem::Dashboard);
        handle_main_keys(&mut app, key(Char('3')));
        assert_eq!(app.state.active_tab, MenuItem::Leaderboard);
    }

    #[test]
    fn save_key_issues_request_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir, 2099);
        let first = handle_main_keys(&mut app, key(Char('s')));
        let second = handle_main_keys(&mut app, key(Char('s')));
        assert!(matches!(first.as_slice(), [NetworkRequest::SavePredictions { .. }]));
        assert!(second.is_empty());
    }

    #[test]
    fn locked_matches_ignore_edits_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir, 2000);
        handle_main_keys(&mut app, key(Char('5')));
        handle_main_keys(&mut app, key(Char('+')));
        assert!(app.state.matches.buffer.is_empty());
        assert!(handle_main_keys(&mut app, key(Char('s'))).is_empty());
    }

    #[test]
    fn auth_form_collects_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(AppSettings {
            session_file: dir.path().join("session.json"),
            ..AppSettings::default()
        });
        for c in "ana".chars() {
            handle_auth_keys(&mut app, key(Char(c)));
        }
        handle_auth_keys(&mut app, key(KeyCode::Tab));
        handle_auth_keys(&mut app, key(Char('p')));
        handle_auth_keys(&mut app, key(Char('w')));
        let requests = handle_auth_keys(&mut app, key(KeyCode::Enter));
        assert!(matches!(
            requests.as_slice(),
            [NetworkRequest::Authenticate { username, password, .. }]
                if username == "ana" && password == "pw"
        ));
    }
}
