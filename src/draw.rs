use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::match_table::{MatchTable, prediction_text};
use crate::state::app_state::{AuthField, Banner};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;

static TABS: &[&str; 4] = &["Matches", "Dashboard", "Leaderboard", "Standings"];

const HELP_TEXT: &str = "\
Navigation
  1-4        switch tab (Shift+Tab cycles)
  ?          help, Esc to leave
  \"          toggle logs
  f          toggle full screen
  L          log out
  q          quit

Matches
  j/k        select match
  h/l, Tab   switch home/away
  0-9        type score
  Backspace  delete digit
  +/-        step score
  s          save predictions
  r          reload from server";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.state.is_logged_in() {
            draw_auth(f, layout.main, app);
        } else {
            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
            }

            match app.state.active_tab {
                MenuItem::Matches => draw_matches(f, layout.main, app),
                MenuItem::Dashboard => draw_dashboard(f, layout.main, app),
                MenuItem::Leaderboard => draw_leaderboard(f, layout.main, app),
                MenuItem::Standings => draw_standings(f, layout.main, app),
                MenuItem::Help => draw_help(f, layout.main),
            }
        }

        draw_banner(f, layout.banner, app.state.banner.as_ref());
        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }
        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Matches => 0,
        MenuItem::Dashboard => 1,
        MenuItem::Leaderboard => 2,
        MenuItem::Standings => 3,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let user = app
        .state
        .session
        .as_ref()
        .map(|s| format!("{} | ? ", s.username))
        .unwrap_or_else(|| "Help: ? ".to_string());
    let help = Paragraph::new(user)
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_auth(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.auth;
    let title = format!(" Scorecast - {} ", form.mode.label());
    let block = default_border(Color::White).title(title);

    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, form_area, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(48),
        Constraint::Fill(1),
    ])
    .areas(middle);

    let inner = block.inner(form_area);
    f.render_widget(block, form_area);

    let field_style = |field: AuthField| {
        if form.focus == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };
    let masked: String = "*".repeat(form.password.chars().count());

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Username: ", field_style(AuthField::Username)),
            Span::raw(form.username.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Password: ", field_style(AuthField::Password)),
            Span::raw(masked),
        ]),
        Line::default(),
    ];

    if form.submitting {
        lines.push(Line::styled("Loading, please wait...", Style::default().fg(Color::DarkGray)));
    } else if let Some(err) = form.error.as_deref() {
        lines.push(Line::styled(err.to_string(), Style::default().fg(Color::Red)));
    } else {
        lines.push(Line::default());
    }

    lines.push(Line::default());
    lines.push(Line::styled(
        format!(
            "Enter={}  Tab=field  \u{2190}/\u{2192}={}  Esc=quit",
            form.mode.label(),
            form.mode.toggle().label()
        ),
        Style::default().fg(Color::DarkGray),
    ));

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_matches(f: &mut Frame, area: Rect, app: &App) {
    let matches = &app.state.matches;
    let title = match matches.lock {
        Some(lock) if lock.is_locked() => format!(
            " Matches (locked since {}) ",
            lock.evaluated_at().with_timezone(&chrono::Local).format("%H:%M")
        ),
        Some(_) => " Matches ".to_string(),
        None => " Matches (loading) ".to_string(),
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if matches.matches.is_empty() {
        let msg = if app.state.bootstrapping {
            "Loading matches..."
        } else {
            "No matches available"
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let [table_area, legend] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

    f.render_widget(
        MatchTable {
            matches: &matches.matches,
            buffer: &matches.buffer,
            points: app.state.points.as_ref(),
            selected: matches.selected,
            field: matches.field,
            editable: matches.edits_permitted(),
        },
        table_area,
    );

    let legend_text = if matches.edits_permitted() {
        format!(
            "editing {}  j/k=match  h/l=home/away  0-9=score  +/-=step  s=save  r=reload",
            matches.field.label()
        )
    } else {
        "Prediction window closed  j/k=match  r=reload".to_string()
    };
    f.render_widget(
        Paragraph::new(legend_text).style(Style::default().fg(Color::DarkGray)),
        legend,
    );
}

fn draw_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Dashboard ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(points) = app.state.points.as_ref() else {
        f.render_widget(
            Paragraph::new("Points not loaded yet").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    };

    let mut lines = vec![
        Line::styled(
            format!("Total points: {}", points.total),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::from(format!("Predictions made: {}", app.state.matches.buffer.len())),
        Line::default(),
    ];

    for m in &app.state.matches.matches {
        let Some(earned) = points.points_for(m.id) else {
            continue;
        };
        lines.push(Line::from(format!(
            "{:>3}  {} vs {}  ({})",
            earned,
            m.home_team.name,
            m.away_team.name,
            prediction_text(app.state.matches.buffer.get(m.id)),
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_leaderboard(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Leaderboard ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let me = app.state.session.as_ref().map(|s| s.username.as_str());
    let lines: Vec<Line> = app
        .state
        .boards
        .leaderboard
        .iter()
        .enumerate()
        .map(|(rank, entry)| {
            let style = if Some(entry.username.as_str()) == me {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Line::styled(
                format!("{:>3}. {:<24} {:>5}", rank + 1, entry.username, entry.total_points),
                style,
            )
        })
        .collect();

    if lines.is_empty() {
        f.render_widget(
            Paragraph::new("No leaderboard yet").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    f.render_widget(
        Paragraph::new(lines).scroll((app.state.leaderboard_scroll, 0)),
        inner,
    );
}

fn draw_standings(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Group Standings ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = Vec::new();
    for (group, rows) in app.state.boards.groups() {
        lines.push(Line::styled(
            group.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::styled(
            format!("  {:<22} {:>3} {:>3} {:>4} {:>4}", "Team", "GF", "GA", "GD", "Pts"),
            Style::default().fg(Color::DarkGray),
        ));
        for row in rows {
            lines.push(Line::from(format!(
                "  {:<22} {:>3} {:>3} {:>4} {:>4}",
                row.team,
                row.goals_for,
                row.goals_against,
                row.goal_difference(),
                row.points
            )));
        }
        lines.push(Line::default());
    }

    if lines.is_empty() {
        lines.push(Line::styled("No standings yet", Style::default().fg(Color::DarkGray)));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(HELP_TEXT), inner);
}

fn draw_banner(f: &mut Frame, area: Rect, banner: Option<&Banner>) {
    let Some(banner) = banner else {
        return;
    };
    let color = match banner {
        Banner::Info(_) => Color::Gray,
        Banner::Success(_) => Color::Green,
        Banner::Error(_) => Color::Red,
    };
    f.render_widget(
        Paragraph::new(banner.text())
            .style(Style::default().fg(color))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logger = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(logger, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen || !app.state.is_logged_in() {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
