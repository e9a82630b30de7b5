use scorecast_api::{Field, Match, PointsSummary, ScorePair};
use tui::buffer::Buffer;
use tui::layout::{Constraint, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Cell, Row, Table, Widget};

use crate::state::predictions::PredictionBuffer;

const HEADER: [&str; 6] = ["Stage", "Kickoff", "Match", "Prediction", "Result", "Pts"];

/// Fixture list with the user's buffered predictions alongside.
pub struct MatchTable<'a> {
    pub matches: &'a [Match],
    pub buffer: &'a PredictionBuffer,
    pub points: Option<&'a PointsSummary>,
    pub selected: usize,
    pub field: Field,
    pub editable: bool,
}

impl Widget for MatchTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 2 {
            return;
        }

        // Keep the selected row in view.
        let visible = area.height.saturating_sub(1) as usize;
        let offset = self.selected.saturating_sub(visible.saturating_sub(1));

        let rows: Vec<Row> = self
            .matches
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(idx, m)| self.row(idx, m))
            .collect();

        let header = Row::new(HEADER.iter().map(|h| Cell::from(*h)))
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));

        Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Length(12),
                Constraint::Fill(1),
                Constraint::Length(11),
                Constraint::Length(8),
                Constraint::Length(4),
            ],
        )
        .header(header)
        .column_spacing(1)
        .render(area, buf);
    }
}

impl MatchTable<'_> {
    fn row(&self, idx: usize, m: &Match) -> Row<'static> {
        let is_selected = idx == self.selected;
        let marker = if is_selected { ">" } else { " " };
        let prediction = self.buffer.get(m.id);

        let prediction_cell = if is_selected && self.editable {
            Cell::from(focused_prediction(prediction, self.field))
        } else {
            Cell::from(prediction_text(prediction))
        };

        let row_style = match (is_selected, m.is_finished()) {
            (true, _) => Style::default().add_modifier(Modifier::BOLD),
            (false, true) => Style::default().fg(Color::DarkGray),
            (false, false) => Style::default(),
        };

        Row::new(vec![
            Cell::from(format!("{marker} {}", m.stage)),
            Cell::from(kickoff_text(m)),
            Cell::from(format!("{} vs {}", m.home_team.name, m.away_team.name)),
            prediction_cell,
            Cell::from(result_text(m.result)),
            Cell::from(points_text(self.points, m.id)),
        ])
        .style(row_style)
    }
}

fn focused_prediction(prediction: Option<ScorePair>, field: Field) -> Line<'static> {
    let (home_text, away_text) = prediction_sides(prediction);
    let focus = Style::default().fg(Color::Black).bg(Color::Yellow);
    let (home, away) = match field {
        Field::Home => (focus, Style::default()),
        Field::Away => (Style::default(), focus),
    };
    Line::from(vec![
        Span::styled(home_text, home),
        Span::raw(" : "),
        Span::styled(away_text, away),
    ])
}

/// Both sides stay `-` until an edit creates the entry.
fn prediction_sides(prediction: Option<ScorePair>) -> (String, String) {
    match prediction {
        Some(score) => (score.home.to_string(), score.away.to_string()),
        None => ("-".to_string(), "-".to_string()),
    }
}

pub fn prediction_text(prediction: Option<ScorePair>) -> String {
    match prediction {
        Some(score) => format!("{} : {}", score.home, score.away),
        None => "- : -".to_string(),
    }
}

pub fn result_text(result: Option<ScorePair>) -> String {
    result
        .map(|r| format!("{}-{}", r.home, r.away))
        .unwrap_or_default()
}

pub fn points_text(points: Option<&PointsSummary>, id: scorecast_api::MatchId) -> String {
    points
        .and_then(|p| p.points_for(id))
        .map(|p| p.to_string())
        .unwrap_or_default()
}

fn kickoff_text(m: &Match) -> String {
    m.kickoff_at
        .with_timezone(&chrono::Local)
        .format("%d %b %H:%M")
        .to_string()
}
