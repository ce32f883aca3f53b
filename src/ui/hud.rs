use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::{Difficulty, Settings};
use crate::renderer::color;

const LABEL_FG: Color = Color::DarkGray;

/// Renders the one-line status bar: score on the left, difficulty on the right.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, score: u32, settings: &Settings) {
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(16)]).areas(area);

    frame.render_widget(
        Paragraph::new(score_line(score, settings)).alignment(Alignment::Left),
        left,
    );
    frame.render_widget(
        Paragraph::new(difficulty_line(settings.current_difficulty)).alignment(Alignment::Right),
        right,
    );
}

fn score_line(score: u32, settings: &Settings) -> Line<'static> {
    Line::from(vec![
        Span::styled("Score: ", Style::default().fg(LABEL_FG)),
        Span::styled(
            score.to_string(),
            Style::default()
                .fg(color(settings.text_color))
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn difficulty_line(difficulty: Difficulty) -> Line<'static> {
    Line::from(Span::styled(
        difficulty.label(),
        Style::default().fg(LABEL_FG),
    ))
}
