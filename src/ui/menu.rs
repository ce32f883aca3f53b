use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::{Difficulty, Settings, WallCollision};
use crate::renderer::color;
use crate::round::DeathReason;

const HINT_FG: Color = Color::Gray;
const UNSELECTED_FG: Color = Color::DarkGray;
const GAME_OVER_FG: Color = Color::Red;

/// Draws the main menu as a centered popup.
pub fn render_main_menu(frame: &mut Frame<'_>, area: Rect, settings: &Settings) {
    let popup = centered_popup(area, 70, 45);
    frame.render_widget(Clear, popup);

    let [title_row, body_row] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE GAME"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(color(settings.snake_color))
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body = vec![
        Line::from("[Enter] Start").style(Style::default().fg(HINT_FG)),
        Line::from("[Q] Quit").style(Style::default().fg(HINT_FG)),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" menu ")),
        body_row,
    );
}

/// Draws the difficulty list with the cursor row highlighted.
pub fn render_difficulty_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    cursor: usize,
    settings: &Settings,
) {
    let popup = centered_popup(area, 70, 70);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from("SELECT DIFFICULTY").style(
            Style::default()
                .fg(color(settings.text_color))
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
    ];

    for (index, difficulty) in Difficulty::ALL.into_iter().enumerate() {
        let style = if index == cursor {
            Style::default()
                .fg(color(settings.text_color))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(UNSELECTED_FG)
        };
        lines.push(Line::from(difficulty_row(difficulty, settings)).style(style));
    }

    lines.extend([
        Line::from(""),
        Line::from("Use UP/DOWN to select").style(Style::default().fg(HINT_FG)),
        Line::from("Press ENTER to start").style(Style::default().fg(HINT_FG)),
        Line::from("Press ESC to go back").style(Style::default().fg(HINT_FG)),
    ]);

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" difficulty ")),
        popup,
    );
}

/// Draws the game-over popup over the frozen board.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    death_reason: Option<DeathReason>,
) {
    let popup = centered_popup(area, 70, 50);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(GAME_OVER_FG)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(match death_reason {
            Some(DeathReason::WallCollision) => "Cause: hit wall",
            Some(DeathReason::SelfCollision) => "Cause: hit yourself",
            Some(DeathReason::BoardFull) => "Cause: board full",
            None => "",
        }),
        Line::from(""),
        Line::from("Press R to Select Difficulty").style(Style::default().fg(HINT_FG)),
        Line::from("Press ESC for Menu").style(Style::default().fg(HINT_FG)),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn difficulty_row(difficulty: Difficulty, settings: &Settings) -> String {
    let profile = settings.difficulties.get(difficulty);
    let walls = match profile.wall_collision {
        WallCollision::Wrap => "wrap",
        WallCollision::Stop => "walls",
    };
    format!(
        "{:<6}  {}ms  {walls}",
        difficulty.label(),
        difficulty.step_interval_ms()
    )
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
