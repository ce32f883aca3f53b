use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;

use crate::config::{CELL_COLUMNS, CELL_ROWS, GLYPH_CELL, Rgb, Settings};
use crate::grid::{GridSize, Position};
use crate::mode::{App, Mode};
use crate::round::{DrawCommand, Paint, Round};
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_difficulty_menu, render_game_over_menu, render_main_menu};

/// Converts a settings colour into a terminal colour.
#[must_use]
pub fn color(rgb: Rgb) -> Color {
    let [r, g, b] = rgb.0;
    Color::Rgb(r, g, b)
}

/// Renders the full frame for the active mode.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let settings = app.settings();
    let area = frame.area();
    frame.render_widget(
        Block::new().style(Style::new().bg(color(settings.background_color))),
        area,
    );

    match app.mode() {
        Mode::MainMenu => render_main_menu(frame, area, settings),
        Mode::DifficultySelect { cursor } => {
            render_difficulty_menu(frame, area, cursor, settings);
        }
        Mode::Playing => {
            render_round(frame, area, app.round(), settings);
        }
        Mode::GameOver => {
            let board = render_round(frame, area, app.round(), settings);
            render_game_over_menu(
                frame,
                board,
                app.round().score(),
                app.round().death_reason(),
            );
        }
    }
}

/// Draws the bordered board and HUD, returning the board rectangle.
fn render_round(frame: &mut Frame<'_>, area: Rect, round: &Round, settings: &Settings) -> Rect {
    let grid = round.grid();
    let (board, hud) = board_layout(area, grid);

    let block = Block::bordered().border_style(Style::new().fg(color(settings.text_color)));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    for command in round.draw_commands() {
        match command {
            DrawCommand::Cell { cell, paint } => {
                let Some((x, y)) = cell_origin(inner, grid, cell) else {
                    continue;
                };
                frame.buffer_mut().set_string(
                    x,
                    y,
                    GLYPH_CELL,
                    Style::new().fg(paint_color(paint, settings)),
                );
            }
            DrawCommand::Score(score) => render_hud(frame, hud, score, settings),
        }
    }

    board
}

fn paint_color(paint: Paint, settings: &Settings) -> Color {
    match paint {
        Paint::Snake => color(settings.snake_color),
        Paint::Food => color(settings.food_color),
    }
}

/// Centers the board (grid plus border) with a one-row HUD below it,
/// shrinking both to what fits in `area`.
fn board_layout(area: Rect, grid: GridSize) -> (Rect, Rect) {
    let hud_height = u16::from(area.height > 0);
    let width = grid
        .width
        .saturating_mul(CELL_COLUMNS)
        .saturating_add(2)
        .min(area.width);
    let height = grid
        .height
        .saturating_mul(CELL_ROWS)
        .saturating_add(2)
        .min(area.height - hud_height);

    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height - hud_height) / 2;

    (
        Rect::new(x, y, width, height),
        Rect::new(x, y + height, width, hud_height),
    )
}

/// Maps a grid cell to the terminal position of its left column, if visible.
fn cell_origin(inner: Rect, grid: GridSize, cell: Position) -> Option<(u16, u16)> {
    if !cell.is_within_bounds(grid) {
        return None;
    }

    let (dx, dy) = cell.scaled(CELL_COLUMNS, CELL_ROWS);
    let x = inner.x.checked_add(u16::try_from(dx).ok()?)?;
    let y = inner.y.checked_add(u16::try_from(dy).ok()?)?;
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
