use grid_snake::clock::ManualClock;
use grid_snake::config::{Difficulty, Settings};
use grid_snake::food::Food;
use grid_snake::grid::Position;
use grid_snake::input::GameInput;
use grid_snake::mode::{App, Flow, Mode};
use grid_snake::round::DeathReason;

fn press(app: &mut App, clock: &ManualClock, inputs: &[GameInput]) {
    for input in inputs {
        assert_eq!(app.handle_event(*input, clock), Flow::Continue);
    }
}

#[test]
fn menu_to_hard_round_to_game_over_and_back() {
    let clock = ManualClock::starting_at(5_000);
    let mut app = App::new_with_seed(Settings::default(), 3, &clock);
    assert_eq!(app.mode(), Mode::MainMenu);

    press(&mut app, &clock, &[GameInput::Confirm]);
    assert_eq!(app.mode(), Mode::DifficultySelect { cursor: 1 });

    press(&mut app, &clock, &[GameInput::Down, GameInput::Confirm]);
    assert_eq!(app.mode(), Mode::Playing);
    assert_eq!(app.settings().current_difficulty, Difficulty::Hard);
    assert_eq!(app.round().score(), 0);
    assert_eq!(
        app.round().snake.growth_target(),
        app.settings().difficulties.hard.initial_length
    );

    // Hard uses the stop policy: drive straight right into the wall.
    app.round_mut().food = Food::at(Position::new(0, 0));
    let grid = app.round().grid();
    let start = app.round().snake.head();
    let steps_to_wall = i32::from(grid.width) - start.x;
    for _ in 0..steps_to_wall {
        clock.advance(101);
        app.update(&clock);
    }

    assert_eq!(app.mode(), Mode::GameOver);
    assert_eq!(app.round().death_reason(), Some(DeathReason::WallCollision));

    press(&mut app, &clock, &[GameInput::Restart]);
    assert_eq!(app.mode(), Mode::DifficultySelect { cursor: 2 });

    press(&mut app, &clock, &[GameInput::Cancel]);
    assert_eq!(app.mode(), Mode::MainMenu);

    assert_eq!(app.handle_event(GameInput::Quit, &clock), Flow::Quit);
}

#[test]
fn easy_round_wraps_instead_of_ending() {
    let clock = ManualClock::default();
    let mut app = App::new_with_seed(Settings::default(), 9, &clock);

    press(
        &mut app,
        &clock,
        &[GameInput::Confirm, GameInput::Up, GameInput::Confirm],
    );
    assert_eq!(app.settings().current_difficulty, Difficulty::Easy);

    app.round_mut().food = Food::at(Position::new(0, 0));
    press(&mut app, &clock, &[GameInput::Down]);

    let height = i32::from(app.round().grid().height);
    for _ in 0..height {
        clock.advance(251);
        app.update(&clock);
    }

    assert_eq!(app.mode(), Mode::Playing);
    assert_eq!(app.round().snake.head(), Position::new(15, 10));
}
