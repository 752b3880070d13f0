//! Scenario tests for the tic-tac-toe session engine.

use tictactoe_engine::{
    FixedPicker, GameEngine, GameStatus, Mark, Mode, MoveError, Position, Square, UniformPicker,
};

fn engine() -> GameEngine<FixedPicker> {
    GameEngine::with_picker(FixedPicker(0))
}

#[test]
fn test_start_session_resets_everything() {
    let mut engine = engine();
    let snapshot = engine.start_session(Mode::TwoPlayer);

    assert!(snapshot.board().squares().iter().all(|s| *s == Square::Empty));
    assert_eq!(snapshot.turn(), &Mark::X);
    assert_eq!(snapshot.status(), &GameStatus::InProgress);
    assert_eq!(snapshot.mode(), &Mode::TwoPlayer);
    assert_eq!(snapshot.message(), "Start Game");
}

#[test]
fn test_top_row_win() {
    let mut engine = engine();
    engine.start_session(Mode::TwoPlayer);

    for cell in [0, 3, 1, 4] {
        let placement = engine.place_mark(cell).expect("legal move");
        assert_eq!(placement.status(), GameStatus::InProgress);
        assert!(!placement.computer_due());
    }

    let placement = engine.place_mark(2).expect("winning move");
    assert_eq!(placement.status(), GameStatus::Won(Mark::X));
    assert_eq!(placement.winning_line().map(|l| l.indices()), Some([0, 1, 2]));
    assert_eq!(engine.status_message(), "X wins!");
}

#[test]
fn test_full_board_draw() {
    let mut engine = engine();
    engine.start_session(Mode::TwoPlayer);

    let cells = [0, 4, 2, 1, 3, 5, 7, 6];
    for cell in cells {
        assert_eq!(
            engine.place_mark(cell).expect("legal move").status(),
            GameStatus::InProgress
        );
    }

    let placement = engine.place_mark(8).expect("last square");
    assert_eq!(placement.status(), GameStatus::Draw);
    assert_eq!(placement.winning_line(), None);
    assert_eq!(engine.status_message(), "It's a draw!");
}

#[test]
fn test_computer_replies_on_lowest_cell_with_fixed_picker() {
    let mut engine = engine();
    engine.start_session(Mode::OnePlayerVsComputer);

    let human = engine.place_mark(0).expect("X plays");
    assert!(human.computer_due());

    let computer = engine.computer_move().expect("computer's turn");
    assert_eq!(computer.mv().mark, Mark::O);
    assert_eq!(computer.mv().position, Position::TopCenter);
    assert_eq!(computer.status(), GameStatus::InProgress);
    assert!(!computer.computer_due());

    let session = engine.session().expect("session");
    assert_eq!(session.turn(), Mark::X);
    assert_eq!(session.status_message(), "It's X's turn");
}

#[test]
fn test_computer_can_win() {
    // X: 3, 5, 7 never line up; O takes 0, 1, 2 as the lowest free cells.
    let mut engine = engine();
    engine.start_session(Mode::OnePlayerVsComputer);

    for cell in [3, 5] {
        engine.place_mark(cell).expect("X plays");
        engine.computer_move().expect("O replies");
    }
    engine.place_mark(7).expect("X plays");
    let placement = engine.computer_move().expect("O replies");

    assert_eq!(placement.status(), GameStatus::Won(Mark::O));
    assert_eq!(placement.status().winner(), Some(Mark::O));
    assert_eq!(placement.winning_line().map(|l| l.indices()), Some([0, 1, 2]));
}

#[test]
fn test_occupied_cell_is_rejected_without_change() {
    let mut engine = engine();
    engine.start_session(Mode::TwoPlayer);
    engine.place_mark(4).expect("X plays");
    let before = engine.snapshot().expect("session");

    assert_eq!(
        engine.place_mark(4),
        Err(MoveError::OccupiedCell(Position::Center))
    );
    assert_eq!(engine.snapshot().expect("session"), before);
}

#[test]
fn test_placement_after_win_is_rejected() {
    let mut engine = engine();
    engine.replay(Mode::TwoPlayer, &[0, 3, 1, 4, 2]).expect("replay");
    let before = engine.snapshot().expect("session");

    assert_eq!(engine.place_mark(8), Err(MoveError::SessionNotActive));
    assert_eq!(engine.snapshot().expect("session"), before);
}

#[test]
fn test_computer_move_after_end_is_noop() {
    let mut engine = engine();
    engine
        .replay(Mode::OnePlayerVsComputer, &[0, 4, 2, 1, 3, 5, 7, 6, 8])
        .expect("replay");
    let before = engine.snapshot().expect("session");
    assert_eq!(before.status(), &GameStatus::Draw);

    assert_eq!(engine.computer_move(), Err(MoveError::SessionNotActive));
    assert_eq!(engine.snapshot().expect("session"), before);
}

#[test]
fn test_restart_keeps_mode() {
    let mut engine = engine();
    engine
        .replay(Mode::OnePlayerVsComputer, &[0, 3, 1, 4, 2])
        .expect("replay");

    let snapshot = engine.restart().expect("mode chosen");
    assert_eq!(snapshot.mode(), &Mode::OnePlayerVsComputer);
    assert_eq!(snapshot.status(), &GameStatus::InProgress);
    assert_eq!(snapshot.turn(), &Mark::X);
    assert!(snapshot.history().is_empty());
    assert!(snapshot.board().squares().iter().all(|s| *s == Square::Empty));
}

#[test]
fn test_stale_computer_move_is_dropped_after_restart() {
    let mut engine = engine();
    engine.start_session(Mode::OnePlayerVsComputer);
    engine.place_mark(4).expect("X plays");
    let stale = engine.session().expect("session").id();

    engine.restart().expect("mode chosen");
    assert_eq!(
        engine.computer_move_for(stale),
        Err(MoveError::SessionNotActive)
    );
    assert!(engine.session().expect("session").history().is_empty());
}

#[test]
fn test_stale_computer_move_is_dropped_after_mode_change() {
    let mut engine = engine();
    engine.start_session(Mode::OnePlayerVsComputer);
    engine.place_mark(4).expect("X plays");
    let stale = engine.session().expect("session").id();

    engine.start_session(Mode::TwoPlayer);
    assert_eq!(
        engine.computer_move_for(stale),
        Err(MoveError::SessionNotActive)
    );
}

#[test]
fn test_scheduled_move_for_current_session_lands() {
    let mut engine = engine();
    engine.start_session(Mode::OnePlayerVsComputer);
    engine.place_mark(4).expect("X plays");
    let id = engine.session().expect("session").id();

    let placement = engine.computer_move_for(id).expect("same session");
    assert_eq!(placement.mv().position, Position::TopLeft);
}

#[test]
fn test_seeded_engines_play_identical_games() {
    fn play(seed: u64) -> Vec<Position> {
        let mut engine = GameEngine::with_picker(UniformPicker::seeded(seed));
        engine.start_session(Mode::OnePlayerVsComputer);
        let mut replies = Vec::new();
        while engine.session().is_some_and(|s| !s.status().is_over()) {
            let open = engine.session().expect("session").board().empty_positions();
            let placement = engine.place_mark(open[0].to_index()).expect("X plays");
            if placement.computer_due() {
                replies.push(engine.computer_move().expect("O replies").mv().position);
            }
        }
        replies
    }

    assert_eq!(play(99), play(99));
}
