//! Session engine for tic-tac-toe.
//!
//! [`GameEngine`] owns at most one [`Session`] and drives it through
//! `InProgress → Won(mark) | Draw`. All rejected requests return a
//! [`MoveError`] and leave the session exactly as it was, so a presentation
//! layer can forward stale or duplicate input without guarding it first.
//!
//! The engine has no notion of time. After a human move in
//! [`Mode::OnePlayerVsComputer`] the returned [`Placement`] reports
//! `computer_due`, and the caller decides when to call
//! [`GameEngine::computer_move`] or [`GameEngine::computer_move_for`].

use super::action::{Move, MoveError};
use super::contracts::{Contract, MoveContract};
use super::picker::{CandidatePicker, UniformPicker};
use super::rules::{is_full, winning_line_for, WinningLine};
use super::snapshot::Snapshot;
use super::{Board, GameStatus, Mark, Mode, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Identifies one session; a restart or new mode gets a fresh id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("session-{}", _0)]
pub struct SessionId(u64);

/// State of one game, from mode choice to a result or reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) id: SessionId,
    pub(crate) mode: Mode,
    pub(crate) board: Board,
    pub(crate) turn: Mark,
    pub(crate) status: GameStatus,
    pub(crate) winning_line: Option<WinningLine>,
    pub(crate) history: Vec<Move>,
}

impl Session {
    fn new(id: SessionId, mode: Mode) -> Self {
        Self {
            id,
            mode,
            board: Board::new(),
            turn: Mark::X,
            status: GameStatus::InProgress,
            winning_line: None,
            history: Vec::new(),
        }
    }

    /// Session id.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Mode chosen for this session.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark expected to move next. After the game ends this is the mark
    /// that made the final move.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The line that decided the game, when won.
    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winning_line
    }

    /// Moves in the order they were played.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// True while the computer holds the turn in an unfinished game.
    pub fn is_computer_turn(&self) -> bool {
        self.status == GameStatus::InProgress && self.mode.computer_mark() == Some(self.turn)
    }

    /// Message a presentation layer shows under the board.
    pub fn status_message(&self) -> String {
        match self.status {
            GameStatus::Won(mark) => format!("{} wins!", mark),
            GameStatus::Draw => "It's a draw!".to_string(),
            GameStatus::InProgress if self.history.is_empty() => "Start Game".to_string(),
            GameStatus::InProgress => format!("It's {}'s turn", self.turn),
        }
    }
}

/// Outcome of an accepted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    mv: Move,
    status: GameStatus,
    winning_line: Option<WinningLine>,
    computer_due: bool,
}

impl Placement {
    /// The move that was applied.
    pub fn mv(&self) -> Move {
        self.mv
    }

    /// Status after the move.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Line to highlight, when the move won.
    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winning_line
    }

    /// The computer should move next.
    pub fn computer_due(&self) -> bool {
        self.computer_due
    }
}

/// Tic-tac-toe session engine.
///
/// Generic over the [`CandidatePicker`] so the computer's choices can be
/// made reproducible.
#[derive(Debug, Clone)]
pub struct GameEngine<P = UniformPicker> {
    session: Option<Session>,
    picker: P,
    next_id: u64,
}

impl GameEngine<UniformPicker> {
    /// Creates an engine whose computer draws from OS entropy.
    #[instrument]
    pub fn new() -> Self {
        Self::with_picker(UniformPicker::from_entropy())
    }

    /// Creates an engine whose computer draws from a seeded generator.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self::with_picker(UniformPicker::seeded(seed))
    }
}

impl Default for GameEngine<UniformPicker> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: CandidatePicker> GameEngine<P> {
    /// Creates an engine with no session and the given picker.
    pub fn with_picker(picker: P) -> Self {
        Self {
            session: None,
            picker,
            next_id: 0,
        }
    }

    /// Current session, if a mode has been chosen.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Mode of the current session.
    pub fn mode(&self) -> Option<Mode> {
        self.session.as_ref().map(Session::mode)
    }

    /// Immutable view for rendering, if a mode has been chosen.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.session.as_ref().map(Snapshot::from)
    }

    /// Message for the presentation layer, including the mode-selection screen.
    pub fn status_message(&self) -> String {
        self.session
            .as_ref()
            .map(Session::status_message)
            .unwrap_or_else(|| "Choose a mode".to_string())
    }

    /// Starts a fresh session: empty board, X to move, in progress.
    ///
    /// Any earlier session is discarded, including one that was mid-game.
    #[instrument(skip(self))]
    pub fn start_session(&mut self, mode: Mode) -> Snapshot {
        self.next_id += 1;
        let session = Session::new(SessionId(self.next_id), mode);
        info!(session_id = %session.id, %mode, "Starting session");
        let snapshot = Snapshot::from(&session);
        self.session = Some(session);
        snapshot
    }

    /// Starts a fresh session in the current mode.
    ///
    /// # Errors
    ///
    /// [`MoveError::SessionNotActive`] when no mode has been chosen.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Result<Snapshot, MoveError> {
        let mode = self.mode().ok_or_else(|| {
            warn!("Restart requested before a mode was chosen");
            MoveError::SessionNotActive
        })?;
        Ok(self.start_session(mode))
    }

    /// Drops the session and its mode; the next game needs a new mode choice.
    #[instrument(skip(self))]
    pub fn return_to_mode_selection(&mut self) {
        if let Some(session) = self.session.take() {
            info!(session_id = %session.id, "Returned to mode selection");
        }
    }

    /// Places the current turn's mark at `cell` (0-8).
    ///
    /// # Errors
    ///
    /// - [`MoveError::SessionNotActive`] with no session or a finished game
    /// - [`MoveError::InvalidCell`] for an index outside 0-8
    /// - [`MoveError::WrongTurn`] when the computer holds the turn
    /// - [`MoveError::OccupiedCell`] when the square is taken
    #[instrument(skip(self))]
    pub fn place_mark(&mut self, cell: usize) -> Result<Placement, MoveError> {
        let session = self.active_session()?;
        let computer_turn = session.is_computer_turn();
        let turn = session.turn;

        let position = Position::from_index(cell).ok_or_else(|| {
            debug!(cell, "Rejected out-of-range cell");
            MoveError::InvalidCell(cell)
        })?;

        if computer_turn {
            debug!(cell, "Rejected human placement on the computer's turn");
            return Err(MoveError::WrongTurn(turn));
        }

        self.apply(position)
    }

    /// Lets the computer place its mark on a uniformly chosen empty cell.
    ///
    /// # Errors
    ///
    /// - [`MoveError::SessionNotActive`] with no session or a finished game
    /// - [`MoveError::WrongTurn`] when the mode has no computer or a human
    ///   holds the turn
    #[instrument(skip(self))]
    pub fn computer_move(&mut self) -> Result<Placement, MoveError> {
        let session = self.active_session()?;
        if !session.is_computer_turn() {
            debug!(turn = %session.turn, mode = %session.mode, "Computer move out of turn");
            return Err(MoveError::WrongTurn(session.turn));
        }

        let candidates = session.board.empty_positions();
        if candidates.is_empty() {
            return Err(MoveError::InvariantViolation(
                "In-progress game has no empty cell".to_string(),
            ));
        }

        let index = self.picker.pick(candidates.len());
        let position = candidates.get(index).copied().ok_or_else(|| {
            MoveError::InvariantViolation(format!(
                "Picker chose {} of {} candidates",
                index,
                candidates.len()
            ))
        })?;
        debug!(candidates = candidates.len(), index, %position, "Computer chose cell");

        self.apply(position)
    }

    /// Like [`computer_move`](Self::computer_move), but only for the session
    /// it was scheduled in. A deferred move that outlived a restart or mode
    /// change is rejected with [`MoveError::SessionNotActive`].
    #[instrument(skip(self))]
    pub fn computer_move_for(&mut self, session_id: SessionId) -> Result<Placement, MoveError> {
        if self.session.as_ref().map(Session::id) != Some(session_id) {
            debug!(%session_id, "Dropping computer move for a stale session");
            return Err(MoveError::SessionNotActive);
        }
        self.computer_move()
    }

    /// Starts a session and places `cells` in order, alternating marks.
    ///
    /// The computer's cells are taken from the list as well, so any recorded
    /// game can be rebuilt. Stops at the first rejected cell.
    #[instrument(skip(self))]
    pub fn replay(&mut self, mode: Mode, cells: &[usize]) -> Result<Snapshot, MoveError> {
        self.start_session(mode);
        for &cell in cells {
            self.active_session()?;
            let position = Position::from_index(cell).ok_or(MoveError::InvalidCell(cell))?;
            self.apply(position)?;
        }
        debug!(moves = cells.len(), "Replay complete");
        self.snapshot().ok_or(MoveError::SessionNotActive)
    }

    fn active_session(&self) -> Result<&Session, MoveError> {
        match &self.session {
            Some(session) if session.status == GameStatus::InProgress => Ok(session),
            Some(session) => {
                debug!(status = ?session.status, "Session already finished");
                Err(MoveError::SessionNotActive)
            }
            None => Err(MoveError::SessionNotActive),
        }
    }

    /// Places the turn's mark and evaluates the result.
    fn apply(&mut self, position: Position) -> Result<Placement, MoveError> {
        let session = self.session.as_mut().ok_or(MoveError::SessionNotActive)?;
        let mv = Move::new(session.turn, position);

        MoveContract::pre(session, &mv)?;

        #[cfg(debug_assertions)]
        let before = session.clone();

        session.board.set(position, Square::Occupied(mv.mark));
        session.history.push(mv);

        if let Some(line) = winning_line_for(&session.board, mv.mark) {
            session.status = GameStatus::Won(mv.mark);
            session.winning_line = Some(line);
            info!(session_id = %session.id, winner = %mv.mark, %line, "Game won");
        } else if is_full(&session.board) {
            session.status = GameStatus::Draw;
            info!(session_id = %session.id, "Game drawn");
        } else {
            session.turn = mv.mark.opponent();
        }

        #[cfg(debug_assertions)]
        MoveContract::post(&before, session)?;

        let placement = Placement {
            mv,
            status: session.status,
            winning_line: session.winning_line,
            computer_due: session.is_computer_turn(),
        };
        debug!(%mv, status = ?placement.status, computer_due = placement.computer_due, "Move applied");
        Ok(placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedPicker;

    fn engine() -> GameEngine<FixedPicker> {
        GameEngine::with_picker(FixedPicker(0))
    }

    #[test]
    fn test_place_before_session_rejected() {
        let mut engine = engine();
        assert_eq!(engine.place_mark(0), Err(MoveError::SessionNotActive));
        assert_eq!(engine.computer_move(), Err(MoveError::SessionNotActive));
        assert_eq!(engine.status_message(), "Choose a mode");
    }

    #[test]
    fn test_new_session_ids_increase() {
        let mut engine = engine();
        let first = engine.start_session(Mode::TwoPlayer);
        let second = engine.restart().expect("mode chosen");
        assert!(second.session_id() > first.session_id());
    }

    #[test]
    fn test_out_of_range_cell_rejected() {
        let mut engine = engine();
        engine.start_session(Mode::TwoPlayer);
        assert_eq!(engine.place_mark(9), Err(MoveError::InvalidCell(9)));
        assert!(engine.session().expect("session").history().is_empty());
    }

    #[test]
    fn test_human_cannot_play_computer_mark() {
        let mut engine = engine();
        engine.start_session(Mode::OnePlayerVsComputer);
        let placement = engine.place_mark(4).expect("X plays");
        assert!(placement.computer_due());

        assert_eq!(engine.place_mark(0), Err(MoveError::WrongTurn(Mark::O)));
        assert_eq!(engine.session().expect("session").history().len(), 1);
    }

    #[test]
    fn test_computer_move_needs_computer_turn() {
        let mut engine = engine();
        engine.start_session(Mode::OnePlayerVsComputer);
        assert_eq!(engine.computer_move(), Err(MoveError::WrongTurn(Mark::X)));

        engine.start_session(Mode::TwoPlayer);
        engine.place_mark(0).expect("X plays");
        assert_eq!(engine.computer_move(), Err(MoveError::WrongTurn(Mark::O)));
    }

    #[test]
    fn test_status_messages_follow_the_game() {
        let mut engine = engine();
        engine.start_session(Mode::TwoPlayer);
        assert_eq!(engine.status_message(), "Start Game");
        engine.place_mark(0).expect("X plays");
        assert_eq!(engine.status_message(), "It's O's turn");
        engine.replay(Mode::TwoPlayer, &[0, 3, 1, 4, 2]).expect("replay");
        assert_eq!(engine.status_message(), "X wins!");
    }

    #[test]
    fn test_replay_stops_at_rejected_cell() {
        let mut engine = engine();
        assert_eq!(
            engine.replay(Mode::TwoPlayer, &[0, 0]),
            Err(MoveError::OccupiedCell(Position::TopLeft))
        );
        assert_eq!(engine.session().expect("session").history().len(), 1);
    }

    #[test]
    fn test_return_to_mode_selection_clears_mode() {
        let mut engine = engine();
        engine.start_session(Mode::OnePlayerVsComputer);
        engine.return_to_mode_selection();
        assert_eq!(engine.mode(), None);
        assert!(engine.snapshot().is_none());
        assert_eq!(engine.restart(), Err(MoveError::SessionNotActive));
    }
}
