//! Game state module - the event-driven state machine
//!
//! This module ties together all core components: board, pieces, supply,
//! difficulty, scoring and the line-clear animation. It is driven by two kinds
//! of events, player actions and timer events, and answers every one of them
//! with a [`Transition`] instead of sleeping or owning a clock.
//!
//! Lifecycle of a piece:
//!
//! 1. An `Advance` with no current piece promotes the upcoming piece and draws
//!    a new one.
//! 2. Each further `Advance` moves the piece down one row (unless a hard drop
//!    just happened, which buys one grace advance).
//! 3. When it cannot move down it locks. Completed rows in its span start a
//!    line-clear animation; otherwise the next `Advance` spawns again.
//!
//! The current piece is drawn into the board. Every transformation is
//! speculative: erase, test, then either redraw the new piece or restore the
//! old one, so the board never holds a half-applied move.

use std::time::Duration;

use arrayvec::ArrayVec;

use crate::animation::{AnimationStep, LineAnimation};
use crate::board::Board;
use crate::difficulty::Difficulty;
use crate::piece::Piece;
use crate::schedule::{TimerEvent, Transition};
use crate::scoring::{calculate_points, ScoreEvent};
use crate::snapshot::{GameSnapshot, NextSnapshot};
use crate::supply::Supply;
use crate::types::{CoreEvent, DropHold, EndReason, GameAction, PieceKind, LINE_ANIMATION_MS};

/// Capacity of the observation queue between two drains.
pub const EVENT_QUEUE_CAP: usize = 16;

/// Anything the state machine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Input(GameAction),
    Timer(TimerEvent),
}

impl From<GameAction> for GameEvent {
    fn from(action: GameAction) -> Self {
        GameEvent::Input(action)
    }
}

impl From<TimerEvent> for GameEvent {
    fn from(event: TimerEvent) -> Self {
        GameEvent::Timer(event)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current: Option<Piece>,
    next: Option<Piece>,
    supply: Supply,
    difficulty: Difficulty,
    drop_hold: DropHold,
    paused: bool,
    animation: Option<LineAnimation>,
    score: u32,
    ended: Option<EndReason>,
    /// Observation records (consumed by observers).
    events: ArrayVec<CoreEvent, EVENT_QUEUE_CAP>,
}

impl GameState {
    /// Create a new session with the given supply seed
    pub fn new(seed: u32) -> Self {
        Self::with_board(seed, Board::new())
    }

    /// Create a session on a pre-filled board.
    pub fn with_board(seed: u32, board: Board) -> Self {
        Self {
            board,
            current: None,
            next: None,
            supply: Supply::new(seed),
            difficulty: Difficulty::new(),
            drop_hold: DropHold::Finished,
            paused: false,
            animation: None,
            score: 0,
            ended: None,
            events: ArrayVec::new(),
        }
    }

    /// First scheduling instruction of a session: an immediate advance.
    pub fn start(&self) -> Transition {
        match self.ended {
            Some(reason) => Transition::End(reason),
            None => Transition::schedule(TimerEvent::Advance, Duration::ZERO),
        }
    }

    /// Single entry point for the driver.
    pub fn handle(&mut self, event: GameEvent) -> Transition {
        match event {
            GameEvent::Input(action) => self.apply_action(action),
            GameEvent::Timer(timer) => self.on_timer(timer),
        }
    }

    pub fn on_timer(&mut self, event: TimerEvent) -> Transition {
        match event {
            TimerEvent::Advance => self.advance(),
            TimerEvent::AnimationStep => self.animation_step(),
        }
    }

    /// Periodic gravity step: spawn, grace, fall or lock.
    pub fn advance(&mut self) -> Transition {
        if self.ended.is_some() || self.paused || self.animation.is_some() {
            return Transition::Idle;
        }

        if self.next.is_none() {
            let piece = self.draw_piece();
            self.next = Some(piece);
        }

        let Some(current) = self.current else {
            return self.spawn();
        };

        if self.drop_hold == DropHold::Initiated {
            self.drop_hold = DropHold::InProgress;
            return self.next_advance();
        }

        if self.try_transform(Piece::move_down) {
            self.award(ScoreEvent::Fell);
            return self.next_advance();
        }

        self.lock(current)
    }

    /// One line-clear flash step; the last one collapses the rows.
    pub fn animation_step(&mut self) -> Transition {
        if self.ended.is_some() {
            return Transition::Idle;
        }
        let Some(animation) = self.animation.as_mut() else {
            return Transition::Idle;
        };

        match animation.step(&mut self.board) {
            AnimationStep::Continue => Self::next_animation_step(),
            AnimationStep::Finished => {
                let rows: ArrayVec<usize, 4> = animation.rows().collect();
                self.animation = None;
                self.board.collapse_rows(&rows);

                let points = self.award(ScoreEvent::LinesCleared(rows.len()));
                self.push_event(CoreEvent::LinesCleared {
                    count: rows.len() as u8,
                    points,
                });
                Transition::schedule(TimerEvent::Advance, Duration::ZERO)
            }
        }
    }

    /// Apply a player action.
    ///
    /// `Quit` is always honoured. Everything else is dropped after the session
    /// ended or while rows are flashing; moves are also dropped while paused
    /// or between pieces.
    pub fn apply_action(&mut self, action: GameAction) -> Transition {
        match action {
            GameAction::Quit => self.quit(),
            _ if self.ended.is_some() || self.animation.is_some() => Transition::Idle,
            GameAction::TogglePause => self.toggle_pause(),
            _ if self.paused || self.current.is_none() => Transition::Idle,
            GameAction::MoveLeft => {
                self.try_transform(Piece::move_left);
                Transition::Idle
            }
            GameAction::MoveRight => {
                self.try_transform(Piece::move_right);
                Transition::Idle
            }
            GameAction::RotateLeft => {
                self.try_transform(Piece::rotate_left);
                Transition::Idle
            }
            GameAction::RotateRight => {
                self.try_transform(Piece::rotate_right);
                Transition::Idle
            }
            GameAction::HardDrop => {
                self.hard_drop();
                Transition::Idle
            }
        }
    }

    fn quit(&mut self) -> Transition {
        match self.ended {
            Some(reason) => Transition::End(reason),
            None => self.end(EndReason::Quit),
        }
    }

    fn toggle_pause(&mut self) -> Transition {
        self.paused = !self.paused;
        if self.paused {
            self.push_event(CoreEvent::Paused);
            Transition::Idle
        } else {
            self.push_event(CoreEvent::Resumed);
            self.next_advance()
        }
    }

    /// Drop the current piece as far as it goes.
    ///
    /// Refused until the previous hard drop has been resolved by a lock.
    fn hard_drop(&mut self) {
        if self.drop_hold != DropHold::Finished {
            return;
        }
        self.drop_hold = DropHold::Initiated;
        while self.try_transform(Piece::move_down) {
            self.award(ScoreEvent::HardDropCell);
        }
    }

    /// Erase the current piece, test the transformed one, then commit or
    /// restore. Returns whether the transformation was committed.
    fn try_transform(&mut self, transform: fn(&Piece) -> Piece) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        let candidate = transform(&current);

        self.board.remove_piece(&current);
        if self.board.is_valid_placement(&candidate) {
            self.board.place_piece(&candidate);
            self.current = Some(candidate);
            true
        } else {
            self.board.place_piece(&current);
            false
        }
    }

    fn spawn(&mut self) -> Transition {
        let piece = match self.next.take() {
            Some(piece) => piece,
            None => self.draw_piece(),
        };
        let upcoming = self.draw_piece();
        self.next = Some(upcoming);

        if !self.board.is_valid_placement(&piece) {
            return self.end(EndReason::BlockOut);
        }

        self.board.place_piece(&piece);
        self.current = Some(piece);
        self.push_event(CoreEvent::Spawned { kind: piece.kind() });
        self.next_advance()
    }

    fn lock(&mut self, piece: Piece) -> Transition {
        let (_, top) = piece.position();
        self.push_event(CoreEvent::Locked {
            kind: piece.kind(),
            row: top as u8,
        });

        if self.difficulty.on_piece_locked() {
            self.push_event(CoreEvent::LevelUp {
                level_tenths: self.difficulty.level_tenths(),
                tick_ms: self.difficulty.tick_interval().as_millis() as u64,
            });
        }

        let top = top.max(0) as usize;
        let bottom = top + piece.height() - 1;
        let completed = self.board.completed_rows(top, bottom);

        self.current = None;
        self.drop_hold = DropHold::Finished;

        if !completed.is_empty() {
            self.push_event(CoreEvent::LinesCompleted {
                count: completed.len() as u8,
            });
            // The first flash shows right away.
            let mut animation = LineAnimation::new(&completed);
            animation.step(&mut self.board);
            self.animation = Some(animation);
            return Self::next_animation_step();
        }

        if top == 0 {
            return self.end(EndReason::LockOut);
        }

        self.next_advance()
    }

    fn end(&mut self, reason: EndReason) -> Transition {
        self.ended = Some(reason);
        self.push_event(CoreEvent::Ended { reason });
        Transition::End(reason)
    }

    fn draw_piece(&mut self) -> Piece {
        let draw = self.supply.draw();
        if draw.fallback {
            self.push_event(CoreEvent::SupplyFallback { kind: draw.kind });
        }
        Piece::spawn(draw.kind)
    }

    fn award(&mut self, event: ScoreEvent) -> u32 {
        let points = calculate_points(event, self.difficulty.level_tenths());
        self.score = self.score.saturating_add(points);
        points
    }

    fn next_advance(&self) -> Transition {
        Transition::schedule(TimerEvent::Advance, self.difficulty.tick_interval())
    }

    fn next_animation_step() -> Transition {
        Transition::schedule(
            TimerEvent::AnimationStep,
            Duration::from_millis(LINE_ANIMATION_MS),
        )
    }

    fn push_event(&mut self, event: CoreEvent) {
        // Full: evict the oldest record.
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take all queued observation records.
    pub fn take_events(&mut self) -> ArrayVec<CoreEvent, EVENT_QUEUE_CAP> {
        std::mem::take(&mut self.events)
    }

    /// Replace the upcoming piece (scripted setups and replays).
    pub fn set_next(&mut self, kind: PieceKind) {
        self.next = Some(Piece::spawn(kind));
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next_piece(&self) -> Option<Piece> {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> f32 {
        self.difficulty.level()
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn drop_hold(&self) -> DropHold {
        self.drop_hold
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&LineAnimation> {
        self.animation.as_ref()
    }

    pub fn ended(&self) -> Option<EndReason> {
        self.ended
    }

    pub fn supply(&self) -> &Supply {
        &self.supply
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_color_grid(&mut out.board);
        out.next = self.next.map(|piece| NextSnapshot {
            kind: piece.kind(),
            grid: piece.grid(),
            color: piece.color(),
        });
        out.score = self.score;
        out.level_tenths = self.difficulty.level_tenths();
        out.paused = self.paused;
        out.animating = self.animation.is_some();
        out.ended = self.ended;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::HIGHLIGHT;
    use crate::types::Color;

    fn tick() -> Transition {
        Transition::schedule(TimerEvent::Advance, Duration::from_millis(300))
    }

    fn started_with(kind: PieceKind, board: Board) -> GameState {
        let mut state = GameState::with_board(12345, board);
        state.set_next(kind);
        assert_eq!(state.advance(), tick());
        state
    }

    #[test]
    fn test_start_schedules_immediate_advance() {
        let state = GameState::new(1);
        assert_eq!(
            state.start(),
            Transition::schedule(TimerEvent::Advance, Duration::ZERO)
        );
        assert!(state.current().is_none());
    }

    #[test]
    fn test_first_advance_spawns() {
        let mut state = GameState::new(12345);
        assert_eq!(state.advance(), tick());

        let current = state.current().unwrap();
        assert_eq!(current.position(), (4, 0));
        assert!(state.next_piece().is_some());
        for (x, y) in current.cells() {
            assert_eq!(state.board().get(x, y), Some(Some(current.color())));
        }

        let events = state.take_events();
        assert!(events.contains(&CoreEvent::Spawned {
            kind: current.kind()
        }));
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_gravity_awards_fall_point() {
        let mut state = started_with(PieceKind::O, Board::new());
        assert_eq!(state.advance(), tick());
        assert_eq!(state.current().unwrap().position(), (4, 1));
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_move_against_wall_rolls_back() {
        let mut state = started_with(PieceKind::I, Board::new());
        for _ in 0..4 {
            state.apply_action(GameAction::MoveLeft);
        }
        assert_eq!(state.current().unwrap().position(), (0, 0));
        let before = state.board().clone();

        assert_eq!(state.apply_action(GameAction::MoveLeft), Transition::Idle);
        assert_eq!(state.current().unwrap().position(), (0, 0));
        assert_eq!(state.board(), &before);
    }

    #[test]
    fn test_rotation_rolls_back_at_right_wall() {
        let mut state = started_with(PieceKind::I, Board::new());
        for _ in 0..5 {
            state.apply_action(GameAction::MoveRight);
        }
        let current = state.current().unwrap();
        assert_eq!(current.position(), (9, 0));
        let before = state.board().clone();

        state.apply_action(GameAction::RotateRight);
        assert_eq!(state.current().unwrap(), current);
        assert_eq!(state.board(), &before);
    }

    #[test]
    fn test_rotation_commits_when_valid() {
        let mut state = started_with(PieceKind::I, Board::new());
        state.apply_action(GameAction::RotateRight);

        let current = state.current().unwrap();
        assert_eq!((current.height(), current.width()), (1, 4));
        for x in 4..8 {
            assert_eq!(state.board().get(x, 0), Some(Some(Color::Teal)));
        }
        assert_eq!(state.board().get(4, 1), Some(None));
    }

    #[test]
    fn test_hard_drop_grace_then_lock() {
        let mut state = started_with(PieceKind::I, Board::new());

        assert_eq!(state.apply_action(GameAction::HardDrop), Transition::Idle);
        assert_eq!(state.current().unwrap().position(), (4, 16));
        assert_eq!(state.drop_hold(), DropHold::Initiated);
        assert_eq!(state.score(), 32);

        // Grace advance: no movement.
        assert_eq!(state.advance(), tick());
        assert_eq!(state.drop_hold(), DropHold::InProgress);
        assert_eq!(state.current().unwrap().position(), (4, 16));

        // Lock.
        assert_eq!(state.advance(), tick());
        assert!(state.current().is_none());
        assert_eq!(state.drop_hold(), DropHold::Finished);
        for y in 16..20 {
            assert_eq!(state.board().get(4, y), Some(Some(Color::Teal)));
        }
        assert_eq!(state.difficulty().countdown(), 9);

        // Next advance spawns.
        state.advance();
        assert!(state.current().is_some());
    }

    #[test]
    fn test_second_hard_drop_is_refused_until_lock() {
        let mut board = Board::new();
        board.set(4, 19, Some(Color::Blue));
        let mut state = started_with(PieceKind::I, board);

        state.apply_action(GameAction::HardDrop);
        assert_eq!(state.current().unwrap().position(), (4, 15));

        state.apply_action(GameAction::MoveLeft);
        let score = state.score();
        state.apply_action(GameAction::HardDrop);
        assert_eq!(state.current().unwrap().position(), (3, 15));
        assert_eq!(state.score(), score);
    }

    #[test]
    fn test_pause_drops_advances_and_moves() {
        let mut state = started_with(PieceKind::T, Board::new());

        assert_eq!(state.apply_action(GameAction::TogglePause), Transition::Idle);
        assert!(state.paused());
        assert!(!state.snapshot().playable());

        let position = state.current().unwrap().position();
        assert_eq!(state.advance(), Transition::Idle);
        state.apply_action(GameAction::MoveLeft);
        state.apply_action(GameAction::HardDrop);
        assert_eq!(state.current().unwrap().position(), position);

        assert_eq!(state.apply_action(GameAction::TogglePause), tick());
        assert!(!state.paused());

        let events = state.take_events();
        assert!(events.contains(&CoreEvent::Paused));
        assert!(events.contains(&CoreEvent::Resumed));
    }

    #[test]
    fn test_quit_ends_in_any_state() {
        let mut state = started_with(PieceKind::T, Board::new());
        state.apply_action(GameAction::TogglePause);

        assert_eq!(
            state.apply_action(GameAction::Quit),
            Transition::End(EndReason::Quit)
        );
        assert_eq!(state.ended(), Some(EndReason::Quit));

        assert_eq!(state.advance(), Transition::Idle);
        assert_eq!(state.apply_action(GameAction::MoveLeft), Transition::Idle);
        assert_eq!(
            state.apply_action(GameAction::Quit),
            Transition::End(EndReason::Quit)
        );
    }

    #[test]
    fn test_line_clear_animation_and_score() {
        let mut board = Board::new();
        for x in 0..10 {
            if x != 4 {
                board.set(x, 19, Some(Color::Green));
            }
        }
        let mut state = started_with(PieceKind::I, board);
        state.apply_action(GameAction::HardDrop);
        state.advance();

        // Lock completes row 19: first flash is immediate.
        assert_eq!(
            state.advance(),
            Transition::schedule(TimerEvent::AnimationStep, Duration::from_millis(100))
        );
        assert!(state.animating());
        assert!(state.board().row(19).iter().all(|c| *c == Some(HIGHLIGHT)));
        assert!(state
            .take_events()
            .contains(&CoreEvent::LinesCompleted { count: 1 }));

        // Suppressed while flashing.
        let before = state.board().clone();
        assert_eq!(state.advance(), Transition::Idle);
        assert_eq!(state.apply_action(GameAction::TogglePause), Transition::Idle);
        assert_eq!(state.board(), &before);
        assert!(!state.paused());

        // Restore step.
        assert_eq!(
            state.animation_step(),
            Transition::schedule(TimerEvent::AnimationStep, Duration::from_millis(100))
        );
        assert_eq!(state.board().get(0, 19), Some(Some(Color::Green)));

        // Finish: collapse, score, immediate advance.
        assert_eq!(
            state.animation_step(),
            Transition::schedule(TimerEvent::Advance, Duration::ZERO)
        );
        assert!(!state.animating());
        assert_eq!(state.score(), 32 + 100);
        assert_eq!(state.board().get(0, 19), Some(None));
        for y in 17..20 {
            assert_eq!(state.board().get(4, y), Some(Some(Color::Teal)));
        }
        assert_eq!(state.board().get(4, 16), Some(None));
        assert!(state.take_events().contains(&CoreEvent::LinesCleared {
            count: 1,
            points: 100
        }));
    }

    #[test]
    fn test_animation_step_without_animation_is_idle() {
        let mut state = started_with(PieceKind::O, Board::new());
        assert_eq!(state.animation_step(), Transition::Idle);
    }

    #[test]
    fn test_lock_on_top_row_is_loss() {
        let mut board = Board::new();
        board.set(4, 4, Some(Color::Blue));
        let mut state = started_with(PieceKind::I, board);

        assert_eq!(state.advance(), Transition::End(EndReason::LockOut));
        assert_eq!(state.ended(), Some(EndReason::LockOut));
        assert!(state
            .take_events()
            .contains(&CoreEvent::Ended {
                reason: EndReason::LockOut
            }));
    }

    #[test]
    fn test_blocked_spawn_is_loss() {
        let mut board = Board::new();
        board.set(4, 0, Some(Color::Blue));
        let mut state = GameState::with_board(7, board);
        state.set_next(PieceKind::I);

        assert_eq!(state.advance(), Transition::End(EndReason::BlockOut));
        assert!(state.current().is_none());
        assert_eq!(state.board().get(4, 1), Some(None));
    }

    #[test]
    fn test_full_event_queue_keeps_newest_records() {
        let mut state = GameState::new(1);
        state.advance();
        for _ in 0..2 * EVENT_QUEUE_CAP {
            state.apply_action(GameAction::TogglePause);
        }
        state.apply_action(GameAction::Quit);

        let events = state.take_events();
        assert_eq!(events.len(), EVENT_QUEUE_CAP);
        assert_eq!(
            events.last(),
            Some(&CoreEvent::Ended {
                reason: EndReason::Quit
            })
        );
        assert!(!events
            .iter()
            .any(|e| matches!(e, CoreEvent::Spawned { .. })));
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let state = started_with(PieceKind::T, Board::new());
        let snap = state.snapshot();

        assert_eq!(snap.color_at(4, 0), Some(Color::Magenta));
        assert_eq!(snap.color_at(0, 19), None);
        assert!(snap.next.is_some());
        assert_eq!(snap.level_tenths, 10);
        assert!(snap.playable());
    }
}
