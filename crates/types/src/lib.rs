//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the game core, the terminal front end and the event log alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn position**: (4, 0), top-centre
//!
//! # Timing and Difficulty
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_TICK_MS` | 300 | Advance interval at level 1.0 |
//! | `LINE_ANIMATION_MS` | 100 | Interval between line-clear flash steps |
//! | `LEVEL_UP_COUNTDOWN` | 10 | Locked pieces per level increase |
//! | `INITIAL_LEVEL_TENTHS` | 10 | Starting speed/score multiplier (1.0) |
//! | `LEVEL_STEP_TENTHS` | 1 | Multiplier increase per level-up (0.1) |
//!
//! Levels are counted in tenths so that the multiplier stays exact. The
//! advance interval is always `INITIAL_TICK_MS / level`.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.color(), Color::Magenta);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Largest row or column count of any piece pattern.
pub const MAX_PIECE_SIZE: usize = 4;

/// Advance (gravity) interval at the initial level.
pub const INITIAL_TICK_MS: u64 = 300;

/// Interval between two line-clear animation steps.
pub const LINE_ANIMATION_MS: u64 = 100;

/// Number of locked pieces between two level increases.
pub const LEVEL_UP_COUNTDOWN: u32 = 10;

/// Starting difficulty multiplier, in tenths (1.0).
pub const INITIAL_LEVEL_TENTHS: u32 = 10;

/// Difficulty multiplier increase per level-up, in tenths (0.1).
pub const LEVEL_STEP_TENTHS: u32 = 1;

/// Number of recent kinds the supply refuses to repeat.
pub const SUPPLY_HISTORY_LEN: usize = 4;

/// Re-draws attempted before the supply accepts a repeated kind.
pub const SUPPLY_MAX_RETRIES: u32 = 6;

/// Line clear scoring table
///
/// Base points for clearing N rows at once (before the level multiplier):
/// - 1 row: 100
/// - 2 rows: 300
/// - 3 rows: 500
/// - 4 rows: 800
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points for every gravity step the falling piece survives.
pub const FALL_POINTS: u32 = 1;

/// Points for every cell descended during a hard drop.
pub const HARD_DROP_POINTS: u32 = 2;


/// The seven piece kinds
///
/// The discriminant order is the draw order of the supply (index 0..7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    L,
    J,
    T,
    Z,
    S,
    O,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 7;

    /// All kinds in draw-index order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::O,
    ];

    /// Kind for a draw index in `0..COUNT`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            "o" => Some(PieceKind::O),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::T => "t",
            PieceKind::Z => "z",
            PieceKind::S => "s",
            PieceKind::O => "o",
        }
    }

    /// Fixed colour of the kind.
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Teal,
            PieceKind::L => Color::Orange,
            PieceKind::J => Color::Green,
            PieceKind::T => Color::Magenta,
            PieceKind::Z => Color::Purple,
            PieceKind::S => Color::Pink,
            PieceKind::O => Color::Blue,
        }
    }
}

/// Colour tags stored in board cells
///
/// The core only ever deals in these tags; mapping a tag to an actual terminal
/// colour is the renderer's job. `Beige` is reserved for the line-clear flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Blue,
    Green,
    Orange,
    Pink,
    Teal,
    Purple,
    Magenta,
    Beige,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Blue,
        Color::Green,
        Color::Orange,
        Color::Pink,
        Color::Teal,
        Color::Purple,
        Color::Magenta,
        Color::Beige,
    ];

    /// Compact non-zero code (0 is reserved for an empty cell).
    pub fn as_u8(&self) -> u8 {
        match self {
            Color::Blue => 1,
            Color::Green => 2,
            Color::Orange => 3,
            Color::Pink => 4,
            Color::Teal => 5,
            Color::Purple => 6,
            Color::Magenta => 7,
            Color::Beige => 8,
        }
    }

    /// Inverse of [`Color::as_u8`]; `0` and unknown codes map to `None`.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(Color::Blue),
            2 => Some(Color::Green),
            3 => Some(Color::Orange),
            4 => Some(Color::Pink),
            5 => Some(Color::Teal),
            6 => Some(Color::Purple),
            7 => Some(Color::Magenta),
            8 => Some(Color::Beige),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Orange => "orange",
            Color::Pink => "pink",
            Color::Teal => "teal",
            Color::Purple => "purple",
            Color::Magenta => "magenta",
            Color::Beige => "beige",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Occupied cell with its colour
pub type Cell = Option<Color>;

/// Player actions consumed by the game core
///
/// Produced by the input mapping layer; the core never sees physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° counter-clockwise
    RotateLeft,
    /// Rotate piece 90° clockwise
    RotateRight,
    /// Drop piece as far as it goes
    HardDrop,
    /// Pause or resume
    TogglePause,
    /// End the session immediately
    Quit,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateright"), Some(GameAction::RotateRight));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotateleft" => Some(GameAction::RotateLeft),
            "rotateright" => Some(GameAction::RotateRight),
            "harddrop" => Some(GameAction::HardDrop),
            "togglepause" => Some(GameAction::TogglePause),
            "quit" => Some(GameAction::Quit),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateLeft => "rotateLeft",
            GameAction::RotateRight => "rotateRight",
            GameAction::HardDrop => "hardDrop",
            GameAction::TogglePause => "togglePause",
            GameAction::Quit => "quit",
        }
    }
}

/// Hard-drop grace state of the current piece
///
/// - **Initiated**: a hard drop just happened; the next advance is skipped.
/// - **InProgress**: the grace advance was consumed; the next advance locks.
/// - **Finished**: no hard drop pending (reset on every lock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropHold {
    Initiated,
    InProgress,
    #[default]
    Finished,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// The player asked to quit.
    Quit,
    /// A newly promoted piece overlapped locked cells.
    BlockOut,
    /// A piece locked with its top edge on the first row.
    LockOut,
}

impl EndReason {
    pub fn is_loss(&self) -> bool {
        !matches!(self, EndReason::Quit)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::Quit => "quit",
            EndReason::BlockOut => "blockOut",
            EndReason::LockOut => "lockOut",
        }
    }
}

/// Core-side record of something that happened during a transition.
///
/// Queued by the game state and drained by observers (event log, tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreEvent {
    Spawned { kind: PieceKind },
    Locked { kind: PieceKind, row: u8 },
    LinesCompleted { count: u8 },
    LinesCleared { count: u8, points: u32 },
    /// `level_tenths` is the multiplier times ten (1.3 -> 13).
    LevelUp { level_tenths: u32, tick_ms: u64 },
    /// The supply ran out of retries and accepted a recent kind.
    SupplyFallback { kind: PieceKind },
    Paused,
    Resumed,
    Ended { reason: EndReason },
}

impl CoreEvent {
    pub fn name(&self) -> &'static str {
        match self {
            CoreEvent::Spawned { .. } => "spawned",
            CoreEvent::Locked { .. } => "locked",
            CoreEvent::LinesCompleted { .. } => "linesCompleted",
            CoreEvent::LinesCleared { .. } => "linesCleared",
            CoreEvent::LevelUp { .. } => "levelUp",
            CoreEvent::SupplyFallback { .. } => "supplyFallback",
            CoreEvent::Paused => "paused",
            CoreEvent::Resumed => "resumed",
            CoreEvent::Ended { .. } => "ended",
        }
    }
}
