//! Core simulation module - pure, deterministic, and testable
//!
//! This crate contains the board simulation and the graph-scoring engine. It
//! performs no I/O, so it runs the same under a terminal front end, a test, or
//! a headless batch runner:
//!
//! - **Deterministic**: same seed and same intents produce the same board
//! - **Testable**: every rule has unit tests next to it
//! - **Replayable**: the move log rebuilds the board exactly
//!
//! # Module Structure
//!
//! - [`pieces`]: tetromino shape tables and the piece value type
//! - [`grid`]: occupancy grid with collision queries and a text rendering
//! - [`game_state`]: falling-piece controller (movement, gravity, locking)
//! - [`rng`]: seeded bag randomizer
//! - [`graph`]: touch graphs and connected components
//! - [`scoring`]: full rows, longest road, L-J communities, T community
//! - [`replay`]: move logs, board reconstruction and score ranking
//! - [`config`]: session parameters
//! - [`error`]: error types
//!
//! # Scoring
//!
//! Row clears do not remove anything; the score is read off the final shape
//! of the pile:
//!
//! - **Full rows** (x3): rows with every column taken
//! - **Longest road** (x1): widest bounding-box span of touching I pieces
//! - **L-J communities** (x4): touching groups containing both L and J
//! - **T community** (x6): size of the largest touching group of Ts
//!
//! # Example
//!
//! ```
//! use citytetris_core::{GameState, SessionConfig};
//! use citytetris_types::Intent;
//!
//! let mut game = GameState::new(SessionConfig::default().seed(12345)).unwrap();
//! game.start();
//!
//! let outcome = game.step(15, &[Intent::MoveLeft, Intent::HardDrop]).unwrap();
//! assert!(outcome.locked.is_some());
//! assert_eq!(game.grid().len(), 1);
//!
//! // The move log rebuilds the same board.
//! let rebuilt = game.replay_record().rebuild().unwrap();
//! assert_eq!(&rebuilt, game.grid());
//! ```
//!
//! # Timing
//!
//! The session uses a fixed timestep:
//! - **Tick**: 15ms
//! - **Gravity**: one row once more than 50ms have passed (15ms on soft drop)
//! - **Lock Delay**: a resting piece locks after more than 150ms
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every tick with the
//! elapsed time.

pub mod config;
pub mod error;
pub mod game_state;
pub mod graph;
pub mod grid;
pub mod pieces;
pub mod replay;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use citytetris_types as types;

// Re-export commonly used types for convenience
pub use config::{BoardSize, SessionConfig};
pub use error::{ConfigError, CoreError, PlacementError, ReplayError};
pub use game_state::{GameState, LockEvent, TickOutcome};
pub use graph::PieceGraph;
pub use grid::Grid;
pub use pieces::{get_shape, Piece};
pub use replay::{build_grid, top_scores, Move, MoveLog, Placement, ReplayRecord};
pub use rng::{PieceSupply, SimpleRng};
pub use scoring::{evaluate, Evaluation, Score};
pub use snapshot::{GameSnapshot, PieceSnapshot};
