//! Game state module - the falling-piece controller
//!
//! Ties the grid, piece supply, move log and scoring together. The session is
//! advanced by a fixed-timestep driver calling [`GameState::tick`]; intents
//! queued since the last tick are applied first, in arrival order, then
//! gravity and the lock step run.
//!
//! Per tick:
//! 1. paused: only `PauseToggle` is processed, timers stand still
//! 2. intents: rejected moves are no-ops
//! 3. gravity: once the drop timer exceeds the drop period the piece falls a row
//! 4. rest: the lock timer runs while the piece rests; when it exceeds the lock
//!    delay the piece either ends the game (resting on row 0) or is locked,
//!    scored, and replaced by the next piece

use arrayvec::ArrayVec;

use crate::config::SessionConfig;
use crate::error::CoreError;
use crate::grid::Grid;
use crate::pieces::Piece;
use crate::replay::{spawn_column, Move, MoveLog, ReplayRecord};
use crate::rng::PieceSupply;
use crate::scoring::{evaluate_and_highlight, Score};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::*;

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// The active piece moved or rotated
    pub moved: bool,
    /// Id of the piece locked this tick
    pub locked: Option<PieceId>,
    pub game_over: bool,
}

/// Last lock event (consumed by observers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub piece: PieceId,
    pub kind: PieceKind,
    /// Score right after the lock
    pub score: Score,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    config: SessionConfig,
    seed: u32,
    grid: Grid,
    supply: PieceSupply,
    active: Option<Piece>,
    pending: ArrayVec<Intent, MAX_INTENTS_PER_TICK>,
    move_log: MoveLog,
    score: Score,
    last_event: Option<LockEvent>,
    drop_timer_ms: u32,
    lock_timer_ms: u32,
    soft_drop: bool,
    hard_dropped: bool,
    started: bool,
    paused: bool,
    game_over: bool,
}

impl GameState {
    /// Create a session; fails on invalid configuration
    pub fn new(config: SessionConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let seed = config.resolved_seed();
        let grid = Grid::new(config.width, config.height)?;

        Ok(Self {
            config,
            seed,
            grid,
            supply: PieceSupply::new(seed),
            active: None,
            pending: ArrayVec::new(),
            move_log: MoveLog::new(),
            score: Score::default(),
            last_event: None,
            drop_timer_ms: 0,
            lock_timer_ms: 0,
            soft_drop: false,
            hard_dropped: false,
            started: false,
            paused: false,
            game_over: false,
        })
    }

    /// Start the session and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// Started, not paused, not over
    pub fn running(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Seed actually in use (the random one if none was configured)
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn total_score(&self) -> u32 {
        self.score.total()
    }

    /// Preview of the piece that spawns next
    pub fn next_kind(&self) -> PieceKind {
        self.supply.peek()
    }

    /// Whole move log, the active piece's entry included
    pub fn move_log(&self) -> &[String] {
        self.move_log.entries()
    }

    /// Move-log entries of the locked pieces
    pub fn locked_entries(&self) -> &[String] {
        self.move_log.locked_entries()
    }

    pub fn drop_period_ms(&self) -> u32 {
        if self.soft_drop {
            self.config.soft_drop_period_ms
        } else {
            self.config.drop_period_ms
        }
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            pieces: self
                .grid
                .pieces()
                .iter()
                .enumerate()
                .map(|(slot, p)| PieceSnapshot::locked(p, self.grid.is_highlighted(slot)))
                .collect(),
            active: self.active.as_ref().map(PieceSnapshot::active),
            score: self.score,
            total_score: self.score.total(),
            running: self.running(),
            paused: self.paused,
            game_over: self.game_over,
            next: self.supply.peek(),
            seed: self.seed,
        }
    }

    /// Record of the locked pieces, enough to rebuild the board
    pub fn replay_record(&self) -> ReplayRecord {
        ReplayRecord {
            width: self.grid.width(),
            height: self.grid.height(),
            seed: Some(self.seed),
            moves: self.locked_entries().to_vec(),
            score: self.score,
        }
    }

    /// Spawn the next piece, centered on row 0
    fn spawn_piece(&mut self) -> bool {
        let mut piece = self.supply.next();
        piece.shift(spawn_column(self.grid.width()), 0);

        if self.grid.collides(&piece.occupied_cells()) {
            self.game_over = true;
            self.active = None;
            return false;
        }

        self.move_log.begin(piece.kind());
        self.active = Some(piece);
        self.drop_timer_ms = 0;
        self.lock_timer_ms = 0;
        self.hard_dropped = false;
        true
    }

    /// Queue an intent for the next tick; false if the buffer is full
    pub fn queue_intent(&mut self, intent: Intent) -> bool {
        self.pending.try_push(intent).is_ok()
    }

    /// Apply an intent right away; returns whether it had an effect
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        if !self.started || self.game_over {
            return false;
        }
        if intent == Intent::PauseToggle {
            self.paused = !self.paused;
            return true;
        }
        if self.paused {
            return false;
        }

        match intent {
            Intent::MoveLeft => self.try_shift(-1, 0, Move::Left),
            Intent::MoveRight => self.try_shift(1, 0, Move::Right),
            Intent::SoftDropOn => {
                self.soft_drop = true;
                true
            }
            Intent::SoftDropOff => {
                self.soft_drop = false;
                true
            }
            Intent::Rotate => self.try_rotate(),
            Intent::HardDrop => self.hard_drop(),
            Intent::PauseToggle => false,
        }
    }

    /// Shift the active piece if the target cells are free and on the board
    fn try_shift(&mut self, dx: i32, dy: i32, mv: Move) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if self.grid.collides(&piece.cells_shifted(dx, dy)) {
            return false;
        }
        piece.shift(dx, dy);
        self.move_log.push(mv);
        if mv != Move::Down {
            self.hard_dropped = false;
        }
        true
    }

    /// Rotate unless a locked piece touches the active one or the turned
    /// shape lands on locked cells, then pull the piece back inside the right
    /// and bottom edges. The pulled position is not re-checked.
    fn try_rotate(&mut self) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if self.grid.contacts_neighbor(piece) {
            return false;
        }
        let mut turned = *piece;
        turned.rotate();
        if self.grid.overlaps_locked(&turned.occupied_cells()) {
            return false;
        }
        Move::Rotate.apply(piece, self.grid.width(), self.grid.height());
        self.move_log.push(Move::Rotate);
        self.hard_dropped = false;
        true
    }

    /// Step down until resting; the lock follows in the same tick
    fn hard_drop(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        while self.try_shift(0, 1, Move::Down) {}
        self.hard_dropped = true;
        true
    }

    fn is_resting(&self) -> bool {
        self.active.as_ref().is_some_and(|p| self.grid.rests(p))
    }

    /// Main tick: apply queued intents, then gravity and the lock step
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<TickOutcome, CoreError> {
        let pending = std::mem::take(&mut self.pending);
        self.step(elapsed_ms, &pending)
    }

    /// Tick by the configured `tick_ms` with an explicit intent batch
    pub fn advance(&mut self, intents: &[Intent]) -> Result<TickOutcome, CoreError> {
        self.step(self.config.tick_ms, intents)
    }

    /// Tick with an explicit intent batch instead of the queue
    pub fn step(&mut self, elapsed_ms: u32, intents: &[Intent]) -> Result<TickOutcome, CoreError> {
        let mut outcome = TickOutcome::default();
        if !self.started || self.game_over {
            outcome.game_over = self.game_over;
            return Ok(outcome);
        }

        for &intent in intents {
            let applied = self.apply_intent(intent);
            if applied
                && matches!(
                    intent,
                    Intent::MoveLeft | Intent::MoveRight | Intent::Rotate | Intent::HardDrop
                )
            {
                outcome.moved = true;
            }
        }

        if self.paused || self.active.is_none() {
            outcome.game_over = self.game_over;
            return Ok(outcome);
        }

        // Gravity
        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms > self.drop_period_ms() && !self.is_resting() {
            if self.try_shift(0, 1, Move::Down) {
                outcome.moved = true;
            }
            self.drop_timer_ms = 0;
        }

        // Rest and lock
        if self.is_resting() {
            self.lock_timer_ms = self.lock_timer_ms.saturating_add(elapsed_ms);
            if self.hard_dropped || self.lock_timer_ms > self.config.lock_delay_ms {
                outcome.locked = self.lock_active()?;
            }
        } else {
            self.lock_timer_ms = 0;
            self.hard_dropped = false;
        }

        outcome.game_over = self.game_over;
        Ok(outcome)
    }

    /// Lock the resting piece, rescore and spawn the next one
    ///
    /// A piece resting on row 0 ends the game instead and stays visible as
    /// the active piece.
    fn lock_active(&mut self) -> Result<Option<PieceId>, CoreError> {
        let Some(piece) = self.active else {
            return Ok(None);
        };

        if piece.topmost_y() == 0 {
            self.game_over = true;
            return Ok(None);
        }

        self.active = None;
        if let Err(e) = self.grid.add(piece) {
            self.game_over = true;
            return Err(e.into());
        }
        self.move_log.close();

        self.score = evaluate_and_highlight(&mut self.grid);
        self.last_event = Some(LockEvent {
            piece: piece.id(),
            kind: piece.kind(),
            score: self.score,
        });

        self.spawn_piece();
        Ok(Some(piece.id()))
    }
}
