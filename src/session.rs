//! Session driver
//!
//! Glues the pure simulation to a fixed-step clock and a high score store.
//! Presentation code talks only to this type: it feeds pointer positions and
//! frame deltas in, and reads score / game-over / high score back out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::persistence::HighScoreStore;
use crate::platform::FixedStep;
use crate::sim::{Difficulty, GameState, TickInput, TickOutcome, autopilot_target, tick};

/// Summary of one rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameReport {
    /// Simulation ticks run this frame
    pub ticks_run: u32,
    pub score: u64,
    pub high_score: u64,
    pub game_over: bool,
    /// The session that just ended set a new best
    pub new_high_score: bool,
}

pub struct Session<S: HighScoreStore> {
    state: GameState,
    clock: FixedStep,
    store: S,
    input: TickInput,
    /// Best score known to be in the store
    stored_best: u64,
    new_high_score: bool,
    paused: bool,
    autopilot: bool,
}

impl<S: HighScoreStore> Session<S> {
    /// Start a session; `fallback_seed` is used when the config has none
    pub fn new(config: &GameConfig, fallback_seed: u64, store: S) -> Self {
        let seed = config.seed.unwrap_or(fallback_seed);
        let mut state = GameState::new(seed, config.playfield, config.difficulty);

        let stored_best = match store.load() {
            Ok(best) => best.unwrap_or(0),
            Err(e) => {
                log::warn!("High score unavailable, starting from 0: {}", e);
                0
            }
        };
        state.high_score = stored_best;

        log::info!(
            "Session started: difficulty {}, seed {}, high score {}",
            config.difficulty.as_str(),
            seed,
            stored_best
        );

        Self {
            state,
            clock: FixedStep::default(),
            store,
            input: TickInput::default(),
            stored_best,
            new_high_score: false,
            paused: false,
            autopilot: config.autopilot,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for scripted setups (tests, debug tooling)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    /// Latest pointer position in playfield coordinates; last writer wins
    pub fn set_target(&mut self, x: f32, y: f32) {
        self.input.target = Some(Vec2::new(x, y));
    }

    /// Takes effect from the next tick
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if difficulty != self.state.difficulty {
            log::info!("Difficulty set to {}", difficulty.as_str());
            self.state.set_difficulty(difficulty);
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused && !paused {
            // Don't replay the time spent paused
            self.clock.reset();
        }
        self.paused = paused;
    }

    /// Run one tick immediately, bypassing the clock
    pub fn step(&mut self) -> TickOutcome {
        if self.autopilot {
            self.input.target = Some(autopilot_target(&self.state));
        }
        let outcome = tick(&mut self.state, &self.input);
        if outcome.collided_with.is_some() {
            self.persist_high_score();
        }
        outcome
    }

    /// Advance by a render-frame delta (seconds)
    pub fn frame(&mut self, dt: f64) -> FrameReport {
        let mut ticks_run = 0;
        if !self.paused && !self.state.game_over {
            let ticks = self.clock.advance(dt);
            for _ in 0..ticks {
                self.step();
                ticks_run += 1;
                if self.state.game_over {
                    break;
                }
            }
        }
        FrameReport {
            ticks_run,
            ..self.report()
        }
    }

    pub fn report(&self) -> FrameReport {
        FrameReport {
            ticks_run: 0,
            score: self.state.score,
            high_score: self.state.high_score,
            game_over: self.state.game_over,
            new_high_score: self.new_high_score,
        }
    }

    /// Reset the session between ticks; tier and high score are kept
    pub fn restart(&mut self) {
        self.state.restart();
        self.clock.reset();
        self.input = TickInput::default();
        self.new_high_score = false;
        log::info!("Restarted ({})", self.state.difficulty.as_str());
    }

    fn persist_high_score(&mut self) {
        if self.state.high_score <= self.stored_best {
            return;
        }
        log::info!(
            "New high score {} (was {})",
            self.state.high_score,
            self.stored_best
        );
        self.new_high_score = true;
        self.stored_best = self.state.high_score;
        if let Err(e) = self.store.save(self.state.high_score) {
            log::warn!("Could not save high score: {}", e);
        }
    }
}
