//! Session controller
//!
//! Owns everything one embedded game needs between display refreshes: the
//! simulation state, the fixed-step clock, held input, the weekly high score
//! and the persisted preferences. Platform code forwards events and refresh
//! callbacks here and draws whatever [`Game::scene`] returns.

use chrono::{DateTime, TimeZone};

use crate::clock::FrameClock;
use crate::highscores::HighScores;
use crate::i18n::{Language, Translations};
use crate::platform::{InputEvent, InputState, Key, KeyValueStore, PointerTarget};
use crate::renderer::assets::AssetCache;
use crate::renderer::scene::{DrawCmd, SceneView, build_scene};
use crate::settings::Settings;
use crate::sim::{
    GameEvent, GameMode, GameState, TickInput, apply_jump_impulse, charge_power, fire_projectile,
    tick,
};

pub struct Game<S: KeyValueStore> {
    state: GameState,
    clock: FrameClock,
    input: InputState,
    high_scores: HighScores,
    settings: Settings,
    text: Translations,
    store: S,
}

impl<S: KeyValueStore> Game<S> {
    /// Create an idle session, loading preferences and the weekly high score
    pub fn new<Tz: TimeZone>(mut store: S, seed: u64, now: &DateTime<Tz>) -> Self {
        let settings = Settings::load(&store);
        let high_scores = HighScores::load(&mut store, now);
        let mode = settings.effective_mode();
        log::info!(
            "Session created (mode {}, seed {seed}, best {})",
            mode.as_str(),
            high_scores.best()
        );

        Self {
            state: GameState::new(mode, seed, high_scores.best()),
            clock: FrameClock::default(),
            input: InputState::new(),
            high_scores,
            text: Translations::new(settings.language),
            settings,
            store,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn high_score(&self) -> u64 {
        self.high_scores.best()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply one input event. Returns true if it started, jumped, charged or
    /// fired, so the host can suppress the browser default.
    pub fn handle_input(&mut self, event: InputEvent, now_ms: f64) -> bool {
        let mode = self.state.mode;
        match event {
            InputEvent::KeyDown(key) => {
                if !self.input.press(key) {
                    // Auto-repeat
                    return false;
                }
                if !self.state.is_running() {
                    return self.try_start(Some(key), now_ms);
                }

                let mut handled = false;
                if key.is_jump(mode) {
                    handled |= apply_jump_impulse(&mut self.state);
                }
                if key.is_charge(mode) {
                    handled |= self.input.begin_charge(now_ms);
                }
                handled
            }
            InputEvent::KeyUp(key) => {
                self.input.release(key);
                key.is_charge(mode) && self.release_charge(now_ms)
            }
            InputEvent::PointerDown(PointerTarget::Playfield) => {
                if self.state.is_running() {
                    apply_jump_impulse(&mut self.state)
                } else {
                    self.try_start(None, now_ms)
                }
            }
            InputEvent::PointerDown(PointerTarget::FireButton) => {
                mode == GameMode::Advanced
                    && self.state.is_running()
                    && self.input.begin_charge(now_ms)
            }
            InputEvent::PointerUp(PointerTarget::FireButton) => self.release_charge(now_ms),
            InputEvent::PointerUp(PointerTarget::Playfield) => false,
        }
    }

    /// Feed a display-refresh timestamp. Returns true when a step ran and
    /// the frame should be redrawn.
    pub fn frame(&mut self, timestamp_ms: f64, now_ms: f64) -> bool {
        if !self.clock.advance(timestamp_ms) {
            return false;
        }

        let input = TickInput {
            horizontal: self.input.horizontal(),
        };
        tick(&mut self.state, &input, now_ms);

        for event in self.state.drain_events() {
            self.on_event(event, now_ms);
        }
        true
    }

    /// Switch rule set; a switch always starts a fresh run
    pub fn set_mode(&mut self, mode: GameMode, now_ms: f64) {
        self.settings.mode = mode;
        self.persist_settings();
        self.state.mode = self.settings.effective_mode();
        self.restart(now_ms);
    }

    pub fn set_language(&mut self, language: Language) {
        self.settings.language = language;
        self.text = Translations::new(language);
        self.persist_settings();
    }

    /// Touch layouts play classic; a forced mode change drops back to idle
    pub fn set_touch_layout(&mut self, touch_layout: bool) {
        if self.settings.touch_layout == touch_layout {
            return;
        }
        self.settings.touch_layout = touch_layout;
        self.persist_settings();

        let mode = self.settings.effective_mode();
        if mode != self.state.mode {
            self.state.mode = mode;
            self.state.reset_to_idle();
            self.input.clear();
        }
    }

    /// Tear the session down to the idle screen
    pub fn stop(&mut self) {
        self.clock.reset();
        self.input.clear();
        self.state.reset_to_idle();
        log::info!("Session stopped");
    }

    /// Charge meter fill, 0-100
    pub fn charge_percent(&self, now_ms: f64) -> f32 {
        self.input.charge_percent(now_ms)
    }

    /// Draw list for the current state
    pub fn scene(&self, assets: &AssetCache, now_ms: f64) -> Vec<DrawCmd> {
        build_scene(&SceneView {
            state: &self.state,
            assets,
            text: &self.text,
            charge_percent: self.charge_percent(now_ms),
            touch_layout: self.settings.touch_layout,
            now_ms,
        })
    }

    fn try_start(&mut self, key: Option<Key>, now_ms: f64) -> bool {
        if !self.state.can_restart(now_ms) {
            return false;
        }
        self.restart(now_ms);
        // Keep the trigger held so its auto-repeat does not act in the new run
        if let Some(key) = key {
            self.input.press(key);
        }
        true
    }

    fn restart(&mut self, now_ms: f64) {
        self.state.start();
        self.input.clear();
        log::info!("Run started ({}) at {now_ms:.0}", self.state.mode.as_str());
    }

    fn release_charge(&mut self, now_ms: f64) -> bool {
        match self.input.release_charge(now_ms) {
            Some(held_ms) => fire_projectile(&mut self.state, charge_power(held_ms), now_ms),
            None => false,
        }
    }

    fn on_event(&mut self, event: GameEvent, now_ms: f64) {
        match event {
            GameEvent::GameOver {
                cause,
                score,
                new_record,
            } => {
                log::info!("Game over ({cause:?}) with score {score}");
                if new_record && self.high_scores.record(score, now_ms as i64) {
                    log::info!("New high score: {score}");
                    if let Err(e) = self.high_scores.save(&mut self.store) {
                        log::warn!("Failed to persist high score: {e}");
                    }
                }
            }
            GameEvent::ObstacleDestroyed => log::debug!("Obstacle destroyed"),
            GameEvent::ObstacleSpawned { .. } | GameEvent::ProjectileHit { .. } => {}
        }
    }

    fn persist_settings(&mut self) {
        if let Err(e) = self.settings.save(&mut self.store) {
            log::warn!("Failed to persist settings: {e}");
        }
    }
}
