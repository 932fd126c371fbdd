//! Whole-session flows through the public controller API

use chrono::{TimeZone, Utc};

use shovel_run::highscores::HighScores;
use shovel_run::platform::{InputEvent, Key, KeyValueStore, MemoryStore, PointerTarget};
use shovel_run::renderer::{AssetCache, DrawCmd};
use shovel_run::sim::autopilot::should_jump;
use shovel_run::{Game, GameMode};

const REFRESH_MS: f64 = 17.0;

/// Play classic with the autopilot until the first loss; returns the game and the end time
fn play_until_game_over(store: MemoryStore, seed: u64) -> (Game<MemoryStore>, f64) {
    let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
    let base_ms = now.timestamp_millis() as f64;
    let mut game = Game::new(store, seed, &now);
    game.handle_input(InputEvent::PointerDown(PointerTarget::Playfield), base_ms);

    let mut t = 0.0;
    while !game.state().is_over() && t < 3_000_000.0 {
        // Stop jumping after a while so the run ends
        if t < 20_000.0 && should_jump(game.state()) {
            game.handle_input(InputEvent::KeyDown(Key::ArrowUp), base_ms + t);
            game.handle_input(InputEvent::KeyUp(Key::ArrowUp), base_ms + t);
        }
        game.frame(t, base_ms + t);
        t += REFRESH_MS;
    }
    (game, base_ms + t)
}

#[test]
fn record_survives_reload_until_weekly_reset() {
    let (game, _) = play_until_game_over(MemoryStore::new(), 99);
    assert!(game.state().is_over());
    let score = game.state().score;
    assert!(score > 0);
    assert!(game.state().new_record);
    assert_eq!(game.high_score(), score);

    let store = game.store().clone();
    assert_eq!(store.get(HighScores::SCORE_KEY), Some(score.to_string()));

    // Reload on Thursday: same week
    let thursday = Utc.with_ymd_and_hms(2026, 10, 22, 20, 0, 0).unwrap();
    let reloaded = Game::new(store.clone(), 1, &thursday);
    assert_eq!(reloaded.high_score(), score);

    // Reload after Friday 23:59: expired and cleared
    let saturday = Utc.with_ymd_and_hms(2026, 10, 24, 8, 0, 0).unwrap();
    let expired = Game::new(store, 1, &saturday);
    assert_eq!(expired.high_score(), 0);
    assert!(expired.store().get(HighScores::SCORE_KEY).is_none());
    assert!(expired.store().get(HighScores::TIME_KEY).is_none());
}

#[test]
fn game_over_is_reported_once_and_frozen() {
    let (mut game, end_ms) = play_until_game_over(MemoryStore::new(), 5);
    let score = game.state().score;
    let frame = game.state().frame;

    let mut t = 3_000_000.0;
    for _ in 0..120 {
        game.frame(t, end_ms);
        t += REFRESH_MS;
    }
    assert_eq!(game.state().score, score);
    assert_eq!(game.state().frame, frame);
}

#[test]
fn mode_switch_then_restart_keeps_best() {
    let (mut game, end_ms) = play_until_game_over(MemoryStore::new(), 12);
    let best = game.high_score();

    game.set_mode(GameMode::Advanced, end_ms);
    assert!(game.state().is_running());
    assert_eq!(game.state().high_score, best);
    assert_eq!(game.state().score, 0);
}

#[test]
fn idle_scene_shows_start_prompt_and_fallbacks() {
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
    let game = Game::new(MemoryStore::new(), 3, &now);
    let cmds = game.scene(&AssetCache::new(), 0.0);

    assert!(matches!(cmds.first(), Some(DrawCmd::Clear)));
    assert!(cmds.iter().any(|c| matches!(c, DrawCmd::RoundRect { .. })));
    // Default language is Spanish
    assert!(cmds.iter().any(|c| matches!(c,
        DrawCmd::Text { text, .. } if text == "PRESIONA ESPACIO PARA EMPEZAR")));
}
