//! Frame draw list
//!
//! Turns the game state into a flat list of 2D draw commands. Kept free of
//! browser types so the layout (and every image fallback) can be tested
//! natively; the canvas backend only executes the list.

use glam::Vec2;

use super::assets::{AssetCache, AssetId};
use crate::consts::*;
use crate::i18n::TextProvider;
use crate::sim::{GameMode, GamePhase, GameState};

/// RGBA, 0-1 per channel
pub type Color = [f32; 4];

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Colors for game elements
pub mod colors {
    use super::{rgb, Color};

    pub const GROUND: Color = rgb(0x55, 0x55, 0x55);
    pub const PLAYER: Color = rgb(0xff, 0xdb, 0xac);
    pub const OBSTACLE: Color = rgb(0x94, 0xa3, 0xb8);
    pub const PROJECTILE: Color = rgb(0x66, 0x66, 0x66);
    pub const HEALTH_BACK: Color = rgb(0xef, 0x44, 0x44);
    pub const HEALTH_FILL: Color = rgb(0x22, 0xc5, 0x5e);
    pub const CHARGE_BACK: Color = [0.0, 0.0, 0.0, 0.15];
    pub const CHARGE_FILL: Color = rgb(0xff, 0x4b, 0x4b);
    pub const TEXT: Color = rgb(0x33, 0x33, 0x33);
    pub const TEXT_ACCENT: Color = rgb(0x68, 0x66, 0xd6);
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const START_OVERLAY: Color = [0.0, 0.0, 0.0, 0.5];
    pub const RECORD_TINT: Color = [34.0 / 255.0, 197.0 / 255.0, 94.0 / 255.0, 0.2];
    pub const GAME_OVER_TINT: Color = [1.0, 0.0, 0.0, 0.2];
}

/// Overlay prompts are visible for 3s of every 4.5s
const BLINK_PERIOD_MS: f64 = 4500.0;
const BLINK_VISIBLE_MS: f64 = 3000.0;

const PLAYER_CORNER_RADIUS: f32 = 5.0;
const HEALTH_BAR_HEIGHT: f32 = 4.0;
const HEALTH_BAR_OFFSET: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Sub-rectangle of a source image, in image pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRect {
    pub origin: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Wipe the whole canvas
    Clear,
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Rect {
        pos: Vec2,
        size: Vec2,
        color: Color,
    },
    RoundRect {
        pos: Vec2,
        size: Vec2,
        radius: f32,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Only emitted for loaded images
    Image {
        asset: AssetId,
        crop: Option<SourceRect>,
        pos: Vec2,
        size: Vec2,
    },
    Text {
        text: String,
        pos: Vec2,
        size_px: f32,
        bold: bool,
        align: TextAlign,
        color: Color,
    },
}

/// Everything a frame's layout depends on
pub struct SceneView<'a, T: TextProvider + ?Sized> {
    pub state: &'a GameState,
    pub assets: &'a AssetCache,
    pub text: &'a T,
    /// Charge meter fill, 0-100
    pub charge_percent: f32,
    /// Touch prompts and larger text
    pub touch_layout: bool,
    /// Wall-clock ms, drives the blinking prompts
    pub now_ms: f64,
}

/// Whether blinking prompts are in their visible phase
pub fn blink_visible(now_ms: f64) -> bool {
    now_ms.rem_euclid(BLINK_PERIOD_MS) < BLINK_VISIBLE_MS
}

/// Zero-padded five digit score
pub fn format_score(score: u64) -> String {
    format!("{score:05}")
}

pub fn build_scene<T: TextProvider + ?Sized>(view: &SceneView<'_, T>) -> Vec<DrawCmd> {
    let state = view.state;
    let mut cmds = Vec::with_capacity(8 + state.obstacles.len() * 3 + state.projectiles.len());

    cmds.push(DrawCmd::Clear);
    cmds.push(DrawCmd::Line {
        from: Vec2::new(0.0, GROUND_Y),
        to: Vec2::new(CANVAS_WIDTH, GROUND_Y),
        width: 2.0,
        color: colors::GROUND,
    });

    push_player(&mut cmds, view);
    push_obstacles(&mut cmds, view);
    push_projectiles(&mut cmds, view);
    push_hud(&mut cmds, view);

    match state.phase {
        GamePhase::Idle => push_start_overlay(&mut cmds, view),
        GamePhase::GameOver => push_game_over_overlay(&mut cmds, view),
        GamePhase::Running => {}
    }

    cmds
}

fn push_player<T: TextProvider + ?Sized>(cmds: &mut Vec<DrawCmd>, view: &SceneView<'_, T>) {
    let pos = view.state.player.pos;
    let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
    if view.assets.is_loaded(AssetId::Player) {
        cmds.push(DrawCmd::Image {
            asset: AssetId::Player,
            crop: None,
            pos,
            size,
        });
    } else {
        cmds.push(DrawCmd::RoundRect {
            pos,
            size,
            radius: PLAYER_CORNER_RADIUS,
            color: colors::PLAYER,
        });
    }
}

fn push_obstacles<T: TextProvider + ?Sized>(cmds: &mut Vec<DrawCmd>, view: &SceneView<'_, T>) {
    let show_health = view.state.mode == GameMode::Advanced;

    for obs in &view.state.obstacles {
        let pos = Vec2::new(obs.x, obs.top());
        let size = Vec2::new(obs.width, obs.height);
        let asset = if obs.invincible {
            AssetId::Hazard
        } else {
            AssetId::Obstacle
        };

        match view.assets.natural_size(asset) {
            Some(natural) => {
                // Shovel art is padded; keep only its middle third
                let crop = (!obs.invincible).then(|| SourceRect {
                    origin: Vec2::new(natural.x / 3.0, 0.0),
                    size: Vec2::new(natural.x / 3.0, natural.y),
                });
                cmds.push(DrawCmd::Image {
                    asset,
                    crop,
                    pos,
                    size,
                });
            }
            None => cmds.push(DrawCmd::Rect {
                pos,
                size,
                color: colors::OBSTACLE,
            }),
        }

        if show_health && !obs.invincible {
            let bar_pos = Vec2::new(obs.x, pos.y - HEALTH_BAR_OFFSET);
            cmds.push(DrawCmd::Rect {
                pos: bar_pos,
                size: Vec2::new(obs.width, HEALTH_BAR_HEIGHT),
                color: colors::HEALTH_BACK,
            });
            cmds.push(DrawCmd::Rect {
                pos: bar_pos,
                size: Vec2::new(obs.width * obs.health_fraction(), HEALTH_BAR_HEIGHT),
                color: colors::HEALTH_FILL,
            });
        }
    }
}

fn push_projectiles<T: TextProvider + ?Sized>(cmds: &mut Vec<DrawCmd>, view: &SceneView<'_, T>) {
    let loaded = view.assets.is_loaded(AssetId::Projectile);
    for p in &view.state.projectiles {
        let size = p.size();
        if loaded {
            cmds.push(DrawCmd::Image {
                asset: AssetId::Projectile,
                crop: None,
                pos: p.pos,
                size: Vec2::splat(size),
            });
        } else {
            cmds.push(DrawCmd::Circle {
                center: p.pos + Vec2::splat(size / 2.0),
                radius: size / 2.0,
                color: colors::PROJECTILE,
            });
        }
    }
}

fn push_hud<T: TextProvider + ?Sized>(cmds: &mut Vec<DrawCmd>, view: &SceneView<'_, T>) {
    let state = view.state;
    let high_key = if view.touch_layout {
        "gameHighScoreMobile"
    } else {
        "gameHighScore"
    };

    cmds.push(DrawCmd::Text {
        text: format!("{} {}", view.text.text("gameScore"), format_score(state.score)),
        pos: Vec2::new(CANVAS_WIDTH - 10.0, 20.0),
        size_px: 14.0,
        bold: true,
        align: TextAlign::Right,
        color: colors::TEXT,
    });
    cmds.push(DrawCmd::Text {
        text: format!("{} {}", view.text.text(high_key), format_score(state.high_score)),
        pos: Vec2::new(CANVAS_WIDTH - 10.0, 38.0),
        size_px: 14.0,
        bold: true,
        align: TextAlign::Right,
        color: colors::TEXT_ACCENT,
    });

    if state.mode == GameMode::Advanced && view.charge_percent > 0.0 {
        let origin = Vec2::new(10.0, 10.0);
        let full = Vec2::new(100.0, 6.0);
        cmds.push(DrawCmd::Rect {
            pos: origin,
            size: full,
            color: colors::CHARGE_BACK,
        });
        cmds.push(DrawCmd::Rect {
            pos: origin,
            size: Vec2::new(full.x * view.charge_percent.clamp(0.0, 100.0) / 100.0, full.y),
            color: colors::CHARGE_FILL,
        });
    }
}

fn push_start_overlay<T: TextProvider + ?Sized>(cmds: &mut Vec<DrawCmd>, view: &SceneView<'_, T>) {
    cmds.push(DrawCmd::Rect {
        pos: Vec2::ZERO,
        size: Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        color: colors::START_OVERLAY,
    });

    if blink_visible(view.now_ms) {
        let (key, size_px) = if view.touch_layout {
            ("gameStartMobile", 28.0)
        } else {
            ("gameStart", 24.0)
        };
        cmds.push(DrawCmd::Text {
            text: view.text.text(key).to_string(),
            pos: Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0),
            size_px,
            bold: false,
            align: TextAlign::Center,
            color: colors::WHITE,
        });
    }
}

fn push_game_over_overlay<T: TextProvider + ?Sized>(
    cmds: &mut Vec<DrawCmd>,
    view: &SceneView<'_, T>,
) {
    let state = view.state;
    cmds.push(DrawCmd::Rect {
        pos: Vec2::ZERO,
        size: Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        color: if state.new_record {
            colors::RECORD_TINT
        } else {
            colors::GAME_OVER_TINT
        },
    });

    let title = if state.new_record {
        "gameNewHighScore"
    } else {
        "gameOver"
    };
    cmds.push(DrawCmd::Text {
        text: view.text.text(title).to_string(),
        pos: Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0 - 20.0),
        size_px: 30.0,
        bold: true,
        align: TextAlign::Center,
        color: colors::TEXT,
    });

    if state.can_restart(view.now_ms) && blink_visible(view.now_ms) {
        let (key, size_px) = if view.touch_layout {
            ("gameRestartMobile", 24.0)
        } else {
            ("gameRestart", 20.0)
        };
        cmds.push(DrawCmd::Text {
            text: view.text.text(key).to_string(),
            pos: Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0 + 20.0),
            size_px,
            bold: false,
            align: TextAlign::Center,
            color: colors::TEXT,
        });
    }
}
