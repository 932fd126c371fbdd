//! Player integration: gravity, jumps and insane-mode lateral movement

use super::state::{GameState, Player};
use crate::consts::*;

/// Held directions for one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HorizontalInput {
    pub left: bool,
    pub right: bool,
}

/// Integrate one step of gravity and clamp to the ground.
///
/// The clamp is the only landing detection: while grounded it leaves the
/// player untouched, so calling it every step is safe.
pub fn apply_gravity(player: &mut Player) {
    player.vy += GRAVITY;
    player.pos.y += player.vy;

    let ground = Player::ground_top();
    if player.pos.y > ground {
        player.pos.y = ground;
        player.vy = 0.0;
        player.jumping = false;
    }
}

/// Launch a jump. Returns false when one is already in progress or the run is not live.
pub fn apply_jump_impulse(state: &mut GameState) -> bool {
    if state.player.jumping || !state.is_running() {
        return false;
    }
    state.player.vy = -JUMP_FORCE;
    state.player.jumping = true;
    true
}

/// Apply drag and held directions.
///
/// Returns true when the player has been pushed completely off the left edge.
/// Basic mode pins the player to its start column and never loses this way.
pub fn apply_horizontal_input(state: &mut GameState, input: HorizontalInput) -> bool {
    let drag_enabled = state.tuning().drag_enabled;
    let frame = state.frame;
    let player = &mut state.player;

    if !drag_enabled {
        player.pos.x = PLAYER_START_X;
        player.drag = 0.0;
        return false;
    }

    // Drag grows with survival time
    player.drag = INITIAL_DRAG + frame as f32 * DRAG_INCREMENT;
    player.pos.x -= player.drag;

    if input.left {
        player.pos.x -= HORIZONTAL_SPEED;
    }
    if input.right {
        player.pos.x = (player.pos.x + HORIZONTAL_SPEED).min(CANVAS_WIDTH - PLAYER_WIDTH);
    }

    player.pos.x <= -PLAYER_WIDTH
}
