//! Forgiving axis-aligned hitboxes
//!
//! Every collision test runs on boxes shrunk inside the visual sprite, so a
//! near miss that only grazes the artwork is not a loss.

use glam::Vec2;

use super::state::{Obstacle, Player, Projectile};
use crate::consts::{PLAYER_HEIGHT, PLAYER_WIDTH};

/// Axis-aligned rectangle in playfield coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub min: Vec2,
    pub size: Vec2,
}

/// Offsets from the sprite's top-left and shrink of its size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inset {
    pub offset: Vec2,
    pub shrink: Vec2,
}

pub const PLAYER_INSET: Inset = Inset {
    offset: Vec2::new(5.0, 5.0),
    shrink: Vec2::new(10.0, 10.0),
};

/// Destructible obstacles are mostly trimmed off the bottom
pub const OBSTACLE_INSET: Inset = Inset {
    offset: Vec2::new(10.0, 10.0),
    shrink: Vec2::new(20.0, 25.0),
};

/// Hazards get wider side margins
pub const HAZARD_INSET: Inset = Inset {
    offset: Vec2::new(15.0, 12.0),
    shrink: Vec2::new(30.0, 20.0),
};

impl Hitbox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Shrink a sprite rectangle by an inset
    pub fn inset(min: Vec2, size: Vec2, inset: Inset) -> Self {
        Self {
            min: min + inset.offset,
            size: size - inset.shrink,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test; boxes sharing only an edge do not collide
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

pub fn player_hitbox(player: &Player) -> Hitbox {
    Hitbox::inset(
        player.pos,
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        PLAYER_INSET,
    )
}

pub fn obstacle_hitbox(obstacle: &Obstacle) -> Hitbox {
    let inset = if obstacle.invincible {
        HAZARD_INSET
    } else {
        OBSTACLE_INSET
    };
    Hitbox::inset(
        Vec2::new(obstacle.x, obstacle.top()),
        Vec2::new(obstacle.width, obstacle.height),
        inset,
    )
}

/// Projectiles collide with their full square
pub fn projectile_hitbox(projectile: &Projectile) -> Hitbox {
    let size = projectile.size();
    Hitbox::new(projectile.pos.x, projectile.pos.y, size, size)
}

/// Resolve projectile hits against one obstacle.
///
/// Each projectile is consumed by its first hit; invincible obstacles absorb
/// the hit without damage. Returns the number of hits.
pub fn resolve_projectile_hits(
    obstacle: &mut Obstacle,
    projectiles: &mut Vec<Projectile>,
) -> usize {
    let target = obstacle_hitbox(obstacle);
    let before = projectiles.len();
    projectiles.retain(|p| {
        if projectile_hitbox(p).overlaps(&target) {
            obstacle.take_damage(p.power);
            false
        } else {
            true
        }
    });
    before - projectiles.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn ground_obstacle(x: f32, w: f32, h: f32) -> Obstacle {
        Obstacle::grounded(x, w, h, 1.0)
    }

    #[test]
    fn test_overlap_basic() {
        let a = Hitbox::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Hitbox::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Hitbox::new(20.0, 0.0, 10.0, 10.0)));
        // Shared edge only
        assert!(!a.overlaps(&Hitbox::new(10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_sprite_touch_is_not_a_hit() {
        let player = Player::default();
        // Sprite right edge at 90, obstacle sprite starts at 90
        let obstacle = ground_obstacle(PLAYER_START_X + PLAYER_WIDTH, 30.0, 30.0);
        assert!(!player_hitbox(&player).overlaps(&obstacle_hitbox(&obstacle)));
    }

    #[test]
    fn test_sprite_overlap_without_hitbox_overlap() {
        let player = Player::default();
        // Sprites overlap by 12px but the insets (5 + 10) keep hitboxes apart
        let obstacle = ground_obstacle(PLAYER_START_X + PLAYER_WIDTH - 12.0, 30.0, 30.0);
        assert!(!player_hitbox(&player).overlaps(&obstacle_hitbox(&obstacle)));

        let deeper = ground_obstacle(PLAYER_START_X + PLAYER_WIDTH - 16.0, 30.0, 30.0);
        assert!(player_hitbox(&player).overlaps(&obstacle_hitbox(&deeper)));
    }

    #[test]
    fn test_thin_obstacle_keeps_reversed_hitbox() {
        let player = Player::default();
        // Narrower than the inset: the hitbox interval runs backwards
        let thin = ground_obstacle(PLAYER_START_X + 10.0, 15.0, 59.0);
        let hb = obstacle_hitbox(&thin);
        assert!(hb.size.x < 0.0);
        // but still overlaps when the player box spans it
        assert!(player_hitbox(&player).overlaps(&hb));

        let clear = ground_obstacle(PLAYER_START_X + 40.0, 15.0, 59.0);
        assert!(!player_hitbox(&player).overlaps(&obstacle_hitbox(&clear)));
    }

    #[test]
    fn test_jumping_clears_short_obstacle() {
        let mut player = Player::default();
        player.pos.y = GROUND_Y - PLAYER_HEIGHT - 40.0;
        let obstacle = ground_obstacle(PLAYER_START_X, 30.0, 30.0);
        assert!(!player_hitbox(&player).overlaps(&obstacle_hitbox(&obstacle)));
    }

    #[test]
    fn test_hazard_inset_is_more_generous() {
        let hazard = Obstacle::hazard(100.0);
        let hb = obstacle_hitbox(&hazard);
        assert_eq!(hb.min.x, 115.0);
        assert_eq!(hb.size.x, HAZARD_WIDTH - 30.0);
        assert_eq!(hb.size.y, HAZARD_HEIGHT - 20.0);
    }

    #[test]
    fn test_projectile_consumed_on_hit() {
        let mut obstacle = Obstacle {
            x: 200.0,
            y: Some(100.0),
            width: 40.0,
            height: 50.0,
            health: 3.0,
            max_health: 3.0,
            invincible: false,
        };
        let mut projectiles = vec![
            Projectile {
                pos: Vec2::new(205.0, 110.0),
                power: 1.5,
            },
            Projectile {
                pos: Vec2::new(20.0, 110.0),
                power: 1.0,
            },
        ];
        assert_eq!(resolve_projectile_hits(&mut obstacle, &mut projectiles), 1);
        assert_eq!(projectiles.len(), 1);
        assert!((obstacle.health - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_hazard_absorbs_projectile() {
        let mut hazard = Obstacle::hazard(200.0);
        let mut projectiles = vec![Projectile {
            pos: Vec2::new(230.0, GROUND_Y - 40.0),
            power: 2.2,
        }];
        assert_eq!(resolve_projectile_hits(&mut hazard, &mut projectiles), 1);
        assert!(projectiles.is_empty());
        assert!(hazard.health.is_infinite());
    }

    #[test]
    fn test_no_projectiles_no_hits() {
        let mut obstacle = ground_obstacle(300.0, 30.0, 30.0);
        let mut projectiles = Vec::new();
        assert_eq!(resolve_projectile_hits(&mut obstacle, &mut projectiles), 0);
        assert_eq!(obstacle.health, 1.0);
    }
}
