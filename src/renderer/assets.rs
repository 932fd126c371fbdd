//! Optional sprite images
//!
//! Images load asynchronously in the browser. Until (or unless) one loads,
//! the scene falls back to primitive shapes.

use glam::Vec2;

/// The four decorative sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    Player,
    Obstacle,
    Projectile,
    Hazard,
}

impl AssetId {
    pub const ALL: [AssetId; 4] = [
        AssetId::Player,
        AssetId::Obstacle,
        AssetId::Projectile,
        AssetId::Hazard,
    ];

    /// URL the image is fetched from
    pub fn path(&self) -> &'static str {
        match self {
            AssetId::Player => "/hand.png",
            AssetId::Obstacle => "/shovel.png",
            AssetId::Projectile => "/rock.png",
            AssetId::Hazard => "/cops.png",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AssetEntry {
    pub loaded: bool,
    /// Intrinsic pixel size, valid once loaded
    pub natural_size: Vec2,
}

/// Load flags polled by the renderer each frame
#[derive(Debug, Clone, Default)]
pub struct AssetCache {
    entries: [AssetEntry; 4],
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_loaded(&mut self, id: AssetId, natural_size: Vec2) {
        log::debug!("Asset {} loaded ({}x{})", id.path(), natural_size.x, natural_size.y);
        self.entries[id.index()] = AssetEntry {
            loaded: true,
            natural_size,
        };
    }

    pub fn mark_failed(&mut self, id: AssetId) {
        log::debug!("Asset {} failed to load, using fallback", id.path());
        self.entries[id.index()] = AssetEntry::default();
    }

    pub fn is_loaded(&self, id: AssetId) -> bool {
        self.entries[id.index()].loaded
    }

    /// Natural size of a loaded image
    pub fn natural_size(&self, id: AssetId) -> Option<Vec2> {
        let entry = self.entries[id.index()];
        entry.loaded.then_some(entry.natural_size)
    }
}
