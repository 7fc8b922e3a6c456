//! Map layout and entity registry
//!
//! A [`SceneLayout`] describes where everything starts. It is turned into an
//! [`EntityRegistry`] exactly once at setup; the simulation never looks
//! entities up by name afterwards.

use std::collections::HashMap;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Category, EntityId};

/// Problems found while building a scene. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("failed to read layout: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed layout: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("player size must be positive and finite, got {0}")]
    InvalidPlayerSize(Vec2),

    #[error("{0:?} placement has a non-finite coordinate")]
    NonFinite(Category),
}

fn default_size() -> Vec2 {
    Vec2::splat(32.0)
}

/// Starting position and bounding size of one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec2,
    #[serde(default = "default_size")]
    pub size: Vec2,
}

impl Placement {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    fn is_finite(&self) -> bool {
        self.position.is_finite() && self.size.is_finite()
    }
}

/// Where every entity starts on the map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneLayout {
    pub player: Placement,
    #[serde(default)]
    pub pursuers: Vec<Placement>,
    pub chest: Placement,
    pub key: Placement,
    #[serde(default)]
    pub life_pickups: Vec<Placement>,
}

impl Default for SceneLayout {
    /// The built-in map: three pursuers, four hearts, key and chest at
    /// opposite corners
    fn default() -> Self {
        let p = |x: f32, y: f32, size: f32| Placement::new(Vec2::new(x, y), Vec2::splat(size));
        Self {
            player: p(0.0, 0.0, 48.0),
            pursuers: vec![p(420.0, 300.0, 40.0), p(-460.0, 260.0, 40.0), p(380.0, -420.0, 40.0)],
            chest: p(760.0, 640.0, 64.0),
            key: p(-640.0, -520.0, 32.0),
            life_pickups: vec![
                p(-300.0, 120.0, 32.0),
                p(240.0, -200.0, 32.0),
                p(-520.0, -180.0, 32.0),
                p(560.0, 420.0, 32.0),
            ],
        }
    }
}

impl SceneLayout {
    /// Parse a layout from JSON
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        let layout: SceneLayout = serde_json::from_str(json)?;
        Ok(layout)
    }

    /// Load a layout file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let layout = Self::from_json(&json)?;
        log::info!(
            "Loaded layout from {} ({} pursuers, {} pickups)",
            path.as_ref().display(),
            layout.pursuers.len(),
            layout.life_pickups.len()
        );
        Ok(layout)
    }

    pub fn to_json(&self) -> Result<String, SetupError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every placement with its category, in id-assignment order
    fn placements(&self) -> impl Iterator<Item = (Category, &Placement)> {
        std::iter::once((Category::Player, &self.player))
            .chain(self.pursuers.iter().map(|p| (Category::Pursuer, p)))
            .chain(std::iter::once((Category::Chest, &self.chest)))
            .chain(std::iter::once((Category::Key, &self.key)))
            .chain(self.life_pickups.iter().map(|p| (Category::LifePickup, p)))
    }

    fn validate(&self) -> Result<(), SetupError> {
        for (category, placement) in self.placements() {
            if !placement.is_finite() {
                return Err(SetupError::NonFinite(category));
            }
        }
        let size = self.player.size;
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(SetupError::InvalidPlayerSize(size));
        }
        if self.pursuers.is_empty() {
            log::warn!("Layout has no pursuers");
        }
        Ok(())
    }
}

/// An entity as spawned from the layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityInfo {
    pub id: EntityId,
    pub category: Category,
    pub position: Vec2,
    pub size: Vec2,
}

/// Ids of every entity the simulation needs, grouped by category
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    entities: Vec<EntityInfo>,
    categories: HashMap<EntityId, Category>,
    player: EntityId,
    player_size: Vec2,
    pursuers: Vec<EntityId>,
    chest: EntityId,
    key: EntityId,
    life_pickups: Vec<EntityId>,
}

impl EntityRegistry {
    /// Assign ids to every placement (starting at 1, in layout order)
    pub fn from_layout(layout: &SceneLayout) -> Result<Self, SetupError> {
        layout.validate()?;

        let entities: Vec<EntityInfo> = layout
            .placements()
            .zip(1u32..)
            .map(|((category, placement), id)| EntityInfo {
                id: EntityId(id),
                category,
                position: placement.position,
                size: placement.size,
            })
            .collect();

        let ids_of = |category: Category| -> Vec<EntityId> {
            entities
                .iter()
                .filter(|e| e.category == category)
                .map(|e| e.id)
                .collect()
        };
        let pursuers = ids_of(Category::Pursuer);
        let life_pickups = ids_of(Category::LifePickup);

        // Player is always spawned first, chest and key right after the pursuers
        let chest = EntityId(2 + pursuers.len() as u32);
        let registry = Self {
            categories: entities.iter().map(|e| (e.id, e.category)).collect(),
            player: EntityId(1),
            player_size: layout.player.size,
            pursuers,
            chest,
            key: EntityId(chest.0 + 1),
            life_pickups,
            entities,
        };
        log::debug!("Registry built with {} entities", registry.entities.len());
        Ok(registry)
    }

    pub fn entities(&self) -> &[EntityInfo] {
        &self.entities
    }

    pub fn category_of(&self, id: EntityId) -> Option<Category> {
        self.categories.get(&id).copied()
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    /// Bounding size of the player sprite (drives the movement dead-zone)
    pub fn player_size(&self) -> Vec2 {
        self.player_size
    }

    /// Pursuers in insertion order
    pub fn pursuers(&self) -> &[EntityId] {
        &self.pursuers
    }

    pub fn chest(&self) -> EntityId {
        self.chest
    }

    pub fn key(&self) -> EntityId {
        self.key
    }

    pub fn life_pickups(&self) -> &[EntityId] {
        &self.life_pickups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_registry() {
        let registry = EntityRegistry::from_layout(&SceneLayout::default()).unwrap();
        assert_eq!(registry.player(), EntityId(1));
        assert_eq!(registry.pursuers(), &[EntityId(2), EntityId(3), EntityId(4)]);
        assert_eq!(registry.chest(), EntityId(5));
        assert_eq!(registry.key(), EntityId(6));
        assert_eq!(registry.life_pickups().len(), 4);
        assert_eq!(registry.category_of(EntityId(7)), Some(Category::LifePickup));
        assert_eq!(registry.category_of(EntityId(99)), None);
        assert_eq!(registry.player_size(), Vec2::splat(48.0));
    }

    #[test]
    fn test_parse_layout_json() {
        let json = r#"{
            "player": { "position": [0.0, 0.0], "size": [40.0, 60.0] },
            "pursuers": [ { "position": [100.0, 0.0] } ],
            "chest": { "position": [300.0, 300.0], "size": [64.0, 64.0] },
            "key": { "position": [-200.0, 50.0] }
        }"#;
        let layout = SceneLayout::from_json(json).unwrap();
        assert_eq!(layout.pursuers[0].size, Vec2::splat(32.0));
        assert!(layout.life_pickups.is_empty());

        let registry = EntityRegistry::from_layout(&layout).unwrap();
        assert_eq!(registry.player_size(), Vec2::new(40.0, 60.0));
        assert_eq!(registry.key(), EntityId(4));
    }

    #[test]
    fn test_missing_chest_is_setup_error() {
        let json = r#"{
            "player": { "position": [0.0, 0.0] },
            "key": { "position": [10.0, 10.0] }
        }"#;
        assert!(matches!(
            SceneLayout::from_json(json),
            Err(SetupError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_player_size() {
        let mut layout = SceneLayout::default();
        layout.player.size = Vec2::new(0.0, 10.0);
        assert!(matches!(
            EntityRegistry::from_layout(&layout),
            Err(SetupError::InvalidPlayerSize(_))
        ));
    }

    #[test]
    fn test_non_finite_placement() {
        let mut layout = SceneLayout::default();
        layout.key.position.x = f32::NAN;
        assert!(matches!(
            EntityRegistry::from_layout(&layout),
            Err(SetupError::NonFinite(Category::Key))
        ));
    }

    #[test]
    fn test_layout_json_round_trip_keeps_counts() {
        let layout = SceneLayout::default();
        let json = layout.to_json().unwrap();
        let parsed = SceneLayout::from_json(&json).unwrap();
        assert_eq!(parsed.pursuers.len(), layout.pursuers.len());
        assert_eq!(parsed.chest, layout.chest);
    }
}
