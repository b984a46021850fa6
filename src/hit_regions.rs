//! Clickable checkbox areas of the panel.

use bevy::math::{Rect, Vec2};

use crate::{constants::*, toggles::ToggleFlag};

/// A panel-local rectangle bound to one toggle flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRegion {
    pub flag: ToggleFlag,
    pub rect: Rect,
}

impl HitRegion {
    pub fn new(flag: ToggleFlag, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            flag,
            rect: Rect::from_corners(Vec2::new(x, y), Vec2::new(x + width, y + height)),
        }
    }

    /// Edges count as inside.
    pub fn contains(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

/// Ordered set of hit regions; earlier regions win when they overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct HitRegionMap {
    regions: Vec<HitRegion>,
}

impl HitRegionMap {
    pub fn new(regions: Vec<HitRegion>) -> Self {
        Self { regions }
    }

    /// First region containing `point`, in priority order.
    pub fn hit(&self, point: Vec2) -> Option<&HitRegion> {
        self.regions.iter().find(|region| region.contains(point))
    }

    /// Region bound to `flag`, if any.
    pub fn region(&self, flag: ToggleFlag) -> Option<&HitRegion> {
        self.regions.iter().find(|region| region.flag == flag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HitRegion> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl Default for HitRegionMap {
    /// The four checkbox areas, tested hit box, dirty rect, collision layer,
    /// velocity.
    fn default() -> Self {
        let region = |flag, (x, y, w, h): (f32, f32, f32, f32)| HitRegion::new(flag, x, y, w, h);
        Self::new(vec![
            region(ToggleFlag::RenderHitBox, HIT_BOX_AREA),
            region(ToggleFlag::RenderDirty, DIRTY_AREA),
            region(ToggleFlag::RenderCollisionMap, COLLISION_MAP_AREA),
            region(ToggleFlag::RenderVelocity, VELOCITY_AREA),
        ])
    }
}
