//! Process-wide debug render toggles.
//!
//! [`DebugToggles`] is the shared configuration object the debug panel flips
//! and every debug renderer reads. It lives in the ECS as a resource, so the
//! scheduler serializes writers against readers even on the multi-threaded
//! executor.

use bevy::prelude::Resource;

/// Boolean switches read by external renderers to decide which debug
/// visuals to paint on top of the scene.
///
/// The panel writes the four render flags from its click handler and turns
/// `display_fps` on the first time it is shown. Nothing resets these values
/// except explicit user code.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DebugToggles {
    /// Paint the frame counter
    pub display_fps: bool,
    /// Paint object rectangles and collision boxes
    pub render_hit_box: bool,
    /// Paint the collision map layer
    pub render_collision_map: bool,
    /// Paint dirty regions
    pub render_dirty: bool,
    /// Paint entity velocity vectors
    pub render_velocity: bool,
}

/// Names one of the fields of [`DebugToggles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleFlag {
    DisplayFps,
    RenderHitBox,
    RenderCollisionMap,
    RenderDirty,
    RenderVelocity,
}

impl ToggleFlag {
    /// Every flag, in declaration order.
    pub const ALL: [ToggleFlag; 5] = [
        ToggleFlag::DisplayFps,
        ToggleFlag::RenderHitBox,
        ToggleFlag::RenderCollisionMap,
        ToggleFlag::RenderDirty,
        ToggleFlag::RenderVelocity,
    ];

    /// Read the current value of this flag.
    pub fn get(self, toggles: &DebugToggles) -> bool {
        match self {
            Self::DisplayFps => toggles.display_fps,
            Self::RenderHitBox => toggles.render_hit_box,
            Self::RenderCollisionMap => toggles.render_collision_map,
            Self::RenderDirty => toggles.render_dirty,
            Self::RenderVelocity => toggles.render_velocity,
        }
    }

    /// Overwrite the value of this flag.
    pub fn set(self, toggles: &mut DebugToggles, value: bool) {
        let slot = match self {
            Self::DisplayFps => &mut toggles.display_fps,
            Self::RenderHitBox => &mut toggles.render_hit_box,
            Self::RenderCollisionMap => &mut toggles.render_collision_map,
            Self::RenderDirty => &mut toggles.render_dirty,
            Self::RenderVelocity => &mut toggles.render_velocity,
        };
        *slot = value;
    }

    /// Invert the flag and return its new value.
    pub fn toggle(self, toggles: &mut DebugToggles) -> bool {
        let value = !self.get(toggles);
        self.set(toggles, value);
        value
    }

    /// Host-facing name of the flag.
    pub fn name(self) -> &'static str {
        match self {
            Self::DisplayFps => "displayFPS",
            Self::RenderHitBox => "renderHitBox",
            Self::RenderCollisionMap => "renderCollisionMap",
            Self::RenderDirty => "renderDirty",
            Self::RenderVelocity => "renderVelocity",
        }
    }

    /// Look a flag up by its host-facing name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.name() == name)
    }
}
