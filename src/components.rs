//! Component definitions for the panel's UI mirror.
//!
//! The panel entity is itself the root UI node. Every frame its draw list
//! is mirrored into two pools of child nodes: solid boxes (background and
//! graph columns) and text labels. Pool entries are reused across frames
//! and parked with `Display::None` when unused.

use bevy::{ecs::entity::Entity, prelude::Component};

/// Component on the panel entity holding the pooled UI children.
#[derive(Component, Debug, Default)]
pub struct PanelUiHandles {
    /// Child nodes used for filled rectangles and line segments
    pub boxes: Vec<Entity>,
    /// Child nodes used for text labels
    pub texts: Vec<Entity>,
}

/// Marker for a pooled solid box node.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct PanelBoxNode;

/// Marker for a pooled text node.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct PanelTextNode;
