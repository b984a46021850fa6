//! Runtime resources for the bevy_debug_panel.
//!
//! These resources stand in for the host services the panel talks to: key
//! bindings, pointer-down subscriptions, repaint requests, engine counters
//! and the request queue user code drives the panel with.

use bevy::{
    ecs::{entity::Entity, system::SystemParam},
    input::{keyboard::KeyCode, ButtonInput},
    math::Vec2,
    prelude::{ResMut, Resource},
};
use std::collections::{HashMap, HashSet};

/// Maps physical keys to logical commands and latches which commands are
/// held this frame.
#[derive(Resource, Debug, Default)]
pub struct InputBindings {
    keys: HashMap<KeyCode, String>,
    pressed: HashSet<String>,
}

impl InputBindings {
    /// Bind `key` to `command`, replacing any previous binding of that key.
    pub fn bind_key(&mut self, key: KeyCode, command: &str) {
        self.keys.insert(key, command.to_owned());
    }

    /// Remove the binding of `key`. The command stops reading as pressed
    /// immediately unless another key is still bound to it.
    pub fn unbind_key(&mut self, key: KeyCode) {
        if let Some(command) = self.keys.remove(&key) {
            if !self.keys.values().any(|c| *c == command) {
                self.pressed.remove(&command);
            }
        }
    }

    /// Command currently bound to `key`.
    pub fn binding(&self, key: KeyCode) -> Option<&str> {
        self.keys.get(&key).map(String::as_str)
    }

    pub fn is_bound(&self, command: &str) -> bool {
        self.keys.values().any(|c| c == command)
    }

    /// Recompute the pressed commands from the keyboard state.
    pub fn latch(&mut self, keyboard: &ButtonInput<KeyCode>) {
        self.pressed.clear();
        for (key, command) in &self.keys {
            if keyboard.pressed(*key) {
                self.pressed.insert(command.clone());
            }
        }
    }

    /// Whether any key bound to `command` was held when last latched.
    pub fn is_pressed(&self, command: &str) -> bool {
        self.pressed.contains(command)
    }
}

/// Owners currently subscribed to pointer-down events.
#[derive(Resource, Debug, Default)]
pub struct PointerSubscriptions {
    owners: Vec<Entity>,
}

impl PointerSubscriptions {
    /// Subscribe `owner`; subscribing twice keeps a single subscription.
    pub fn register(&mut self, owner: Entity) {
        if !self.owners.contains(&owner) {
            self.owners.push(owner);
        }
    }

    /// Drop the subscription of `owner`, if any.
    pub fn release(&mut self, owner: Entity) {
        self.owners.retain(|e| *e != owner);
    }

    pub fn is_subscribed(&self, owner: Entity) -> bool {
        self.owners.contains(&owner)
    }

    /// Number of subscriptions held by `owner` (0 or 1).
    pub fn count_for(&self, owner: Entity) -> usize {
        self.owners.iter().filter(|e| **e == owner).count()
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.owners.iter().copied()
    }
}

/// Pointer-down positions (screen coordinates) waiting to be dispatched to
/// the subscribed owners.
#[derive(Resource, Debug, Default)]
pub struct PointerPresses {
    positions: Vec<Vec2>,
}

impl PointerPresses {
    pub fn push(&mut self, position: Vec2) {
        self.positions.push(position);
    }

    pub fn take(&mut self) -> Vec<Vec2> {
        std::mem::take(&mut self.positions)
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Forced full-repaint requests accumulated since the last frame.
#[derive(Resource, Debug, Default)]
pub struct RepaintRequests {
    pending: u32,
    total: u64,
}

impl RepaintRequests {
    pub fn request(&mut self) {
        self.pending += 1;
        self.total += 1;
    }

    /// Take the pending requests, returning whether there were any.
    pub fn drain(&mut self) -> bool {
        let any = self.pending > 0;
        self.pending = 0;
        any
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }

    /// Requests made over the whole app lifetime
    pub fn total(&self) -> u64 {
        self.total
    }
}

/// Engine counters displayed by the panel, refreshed every frame.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameCounters {
    /// Live entity count
    pub objects: u32,
    /// Entities drawn this frame
    pub draws: u32,
    /// Measured frames per second
    pub fps: u32,
    /// Configured frame rate target
    pub target_fps: u32,
}

/// A request to change the panel's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRequest {
    /// Create the panel if needed, otherwise make it visible
    Show,
    /// Move the panel off-screen
    Hide,
    /// Tear the panel down, releasing its bindings
    Destroy,
}

/// Queue of lifecycle requests, handled once per frame.
#[derive(Resource, Debug, Default)]
pub struct PanelRequests {
    queue: Vec<PanelRequest>,
}

impl PanelRequests {
    pub fn push(&mut self, request: PanelRequest) {
        self.queue.push(request);
    }

    pub fn take(&mut self) -> Vec<PanelRequest> {
        std::mem::take(&mut self.queue)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// System parameter for driving the panel from gameplay code.
///
/// # Example
/// ```rust
/// use bevy::prelude::*;
/// use bevy_debug_panel::DebugPanelCommands;
///
/// fn toggle_panel(keys: Res<ButtonInput<KeyCode>>, mut panel: DebugPanelCommands) {
///     if keys.just_pressed(KeyCode::F3) {
///         panel.show_panel();
///     }
///     if keys.just_pressed(KeyCode::F4) {
///         panel.destroy_panel();
///     }
/// }
/// ```
#[derive(SystemParam)]
pub struct DebugPanelCommands<'w> {
    requests: ResMut<'w, PanelRequests>,
}

impl DebugPanelCommands<'_> {
    /// Show the panel, creating it on first use.
    pub fn show_panel(&mut self) {
        self.requests.push(PanelRequest::Show);
    }

    pub fn hide_panel(&mut self) {
        self.requests.push(PanelRequest::Hide);
    }

    /// Tear the panel down; a later show creates a fresh one.
    pub fn destroy_panel(&mut self) {
        self.requests.push(PanelRequest::Destroy);
    }
}
