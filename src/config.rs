//! Configuration for the bevy_debug_panel.

use bevy::{color::Color, input::keyboard::KeyCode, prelude::Resource};

use crate::hit_regions::HitRegionMap;

/// Where the panel's "draw time" figure comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawTimeSource {
    /// Duration of the previous frame as reported by the host clock
    #[default]
    FrameDelta,
    /// Time elapsed between the panel's own update and draw this frame.
    /// Only approximates the frame cost while the panel updates last.
    SinceUpdate,
}

/// Main configuration resource for the debug panel.
///
/// Insert this resource before adding the plugin to customize the panel.
///
/// # Example
/// ```rust
/// use bevy::prelude::*;
/// use bevy_debug_panel::DebugPanelSettings;
///
/// App::new()
///     .insert_resource(DebugPanelSettings {
///         target_fps: 144,
///         ..default()
///     });
/// ```
#[derive(Debug, Clone, Resource)]
pub struct DebugPanelSettings {
    /// Font size of every panel string in pixels
    pub font_size: f32,
    /// Glyph advance of the (monospace) panel font, as a fraction of the font size
    pub glyph_advance: f32,
    /// Color of all text
    pub text_color: Color,
    /// Panel background, drawn semi-transparent
    pub background_color: Color,
    /// Color of the memory graph columns
    pub graph_color: Color,
    /// Key bound to the "show" command
    pub show_key: KeyCode,
    /// Key bound to the "hide" command
    pub hide_key: KeyCode,
    /// Frame rate the app aims for, shown after the measured one
    pub target_fps: u32,
    /// Panel width used when there is no primary window to span
    pub fallback_width: f32,
    /// Request the panel as soon as the app starts
    pub show_on_startup: bool,
    /// Source of the draw time figure
    pub draw_time: DrawTimeSource,
    /// Clickable checkbox areas in priority order
    pub hit_regions: HitRegionMap,
}

impl Default for DebugPanelSettings {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            glyph_advance: 0.6,
            text_color: Color::WHITE,
            background_color: Color::srgba(0.0, 0.0, 0.0, 0.5),
            graph_color: Color::srgb(0.56, 0.93, 0.56),
            show_key: KeyCode::KeyS,
            hide_key: KeyCode::KeyH,
            target_fps: 60,
            fallback_width: 800.0,
            show_on_startup: true,
            draw_time: DrawTimeSource::default(),
            hit_regions: HitRegionMap::default(),
        }
    }
}
