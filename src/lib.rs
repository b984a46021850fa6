//! Runtime debug panel overlay for Bevy applications.
//!
//! Adds a translucent strip docked to the top of the primary window that
//! shows live entity and draw counters, the frame rate against its target,
//! a memory usage sparkline and four clickable debug-render checkboxes.
//! The panel is shown and hidden with key bindings (`S` and `H` by default)
//! and can be driven from code through [`DebugPanelCommands`].
//!
//! # Quick Start
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_debug_panel::{DebugPanelPlugin, DebugToggles};
//!
//! fn draw_hit_boxes(toggles: Res<DebugToggles>) {
//!     if toggles.render_hit_box {
//!         // draw collision shapes
//!     }
//! }
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(DebugPanelPlugin)
//!     .add_systems(Update, draw_hit_boxes)
//!     .run();
//! ```

mod components;
mod config;
pub mod constants;
mod graph;
mod hit_regions;
mod panel;
mod plugin;
mod providers;
mod render;
mod resources;
mod systems;
mod toggles;

pub use components::{PanelBoxNode, PanelTextNode, PanelUiHandles};
pub use config::{DebugPanelSettings, DrawTimeSource};
pub use graph::{round_to, HeapUsage, MemoryGraph, SampleBuffer};
pub use hit_regions::{HitRegion, HitRegionMap};
pub use panel::{DebugPanel, PanelFrame, PanelHost, VisibilityState};
pub use plugin::DebugPanelPlugin;
pub use providers::{
    sample_entity_count, sample_fps, DebugPanelAppExt, HeapTelemetry, HeapTelemetrySource,
    MetricSampleContext, NoHeapTelemetry, ProcessMemoryTelemetry, SystemMemoryTelemetry,
};
pub use render::{command_box, DrawCommand, DrawList, MonospaceMetrics, Surface, TextMeasure};
pub use resources::{
    DebugPanelCommands, FrameCounters, InputBindings, PanelRequest, PanelRequests,
    PointerPresses, PointerSubscriptions, RepaintRequests,
};
pub use systems::{
    collect_pointer_presses, dispatch_pointer_down, draw_panels, forward_repaint_requests,
    handle_panel_requests, latch_key_bindings, request_panel_on_startup, sample_frame_counters,
    sync_panel_ui, update_panels, PanelHostParams,
};
pub use toggles::{DebugToggles, ToggleFlag};
