//! Core plugin implementation for the bevy_debug_panel.
//!
//! This module contains the main [`DebugPanelPlugin`] and its schedule.

use bevy::{
    app::{App, Last, Plugin, PostUpdate, PreUpdate, Startup, Update},
    diagnostic::{
        EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin,
        SystemInformationDiagnosticsPlugin,
    },
    input::InputSystem,
    prelude::IntoScheduleConfigs,
    ui::UiSystem,
    window::RequestRedraw,
};

use crate::{
    config::DebugPanelSettings,
    providers::HeapTelemetrySource,
    resources::{
        FrameCounters, InputBindings, PanelRequests, PointerPresses, PointerSubscriptions,
        RepaintRequests,
    },
    systems::{
        collect_pointer_presses, dispatch_pointer_down, draw_panels, forward_repaint_requests,
        handle_panel_requests, latch_key_bindings, request_panel_on_startup,
        sample_frame_counters, sync_panel_ui, update_panels,
    },
    toggles::DebugToggles,
};

/// Main plugin for the debug panel.
///
/// Registers the panel resources and systems. The panel itself is created
/// on the first show request, which happens at startup unless
/// [`DebugPanelSettings::show_on_startup`] is turned off.
///
/// # Example
///
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_debug_panel::DebugPanelPlugin;
///
/// let mut app = App::new();
/// app.add_plugins(DefaultPlugins);
/// app.add_plugins(DebugPanelPlugin);
/// app.run();
/// ```
#[derive(Default)]
pub struct DebugPanelPlugin;

impl Plugin for DebugPanelPlugin {
    fn build(&self, app: &mut App) {
        // Counters and memory usage come from the built-in diagnostics
        if !app.is_plugin_added::<FrameTimeDiagnosticsPlugin>() {
            app.add_plugins(FrameTimeDiagnosticsPlugin::default());
        };

        if !app.is_plugin_added::<EntityCountDiagnosticsPlugin>() {
            app.add_plugins(EntityCountDiagnosticsPlugin);
        };

        if !app.is_plugin_added::<SystemInformationDiagnosticsPlugin>() {
            app.add_plugins(SystemInformationDiagnosticsPlugin);
        };

        app.init_resource::<DebugPanelSettings>()
            .init_resource::<DebugToggles>()
            .init_resource::<InputBindings>()
            .init_resource::<PointerSubscriptions>()
            .init_resource::<PointerPresses>()
            .init_resource::<RepaintRequests>()
            .init_resource::<FrameCounters>()
            .init_resource::<PanelRequests>()
            .init_resource::<HeapTelemetrySource>()
            // Already registered by the window plugin; repeating it is a no-op
            .add_event::<RequestRedraw>()
            .add_systems(Startup, request_panel_on_startup)
            .add_systems(
                PreUpdate,
                (
                    latch_key_bindings,
                    collect_pointer_presses,
                    sample_frame_counters,
                )
                    .after(InputSystem),
            )
            .add_systems(
                Update,
                (handle_panel_requests, dispatch_pointer_down).chain(),
            )
            // After the app's own updaters, before UI layout of this frame
            .add_systems(
                PostUpdate,
                (update_panels, draw_panels, sync_panel_ui)
                    .chain()
                    .before(UiSystem::Layout),
            )
            .add_systems(Last, forward_repaint_requests);
    }
}
