//! Core Bevy systems for the debug panel.
//!
//! Frame order:
//! - `PreUpdate`: latch key bindings, collect pointer presses, sample counters
//! - `Update`: apply lifecycle requests, dispatch pointer presses
//! - `PostUpdate`: per-frame panel update (after the app's own `Update` work),
//!   draw, and mirror into UI nodes ahead of UI layout
//! - `Last`: forward repaints

use bevy::{
    diagnostic::DiagnosticsStore,
    ecs::{entity::Entity, system::SystemParam},
    input::{keyboard::KeyCode, mouse::MouseButton, ButtonInput},
    prelude::*,
    render::view::ViewVisibility,
    text::{TextColor, TextFont},
    ui::{Display, GlobalZIndex, Node, PositionType, Val, ZIndex},
    window::{PrimaryWindow, RequestRedraw, Window},
};

use crate::{
    components::{PanelBoxNode, PanelTextNode, PanelUiHandles},
    config::DebugPanelSettings,
    constants::*,
    panel::{DebugPanel, PanelFrame, PanelHost},
    providers::{sample_entity_count, sample_fps, HeapTelemetrySource, MetricSampleContext},
    render::{command_box, DrawCommand, DrawList, MonospaceMetrics},
    resources::{
        FrameCounters, InputBindings, PanelRequest, PanelRequests, PointerPresses,
        PointerSubscriptions, RepaintRequests,
    },
    toggles::DebugToggles,
};

/// Host services shared by every system that drives the panel lifecycle.
#[derive(SystemParam)]
pub struct PanelHostParams<'w> {
    bindings: ResMut<'w, InputBindings>,
    pointer: ResMut<'w, PointerSubscriptions>,
    repaint: ResMut<'w, RepaintRequests>,
}

impl PanelHostParams<'_> {
    fn host(&mut self, owner: Entity) -> PanelHost<'_> {
        PanelHost {
            owner,
            bindings: &mut *self.bindings,
            pointer: &mut *self.pointer,
            repaint: &mut *self.repaint,
        }
    }
}

fn screen_width(
    windows: &Query<&Window, With<PrimaryWindow>>,
    settings: &DebugPanelSettings,
) -> f32 {
    windows
        .single()
        .map(|window| window.width())
        .unwrap_or(settings.fallback_width)
}

/// Queue the panel at startup when configured to.
pub fn request_panel_on_startup(
    settings: Res<DebugPanelSettings>,
    mut requests: ResMut<PanelRequests>,
) {
    if settings.show_on_startup {
        requests.push(PanelRequest::Show);
    }
}

/// Snapshot which bound commands are held this frame.
pub fn latch_key_bindings(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mut bindings: ResMut<InputBindings>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };
    bindings.latch(&keyboard);
}

/// Turn left mouse presses over the primary window into pointer presses.
pub fn collect_pointer_presses(
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut presses: ResMut<PointerPresses>,
) {
    let Some(mouse) = mouse else {
        return;
    };
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(position) = windows.single().ok().and_then(Window::cursor_position) else {
        return;
    };
    presses.push(position);
}

/// Refresh the engine counters shown by the panel.
pub fn sample_frame_counters(
    diagnostics: Option<Res<DiagnosticsStore>>,
    settings: Res<DebugPanelSettings>,
    visibility: Query<&ViewVisibility>,
    mut counters: ResMut<FrameCounters>,
) {
    let ctx = MetricSampleContext {
        diagnostics: diagnostics.as_deref(),
    };

    if let Some(objects) = sample_entity_count(ctx) {
        counters.objects = objects;
    }
    if let Some(fps) = sample_fps(ctx) {
        counters.fps = fps;
    }
    counters.draws = visibility.iter().filter(|v| v.get()).count() as u32;
    counters.target_fps = settings.target_fps;
}

/// Apply queued show/hide/destroy requests.
///
/// The first show creates the panel; every show also turns the FPS display
/// on. Destroy runs the panel teardown before despawning it.
pub fn handle_panel_requests(
    mut commands: Commands,
    mut requests: ResMut<PanelRequests>,
    settings: Res<DebugPanelSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut panels: Query<(Entity, &mut DebugPanel)>,
    mut toggles: ResMut<DebugToggles>,
    mut host: PanelHostParams,
) {
    if requests.is_empty() {
        return;
    }

    // A panel created during this call is not visible to the query yet, and
    // one despawned during it still is.
    let mut created: Option<(Entity, DebugPanel)> = None;
    let mut destroyed: Option<Entity> = None;

    for request in requests.take() {
        let existing = panels
            .iter_mut()
            .find(|(entity, _)| Some(*entity) != destroyed);
        let target = match (existing, created.as_mut()) {
            (Some((entity, panel)), _) => Some((entity, panel.into_inner())),
            (None, Some((entity, panel))) => Some((*entity, panel)),
            (None, None) => None,
        };

        match (request, target) {
            (PanelRequest::Show, Some((entity, panel))) => {
                panel.show(&mut host.host(entity));
                toggles.display_fps = true;
            }
            (PanelRequest::Show, None) => {
                let entity = commands.spawn_empty().id();
                let metrics =
                    MonospaceMetrics::for_font_size(settings.font_size, settings.glyph_advance);
                let width = screen_width(&windows, &settings);
                let panel = DebugPanel::new(&settings, width, &metrics, &mut host.host(entity));
                created = Some((entity, panel));
                toggles.display_fps = true;
                info!("debug panel created ({width}px wide)");
            }
            (PanelRequest::Hide, Some((entity, panel))) => {
                panel.hide(&mut host.host(entity));
            }
            (PanelRequest::Destroy, Some((entity, panel))) => {
                panel.on_destroy(&mut host.host(entity));
                commands.entity(entity).despawn();
                if created.as_ref().is_some_and(|(e, _)| *e == entity) {
                    created = None;
                } else {
                    destroyed = Some(entity);
                }
            }
            (PanelRequest::Hide | PanelRequest::Destroy, None) => {
                debug!("{request:?} ignored, no debug panel");
            }
        }
    }

    if let Some((entity, panel)) = created {
        let position = panel.position();
        let size = panel.size();
        commands.entity(entity).insert((
            Name::new(PANEL_ENTITY_NAME),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(position.x),
                top: Val::Px(position.y),
                width: Val::Px(size.x),
                height: Val::Px(size.y),
                ..default()
            },
            GlobalZIndex(i32::MAX),
            panel,
            DrawList::default(),
            PanelUiHandles::default(),
        ));
    }
}

/// Deliver pointer presses to the panels subscribed to them.
pub fn dispatch_pointer_down(
    mut presses: ResMut<PointerPresses>,
    subscriptions: Res<PointerSubscriptions>,
    panels: Query<&DebugPanel>,
    mut toggles: ResMut<DebugToggles>,
    mut repaint: ResMut<RepaintRequests>,
) {
    for position in presses.take() {
        for owner in subscriptions.iter() {
            let Ok(panel) = panels.get(owner) else {
                continue;
            };
            panel.on_click(position, &mut toggles, &mut repaint);
        }
    }
}

/// Per-frame panel update: follow the window width, apply show/hide keys
/// and stamp the draw-time start.
pub fn update_panels(
    time: Res<Time<Real>>,
    settings: Res<DebugPanelSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut panels: Query<(Entity, &mut DebugPanel)>,
    mut host: PanelHostParams,
) {
    let width = screen_width(&windows, &settings);
    for (entity, mut panel) in &mut panels {
        panel.set_width(width);
        panel.update(&mut host.host(entity), time.elapsed());
    }
}

/// Sample heap telemetry and record each panel's draw commands.
pub fn draw_panels(
    time: Res<Time<Real>>,
    diagnostics: Option<Res<DiagnosticsStore>>,
    counters: Res<FrameCounters>,
    toggles: Res<DebugToggles>,
    mut telemetry: ResMut<HeapTelemetrySource>,
    mut panels: Query<(&mut DebugPanel, &mut DrawList)>,
) {
    if panels.is_empty() {
        return;
    }

    let ctx = MetricSampleContext {
        diagnostics: diagnostics.as_deref(),
    };
    let frame = PanelFrame {
        counters: &counters,
        toggles: &toggles,
        heap: telemetry.sample(ctx),
        now: time.elapsed(),
        frame_time: time.delta(),
    };

    for (mut panel, mut list) in &mut panels {
        list.clear();
        panel.draw(&mut *list, &frame);
    }
}

/// Mirror each panel's draw list into its pooled UI child nodes.
#[allow(clippy::type_complexity)]
pub fn sync_panel_ui(
    mut commands: Commands,
    settings: Res<DebugPanelSettings>,
    mut panels: Query<
        (Entity, &DebugPanel, &DrawList, &mut PanelUiHandles, &mut Node),
        (Without<PanelBoxNode>, Without<PanelTextNode>),
    >,
    mut boxes: Query<
        (&mut Node, &mut BackgroundColor),
        (With<PanelBoxNode>, Without<PanelTextNode>, Without<DebugPanel>),
    >,
    mut texts: Query<
        (&mut Node, &mut Text, &mut TextColor),
        (With<PanelTextNode>, Without<PanelBoxNode>, Without<DebugPanel>),
    >,
) {
    for (root, panel, list, mut handles, mut root_node) in &mut panels {
        let position = panel.position();
        let size = panel.size();
        root_node.left = Val::Px(position.x);
        root_node.top = Val::Px(position.y);
        root_node.width = Val::Px(size.x);
        root_node.height = Val::Px(size.y);

        let mut used_boxes = 0;
        let mut used_texts = 0;

        for command in list.commands() {
            match command {
                DrawCommand::Text { text, at, color } => {
                    if let Some(&entity) = handles.texts.get(used_texts) {
                        if let Ok((mut node, mut label, mut label_color)) = texts.get_mut(entity) {
                            node.display = Display::Flex;
                            node.left = Val::Px(at.x);
                            node.top = Val::Px(at.y);
                            if label.0 != *text {
                                label.0.clone_from(text);
                            }
                            label_color.0 = *color;
                        }
                    } else {
                        let entity = commands
                            .spawn((
                                Text::new(text.clone()),
                                TextFont {
                                    font_size: settings.font_size,
                                    ..default()
                                },
                                TextColor(*color),
                                Node {
                                    position_type: PositionType::Absolute,
                                    left: Val::Px(at.x),
                                    top: Val::Px(at.y),
                                    ..default()
                                },
                                ZIndex(1),
                                PanelTextNode,
                                ChildOf(root),
                            ))
                            .id();
                        handles.texts.push(entity);
                    }
                    used_texts += 1;
                }
                DrawCommand::FillRect { color, .. } | DrawCommand::Line { color, .. } => {
                    let Some(rect) = command_box(command) else {
                        continue;
                    };
                    if let Some(&entity) = handles.boxes.get(used_boxes) {
                        if let Ok((mut node, mut background)) = boxes.get_mut(entity) {
                            node.display = Display::Flex;
                            node.left = Val::Px(rect.min.x);
                            node.top = Val::Px(rect.min.y);
                            node.width = Val::Px(rect.width());
                            node.height = Val::Px(rect.height());
                            background.0 = *color;
                        }
                    } else {
                        let entity = commands
                            .spawn((
                                Node {
                                    position_type: PositionType::Absolute,
                                    left: Val::Px(rect.min.x),
                                    top: Val::Px(rect.min.y),
                                    width: Val::Px(rect.width()),
                                    height: Val::Px(rect.height()),
                                    ..default()
                                },
                                BackgroundColor(*color),
                                PanelBoxNode,
                                ChildOf(root),
                            ))
                            .id();
                        handles.boxes.push(entity);
                    }
                    used_boxes += 1;
                }
            }
        }

        // Park whatever this frame did not use.
        for &entity in handles.texts.iter().skip(used_texts) {
            if let Ok((mut node, _, _)) = texts.get_mut(entity) {
                node.display = Display::None;
            }
        }
        for &entity in handles.boxes.iter().skip(used_boxes) {
            if let Ok((mut node, _)) = boxes.get_mut(entity) {
                node.display = Display::None;
            }
        }
    }
}

/// Turn this frame's repaint requests into a single redraw request.
pub fn forward_repaint_requests(
    mut repaint: ResMut<RepaintRequests>,
    mut redraw: EventWriter<RequestRedraw>,
) {
    if repaint.drain() {
        trace!("debug panel requested a repaint");
        redraw.write(RequestRedraw);
    }
}
