//! The debug panel itself.
//!
//! [`DebugPanel`] is a full-width strip docked to the top of the screen. It
//! is always drawn; hiding it only moves it above the visible area and drops
//! its pointer subscription, so a hidden panel ignores clicks.
//!
//! All host services are reached through [`PanelHost`], which keeps the
//! panel logic independent of how the Bevy systems fetch their resources.

use std::time::Duration;

use bevy::{
    color::Color,
    ecs::entity::Entity,
    input::keyboard::KeyCode,
    log::{debug, info},
    math::{Rect, Vec2},
    prelude::Component,
};

use crate::{
    config::{DebugPanelSettings, DrawTimeSource},
    constants::*,
    graph::{HeapUsage, MemoryGraph, SampleBuffer},
    hit_regions::HitRegionMap,
    render::{Surface, TextMeasure},
    resources::{FrameCounters, InputBindings, PointerSubscriptions, RepaintRequests},
    toggles::{DebugToggles, ToggleFlag},
};

/// Visibility of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityState {
    Hidden,
    Visible,
}

/// Host services touched by the panel's lifecycle operations.
pub struct PanelHost<'a> {
    /// Entity the pointer subscription is registered under
    pub owner: Entity,
    pub bindings: &'a mut InputBindings,
    pub pointer: &'a mut PointerSubscriptions,
    pub repaint: &'a mut RepaintRequests,
}

/// Everything the panel reads while drawing one frame.
pub struct PanelFrame<'a> {
    pub counters: &'a FrameCounters,
    pub toggles: &'a DebugToggles,
    /// Heap reading for this frame, `None` when telemetry is unavailable
    pub heap: Option<HeapUsage>,
    /// Host clock at draw time
    pub now: Duration,
    /// Duration of the previous frame
    pub frame_time: Duration,
}

/// Runtime debug panel: counters, toggle checkboxes and a memory graph.
#[derive(Component, Debug)]
pub struct DebugPanel {
    state: VisibilityState,
    position: Vec2,
    size: Vec2,
    regions: HitRegionMap,
    graph: MemoryGraph,
    show_key: KeyCode,
    hide_key: KeyCode,
    help_width: f32,
    fps_width: f32,
    draw_start: Duration,
    draw_time: DrawTimeSource,
    text_color: Color,
    background_color: Color,
}

impl DebugPanel {
    /// Create a panel spanning `width` pixels, bind its show/hide keys and
    /// make it visible.
    ///
    /// Right-aligned strings are measured once here, which relies on the
    /// panel font being monospace.
    pub fn new(
        settings: &DebugPanelSettings,
        width: f32,
        measure: &impl TextMeasure,
        host: &mut PanelHost,
    ) -> Self {
        host.bindings.bind_key(settings.show_key, SHOW_COMMAND);
        host.bindings.bind_key(settings.hide_key, HIDE_COMMAND);

        let mut panel = Self {
            state: VisibilityState::Hidden,
            position: Vec2::new(0.0, -PANEL_HEIGHT),
            size: Vec2::new(width, PANEL_HEIGHT),
            regions: settings.hit_regions.clone(),
            graph: MemoryGraph::new(settings.graph_color, settings.text_color),
            show_key: settings.show_key,
            hide_key: settings.hide_key,
            help_width: measure.measure(HELP_STR),
            fps_width: measure.measure(FPS_MEASURE_STR),
            draw_start: Duration::ZERO,
            draw_time: settings.draw_time,
            text_color: settings.text_color,
            background_color: settings.background_color,
        };
        panel.show(host);
        panel
    }

    /// Move the panel on screen and start listening for clicks.
    /// Does nothing when already visible.
    pub fn show(&mut self, host: &mut PanelHost) {
        if self.state == VisibilityState::Visible {
            return;
        }
        self.position.y = 0.0;
        host.pointer.register(host.owner);
        self.state = VisibilityState::Visible;
        host.repaint.request();
        debug!("debug panel shown");
    }

    /// Move the panel above the screen and stop listening for clicks.
    /// Does nothing when already hidden.
    pub fn hide(&mut self, host: &mut PanelHost) {
        if self.state == VisibilityState::Hidden {
            return;
        }
        self.position.y = -self.size.y;
        host.pointer.release(host.owner);
        self.state = VisibilityState::Hidden;
        host.repaint.request();
        debug!("debug panel hidden");
    }

    /// Per-frame update: apply the show/hide commands and stamp the start
    /// of the draw-time measurement.
    ///
    /// Should run after every other updater of the frame. Always returns
    /// `true` since the counters change every frame.
    pub fn update(&mut self, host: &mut PanelHost, now: Duration) -> bool {
        if host.bindings.is_pressed(SHOW_COMMAND) {
            self.show(host);
        } else if host.bindings.is_pressed(HIDE_COMMAND) {
            self.hide(host);
        }
        self.draw_start = now;
        true
    }

    /// Pointer-down handler. `point` is in screen coordinates.
    ///
    /// Inverts the flag of the first region under the pointer and always
    /// requests a repaint so the new debug visuals show up at once.
    pub fn on_click(
        &self,
        point: Vec2,
        toggles: &mut DebugToggles,
        repaint: &mut RepaintRequests,
    ) -> Option<ToggleFlag> {
        let local = point - self.position;
        let flag = self.regions.hit(local).map(|region| region.flag);
        if let Some(flag) = flag {
            let value = flag.toggle(toggles);
            debug!("{} set to {}", flag.name(), value);
        }
        repaint.request();
        flag
    }

    /// Render the panel in panel-local coordinates.
    pub fn draw(&mut self, surface: &mut impl Surface, frame: &PanelFrame) {
        let draw_time = match self.draw_time {
            DrawTimeSource::FrameDelta => frame.frame_time,
            DrawTimeSource::SinceUpdate => frame.now.saturating_sub(self.draw_start),
        };
        let width = self.size.x;
        let color = self.text_color;

        surface.fill_rect(Rect::from_corners(Vec2::ZERO, self.size), self.background_color);

        surface.text(
            &format!("#objects : {}", frame.counters.objects),
            Vec2::new(5.0, 5.0),
            color,
        );
        surface.text(
            &format!("#draws   : {}", frame.counters.draws),
            Vec2::new(5.0, 20.0),
            color,
        );

        let toggles = frame.toggles;
        let checkboxes = [
            ("?hitbox   ", toggles.render_hit_box, Vec2::new(100.0, 5.0)),
            ("?velocity ", toggles.render_velocity, Vec2::new(100.0, 20.0)),
            ("?dirtyRect  ", toggles.render_dirty, Vec2::new(200.0, 5.0)),
            ("?col. layer ", toggles.render_collision_map, Vec2::new(200.0, 20.0)),
        ];
        for (label, checked, at) in checkboxes {
            let glyph = if checked { "x" } else { " " };
            surface.text(&format!("{label}[{glyph}]"), at, color);
        }

        self.graph.draw(
            surface,
            GRAPH_START_X,
            width - self.help_width - GRAPH_RIGHT_MARGIN,
            frame.heap,
        );

        surface.text(
            HELP_STR,
            Vec2::new(width - self.help_width - TEXT_RIGHT_MARGIN, 20.0),
            color,
        );

        let fps = format!("{}/{} fps", frame.counters.fps, frame.counters.target_fps);
        surface.text(
            &fps,
            Vec2::new(width - self.fps_width - TEXT_RIGHT_MARGIN, 5.0),
            color,
        );

        surface.text(
            &format!("draw time : {}", draw_time.as_millis()),
            Vec2::new(GRAPH_START_X, 20.0),
            color,
        );
    }

    /// Teardown: hide (releasing the pointer subscription) and unbind both
    /// keys. Safe to call on a hidden panel.
    pub fn on_destroy(&mut self, host: &mut PanelHost) {
        self.hide(host);
        host.bindings.unbind_key(self.show_key);
        host.bindings.unbind_key(self.hide_key);
        info!("debug panel destroyed");
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == VisibilityState::Visible
    }

    /// Top-left corner in screen coordinates
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Follow a new screen width.
    pub fn set_width(&mut self, width: f32) {
        self.size.x = width.max(0.0);
    }

    /// Heap usage history behind the memory graph
    pub fn samples(&self) -> &SampleBuffer {
        self.graph.samples()
    }

    pub fn regions(&self) -> &HitRegionMap {
        &self.regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawList, MonospaceMetrics};
    use bevy::input::ButtonInput;

    #[derive(Default)]
    struct TestHost {
        bindings: InputBindings,
        pointer: PointerSubscriptions,
        repaint: RepaintRequests,
    }

    const OWNER: Entity = Entity::PLACEHOLDER;

    impl TestHost {
        fn host(&mut self) -> PanelHost<'_> {
            PanelHost {
                owner: OWNER,
                bindings: &mut self.bindings,
                pointer: &mut self.pointer,
                repaint: &mut self.repaint,
            }
        }

        fn press(&mut self, key: KeyCode) {
            let mut keyboard = ButtonInput::<KeyCode>::default();
            keyboard.press(key);
            self.bindings.latch(&keyboard);
        }

        fn release_all(&mut self) {
            self.bindings.latch(&ButtonInput::<KeyCode>::default());
        }
    }

    fn panel(host: &mut TestHost) -> DebugPanel {
        let settings = DebugPanelSettings::default();
        let metrics = MonospaceMetrics::for_font_size(settings.font_size, settings.glyph_advance);
        DebugPanel::new(&settings, 800.0, &metrics, &mut host.host())
    }

    fn frame<'a>(counters: &'a FrameCounters, toggles: &'a DebugToggles) -> PanelFrame<'a> {
        PanelFrame {
            counters,
            toggles,
            heap: None,
            now: Duration::from_millis(20),
            frame_time: Duration::from_millis(16),
        }
    }

    #[test]
    fn starts_visible_and_subscribed() {
        let mut host = TestHost::default();
        let panel = panel(&mut host);
        assert_eq!(panel.state(), VisibilityState::Visible);
        assert_eq!(panel.position(), Vec2::ZERO);
        assert_eq!(host.pointer.count_for(OWNER), 1);
        assert_eq!(host.bindings.binding(KeyCode::KeyS), Some(SHOW_COMMAND));
        assert_eq!(host.bindings.binding(KeyCode::KeyH), Some(HIDE_COMMAND));
    }

    #[test]
    fn subscription_tracks_visibility() {
        let mut host = TestHost::default();
        let mut panel = panel(&mut host);
        let ops = [false, false, true, true, false, true, false, false];
        for show in ops {
            if show {
                panel.show(&mut host.host());
            } else {
                panel.hide(&mut host.host());
            }
            let expected = usize::from(panel.is_visible());
            assert_eq!(host.pointer.count_for(OWNER), expected);
        }
    }

    #[test]
    fn redundant_transitions_are_no_ops() {
        let mut host = TestHost::default();
        let mut panel = panel(&mut host);
        let repaints = host.repaint.total();
        panel.show(&mut host.host());
        assert_eq!(host.repaint.total(), repaints);
        assert_eq!(panel.position(), Vec2::ZERO);

        panel.hide(&mut host.host());
        assert_eq!(panel.position(), Vec2::new(0.0, -PANEL_HEIGHT));
        let repaints = host.repaint.total();
        panel.hide(&mut host.host());
        assert_eq!(host.repaint.total(), repaints);
        assert_eq!(panel.state(), VisibilityState::Hidden);
    }

    #[test]
    fn update_follows_bound_keys() {
        let mut host = TestHost::default();
        let mut panel = panel(&mut host);

        host.press(KeyCode::KeyH);
        assert!(panel.update(&mut host.host(), Duration::ZERO));
        assert!(!panel.is_visible());

        host.release_all();
        panel.update(&mut host.host(), Duration::ZERO);
        assert!(!panel.is_visible());

        host.press(KeyCode::KeyS);
        panel.update(&mut host.host(), Duration::ZERO);
        assert!(panel.is_visible());
    }

    #[test]
    fn click_toggles_hit_box_back_and_forth() {
        let mut host = TestHost::default();
        let panel = panel(&mut host);
        let mut toggles = DebugToggles::default();
        let center = panel
            .regions()
            .region(ToggleFlag::RenderHitBox)
            .unwrap()
            .center();

        let hit = panel.on_click(center, &mut toggles, &mut host.repaint);
        assert_eq!(hit, Some(ToggleFlag::RenderHitBox));
        assert_eq!(
            toggles,
            DebugToggles {
                render_hit_box: true,
                ..Default::default()
            }
        );

        panel.on_click(center, &mut toggles, &mut host.repaint);
        assert_eq!(toggles, DebugToggles::default());
    }

    #[test]
    fn click_outside_regions_changes_nothing_but_repaints() {
        let mut host = TestHost::default();
        let panel = panel(&mut host);
        let mut toggles = DebugToggles::default();
        host.repaint.drain();

        let hit = panel.on_click(Vec2::new(5.0, 5.0), &mut toggles, &mut host.repaint);
        assert_eq!(hit, None);
        assert_eq!(toggles, DebugToggles::default());
        assert_eq!(host.repaint.pending(), 1);
    }

    #[test]
    fn draw_lays_out_counters_and_checkboxes() {
        let mut host = TestHost::default();
        let mut panel = panel(&mut host);
        let counters = FrameCounters {
            objects: 12,
            draws: 7,
            fps: 59,
            target_fps: 60,
        };
        let toggles = DebugToggles {
            render_velocity: true,
            ..Default::default()
        };
        let mut list = DrawList::default();
        panel.draw(&mut list, &frame(&counters, &toggles));

        let texts: Vec<_> = list.texts().collect();
        assert!(texts.contains(&"#objects : 12"));
        assert!(texts.contains(&"#draws   : 7"));
        assert!(texts.contains(&"?hitbox   [ ]"));
        assert!(texts.contains(&"?velocity [x]"));
        assert!(texts.contains(&"?dirtyRect  [ ]"));
        assert!(texts.contains(&"?col. layer [ ]"));
        assert!(texts.contains(&HEAP_UNAVAILABLE_LABEL));
        assert!(texts.contains(&"draw time : 16"));

        let metrics = MonospaceMetrics::for_font_size(10.0, 0.6);
        let help_x = 800.0 - metrics.measure(HELP_STR) - 5.0;
        let fps_x = 800.0 - metrics.measure(FPS_MEASURE_STR) - 5.0;
        assert_eq!(list.text_position(HELP_STR), Some(Vec2::new(help_x, 20.0)));
        assert_eq!(list.text_position("59/60 fps"), Some(Vec2::new(fps_x, 5.0)));
    }

    #[test]
    fn draw_without_heap_leaves_samples_alone() {
        let mut host = TestHost::default();
        let mut panel = panel(&mut host);
        let counters = FrameCounters::default();
        let toggles = DebugToggles::default();
        let mut list = DrawList::default();
        panel.draw(&mut list, &frame(&counters, &toggles));
        assert!(panel.samples().is_empty());
        assert_eq!(list.line_count(), 0);
    }

    #[test]
    fn draw_with_heap_samples_once_per_frame() {
        let mut host = TestHost::default();
        let mut panel = panel(&mut host);
        let counters = FrameCounters::default();
        let toggles = DebugToggles::default();
        let mut list = DrawList::default();
        let mut frame = frame(&counters, &toggles);
        frame.heap = Some(HeapUsage {
            used_mb: 50.0,
            total_mb: 100.0,
        });
        for _ in 0..3 {
            list.clear();
            panel.draw(&mut list, &frame);
        }
        assert_eq!(panel.samples().len(), 3);
        assert_eq!(panel.samples().latest(), Some(12.5));
        let metrics = MonospaceMetrics::for_font_size(10.0, 0.6);
        let graph_end = 800.0 - metrics.measure(HELP_STR) - GRAPH_RIGHT_MARGIN;
        assert_eq!(panel.samples().capacity(), (graph_end - GRAPH_START_X) as usize);
        assert!(list.texts().any(|t| t == "50/100 MB"));
    }

    #[test]
    fn since_update_measures_from_update_stamp() {
        let mut host = TestHost::default();
        let settings = DebugPanelSettings {
            draw_time: DrawTimeSource::SinceUpdate,
            ..Default::default()
        };
        let metrics = MonospaceMetrics::for_font_size(10.0, 0.6);
        let mut panel = DebugPanel::new(&settings, 800.0, &metrics, &mut host.host());
        panel.update(&mut host.host(), Duration::from_millis(100));

        let counters = FrameCounters::default();
        let toggles = DebugToggles::default();
        let mut list = DrawList::default();
        let mut frame = frame(&counters, &toggles);
        frame.now = Duration::from_millis(104);
        panel.draw(&mut list, &frame);
        assert!(list.texts().any(|t| t == "draw time : 4"));
    }

    #[test]
    fn destroy_releases_everything() {
        let mut host = TestHost::default();
        let mut panel = panel(&mut host);
        panel.on_destroy(&mut host.host());

        assert_eq!(host.pointer.count_for(OWNER), 0);
        assert!(!host.bindings.is_bound(SHOW_COMMAND));
        assert!(!host.bindings.is_bound(HIDE_COMMAND));

        host.press(KeyCode::KeyS);
        panel.update(&mut host.host(), Duration::ZERO);
        assert!(!panel.is_visible());

        // A second teardown is harmless.
        panel.on_destroy(&mut host.host());
        assert!(host.pointer.is_empty());
    }
}
