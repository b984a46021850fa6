//! Metric sources feeding the debug panel.
//!
//! Engine counters come straight from Bevy's diagnostics. Heap telemetry is
//! optional and pluggable through the [`HeapTelemetry`] trait: when the
//! active provider returns `None` the panel shows a placeholder instead of
//! the memory graph.

use bevy::{
    app::App,
    diagnostic::{
        DiagnosticsStore, EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin,
        SystemInformationDiagnosticsPlugin,
    },
    log::debug,
    prelude::Resource,
};

use crate::{
    constants::{BYTES_PER_MB, MB_PER_GIB},
    graph::HeapUsage,
};

/// Context passed to metric providers during sampling.
///
/// Contains references to Bevy's diagnostic systems and other resources
/// that providers might need to calculate their metric values.
#[derive(Clone, Copy)]
pub struct MetricSampleContext<'a> {
    /// Reference to Bevy's diagnostics store for built-in metrics
    pub diagnostics: Option<&'a DiagnosticsStore>,
}

/// Source of heap usage readings for the memory graph.
///
/// # Example
/// ```rust
/// use bevy_debug_panel::{HeapTelemetry, HeapUsage, MetricSampleContext};
///
/// struct ArenaTelemetry {
///     used: f64,
/// }
///
/// impl HeapTelemetry for ArenaTelemetry {
///     fn sample(&mut self, _ctx: MetricSampleContext) -> Option<HeapUsage> {
///         Some(HeapUsage { used_mb: self.used, total_mb: 256.0 })
///     }
/// }
/// ```
pub trait HeapTelemetry: Send + Sync + 'static {
    /// Current heap usage, or `None` when the platform does not expose it.
    fn sample(&mut self, ctx: MetricSampleContext) -> Option<HeapUsage>;
}

/// Provider for platforms without any heap telemetry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHeapTelemetry;

impl HeapTelemetry for NoHeapTelemetry {
    fn sample(&mut self, _ctx: MetricSampleContext) -> Option<HeapUsage> {
        None
    }
}

/// Physical memory of this machine in megabytes, read once through `sysinfo`.
fn detect_total_mb() -> Option<f64> {
    let mut system = sysinfo::System::new();
    system.refresh_memory();
    let total = system.total_memory();
    let total_mb = (total > 0).then(|| total as f64 / BYTES_PER_MB);
    if total_mb.is_none() {
        debug!("physical memory size unavailable, memory graph disabled");
    }
    total_mb
}

/// Default provider: memory used by this process against physical RAM.
///
/// The process figure comes from Bevy's system information diagnostics,
/// which refresh asynchronously, so sampling never blocks the frame. This
/// is the resident memory of the whole process, the closest portable
/// stand-in for a heap size.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessMemoryTelemetry {
    total_mb: Option<f64>,
}

impl ProcessMemoryTelemetry {
    /// Read the amount of physical memory of this machine.
    pub fn detect() -> Self {
        Self {
            total_mb: detect_total_mb(),
        }
    }

    /// Provider with a known total, in megabytes.
    pub fn with_total_mb(total_mb: f64) -> Self {
        Self {
            total_mb: (total_mb > 0.0).then_some(total_mb),
        }
    }

    pub fn total_mb(&self) -> Option<f64> {
        self.total_mb
    }
}

impl HeapTelemetry for ProcessMemoryTelemetry {
    fn sample(&mut self, ctx: MetricSampleContext) -> Option<HeapUsage> {
        let total_mb = self.total_mb?;
        let diagnostics = ctx.diagnostics?;
        let used_gib = diagnostics
            .get(&SystemInformationDiagnosticsPlugin::PROCESS_MEM_USAGE)?
            .value()?;
        Some(HeapUsage {
            used_mb: used_gib * MB_PER_GIB,
            total_mb,
        })
    }
}

/// Provider reporting memory in use across the whole system, every process
/// included, against physical RAM.
///
/// Useful to watch machine-wide memory pressure; it says nothing about this
/// app's own heap.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMemoryTelemetry {
    total_mb: Option<f64>,
}

impl SystemMemoryTelemetry {
    /// Read the amount of physical memory of this machine.
    pub fn detect() -> Self {
        Self {
            total_mb: detect_total_mb(),
        }
    }

    /// Provider with a known total, in megabytes.
    pub fn with_total_mb(total_mb: f64) -> Self {
        Self {
            total_mb: (total_mb > 0.0).then_some(total_mb),
        }
    }

    pub fn total_mb(&self) -> Option<f64> {
        self.total_mb
    }
}

impl HeapTelemetry for SystemMemoryTelemetry {
    fn sample(&mut self, ctx: MetricSampleContext) -> Option<HeapUsage> {
        let total_mb = self.total_mb?;
        let diagnostics = ctx.diagnostics?;
        let used_percent = diagnostics
            .get(&SystemInformationDiagnosticsPlugin::SYSTEM_MEM_USAGE)?
            .value()?;
        Some(HeapUsage {
            used_mb: total_mb * used_percent / 100.0,
            total_mb,
        })
    }
}

/// Resource holding the active heap telemetry provider.
#[derive(Resource)]
pub struct HeapTelemetrySource {
    provider: Box<dyn HeapTelemetry>,
}

impl HeapTelemetrySource {
    pub fn new<P: HeapTelemetry>(provider: P) -> Self {
        Self {
            provider: Box::new(provider),
        }
    }

    pub fn sample(&mut self, ctx: MetricSampleContext) -> Option<HeapUsage> {
        self.provider.sample(ctx)
    }
}

impl Default for HeapTelemetrySource {
    fn default() -> Self {
        Self::new(ProcessMemoryTelemetry::detect())
    }
}

/// Live entity count from the entity count diagnostic.
pub fn sample_entity_count(ctx: MetricSampleContext) -> Option<u32> {
    let diagnostics = ctx.diagnostics?;
    let entities = diagnostics
        .get(&EntityCountDiagnosticsPlugin::ENTITY_COUNT)?
        .value()?;
    Some(entities as u32)
}

/// Averaged frame rate, floored to a whole number.
pub fn sample_fps(ctx: MetricSampleContext) -> Option<u32> {
    let diagnostics = ctx.diagnostics?;
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)?
        .average()?;
    Some(fps.floor().max(0.0) as u32)
}

/// Extension trait for [`App`] to swap the heap telemetry provider.
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_debug_panel::{DebugPanelAppExt, DebugPanelPlugin, NoHeapTelemetry};
///
/// let mut app = App::new();
/// app.add_plugins(DefaultPlugins);
/// app.add_plugins(DebugPanelPlugin);
/// app.set_heap_telemetry(NoHeapTelemetry);
/// app.run();
/// ```
pub trait DebugPanelAppExt {
    /// Replace the heap telemetry provider used by the memory graph.
    fn set_heap_telemetry<P: HeapTelemetry>(&mut self, provider: P) -> &mut Self;
}

impl DebugPanelAppExt for App {
    fn set_heap_telemetry<P: HeapTelemetry>(&mut self, provider: P) -> &mut Self {
        self.insert_resource(HeapTelemetrySource::new(provider));
        self
    }
}
