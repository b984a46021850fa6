//! Unit tests for the metric providers
//!
//! These tests verify the counter and heap telemetry readings, and that
//! they degrade to `None` when the data behind them is unavailable.

use std::time::Instant;

use bevy::diagnostic::{
    Diagnostic, DiagnosticMeasurement, DiagnosticPath, DiagnosticsStore,
    SystemInformationDiagnosticsPlugin,
};
use bevy_debug_panel::{
    sample_entity_count, sample_fps, HeapTelemetry, HeapUsage, MetricSampleContext,
    NoHeapTelemetry, ProcessMemoryTelemetry, SystemMemoryTelemetry,
};

fn store_with(path: DiagnosticPath, value: f64) -> DiagnosticsStore {
    let mut diagnostics = DiagnosticsStore::default();
    diagnostics.add(Diagnostic::new(path.clone()));
    diagnostics
        .get_mut(&path)
        .unwrap()
        .add_measurement(DiagnosticMeasurement {
            time: Instant::now(),
            value,
        });
    diagnostics
}

#[test]
fn counters_handle_missing_diagnostics_gracefully() {
    let ctx = MetricSampleContext { diagnostics: None };

    assert_eq!(sample_entity_count(ctx), None);
    assert_eq!(sample_fps(ctx), None);
}

#[test]
fn counters_handle_empty_diagnostics_gracefully() {
    let diagnostics = DiagnosticsStore::default();
    let ctx = MetricSampleContext {
        diagnostics: Some(&diagnostics),
    };

    assert_eq!(sample_entity_count(ctx), None);
    assert_eq!(sample_fps(ctx), None);
}

#[test]
fn no_heap_telemetry_never_reports() {
    let diagnostics = DiagnosticsStore::default();
    let mut provider = NoHeapTelemetry;

    assert_eq!(provider.sample(MetricSampleContext { diagnostics: None }), None);
    assert_eq!(
        provider.sample(MetricSampleContext {
            diagnostics: Some(&diagnostics)
        }),
        None
    );
}

#[test]
fn system_memory_needs_usage_diagnostic() {
    let diagnostics = DiagnosticsStore::default();
    let mut provider = SystemMemoryTelemetry::with_total_mb(1024.0);
    assert_eq!(provider.total_mb(), Some(1024.0));

    let ctx = MetricSampleContext {
        diagnostics: Some(&diagnostics),
    };
    assert_eq!(provider.sample(ctx), None);
}

#[test]
fn system_memory_without_total_is_unavailable() {
    let provider = SystemMemoryTelemetry::with_total_mb(0.0);
    assert_eq!(provider.total_mb(), None);
}

#[test]
fn process_memory_reports_the_process_share() {
    let diagnostics = store_with(SystemInformationDiagnosticsPlugin::PROCESS_MEM_USAGE, 0.5);
    let mut provider = ProcessMemoryTelemetry::with_total_mb(1024.0);
    let ctx = MetricSampleContext {
        diagnostics: Some(&diagnostics),
    };

    assert_eq!(
        provider.sample(ctx),
        Some(HeapUsage {
            used_mb: 512.0,
            total_mb: 1024.0
        })
    );
}

#[test]
fn process_memory_ignores_system_wide_usage() {
    let diagnostics = store_with(SystemInformationDiagnosticsPlugin::SYSTEM_MEM_USAGE, 90.0);
    let mut provider = ProcessMemoryTelemetry::with_total_mb(1024.0);
    let ctx = MetricSampleContext {
        diagnostics: Some(&diagnostics),
    };

    assert_eq!(provider.sample(ctx), None);
}

#[test]
fn system_memory_scales_usage_percent() {
    let diagnostics = store_with(SystemInformationDiagnosticsPlugin::SYSTEM_MEM_USAGE, 25.0);
    let mut provider = SystemMemoryTelemetry::with_total_mb(1024.0);
    let ctx = MetricSampleContext {
        diagnostics: Some(&diagnostics),
    };

    assert_eq!(
        provider.sample(ctx).map(|usage| usage.used_mb),
        Some(256.0)
    );
}
