//! Constants used throughout the bevy_debug_panel plugin.
//!
//! This module centralizes the panel geometry, literal strings and command
//! identifiers shared by the panel, its graph and the Bevy systems.

/// Height of the panel in pixels (the panel always spans the full width)
pub const PANEL_HEIGHT: f32 = 35.0;

/// Y coordinate (panel-local) of the memory graph baseline
pub const GRAPH_BASELINE_Y: f32 = 30.0;

/// Height of the memory graph in pixels; samples are scaled to 0..GRAPH_HEIGHT
pub const GRAPH_HEIGHT: f32 = 25.0;

/// Left edge (panel-local) of the memory graph and its label
pub const GRAPH_START_X: f32 = 300.0;

/// Gap between the right end of the graph and the help string
pub const GRAPH_RIGHT_MARGIN: f32 = 15.0;

/// Gap between right-aligned text and the right edge of the panel
pub const TEXT_RIGHT_MARGIN: f32 = 5.0;

/// Help string drawn right-aligned on the second text row
pub const HELP_STR: &str = "(s)how/(h)ide";

/// Widest expected FPS string, measured once to right-align the FPS counter
pub const FPS_MEASURE_STR: &str = "00/00 fps";

/// Label drawn in place of the memory graph when no heap telemetry exists
pub const HEAP_UNAVAILABLE_LABEL: &str = "??/?? MB";

/// Logical input command that shows the panel
pub const SHOW_COMMAND: &str = "show";

/// Logical input command that hides the panel
pub const HIDE_COMMAND: &str = "hide";

/// Bytes per megabyte used when converting memory telemetry
pub const BYTES_PER_MB: f64 = 1_048_576.0;

/// Megabytes per gibibyte; Bevy reports process memory in GiB
pub const MB_PER_GIB: f64 = 1024.0;

/// Name given to the panel entity
pub const PANEL_ENTITY_NAME: &str = "debug_panel";

/// Default hit rectangles as (x, y, width, height) in panel-local pixels
pub const HIT_BOX_AREA: (f32, f32, f32, f32) = (160.0, 5.0, 15.0, 15.0);
pub const VELOCITY_AREA: (f32, f32, f32, f32) = (165.0, 25.0, 15.0, 15.0);
pub const DIRTY_AREA: (f32, f32, f32, f32) = (270.0, 5.0, 15.0, 15.0);
pub const COLLISION_MAP_AREA: (f32, f32, f32, f32) = (270.0, 25.0, 15.0, 15.0);
