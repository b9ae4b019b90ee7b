// Bundled visualizers.
// - Each one parses its payload when created and renders styled lines on show.
// - Registered by kind in `VisualizerRegistry::with_defaults`.
mod bar_chart;
mod table;

use serde_json::Value;

pub use bar_chart::BarChartVisualizer;
pub use table::{TableVisualizer, format_cell_value};

/// Visual data lives either under a nested `payload` key or directly on the item.
fn payload_body(payload: &Value) -> &Value {
    match payload.get("payload") {
        Some(body @ Value::Object(_)) => body,
        _ => payload,
    }
}
