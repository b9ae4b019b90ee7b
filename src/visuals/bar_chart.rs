// Horizontal bar chart drawn with block glyphs.
// - Bars are scaled against the largest value in the series.
// - Negative values draw no bar but still print their value.
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::VisualizerError,
    surface::VisualRegion,
    text::{Align, display_width, pad_to_width, truncate_middle_with_ellipsis},
    visualizer::{Visualizer, VisualizerInstance},
};

use super::{payload_body, table::format_number};

const KIND: &str = "bar chart";
const DEFAULT_BAR_WIDTH: usize = 40;
const MAX_BAR_WIDTH: usize = 200;
const MAX_LABEL_WIDTH: usize = 20;
const BAR_GLYPH: &str = "█";

#[derive(Debug, Clone, Copy, Default)]
pub struct BarChartVisualizer;

impl Visualizer for BarChartVisualizer {
    fn create(
        &self,
        _region: &VisualRegion,
        payload: &Value,
    ) -> Result<Box<dyn VisualizerInstance>, VisualizerError> {
        Ok(Box::new(BarChart::from_payload(payload_body(payload))?))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct Point {
    #[serde(default)]
    label: String,
    value: f64,
}

#[derive(Debug)]
struct BarChart {
    title: Option<String>,
    points: Vec<Point>,
    bar_width: usize,
}

impl BarChart {
    fn from_payload(body: &Value) -> Result<Self, VisualizerError> {
        let series = body
            .get("series")
            .cloned()
            .ok_or_else(|| VisualizerError::invalid_payload(KIND, "missing series"))?;
        let points: Vec<Point> = serde_json::from_value(series)
            .map_err(|err| VisualizerError::invalid_payload(KIND, err.to_string()))?;

        let bar_width = body
            .get("width")
            .and_then(Value::as_u64)
            .map_or(DEFAULT_BAR_WIDTH, |width| (width as usize).clamp(1, MAX_BAR_WIDTH));

        Ok(Self {
            title: body.get("title").and_then(Value::as_str).map(str::to_string),
            points,
            bar_width,
        })
    }

    fn bar_len(&self, value: f64, max: f64) -> usize {
        if max <= 0.0 || value <= 0.0 {
            return 0;
        }
        ((value / max) * self.bar_width as f64).round() as usize
    }
}

impl VisualizerInstance for BarChart {
    fn show(&mut self, region: &mut VisualRegion) -> Result<(), VisualizerError> {
        if let Some(title) = &self.title {
            region.set_title(title.clone());
        }
        if self.points.is_empty() {
            region.push_line(Line::styled("No data", Style::default().fg(Color::DarkGray)));
            return Ok(());
        }

        let label_width = self
            .points
            .iter()
            .map(|point| display_width(&point.label))
            .max()
            .unwrap_or(0)
            .min(MAX_LABEL_WIDTH);
        let max = self
            .points
            .iter()
            .map(|point| point.value)
            .fold(f64::NEG_INFINITY, f64::max);

        for point in &self.points {
            let label = truncate_middle_with_ellipsis(&point.label, label_width);
            let bar = BAR_GLYPH.repeat(self.bar_len(point.value, max));
            region.push_line(Line::from(vec![
                Span::raw(pad_to_width(&label, label_width, Align::Left)),
                Span::raw(" "),
                Span::styled(bar, Style::default().fg(Color::Cyan)),
                Span::raw(" "),
                Span::styled(
                    format_number(point.value, 0, 2),
                    Style::default().fg(Color::Gray),
                ),
            ]));
        }
        Ok(())
    }
}
