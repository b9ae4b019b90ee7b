// Tabular visualizer.
// - Columns pick a record field by name and may declare a numeric type and alignment.
// - Numeric columns align right by default, everything else left.
// - Falsy cells (missing, null, false, 0, "") render blank.
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::VisualizerError,
    surface::VisualRegion,
    text::{Align, display_width, pad_to_width},
    visualizer::{Visualizer, VisualizerInstance},
};

use super::payload_body;

const KIND: &str = "table";
const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, Copy, Default)]
pub struct TableVisualizer;

impl Visualizer for TableVisualizer {
    fn create(
        &self,
        _region: &VisualRegion,
        payload: &Value,
    ) -> Result<Box<dyn VisualizerInstance>, VisualizerError> {
        Ok(Box::new(Table::from_payload(payload_body(payload))?))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct Column {
    label: String,
    source: String,
    #[serde(rename = "typeId", default)]
    type_id: Option<String>,
    #[serde(default)]
    align: Option<Align>,
}

impl Column {
    fn align(&self) -> Align {
        self.align.unwrap_or(match self.type_id.as_deref() {
            Some("decimalNumber" | "wholeNumber") => Align::Right,
            _ => Align::Left,
        })
    }
}

#[derive(Debug)]
struct Table {
    title: Option<String>,
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn from_payload(body: &Value) -> Result<Self, VisualizerError> {
        let columns = body
            .get("columns")
            .cloned()
            .ok_or_else(|| VisualizerError::invalid_payload(KIND, "missing columns"))?;
        let columns: Vec<Column> = serde_json::from_value(columns)
            .map_err(|err| VisualizerError::invalid_payload(KIND, err.to_string()))?;

        let records: &[Value] = match body.get("data") {
            None | Some(Value::Null) => &[],
            Some(Value::Array(records)) => records,
            Some(_) => return Err(VisualizerError::invalid_payload(KIND, "data must be an array")),
        };

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| {
                        let value = record.get(&column.source).unwrap_or(&Value::Null);
                        format_cell_value(column.type_id.as_deref(), value)
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            title: body.get("title").and_then(Value::as_str).map(str::to_string),
            columns,
            rows,
        })
    }

    fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                self.rows
                    .iter()
                    .map(|row| display_width(&row[index]))
                    .chain(std::iter::once(display_width(&column.label)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

impl VisualizerInstance for Table {
    fn show(&mut self, region: &mut VisualRegion) -> Result<(), VisualizerError> {
        region.set_title(self.title.clone().unwrap_or_else(|| "Table".to_string()));

        let widths = self.column_widths();
        let header_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let mut header = Vec::new();
        for (index, (column, width)) in self.columns.iter().zip(&widths).enumerate() {
            if index > 0 {
                header.push(Span::raw(COLUMN_GAP));
            }
            header.push(Span::styled(
                pad_to_width(&column.label, *width, column.align()),
                header_style,
            ));
        }
        region.push_line(Line::from(header));

        let total_width =
            widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);
        region.push_line(Line::styled(
            "─".repeat(total_width),
            Style::default().fg(Color::DarkGray),
        ));

        if self.rows.is_empty() {
            region.push_line(Line::styled("No rows", Style::default().fg(Color::DarkGray)));
            return Ok(());
        }

        for row in &self.rows {
            let cells = row
                .iter()
                .zip(&self.columns)
                .zip(&widths)
                .map(|((cell, column), width)| pad_to_width(cell, *width, column.align()))
                .collect::<Vec<_>>();
            region.push_line(Line::from(cells.join(COLUMN_GAP)));
        }
        Ok(())
    }
}

pub fn format_cell_value(type_id: Option<&str>, value: &Value) -> String {
    if is_falsy(value) {
        return String::new();
    }

    match (type_id, value) {
        (Some("decimalNumber"), Value::Number(number)) => number
            .as_f64()
            .map(|value| format_number(value, 2, 2))
            .unwrap_or_default(),
        (_, Value::Number(number)) => {
            if let Some(value) = number.as_i64() {
                let sign = if value < 0 { "-" } else { "" };
                format!("{sign}{}", group_thousands(&value.unsigned_abs().to_string()))
            } else if let Some(value) = number.as_u64() {
                group_thousands(&value.to_string())
            } else {
                number
                    .as_f64()
                    .map(|value| format_number(value, 0, 3))
                    .unwrap_or_default()
            }
        }
        (_, Value::String(text)) => text.clone(),
        (_, other) => other.to_string(),
    }
}

/// Fixed-point rendering with thousands separators and trailing zeros trimmed to `min_fraction`.
pub(super) fn format_number(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    let fixed = format!("{:.*}", max_fraction, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut fraction = frac_part.trim_end_matches('0').to_string();
    while fraction.len() < min_fraction {
        fraction.push('0');
    }

    let is_zero = fixed.chars().all(|ch| ch == '0' || ch == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    let grouped = group_thousands(int_part);
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().is_some_and(|value| value == 0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
