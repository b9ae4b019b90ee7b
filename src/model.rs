// Classified panel input shared by the controller, the host app and rendering.
// - Raw JSON is inspected exactly once; everything downstream matches on `PanelInput`.
// - Items keep their whole source element as an opaque payload for the visualizer.
// - Producers are resolved from the registry while classifying.
use std::{fmt, rc::Rc};

use serde_json::Value;

use crate::visualizer::{Visualizer, VisualizerRegistry};

#[derive(Clone)]
pub struct VisualItem {
    pub kind: String,
    pub index: Option<usize>,
    pub producer: Option<Rc<dyn Visualizer>>,
    pub payload: Value,
}

impl VisualItem {
    pub fn from_value(value: &Value, registry: &VisualizerRegistry) -> Self {
        let kind = value
            .get("kind")
            .and_then(Value::as_str)
            .or_else(|| value.get("typeId").and_then(Value::as_str))
            .unwrap_or_default()
            .to_string();
        let producer = registry.get(&kind);

        Self {
            kind,
            index: None,
            producer,
            payload: value.clone(),
        }
    }

    pub fn has_producer(&self) -> bool {
        self.producer.is_some()
    }

    /// Host identifier carried in the payload as `id`, falling back to `notebookId`.
    pub fn id(&self) -> Option<&str> {
        self.payload
            .get("id")
            .and_then(Value::as_str)
            .or_else(|| self.payload.get("notebookId").and_then(Value::as_str))
    }
}

impl fmt::Debug for VisualItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisualItem")
            .field("kind", &self.kind)
            .field("index", &self.index)
            .field("producer", &self.producer.as_ref().map(|_| "<visualizer>"))
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    Empty,
    Single,
    Multiple,
}

impl PanelMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Single => "single",
            Self::Multiple => "multiple",
        }
    }
}

impl fmt::Display for PanelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default)]
pub enum PanelInput {
    #[default]
    Empty,
    Single(VisualItem),
    Multiple(Vec<VisualItem>),
}

impl PanelInput {
    /// Arrays are checked before objects; every other value is empty.
    pub fn classify(value: &Value, registry: &VisualizerRegistry) -> Self {
        match value {
            Value::Array(elements) => Self::Multiple(
                elements
                    .iter()
                    .enumerate()
                    .map(|(index, element)| VisualItem {
                        index: Some(index),
                        ..VisualItem::from_value(element, registry)
                    })
                    .collect(),
            ),
            Value::Object(_) => Self::Single(VisualItem::from_value(value, registry)),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Self::Empty,
        }
    }

    pub fn mode(&self) -> PanelMode {
        match self {
            Self::Empty => PanelMode::Empty,
            Self::Single(_) => PanelMode::Single,
            Self::Multiple(_) => PanelMode::Multiple,
        }
    }

    pub fn items(&self) -> &[VisualItem] {
        match self {
            Self::Empty => &[],
            Self::Single(item) => std::slice::from_ref(item),
            Self::Multiple(items) => items,
        }
    }

    pub fn tab_count(&self) -> usize {
        match self {
            Self::Multiple(items) => items.len(),
            _ => 0,
        }
    }
}
