// Visualizer capability consumed by the panel.
// - A `Visualizer` builds an instance for a region and an opaque payload.
// - Instances render synchronously into the region they are shown in.
// - The registry resolves item kinds to visualizers during classification.
use std::{collections::HashMap, fmt, rc::Rc};

use serde_json::Value;

use crate::{
    error::VisualizerError,
    surface::VisualRegion,
    visuals::{BarChartVisualizer, TableVisualizer},
};

pub trait VisualizerInstance {
    fn show(&mut self, region: &mut VisualRegion) -> Result<(), VisualizerError>;

    /// Layout recalculation hook. Must not fail; the default does nothing.
    fn resize(&mut self, _payload: &Value) {}
}

pub trait Visualizer {
    fn create(
        &self,
        region: &VisualRegion,
        payload: &Value,
    ) -> Result<Box<dyn VisualizerInstance>, VisualizerError>;
}

impl<F> Visualizer for F
where
    F: Fn(&VisualRegion, &Value) -> Result<Box<dyn VisualizerInstance>, VisualizerError>,
{
    fn create(
        &self,
        region: &VisualRegion,
        payload: &Value,
    ) -> Result<Box<dyn VisualizerInstance>, VisualizerError> {
        self(region, payload)
    }
}

#[derive(Clone, Default)]
pub struct VisualizerRegistry {
    visualizers: HashMap<String, Rc<dyn Visualizer>>,
}

impl VisualizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let chart: Rc<dyn Visualizer> = Rc::new(BarChartVisualizer);
        for kind in ["bar", "chartJS", "eCharts", "highcharts"] {
            registry.register_shared(kind, Rc::clone(&chart));
        }
        registry.register("table", TableVisualizer);
        registry
    }

    pub fn register(&mut self, kind: impl Into<String>, visualizer: impl Visualizer + 'static) {
        self.register_shared(kind, Rc::new(visualizer));
    }

    pub fn register_shared(&mut self, kind: impl Into<String>, visualizer: Rc<dyn Visualizer>) {
        self.visualizers.insert(kind.into(), visualizer);
    }

    pub fn get(&self, kind: &str) -> Option<Rc<dyn Visualizer>> {
        self.visualizers.get(kind).cloned()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.visualizers.contains_key(kind)
    }
}

impl fmt::Debug for VisualizerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds = self.visualizers.keys().collect::<Vec<_>>();
        kinds.sort();
        f.debug_struct("VisualizerRegistry")
            .field("kinds", &kinds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo(String);

    impl VisualizerInstance for Echo {
        fn show(&mut self, region: &mut VisualRegion) -> Result<(), VisualizerError> {
            region.push_line(self.0.clone());
            Ok(())
        }
    }

    #[test]
    fn test_closure_is_a_visualizer() {
        let mut registry = VisualizerRegistry::new();
        registry.register(
            "echo",
            |_region: &VisualRegion, payload: &Value| -> Result<Box<dyn VisualizerInstance>, VisualizerError> {
                Ok(Box::new(Echo(payload["text"].as_str().unwrap_or_default().to_string())))
            },
        );

        let producer = registry.get("echo").unwrap();
        let mut region = VisualRegion::new(4);
        let mut instance = producer
            .create(&region, &serde_json::json!({ "text": "hi" }))
            .unwrap();
        instance.show(&mut region).unwrap();
        instance.resize(&Value::Null);

        assert_eq!(region.text_lines(), vec!["hi".to_string()]);
    }

    #[test]
    fn test_defaults_cover_vendor_kinds() {
        let registry = VisualizerRegistry::with_defaults();
        for kind in ["bar", "chartJS", "eCharts", "highcharts", "table"] {
            assert!(registry.contains(kind), "missing {kind}");
        }
        assert!(registry.get("vega").is_none());
    }
}
