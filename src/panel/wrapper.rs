use serde_json::Value;

use crate::{
    config::PanelConfig, error::PanelError, model::VisualItem, surface::Surface,
    visualizer::VisualizerRegistry,
};

use super::PanelController;

/// Presents a whole panel through the same show/resize surface a single visual has.
#[derive(Debug)]
pub struct PanelVisualizer<S: Surface> {
    panel: PanelController<S>,
}

impl<S: Surface> PanelVisualizer<S> {
    pub fn new(
        surface: S,
        input: &Value,
        registry: &VisualizerRegistry,
        config: PanelConfig,
    ) -> Self {
        Self {
            panel: PanelController::new(surface, input, registry, config),
        }
    }

    /// Installs a hook told about every tab the panel activates.
    pub fn with_activation_hook(mut self, hook: impl FnMut(&VisualItem) + 'static) -> Self {
        self.panel = self.panel.with_activation_hook(hook);
        self
    }

    pub fn show(&mut self) -> Result<&mut Self, PanelError> {
        self.panel.show()?;
        Ok(self)
    }

    /// Reserved for layout recalculation; currently does nothing.
    pub fn resize(&mut self, _input: &Value) -> &mut Self {
        self
    }

    pub fn panel(&self) -> &PanelController<S> {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut PanelController<S> {
        &mut self.panel
    }
}
