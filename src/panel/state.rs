// Mutable selection state owned by a single panel controller.
// - Tracks the active tab index and the one live visualizer instance.
// - Replacing the instance drops the previous one; nothing else tears it down.
use std::fmt;

use serde_json::Value;

use crate::{error::VisualizerError, surface::VisualRegion, visualizer::VisualizerInstance};

#[derive(Default)]
pub(crate) struct PanelState {
    active: Option<usize>,
    current: Option<Box<dyn VisualizerInstance>>,
}

impl PanelState {
    pub(crate) fn reset(&mut self) {
        self.active = None;
        self.current = None;
    }

    pub(crate) fn select(&mut self, index: usize) {
        self.active = Some(index);
    }

    pub(crate) fn active(&self) -> Option<usize> {
        self.active
    }

    pub(crate) fn discard_instance(&mut self) {
        self.current = None;
    }

    pub(crate) fn replace_instance(&mut self, instance: Box<dyn VisualizerInstance>) {
        self.current = Some(instance);
    }

    pub(crate) fn has_instance(&self) -> bool {
        self.current.is_some()
    }

    pub(crate) fn resize_instance(&mut self, payload: &Value) -> bool {
        match self.current.as_mut() {
            Some(instance) => {
                instance.resize(payload);
                true
            }
            None => false,
        }
    }

    pub(crate) fn reshow_instance(&mut self, region: &mut VisualRegion) -> Result<bool, VisualizerError> {
        match self.current.as_mut() {
            Some(instance) => instance.show(region).map(|()| true),
            None => Ok(false),
        }
    }
}

impl fmt::Debug for PanelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelState")
            .field("active", &self.active)
            .field("has_instance", &self.has_instance())
            .finish()
    }
}
