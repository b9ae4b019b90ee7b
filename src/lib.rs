// Tabbed visual panels for the terminal.
// - A JSON value shows nothing, one visual, or a strip of tabs over alternative visuals:
//   `null`/scalars -> placeholder, `{ "kind": .. }` -> single region, `[ {..}, {..} ]` -> tabs + "Options".
// - Rendering goes through the `Surface` trait, so the controller runs headless.
// - The `vispanel` binary draws a `MountPoint` with ratatui.
pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod panel;
pub mod surface;
pub mod text;
pub mod ui;
pub mod visualizer;
pub mod visuals;

pub use config::{PanelConfig, TabCatalog, TabStyle};
pub use error::{ConfigError, DocumentError, PanelError, VisualizerError};
pub use model::{PanelInput, PanelMode, VisualItem};
pub use panel::{ActivationHook, PanelController, PanelEvent, PanelVisualizer, TabTarget};
pub use surface::{Container, MountPoint, Surface, TabControlId, VisualRegion};
pub use visualizer::{Visualizer, VisualizerInstance, VisualizerRegistry};
