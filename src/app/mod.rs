// Host application state around a single panel.
// - Loads the JSON document and owns the panel mounted for this session.
// - Turns panel results into status-line text; failures never stop the loop.
// - Remembers where tab controls were drawn so mouse clicks can find them.
mod document;
mod input;

use std::{
    cell::{Cell, RefCell},
    path::{Path, PathBuf},
};

use ratatui::layout::{Position, Rect};
use serde_json::Value;

use crate::{
    config::PanelConfig,
    error::{DocumentError, PanelError},
    model::{PanelMode, VisualItem},
    panel::{PanelEvent, PanelVisualizer, TabTarget},
    surface::{Container, MountPoint, Surface, TabControlId},
    visualizer::VisualizerRegistry,
};

pub use self::document::load_document;
pub use self::input::Flow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabHit {
    pub area: Rect,
    pub target: TabTarget,
}

pub struct App {
    document: Option<PathBuf>,
    registry: VisualizerRegistry,
    config: PanelConfig,
    panel: PanelVisualizer<MountPoint>,
    pub(crate) show_keybinds: bool,
    keybinds_scroll: Cell<usize>,
    pub(crate) status_message: String,
    tab_hits: RefCell<Vec<TabHit>>,
}

impl App {
    pub fn new(
        document: Option<PathBuf>,
        config: PanelConfig,
        registry: VisualizerRegistry,
    ) -> Result<Self, DocumentError> {
        let value = load_document(document.as_deref())?;
        let mut app = Self::from_value(&value, config, registry);
        app.document = document;
        Ok(app)
    }

    pub fn from_value(value: &Value, config: PanelConfig, registry: VisualizerRegistry) -> Self {
        let panel = build_panel(value, &registry, &config);
        let mut app = Self {
            document: None,
            registry,
            config,
            panel,
            show_keybinds: false,
            keybinds_scroll: Cell::new(0),
            status_message: String::new(),
            tab_hits: RefCell::new(Vec::new()),
        };
        app.show_panel();
        app
    }

    pub fn document(&self) -> Option<&Path> {
        self.document.as_deref()
    }

    pub fn mount(&self) -> &MountPoint {
        self.panel.panel().surface()
    }

    pub fn panel(&self) -> &PanelVisualizer<MountPoint> {
        &self.panel
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn reload(&mut self) -> Result<(), DocumentError> {
        let value = load_document(self.document.as_deref())?;
        self.panel = build_panel(&value, &self.registry, &self.config);
        self.tab_hits.borrow_mut().clear();
        self.show_panel();
        tracing::info!(document = ?self.document, "Reloaded panel document");
        Ok(())
    }

    pub fn activate_tab(&mut self, index: usize) {
        match self.panel.panel_mut().activate(index) {
            Ok(()) => self.status_message = self.describe_active_tab(),
            Err(err) => self.report(&err),
        }
    }

    pub fn select_next_tab(&mut self) {
        if let Some(index) = self.panel.panel().next_index() {
            self.activate_tab(index);
        }
    }

    pub fn select_previous_tab(&mut self) {
        if let Some(index) = self.panel.panel().previous_index() {
            self.activate_tab(index);
        }
    }

    pub fn select_tab_by_number(&mut self, number: usize) -> bool {
        let count = self.panel.panel().input().tab_count();
        if number == 0 || number > count {
            return false;
        }
        self.activate_tab(number - 1);
        true
    }

    pub fn request_options(&mut self) {
        if self.panel.panel().mode() != PanelMode::Multiple {
            return;
        }
        let event = self.panel.panel().options();
        self.apply_event(event);
    }

    pub fn click_at(&mut self, column: u16, row: u16) -> bool {
        let position = Position::new(column, row);
        let Some(hit) = self
            .tab_hits
            .borrow()
            .iter()
            .find(|hit| hit.area.contains(position))
            .copied()
        else {
            return false;
        };

        match self.panel.panel_mut().click(hit.target) {
            Ok(event) => self.apply_event(event),
            Err(err) => self.report(&err),
        }
        true
    }

    pub fn on_resize(&mut self) {
        match self.panel.panel_mut().relayout() {
            Ok(_) => {}
            Err(err) => self.report(&err),
        }
    }

    pub(crate) fn record_tab_hits(&self, hits: Vec<TabHit>) {
        *self.tab_hits.borrow_mut() = hits;
    }

    pub fn tab_hits(&self) -> Vec<TabHit> {
        self.tab_hits.borrow().clone()
    }

    pub fn toggle_keybinds(&mut self) {
        self.show_keybinds = !self.show_keybinds;
        self.keybinds_scroll.set(0);
    }

    pub fn hide_keybinds(&mut self) {
        self.show_keybinds = false;
    }

    pub fn scroll_keybinds_down(&mut self) {
        self.keybinds_scroll.set(self.keybinds_scroll.get() + 1);
    }

    pub fn scroll_keybinds_up(&mut self) {
        self.keybinds_scroll
            .set(self.keybinds_scroll.get().saturating_sub(1));
    }

    pub(crate) fn clamp_keybinds_scroll(&self, max_scroll_top: usize) -> usize {
        let clamped = self.keybinds_scroll.get().min(max_scroll_top);
        self.keybinds_scroll.set(clamped);
        clamped
    }

    fn show_panel(&mut self) {
        match self.panel.show() {
            Ok(_) => self.status_message = self.describe_panel(),
            Err(err) => self.report(&err),
        }
    }

    fn apply_event(&mut self, event: PanelEvent) {
        self.status_message = match event {
            PanelEvent::Activated(_) => self.describe_active_tab(),
            PanelEvent::OptionsRequested => "Options are not available for this panel yet.".to_string(),
        };
    }

    fn report(&mut self, err: &PanelError) {
        tracing::warn!(error = %err, "Panel action failed");
        self.status_message = format!("Error: {err}");
    }

    fn describe_panel(&self) -> String {
        let panel = self.panel.panel();
        match panel.mode() {
            PanelMode::Empty => "Nothing to visualize.".to_string(),
            PanelMode::Single => match panel.active_item() {
                Some(item) if item.has_producer() => {
                    format!("Showing {}.", self.config.tabs.style_for(&item.kind).label)
                }
                Some(item) => format!("No visualizer for kind '{}'.", item.kind),
                None => String::new(),
            },
            PanelMode::Multiple if panel.input().tab_count() == 0 => {
                "Panel has no visuals.".to_string()
            }
            PanelMode::Multiple => self.describe_active_tab(),
        }
    }

    fn describe_active_tab(&self) -> String {
        let panel = self.panel.panel();
        let Some(index) = panel.active_index() else {
            return String::new();
        };
        let count = panel.input().tab_count();
        let label = self
            .mount()
            .container()
            .and_then(Container::tabs)
            .and_then(|tabs| tabs.control(TabControlId::new(index)))
            .map(|control| control.label().to_string())
            .unwrap_or_default();

        if panel.has_visualizer() {
            format!("Showing {label} ({}/{count}).", index + 1)
        } else {
            format!("{label} ({}/{count}) has nothing to show.", index + 1)
        }
    }
}

fn build_panel(
    value: &Value,
    registry: &VisualizerRegistry,
    config: &PanelConfig,
) -> PanelVisualizer<MountPoint> {
    PanelVisualizer::new(MountPoint::new(), value, registry, config.clone()).with_activation_hook(
        |item: &VisualItem| {
            tracing::debug!(kind = %item.kind, id = item.id().unwrap_or_default(), "Visual item activated");
        },
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn app(value: Value) -> App {
        App::from_value(&value, PanelConfig::default(), VisualizerRegistry::with_defaults())
    }

    fn charts() -> Value {
        json!([
            { "kind": "chartJS", "series": [{ "label": "a", "value": 1 }] },
            { "kind": "eCharts", "series": [{ "label": "b", "value": 2 }] },
            { "kind": "vega" }
        ])
    }

    #[test]
    fn test_new_app_shows_first_tab() {
        let app = app(charts());
        assert_eq!(app.panel().panel().active_index(), Some(0));
        assert_eq!(app.status_message(), "Showing Chart.js (1/3).");
    }

    #[test]
    fn test_tab_navigation_wraps() {
        let mut app = app(charts());
        app.select_previous_tab();
        assert_eq!(app.panel().panel().active_index(), Some(2));
        assert_eq!(app.status_message(), "vega (3/3) has nothing to show.");

        app.select_next_tab();
        assert_eq!(app.panel().panel().active_index(), Some(0));
    }

    #[test]
    fn test_select_by_number_checks_range() {
        let mut app = app(charts());
        assert!(app.select_tab_by_number(2));
        assert_eq!(app.panel().panel().active_index(), Some(1));
        assert!(!app.select_tab_by_number(0));
        assert!(!app.select_tab_by_number(4));
        assert_eq!(app.panel().panel().active_index(), Some(1));
    }

    #[test]
    fn test_render_failure_is_reported() {
        let app = app(json!([{ "kind": "table", "data": [] }]));
        assert!(app.status_message().starts_with("Error: Visualizer error"));
        assert!(!app.panel().panel().has_visualizer());
    }

    #[test]
    fn test_options_only_on_tabbed_panels() {
        let mut single = app(json!({ "kind": "chartJS", "series": [] }));
        let before = single.status_message().to_string();
        single.request_options();
        assert_eq!(single.status_message(), before);

        let mut tabbed = app(charts());
        tabbed.request_options();
        assert_eq!(
            tabbed.status_message(),
            "Options are not available for this panel yet."
        );
    }

    #[test]
    fn test_click_uses_recorded_hits() {
        let mut app = app(charts());
        app.record_tab_hits(vec![
            TabHit {
                area: Rect::new(1, 5, 10, 1),
                target: TabTarget::Tab(TabControlId::new(0)),
            },
            TabHit {
                area: Rect::new(12, 5, 9, 1),
                target: TabTarget::Tab(TabControlId::new(1)),
            },
        ]);

        assert!(app.click_at(14, 5));
        assert_eq!(app.panel().panel().active_index(), Some(1));
        assert!(!app.click_at(40, 5));
        assert_eq!(app.panel().panel().active_index(), Some(1));
    }

    #[test]
    fn test_empty_document() {
        let app = app(Value::Null);
        assert_eq!(app.status_message(), "Nothing to visualize.");
        assert!(app.mount().container().is_some());
    }

    #[test]
    fn test_reload_reads_document_again() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.json");
        std::fs::write(&path, r#"{ "kind": "bar", "series": [] }"#).unwrap();

        let mut app = App::new(
            Some(path.clone()),
            PanelConfig::default(),
            VisualizerRegistry::with_defaults(),
        )
        .unwrap();
        assert_eq!(app.panel().panel().mode(), PanelMode::Single);

        std::fs::write(&path, r#"[{ "kind": "bar", "series": [] }, { "kind": "table", "columns": [] }]"#)
            .unwrap();
        app.reload().unwrap();
        assert_eq!(app.panel().panel().mode(), PanelMode::Multiple);
        assert_eq!(app.document(), Some(path.as_path()));
    }

    #[test]
    fn test_sample_document_renders_every_tab() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("samples/panel.json");
        let mut app = App::new(
            Some(path),
            PanelConfig::default(),
            VisualizerRegistry::with_defaults(),
        )
        .unwrap();
        assert_eq!(app.panel().panel().input().tab_count(), 3);

        for number in 1..=3 {
            assert!(app.select_tab_by_number(number));
            assert!(app.panel().panel().has_visualizer(), "tab {number}");
        }
        assert_eq!(app.status_message(), "Showing Highcharts (3/3).");
    }
}
