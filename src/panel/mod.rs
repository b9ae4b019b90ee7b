// Panel controller: builds the layout for the classified input and owns tab selection.
// - `show` mounts a placeholder, a single visual, or a visual above a tab strip.
// - `activate` moves the selected marker and swaps the live visualizer instance.
// - The region is always wiped before a replacement instance is created.
// - An optional activation hook tells the host which item became active.
mod state;
mod wrapper;

use std::fmt;

use serde_json::Value;

use crate::{
    config::PanelConfig,
    error::PanelError,
    model::{PanelInput, PanelMode, VisualItem},
    surface::{Container, Surface, TabControl, TabControlId, TabStrip, VisualRegion},
    visualizer::VisualizerRegistry,
};

use self::state::PanelState;

pub use self::wrapper::PanelVisualizer;

/// Something a user can press in the tab strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabTarget {
    Tab(TabControlId),
    Options,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    Activated(usize),
    OptionsRequested,
}

/// Called with the newly selected item after every tab activation.
pub type ActivationHook = Box<dyn FnMut(&VisualItem)>;

pub struct PanelController<S: Surface> {
    surface: S,
    input: PanelInput,
    config: PanelConfig,
    state: PanelState,
    on_activate: Option<ActivationHook>,
}

impl<S: Surface> PanelController<S> {
    pub fn new(
        surface: S,
        input: &Value,
        registry: &VisualizerRegistry,
        config: PanelConfig,
    ) -> Self {
        Self::with_input(surface, PanelInput::classify(input, registry), config)
    }

    pub fn with_input(surface: S, input: PanelInput, config: PanelConfig) -> Self {
        Self {
            surface,
            input,
            config,
            state: PanelState::default(),
            on_activate: None,
        }
    }

    pub fn with_activation_hook(mut self, hook: impl FnMut(&VisualItem) + 'static) -> Self {
        self.on_activate = Some(Box::new(hook));
        self
    }

    pub fn show(&mut self) -> Result<&mut Self, PanelError> {
        let container = build_container(&self.input, &self.config);
        self.state.reset();
        self.surface.clear();
        self.surface.mount(container);

        tracing::info!(
            mode = %self.input.mode(),
            tabs = self.input.tab_count(),
            "Showing panel"
        );

        match &self.input {
            PanelInput::Empty => {}
            PanelInput::Single(item) => show_item(&mut self.surface, &mut self.state, item)?,
            PanelInput::Multiple(items) if items.is_empty() => {}
            PanelInput::Multiple(_) => self.activate(0)?,
        }

        Ok(self)
    }

    pub fn activate(&mut self, index: usize) -> Result<(), PanelError> {
        let PanelInput::Multiple(items) = &self.input else {
            tracing::warn!(index, mode = %self.input.mode(), "Ignoring activation on a panel without tabs");
            return Err(PanelError::NotTabbed);
        };
        let Some(item) = items.get(index) else {
            tracing::warn!(index, count = items.len(), "Ignoring activation of a missing tab");
            return Err(PanelError::NoSuchTab {
                index,
                count: items.len(),
            });
        };

        let id = TabControlId::new(index);
        let tabs = self
            .surface
            .container_mut()
            .and_then(Container::tabs_mut)
            .ok_or(PanelError::NotShown)?;
        tabs.deselect_all();
        tabs.select(id);

        tracing::debug!(
            index,
            tab = %id,
            kind = %item.kind,
            from = ?self.state.active(),
            "Tab activation"
        );
        self.state.select(index);

        let shown = show_item(&mut self.surface, &mut self.state, item);
        if let Some(hook) = self.on_activate.as_mut() {
            hook(item);
        }
        shown
    }

    /// Routes a press in the tab strip.
    pub fn click(&mut self, target: TabTarget) -> Result<PanelEvent, PanelError> {
        match target {
            TabTarget::Tab(id) => {
                self.activate(id.index())?;
                Ok(PanelEvent::Activated(id.index()))
            }
            TabTarget::Options => Ok(self.options()),
        }
    }

    pub fn options(&self) -> PanelEvent {
        tracing::info!(active = ?self.state.active(), "Options button clicked");
        PanelEvent::OptionsRequested
    }

    /// Passes the active item's payload to the live instance and redraws it.
    pub fn relayout(&mut self) -> Result<bool, PanelError> {
        let item = match &self.input {
            PanelInput::Empty => return Ok(false),
            PanelInput::Single(item) => item,
            PanelInput::Multiple(items) => match self.state.active().and_then(|index| items.get(index)) {
                Some(item) => item,
                None => return Ok(false),
            },
        };
        if !self.state.resize_instance(&item.payload) {
            return Ok(false);
        }

        let region = self
            .surface
            .container_mut()
            .and_then(Container::visual_mut)
            .ok_or(PanelError::NotShown)?;
        region.clear();
        match self.state.reshow_instance(region) {
            Ok(shown) => Ok(shown),
            Err(err) => {
                tracing::warn!(kind = %item.kind, error = %err, "Visualizer failed to redraw");
                self.state.discard_instance();
                Err(err.into())
            }
        }
    }

    pub fn next_index(&self) -> Option<usize> {
        let count = self.input.tab_count();
        if count == 0 {
            return None;
        }
        Some(self.state.active().map_or(0, |index| (index + 1) % count))
    }

    pub fn previous_index(&self) -> Option<usize> {
        let count = self.input.tab_count();
        if count == 0 {
            return None;
        }
        Some(match self.state.active() {
            Some(0) | None => count - 1,
            Some(index) => index - 1,
        })
    }

    pub fn mode(&self) -> PanelMode {
        self.input.mode()
    }

    pub fn input(&self) -> &PanelInput {
        &self.input
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn active_index(&self) -> Option<usize> {
        self.state.active()
    }

    pub fn active_item(&self) -> Option<&VisualItem> {
        match &self.input {
            PanelInput::Empty => None,
            PanelInput::Single(item) => Some(item),
            PanelInput::Multiple(items) => self.state.active().and_then(|index| items.get(index)),
        }
    }

    pub fn has_visualizer(&self) -> bool {
        self.state.has_instance()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

impl<S: Surface + fmt::Debug> fmt::Debug for PanelController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelController")
            .field("surface", &self.surface)
            .field("input", &self.input)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("has_activation_hook", &self.on_activate.is_some())
            .finish()
    }
}

fn build_container(input: &PanelInput, config: &PanelConfig) -> Container {
    let height = config.visual_height;
    match input {
        PanelInput::Empty => Container::Placeholder { height },
        PanelInput::Single(_) => Container::Single {
            visual: VisualRegion::new(height),
        },
        PanelInput::Multiple(items) => Container::Tabbed {
            visual: VisualRegion::new(height),
            tabs: TabStrip::new(
                items
                    .iter()
                    .enumerate()
                    .map(|(position, item)| {
                        let index = item.index.unwrap_or(position);
                        TabControl::new(index, item.kind.clone(), config.tabs.style_for(&item.kind))
                    })
                    .collect(),
            ),
        },
    }
}

fn show_item<S: Surface>(
    surface: &mut S,
    state: &mut PanelState,
    item: &VisualItem,
) -> Result<(), PanelError> {
    let region = surface
        .container_mut()
        .and_then(Container::visual_mut)
        .ok_or(PanelError::NotShown)?;
    region.clear();
    state.discard_instance();

    let Some(producer) = &item.producer else {
        tracing::debug!(kind = %item.kind, "No visualizer for item; region left empty");
        return Ok(());
    };

    let mut instance = producer.create(region, &item.payload).map_err(|err| {
        tracing::warn!(kind = %item.kind, error = %err, "Visualizer construction failed");
        err
    })?;
    instance.show(region).map_err(|err| {
        tracing::warn!(kind = %item.kind, error = %err, "Visualizer failed to render");
        err
    })?;
    state.replace_instance(instance);
    Ok(())
}
