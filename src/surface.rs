// Retained display surface the panel renders into.
// - `Surface` is the only seam between the controller and the host display.
// - Containers mirror the three layouts: placeholder, single visual, tabbed visual.
// - `MountPoint` keeps the mounted container in memory so any frontend (or a test) can draw it.
use std::{fmt, str::FromStr};

use ratatui::text::Line;
use thiserror::Error;

use crate::config::TabStyle;

pub const VISUAL_REGION_ID: &str = "visual";

const TAB_CONTROL_PREFIX: &str = "vendorButton_";
const OPTIONS_LABEL: &str = "Options";

pub trait Surface {
    /// Removes everything currently mounted.
    fn clear(&mut self);

    fn mount(&mut self, container: Container);

    fn container(&self) -> Option<&Container>;

    fn container_mut(&mut self) -> Option<&mut Container>;
}

#[derive(Debug, Default)]
pub struct MountPoint {
    content: Option<Container>,
    mount_count: usize,
}

impl MountPoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    pub fn mount_count(&self) -> usize {
        self.mount_count
    }
}

impl Surface for MountPoint {
    fn clear(&mut self) {
        self.content = None;
    }

    fn mount(&mut self, container: Container) {
        self.content = Some(container);
        self.mount_count += 1;
    }

    fn container(&self) -> Option<&Container> {
        self.content.as_ref()
    }

    fn container_mut(&mut self) -> Option<&mut Container> {
        self.content.as_mut()
    }
}

#[derive(Debug, Clone)]
pub enum Container {
    Placeholder { height: u16 },
    Single { visual: VisualRegion },
    Tabbed { visual: VisualRegion, tabs: TabStrip },
}

impl Container {
    pub fn height(&self) -> u16 {
        match self {
            Self::Placeholder { height } => *height,
            Self::Single { visual } | Self::Tabbed { visual, .. } => visual.height(),
        }
    }

    pub fn visual(&self) -> Option<&VisualRegion> {
        match self {
            Self::Placeholder { .. } => None,
            Self::Single { visual } | Self::Tabbed { visual, .. } => Some(visual),
        }
    }

    pub fn visual_mut(&mut self) -> Option<&mut VisualRegion> {
        match self {
            Self::Placeholder { .. } => None,
            Self::Single { visual } | Self::Tabbed { visual, .. } => Some(visual),
        }
    }

    pub fn tabs(&self) -> Option<&TabStrip> {
        match self {
            Self::Tabbed { tabs, .. } => Some(tabs),
            _ => None,
        }
    }

    pub fn tabs_mut(&mut self) -> Option<&mut TabStrip> {
        match self {
            Self::Tabbed { tabs, .. } => Some(tabs),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VisualRegion {
    height: u16,
    title: Option<String>,
    lines: Vec<Line<'static>>,
    clear_count: usize,
}

impl VisualRegion {
    pub fn new(height: u16) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    pub fn id(&self) -> &'static str {
        VISUAL_REGION_ID
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn clear(&mut self) {
        self.title = None;
        self.lines.clear();
        self.clear_count += 1;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn push_line(&mut self, line: impl Into<Line<'static>>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.title.is_none()
    }

    /// Number of times the region has been wiped since it was built.
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }

    /// Plain-text view of the content, one entry per line.
    pub fn text_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabControlId(usize);

impl TabControlId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TabControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TAB_CONTROL_PREFIX}{}", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Not a tab control id: {0}")]
pub struct ParseTabControlIdError(String);

impl FromStr for TabControlId {
    type Err = ParseTabControlIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(TAB_CONTROL_PREFIX)
            .filter(|digits| !digits.is_empty() && digits.chars().all(|ch| ch.is_ascii_digit()))
            .and_then(|digits| digits.parse::<usize>().ok())
            .map(Self)
            .ok_or_else(|| ParseTabControlIdError(s.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct TabControl {
    id: TabControlId,
    kind: String,
    style: TabStyle,
    selected: bool,
}

impl TabControl {
    pub fn new(index: usize, kind: impl Into<String>, style: TabStyle) -> Self {
        Self {
            id: TabControlId::new(index),
            kind: kind.into(),
            style,
            selected: false,
        }
    }

    pub fn id(&self) -> TabControlId {
        self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn label(&self) -> &str {
        &self.style.label
    }

    pub fn caption(&self) -> String {
        self.style.caption()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

#[derive(Debug, Clone)]
pub struct TabStrip {
    controls: Vec<TabControl>,
    options_label: String,
}

impl TabStrip {
    pub fn new(controls: Vec<TabControl>) -> Self {
        Self {
            controls,
            options_label: OPTIONS_LABEL.to_string(),
        }
    }

    pub fn controls(&self) -> &[TabControl] {
        &self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn options_label(&self) -> &str {
        &self.options_label
    }

    pub fn control(&self, id: TabControlId) -> Option<&TabControl> {
        self.controls.iter().find(|control| control.id == id)
    }

    pub fn deselect_all(&mut self) {
        for control in &mut self.controls {
            control.selected = false;
        }
    }

    /// Marks the control selected; false when no control has that id.
    pub fn select(&mut self, id: TabControlId) -> bool {
        match self.controls.iter_mut().find(|control| control.id == id) {
            Some(control) => {
                control.selected = true;
                true
            }
            None => false,
        }
    }

    pub fn selected_ids(&self) -> Vec<TabControlId> {
        self.controls
            .iter()
            .filter(|control| control.selected)
            .map(|control| control.id)
            .collect()
    }
}
