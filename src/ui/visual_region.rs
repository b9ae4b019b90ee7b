// Bordered view of a mounted visual region.
// - Draws whatever lines the live visualizer left in the region.
// - Falls back to the region id as title when the visualizer set none.
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::surface::{VISUAL_REGION_ID, VisualRegion};

use super::pane_border_style;

pub fn render_visual_region(frame: &mut Frame, area: Rect, region: &VisualRegion) {
    let title = region.title().unwrap_or(VISUAL_REGION_ID);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border_style(!region.is_empty(), Color::LightBlue))
        .title(title.to_string());

    let widget = Paragraph::new(region.lines().to_vec())
        .block(block)
        .alignment(Alignment::Left);
    frame.render_widget(widget, area);
}

pub fn render_placeholder(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(Line::styled(
        "Nothing to show",
        Style::default().fg(Color::DarkGray),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(pane_border_style(false, Color::LightBlue)),
    )
    .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}
