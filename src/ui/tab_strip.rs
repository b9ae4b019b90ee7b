// Tab strip under the visual region.
// - One caption per control, selected one highlighted, "Options" pinned right.
// - Returns the screen rect of every drawn control for mouse hit-testing.
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::TabHit,
    panel::TabTarget,
    surface::TabStrip,
    text::{display_width, truncate_to_width},
};

use super::pane_border_style;

const DIVIDER: &str = "│";

pub fn render_tab_strip(frame: &mut Frame, area: Rect, strip: &TabStrip) -> Vec<TabHit> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border_style(true, Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return Vec::new();
    }

    let mut hits = Vec::new();

    let options = format!(" {} ", strip.options_label());
    let options_width = (display_width(&options) as u16).min(inner.width);
    let options_area = Rect::new(inner.right() - options_width, inner.y, options_width, 1);
    frame.render_widget(
        Paragraph::new(Line::styled(
            truncate_to_width(&options, options_width as usize),
            Style::default().fg(Color::Yellow),
        )),
        options_area,
    );
    hits.push(TabHit {
        area: options_area,
        target: TabTarget::Options,
    });

    // Tabs stop one cell short of the options button.
    let limit = options_area.x.saturating_sub(1);
    let mut spans = Vec::new();
    let mut x = inner.x;
    for (position, control) in strip.controls().iter().enumerate() {
        if position > 0 {
            if x >= limit {
                break;
            }
            spans.push(Span::styled(DIVIDER, Style::default().fg(Color::DarkGray)));
            x += 1;
        }
        if x >= limit {
            break;
        }

        let caption = format!(" {} ", control.caption());
        let width = (display_width(&caption) as u16).min(limit - x);
        let style = if control.is_selected() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(truncate_to_width(&caption, width as usize), style));
        hits.push(TabHit {
            area: Rect::new(x, inner.y, width, 1),
            target: TabTarget::Tab(control.id()),
        });
        x += width;
    }

    let tabs_area = Rect::new(inner.x, inner.y, limit.saturating_sub(inner.x), 1);
    frame.render_widget(Paragraph::new(Line::from(spans)), tabs_area);
    hits
}
