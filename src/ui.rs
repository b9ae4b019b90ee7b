// Root UI composition.
// - Draws the mounted panel container above a one-line status footer.
// - Tabbed panels get the visual region on top and the tab strip right below it.
// - Renders the keybind popup over everything when open.
mod tab_strip;
mod visual_region;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
    app::App,
    surface::{Container, Surface},
    text::{display_width, truncate_to_width},
};

const TAB_STRIP_HEIGHT: u16 = 3;
const FOOTER_HINT: &str = "? keys";

pub fn render(frame: &mut Frame, app: &App) {
    let [content, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    render_panel(frame, app, content);
    render_footer(frame, app, footer);
    if app.show_keybinds {
        render_keybinds_popup(frame, app);
    }
}

fn render_panel(frame: &mut Frame, app: &App, area: Rect) {
    let Some(container) = app.mount().container() else {
        app.record_tab_hits(Vec::new());
        return;
    };

    match container {
        Container::Placeholder { height } => {
            app.record_tab_hits(Vec::new());
            visual_region::render_placeholder(frame, fixed_height(area, *height));
        }
        Container::Single { visual } => {
            app.record_tab_hits(Vec::new());
            visual_region::render_visual_region(frame, fixed_height(area, visual.height()), visual);
        }
        Container::Tabbed { visual, tabs } => {
            let visual_height = visual
                .height()
                .min(area.height.saturating_sub(TAB_STRIP_HEIGHT));
            let [visual_area, strip_area, _] = Layout::vertical([
                Constraint::Length(visual_height),
                Constraint::Length(TAB_STRIP_HEIGHT),
                Constraint::Min(0),
            ])
            .areas(area);

            visual_region::render_visual_region(frame, visual_area, visual);
            let hits = tab_strip::render_tab_strip(frame, strip_area, tabs);
            app.record_tab_hits(hits);
        }
    }
}

/// Top slice of `area`, at most `height` rows tall.
fn fixed_height(area: Rect, height: u16) -> Rect {
    Rect {
        height: area.height.min(height),
        ..area
    }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hint_width = display_width(FOOTER_HINT) as u16;
    let [status_area, hint_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(hint_width)]).areas(area);

    let status = truncate_to_width(app.status_message(), status_area.width as usize);
    let status_style = if app.status_message().starts_with("Error") {
        Style::default().fg(Color::LightRed)
    } else {
        Style::default().fg(Color::Gray)
    };
    frame.render_widget(Paragraph::new(Line::styled(status, status_style)), status_area);
    frame.render_widget(
        Paragraph::new(Line::styled(FOOTER_HINT, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Right),
        hint_area,
    );
}

fn render_keybinds_popup(frame: &mut Frame, app: &App) {
    let outer = frame.area();
    let [vertical] = Layout::vertical([Constraint::Percentage(70)])
        .flex(Flex::Center)
        .areas(outer);
    let [popup] = Layout::horizontal([Constraint::Percentage(70)])
        .flex(Flex::Center)
        .areas(vertical);

    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("Press ? or Esc to close this window."),
        Line::from(""),
        keybind_section("GLOBAL"),
        keybind_row("?", "toggle keybinds popup"),
        keybind_row("q / Esc", "quit"),
        keybind_row("Ctrl+c", "quit app"),
        keybind_row("r", "reload document"),
        Line::from(""),
        keybind_section("TABS"),
        keybind_row("Left/Right or h/l", "previous / next tab"),
        keybind_row("1-9", "jump to tab"),
        keybind_row("o", "options"),
        keybind_row("Mouse click", "activate tab or options"),
        Line::from(""),
        keybind_section("THIS WINDOW"),
        keybind_row("j/k or Up/Down", "scroll keybinds"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Keybinds")
        .border_style(pane_border_style(true, Color::Cyan));
    let inner = block.inner(popup);
    let visible_line_count = inner.height.max(1) as usize;
    let max_scroll_top = lines.len().saturating_sub(visible_line_count);
    let scroll_top = app.clamp_keybinds_scroll(max_scroll_top);
    let popup_widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .scroll((scroll_top.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(popup_widget, popup);
}

fn keybind_section(title: &str) -> Line<'static> {
    Line::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn keybind_row(keys: &str, action: &str) -> Line<'static> {
    const KEY_COL_WIDTH: usize = 20;
    let keys_padded = format!("{keys:<KEY_COL_WIDTH$}");
    Line::from(vec![
        Span::styled(
            keys_padded,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(action.to_string()),
    ])
}

pub(super) fn pane_border_style(is_focused: bool, focused_color: Color) -> Style {
    if is_focused {
        Style::default()
            .fg(focused_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use serde_json::{Value, json};

    use super::*;
    use crate::{config::PanelConfig, panel::TabTarget, visualizer::VisualizerRegistry};

    fn draw(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    fn app(value: Value) -> App {
        App::from_value(&value, PanelConfig::default(), VisualizerRegistry::with_defaults())
    }

    #[test]
    fn test_tabbed_panel_draws_strip_below_region() {
        let app = app(json!([
            { "kind": "chartJS", "title": "Sales", "series": [{ "label": "Q1", "value": 3 }] },
            { "kind": "eCharts", "series": [{ "label": "Q2", "value": 4 }] }
        ]));
        let buffer = draw(&app, 60, 20);

        assert!(row(&buffer, 0).contains("Sales"));
        assert!(row(&buffer, 1).contains("Q1"));
        let strip = row(&buffer, 17);
        assert!(strip.contains("Chart.js"));
        assert!(strip.contains("ECharts"));
        assert!(strip.contains("Options"));
        assert!(row(&buffer, 19).starts_with("Showing Chart.js (1/2)."));

        let hits = app.tab_hits();
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|hit| hit.area.y == 17));
        assert_eq!(
            hits.iter().filter(|hit| hit.target == TabTarget::Options).count(),
            1
        );
    }

    #[test]
    fn test_click_on_drawn_tab_activates_it() {
        let mut app = app(json!([
            { "kind": "chartJS", "series": [] },
            { "kind": "eCharts", "series": [] }
        ]));
        draw(&app, 60, 20);

        // " ◔ Chart.js " spans x=1..13, divider at 13, second caption starts at 14.
        assert!(app.click_at(16, 17));
        assert_eq!(app.panel().panel().active_index(), Some(1));

        let buffer = draw(&app, 60, 20);
        assert_eq!(buffer[(16u16, 17u16)].bg, Color::Cyan);
        assert_eq!(buffer[(3u16, 17u16)].fg, Color::Gray);
    }

    #[test]
    fn test_single_and_empty_panels_have_no_hits() {
        let single = app(json!({
            "kind": "table",
            "columns": [{ "label": "Name", "source": "name" }],
            "data": [{ "name": "Ada" }]
        }));
        let buffer = draw(&single, 40, 12);
        assert!(row(&buffer, 0).contains("Table"));
        assert!(row(&buffer, 3).contains("Ada"));
        assert!(single.tab_hits().is_empty());

        let empty = app(Value::Null);
        let buffer = draw(&empty, 40, 12);
        assert!(row(&buffer, 1).contains("Nothing to show"));
        assert!(empty.tab_hits().is_empty());
    }

    #[test]
    fn test_keybinds_popup_is_drawn_on_top() {
        let mut app = app(Value::Null);
        app.toggle_keybinds();
        let buffer = draw(&app, 60, 20);
        let text = (0..20).map(|y| row(&buffer, y)).collect::<Vec<_>>().join("\n");
        assert!(text.contains("Keybinds"));
        assert!(text.contains("TABS"));
    }
}
