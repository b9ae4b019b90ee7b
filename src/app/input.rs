// Keyboard and mouse routing for the viewer.
// - Tab keys map onto panel activation; the popup swallows keys while open.
// - Left clicks are resolved against the tab rects recorded by the last draw.
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        if self.show_keybinds {
            match key.code {
                KeyCode::Char('?') | KeyCode::Esc => self.hide_keybinds(),
                KeyCode::Down | KeyCode::Char('j') => self.scroll_keybinds_down(),
                KeyCode::Up | KeyCode::Char('k') => self.scroll_keybinds_up(),
                _ => {}
            }
            return Flow::Continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('?') => self.toggle_keybinds(),
            KeyCode::Left | KeyCode::Char('h') => self.select_previous_tab(),
            KeyCode::Right | KeyCode::Char('l') => self.select_next_tab(),
            KeyCode::Char(digit @ '1'..='9') => {
                let number = digit as usize - '0' as usize;
                if !self.select_tab_by_number(number) {
                    self.status_message = format!("No tab {number}.");
                }
            }
            KeyCode::Char('o') => self.request_options(),
            KeyCode::Char('r') => {
                if let Err(err) = self.reload() {
                    tracing::warn!(error = %err, "Reload failed");
                    self.status_message = format!("Error: {err}");
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.show_keybinds {
            return;
        }
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            self.click_at(mouse.column, mouse.row);
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;
    use serde_json::json;

    use crate::{
        app::TabHit,
        config::PanelConfig,
        panel::TabTarget,
        visualizer::VisualizerRegistry,
    };

    use super::*;

    fn app() -> App {
        let value = json!([
            { "kind": "chartJS", "series": [] },
            { "kind": "highcharts", "series": [] }
        ]);
        App::from_value(&value, PanelConfig::default(), VisualizerRegistry::with_defaults())
    }

    fn press(app: &mut App, code: KeyCode) -> Flow {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_arrow_and_digit_keys_switch_tabs() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Right), Flow::Continue);
        assert_eq!(app.panel().panel().active_index(), Some(1));

        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.panel().panel().active_index(), Some(0));

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.panel().panel().active_index(), Some(1));

        press(&mut app, KeyCode::Char('7'));
        assert_eq!(app.status_message(), "No tab 7.");
        assert_eq!(app.panel().panel().active_index(), Some(1));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Char('q')), Flow::Quit);
        assert_eq!(press(&mut app, KeyCode::Esc), Flow::Quit);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Flow::Quit
        );
    }

    #[test]
    fn test_popup_captures_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_keybinds);

        assert_eq!(press(&mut app, KeyCode::Esc), Flow::Continue);
        assert!(!app.show_keybinds);

        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.panel().panel().active_index(), Some(0));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.clamp_keybinds_scroll(10), 2);
        assert_eq!(app.clamp_keybinds_scroll(1), 1);
    }

    #[test]
    fn test_mouse_click_on_tab_and_options() {
        let mut app = app();
        app.record_tab_hits(vec![
            TabHit {
                area: Rect::new(12, 8, 12, 1),
                target: TabTarget::Tab(crate::surface::TabControlId::new(1)),
            },
            TabHit {
                area: Rect::new(40, 8, 9, 1),
                target: TabTarget::Options,
            },
        ]);

        app.handle_mouse(click(15, 8));
        assert_eq!(app.panel().panel().active_index(), Some(1));

        app.handle_mouse(click(41, 8));
        assert_eq!(app.status_message(), "Options are not available for this panel yet.");
        assert_eq!(app.panel().panel().active_index(), Some(1));

        let mut release = click(15, 8);
        release.kind = MouseEventKind::Up(MouseButton::Left);
        app.handle_mouse(release);
        assert_eq!(app.panel().panel().active_index(), Some(1));
    }
}
