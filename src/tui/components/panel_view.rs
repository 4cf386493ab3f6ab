//! One settings tab: a column of controls with row sub-focus.

use crossterm_actions::{InputEvent, NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::Frame;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection},
    event::Key,
    props::{AttrValue, Attribute, Props},
};

use crate::color::{self, COLOR_CYCLE, ColorInput};
use crate::controls::{ColorPicker, Control, Slider};
use crate::panel::{Gesture, Panel, Row};
use crate::tui::Clipboard;
use crate::tui::activities::main::{Msg, UserEvent};
use crate::tui::{AppAction, dispatcher, handle_global_app_events};

use super::help::popup_area;

const LABEL_WIDTH: u16 = 18;

/// What raw keys currently go to.
#[derive(Debug, Clone, PartialEq)]
enum Mode {
    Browse,
    /// Typing into a color text field.
    EditText(String),
    /// Typing a filter for a list row.
    Filter,
    /// Preset dialog open, cursor on a cycle color.
    Dialog(usize),
}

pub struct PanelView {
    props: Props,
    panel: Panel,
    row: usize,
    mode: Mode,
    clipboard: Clipboard,
}

impl PanelView {
    pub fn new(panel: Panel, clipboard: Clipboard) -> Self {
        Self {
            props: Props::default(),
            panel,
            row: 0,
            mode: Mode::Browse,
            clipboard,
        }
    }

    fn focused(&self) -> bool {
        self.props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag()
    }

    fn current(&self) -> Option<&Row> {
        self.panel.row(self.row)
    }

    fn picker(&self) -> Option<&ColorPicker> {
        self.current()?.color_picker()
    }

    fn apply(&mut self, gesture: Gesture) -> Option<Msg> {
        self.panel.apply(self.row, gesture).map(Msg::ParamChanged)
    }

    /// Enter on a row: edit color text, filter a list, or flip a box.
    fn start_edit(&mut self) -> Option<Msg> {
        match self.panel.row(self.row)? {
            Row::Color(p) if p.is_enabled() => {
                self.mode = Mode::EditText(p.text().to_string());
                None
            }
            Row::ActivatedColor(a) if a.governed().is_enabled() => {
                self.mode = Mode::EditText(a.governed().text().to_string());
                None
            }
            Row::Options(l) if l.is_enabled() => {
                self.mode = Mode::Filter;
                None
            }
            Row::CheckBox(_) => self.apply(Gesture::Toggle),
            _ => None,
        }
    }

    fn open_dialog(&mut self) {
        if let Some(picker) = self.picker().filter(|p| p.is_enabled()) {
            let index = COLOR_CYCLE
                .iter()
                .position(|c| c.eq_ignore_ascii_case(picker.color()))
                .unwrap_or(0);
            self.mode = Mode::Dialog(index);
        }
    }

    fn commit_text(&mut self, text: String) -> Option<Msg> {
        if color::classify(&text) == ColorInput::Invalid {
            // The field keeps the typed text; the store keeps the last color
            let _ = self.apply(Gesture::Text(text.clone()));
            return Some(Msg::Status(format!("'{}' is not a color", text.trim())));
        }
        self.apply(Gesture::Text(text))
    }

    fn copy(&mut self) -> Option<Msg> {
        let text = self.picker()?.copy().to_string();
        self.clipboard.copy(&text);
        Some(Msg::Status(format!("Copied {text}")))
    }

    fn paste(&mut self) -> Option<Msg> {
        self.picker().filter(|p| p.is_enabled())?;
        let Some(text) = self.clipboard.paste() else {
            return Some(Msg::Status("Clipboard is empty".to_string()));
        };
        self.commit_text(text)
    }

    fn on_edit_text(&mut self, key: Key) -> Option<Msg> {
        let Mode::EditText(buffer) = &mut self.mode else {
            return None;
        };
        match key {
            Key::Enter => {
                let text = std::mem::take(buffer);
                self.mode = Mode::Browse;
                self.commit_text(text)
            }
            Key::Esc => {
                self.mode = Mode::Browse;
                None
            }
            Key::Backspace => {
                buffer.pop();
                None
            }
            Key::Char(c) => {
                buffer.push(c);
                None
            }
            _ => None,
        }
    }

    fn on_filter(&mut self, key: Key) -> Option<Msg> {
        let Some(Row::Options(list)) = self.panel.row_mut(self.row) else {
            self.mode = Mode::Browse;
            return None;
        };
        match key {
            Key::Enter => {
                let update = list.confirm();
                list.clear_filter();
                self.mode = Mode::Browse;
                update.map(Msg::ParamChanged)
            }
            Key::Esc => {
                list.clear_filter();
                self.mode = Mode::Browse;
                None
            }
            Key::Backspace => {
                list.pop_filter_char();
                None
            }
            Key::Up => {
                list.move_cursor(-1);
                None
            }
            Key::Down => {
                list.move_cursor(1);
                None
            }
            Key::Char(c) => {
                list.push_filter_char(c);
                None
            }
            _ => None,
        }
    }

    fn on_dialog(&mut self, key: Key) -> Option<Msg> {
        let Mode::Dialog(index) = self.mode else {
            return None;
        };
        let len = COLOR_CYCLE.len();
        match key {
            Key::Left | Key::Up => {
                self.mode = Mode::Dialog((index + len - 1) % len);
                None
            }
            Key::Right | Key::Down => {
                self.mode = Mode::Dialog((index + 1) % len);
                None
            }
            Key::Enter => {
                self.mode = Mode::Browse;
                self.apply(Gesture::Pick(COLOR_CYCLE[index].to_string()))
            }
            Key::Esc => {
                self.mode = Mode::Browse;
                None
            }
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------------

    fn row_height(&self, index: usize, row: &Row) -> u16 {
        match row {
            Row::Options(list) if index == self.row && self.mode == Mode::Filter => {
                2 + list.visible_len().min(8) as u16
            }
            _ => 1,
        }
    }

    fn draw_row(&self, frame: &mut Frame, area: Rect, index: usize, row: &Row) {
        let focused = self.focused() && index == self.row;
        let enabled = row.is_enabled();

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Min(10)])
            .split(area);

        let label_style = match (focused, enabled) {
            (true, _) => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            (false, false) => Style::default().fg(Color::DarkGray),
            (false, true) => Style::default(),
        };
        frame.render_widget(
            Paragraph::new(format!("{}:", row.label())).style(label_style),
            cols[0],
        );

        let accent = if !enabled {
            Style::default().fg(Color::DarkGray)
        } else if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        match row {
            Row::CheckBox(c) => {
                let mark = if c.is_checked() { "[x]" } else { "[ ]" };
                frame.render_widget(Paragraph::new(Span::styled(mark, accent)), cols[1]);
            }
            Row::Slider(s) => self.draw_slider(frame, cols[1], s, focused),
            Row::IntegerBox(b) => {
                let text = format!("◀ {} ▶", b.current());
                frame.render_widget(Paragraph::new(Span::styled(text, accent)), cols[1]);
            }
            Row::Dropdown(d) => {
                let text = format!("◀ {} ▶", d.selected_label());
                frame.render_widget(Paragraph::new(Span::styled(text, accent)), cols[1]);
            }
            Row::Options(list) => {
                if focused && self.mode == Mode::Filter {
                    let mut lines = vec![
                        Line::from(Span::styled(list.selected().to_string(), accent)),
                        Line::from(vec![
                            Span::styled("filter: ", Style::default().fg(Color::Gray)),
                            Span::raw(format!("{}_", list.filter())),
                        ]),
                    ];
                    for (i, option) in list.visible().enumerate().take(8) {
                        let style = if i == list.cursor() {
                            Style::default().fg(Color::Black).bg(Color::Cyan)
                        } else {
                            Style::default()
                        };
                        lines.push(Line::from(Span::styled(format!("  {option}"), style)));
                    }
                    frame.render_widget(Paragraph::new(lines), cols[1]);
                } else {
                    frame.render_widget(
                        Paragraph::new(Span::styled(list.selected().to_string(), accent)),
                        cols[1],
                    );
                }
            }
            Row::Color(p) => {
                let spans = self.color_spans(p, focused, accent);
                frame.render_widget(Paragraph::new(Line::from(spans)), cols[1]);
            }
            Row::ActivatedColor(a) => {
                let mut spans = self.color_spans(a.governed(), focused, accent);
                let mark = if a.is_checked() { "[x]" } else { "[ ]" };
                let toggle_style = if focused {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                };
                spans.push(Span::styled(format!("  {mark} {}", a.label()), toggle_style));
                frame.render_widget(Paragraph::new(Line::from(spans)), cols[1]);
            }
        }
    }

    fn color_spans(&self, picker: &ColorPicker, focused: bool, accent: Style) -> Vec<Span<'static>> {
        let swatch = picker
            .rgb()
            .map(|c| Style::default().fg(Color::Rgb(c.red, c.green, c.blue)))
            .unwrap_or_default();
        let text = match &self.mode {
            Mode::EditText(buffer) if focused => Span::styled(
                format!("{buffer}_"),
                Style::default().add_modifier(Modifier::UNDERLINED),
            ),
            _ => Span::styled(picker.text().to_string(), accent),
        };
        vec![Span::styled("██ ", swatch), text]
    }

    fn draw_slider(&self, frame: &mut Frame, area: Rect, slider: &Slider, focused: bool) {
        let width = area.width.saturating_sub(10) as usize;
        let pos = (slider.ratio() * width as f64).round() as usize;
        let pos = pos.min(width.saturating_sub(1));

        let (filled_style, empty_style, handle_style) = if !slider.is_enabled() {
            let dim = Style::default().fg(Color::DarkGray);
            (dim, dim, dim)
        } else if focused {
            (
                Style::default().fg(Color::Cyan),
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::White),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::Gray),
            )
        };

        let mut spans: Vec<Span> = (0..width)
            .map(|i| match i.cmp(&pos) {
                std::cmp::Ordering::Equal => Span::styled("●", handle_style),
                std::cmp::Ordering::Less => Span::styled("━", filled_style),
                std::cmp::Ordering::Greater => Span::styled("─", empty_style),
            })
            .collect();

        let shown = if slider.is_enabled() {
            format!(" {}", slider.value())
        } else {
            " auto".to_string()
        };
        spans.push(Span::styled(
            shown,
            if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            },
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_dialog(&self, frame: &mut Frame, index: usize) {
        let area = popup_area(frame.area(), 30, 50);
        frame.render_widget(Clear, area);

        let lines: Vec<Line> = COLOR_CYCLE
            .iter()
            .enumerate()
            .map(|(i, hex)| {
                let swatch = color::parse_rgb(hex)
                    .map(|c| Style::default().fg(Color::Rgb(c.red, c.green, c.blue)))
                    .unwrap_or_default();
                let text_style = if i == index {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(" ████ ", swatch),
                    Span::styled(format!(" {hex} "), text_style),
                ])
            })
            .collect();

        let block = Block::default()
            .title(" Colors ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl MockComponent for PanelView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ", self.panel.kind()))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints: Vec<Constraint> = self
            .panel
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| Constraint::Length(self.row_height(i, row)))
            .collect();
        constraints.push(Constraint::Min(0));

        let areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, row) in self.panel.rows().iter().enumerate() {
            self.draw_row(frame, areas[i], i, row);
        }

        if let Mode::Dialog(index) = self.mode {
            self.draw_dialog(frame, index);
        }
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::Usize(self.row))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Move(CmdDirection::Up) => {
                self.row = self.row.saturating_sub(1);
                CmdResult::Changed(self.state())
            }
            Cmd::Move(CmdDirection::Down) => {
                self.row = (self.row + 1).min(self.panel.len().saturating_sub(1));
                CmdResult::Changed(self.state())
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for PanelView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        if !self.focused() {
            return None;
        }

        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        // Text entry and the dialog take raw keys
        match self.mode {
            Mode::EditText(_) => return self.on_edit_text(key_event.code),
            Mode::Filter => return self.on_filter(key_event.code),
            Mode::Dialog(_) => return self.on_dialog(key_event.code),
            Mode::Browse => {}
        }

        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            return Some(msg);
        }

        match action {
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)) => Some(Msg::NextTab),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)) => Some(Msg::PrevTab),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => {
                self.perform(Cmd::Move(CmdDirection::Up));
                None
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                self.perform(Cmd::Move(CmdDirection::Down));
                None
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left))
            | AppAction::ValueDecrementSmall => self.apply(Gesture::Step(-1)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right))
            | AppAction::ValueIncrementSmall => self.apply(Gesture::Step(1)),
            AppAction::ValueDecrementLarge => self.apply(Gesture::Page(-1)),
            AppAction::ValueIncrementLarge => self.apply(Gesture::Page(1)),
            AppAction::Toggle => self.apply(Gesture::Toggle),
            AppAction::Tui(TuiEvent::Input(InputEvent::Confirm)) => self.start_edit(),
            AppAction::ResetColor => self.apply(Gesture::Reset),
            AppAction::ColorDialog => {
                self.open_dialog();
                None
            }
            AppAction::Copy => self.copy(),
            AppAction::Paste => self.paste(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_store;
    use crate::panel::PanelKind;
    use crate::params::{ParamUpdate, Value};
    use tuirealm::event::{KeyEvent, KeyModifiers};

    fn update_of(msg: &Msg) -> Option<&ParamUpdate> {
        match msg {
            Msg::ParamChanged(update) => Some(update),
            _ => None,
        }
    }

    fn view(kind: PanelKind) -> PanelView {
        let panel = Panel::assemble(kind, &default_store()).unwrap();
        let mut view = PanelView::new(panel, Clipboard::internal_only());
        view.attr(Attribute::Focus, AttrValue::Flag(true));
        view
    }

    fn press(view: &mut PanelView, key: Key) -> Option<Msg> {
        view.on(Event::Keyboard(KeyEvent::new(key, KeyModifiers::NONE)))
    }

    fn type_text(view: &mut PanelView, text: &str) {
        for c in text.chars() {
            assert!(press(view, Key::Char(c)).is_none());
        }
    }

    #[test]
    fn typed_color_commits_on_enter() {
        let mut view = view(PanelKind::Rectangle);
        view.row = 4;
        assert!(view.start_edit().is_none());
        for _ in 0..7 {
            press(&mut view, Key::Backspace);
        }
        type_text(&mut view, "orange");

        let msg = press(&mut view, Key::Enter).unwrap();
        let update = update_of(&msg).unwrap();
        assert_eq!(update.value, Value::text("#ffa500"));
        assert_eq!(view.mode, Mode::Browse);
    }

    #[test]
    fn invalid_color_reports_status() {
        let mut view = view(PanelKind::Labels);
        view.row = 2;
        view.start_edit();
        type_text(&mut view, "zz");
        let msg = press(&mut view, Key::Enter).unwrap();
        assert!(matches!(msg, Msg::Status(_)));
    }

    #[test]
    fn disabled_color_does_not_enter_edit_mode() {
        // Circle color is on the automatic cycle
        let mut view = view(PanelKind::Circle);
        view.row = 4;
        assert!(view.start_edit().is_none());
        assert_eq!(view.mode, Mode::Browse);
    }

    #[test]
    fn filter_mode_selects_font() {
        let mut view = view(PanelKind::Labels);
        view.row = 0;
        view.start_edit();
        assert_eq!(view.mode, Mode::Filter);
        type_text(&mut view, "roboto");
        let msg = press(&mut view, Key::Enter).unwrap();
        assert_eq!(update_of(&msg).unwrap().value, Value::text("Roboto"));
    }

    #[test]
    fn dialog_picks_preset() {
        let mut view = view(PanelKind::Rectangle);
        view.row = 4;
        view.open_dialog();
        assert_eq!(view.mode, Mode::Dialog(0));
        press(&mut view, Key::Right);
        let msg = press(&mut view, Key::Enter).unwrap();
        assert_eq!(update_of(&msg).unwrap().value, Value::text(COLOR_CYCLE[1]));
    }

    #[test]
    fn copy_then_paste_through_clipboard() {
        let mut source = view(PanelKind::Rectangle);
        source.row = 4;
        assert!(matches!(source.copy(), Some(Msg::Status(_))));

        let mut target = view(PanelKind::Labels);
        target.clipboard = source.clipboard.clone();
        target.row = 2;
        let msg = target.paste().unwrap();
        assert_eq!(update_of(&msg).unwrap().value, Value::text("#1f77b4"));
    }

    #[test]
    fn unfocused_panel_ignores_keys() {
        let mut view = view(PanelKind::Labels);
        view.attr(Attribute::Focus, AttrValue::Flag(false));
        view.mode = Mode::Filter;
        assert!(press(&mut view, Key::Char('a')).is_none());
    }
}
