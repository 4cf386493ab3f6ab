//! Store view activity - the parameter store rendered as highlighted TOML.

use std::io::Stdout;
use std::time::Duration;

use color_eyre::eyre::{Result, eyre};
use crossterm_actions::{NavigationEvent, TuiEvent};
use ratatui::{
    Terminal,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use tuirealm::{
    Application, Component, Event, EventListenerCfg, MockComponent, PollStrategy, State,
    StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection},
    props::{AttrValue, Attribute, Props},
};

use crate::config::{self, StoreFormat};
use crate::tui::activities::main;
use crate::tui::activity::{Activity, Context, ExitReason};
use crate::tui::components::{STORE_VIEW_FOOTER_ACTIONS, format_footer};
use crate::tui::{AppAction, Highlighter, dispatcher, handle_global_app_events};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    StoreText,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Quit,
    Back,
    Scrolled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

// ============================================================================
// StoreText Component
// ============================================================================

pub struct StoreText {
    props: Props,
    lines: Vec<Line<'static>>,
    scroll: usize,
    visible_height: usize,
}

impl StoreText {
    pub fn new(lines: Vec<Line<'static>>) -> Self {
        Self {
            props: Props::default(),
            lines,
            scroll: 0,
            visible_height: 20,
        }
    }

    fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn scroll_down(&mut self) {
        let max_scroll = self.lines.len().saturating_sub(self.visible_height);
        self.scroll = (self.scroll + 1).min(max_scroll);
    }
}

impl MockComponent for StoreText {
    fn view(&mut self, frame: &mut ratatui::Frame, area: Rect) {
        let block = Block::default()
            .title(" Parameter store ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.visible_height = inner.height as usize;

        let visible_lines: Vec<Line> = self
            .lines
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(inner.height as usize)
            .map(|(i, line)| {
                let mut spans = vec![Span::styled(
                    format!("{:4} ", i + 1),
                    Style::default().fg(Color::DarkGray),
                )];
                spans.extend(line.spans.clone());
                Line::from(spans)
            })
            .collect();
        frame.render_widget(Paragraph::new(visible_lines), inner);

        if self.lines.len() > inner.height as usize {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
            let mut scrollbar_state = ScrollbarState::new(self.lines.len()).position(self.scroll);
            frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
        }
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::Usize(self.scroll))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Scroll(CmdDirection::Up) => {
                self.scroll_up();
                CmdResult::Changed(self.state())
            }
            Cmd::Scroll(CmdDirection::Down) => {
                self.scroll_down();
                CmdResult::Changed(self.state())
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for StoreText {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        // Esc is not mapped in the dispatcher
        if key_event.code == tuirealm::event::Key::Esc {
            return Some(Msg::Back);
        }

        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            return match msg {
                main::Msg::Quit => Some(Msg::Quit),
                main::Msg::SwitchToStoreView => Some(Msg::Back),
                _ => None,
            };
        }

        match action {
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => {
                self.perform(Cmd::Scroll(CmdDirection::Up));
                Some(Msg::Scrolled)
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                self.perform(Cmd::Scroll(CmdDirection::Down));
                Some(Msg::Scrolled)
            }
            _ => None,
        }
    }
}

// ============================================================================
// StoreViewActivity
// ============================================================================

#[derive(Default)]
pub struct StoreViewActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
}

impl StoreViewActivity {
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }
}

impl Activity for StoreViewActivity {
    fn on_create(&mut self, context: Context) -> Result<()> {
        let text = config::render(&context.model.store, StoreFormat::Toml)?;
        let lines = Highlighter::new().highlight(&text, "toml");
        self.context = Some(context);

        let mut app = Self::create_application();
        app.mount(Id::StoreText, Box::new(StoreText::new(lines)), vec![])?;
        app.active(&Id::StoreText)?;

        self.app = Some(app);
        Ok(())
    }

    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let app = self
            .app
            .as_mut()
            .ok_or_else(|| eyre!("store view drawn before creation"))?;

        terminal.draw(|frame| {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Title
                    Constraint::Min(5),    // Store text
                    Constraint::Length(1), // Status
                ])
                .split(frame.area());

            let title = Paragraph::new(" Parameter Store [TOML]")
                .style(Style::default().add_modifier(Modifier::BOLD));
            frame.render_widget(title, rows[0]);

            app.view(&Id::StoreText, frame, rows[1]);

            let status = format_footer(STORE_VIEW_FOOTER_ACTIONS, &[("back", "Esc")]);
            let status_widget =
                Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(status_widget, rows[2]);
        })?;

        let Ok(messages) = app.tick(PollStrategy::Once) else {
            return Ok(());
        };

        for msg in messages {
            match msg {
                Msg::Quit => {
                    self.exit_reason = Some(ExitReason::Quit);
                    return Ok(());
                }
                Msg::Back => {
                    self.exit_reason = Some(ExitReason::SwitchToMain);
                    return Ok(());
                }
                Msg::Scrolled => {}
            }
        }

        Ok(())
    }

    fn will_umount(&self) -> Option<&ExitReason> {
        self.exit_reason.as_ref()
    }

    fn on_destroy(&mut self) -> Option<Context> {
        self.app = None;
        self.context.take()
    }
}
