//! Main activity - the tabbed settings panel and figure preview.

use std::io::Stdout;
use std::time::Duration;

use color_eyre::eyre::{Result, eyre};
use ratatui::{
    Terminal,
    crossterm::event::{self, Event, KeyCode},
    layout::{Constraint, Direction, Layout},
    prelude::CrosstermBackend,
    style::{Color, Modifier, Style},
    widgets::{Paragraph, Tabs},
};
use tuirealm::{Application, EventListenerCfg, PollStrategy, Update};

use crate::panel::{Panel, PanelKind};
use crate::params::ParamUpdate;
use crate::tui::activity::{Activity, Context, ExitReason};
use crate::tui::components::{
    Figure, MAIN_FOOTER_ACTIONS, PanelView, format_footer, render_help,
};
use crate::tui::{Clipboard, Model};

// ============================================================================
// Component identifiers (scoped to MainActivity)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    Panel(PanelKind),
    Figure,
}

// ============================================================================
// Messages (scoped to MainActivity)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    // Application control
    Quit,
    ShowHelp,
    HideHelp,

    // Tab navigation
    NextTab,
    PrevTab,

    /// A control produced a store write.
    ParamChanged(ParamUpdate),
    /// Chained after every write: refresh the figure.
    Redraw,

    /// Status line text.
    Status(String),

    // Activity transition
    SwitchToStoreView,
}

/// Custom user events (currently unused, but required by tui-realm).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

// ============================================================================
// MainActivity
// ============================================================================

#[derive(Default)]
pub struct MainActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
}

impl MainActivity {
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }

    /// Assemble every tab from the store and mount it with the figure.
    fn mount_components(app: &mut Application<Id, Msg, UserEvent>, model: &Model) -> Result<()> {
        let clipboard = Clipboard::new();
        for kind in PanelKind::ALL {
            let panel = Panel::assemble(kind, &model.store)?;
            app.mount(
                Id::Panel(kind),
                Box::new(PanelView::new(panel, clipboard.clone())),
                vec![],
            )?;
        }

        app.mount(Id::Figure, Box::new(Figure::new(&model.store)), vec![])?;
        app.active(&Id::Panel(model.active_kind()))?;

        Ok(())
    }

    /// Remount the figure with the current store.
    fn sync_figure(app: &mut Application<Id, Msg, UserEvent>, model: &Model) -> Result<()> {
        if app.mounted(&Id::Figure) {
            app.umount(&Id::Figure)?;
        }
        app.mount(Id::Figure, Box::new(Figure::new(&model.store)), vec![])?;
        Ok(())
    }
}

impl Activity for MainActivity {
    fn on_create(&mut self, context: Context) -> Result<()> {
        let mut app = Self::create_application();
        Self::mount_components(&mut app, &context.model)?;

        self.context = Some(context);
        self.app = Some(app);
        Ok(())
    }

    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let app = self
            .app
            .as_mut()
            .ok_or_else(|| eyre!("main activity drawn before creation"))?;
        let model = &mut self
            .context
            .as_mut()
            .ok_or_else(|| eyre!("main activity has no context"))?
            .model;

        terminal.draw(|frame| {
            let area = frame.area();

            let main_rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Tabs
                    Constraint::Min(10),   // Content
                    Constraint::Length(1), // Status
                ])
                .split(area);

            let tabs = Tabs::new(PanelKind::ALL.iter().map(|k| k.to_string()))
                .select(model.active_tab)
                .highlight_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                );
            frame.render_widget(tabs, main_rows[0]);

            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(main_rows[1]);

            app.view(&Id::Panel(model.active_kind()), frame, cols[0]);
            app.view(&Id::Figure, frame, cols[1]);

            let status = model.message.clone().unwrap_or_else(|| {
                format_footer(MAIN_FOOTER_ACTIONS, &[("adjust", "←→ []/{}")])
            });
            let status_widget =
                Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(status_widget, main_rows[2]);

            if model.show_help {
                render_help(frame);
            }
        })?;

        // Help modal intercepts all input while visible
        if model.show_help {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
                        model.update(Some(Msg::HideHelp));
                    }
                    _ => {}
                }
            }
            return Ok(());
        }

        let Ok(messages) = app.tick(PollStrategy::Once) else {
            // Timeout is fine, just continue
            return Ok(());
        };

        let mut needs_sync = false;
        for msg in messages {
            match &msg {
                Msg::Quit => {
                    self.exit_reason = Some(ExitReason::Quit);
                    return Ok(());
                }
                Msg::SwitchToStoreView => {
                    self.exit_reason = Some(ExitReason::SwitchToStoreView);
                    return Ok(());
                }
                _ => {}
            }

            let switches_tab = matches!(msg, Msg::NextTab | Msg::PrevTab);

            // Process through model, handle chained messages
            let mut current = Some(msg);
            while let Some(m) = current {
                if matches!(m, Msg::Redraw) {
                    needs_sync = true;
                }
                current = model.update(Some(m));
            }

            if switches_tab {
                if let Err(err) = app.active(&Id::Panel(model.active_kind())) {
                    tracing::warn!("could not focus tab: {}", err);
                }
            }
        }

        if needs_sync {
            if let Err(err) = Self::sync_figure(app, model) {
                tracing::warn!("figure remount failed: {}", err);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_store;

    #[test]
    fn figure_sync_mounts_and_remounts() {
        let mut app: Application<Id, Msg, UserEvent> =
            Application::init(EventListenerCfg::default());
        let mut model = Model::new(default_store());

        MainActivity::sync_figure(&mut app, &model).unwrap();
        assert!(app.mounted(&Id::Figure));

        model.store = model.store.clone().with("Circle", "line_width", 4_i64);
        MainActivity::sync_figure(&mut app, &model).unwrap();
        assert!(app.mounted(&Id::Figure));
    }
}
