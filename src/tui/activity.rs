//! Activity-based architecture for the TUI.
//!
//! Each screen in the TUI is an Activity with its own Application instance,
//! component IDs, and message types. The ActivityManager orchestrates transitions.

use std::io::Stdout;

use color_eyre::eyre::{Result, eyre};
use ratatui::{Terminal, prelude::CrosstermBackend};

use super::Model;
use super::activities::{MainActivity, StoreViewActivity};

/// Shared context passed between activities.
pub struct Context {
    pub model: Model,
}

/// Exit reasons for activity transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum ExitReason {
    Quit,
    SwitchToMain,
    SwitchToStoreView,
}

/// Activity lifecycle trait.
pub trait Activity {
    /// Initialize the activity with context from the manager.
    fn on_create(&mut self, context: Context) -> Result<()>;

    /// Draw the UI and handle one tick of events.
    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()>;

    /// Returns Some(reason) once the activity wants to exit.
    fn will_umount(&self) -> Option<&ExitReason>;

    /// Clean up and return the context to the manager.
    fn on_destroy(&mut self) -> Option<Context>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityType {
    Main,
    StoreView,
}

/// Manages activity lifecycle and transitions.
pub struct ActivityManager {
    context: Option<Context>,
    current: ActivityType,
}

impl ActivityManager {
    pub fn new(context: Context) -> Self {
        Self {
            context: Some(context),
            current: ActivityType::Main,
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            let mut activity: Box<dyn Activity> = match self.current {
                ActivityType::Main => Box::<MainActivity>::default(),
                ActivityType::StoreView => Box::<StoreViewActivity>::default(),
            };

            let context = self
                .context
                .take()
                .ok_or_else(|| eyre!("activity context lost during transition"))?;
            activity.on_create(context)?;

            loop {
                activity.on_draw(terminal)?;

                let Some(reason) = activity.will_umount() else {
                    continue;
                };
                let next = match reason {
                    ExitReason::Quit => {
                        activity.on_destroy();
                        return Ok(());
                    }
                    ExitReason::SwitchToMain => ActivityType::Main,
                    ExitReason::SwitchToStoreView => ActivityType::StoreView,
                };
                self.context = activity.on_destroy();
                self.current = next;
                tracing::debug!(activity = ?next, "switching activity");
                break;
            }
        }
    }
}
