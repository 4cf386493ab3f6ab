//! Help modal and footer text built from the dispatcher's bindings.

use crossterm_actions::{AppEvent, NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, Row, Table},
};

use crate::tui::{AppAction, dispatcher};

struct KeybindingGroup {
    title: &'static str,
    actions: &'static [AppAction],
}

const HELP_GROUPS: &[KeybindingGroup] = &[
    KeybindingGroup {
        title: "Global",
        actions: &[
            AppAction::Tui(TuiEvent::App(AppEvent::Quit)),
            AppAction::Tui(TuiEvent::App(AppEvent::Help)),
            AppAction::Tui(TuiEvent::App(AppEvent::Refresh)),
            AppAction::StoreView,
        ],
    },
    KeybindingGroup {
        title: "Tabs",
        actions: &[
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)),
        ],
    },
    KeybindingGroup {
        title: "Rows",
        actions: &[
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)),
        ],
    },
    KeybindingGroup {
        title: "Values",
        actions: &[
            AppAction::ValueDecrementSmall,
            AppAction::ValueIncrementSmall,
            AppAction::ValueDecrementLarge,
            AppAction::ValueIncrementLarge,
            AppAction::Toggle,
        ],
    },
    KeybindingGroup {
        title: "Colors",
        actions: &[
            AppAction::ColorDialog,
            AppAction::ResetColor,
            AppAction::Copy,
            AppAction::Paste,
        ],
    },
];

/// Component-specific keys the dispatcher does not know about.
const EXTRA_BINDINGS: &[(&str, &str)] = &[
    ("Edit color / filter", "Enter"),
    ("Cancel edit", "Esc"),
    ("Delete character", "Backspace"),
];

pub const MAIN_FOOTER_ACTIONS: &[AppAction] = &[
    AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)),
    AppAction::StoreView,
    AppAction::Tui(TuiEvent::App(AppEvent::Help)),
    AppAction::Tui(TuiEvent::App(AppEvent::Quit)),
];

pub const STORE_VIEW_FOOTER_ACTIONS: &[AppAction] = &[
    AppAction::StoreView,
    AppAction::Tui(TuiEvent::App(AppEvent::Quit)),
];

/// `word: key | word: key`, using the first word of each description and the
/// first bound key, then the extras as given.
pub fn format_footer(actions: &[AppAction], extras: &[(&str, &str)]) -> String {
    let help_entries = dispatcher().config().help_entries();

    actions
        .iter()
        .filter_map(|action| {
            let entry = help_entries.get(action)?;
            let key = entry.keys.first()?;
            let word = entry.description?.split_whitespace().next()?.to_lowercase();
            Some(format!("{word}: {key}"))
        })
        .chain(extras.iter().map(|(desc, key)| format!("{desc}: {key}")))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Centered popup area with given width/height percentages.
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// One help table row per binding, grouped under bold section headers.
fn help_rows() -> Vec<(String, String, bool)> {
    let help_entries = dispatcher().config().help_entries();
    let mut rows = Vec::new();

    for group in HELP_GROUPS {
        rows.push((group.title.to_string(), String::new(), true));
        rows.extend(group.actions.iter().filter_map(|action| {
            let entry = help_entries.get(action)?;
            let keys = entry
                .keys
                .iter()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            Some((entry.description.unwrap_or("-").to_string(), keys, false))
        }));
    }

    rows.push(("Text Entry".to_string(), String::new(), true));
    rows.extend(
        EXTRA_BINDINGS
            .iter()
            .map(|(desc, keys)| (desc.to_string(), keys.to_string(), false)),
    );
    rows
}

pub fn render_help(frame: &mut Frame) {
    let area = popup_area(frame.area(), 50, 80);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_bottom(Line::from(" Esc / ? / Enter to close ").centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let header = Style::default().add_modifier(Modifier::BOLD);
    let keys = Style::default().fg(Color::Gray);

    let rows = help_rows().into_iter().map(|(desc, binding, is_header)| {
        if is_header {
            Row::new([Cell::from(desc).style(header), Cell::from("")])
        } else {
            Row::new([
                Cell::from(format!("  {desc}")),
                Cell::from(binding).style(keys),
            ])
        }
    });

    let table = Table::new(rows, [Constraint::Percentage(60), Constraint::Percentage(40)])
        .block(block)
        .column_spacing(1);
    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_color_bindings() {
        let rows = help_rows();
        assert!(rows.iter().any(|(title, _, header)| *header && title == "Colors"));
        assert!(
            rows.iter()
                .any(|(desc, keys, _)| desc == "Open color presets" && !keys.is_empty())
        );
        assert!(rows.iter().any(|(desc, keys, _)| desc == "Cancel edit" && keys == "Esc"));
    }

    #[test]
    fn footer_uses_first_word_of_description() {
        let footer = format_footer(STORE_VIEW_FOOTER_ACTIONS, &[("back", "Esc")]);
        assert!(footer.starts_with("view: "));
        assert!(footer.ends_with(" | back: Esc"));
    }
}
