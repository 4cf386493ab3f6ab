//! Panels: controls assembled per style section.
//!
//! Assembly is pure wiring from fixed parameter paths to controls. Any
//! binding fault aborts the whole panel.

use std::fmt;

use crate::controls::{
    Activator, BindingError, CheckBox, ColorPicker, ColorPickerConfig, Control, Dropdown,
    IntegerBox, IntegerBoxConfig, ListOptions, Slider, SliderConfig,
};
use crate::params::{ParamPath, ParamUpdate, ParameterStore, Value};

/// Line style labels and their stored codes, position for position.
/// Upper end of the line width slider.
pub const LINE_WIDTH_MAX: i32 = 10;

pub const LINE_STYLES: [(&str, &str); 5] = [
    ("Solid", "-"),
    ("Dashed", "--"),
    ("Dotted", ":"),
    ("Dash-Dot", "-."),
    ("None", "None"),
];

/// Font families offered on the labels tab.
pub const FONT_FAMILIES: [&str; 12] = [
    "DejaVu Sans",
    "DejaVu Sans Mono",
    "DejaVu Serif",
    "Fira Sans",
    "Helvetica",
    "Liberation Mono",
    "Liberation Sans",
    "Liberation Serif",
    "Noto Sans",
    "Noto Serif",
    "Open Sans",
    "Roboto",
];

/// Sections that get a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Circle,
    Rectangle,
    Labels,
}

impl PanelKind {
    pub const ALL: [PanelKind; 3] = [Self::Circle, Self::Rectangle, Self::Labels];

    /// Store section the panel edits.
    pub fn section(self) -> &'static str {
        match self {
            Self::Circle => "Circle",
            Self::Rectangle => "Rectangle",
            Self::Labels => "Labels",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}

/// A user gesture on a row, independent of the input device.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// Small step (slider tick, spin box step, dropdown neighbour).
    Step(i32),
    /// Large step (slider page).
    Page(i32),
    /// Flip a checkbox or an activator.
    Toggle,
    /// Restore a color picker's default (right-click).
    Reset,
    /// Color text typed or pasted.
    Text(String),
    /// Color picked from the dialog.
    Pick(String),
}

/// One line of a panel.
#[derive(Debug, Clone)]
pub enum Row {
    CheckBox(CheckBox),
    Slider(Slider),
    IntegerBox(IntegerBox),
    Dropdown(Dropdown),
    Options(ListOptions),
    Color(ColorPicker),
    ActivatedColor(Activator<ColorPicker>),
}

impl Row {
    pub fn label(&self) -> &str {
        match self {
            Self::CheckBox(c) => c.label(),
            Self::Slider(s) => s.label(),
            Self::IntegerBox(b) => b.label(),
            Self::Dropdown(d) => d.label(),
            Self::Options(l) => l.label(),
            Self::Color(p) => p.label(),
            Self::ActivatedColor(a) => a.governed().label(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            Self::CheckBox(c) => c.is_enabled(),
            Self::Slider(s) => s.is_enabled(),
            Self::IntegerBox(b) => b.is_enabled(),
            Self::Dropdown(d) => d.is_enabled(),
            Self::Options(l) => l.is_enabled(),
            Self::Color(p) => p.is_enabled(),
            Self::ActivatedColor(a) => a.governed().is_enabled(),
        }
    }

    /// The color picker on this row, if any.
    pub fn color_picker(&self) -> Option<&ColorPicker> {
        match self {
            Self::Color(p) => Some(p),
            Self::ActivatedColor(a) => Some(a.governed()),
            _ => None,
        }
    }

    pub fn color_picker_mut(&mut self) -> Option<&mut ColorPicker> {
        match self {
            Self::Color(p) => Some(p),
            Self::ActivatedColor(a) => Some(a.governed_mut()),
            _ => None,
        }
    }

    /// Apply a gesture; returns the resulting write, if any.
    pub fn apply(&mut self, gesture: Gesture) -> Option<ParamUpdate> {
        match (self, gesture) {
            (Self::CheckBox(c), Gesture::Toggle) => c.toggle(),
            (Self::Slider(s), Gesture::Step(n)) => s.step(n),
            (Self::Slider(s), Gesture::Page(n)) => s.page(n),
            (Self::IntegerBox(b), Gesture::Step(n) | Gesture::Page(n)) => {
                b.step(i64::from(n))
            }
            (Self::Dropdown(d), Gesture::Step(n) | Gesture::Page(n)) => {
                if n < 0 {
                    d.select_prev()
                } else {
                    d.select_next()
                }
            }
            (Self::Options(l), Gesture::Step(n) | Gesture::Page(n)) => {
                l.move_cursor(n as isize);
                l.confirm()
            }
            (Self::ActivatedColor(a), Gesture::Toggle) => a.toggle(),
            (row, Gesture::Reset) => row.color_picker_mut()?.reset(),
            (row, Gesture::Text(text)) => row.color_picker_mut()?.edit_text(&text),
            (row, Gesture::Pick(color)) => row.color_picker_mut()?.set_color(color),
            _ => None,
        }
    }

    /// One-line description used by logs and snapshots.
    pub fn summary(&self) -> String {
        let state = if self.is_enabled() { "on" } else { "off" };
        let shown = match self {
            Self::CheckBox(c) => format!("checkbox {}", c.is_checked()),
            Self::Slider(s) => format!("slider {} -> {}", s.position(), s.value()),
            Self::IntegerBox(b) => format!("spin {}", b.current()),
            Self::Dropdown(d) => format!("dropdown {}", d.selected_label()),
            Self::Options(l) => format!("list {}", l.selected()),
            Self::Color(p) => format!("color {}", p.color()),
            Self::ActivatedColor(a) => format!(
                "color {} [{}: {}]",
                a.governed().color(),
                a.label(),
                a.is_checked()
            ),
        };
        format!("{} ({state}): {shown}", self.label())
    }
}

/// The controls of one tab.
#[derive(Debug, Clone)]
pub struct Panel {
    kind: PanelKind,
    rows: Vec<Row>,
}

impl Panel {
    pub fn assemble(kind: PanelKind, store: &ParameterStore) -> Result<Self, BindingError> {
        match kind {
            PanelKind::Circle | PanelKind::Rectangle => shape_panel(kind, store),
            PanelKind::Labels => labels_panel(store),
        }
    }

    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn apply(&mut self, row: usize, gesture: Gesture) -> Option<ParamUpdate> {
        self.rows.get_mut(row)?.apply(gesture)
    }

    pub fn summary(&self) -> String {
        let mut out = format!("[{}]", self.kind);
        for row in &self.rows {
            out.push_str("\n  ");
            out.push_str(&row.summary());
        }
        out
    }
}

/// Assemble every tab, failing on the first binding fault.
pub fn assemble_all(store: &ParameterStore) -> Result<Vec<Panel>, BindingError> {
    PanelKind::ALL
        .iter()
        .map(|&kind| Panel::assemble(kind, store))
        .collect()
}

fn shape_panel(kind: PanelKind, store: &ParameterStore) -> Result<Panel, BindingError> {
    let section = kind.section();
    let path = |field: &str| ParamPath::new(section, field);

    let fill = CheckBox::new("Fill", path("fill"), store)?;

    let fill_alpha = Slider::new(
        SliderConfig {
            label: "Fill Opacity".into(),
            min: 0,
            max: 100,
            tick_interval: 5,
            conversion_factor: 100.0,
        },
        path("fill_alpha"),
        store,
    )?;

    let line_width = Slider::new(
        SliderConfig {
            label: "Line Width".into(),
            min: 0,
            max: LINE_WIDTH_MAX,
            tick_interval: 1,
            conversion_factor: 1.0,
        },
        path("line_width"),
        store,
    )?;

    let line_style = Dropdown::new(
        "Line Style",
        LINE_STYLES.iter().map(|(l, _)| l.to_string()).collect(),
        LINE_STYLES.iter().map(|(_, v)| Value::from(*v)).collect(),
        path("line_style"),
        store,
    )?;

    let color = ColorPicker::new(
        ColorPickerConfig {
            label: "Color".into(),
            ..ColorPickerConfig::default()
        },
        section,
        vec!["color".into()],
        store,
    )?;
    let color = Activator::new(
        "Use color cycle",
        path("color"),
        color,
        Value::automatic(),
        store,
    )?;

    Ok(Panel {
        kind,
        rows: vec![
            Row::CheckBox(fill),
            Row::Slider(fill_alpha),
            Row::Slider(line_width),
            Row::Dropdown(line_style),
            Row::ActivatedColor(color),
        ],
    })
}

fn labels_panel(store: &ParameterStore) -> Result<Panel, BindingError> {
    let section = PanelKind::Labels.section();
    let path = |field: &str| ParamPath::new(section, field);

    let family = ListOptions::new(
        "Font",
        FONT_FAMILIES.map(String::from).to_vec(),
        path("font_family"),
        store,
    )?;

    let size = IntegerBox::new(
        IntegerBoxConfig {
            label: "Font Size".into(),
            min: 4,
            max: 72,
            step: 1,
        },
        path("font_size"),
        store,
    )?;

    let color = ColorPicker::new(
        ColorPickerConfig {
            label: "Text Color".into(),
            default_color: "#000000".into(),
        },
        section,
        vec!["color".into()],
        store,
    )?;

    Ok(Panel {
        kind: PanelKind::Labels,
        rows: vec![
            Row::Options(family),
            Row::IntegerBox(size),
            Row::Color(color),
        ],
    })
}
