//! Figure preview: the circle and rectangle drawn with the current style.

use palette::Srgb;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders,
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Rectangle},
    },
};
use tuirealm::{
    Component, Event, MockComponent, State,
    command::{Cmd, CmdResult},
    props::{AttrValue, Attribute, Props},
};

use crate::color::{self, COLOR_CYCLE};
use crate::panel::{LINE_STYLES, LINE_WIDTH_MAX, PanelKind};
use crate::params::{ParameterStore, Value};
use crate::tui::activities::main::{Msg, UserEvent};

/// Drawing attributes of one shape, read from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    pub fill: bool,
    pub fill_alpha: f64,
    pub line_width: f64,
    /// Dropdown label for the stored line style code.
    pub line_style: &'static str,
    pub color: Srgb<u8>,
    /// True when the color comes from the automatic cycle.
    pub cycled: bool,
}

impl ShapeStyle {
    /// Unreadable fields fall back to a thin solid outline; `cycle_index`
    /// picks the automatic color.
    pub fn from_store(store: &ParameterStore, kind: PanelKind, cycle_index: usize) -> Self {
        let section = kind.section();
        let get = |field: &str| store.get(section, field);

        let stored_color = get("color").and_then(Value::as_str).unwrap_or_default();
        let (color, cycled) = match color::parse_rgb(stored_color) {
            Some(rgb) => (rgb, false),
            None => (
                color::parse_rgb(COLOR_CYCLE[cycle_index % COLOR_CYCLE.len()])
                    .unwrap_or(Srgb::new(0, 0, 0)),
                true,
            ),
        };

        let code = get("line_style").and_then(Value::as_str).unwrap_or("-");
        let line_style = LINE_STYLES
            .iter()
            .find(|(_, v)| *v == code)
            .map_or("Solid", |(label, _)| *label);

        Self {
            fill: get("fill").and_then(Value::as_bool).unwrap_or(false),
            fill_alpha: get("fill_alpha")
                .and_then(Value::as_f64)
                .unwrap_or(1.0)
                .clamp(0.0, 1.0),
            line_width: get("line_width")
                .and_then(Value::as_f64)
                .unwrap_or(1.0)
                .clamp(0.0, f64::from(LINE_WIDTH_MAX)),
            line_style,
            color,
            cycled,
        }
    }

    fn outline(&self) -> Option<Color> {
        (self.line_style != "None" && self.line_width > 0.0).then(|| rgb(self.color))
    }

    /// Fill color blended toward the (dark) canvas background.
    fn fill_color(&self) -> Option<Color> {
        if !self.fill || self.fill_alpha <= 0.0 {
            return None;
        }
        let scale = |c: u8| (f64::from(c) * self.fill_alpha).round() as u8;
        Some(Color::Rgb(
            scale(self.color.red),
            scale(self.color.green),
            scale(self.color.blue),
        ))
    }

    fn legend(&self, name: &str) -> String {
        let color = if self.cycled {
            "cycle".to_string()
        } else {
            color::to_hex(self.color)
        };
        format!(
            "{name}: {} {}px {color}, fill {}",
            self.line_style,
            self.line_width,
            if self.fill {
                format!("{:.0}%", self.fill_alpha * 100.0)
            } else {
                "off".to_string()
            }
        )
    }
}

fn rgb(c: Srgb<u8>) -> Color {
    Color::Rgb(c.red, c.green, c.blue)
}

/// Label text style, read from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub font_family: String,
    pub font_size: i64,
    pub color: Srgb<u8>,
}

impl LabelStyle {
    pub fn from_store(store: &ParameterStore) -> Self {
        let section = PanelKind::Labels.section();
        Self {
            font_family: store
                .get(section, "font_family")
                .and_then(Value::as_str)
                .unwrap_or("sans")
                .to_string(),
            font_size: store
                .get(section, "font_size")
                .and_then(Value::as_f64)
                .map_or(10, |v| v.round() as i64),
            color: store
                .get(section, "color")
                .and_then(Value::as_str)
                .and_then(color::parse_rgb)
                .unwrap_or(Srgb::new(0xff, 0xff, 0xff)),
        }
    }
}

pub struct Figure {
    props: Props,
    circle: ShapeStyle,
    rectangle: ShapeStyle,
    labels: LabelStyle,
}

impl Figure {
    pub fn new(store: &ParameterStore) -> Self {
        Self {
            props: Props::default(),
            circle: ShapeStyle::from_store(store, PanelKind::Circle, 0),
            rectangle: ShapeStyle::from_store(store, PanelKind::Rectangle, 1),
            labels: LabelStyle::from_store(store),
        }
    }

    fn draw_circle(ctx: &mut Context, style: &ShapeStyle) {
        let (x, y, radius) = (25.0, 25.0, 15.0);
        if let Some(fill) = style.fill_color() {
            let mut r = radius - 0.5;
            while r > 0.0 {
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: r,
                    color: fill,
                });
                r -= 0.75;
            }
        }
        if let Some(outline) = style.outline() {
            for ring in 0..style.line_width.ceil() as usize {
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: radius + ring as f64 * 0.4,
                    color: outline,
                });
            }
        }
    }

    fn draw_rectangle(ctx: &mut Context, style: &ShapeStyle) {
        let (x, y, width, height) = (55.0, 12.0, 35.0, 26.0);
        if let Some(fill) = style.fill_color() {
            let mut row = y + 0.5;
            while row < y + height {
                ctx.draw(&CanvasLine {
                    x1: x,
                    y1: row,
                    x2: x + width,
                    y2: row,
                    color: fill,
                });
                row += 0.75;
            }
        }
        if let Some(outline) = style.outline() {
            for ring in 0..style.line_width.ceil() as usize {
                let grow = ring as f64 * 0.4;
                ctx.draw(&Rectangle {
                    x: x - grow,
                    y: y - grow,
                    width: width + 2.0 * grow,
                    height: height + 2.0 * grow,
                    color: outline,
                });
            }
        }
    }
}

impl MockComponent for Figure {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let label_color = rgb(self.labels.color);
        let caption = format!(
            "{} {}pt",
            self.labels.font_family, self.labels.font_size
        );

        let canvas = Canvas::default()
            .block(Block::default().title(" Figure ").borders(Borders::ALL))
            .marker(Marker::Braille)
            .x_bounds([0.0, 100.0])
            .y_bounds([0.0, 50.0])
            .paint(|ctx| {
                Self::draw_circle(ctx, &self.circle);
                Self::draw_rectangle(ctx, &self.rectangle);
                ctx.layer();
                ctx.print(
                    2.0,
                    48.0,
                    Line::from(Span::styled(caption.clone(), Style::default().fg(label_color))),
                );
                ctx.print(2.0, 4.0, self.circle.legend("Circle"));
                ctx.print(2.0, 1.0, self.rectangle.legend("Rectangle"));
            });
        frame.render_widget(canvas, area);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::None
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for Figure {
    fn on(&mut self, _ev: Event<UserEvent>) -> Option<Msg> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_store;

    #[test]
    fn automatic_color_uses_the_cycle() {
        let store = default_store();
        let circle = ShapeStyle::from_store(&store, PanelKind::Circle, 0);
        assert!(circle.cycled);
        assert_eq!(color::to_hex(circle.color), COLOR_CYCLE[0]);
        assert!(circle.fill);
        assert_eq!(circle.line_style, "Solid");
    }

    #[test]
    fn literal_values_are_read_through() {
        let store = default_store();
        let rect = ShapeStyle::from_store(&store, PanelKind::Rectangle, 1);
        assert!(!rect.cycled);
        assert_eq!(color::to_hex(rect.color), "#1f77b4");
        assert_eq!(rect.line_style, "Dashed");
        assert_eq!(rect.line_width, 2.0);
        assert!(rect.fill_color().is_none());
    }

    #[test]
    fn none_line_style_hides_outline() {
        let store = default_store().with("Circle", "line_style", "None");
        let circle = ShapeStyle::from_store(&store, PanelKind::Circle, 0);
        assert!(circle.outline().is_none());
    }

    #[test]
    fn line_width_is_clamped_to_slider_range() {
        let wide = default_store().with("Circle", "line_width", 1e7);
        let circle = ShapeStyle::from_store(&wide, PanelKind::Circle, 0);
        assert_eq!(circle.line_width, f64::from(LINE_WIDTH_MAX));

        let negative = default_store().with("Rectangle", "line_width", -3_i64);
        let rect = ShapeStyle::from_store(&negative, PanelKind::Rectangle, 0);
        assert_eq!(rect.line_width, 0.0);
        assert!(rect.outline().is_none());
    }

    #[test]
    fn label_style_reads_font() {
        let labels = LabelStyle::from_store(&default_store());
        assert_eq!(labels.font_family, "DejaVu Sans");
        assert_eq!(labels.font_size, 10);
    }
}
