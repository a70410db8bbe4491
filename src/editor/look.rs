//! Paint routines for the editor's widgets.
//!
//! Angles are in radians, clockwise from twelve o'clock. A rotary value
//! arc always grows out of the top of the knob, so a centred pan shows no
//! value arc at all.

use std::f32::consts::PI;

use super::canvas::{Canvas, LineCap, Stroke};
use super::color::{self, Color};
use super::geom::{Affine, Point, Rect};
use super::path::Path;
use super::text::{self, Font, Justify};

pub const ROTARY_START: f32 = 1.2 * PI;
pub const ROTARY_END: f32 = 2.8 * PI;

const TRACK_WIDTH: f32 = 10.0;
const UNITY_MARKER_WIDTH: f32 = 60.0;
const CAP_WIDTH: f32 = 36.0;
const CAP_HEIGHT: f32 = 18.0;
const POINTER_THICKNESS: f32 = 2.4;
const ARROW_ZONE: f32 = 15.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SliderColours {
    pub background: Color,
    pub track: Color,
    pub outline: Color,
    pub thumb: Color,
    pub text_box_outline: Color,
    pub text: Color,
    pub highlight: Color,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComboColours {
    pub background: Color,
    pub text: Color,
    pub arrow: Color,
    pub outline: Color,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    pub window: Color,
    pub gain: SliderColours,
    pub pan: SliderColours,
    pub rule: ComboColours,
}

impl Palette {
    pub const DEFAULT: Palette = Palette {
        window: color::PANEL,
        gain: SliderColours {
            background: color::TROUGH,
            track: color::FROST,
            outline: color::TROUGH,
            thumb: color::SNOW,
            text_box_outline: color::OUTLINE,
            text: color::SNOW,
            highlight: color::HIGHLIGHT,
        },
        pan: SliderColours {
            background: color::SNOW,
            track: color::FROST,
            outline: color::TROUGH,
            thumb: color::TROUGH,
            text_box_outline: color::OUTLINE,
            text: color::SNOW,
            highlight: color::HIGHLIGHT,
        },
        rule: ComboColours {
            background: color::PANEL,
            text: color::SNOW,
            arrow: color::SNOW,
            outline: color::OUTLINE,
        },
    };
}

impl Default for Palette {
    fn default() -> Palette {
        Palette::DEFAULT
    }
}

/// Draws a knob into `area` with `proportion` of the way from
/// `start_angle` to `end_angle` highlighted.
pub fn draw_rotary_slider(
    canvas: &mut impl Canvas,
    area: Rect,
    proportion: f32,
    start_angle: f32,
    end_angle: f32,
    colours: &SliderColours,
) {
    let bounds = area.reduced(10.0, 10.0);
    let centre = bounds.centre();
    let radius = 0.5 * bounds.width.min(bounds.height);

    let to_angle = start_angle + proportion * (end_angle - start_angle);
    let line_w = (0.5 * radius).min(4.0);
    let arc_radius = radius - 0.5 * line_w;
    let arc_stroke = Stroke::new(line_w).cap(LineCap::Round);

    let mut background_arc = Path::new();
    background_arc.add_centred_arc(centre, arc_radius, arc_radius, start_angle, end_angle);
    canvas.stroke_path(&background_arc, &arc_stroke, colours.outline);

    let mut value_arc = Path::new();
    value_arc.add_centred_arc(centre, arc_radius, arc_radius, 2.0 * PI, to_angle);
    canvas.stroke_path(&value_arc, &arc_stroke, colours.track);

    let inner = radius - 2.0 * line_w;
    canvas.fill_ellipse(
        Rect::new(centre.x - inner, centre.y - inner, 2.0 * inner, 2.0 * inner),
        colours.background,
    );

    let mut pointer = Path::new();
    pointer
        .add_rectangle(Rect::new(
            -0.5 * POINTER_THICKNESS,
            -inner,
            POINTER_THICKNESS,
            0.5 * inner,
        ))
        .transform(&Affine::rotation(to_angle).translated(centre.x, centre.y));
    canvas.fill_path(&pointer, colours.thumb);
}

/// Draws a vertical fader. `track` is the thumb's range of travel,
/// `position` the thumb's y coordinate and `unity` the y coordinate of
/// the 0 dB marker.
pub fn draw_linear_slider(
    canvas: &mut impl Canvas,
    track: Rect,
    position: f32,
    unity: f32,
    colours: &SliderColours,
) {
    let centre_x = track.centre_x();

    let mut marker = Path::new();
    marker
        .move_to(Point::new(centre_x - 0.5 * UNITY_MARKER_WIDTH, unity))
        .line_to(Point::new(centre_x + 0.5 * UNITY_MARKER_WIDTH, unity));
    canvas.stroke_path(&marker, &Stroke::new(1.0), colours.text);

    let column_x = centre_x - 0.5 * TRACK_WIDTH;
    canvas.fill_rect(
        Rect::new(column_x, track.y, TRACK_WIDTH, track.height),
        colours.background,
    );
    canvas.fill_rect(
        Rect::new(column_x, position, TRACK_WIDTH, (track.bottom() - position).max(0.0)),
        colours.track,
    );

    draw_fader_cap(canvas, Point::new(centre_x, position), colours);
}

fn draw_fader_cap(canvas: &mut impl Canvas, centre: Point, colours: &SliderColours) {
    let cap = Rect::new(
        centre.x - 0.5 * CAP_WIDTH,
        centre.y - 0.5 * CAP_HEIGHT,
        CAP_WIDTH,
        CAP_HEIGHT,
    );

    canvas.fill_rect(cap, colours.outline);
    canvas.draw_rect(cap, 1.0, colours.text_box_outline);

    let mut grip = Path::new();
    grip.move_to(Point::new(cap.x + 4.0, centre.y))
        .line_to(Point::new(cap.right() - 4.0, centre.y));
    canvas.stroke_path(&grip, &Stroke::new(2.0), colours.thumb);
}

/// Outlines a slider's value box, in the highlight colour while it has
/// keyboard focus.
pub fn draw_text_box(
    canvas: &mut impl Canvas,
    bounds: Rect,
    focused: bool,
    colours: &SliderColours,
) {
    let outline = if focused {
        colours.highlight
    } else {
        colours.text_box_outline
    };
    canvas.draw_rect(bounds, 1.0, outline);
}

/// Sets `text` in `area` and returns where the text ends.
pub fn draw_label(
    canvas: &mut impl Canvas,
    font: &Font,
    text: &str,
    size: f32,
    area: Rect,
    justify: Justify,
    colour: Color,
) -> Point {
    let origin = text::baseline_origin(font, text, size, area, justify);
    canvas.fill_path(&font.outline(text, size, origin), colour);

    Point::new(origin.x + font.measure(text, size), origin.y)
}

/// A text cursor at `position` on the baseline.
pub fn draw_caret(canvas: &mut impl Canvas, position: Point, area: Rect, colour: Color) {
    let x = position.x.round() + 0.5;
    let mut caret = Path::new();
    caret
        .move_to(Point::new(x, area.y + 3.0))
        .line_to(Point::new(x, area.bottom() - 3.0));
    canvas.stroke_path(&caret, &Stroke::new(1.0), colour);
}

/// The part of a combo box left of its arrow.
pub fn combo_text_area(bounds: Rect) -> Rect {
    Rect::new(bounds.x, bounds.y, (bounds.width - ARROW_ZONE).max(0.0), bounds.height)
}

pub fn draw_combo_box(
    canvas: &mut impl Canvas,
    bounds: Rect,
    enabled: bool,
    colours: &ComboColours,
) {
    canvas.fill_rect(bounds, colours.background);
    canvas.draw_rect(bounds, 1.0, colours.outline);

    let zone = Rect::new(bounds.right() - ARROW_ZONE, bounds.y, 10.0, bounds.height);
    let mut chevron = Path::new();
    chevron
        .move_to(Point::new(zone.x + 2.0, zone.centre_y() - 1.0))
        .line_to(Point::new(zone.centre_x(), zone.centre_y() + 2.0))
        .line_to(Point::new(zone.right() - 2.0, zone.centre_y() - 1.0));

    let alpha = if enabled { 0.9 } else { 0.2 };
    canvas.stroke_path(&chevron, &Stroke::new(2.0), colours.arrow.with_alpha(alpha));
}
