//! The control panel: a gain fader, a pan knob and a pan-rule dropdown.
//!
//! The editor is independent of any windowing system. It is fed pointer
//! and key input in logical pixels, reports edits through an
//! [`EditorHost`], and paints onto any [`Canvas`].

use tiny_skia::Pixmap;

use crate::dsp::PanRule;
use crate::params::{
    GainPanParams, ParamId, ParamValue, Params, GAIN, GAIN_RANGE, PAN_ANGLE, PAN_ANGLE_RANGE,
    PAN_RULE,
};

pub mod canvas;
pub mod color;
pub mod geom;
pub mod look;
pub mod path;
pub mod text;
pub mod widgets;


use canvas::{Canvas, PixmapCanvas};
use geom::{Point, Rect};
use look::{Palette, SliderColours, ROTARY_END, ROTARY_START};
use text::{Font, Justify};
use widgets::{ComboBox, Slider, SliderStyle};

pub const WIDTH: f32 = 150.0;
pub const HEIGHT: f32 = 550.0;

const VALUE_TEXT_SIZE: f32 = 13.0;
const RULE_TEXT_SIZE: f32 = 14.0;
const RULE_TEXT_INDENT: u8 = 6;

/// Receives parameter edits made through the editor. Every edit is wrapped
/// in a `begin_gesture`/`end_gesture` pair.
pub trait EditorHost {
    fn begin_gesture(&mut self, id: ParamId);
    fn set_param(&mut self, id: ParamId, value: ParamValue);
    fn end_gesture(&mut self, id: ParamId);
}

/// Keys understood while a value box is being edited.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
    Escape,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Grab {
    Gain,
    Pan,
}

// Typed text for one slider's value box. The first key replaces the
// whole text, which starts out as the displayed value.
struct TextEntry {
    target: Grab,
    text: String,
    replace: bool,
}

pub struct Editor<H> {
    host: H,
    palette: Palette,
    font: Option<Font>,
    gain: Slider,
    pan: Slider,
    rule: ComboBox,
    pointer: Point,
    grab: Option<Grab>,
    entry: Option<TextEntry>,
}

/// Returns the gain, panner and pan-rule areas, top to bottom.
pub fn areas() -> [Rect; 3] {
    let gain_height = (HEIGHT * 4.0 / 5.0).floor() - 30.0;
    let panner_height = (HEIGHT / 5.0).floor();
    let rule_height = HEIGHT - gain_height - panner_height;

    [
        Rect::new(0.0, 0.0, WIDTH, gain_height),
        Rect::new(0.0, gain_height, WIDTH, panner_height),
        Rect::new(0.0, gain_height + panner_height, WIDTH, rule_height),
    ]
}

impl<H: EditorHost> Editor<H> {
    pub fn new(host: H, params: &GainPanParams) -> Editor<H> {
        let gain = Slider::new(GAIN, SliderStyle::LinearVertical, GAIN_RANGE)
            .decimals(2)
            .suffix(" dB");
        let pan = Slider::new(PAN_ANGLE, SliderStyle::RotaryVerticalDrag, PAN_ANGLE_RANGE);
        let rule = ComboBox::new(PAN_RULE, PanRule::ALL.iter().map(|rule| rule.label()).collect());

        let font = Font::bundled();
        if font.is_none() {
            log::warn!("cannot parse the bundled font, labels are disabled");
        }

        let mut editor = Editor {
            host,
            palette: Palette::DEFAULT,
            font,
            gain,
            pan,
            rule,
            pointer: Point::default(),
            grab: None,
            entry: None,
        };

        editor.gain.set_value(params.gain);
        editor.pan.set_value(params.pan_angle);
        editor.rule.select(params.pan_rule.index());
        editor.layout();

        editor
    }

    fn layout(&mut self) {
        let [gain_area, panner_area, rule_area] = areas();
        let inset = (WIDTH / 6.0).floor();

        self.gain.set_bounds(gain_area.reduced(inset, 5.0));
        self.pan.set_bounds(panner_area.reduced(inset, 5.0));
        self.rule.set_bounds(rule_area.reduced(inset, 4.0));
    }

    pub fn size(&self) -> (f32, f32) {
        (WIDTH, HEIGHT)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn gain_slider(&self) -> &Slider {
        &self.gain
    }

    pub fn pan_slider(&self) -> &Slider {
        &self.pan
    }

    pub fn rule_box(&self) -> &ComboBox {
        &self.rule
    }

    pub fn rule_box_mut(&mut self) -> &mut ComboBox {
        &mut self.rule
    }

    /// Applies a change made elsewhere. Nothing is reported back to the host.
    pub fn param_changed(&mut self, id: ParamId, value: ParamValue) {
        match id {
            GAIN => self.gain.set_normalized(value),
            PAN_ANGLE => self.pan.set_normalized(value),
            PAN_RULE => self.rule.set_normalized(value),
            _ => {}
        }
    }

    /// The text being typed into a value box, if any.
    pub fn entry_text(&self) -> Option<&str> {
        self.entry.as_ref().map(|entry| entry.text.as_str())
    }

    fn slider(&self, grab: Grab) -> &Slider {
        match grab {
            Grab::Gain => &self.gain,
            Grab::Pan => &self.pan,
        }
    }

    fn slider_mut(&mut self, grab: Grab) -> &mut Slider {
        match grab {
            Grab::Gain => &mut self.gain,
            Grab::Pan => &mut self.pan,
        }
    }

    pub fn mouse_move(&mut self, point: Point) {
        self.pointer = point;

        if let Some(grab) = self.grab {
            let slider = self.slider_mut(grab);
            let before = slider.value();
            slider.drag_to(point);

            if slider.value() != before {
                let (id, value) = (slider.id(), slider.normalized());
                self.host.set_param(id, value);
            }
        }
    }

    /// Handles a primary button press at the last pointer position.
    /// Returns whether the press landed on a control.
    pub fn mouse_down(&mut self) -> bool {
        // a release can go missing when the pointer leaves the window
        if self.grab.is_some() {
            self.mouse_up();
        }

        let point = self.pointer;

        if let Some(target) = self.entry.as_ref().map(|entry| entry.target) {
            if self.slider(target).text_box().contains(point) {
                return true;
            }
            self.commit_entry();
        }

        for grab in [Grab::Gain, Grab::Pan] {
            if self.slider(grab).text_box().contains(point) {
                self.entry = Some(TextEntry {
                    target: grab,
                    text: self.slider(grab).display_text(),
                    replace: true,
                });
                return true;
            }
        }

        for grab in [Grab::Gain, Grab::Pan] {
            let slider = self.slider_mut(grab);
            let before = slider.value();
            if !slider.begin_drag(point) {
                continue;
            }

            let (id, value, changed) = (slider.id(), slider.normalized(), slider.value() != before);
            self.host.begin_gesture(id);
            if changed {
                self.host.set_param(id, value);
            }
            self.grab = Some(grab);

            return true;
        }

        if self.rule.is_enabled() && self.rule.bounds().contains(point) {
            self.rule.advance();
            self.commit_rule();
            return true;
        }

        false
    }

    pub fn mouse_up(&mut self) -> bool {
        let Some(grab) = self.grab.take() else {
            return false;
        };

        let slider = self.slider_mut(grab);
        slider.end_drag();
        let id = slider.id();
        self.host.end_gesture(id);

        true
    }

    /// Steps the dropdown when the pointer is over it. Scrolling up selects
    /// the previous rule.
    pub fn scroll(&mut self, delta_y: f32) -> bool {
        if !self.rule.is_enabled() || !self.rule.bounds().contains(self.pointer) {
            return false;
        }

        let step = if delta_y > 0.0 {
            -1
        } else if delta_y < 0.0 {
            1
        } else {
            0
        };
        if self.rule.nudge(step) {
            self.commit_rule();
        }

        true
    }

    /// Feeds a key to the value box being edited. Returns whether the key
    /// was used.
    pub fn key_down(&mut self, key: Key) -> bool {
        let Some(entry) = &mut self.entry else {
            return false;
        };

        match key {
            Key::Char(c) if c.is_control() => {}
            Key::Char(c) => {
                if entry.replace {
                    entry.text.clear();
                }
                entry.text.push(c);
                entry.replace = false;
            }
            Key::Backspace => {
                if entry.replace {
                    entry.text.clear();
                } else {
                    entry.text.pop();
                }
                entry.replace = false;
            }
            Key::Enter => self.commit_entry(),
            Key::Escape => self.entry = None,
        }

        true
    }

    // Text that does not parse leaves the value alone.
    fn commit_entry(&mut self) {
        let Some(entry) = self.entry.take() else {
            return;
        };

        let slider = self.slider_mut(entry.target);
        let id = slider.id();
        let Some(value) = GainPanParams::default().parse_param(id, &entry.text) else {
            return;
        };

        let before = slider.value();
        slider.set_normalized(value);
        if slider.value() != before {
            let value = slider.normalized();
            self.host.begin_gesture(id);
            self.host.set_param(id, value);
            self.host.end_gesture(id);
        }
    }

    fn commit_rule(&mut self) {
        let (id, value) = (self.rule.id(), self.rule.normalized());
        self.host.begin_gesture(id);
        self.host.set_param(id, value);
        self.host.end_gesture(id);
    }

    pub fn paint(&self, canvas: &mut impl Canvas) {
        let palette = &self.palette;
        canvas.fill_all(palette.window);

        look::draw_linear_slider(
            canvas,
            self.gain.track(),
            self.gain.position(),
            self.gain.position_of(0.0),
            &palette.gain,
        );
        self.draw_value_box(canvas, Grab::Gain, &palette.gain);

        look::draw_rotary_slider(
            canvas,
            self.pan.slider_area(),
            self.pan.normalized() as f32,
            ROTARY_START,
            ROTARY_END,
            &palette.pan,
        );
        self.draw_value_box(canvas, Grab::Pan, &palette.pan);

        look::draw_combo_box(canvas, self.rule.bounds(), self.rule.is_enabled(), &palette.rule);
        if let Some(font) = &self.font {
            look::draw_label(
                canvas,
                font,
                self.rule.display_text(),
                RULE_TEXT_SIZE,
                look::combo_text_area(self.rule.bounds()),
                Justify::Left(RULE_TEXT_INDENT),
                palette.rule.text,
            );
        }
    }

    fn draw_value_box(&self, canvas: &mut impl Canvas, grab: Grab, colours: &SliderColours) {
        let area = self.slider(grab).text_box();
        let entry = self.entry.as_ref().filter(|entry| entry.target == grab);
        look::draw_text_box(canvas, area, entry.is_some(), colours);

        let Some(font) = &self.font else {
            return;
        };

        match entry {
            Some(entry) => {
                let end = look::draw_label(
                    canvas,
                    font,
                    &entry.text,
                    VALUE_TEXT_SIZE,
                    area,
                    Justify::Centre,
                    colours.text,
                );
                look::draw_caret(canvas, end, area, colours.highlight);
            }
            None => {
                let text = self.slider(grab).display_text();
                look::draw_label(
                    canvas,
                    font,
                    &text,
                    VALUE_TEXT_SIZE,
                    area,
                    Justify::Centre,
                    colours.text,
                );
            }
        }
    }

    /// Paints into `pixmap`, which holds the editor at `scale` physical
    /// pixels per logical pixel.
    pub fn render(&self, pixmap: &mut Pixmap, scale: f32) {
        self.paint(&mut PixmapCanvas::new(pixmap, scale));
    }
}
