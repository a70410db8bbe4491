use super::geom::{Point, Rect};
use super::look::{ROTARY_END, ROTARY_START};
use crate::params::{ParamId, ParamValue, Range, SkewedRange};

pub const TEXT_BOX_WIDTH: f32 = 100.0;
pub const TEXT_BOX_HEIGHT: f32 = 18.0;

/// Gap between a linear slider's ends and the extremes of thumb travel.
pub const THUMB_INDENT: f32 = 12.0;

/// Vertical distance a rotary drag covers for the full range.
pub const DRAG_DISTANCE: f32 = 250.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SliderStyle {
    LinearVertical,
    RotaryVerticalDrag,
}

#[derive(Copy, Clone, Debug)]
struct Drag {
    start_y: f32,
    start_proportion: f64,
}

pub struct Slider {
    id: ParamId,
    style: SliderStyle,
    range: SkewedRange,
    decimals: usize,
    suffix: &'static str,
    bounds: Rect,
    value: f32,
    drag: Option<Drag>,
}

impl Slider {
    pub fn new(id: ParamId, style: SliderStyle, range: SkewedRange) -> Slider {
        Slider {
            id,
            style,
            range,
            decimals: 0,
            suffix: "",
            bounds: Rect::default(),
            value: range.start as f32,
            drag: None,
        }
    }

    pub fn decimals(self, decimals: usize) -> Slider {
        Slider { decimals, ..self }
    }

    pub fn suffix(self, suffix: &'static str) -> Slider {
        Slider { suffix, ..self }
    }

    #[inline]
    pub fn id(&self) -> ParamId {
        self.id
    }

    #[inline]
    pub fn style(&self) -> SliderStyle {
        self.style
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// The area below the slider holding its value text.
    pub fn text_box(&self) -> Rect {
        let mut area = self.bounds;
        let text_box = area.remove_from_bottom(TEXT_BOX_HEIGHT);
        let width = TEXT_BOX_WIDTH.min(text_box.width);

        Rect::new(text_box.centre_x() - 0.5 * width, text_box.y, width, text_box.height)
    }

    /// The area above the text box.
    pub fn slider_area(&self) -> Rect {
        let mut area = self.bounds;
        area.remove_from_bottom(TEXT_BOX_HEIGHT);
        area
    }

    /// The range the thumb travels over.
    pub fn track(&self) -> Rect {
        let area = self.slider_area();
        match self.style {
            SliderStyle::LinearVertical => area.reduced(0.0, THUMB_INDENT),
            SliderStyle::RotaryVerticalDrag => area,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = self.range.snap(value);
    }

    #[inline]
    pub fn normalized(&self) -> ParamValue {
        self.range.encode(&self.value)
    }

    pub fn set_normalized(&mut self, value: ParamValue) {
        self.value = self.range.decode(value);
    }

    /// Position of `value` along the track, top to bottom.
    pub fn position_of(&self, value: f32) -> f32 {
        let track = self.track();
        let proportion = self.range.encode(&value) as f32;
        track.y + (1.0 - proportion) * track.height
    }

    #[inline]
    pub fn position(&self) -> f32 {
        self.position_of(self.value)
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        ROTARY_START + self.normalized() as f32 * (ROTARY_END - ROTARY_START)
    }

    pub fn display_text(&self) -> String {
        format!("{:.*}{}", self.decimals, self.value, self.suffix)
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Starts a drag if `point` is over the slider. A linear slider jumps to
    /// the clicked position.
    pub fn begin_drag(&mut self, point: Point) -> bool {
        if !self.slider_area().contains(point) {
            return false;
        }

        self.drag = Some(Drag {
            start_y: point.y,
            start_proportion: self.normalized(),
        });
        self.drag_to(point);

        true
    }

    pub fn drag_to(&mut self, point: Point) {
        let Some(drag) = self.drag else {
            return;
        };

        let proportion = match self.style {
            SliderStyle::LinearVertical => {
                let track = self.track();
                if track.height > 0.0 {
                    1.0 - ((point.y - track.y) / track.height) as f64
                } else {
                    drag.start_proportion
                }
            }
            SliderStyle::RotaryVerticalDrag => {
                drag.start_proportion + ((drag.start_y - point.y) / DRAG_DISTANCE) as f64
            }
        };

        self.set_normalized(proportion.max(0.0).min(1.0));
    }

    pub fn end_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }
}

/// A single-choice list over centred normalized bins.
pub struct ComboBox {
    id: ParamId,
    items: Vec<&'static str>,
    selected: usize,
    bounds: Rect,
    enabled: bool,
}

impl ComboBox {
    pub fn new(id: ParamId, items: Vec<&'static str>) -> ComboBox {
        ComboBox {
            id,
            items,
            selected: 0,
            bounds: Rect::default(),
            enabled: true,
        }
    }

    #[inline]
    pub fn id(&self) -> ParamId {
        self.id
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[inline]
    pub fn items(&self) -> &[&'static str] {
        &self.items
    }

    #[inline]
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = index;
        }
    }

    pub fn normalized(&self) -> ParamValue {
        if self.items.is_empty() {
            return 0.0;
        }

        (self.selected as f64 + 0.5) / self.items.len() as f64
    }

    pub fn set_normalized(&mut self, value: ParamValue) {
        let count = self.items.len();
        if count > 0 {
            let index = (value.max(0.0) * count as f64) as usize;
            self.selected = index.min(count - 1);
        }
    }

    /// Moves to the next item, wrapping past the end.
    pub fn advance(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    /// Moves `delta` items, stopping at either end. Returns whether the
    /// selection changed.
    pub fn nudge(&mut self, delta: isize) -> bool {
        if self.items.is_empty() {
            return false;
        }

        let last = self.items.len() as isize - 1;
        let index = (self.selected as isize + delta).max(0).min(last) as usize;
        let changed = index != self.selected;
        self.selected = index;

        changed
    }

    pub fn display_text(&self) -> &str {
        self.items.get(self.selected).copied().unwrap_or("")
    }
}
