use swash::scale::outline::Outline;
use swash::scale::ScaleContext;
use swash::shape::ShapeContext;
use swash::zeno::Verb as OutlineVerb;
use swash::{CacheKey, FontRef, GlyphId};

use super::geom::{Point, Rect};
use super::path::Path;

static DEJAVU_SANS: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

pub struct Font {
    data: &'static [u8],
    offset: u32,
    key: CacheKey,
}

impl Font {
    pub fn from_bytes(data: &'static [u8], index: usize) -> Option<Font> {
        let font = FontRef::from_index(data, index)?;
        let (offset, key) = (font.offset, font.key);
        Some(Font { data, offset, key })
    }

    /// DejaVu Sans, shipped with the crate.
    pub fn bundled() -> Option<Font> {
        Font::from_bytes(DEJAVU_SANS, 0)
    }

    fn as_ref(&self) -> FontRef<'static> {
        FontRef {
            data: self.data,
            offset: self.offset,
            key: self.key,
        }
    }

    /// Ascent and descent at `size`, both measured away from the baseline.
    pub fn vertical_metrics(&self, size: f32) -> (f32, f32) {
        let metrics = self.as_ref().metrics(&[]).scale(size);
        (metrics.ascent, metrics.descent.abs())
    }

    // Glyph ids with their pen offsets, and the total advance.
    fn shape(&self, text: &str, size: f32) -> (Vec<(GlyphId, Point)>, f32) {
        let mut context = ShapeContext::new();
        let mut shaper = context.builder(self.as_ref()).size(size).build();
        shaper.add_str(text);

        let mut glyphs = Vec::new();
        let mut pen = 0.0;
        shaper.shape_with(|cluster| {
            for glyph in cluster.glyphs {
                glyphs.push((glyph.id, Point::new(pen + glyph.x, glyph.y)));
                pen += glyph.advance;
            }
        });

        (glyphs, pen)
    }

    pub fn measure(&self, text: &str, size: f32) -> f32 {
        self.shape(text, size).1
    }

    /// Outlines of `text` set at `size` with the baseline starting at
    /// `origin`.
    pub fn outline(&self, text: &str, size: f32, origin: Point) -> Path {
        let (glyphs, _) = self.shape(text, size);

        let mut context = ScaleContext::new();
        let mut scaler = context.builder(self.as_ref()).size(size).build();

        let mut path = Path::new();
        for (id, offset) in glyphs {
            if let Some(outline) = scaler.scale_outline(id) {
                let glyph_origin = Point::new(origin.x + offset.x, origin.y - offset.y);
                append_outline(&mut path, &outline, glyph_origin);
            }
        }

        path
    }
}

// Outline coordinates point up from the baseline.
fn append_outline(path: &mut Path, outline: &Outline, origin: Point) -> Option<()> {
    let mut points = outline
        .points()
        .iter()
        .map(|point| Point::new(origin.x + point.x, origin.y - point.y));

    for verb in outline.verbs() {
        match verb {
            OutlineVerb::MoveTo => {
                path.move_to(points.next()?);
            }
            OutlineVerb::LineTo => {
                path.line_to(points.next()?);
            }
            OutlineVerb::QuadTo => {
                let control = points.next()?;
                path.quadratic_to(control, points.next()?);
            }
            OutlineVerb::CurveTo => {
                let control1 = points.next()?;
                let control2 = points.next()?;
                path.cubic_to(control1, control2, points.next()?);
            }
            OutlineVerb::Close => {
                path.close();
            }
        }
    }

    Some(())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Justify {
    /// Flush left after an indent.
    Left(u8),
    Centre,
}

/// Where the baseline of `text` starts when it is set in `area`,
/// vertically centred on the font's ascent and descent.
pub fn baseline_origin(font: &Font, text: &str, size: f32, area: Rect, justify: Justify) -> Point {
    let (ascent, descent) = font.vertical_metrics(size);
    let y = area.centre_y() + 0.5 * (ascent - descent);

    let x = match justify {
        Justify::Left(indent) => area.x + indent as f32,
        Justify::Centre => area.centre_x() - 0.5 * font.measure(text, size),
    };

    Point::new(x, y)
}
