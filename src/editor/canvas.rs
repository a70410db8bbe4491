use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

use super::color::Color;
use super::geom::Rect;
use super::path::{Path, Verb};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub cap: LineCap,
}

impl Stroke {
    pub fn new(width: f32) -> Stroke {
        Stroke {
            width,
            cap: LineCap::default(),
        }
    }

    pub fn cap(self, cap: LineCap) -> Stroke {
        Stroke { cap, ..self }
    }
}

/// Drawing surface used by the paint routines. Coordinates are logical
/// editor pixels.
pub trait Canvas {
    fn fill_all(&mut self, color: Color);
    fn fill_path(&mut self, path: &Path, color: Color);
    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let mut path = Path::new();
        path.add_rectangle(rect);
        self.fill_path(&path, color);
    }

    /// Outlines `rect` with borders drawn inside its edges.
    fn draw_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        let thickness = thickness.min(0.5 * rect.width).min(0.5 * rect.height);
        let inner_height = rect.height - 2.0 * thickness;

        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, thickness), color);
        self.fill_rect(
            Rect::new(rect.x, rect.bottom() - thickness, rect.width, thickness),
            color,
        );
        self.fill_rect(
            Rect::new(rect.x, rect.y + thickness, thickness, inner_height),
            color,
        );
        self.fill_rect(
            Rect::new(rect.right() - thickness, rect.y + thickness, thickness, inner_height),
            color,
        );
    }

    fn fill_ellipse(&mut self, rect: Rect, color: Color) {
        let mut path = Path::new();
        path.add_ellipse(rect);
        self.fill_path(&path, color);
    }
}

/// Rasterises onto a [`Pixmap`], scaled from logical to physical pixels.
pub struct PixmapCanvas<'a> {
    pixmap: &'a mut Pixmap,
    transform: Transform,
}

impl<'a> PixmapCanvas<'a> {
    pub fn new(pixmap: &'a mut Pixmap, scale: f32) -> PixmapCanvas<'a> {
        PixmapCanvas {
            pixmap,
            transform: Transform::from_scale(scale, scale),
        }
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r(), color.g(), color.b(), color.a());
    paint.anti_alias = true;
    paint
}

// Returns `None` for paths tiny-skia cannot rasterise, such as a lone move.
fn build_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for verb in path.verbs() {
        match *verb {
            Verb::Move(point) => builder.move_to(point.x, point.y),
            Verb::Line(point) => builder.line_to(point.x, point.y),
            Verb::Quadratic(control, point) => {
                builder.quad_to(control.x, control.y, point.x, point.y)
            }
            Verb::Cubic(control1, control2, point) => builder.cubic_to(
                control1.x, control1.y, control2.x, control2.y, point.x, point.y,
            ),
            Verb::Close => builder.close(),
        }
    }

    builder.finish()
}

impl Canvas for PixmapCanvas<'_> {
    fn fill_all(&mut self, color: Color) {
        self.pixmap.fill(tiny_skia::Color::from_rgba8(
            color.r(),
            color.g(),
            color.b(),
            color.a(),
        ));
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        if let Some(path) = build_path(path) {
            self.pixmap.fill_path(&path, &paint(color), FillRule::Winding, self.transform, None);
        }
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, color: Color) {
        let Some(path) = build_path(path) else {
            return;
        };

        let stroke = tiny_skia::Stroke {
            width: stroke.width,
            line_cap: match stroke.cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Square => tiny_skia::LineCap::Square,
            },
            ..tiny_skia::Stroke::default()
        };

        self.pixmap.stroke_path(&path, &paint(color), &stroke, self.transform, None);
    }
}

/// Allocates a pixmap for a `width` × `height` logical area at `scale`.
pub fn pixmap_for(width: f64, height: f64, scale: f64) -> Option<Pixmap> {
    let width = (width * scale).round();
    let height = (height * scale).round();
    if !(width >= 1.0 && height >= 1.0) {
        return None;
    }

    Pixmap::new(width as u32, height as u32)
}

/// Packs a pixmap into `0xAARRGGBB` words, un-premultiplying as it goes.
pub fn copy_to_framebuffer(pixmap: &Pixmap, framebuffer: &mut Vec<u32>) {
    framebuffer.clear();
    framebuffer.extend(pixmap.pixels().iter().map(|pixel| {
        let pixel = pixel.demultiply();
        u32::from(Color::rgba(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()))
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::geom::Point;

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let pixel = pixmap.pixel(x, y).unwrap().demultiply();
        (pixel.red(), pixel.green(), pixel.blue(), pixel.alpha())
    }

    #[test]
    fn fills_and_outlines() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        let mut canvas = PixmapCanvas::new(&mut pixmap, 1.0);
        canvas.fill_all(Color::rgb(10, 20, 30));
        canvas.draw_rect(Rect::new(2.0, 2.0, 10.0, 10.0), 1.0, Color::rgb(200, 0, 0));
        canvas.fill_ellipse(Rect::new(4.0, 4.0, 6.0, 6.0), Color::rgb(0, 200, 0));

        assert_eq!(pixel(&pixmap, 0, 0), (10, 20, 30, 255));
        assert_eq!(pixel(&pixmap, 2, 7), (200, 0, 0, 255));
        assert_eq!(pixel(&pixmap, 11, 11), (200, 0, 0, 255));
        assert_eq!(pixel(&pixmap, 3, 3), (10, 20, 30, 255));
        assert_eq!(pixel(&pixmap, 7, 7), (0, 200, 0, 255));
    }

    #[test]
    fn scales_to_physical_pixels() {
        let mut pixmap = pixmap_for(10.0, 10.0, 2.0).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (20, 20));

        let mut canvas = PixmapCanvas::new(&mut pixmap, 2.0);
        canvas.fill_rect(Rect::new(5.0, 0.0, 5.0, 10.0), Color::rgb(255, 255, 255));

        assert_eq!(pixel(&pixmap, 9, 5).3, 0);
        assert_eq!(pixel(&pixmap, 10, 5), (255, 255, 255, 255));
        assert_eq!(pixel(&pixmap, 19, 19), (255, 255, 255, 255));
    }

    #[test]
    fn strokes_with_round_caps() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();

        let mut line = Path::new();
        line.move_to(Point::new(5.0, 10.0)).line_to(Point::new(15.0, 10.0));
        PixmapCanvas::new(&mut pixmap, 1.0).stroke_path(
            &line,
            &Stroke::new(4.0).cap(LineCap::Round),
            Color::rgb(0, 0, 255),
        );

        assert_eq!(pixel(&pixmap, 10, 10), (0, 0, 255, 255));
        assert_eq!(pixel(&pixmap, 4, 10), (0, 0, 255, 255));
        assert_eq!(pixel(&pixmap, 10, 14).3, 0);
    }

    #[test]
    fn lone_move_draws_nothing() {
        let mut pixmap = Pixmap::new(4, 4).unwrap();

        let mut lone = Path::new();
        lone.move_to(Point::new(1.0, 1.0));
        {
            let mut canvas = PixmapCanvas::new(&mut pixmap, 1.0);
            canvas.stroke_path(&lone, &Stroke::new(4.0), Color::rgb(255, 0, 0));
            canvas.fill_path(&lone, Color::rgb(255, 0, 0));
        }

        assert_eq!(pixel(&pixmap, 1, 1).3, 0);
    }

    #[test]
    fn framebuffer_words() {
        let mut pixmap = Pixmap::new(2, 1).unwrap();
        PixmapCanvas::new(&mut pixmap, 1.0).fill_all(Color::rgb(59, 66, 82));

        let mut framebuffer = vec![7; 9];
        copy_to_framebuffer(&pixmap, &mut framebuffer);
        assert_eq!(framebuffer, vec![0xFF3B4252; 2]);
    }
}
