use std::f32::consts::FRAC_PI_2;

use super::geom::{Affine, Point, Rect};

// Control point distance for a quarter-circle cubic.
const KAPPA: f32 = 0.552_284_8;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Verb {
    Move(Point),
    Line(Point),
    Quadratic(Point, Point),
    Cubic(Point, Point, Point),
    Close,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    verbs: Vec<Verb>,
}

impl Path {
    pub fn new() -> Path {
        Path { verbs: Vec::new() }
    }

    #[inline]
    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    pub fn move_to(&mut self, point: Point) -> &mut Self {
        self.verbs.push(Verb::Move(point));
        self
    }

    pub fn line_to(&mut self, point: Point) -> &mut Self {
        self.verbs.push(Verb::Line(point));
        self
    }

    pub fn quadratic_to(&mut self, control: Point, point: Point) -> &mut Self {
        self.verbs.push(Verb::Quadratic(control, point));
        self
    }

    pub fn cubic_to(&mut self, control1: Point, control2: Point, point: Point) -> &mut Self {
        self.verbs.push(Verb::Cubic(control1, control2, point));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.verbs.push(Verb::Close);
        self
    }

    pub fn add_rectangle(&mut self, rect: Rect) -> &mut Self {
        self.move_to(Point::new(rect.x, rect.y))
            .line_to(Point::new(rect.right(), rect.y))
            .line_to(Point::new(rect.right(), rect.bottom()))
            .line_to(Point::new(rect.x, rect.bottom()))
            .close()
    }

    pub fn add_ellipse(&mut self, rect: Rect) -> &mut Self {
        let centre = rect.centre();
        let rx = 0.5 * rect.width;
        let ry = 0.5 * rect.height;
        let kx = KAPPA * rx;
        let ky = KAPPA * ry;

        let top = Point::new(centre.x, centre.y - ry);
        let right = Point::new(centre.x + rx, centre.y);
        let bottom = Point::new(centre.x, centre.y + ry);
        let left = Point::new(centre.x - rx, centre.y);

        self.move_to(top)
            .cubic_to(top + Point::new(kx, 0.0), right - Point::new(0.0, ky), right)
            .cubic_to(right + Point::new(0.0, ky), bottom + Point::new(kx, 0.0), bottom)
            .cubic_to(bottom - Point::new(kx, 0.0), left + Point::new(0.0, ky), left)
            .cubic_to(left - Point::new(0.0, ky), top - Point::new(kx, 0.0), top)
            .close()
    }

    /// Adds an arc around `centre` as a new sub-path. Angles are in
    /// radians, clockwise from twelve o'clock, and may run either way.
    pub fn add_centred_arc(
        &mut self,
        centre: Point,
        radius_x: f32,
        radius_y: f32,
        from: f32,
        to: f32,
    ) -> &mut Self {
        self.move_to(centre.on_circle(radius_x, radius_y, from));

        let total = to - from;
        if total == 0.0 {
            return self;
        }

        // one cubic per quarter turn or less, with slack for rounding in
        // angles that are whole quarter turns
        let count = (total.abs() / FRAC_PI_2 - 1e-4).ceil().max(1.0) as usize;
        let step = total / count as f32;
        let k = (4.0 / 3.0) * (0.25 * step).tan();

        let tangent = |angle: f32| Point::new(radius_x * angle.cos(), radius_y * angle.sin());

        let mut angle = from;
        for index in 0..count {
            let next = if index + 1 == count {
                to
            } else {
                angle + step
            };

            let start = centre.on_circle(radius_x, radius_y, angle);
            let end = centre.on_circle(radius_x, radius_y, next);
            self.cubic_to(
                start + k * tangent(angle),
                end - k * tangent(next),
                end,
            );

            angle = next;
        }

        self
    }

    pub fn transform(&mut self, affine: &Affine) -> &mut Self {
        for verb in &mut self.verbs {
            match verb {
                Verb::Move(point) | Verb::Line(point) => *point = affine.apply(*point),
                Verb::Quadratic(control, point) => {
                    *control = affine.apply(*control);
                    *point = affine.apply(*point);
                }
                Verb::Cubic(control1, control2, point) => {
                    *control1 = affine.apply(*control1);
                    *control2 = affine.apply(*control2);
                    *point = affine.apply(*point);
                }
                Verb::Close => {}
            }
        }

        self
    }

    /// Bounding box of the end and control points.
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = Vec::new();
        for verb in &self.verbs {
            match *verb {
                Verb::Move(point) | Verb::Line(point) => points.push(point),
                Verb::Quadratic(control, point) => points.extend([control, point]),
                Verb::Cubic(control1, control2, point) => {
                    points.extend([control1, control2, point])
                }
                Verb::Close => {}
            }
        }

        let (first, rest) = points.split_first()?;
        let (mut min, mut max) = (*first, *first);
        for point in rest {
            min = Point::new(min.x.min(point.x), min.y.min(point.y));
            max = Point::new(max.x.max(point.x), max.y.max(point.y));
        }

        Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
}
