use std::ops::{Add, Mul, Sub};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Point {
        Point { x, y }
    }

    /// The point `radius` away from `self` at `angle`, measured clockwise
    /// from twelve o'clock.
    #[inline]
    pub fn on_circle(self, radius_x: f32, radius_y: f32, angle: f32) -> Point {
        Point::new(self.x + radius_x * angle.sin(), self.y - radius_y * angle.cos())
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<Point> for f32 {
    type Output = Point;

    #[inline]
    fn mul(self, point: Point) -> Point {
        Point::new(self * point.x, self * point.y)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn centre_x(&self) -> f32 {
        self.x + 0.5 * self.width
    }

    #[inline]
    pub fn centre_y(&self) -> f32 {
        self.y + 0.5 * self.height
    }

    #[inline]
    pub fn centre(&self) -> Point {
        Point::new(self.centre_x(), self.centre_y())
    }

    /// Shrinks by `dx` on the left and right and `dy` on the top and
    /// bottom, never below zero size.
    #[inline]
    pub fn reduced(&self, dx: f32, dy: f32) -> Rect {
        let width = (self.width - 2.0 * dx).max(0.0);
        let height = (self.height - 2.0 * dy).max(0.0);

        Rect::new(self.centre_x() - 0.5 * width, self.centre_y() - 0.5 * height, width, height)
    }

    /// Cuts `amount` off the bottom and returns it, leaving the rest in
    /// `self`.
    #[inline]
    pub fn remove_from_bottom(&mut self, amount: f32) -> Rect {
        let amount = amount.max(0.0).min(self.height);
        self.height -= amount;

        Rect::new(self.x, self.bottom(), self.width, amount)
    }

    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// A 2D affine transform mapping `(x, y)` to
/// `(a x + c y + tx, b x + d y + ty)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Affine {
    fn default() -> Affine {
        Affine::identity()
    }
}

impl Affine {
    #[inline]
    pub const fn identity() -> Affine {
        Affine {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Clockwise rotation (in y-down coordinates) about the origin.
    #[inline]
    pub fn rotation(angle: f32) -> Affine {
        let (sin, cos) = angle.sin_cos();

        Affine {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    #[inline]
    pub fn translated(self, dx: f32, dy: f32) -> Affine {
        Affine {
            tx: self.tx + dx,
            ty: self.ty + dy,
            ..self
        }
    }

    #[inline]
    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.c * point.y + self.tx,
            self.b * point.x + self.d * point.y + self.ty,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn reduce_and_split() {
        let area = Rect::new(0.0, 410.0, 150.0, 110.0);
        assert_eq!(area.reduced(25.0, 5.0), Rect::new(25.0, 415.0, 100.0, 100.0));
        assert_eq!(area.reduced(100.0, 0.0).width, 0.0);

        let mut slider = Rect::new(25.0, 5.0, 100.0, 400.0);
        let text_box = slider.remove_from_bottom(18.0);
        assert_eq!(text_box, Rect::new(25.0, 387.0, 100.0, 18.0));
        assert_eq!(slider, Rect::new(25.0, 5.0, 100.0, 382.0));
    }

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(rect.contains(Point::new(10.0, 14.9)));
        assert!(!rect.contains(Point::new(15.0, 12.0)));
    }

    #[test]
    fn angles_run_clockwise_from_top() {
        let centre = Point::new(10.0, 10.0);
        assert!(close(centre.on_circle(2.0, 2.0, 0.0), Point::new(10.0, 8.0)));
        assert!(close(centre.on_circle(2.0, 2.0, 0.5 * PI), Point::new(12.0, 10.0)));

        let pointer_tip =
            Affine::rotation(0.5 * PI).translated(10.0, 10.0).apply(Point::new(0.0, -2.0));
        assert!(close(pointer_tip, Point::new(12.0, 10.0)));
    }
}
