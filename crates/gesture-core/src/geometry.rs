#![forbid(unsafe_code)]

//! Geometric primitives for contact positions and velocities.
//!
//! All coordinates are CSS pixels in the host's client space (origin at the
//! top-left, `y` growing downwards). Angles are radians as returned by
//! [`f64::atan2`].

/// A point in client space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle of the vector from `self` to `other`.
    #[inline]
    #[must_use]
    pub fn angle_to(self, other: Self) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Midpoint between two points.
    #[inline]
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Displacement from `origin` to `self`.
    #[inline]
    #[must_use]
    pub fn delta_from(self, origin: Self) -> Vector {
        Vector::new(self.x - origin.x, self.y - origin.y)
    }

    /// Both coordinates are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A 2D displacement or velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[inline]
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Scale both axes by `factor`.
    #[inline]
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Divide both axes by `divisor`, treating non-positive divisors as 1.
    #[inline]
    #[must_use]
    pub fn per(self, divisor: f64) -> Self {
        let divisor = if divisor > 0.0 { divisor } else { 1.0 };
        Self::new(self.x / divisor, self.y / divisor)
    }

    /// Clamp each axis independently into `[-max, max]`.
    #[inline]
    #[must_use]
    pub fn clamp_axes(self, max: f64) -> Self {
        let max = max.abs();
        Self::new(self.x.clamp(-max, max), self.y.clamp(-max, max))
    }

    /// True when both axis magnitudes are strictly below `threshold`.
    #[inline]
    #[must_use]
    pub fn both_axes_below(self, threshold: f64) -> bool {
        self.x.abs() < threshold && self.y.abs() < threshold
    }

    /// True when either axis magnitude is strictly above `threshold`.
    #[inline]
    #[must_use]
    pub fn any_axis_above(self, threshold: f64) -> bool {
        self.x.abs() > threshold || self.y.abs() > threshold
    }
}

impl core::ops::Add for Vector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl core::ops::AddAssign for Vector {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// Arithmetic mean of a set of points. `None` for an empty set.
#[must_use]
pub fn centroid<I>(points: I) -> Option<Point>
where
    I: IntoIterator<Item = Point>,
{
    let (mut sx, mut sy, mut n) = (0.0, 0.0, 0usize);
    for p in points {
        sx += p.x;
        sy += p.y;
        n += 1;
    }
    (n > 0).then(|| Point::new(sx / n as f64, sy / n as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn angle_follows_atan2() {
        let a = Point::new(0.0, 0.0);
        assert_eq!(a.angle_to(Point::new(1.0, 0.0)), 0.0);
        let up = a.angle_to(Point::new(0.0, 1.0));
        assert!((up - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn midpoint_between_contacts() {
        let m = Point::new(10.0, 20.0).midpoint(Point::new(30.0, 40.0));
        assert_eq!(m, Point::new(20.0, 30.0));
    }

    #[test]
    fn centroid_of_empty_set_is_none() {
        assert!(centroid(std::iter::empty()).is_none());
    }

    #[test]
    fn centroid_of_square() {
        let c = centroid([
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ])
        .unwrap();
        assert_eq!(c, Point::new(1.0, 1.0));
    }

    #[test]
    fn clamp_axes_is_per_axis() {
        let v = Vector::new(120.0, -80.0).clamp_axes(50.0);
        assert_eq!(v, Vector::new(50.0, -50.0));
        let v = Vector::new(3.0, -4.0).clamp_axes(50.0);
        assert_eq!(v, Vector::new(3.0, -4.0));
    }

    #[test]
    fn per_guards_zero_divisor() {
        assert_eq!(Vector::new(10.0, 20.0).per(0.0), Vector::new(10.0, 20.0));
        assert_eq!(Vector::new(10.0, 20.0).per(10.0), Vector::new(1.0, 2.0));
    }

    #[test]
    fn axis_threshold_predicates() {
        let v = Vector::new(4.9, -4.9);
        assert!(v.both_axes_below(5.0));
        assert!(!v.any_axis_above(5.0));
        let v = Vector::new(0.0, -5.1);
        assert!(!v.both_axes_below(5.0));
        assert!(v.any_axis_above(5.0));
    }
}
