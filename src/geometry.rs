//////////////////////////////////////////////////////////////////////
// numeric kernel shared by the tiling and the drawing

use std::cmp::Ordering;

//////////////////////////////////////////////////////////////////////
// necessary constants

// rounding error limit, used for every comparison
pub const EPSILON: f64 = 0.000001;

// maximum number of dimensions of the integer lattice
pub const MAX_DIM: usize = 8;

// smallest lattice that still has a cylinder face
pub const MIN_DIM: usize = 3;

// dimension of the plane that the lattice is projected on
pub const TARGET_DIM: usize = 2;

// number of ways to choose two directions out of dims
pub fn tile_combinations(dims: usize) -> usize {
    dims * (dims - 1) / 2
}

// number of ways to choose three directions out of dims
pub fn cylinder_combinations(dims: usize) -> usize {
    dims * (dims - 1) * (dims - 2) / 6
}

//////////////////////////////////////////////////////////////////////
// pull in some types from nalgebra

// vector of the ambient space; entries at index >= dims stay zero so
// that full-width dot products equal the dims-wide ones
pub type AmbientVector = nalgebra::VectorN<f64, nalgebra::U8>;

pub type Vec2d = nalgebra::Vector2<f64>;
pub type Vec3d = nalgebra::Vector3<f64>;
pub type PlanePoint = nalgebra::geometry::Point2<f64>;
pub type Matrix2d = nalgebra::Matrix2<f64>;

//////////////////////////////////////////////////////////////////////
// scalar helpers

// -1, 0 or 1 with EPSILON leeway
pub fn epsilon_compare(x: f64, y: f64) -> Ordering {
    if x < y - EPSILON {
        Ordering::Less
    } else if x > y + EPSILON {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

// exact sign, zero for zero
pub fn sign(f: f64) -> i32 {
    if f < 0.0 {
        -1
    } else if f > 0.0 {
        1
    } else {
        0
    }
}

//////////////////////////////////////////////////////////////////////
// elementary vector operations

// x = s * y
pub fn scalar_mult(x: &mut AmbientVector, s: f64, y: &AmbientVector) {
    *x = y * s;
}

// x = x + s * y
pub fn add_to(x: &mut AmbientVector, s: f64, y: &AmbientVector) {
    x.axpy(s, y, 1.0);
}

//////////////////////////////////////////////////////////////////////
// integer lattice point; ordering is lexicographic on coords, which is
// what the sorted vertex storage relies on

#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct LatticePoint {
    pub coords: [i32; MAX_DIM],
}

impl LatticePoint {

    pub fn new(coords: &[i32]) -> Self {
        debug_assert!(coords.len() <= MAX_DIM);
        let mut p = LatticePoint::default();
        p.coords[..coords.len()].copy_from_slice(coords);
        p
    }

    // neighbor one step along direction, in the given sense
    pub fn shifted(&self, direction: usize, step: i32) -> Self {
        let mut p = *self;
        p.coords[direction] += step;
        p
    }

    // the same point as a real ambient vector
    pub fn to_ambient(&self) -> AmbientVector {
        AmbientVector::from_fn(|i, _| self.coords[i] as f64)
    }

}

//////////////////////////////////////////////////////////////////////
// Window is the rectangle of the tiling plane to cover, with
// lower-left min and upper-right max

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub min: PlanePoint,
    pub max: PlanePoint,
}

impl Window {

    pub fn new(min: PlanePoint, max: PlanePoint) -> Self {
        Window { min, max }
    }

    // empty window has min > max
    pub fn empty() -> Self {
        let min = PlanePoint::new(std::f64::MAX, std::f64::MAX);
        Window { min, max: -min }
    }

    // grow to include p
    pub fn expand(&mut self, p: &PlanePoint) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    // square window of given half width around center
    pub fn centered(center: PlanePoint, half_width: f64) -> Self {
        let h = Vec2d::repeat(half_width);
        Window { min: center - h, max: center + h }
    }

    // grow on every side by margin
    pub fn expanded(&self, margin: f64) -> Self {
        let m = Vec2d::repeat(margin);
        Window { min: self.min - m, max: self.max + m }
    }

    // strict containment, boundary excluded
    pub fn contains(&self, p: &PlanePoint) -> bool {
        p.x > self.min.x && p.x < self.max.x &&
            p.y > self.min.y && p.y < self.max.y
    }

    pub fn dims(&self) -> Vec2d {
        self.max - self.min
    }

    pub fn center(&self) -> PlanePoint {
        self.min + 0.5 * (self.max - self.min)
    }

    pub fn corners(&self) -> [PlanePoint; 4] {
        [
            self.min,
            PlanePoint::new(self.max.x, self.min.y),
            PlanePoint::new(self.min.x, self.max.y),
            self.max,
        ]
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_combination_counts() {
        assert_eq!(tile_combinations(3), 3);
        assert_eq!(cylinder_combinations(3), 1);
        assert_eq!(tile_combinations(5), 10);
        assert_eq!(cylinder_combinations(5), 10);
        assert_eq!(tile_combinations(8), 28);
        assert_eq!(cylinder_combinations(8), 56);
    }

    #[test]
    fn test_epsilon_compare() {
        assert_eq!(epsilon_compare(1.0, 1.0 + 0.5 * EPSILON), Ordering::Equal);
        assert_eq!(epsilon_compare(1.0, 1.0 + 2.0 * EPSILON), Ordering::Less);
        assert_eq!(epsilon_compare(1.0 + 2.0 * EPSILON, 1.0), Ordering::Greater);
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(-0.1), -1);
        assert_eq!(sign(0.0), 0);
        assert_eq!(sign(3.0), 1);
    }

    #[test]
    fn test_vector_ops() {
        let mut x = AmbientVector::zeros();
        let mut y = AmbientVector::zeros();
        y[0] = 1.0;
        y[3] = -2.0;

        add_to(&mut x, 2.0, &y);
        assert_relative_eq!(x[0], 2.0);
        assert_relative_eq!(x[3], -4.0);

        scalar_mult(&mut x, 0.5, &y);
        assert_relative_eq!(x[0], 0.5);
        assert_relative_eq!(x[3], -1.0);
        assert_relative_eq!(x.dot(&y), 2.5);
    }

    #[test]
    fn test_lattice_point_order_is_lexicographic() {
        let a = LatticePoint::new(&[0, 5, 5]);
        let b = LatticePoint::new(&[1, -5, -5]);
        let c = LatticePoint::new(&[1, -5, -4]);
        assert!(a < b);
        assert!(b < c);

        let mut v = vec![c, a, b];
        v.sort();
        assert_eq!(v, vec![a, b, c]);
    }

    #[test]
    fn test_lattice_point_shift() {
        let a = LatticePoint::new(&[2, 3, 4]);
        let b = a.shifted(1, -1);
        assert_eq!(b, LatticePoint::new(&[2, 2, 4]));
        assert_relative_eq!(b.to_ambient()[2], 4.0);
        assert_relative_eq!(b.to_ambient()[7], 0.0);
    }

    #[test]
    fn test_window() {
        let w = Window::centered(PlanePoint::new(1.0, -1.0), 2.0);
        assert!(w.contains(&PlanePoint::new(1.0, -1.0)));
        assert!(!w.contains(&PlanePoint::new(3.0, -1.0)));
        assert!(w.expanded(0.5).contains(&PlanePoint::new(3.0, -1.0)));
        assert_relative_eq!(w.dims().x, 4.0);
        assert_relative_eq!(w.center().y, -1.0);
    }

    #[test]
    fn test_window_expand() {
        let mut w = Window::empty();
        assert!(w.is_empty());
        w.expand(&PlanePoint::new(1.0, 2.0));
        w.expand(&PlanePoint::new(-1.0, 3.0));
        assert!(!w.is_empty());
        assert_eq!(w.min, PlanePoint::new(-1.0, 2.0));
        assert_eq!(w.max, PlanePoint::new(1.0, 3.0));
    }
}
