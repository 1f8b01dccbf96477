//////////////////////////////////////////////////////////////////////
// A n-dimensional integer lattice tiling.
//
// A Tiling is built once by init() and is read-only afterwards, so a
// generation worker can share it with whatever draws the result.

mod basis;
mod cylinder;
mod order;
mod scan;

use std::f64::consts::PI;

use crate::errors::*;
use crate::geometry::{
    add_to, cylinder_combinations, tile_combinations, AmbientVector, LatticePoint, Matrix2d,
    PlanePoint, Vec2d, MAX_DIM, MIN_DIM, TARGET_DIM,
};

fn check_dims(dims: usize) -> Result<()> {
    if dims < MIN_DIM || dims > MAX_DIM {
        bail!(ErrorKind::InvalidDimension(dims));
    }
    Ok(())
}

//////////////////////////////////////////////////////////////////////
// the two requested rows spanning the tiling plane; column d is the
// projection of lattice direction d onto the plane

#[derive(Debug, Clone, PartialEq)]
pub struct PlaneGenerators {
    dims: usize,
    rows: [AmbientVector; TARGET_DIM],
}

impl PlaneGenerators {

    // the most symmetrical tiles: direction k projects to angle
    // pi * (k / dims - 1/2)
    pub fn symmetric(dims: usize) -> Result<Self> {

        check_dims(dims)?;

        let mut rows = [AmbientVector::zeros(); TARGET_DIM];

        for dim_index in 0..dims {
            let theta = PI * (dim_index as f64 / dims as f64 - 0.5);
            rows[0][dim_index] = theta.cos();
            rows[1][dim_index] = theta.sin();
        }

        Ok(PlaneGenerators { dims, rows })

    }

    pub fn from_rows(row0: &[f64], row1: &[f64]) -> Result<Self> {

        let dims = row0.len();
        check_dims(dims)?;

        if row1.len() != dims {
            bail!(ErrorKind::InvalidDimension(row1.len()));
        }

        let mut rows = [AmbientVector::zeros(); TARGET_DIM];
        for ind in 0..dims {
            rows[0][ind] = row0[ind];
            rows[1][ind] = row1[ind];
        }

        Ok(PlaneGenerators { dims, rows })

    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn row(&self, index: usize) -> &AmbientVector {
        &self.rows[index]
    }

    // projection of one lattice direction
    pub fn direction(&self, index: usize) -> PlanePoint {
        PlanePoint::new(self.rows[0][index], self.rows[1][index])
    }

    // changes the projection of one lattice direction
    pub fn set_direction(&mut self, index: usize, point: &PlanePoint) {
        debug_assert!(index < self.dims);
        self.rows[0][index] = point.x;
        self.rows[1][index] = point.y;
    }

    // rotates every direction by angle (radians), keeping each one in
    // the right half-plane
    pub fn rotate(&mut self, angle: f64) {

        let (sin, cos) = angle.sin_cos();

        for ind in 0..self.dims {

            let x = self.rows[0][ind];
            let y = self.rows[1][ind];

            let mut x2 = x * cos - y * sin;
            let mut y2 = y * cos + x * sin;

            if x2 < 0.0 {
                x2 = -x2;
                y2 = -y2;
            }

            self.rows[0][ind] = x2;
            self.rows[1][ind] = y2;

        }

    }

}

//////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct Tiling {

    dims: usize,

    // displacement of the plane, orthogonal to it
    offset: AmbientVector,

    // orthonormal basis; rows 0, 1 span the plane
    generator: [AmbientVector; MAX_DIM],

    // one normal per pair of opposite cylinder faces, in visiting order
    criteria: Vec<AmbientVector>,

    // directions by projection size; the first two are the scan axes
    coordinate_order: [usize; MAX_DIM],

    // directions by slope, used to walk around a vertex
    slope_order: Vec<usize>,
    signs: Vec<i32>,

    tile_index: [[usize; MAX_DIM]; MAX_DIM],
    tile_generator: Vec<[usize; 2]>,

    // primary scan axes -> plane coords
    parametrization: Matrix2d,

}

impl Tiling {

    // init() makes the preliminary computations; the main one is finding
    // all the hyperplanes that bound the cylinder around the plane.
    //
    // relative_offset is expressed in the generator basis; its first two
    // components are ignored since without loss of generality the offset
    // is orthogonal to the tiling plane.
    pub fn init(plane: &PlaneGenerators, relative_offset: &[f64]) -> Result<Tiling> {

        let dims = plane.dims();

        if relative_offset.len() != dims {
            bail!(ErrorKind::InvalidOffset(relative_offset.len(), dims));
        }

        let generator = basis::normalize(plane)?;

        let mut offset = AmbientVector::zeros();
        for ind in TARGET_DIM..dims {
            add_to(&mut offset, relative_offset[ind], &generator[ind]);
        }

        let criteria = cylinder::compute_cylinder(dims, &generator)?;

        let orders = order::sort_coordinates(dims, &generator);

        let parametrization = scan::init_parametrization(&generator, &orders.coordinate)?;

        log::debug!("tiling of dimension {}: {} criteria, {} tile types, scan axes {:?}, slope order {:?}",
                    dims, criteria.len(), orders.tile_generator.len(),
                    &orders.coordinate[..dims], orders.slope);

        Ok(Tiling {
            dims,
            offset,
            generator,
            criteria,
            coordinate_order: orders.coordinate,
            slope_order: orders.slope,
            signs: orders.signs,
            tile_index: orders.tile_index,
            tile_generator: orders.tile_generator,
            parametrization,
        })

    }

    // symmetric generators, no offset
    pub fn symmetric(dims: usize) -> Result<Tiling> {
        Self::init(&PlaneGenerators::symmetric(dims)?, &vec![0.0; dims])
    }

    //////////////////////////////////////////////////
    // tiling descriptions

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn tile_combinations_count(&self) -> usize {
        tile_combinations(self.dims)
    }

    pub fn cylinder_criteria_count(&self) -> usize {
        cylinder_combinations(self.dims)
    }

    pub fn offset(&self) -> &AmbientVector {
        &self.offset
    }

    pub fn generator(&self, row: usize) -> &AmbientVector {
        &self.generator[row]
    }

    pub fn criteria(&self) -> &[AmbientVector] {
        &self.criteria
    }

    pub fn coordinate_order(&self) -> &[usize] {
        &self.coordinate_order[..self.dims]
    }

    pub fn slope_order(&self) -> &[usize] {
        &self.slope_order
    }

    pub fn signs(&self) -> &[i32] {
        &self.signs
    }

    // tile slot spanned by gen0, gen1 (gen0 first in slope order)
    pub fn tile_index(&self, gen0: usize, gen1: usize) -> usize {
        self.tile_index[gen0][gen1]
    }

    // the two directions spanning tile slot
    pub fn tile_generator(&self, slot: usize) -> [usize; 2] {
        self.tile_generator[slot]
    }

    // edge vector of a tile along direction, with the sign used to
    // find the tiles
    pub fn edge(&self, direction: usize) -> Vec2d {
        let s = self.signs[direction] as f64;
        Vec2d::new(s * self.generator[0][direction],
                   s * self.generator[1][direction])
    }

    //////////////////////////////////////////////////
    // projections

    // where a vertex lands on the tiling plane
    pub fn lattice_to_plane(&self, point: &LatticePoint) -> PlanePoint {
        let p = point.to_ambient();
        PlanePoint::new(p.dot(&self.generator[0]), p.dot(&self.generator[1]))
    }

    // where a vertex lands in the orthogonal space (the cylinder axis);
    // x comes from generator TARGET_DIM + 1, y from TARGET_DIM
    pub fn lattice_to_orthogonal(&self, point: &LatticePoint) -> PlanePoint {

        let p = point.to_ambient() - self.offset;

        let x = if TARGET_DIM + 1 < self.dims {
            p.dot(&self.generator[TARGET_DIM + 1])
        } else {
            0.0
        };

        PlanePoint::new(x, p.dot(&self.generator[TARGET_DIM]))

    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_counts_for_every_dimension() {
        for dims in MIN_DIM..=MAX_DIM {
            let tiling = Tiling::symmetric(dims).unwrap();
            assert_eq!(tiling.dims(), dims);
            assert_eq!(tiling.tile_combinations_count(), dims * (dims - 1) / 2);
            assert_eq!(tiling.cylinder_criteria_count(), dims * (dims - 1) * (dims - 2) / 6);
            assert_eq!(tiling.criteria().len(), tiling.cylinder_criteria_count());
            assert_eq!(tiling.coordinate_order().len(), dims);
            assert_eq!(tiling.slope_order().len(), dims);
        }
    }

    #[test]
    fn test_rejects_bad_dimension() {
        for &dims in &[0, 2, 9] {
            match PlaneGenerators::symmetric(dims) {
                Err(Error(ErrorKind::InvalidDimension(d), _)) => assert_eq!(d, dims),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_rejects_bad_offset() {
        let plane = PlaneGenerators::symmetric(5).unwrap();
        match Tiling::init(&plane, &[0.0; 4]) {
            Err(Error(ErrorKind::InvalidOffset(4, 5), _)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_symmetric_directions() {
        let plane = PlaneGenerators::symmetric(4).unwrap();
        let d0 = plane.direction(0);
        assert_relative_eq!(d0.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(d0.y, -1.0, epsilon = 1e-12);
        let d2 = plane.direction(2);
        assert_relative_eq!(d2.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(d2.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_set_direction() {
        let mut plane = PlaneGenerators::symmetric(5).unwrap();
        plane.set_direction(3, &PlanePoint::new(0.25, 0.75));
        assert_eq!(plane.direction(3), PlanePoint::new(0.25, 0.75));
        assert!(Tiling::init(&plane, &[0.0; 5]).is_ok());
    }

    #[test]
    fn test_rotate_keeps_right_half_plane() {
        let mut plane = PlaneGenerators::symmetric(5).unwrap();
        let before: Vec<f64> = (0..5).map(|d| plane.direction(d).coords.norm()).collect();

        plane.rotate(0.3);

        for d in 0..5 {
            let p = plane.direction(d);
            assert!(p.x >= 0.0);
            assert_relative_eq!(p.coords.norm(), before[d], epsilon = 1e-12);
        }

        assert!(Tiling::init(&plane, &[0.0; 5]).is_ok());
    }

    #[test]
    fn test_offset_is_orthogonal_to_plane() {
        let plane = PlaneGenerators::symmetric(5).unwrap();
        let tiling = Tiling::init(&plane, &[7.0, -3.0, 0.1, 0.2, 0.3]).unwrap();

        assert_relative_eq!(tiling.offset().dot(tiling.generator(0)), 0.0, epsilon = 1e-9);
        assert_relative_eq!(tiling.offset().dot(tiling.generator(1)), 0.0, epsilon = 1e-9);
        assert_relative_eq!(tiling.offset().dot(tiling.generator(2)), 0.1, epsilon = 1e-9);
        assert_relative_eq!(tiling.offset().dot(tiling.generator(4)), 0.3, epsilon = 1e-9);
    }

    #[test]
    fn test_projections() {
        let tiling = Tiling::symmetric(5).unwrap();

        let origin = LatticePoint::default();
        assert_eq!(tiling.lattice_to_plane(&origin), PlanePoint::origin());

        let e1 = LatticePoint::new(&[0, 1, 0, 0, 0]);
        let p = tiling.lattice_to_plane(&e1);
        assert_relative_eq!(p.x, tiling.generator(0)[1]);
        assert_relative_eq!(p.y, tiling.generator(1)[1]);

        let o = tiling.lattice_to_orthogonal(&e1);
        assert_relative_eq!(o.x, tiling.generator(3)[1]);
        assert_relative_eq!(o.y, tiling.generator(2)[1]);

        // plane and orthogonal parts together keep the length of e1
        let plane_len2 = p.coords.norm_squared();
        let rest: f64 = (2..5).map(|r| tiling.generator(r)[1].powi(2)).sum();
        assert_relative_eq!(plane_len2 + rest, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_orthogonal_projection_in_three_dimensions() {
        let tiling = Tiling::symmetric(3).unwrap();
        let o = tiling.lattice_to_orthogonal(&LatticePoint::new(&[1, 1, 1]));
        assert_relative_eq!(o.x, 0.0);
    }

    #[test]
    fn test_edges_point_along_signed_generators() {
        let tiling = Tiling::symmetric(5).unwrap();
        for d in 0..5 {
            let e = tiling.edge(d);
            assert!(e.x >= -1e-6);
            assert_relative_eq!(e.x.abs(), tiling.generator(0)[d].abs());
        }
    }
}
