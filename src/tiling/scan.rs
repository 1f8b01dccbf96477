//////////////////////////////////////////////////////////////////////
// Windowed generation. The two primary axes of the coordinate order
// parametrize the plane, so stepping them over a box covers the window;
// for each step only a small box of the secondary axes around the
// plane can hold cylinder points.

use std::cmp::Ordering;

use super::Tiling;
use crate::errors::*;
use crate::geometry::{
    add_to, epsilon_compare, AmbientVector, LatticePoint, Matrix2d, PlanePoint, Vec2d, Window,
    MAX_DIM, TARGET_DIM,
};
use crate::report::{Interruptor, Outcome, PointReporter};

// candidates are kept this far outside the window, so that tiles
// crossing the window border are complete
pub const CLIP_MARGIN: f64 = 2.0;

// inverse of the 2x2 block of the generators on the primary axes
pub(super) fn init_parametrization(generator: &[AmbientVector; MAX_DIM],
                                   coordinate: &[usize; MAX_DIM]) -> Result<Matrix2d> {

    let (c0, c1) = (coordinate[0], coordinate[1]);

    let a = Matrix2d::new(generator[0][c0], generator[1][c0],
                          generator[0][c1], generator[1][c1]);

    let det = a.determinant();

    if epsilon_compare(det, 0.0) == Ordering::Equal {
        bail!(ErrorKind::SingularParametrization);
    }

    Ok(Matrix2d::new(a[(1, 1)] / det, -a[(0, 1)] / det,
                     -a[(1, 0)] / det, a[(0, 0)] / det))

}

impl Tiling {

    // Integer box of the ambient space whose points can project into
    // window: each corner of the window is lifted to the plane, and the
    // box is padded by the diagonal of the unit hypercube, rounded up.
    pub fn compute_ambient_bounds(&self, window: &Window) -> ([i32; MAX_DIM], [i32; MAX_DIM]) {

        let mut min = [std::f64::INFINITY; MAX_DIM];
        let mut max = [std::f64::NEG_INFINITY; MAX_DIM];

        for corner in window.corners().iter() {

            let mut p = self.offset;
            add_to(&mut p, corner.x, &self.generator[0]);
            add_to(&mut p, corner.y, &self.generator[1]);

            for d in 0..self.dims {
                min[d] = min[d].min(p[d]);
                max[d] = max[d].max(p[d]);
            }

        }

        let thick = (self.dims as f64).sqrt().ceil();

        let mut lo = [0; MAX_DIM];
        let mut hi = [0; MAX_DIM];

        for d in 0..self.dims {
            lo[d] = (min[d] - thick).floor() as i32;
            hi[d] = (max[d] + thick).ceil() as i32;
        }

        (lo, hi)

    }

    // Point of the plane above scan_index, found from its two primary
    // coordinates alone, as (ambient point, plane coords).
    pub fn parametrize(&self, scan_index: &LatticePoint) -> (AmbientVector, PlanePoint) {

        let c0 = self.coordinate_order[0];
        let c1 = self.coordinate_order[1];

        let s = Vec2d::new(scan_index.coords[c0] as f64 - self.offset[c0],
                           scan_index.coords[c1] as f64 - self.offset[c1]);

        let t = self.parametrization * s;

        let mut plane_point = self.offset;
        add_to(&mut plane_point, t.x, &self.generator[0]);
        add_to(&mut plane_point, t.y, &self.generator[1]);

        (plane_point, PlanePoint::new(t.x, t.y))

    }

    // Reports every lattice point inside the cylinder whose projection
    // falls within window expanded by CLIP_MARGIN, exactly once and in
    // scan order. interruptor is polled after each primary step; when
    // it fires the scan stops and the points reported so far are a
    // prefix of the full run.
    pub fn generate<R, I>(&self, window: &Window,
                          reporter: &mut R, interruptor: &mut I) -> Outcome
    where R: PointReporter + ?Sized,
          I: Interruptor + ?Sized
    {

        let dims = self.dims;
        let co = &self.coordinate_order;

        let (lo, hi) = self.compute_ambient_bounds(window);
        let clip = window.expanded(CLIP_MARGIN);

        let diag = 2f64.sqrt();

        let mut local_lo = [0; MAX_DIM];
        let mut local_hi = [0; MAX_DIM];

        let mut scan_index = LatticePoint::default();
        for ind in 0..TARGET_DIM {
            scan_index.coords[co[ind]] = lo[co[ind]];
        }

        let mut steps = 0usize;
        let mut reported = 0usize;

        while scan_index.coords[co[0]] <= hi[co[0]] {

            let (plane_point, tiling_point) = self.parametrize(&scan_index);

            if clip.contains(&tiling_point) {

                for ind in TARGET_DIM..dims {
                    let d = co[ind];
                    local_lo[d] = (plane_point[d] - diag).ceil() as i32;
                    local_hi[d] = (plane_point[d] + diag).floor() as i32;
                    scan_index.coords[d] = local_lo[d];
                }

                while scan_index.coords[co[TARGET_DIM]] <= local_hi[co[TARGET_DIM]] {

                    if self.in_cylinder(&scan_index) &&
                        clip.contains(&self.lattice_to_plane(&scan_index)) {
                        reporter.report_point(&scan_index);
                        reported += 1;
                    }

                    // odometer over the secondary axes, last one fastest
                    let mut ind = dims - 1;
                    loop {
                        let d = co[ind];
                        scan_index.coords[d] += 1;
                        if scan_index.coords[d] > local_hi[d] && ind > TARGET_DIM {
                            scan_index.coords[d] = local_lo[d];
                            ind -= 1;
                        } else {
                            break;
                        }
                    }

                }

                for ind in TARGET_DIM..dims {
                    scan_index.coords[co[ind]] = 0;
                }

            }

            // same over the primary axes
            let mut ind = TARGET_DIM - 1;
            loop {
                let d = co[ind];
                scan_index.coords[d] += 1;
                if scan_index.coords[d] > hi[d] && ind > 0 {
                    scan_index.coords[d] = lo[d];
                    ind -= 1;
                } else {
                    break;
                }
            }

            steps += 1;

            if interruptor.interrupted() {
                log::info!("scan interrupted after {} steps, {} points", steps, reported);
                return Outcome::Cancelled;
            }

        }

        log::debug!("scan done in {} steps, {} points", steps, reported);

        Outcome::Completed

    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Uninterrupted;
    use crate::tiling::PlaneGenerators;
    use approx::assert_relative_eq;

    fn collect(tiling: &Tiling, window: &Window) -> Vec<LatticePoint> {
        let mut points = Vec::new();
        let outcome = tiling.generate(window, &mut |p: &LatticePoint| points.push(*p),
                                      &mut Uninterrupted);
        assert_eq!(outcome, Outcome::Completed);
        points
    }

    #[test]
    fn test_parametrization_inverts_primary_block() {
        let tiling = Tiling::symmetric(5).unwrap();
        let co = tiling.coordinate_order();
        let p = LatticePoint::new(&[0; 5]).shifted(co[0], 3).shifted(co[1], -2);

        let (ambient, plane) = tiling.parametrize(&p);

        // the lifted point agrees with the scan index on both primary axes
        assert_relative_eq!(ambient[co[0]], 3.0, epsilon = 1e-9);
        assert_relative_eq!(ambient[co[1]], -2.0, epsilon = 1e-9);

        // and its plane coords are its projection
        assert_relative_eq!(ambient.dot(tiling.generator(0)), plane.x, epsilon = 1e-9);
        assert_relative_eq!(ambient.dot(tiling.generator(1)), plane.y, epsilon = 1e-9);
    }

    #[test]
    fn test_ambient_bounds_cover_window() {
        let tiling = Tiling::symmetric(5).unwrap();
        let window = Window::centered(PlanePoint::new(1.0, 2.0), 3.0);
        let (lo, hi) = tiling.compute_ambient_bounds(&window);
        for d in 0..5 {
            assert!(lo[d] < hi[d]);
            for corner in window.corners().iter() {
                let along = corner.x * tiling.generator(0)[d] + corner.y * tiling.generator(1)[d];
                assert!(lo[d] as f64 <= along && along <= hi[d] as f64);
            }
        }
    }

    #[test]
    fn test_generated_points_are_valid_and_unique() {
        let tiling = Tiling::symmetric(5).unwrap();
        let window = Window::centered(PlanePoint::origin(), 4.0);
        let points = collect(&tiling, &window);

        assert!(!points.is_empty());

        let clip = window.expanded(CLIP_MARGIN);
        for p in points.iter() {
            assert!(tiling.in_cylinder(p));
            assert!(clip.contains(&tiling.lattice_to_plane(p)));
        }

        let mut sorted = points.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), points.len());
    }

    #[test]
    fn test_origin_is_generated() {
        let tiling = Tiling::symmetric(5).unwrap();
        let points = collect(&tiling, &Window::centered(PlanePoint::origin(), 2.0));
        assert!(points.contains(&LatticePoint::default()));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let plane = PlaneGenerators::symmetric(7).unwrap();
        let tiling = Tiling::init(&plane, &[0.0, 0.0, 0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();
        let window = Window::centered(PlanePoint::new(0.5, -0.5), 3.0);
        assert_eq!(collect(&tiling, &window), collect(&tiling, &window));
    }

    #[test]
    fn test_cancelled_scan_is_a_prefix() {
        let tiling = Tiling::symmetric(5).unwrap();
        let window = Window::centered(PlanePoint::origin(), 5.0);
        let full = collect(&tiling, &window);

        let mut steps = 0;
        let outcome = tiling.generate(&window, &mut |_: &LatticePoint| {},
                                      &mut || { steps += 1; false });
        assert_eq!(outcome, Outcome::Completed);

        let mut polls = 0;
        let mut partial = Vec::new();
        let outcome = tiling.generate(&window,
                                      &mut |p: &LatticePoint| partial.push(*p),
                                      &mut || { polls += 1; polls >= steps / 2 });

        assert_eq!(outcome, Outcome::Cancelled);
        assert!(!partial.is_empty());
        assert!(partial.len() < full.len());
        assert_eq!(&full[..partial.len()], &partial[..]);
    }

    #[test]
    fn test_immediate_cancel() {
        let tiling = Tiling::symmetric(4).unwrap();
        let mut count = 0;
        let outcome = tiling.generate(&Window::centered(PlanePoint::origin(), 5.0),
                                      &mut |_: &LatticePoint| count += 1,
                                      &mut || true);
        assert_eq!(outcome, Outcome::Cancelled);
        assert!(count < 20);
    }

    fn generator_with(row0: &[f64], row1: &[f64]) -> [AmbientVector; MAX_DIM] {
        let mut generator = [AmbientVector::zeros(); MAX_DIM];
        for (d, (&a, &b)) in row0.iter().zip(row1.iter()).enumerate() {
            generator[0][d] = a;
            generator[1][d] = b;
        }
        generator
    }

    #[test]
    fn test_parametrization_is_block_inverse() {
        let generator = generator_with(&[0.5, 0.25, 1.0], &[-0.5, 1.0, 0.0]);
        let coordinate = [1, 0, 2, 3, 4, 5, 6, 7];
        let p = init_parametrization(&generator, &coordinate).unwrap();

        let a = Matrix2d::new(0.25, 1.0, 0.5, -0.5);
        assert_relative_eq!(p * a, Matrix2d::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_singular_parametrization() {
        // the primary columns (1, 2) and (2, 4) are proportional
        let generator = generator_with(&[1.0, 2.0, 0.3], &[2.0, 4.0, -0.7]);
        let coordinate = [0, 1, 2, 3, 4, 5, 6, 7];
        match init_parametrization(&generator, &coordinate) {
            Err(Error(ErrorKind::SingularParametrization, _)) => {}
            Err(e) => panic!("wrong error: {}", e),
            Ok(p) => panic!("singular block inverted: {:?}", p),
        }
    }
}
