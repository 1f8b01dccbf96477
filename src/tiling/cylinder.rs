//////////////////////////////////////////////////////////////////////
// The cylinder is the Minkowski sum of the plane with the unit
// hypercube. Each choice of three lattice directions gives a pair of
// opposite faces, described by a normal scaled so that the hypercube
// sits exactly between dot = -1 and dot = 1.

use std::cmp::Ordering;

use super::Tiling;
use crate::errors::*;
use crate::geometry::{
    cylinder_combinations, epsilon_compare, scalar_mult, sign, AmbientVector, LatticePoint, Vec3d,
    EPSILON, MAX_DIM, TARGET_DIM,
};

const PRIMES: [usize; 20] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71,
];

// Stride for visiting the criteria. Consecutive criteria share
// directions, so they tend to reject the same candidates; a stride far
// from any multiple of count spreads them out. Never shares a factor
// with count, so the visiting order is a permutation.
pub(super) fn randomizer(count: usize) -> usize {

    let mut randomizer = 1;
    let mut max_abs_res = 1;

    let c = count as i64;

    for &prime in PRIMES.iter() {

        if count % prime == 0 {
            continue;
        }

        let mut res = prime as i64 % c;
        if res > c / 2 {
            res -= c;
        }

        if res.abs() > max_abs_res {
            max_abs_res = res.abs();
            randomizer = prime;
        }

    }

    randomizer

}

// advance to the next 3-combination in lexicographic order
fn next_combination(choice: &mut [usize; TARGET_DIM + 1], dims: usize) {

    let mut ind = TARGET_DIM;
    while ind > 0 && choice[ind] >= dims - (TARGET_DIM + 1) + ind {
        ind -= 1;
    }

    choice[ind] += 1;

    for ind2 in ind + 1..=TARGET_DIM {
        choice[ind2] = choice[ind2 - 1] + 1;
    }

}

pub(super) fn compute_cylinder(dims: usize,
                               generator: &[AmbientVector; MAX_DIM]) -> Result<Vec<AmbientVector>> {

    let count = cylinder_combinations(dims);
    let stride = randomizer(count);

    let mut criteria = vec![AmbientVector::zeros(); count];

    let mut choice = [0, 1, 2];

    for local_index in 0..count {

        let crit_index = (stride * local_index) % count;

        let x = Vec3d::from_fn(|i, _| generator[0][choice[i]]);
        let y = Vec3d::from_fn(|i, _| generator[1][choice[i]]);

        // normal of the face within the three chosen directions
        let z = x.cross(&y);

        let mut criterion = AmbientVector::zeros();
        for (i, &d) in choice.iter().enumerate() {
            criterion[d] = z[i];
        }

        let scalar: f64 = criterion.iter().map(|c| c.abs()).sum();

        if epsilon_compare(scalar, 0.0) == Ordering::Equal {
            bail!(ErrorKind::SingularFace(choice[0], choice[1], choice[2]));
        }

        let first_sign = criterion.iter()
            .map(|&c| sign(c))
            .find(|&s| s != 0)
            .unwrap_or(1);

        scalar_mult(&mut criteria[crit_index], first_sign as f64 * 2.0 / scalar, &criterion);

        next_combination(&mut choice, dims);

    }

    Ok(criteria)

}

impl Tiling {

    // true if the point, shifted by -offset, lies strictly between
    // every pair of opposite faces
    pub fn in_cylinder(&self, point: &LatticePoint) -> bool {

        let trans = point.to_ambient() - self.offset;

        self.criteria.iter()
            .all(|criterion| 1.0 - criterion.dot(&trans).abs() >= EPSILON)

    }

}
