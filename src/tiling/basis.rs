//////////////////////////////////////////////////////////////////////
// completes the two plane rows into an orthonormal basis of the
// ambient space and checks that the plane is generic

use std::cmp::Ordering;

use super::PlaneGenerators;
use crate::errors::*;
use crate::geometry::{add_to, epsilon_compare, AmbientVector, MAX_DIM, TARGET_DIM};

pub(super) fn normalize(plane: &PlaneGenerators) -> Result<[AmbientVector; MAX_DIM]> {

    let dims = plane.dims();

    let mut generator = [AmbientVector::zeros(); MAX_DIM];

    for ind in 0..TARGET_DIM {
        generator[ind] = *plane.row(ind);
    }

    // seed the remaining rows: (1, -1, 1, ...), then (1, 1, 1, ...),
    // then unit vectors
    for ind2 in 0..dims {
        generator[TARGET_DIM][ind2] = if ind2 % 2 == 0 { 1.0 } else { -1.0 };
    }

    if TARGET_DIM + 1 < dims {
        for ind2 in 0..dims {
            generator[TARGET_DIM + 1][ind2] = 1.0;
        }
    }

    for ind in TARGET_DIM + 2..dims {
        generator[ind][ind] = 1.0;
    }

    // Gram-Schmidt
    for ind in 0..dims {

        let mut sum = AmbientVector::zeros();

        for ind2 in 0..ind {
            let scalar = generator[ind].dot(&generator[ind2]);
            add_to(&mut sum, scalar, &generator[ind2]);
        }

        generator[ind] -= sum;

        let scalar = generator[ind].norm();

        if epsilon_compare(scalar, 0.0) == Ordering::Equal {
            bail!(ErrorKind::DegenerateBasis(ind));
        }

        generator[ind] /= scalar;

    }

    // no lattice direction may lie in the plane or be perpendicular to it
    for ind in 0..dims {

        let mut projection = AmbientVector::zeros();

        for ind2 in 0..TARGET_DIM {
            add_to(&mut projection, generator[ind2][ind], &generator[ind2]);
        }

        let scalar = projection.norm();

        if epsilon_compare(scalar, 0.0) == Ordering::Equal ||
            epsilon_compare(scalar, 1.0) == Ordering::Equal {
            bail!(ErrorKind::NonGenericPlane(ind));
        }

    }

    Ok(generator)

}
