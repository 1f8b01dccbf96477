//////////////////////////////////////////////////////////////////////
// orderings of the lattice directions:
//
//   - coordinate order puts the directions with the largest projection
//     first; the first two drive the scan
//   - slope order sorts the sign-corrected projections by slope, which
//     is the order in which tile edges leave a vertex
//   - tile slots are grouped by how far apart two directions are in
//     slope order, so that congruent rhombi share a color row

use std::cmp::Ordering;

use crate::geometry::{epsilon_compare, tile_combinations, AmbientVector, MAX_DIM, TARGET_DIM};

// marks direction pairs that are not in slope order
const NO_TILE: usize = usize::MAX;

pub(super) struct CoordinateOrders {
    pub coordinate: [usize; MAX_DIM],
    pub slope: Vec<usize>,
    pub signs: Vec<i32>,
    pub tile_index: [[usize; MAX_DIM]; MAX_DIM],
    pub tile_generator: Vec<[usize; 2]>,
}

pub(super) fn sort_coordinates(dims: usize,
                               generator: &[AmbientVector; MAX_DIM]) -> CoordinateOrders {

    let g0 = &generator[0];
    let g1 = &generator[1];

    let mut coordinate = [0; MAX_DIM];
    for (ind, c) in coordinate.iter_mut().enumerate() {
        *c = ind;
    }

    let mut aux = [0.0; MAX_DIM];

    // partial selection sort: largest |g0| first, then largest |g1|
    // among the rest
    for ind0 in 0..TARGET_DIM {

        for ind1 in ind0..dims {
            aux[coordinate[ind1]] = generator[ind0][coordinate[ind1]].abs();
        }

        for ind1 in ind0..dims {
            if aux[coordinate[ind0]] < aux[coordinate[ind1]] {
                coordinate.swap(ind0, ind1);
            }
        }

    }

    // flip every direction into the right half-plane
    let signs: Vec<i32> = (0..dims)
        .map(|d| match epsilon_compare(g0[d], 0.0) {
            Ordering::Less => -1,
            _ => 1,
        })
        .collect();

    for d in 0..dims {
        aux[d] = signs[d] as f64 * g1[d] / (g0[d] * g0[d] + g1[d] * g1[d]).sqrt();
    }

    let mut slope: Vec<usize> = (0..dims).collect();

    for ind0 in 0..dims - 1 {
        for ind1 in ind0..dims {
            if aux[slope[ind0]] > aux[slope[ind1]] {
                slope.swap(ind0, ind1);
            }
        }
    }

    let mut tile_index = [[NO_TILE; MAX_DIM]; MAX_DIM];
    let mut tile_generator = Vec::with_capacity(tile_combinations(dims));

    for size in 1..=dims / 2 {
        for frst in 0..dims - 1 {

            if frst + size < dims {
                let pair = [slope[frst], slope[frst + size]];
                tile_index[pair[0]][pair[1]] = tile_generator.len();
                tile_generator.push(pair);
            }

            if frst < size && size != dims - size {
                let pair = [slope[frst], slope[frst + dims - size]];
                tile_index[pair[0]][pair[1]] = tile_generator.len();
                tile_generator.push(pair);
            }

        }
    }

    debug_assert_eq!(tile_generator.len(), tile_combinations(dims));

    CoordinateOrders { coordinate, slope, signs, tile_index, tile_generator }

}
