//////////////////////////////////////////////////////////////////////
// A Drawing collects the vertices a tiling generates and groups them
// into rhombic tiles, one list of anchor vertices per tile slot.

use std::sync::Arc;

use crate::geometry::{LatticePoint, PlanePoint, Window};
use crate::report::{Interruptor, Outcome, PointReporter};
use crate::tiling::Tiling;

// tile assembly polls for interruption once per this many vertices
const LOCATE_POLL_PERIOD: usize = 100;

//////////////////////////////////////////////////////////////////////
// anchor vertex indices, per tile slot

#[derive(Debug, Clone, Default)]
pub struct TileSet {
    slots: Vec<Vec<usize>>,
}

impl TileSet {

    fn new(slot_count: usize) -> Self {
        TileSet { slots: vec![Vec::new(); slot_count] }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, slot: usize) -> &[usize] {
        &self.slots[slot]
    }

    pub fn tile_count(&self) -> usize {
        self.slots.iter().map(|s| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_empty())
    }

    // (slot, anchor vertex index) for every tile
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.slots.iter()
            .enumerate()
            .flat_map(|(slot, anchors)| anchors.iter().map(move |&a| (slot, a)))
    }

}

//////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct Drawing {
    tiling: Arc<Tiling>,
    vertices: Vec<LatticePoint>,
    tiles: TileSet,
}

impl PointReporter for Drawing {
    fn report_point(&mut self, point: &LatticePoint) {
        self.vertices.push(*point);
    }
}

impl Drawing {

    pub fn new(tiling: Arc<Tiling>) -> Self {
        let tiles = TileSet::new(tiling.tile_combinations_count());
        Drawing { tiling, vertices: Vec::new(), tiles }
    }

    pub fn tiling(&self) -> &Arc<Tiling> {
        &self.tiling
    }

    // sorted once locate_tiles() has run
    pub fn vertices(&self) -> &[LatticePoint] {
        &self.vertices
    }

    pub fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.tiles = TileSet::new(self.tiling.tile_combinations_count());
    }

    // runs the scan with self as the reporter
    pub fn generate<I>(&mut self, window: &Window, interruptor: &mut I) -> Outcome
    where I: Interruptor + ?Sized
    {
        let tiling = Arc::clone(&self.tiling);
        tiling.generate(window, self, interruptor)
    }

    // Sorts the vertices, then for each vertex walks the lattice
    // directions in slope order. Every direction whose signed neighbor
    // is also a vertex is an edge, and two edges found in a row bound a
    // tile anchored at the vertex. On Cancelled the tile lists are
    // partial.
    pub fn locate_tiles<I>(&mut self, interruptor: &mut I) -> Outcome
    where I: Interruptor + ?Sized
    {

        self.vertices.sort();
        self.tiles = TileSet::new(self.tiling.tile_combinations_count());

        let tiling = &self.tiling;
        let signs = tiling.signs();

        for (vertex_index, vertex) in self.vertices.iter().enumerate() {

            let mut gen0: Option<usize> = None;

            for &gen1 in tiling.slope_order() {

                let neighbor = vertex.shifted(gen1, signs[gen1]);

                if self.vertices.binary_search(&neighbor).is_ok() {
                    if let Some(gen0) = gen0 {
                        self.tiles.slots[tiling.tile_index(gen0, gen1)].push(vertex_index);
                    }
                    gen0 = Some(gen1);
                }

            }

            if vertex_index % LOCATE_POLL_PERIOD == 0 && interruptor.interrupted() {
                log::info!("tile search interrupted at vertex {} of {}",
                           vertex_index, self.vertices.len());
                return Outcome::Cancelled;
            }

        }

        log::debug!("found {} tiles among {} vertices",
                    self.tiles.tile_count(), self.vertices.len());

        Outcome::Completed

    }

    //////////////////////////////////////////////////
    // geometry of the result

    pub fn vertex_position(&self, vertex_index: usize) -> PlanePoint {
        self.tiling.lattice_to_plane(&self.vertices[vertex_index])
    }

    pub fn orthogonal_position(&self, vertex_index: usize) -> PlanePoint {
        self.tiling.lattice_to_orthogonal(&self.vertices[vertex_index])
    }

    // corners of a tile in drawing order: anchor, along gen0, along
    // both, along gen1
    pub fn tile_corners(&self, slot: usize, anchor: usize) -> [PlanePoint; 4] {

        let [gen0, gen1] = self.tiling.tile_generator(slot);

        let p = self.vertex_position(anchor);
        let e0 = self.tiling.edge(gen0);
        let e1 = self.tiling.edge(gen1);

        [p, p + e0, p + e0 + e1, p + e1]

    }

}
