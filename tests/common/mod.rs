//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use quasitiler::geometry::{LatticePoint, PlanePoint, Window};
use quasitiler::{Drawing, Outcome, PlaneGenerators, Tiling, Uninterrupted};

pub fn square(half_width: f64) -> Window {
    Window::centered(PlanePoint::origin(), half_width)
}

pub fn tiling(dims: usize, relative_offset: &[f64]) -> Arc<Tiling> {
    let plane = PlaneGenerators::symmetric(dims).unwrap();
    Arc::new(Tiling::init(&plane, relative_offset).unwrap())
}

// every point the scan reports, in scan order
pub fn scan(tiling: &Tiling, window: &Window) -> Vec<LatticePoint> {
    let mut points = Vec::new();
    let outcome = tiling.generate(window, &mut |p: &LatticePoint| points.push(*p),
                                  &mut Uninterrupted);
    assert_eq!(outcome, Outcome::Completed);
    points
}

// scanned and assembled
pub fn drawing(tiling: Arc<Tiling>, window: &Window) -> Drawing {
    let mut drawing = Drawing::new(tiling);
    assert_eq!(drawing.generate(window, &mut Uninterrupted), Outcome::Completed);
    assert_eq!(drawing.locate_tiles(&mut Uninterrupted), Outcome::Completed);
    drawing
}

// fires on the given poll and every one after it
pub struct StopAfter {
    pub polls: usize,
    pub limit: usize,
}

impl StopAfter {
    pub fn new(limit: usize) -> Self {
        StopAfter { polls: 0, limit }
    }
}

impl quasitiler::Interruptor for StopAfter {
    fn interrupted(&mut self) -> bool {
        self.polls += 1;
        self.polls >= self.limit
    }
}
