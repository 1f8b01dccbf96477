//////////////////////////////////////////////////////////////////////
// the two hooks a generation run talks to: something that receives
// the accepted lattice points, and something that may ask it to stop

use crate::geometry::LatticePoint;

// receives generated tiling vertices; called from the innermost scan
// loop, so it must be cheap and must not block
pub trait PointReporter {
    fn report_point(&mut self, point: &LatticePoint);
}

impl<F> PointReporter for F where F: FnMut(&LatticePoint) {
    fn report_point(&mut self, point: &LatticePoint) {
        self(point)
    }
}

// polled periodically; returning true stops the computation
pub trait Interruptor {
    fn interrupted(&mut self) -> bool;
}

impl<F> Interruptor for F where F: FnMut() -> bool {
    fn interrupted(&mut self) -> bool {
        self()
    }
}

// an interruptor that never fires
#[derive(Debug, Default, Clone, Copy)]
pub struct Uninterrupted;

impl Interruptor for Uninterrupted {
    fn interrupted(&mut self) -> bool {
        false
    }
}

// result of a scan or of tile assembly; Cancelled output is partial and
// must not be treated as a tiling
#[must_use]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Outcome {
    Completed,
    Cancelled,
}

impl Outcome {
    pub fn is_completed(self) -> bool {
        self == Outcome::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_reporter() {
        let mut seen = 0;
        {
            let mut reporter = |_: &LatticePoint| seen += 1;
            reporter.report_point(&LatticePoint::default());
            reporter.report_point(&LatticePoint::default());
        }
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_closure_interruptor() {
        let mut polls = 0;
        let mut stop_after_two = || {
            polls += 1;
            polls > 2
        };
        assert!(!stop_after_two.interrupted());
        assert!(!stop_after_two.interrupted());
        assert!(stop_after_two.interrupted());
        assert!(!Uninterrupted.interrupted());
    }
}
