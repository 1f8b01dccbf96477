//////////////////////////////////////////////////////////////////////
// Runs a generation job on a worker thread so the caller stays free
// to poll progress or ask the worker to stop. At most one job is in
// flight per session; starting a new one stops and joins the old one.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::drawing::Drawing;
use crate::errors::*;
use crate::geometry::{LatticePoint, Window};
use crate::report::{Interruptor, Outcome, PointReporter};
use crate::tiling::{PlaneGenerators, Tiling};

// everything a worker needs to build one drawing
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub plane: PlaneGenerators,
    pub relative_offset: Vec<f64>,
    pub window: Window,
}

impl GenerationRequest {

    // symmetric generators, no offset
    pub fn symmetric(dims: usize, window: Window) -> Result<Self> {
        Ok(GenerationRequest {
            plane: PlaneGenerators::symmetric(dims)?,
            relative_offset: vec![0.0; dims],
            window,
        })
    }

}

// Ok(None) when the run was interrupted
pub type GenerationResult = Result<Option<Drawing>>;

// Builds the tiling, scans the window and assembles the tiles on the
// calling thread. reported, if given, counts the accepted vertices as
// they come.
pub fn run<I>(request: &GenerationRequest,
              interruptor: &mut I,
              reported: Option<&AtomicUsize>) -> GenerationResult
where I: Interruptor + ?Sized
{

    let tiling = Arc::new(Tiling::init(&request.plane, &request.relative_offset)?);

    let mut drawing = Drawing::new(tiling.clone());

    let outcome = {
        let mut reporter = |point: &LatticePoint| {
            drawing.report_point(point);
            if let Some(counter) = reported {
                counter.fetch_add(1, Ordering::Relaxed);
            }
        };
        tiling.generate(&request.window, &mut reporter, interruptor)
    };

    if outcome == Outcome::Cancelled {
        return Ok(None);
    }

    match drawing.locate_tiles(interruptor) {
        Outcome::Completed => Ok(Some(drawing)),
        Outcome::Cancelled => Ok(None),
    }

}

//////////////////////////////////////////////////////////////////////

struct Job {
    handle: JoinHandle<()>,
    result_rx: mpsc::Receiver<GenerationResult>,
    should_stop: Arc<AtomicBool>,
    reported: Arc<AtomicUsize>,
    started: Instant,
}

impl Job {

    fn spawn(request: GenerationRequest) -> Self {

        let (result_tx, result_rx) = mpsc::channel();

        let should_stop = Arc::new(AtomicBool::new(false));
        let reported = Arc::new(AtomicUsize::new(0));

        let stop = Arc::clone(&should_stop);
        let counter = Arc::clone(&reported);

        let handle = thread::spawn(move || {
            let mut interruptor = || stop.load(Ordering::SeqCst);
            let result = run(&request, &mut interruptor, Some(&*counter));
            // the session may already be gone
            let _ = result_tx.send(result);
        });

        Job { handle, result_rx, should_stop, reported, started: Instant::now() }

    }

    // joins the worker and hands back what it sent
    fn finish(self) -> GenerationResult {

        let received = self.result_rx.recv();

        if self.handle.join().is_err() {
            bail!(ErrorKind::WorkerPanicked);
        }

        match received {
            Ok(result) => result,
            Err(_) => bail!(ErrorKind::WorkerPanicked),
        }

    }

}

// state of the session as seen by poll()
#[derive(Debug)]
pub enum Poll {
    Idle,
    Running { reported: usize, elapsed: Duration },
    Finished(GenerationResult),
}

#[derive(Default)]
pub struct Session {
    job: Option<Job>,
}

impl Session {

    pub fn new() -> Self {
        Session { job: None }
    }

    // stops and joins any job in flight, then starts request
    pub fn start(&mut self, request: GenerationRequest) {
        self.cancel();
        log::debug!("starting generation over {:?}", request.window);
        self.job = Some(Job::spawn(request));
    }

    // asks the worker to stop; returns immediately, the worker notices
    // at its next poll
    pub fn stop(&self) {
        if let Some(job) = &self.job {
            job.should_stop.store(true, Ordering::SeqCst);
        }
    }

    // stops, joins and discards the current job
    pub fn cancel(&mut self) {
        if let Some(job) = self.job.take() {
            job.should_stop.store(true, Ordering::SeqCst);
            if let Err(e) = job.finish() {
                log::warn!("discarded job failed: {}", e);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.job.is_some()
    }

    // vertices accepted so far by the current job
    pub fn reported(&self) -> usize {
        self.job.as_ref()
            .map_or(0, |job| job.reported.load(Ordering::Relaxed))
    }

    pub fn poll(&mut self) -> Poll {

        let done = match &self.job {
            None => return Poll::Idle,
            Some(job) => match job.result_rx.try_recv() {
                Ok(result) => Some(result),
                Err(mpsc::TryRecvError::Empty) => None,
                Err(mpsc::TryRecvError::Disconnected) => Some(Err(ErrorKind::WorkerPanicked.into())),
            },
        };

        match done {
            None => {
                let job = self.job.as_ref().map(|job| (job.reported.load(Ordering::Relaxed),
                                                       job.started.elapsed()));
                match job {
                    Some((reported, elapsed)) => Poll::Running { reported, elapsed },
                    None => Poll::Idle,
                }
            }
            Some(result) => {
                if let Some(job) = self.job.take() {
                    if job.handle.join().is_err() {
                        return Poll::Finished(Err(ErrorKind::WorkerPanicked.into()));
                    }
                }
                Poll::Finished(result)
            }
        }

    }

    // blocks until the current job ends; None if there is none
    pub fn wait(&mut self) -> Option<GenerationResult> {
        self.job.take().map(Job::finish)
    }

}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel();
    }
}
