//////////////////////////////////////////////////////////////////////
// command line front end: generate one window of a tiling on a worker
// thread, report progress, and optionally write it out as PDF or PNG

#[macro_use]
extern crate error_chain;

use std::thread;
use std::time::Duration;

use clap::Parser;
use phf::phf_map;

use quasitiler::errors::*;
use quasitiler::geometry::{PlanePoint, Window};
use quasitiler::{Drawing, GenerationRequest, PlaneGenerators, Poll, Session};

const DEG: f64 = std::f64::consts::PI / 180.0;

// how often the front end checks on the worker
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, PartialEq, Clone, Copy)]
enum View {
    Tiles,
    Orthogonal,
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum OutputFormat {
    Pdf,
    Png,
}

static VIEW_LOOKUP: phf::Map<&'static str, View> = phf_map! {
    "tiles" => View::Tiles,
    "orthogonal" => View::Orthogonal,
    "ortho" => View::Orthogonal,
};

static FORMAT_LOOKUP: phf::Map<&'static str, OutputFormat> = phf_map! {
    "pdf" => OutputFormat::Pdf,
    "png" => OutputFormat::Png,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Dimension of the integer lattice (3 to 8)
    #[arg(short, long, default_value_t = 5)]
    dims: usize,

    /// Offset of the plane in generator coordinates, comma separated,
    /// one value per dimension (the first two are ignored)
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    offset: Vec<f64>,

    /// Half width of the square window to generate
    #[arg(long, default_value_t = 20.0)]
    half_width: f64,

    /// Window center as x,y
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    center: Vec<f64>,

    /// Rotate the plane generators by this many degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    rotate_deg: f64,

    /// Output scale, in points per unit of the plane
    #[arg(long, default_value_t = 30.0)]
    zoom: f64,

    /// What to draw: tiles, or the vertices in orthogonal space
    #[arg(long, default_value = "tiles")]
    view: String,

    /// Stop the worker after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Output file, .pdf or .png; without one only a summary is printed
    output: Option<String>,
}

// look up a key in a string map, listing the valid keys on failure
fn lookup<T: Copy>(map: &phf::Map<&'static str, T>, what: &str, value: &str) -> Result<T> {

    if let Some(&k) = map.get(value) {
        return Ok(k);
    }

    let mut keys: Vec<&str> = map.keys().cloned().collect();
    keys.sort();

    bail!("unexpected value \"{}\" for {}, expected one of: {{\"{}\"}}",
          value, what, keys.join("\", \""))

}

fn output_format(path: &str) -> Result<OutputFormat> {

    let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();

    lookup(&FORMAT_LOOKUP, "output extension", &ext)
        .chain_err(|| format!("can't write {}", path))

}

fn build_request(args: &Args) -> Result<GenerationRequest> {

    let mut plane = PlaneGenerators::symmetric(args.dims)?;

    if args.rotate_deg != 0.0 {
        plane.rotate(args.rotate_deg * DEG);
    }

    let relative_offset = if args.offset.is_empty() {
        vec![0.0; args.dims]
    } else {
        args.offset.clone()
    };

    let center = match args.center.len() {
        0 => PlanePoint::origin(),
        2 => PlanePoint::new(args.center[0], args.center[1]),
        n => bail!("center needs 2 values, got {}", n),
    };

    if !(args.half_width > 0.0) {
        bail!("half width must be positive");
    }

    Ok(GenerationRequest {
        plane,
        relative_offset,
        window: Window::centered(center, args.half_width),
    })

}

// run the job to completion, stopping it once the timeout passes
fn generate(request: GenerationRequest, timeout: Option<Duration>) -> Result<Drawing> {

    let mut session = Session::new();
    session.start(request);

    let mut stopping = false;

    let result = loop {

        match session.poll() {

            Poll::Running { reported, elapsed } => {

                log::info!("{} vertices after {:.1}s", reported, elapsed.as_secs_f64());

                if let Some(timeout) = timeout {
                    if !stopping && elapsed >= timeout {
                        log::warn!("timeout reached, stopping");
                        session.stop();
                        stopping = true;
                    }
                }

                thread::sleep(POLL_INTERVAL);

            }

            Poll::Finished(result) => break result,

            Poll::Idle => bail!("worker went away"),

        }

    };

    match result? {
        Some(drawing) => Ok(drawing),
        None => bail!("generation stopped before it finished"),
    }

}

fn summarize(drawing: &Drawing) {

    let tiling = drawing.tiling();
    let tiles = drawing.tiles();

    println!("dimension {}: {} vertices, {} tiles",
             tiling.dims(), drawing.vertices().len(), tiles.tile_count());

    for slot in 0..tiles.slot_count() {
        let [gen0, gen1] = tiling.tile_generator(slot);
        println!("  tile {:2} ({}, {}): {}", slot, gen0, gen1, tiles.slot(slot).len());
    }

}

#[cfg(feature = "render")]
fn write_output(drawing: &Drawing, window: &Window, args: &Args, view: View,
                format: OutputFormat, path: &str) -> Result<()> {

    use quasitiler::palette::Palette;
    use quasitiler::render::{self, PageSettings};

    let settings = PageSettings { zoom: args.zoom, ..PageSettings::default() };

    let contents = match view {
        View::Tiles => *window,
        View::Orthogonal => render::orthogonal_bounds(drawing),
    };

    let (dims, page_rect) = settings.page_for(&contents);

    let palette = Palette::new();

    let draw = |ctx: &cairo::Context| match view {
        View::Tiles => render::draw_tiles(ctx, drawing, &palette, &contents, &page_rect, &settings),
        View::Orthogonal => render::draw_orthogonal(ctx, drawing, &contents, &page_rect, &settings),
    };

    match format {
        OutputFormat::Pdf => render::write_pdf(path, dims, draw),
        OutputFormat::Png => render::write_png(path, dims, draw),
    }

}

#[cfg(not(feature = "render"))]
fn write_output(_drawing: &Drawing, _window: &Window, _args: &Args, _view: View,
                _format: OutputFormat, path: &str) -> Result<()> {
    bail!("can't write {}: built without the render feature", path)
}

fn run() -> Result<()> {

    env_logger::init();

    let args = Args::parse();

    let view = lookup(&VIEW_LOOKUP, "view", &args.view)?;

    let format = match &args.output {
        Some(path) => Some(output_format(path)?),
        None => None,
    };

    let request = build_request(&args)?;
    let window = request.window;

    let timeout = args.timeout_ms.map(Duration::from_millis);

    let drawing = generate(request, timeout)?;

    summarize(&drawing);

    if let (Some(path), Some(format)) = (&args.output, format) {
        write_output(&drawing, &window, &args, view, format, path)?;
        println!("wrote {}", path);
    }

    Ok(())

}

quick_main!(run);
