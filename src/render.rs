//////////////////////////////////////////////////////////////////////
// cairo output of a finished drawing: filled rhombi on the tiling
// plane, or the vertices as dots in the orthogonal space

use std::f64::consts::PI;
use std::fs::File;

use crate::drawing::Drawing;
use crate::errors::*;
use crate::geometry::{PlanePoint, Vec2d, Window};
use crate::palette::{Palette, BACKGROUND_COLOR, EDGE_COLOR};

type Transform2d = nalgebra::Transform2<f64>;
type Translation2d = nalgebra::Translation2<f64>;
type Matrix3d = nalgebra::Matrix3<f64>;

#[derive(Debug, Clone, Copy)]
pub struct PageSettings {
    // points per plane unit
    pub zoom: f64,
    // blank border around the contents, in points
    pub margin: f64,
    pub edge_width: f64,
    pub dot_radius: f64,
}

impl Default for PageSettings {
    fn default() -> Self {
        PageSettings { zoom: 30.0, margin: 18.0, edge_width: 0.5, dot_radius: 1.5 }
    }
}

impl PageSettings {

    // (page dims, drawable rect of the page) for contents at this zoom
    pub fn page_for(&self, contents: &Window) -> (Vec2d, Window) {

        let m = Vec2d::repeat(self.margin);
        let dims = contents.dims() * self.zoom + 2.0 * m;

        let rect = Window::new(PlanePoint::origin() + m,
                               PlanePoint::origin() + dims - m);

        (dims, rect)

    }

}

//////////////////////////////////////////////////////////////////////
// map contents_rect into page_rect, centered and scaled to fit, with
// y pointing up

fn get_page_transform(contents_rect: &Window,
                      page_rect: &Window) -> (Transform2d, f64) {

    let cdims = contents_rect.dims();
    let pdims = page_rect.dims();

    let scl = (pdims.component_div(&cdims)).min();

    let vmid = contents_rect.center();
    let pmid = page_rect.center();

    let translate_page = Translation2d::new(pmid[0], pmid[1]);

    let scale = Transform2d::from_matrix_unchecked(
        Matrix3d::new(
            scl, 0.0, 0.0,
            0.0, -scl, 0.0,
            0.0, 0.0, 1.0
        )
    );

    let translate_points = Translation2d::new(-vmid[0], -vmid[1]);

    (translate_page * scale * translate_points, scl)

}

//////////////////////////////////////////////////////////////////////

trait CairoTileOps {
    fn moveto(&self, p: &PlanePoint);
    fn lineto(&self, p: &PlanePoint);
    fn setcolor(&self, rgb: &[f64; 3]);
    fn drawquad(&self, quad: &[PlanePoint; 4]);
    fn drawdot(&self, p: &PlanePoint, radius: f64);
    fn cliprect(&self, rect: &Window);
}

impl CairoTileOps for cairo::Context {

    fn moveto(&self, p: &PlanePoint) {
        self.move_to(p.x, p.y);
    }

    fn lineto(&self, p: &PlanePoint) {
        self.line_to(p.x, p.y);
    }

    fn setcolor(&self, rgb: &[f64; 3]) {
        self.set_source_rgb(rgb[0], rgb[1], rgb[2]);
    }

    fn drawquad(&self, quad: &[PlanePoint; 4]) {
        self.moveto(&quad[0]);
        for p in quad[1..].iter() {
            self.lineto(p);
        }
        self.close_path();
    }

    fn drawdot(&self, p: &PlanePoint, radius: f64) {
        self.new_sub_path();
        self.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
    }

    fn cliprect(&self, rect: &Window) {
        let d = rect.dims();
        self.rectangle(rect.min.x, rect.min.y, d.x, d.y);
        self.clip();
    }

}

//////////////////////////////////////////////////////////////////////
// drawing routines

pub fn draw_tiles(ctx: &cairo::Context,
                  drawing: &Drawing,
                  palette: &Palette,
                  contents: &Window,
                  page_rect: &Window,
                  settings: &PageSettings) {

    let (transform, _) = get_page_transform(contents, page_rect);
    let dims = drawing.tiling().dims();

    ctx.save();
    ctx.cliprect(page_rect);
    ctx.set_line_width(settings.edge_width);

    for (slot, anchor) in drawing.tiles().iter() {

        let corners = drawing.tile_corners(slot, anchor);

        let mut quad = corners;
        for (q, c) in quad.iter_mut().zip(corners.iter()) {
            *q = transform * c;
        }

        let color = palette.tile_color(dims, slot);

        ctx.drawquad(&quad);
        ctx.setcolor(&[color[0], color[1], color[2]]);
        ctx.fill_preserve();
        ctx.setcolor(&EDGE_COLOR);
        ctx.stroke();

    }

    ctx.restore();

}

// bounding box of the vertices in the orthogonal space
pub fn orthogonal_bounds(drawing: &Drawing) -> Window {

    let mut rect = Window::empty();

    for vertex_index in 0..drawing.vertices().len() {
        rect.expand(&drawing.orthogonal_position(vertex_index));
    }

    if rect.is_empty() {
        Window::centered(PlanePoint::origin(), 1.0)
    } else {
        rect.expanded(0.05)
    }

}

pub fn draw_orthogonal(ctx: &cairo::Context,
                       drawing: &Drawing,
                       contents: &Window,
                       page_rect: &Window,
                       settings: &PageSettings) {

    let (transform, _) = get_page_transform(contents, page_rect);

    ctx.setcolor(&[0.0, 0.0, 0.0]);

    for vertex_index in 0..drawing.vertices().len() {
        let p = transform * drawing.orthogonal_position(vertex_index);
        ctx.drawdot(&p, settings.dot_radius);
    }

    ctx.fill();

}

//////////////////////////////////////////////////////////////////////
// output files

fn clear_page(ctx: &cairo::Context) {
    ctx.setcolor(&BACKGROUND_COLOR);
    ctx.paint();
}

pub fn write_pdf<F>(path: &str, dims: Vec2d, draw: F) -> Result<()>
where F: FnOnce(&cairo::Context)
{

    let surface = cairo::PdfSurface::new(dims.x, dims.y, path)
        .chain_err(|| format!("creating {}", path))?;

    let ctx = cairo::Context::new(&surface);

    clear_page(&ctx);
    draw(&ctx);

    ctx.show_page();

    Ok(())

}

pub fn write_png<F>(path: &str, dims: Vec2d, draw: F) -> Result<()>
where F: FnOnce(&cairo::Context)
{

    let surface = cairo::ImageSurface::create(
        cairo::Format::ARgb32, dims.x.ceil() as i32, dims.y.ceil() as i32)?;

    {
        let ctx = cairo::Context::new(&surface);
        clear_page(&ctx);
        draw(&ctx);
    }

    let mut file = File::create(path).chain_err(|| format!("creating {}", path))?;

    surface.write_to_png(&mut file)
        .map_err(|e| format!("writing {}: {:?}", path, e))?;

    Ok(())

}
