use macroquad::prelude::*;
use crate::application::{Phase, Simulation};
use crate::domain::{Cell, Grid};

/// Alive cells
pub const ALIVE_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);
/// Dead cells
pub const DEAD_COLOR: Color = Color::new(0.2, 0.2, 0.1, 1.0);

/// RGBA bytes for one cell
fn cell_rgba(cell: Cell) -> [u8; 4] {
    let color = match cell {
        Cell::Alive => ALIVE_COLOR,
        Cell::Dead => DEAD_COLOR,
    };
    [color.r, color.g, color.b, color.a].map(|channel| (channel * 255.0) as u8)
}

/// Format large numbers with K/M suffixes
fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Texture and window extents for one grid, checked against the display types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplaySize {
    /// One texel per cell
    pub texture: (u16, u16),
    /// Window size in screen pixels
    pub window: (i32, i32),
}

/// Sizes for showing a `width` x `height` grid at `scale` pixels per cell.
/// `None` when the grid has more cells per side than a texture holds or the
/// scaled window does not fit in `i32`.
pub fn display_size(width: usize, height: usize, scale: u32) -> Option<DisplaySize> {
    let texture = (u16::try_from(width).ok()?, u16::try_from(height).ok()?);
    let pixels = |cells: u16| {
        u32::from(cells)
            .checked_mul(scale)
            .and_then(|px| i32::try_from(px).ok())
    };
    Some(DisplaySize {
        texture,
        window: (pixels(texture.0)?, pixels(texture.1)?),
    })
}

/// GPU-side image of a grid. Owned by the frame loop and refreshed from
/// the current buffer once per displayed frame.
pub struct GridTexture {
    image: Image,
    texture: Texture2D,
}

impl GridTexture {
    pub fn new(size: DisplaySize) -> Self {
        let (width, height) = size.texture;
        let image = Image::gen_image_color(width, height, DEAD_COLOR);
        let texture = Texture2D::from_image(&image);
        texture.set_filter(FilterMode::Nearest);
        Self { image, texture }
    }

    /// Copy the grid into the texture
    pub fn update(&mut self, grid: &Grid) {
        self.image
            .bytes
            .chunks_exact_mut(4)
            .zip(grid.cells())
            .for_each(|(pixel, &cell)| pixel.copy_from_slice(&cell_rgba(cell)));
        self.texture.update(&self.image);
    }

    /// Draw the grid at the top-left corner, `scale` pixels per cell
    pub fn draw(&self, scale: f32) {
        let size = vec2(
            self.image.width() as f32 * scale,
            self.image.height() as f32 * scale,
        );
        draw_texture_ex(
            &self.texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(size),
                ..Default::default()
            },
        );
    }
}

/// Phase, generation and timing in the top-left corner
pub fn draw_status(sim: &Simulation) {
    let (status, color) = match sim.phase() {
        Phase::Painting => ("Painting - LMB: paint, Space: start", YELLOW),
        Phase::Running => ("Running", GREEN),
    };
    draw_rectangle(4.0, 4.0, 330.0, 62.0, Color::from_rgba(0, 0, 0, 170));
    draw_text(status, 10.0, 22.0, 18.0, color);
    draw_text(
        &format!(
            "Generation {} | Alive {}",
            sim.generation(),
            format_number(sim.population())
        ),
        10.0,
        40.0,
        16.0,
        WHITE,
    );
    draw_text(
        &format!(
            "Step {:.1}ms | {} | FPS {}",
            sim.last_step_time_ms(),
            sim.stepper().schedule().name(),
            get_fps()
        ),
        10.0,
        58.0,
        16.0,
        GRAY,
    );
}
