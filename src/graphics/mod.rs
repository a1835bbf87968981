pub mod blend;
pub mod color;
pub mod draw;

use crate::math::{Vec2, F2};

pub use color::Color;

pub type Argb = u32;

pub type P2 = Vec2<i32>;

pub const DEFAULT_BACKGROUND: Argb = 0xFF_08_0A_1A;

pub(crate) trait Pixel: Copy + Clone + Sized + std::fmt::Debug {
    fn black() -> Self;
    fn trans() -> Self;

    fn mix(self, other: Self) -> Self;

    fn decompose(self) -> [u8; 4];
    fn compose(array: [u8; 4]) -> Self;
}

/// The 2D drawing operations the scene needs. Coordinates are in
/// viewport pixels and may lie outside the surface.
pub trait Surface {
    fn clear(&mut self);
    fn fill_circle(&mut self, center: F2, radius: f32, color: Color);
    fn fill_triangle(&mut self, a: F2, b: F2, c: F2, color: Color);
    fn fill_rect(&mut self, origin: F2, width: f32, height: f32, color: Color);
}

/// Discards every draw call. Used by the headless runner.
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self) {}
    fn fill_circle(&mut self, _: F2, _: f32, _: Color) {}
    fn fill_triangle(&mut self, _: F2, _: F2, _: F2, _: Color) {}
    fn fill_rect(&mut self, _: F2, _: f32, _: f32, _: Color) {}
}

pub struct Canvas {
    buffer: Vec<Argb>,
    width: usize,
    height: usize,

    background: Argb,
}

impl Canvas {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            buffer: vec![Argb::trans(); w * h],
            width: w,
            height: h,

            background: DEFAULT_BACKGROUND,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.buffer.resize(w * h, Argb::trans());
        self.width = w;
        self.height = h;
        self.buffer.fill(Argb::trans());
    }

    pub fn pixel(&self, i: usize) -> Argb {
        self.buffer.get(i).copied().unwrap_or(Argb::trans())
    }

    pub fn as_slice(&self) -> &[Argb] {
        self.buffer.as_slice()
    }

    // Each source pixel becomes a `scale` x `scale` block. The destination
    // may be wider than the scaled canvas (window managers do not always
    // honor size increments), so its row stride is passed separately.
    pub fn scale_to(&self, scale: usize, dest: &mut [Argb], dst_width: usize) {
        if self.width == 0 || scale == 0 || dst_width == 0 {
            return;
        }

        let background = self.background;

        self.buffer
            .chunks_exact(self.width)
            .zip(dest.chunks_mut(dst_width * scale))
            .for_each(|(src_row, dst_block)| {
                for dst_line in dst_block.chunks_mut(dst_width) {
                    src_row
                        .iter()
                        .zip(dst_line.chunks_mut(scale))
                        .for_each(|(src_pixel, dst_chunk)| {
                            dst_chunk.fill(background.mix(*src_pixel))
                        });
                }
            });
    }

    /// Downsample into `dest`, keeping the brightest value of each channel
    /// in every source box so thin shapes survive. Pixels are composited
    /// over black; a terminal supplies its own background.
    pub fn shrink_max_to(&self, dest: &mut Canvas) {
        if dest.width == 0 || dest.height == 0 {
            return;
        }

        for dy in 0..dest.height {
            let y0 = dy * self.height / dest.height;
            let y1 = ((dy + 1) * self.height / dest.height).max(y0 + 1);

            for dx in 0..dest.width {
                let x0 = dx * self.width / dest.width;
                let x1 = ((dx + 1) * self.width / dest.width).max(x0 + 1);

                let mut max = [0u8; 3];

                for y in y0..y1.min(self.height) {
                    for x in x0..x1.min(self.width) {
                        let [_, r, g, b] = Argb::black()
                            .mix(self.pixel(y * self.width + x))
                            .decompose();

                        max[0] = max[0].max(r);
                        max[1] = max[1].max(g);
                        max[2] = max[2].max(b);
                    }
                }

                dest.buffer[dy * dest.width + dx] = Argb::compose([0xFF, max[0], max[1], max[2]]);
            }
        }
    }
}

impl Surface for Canvas {
    fn clear(&mut self) {
        self.buffer.fill(Argb::trans());
    }

    fn fill_circle(&mut self, center: F2, radius: f32, color: Color) {
        draw::draw_circle_by(
            &mut self.buffer,
            self.width,
            self.height,
            center.to_p2(),
            radius.round() as i32,
            color.to_argb(),
            Argb::mix,
        );
    }

    fn fill_triangle(&mut self, a: F2, b: F2, c: F2, color: Color) {
        draw::draw_triangle_by(
            &mut self.buffer,
            self.width,
            self.height,
            a.to_p2(),
            b.to_p2(),
            c.to_p2(),
            color.to_argb(),
            Argb::mix,
        );
    }

    fn fill_rect(&mut self, origin: F2, width: f32, height: f32, color: Color) {
        draw::draw_rect_wh_by(
            &mut self.buffer,
            self.width,
            self.height,
            origin.to_p2(),
            width.round().max(0.0) as usize,
            height.round().max(0.0) as usize,
            color.to_argb(),
            Argb::mix,
        );
    }
}
