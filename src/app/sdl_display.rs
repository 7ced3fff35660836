use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

use gbcore::display::{Display, Rgba};
use gbcore::ppu::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};

use crate::constants::GB_SCALE_FACTOR;

/// The binary's only `Display` implementor: accumulates one frame's worth of
/// pixels, then blits each as a scaled filled rectangle on an accelerated
/// canvas, matching the reference binary's own blit strategy but without its
/// disassembly/VRAM/input debug panes (out of scope here).
pub struct SdlDisplay {
    canvas: Canvas<Window>,
    buffer: Vec<Rgba>,
}

impl SdlDisplay {
    pub fn new(canvas: Canvas<Window>) -> Self {
        SdlDisplay {
            canvas,
            buffer: vec![Rgba::default(); (SCREEN_WIDTH * SCREEN_HEIGHT) as usize],
        }
    }
}

impl Display for SdlDisplay {
    fn draw(&mut self, x: u32, y: u32, color: Rgba) {
        let index = (y * SCREEN_WIDTH + x) as usize;
        if let Some(pixel) = self.buffer.get_mut(index) {
            *pixel = color;
        }
    }

    fn update_frame(&mut self) {
        self.canvas.set_draw_color(Color::RGB(0, 0, 0));
        self.canvas.clear();

        for y in 0..SCREEN_HEIGHT {
            for x in 0..SCREEN_WIDTH {
                let pixel = self.buffer[(y * SCREEN_WIDTH + x) as usize];
                self.canvas.set_draw_color(Color::RGBA(pixel.r, pixel.g, pixel.b, pixel.a));
                let rect = Rect::new(
                    (x * GB_SCALE_FACTOR) as i32,
                    (y * GB_SCALE_FACTOR) as i32,
                    GB_SCALE_FACTOR,
                    GB_SCALE_FACTOR,
                );
                self.canvas
                    .fill_rect(rect)
                    .unwrap_or_else(|e| log::warn!("failed to draw pixel at ({x},{y}): {e}"));
            }
        }

        self.canvas.present();
    }
}
