//! Four-phase scanline state machine (OAM Search → Pixel Rendering → HBlank →
//! VBlank), driving a background-only fetcher/pixel-FIFO pair. Sprite and
//! window pixel compositing, the BGP/OBP palette registers, and STAT's
//! LYC-coincidence/mode-select interrupt generation are all non-goals: OAM is
//! scanned for sprite *selection* only (§`oam`), and the fixed four-color
//! palette in `constants::PALETTE` is applied directly to the fetcher's
//! `colorId` with no register indirection.
//!
//! A reference implementation's four phase objects disagree among
//! themselves about what their per-dot boolean return means (two read as
//! "keep going," two read as "done"). This module normalizes all phases to a
//! single "done when true" polarity, realized here as "the PPU Top checks
//! its own dot/pixel counters after ticking the active phase's local state"
//! rather than as literal `tick() -> bool` trait objects — the phases differ
//! in what per-dot inputs they need (OAM Search and HBlank/VBlank need only a
//! dot count; Pixel Rendering needs the bus and the display), so the
//! uniformity is in *when* a transition fires, not in a shared function
//! signature.

pub mod constants;
pub mod fetcher;
pub mod fifo;
pub mod io;
pub mod oam;

use std::cell::RefCell;
use std::rc::Rc;

use crate::display::{Display, Rgba};
use crate::interrupt::{InterruptController, InterruptSource};
use crate::memory_map::DOTS_PER_SCANLINE;
use crate::mmu::Mmu;

use constants::{OAM_SCAN_DOTS, PALETTE, SCREEN_WIDTH};
use fetcher::Fetcher;
use fifo::PixelFifo;
use io::PpuIo;
use oam::{scan_sprites, SpriteAttrs};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    OamSearch,
    PixelRendering,
    HBlank,
    VBlank,
}

/// Owns LY/LCDC/SCX/SCY/OAM (via the shared [`PpuIo`]) and ticks whichever
/// phase is active, one dot at a time.
pub struct Ppu {
    io: Rc<RefCell<PpuIo>>,
    interrupts: Rc<RefCell<InterruptController>>,
    phase: Phase,
    dots_this_scanline: u32,
    selected_sprites: Vec<SpriteAttrs>,
    fetcher: Fetcher,
    fifo: PixelFifo,
    pixels_to_drop: u32,
    pixels_drawn: u32,
}

impl Ppu {
    pub fn new(io: Rc<RefCell<PpuIo>>, interrupts: Rc<RefCell<InterruptController>>) -> Self {
        let mut ppu = Ppu {
            io,
            interrupts,
            phase: Phase::OamSearch,
            dots_this_scanline: 0,
            selected_sprites: Vec::new(),
            fetcher: Fetcher::new(),
            fifo: PixelFifo::new(),
            pixels_to_drop: 0,
            pixels_drawn: 0,
        };
        ppu.start_oam_search();
        ppu
    }

    /// Retained sprites for the current scanline, in discovery order.
    /// Exposed for a future compositing stage; unused by rendering today.
    pub fn selected_sprites(&self) -> &[SpriteAttrs] {
        &self.selected_sprites
    }

    /// Advances by one PPU dot. Returns `true` on the one dot per frame
    /// where `display.update_frame()` was just called (P4).
    pub fn tick(&mut self, bus: &Mmu, display: &mut dyn Display) -> bool {
        self.dots_this_scanline += 1;
        match self.phase {
            Phase::OamSearch => {
                if self.dots_this_scanline >= OAM_SCAN_DOTS {
                    self.phase = Phase::PixelRendering;
                    self.start_pixel_rendering();
                }
                false
            }
            Phase::PixelRendering => {
                self.tick_pixel_rendering(bus, display);
                if self.pixels_drawn >= SCREEN_WIDTH {
                    self.phase = Phase::HBlank;
                    self.start_hblank();
                }
                false
            }
            Phase::HBlank | Phase::VBlank => {
                if self.dots_this_scanline >= DOTS_PER_SCANLINE {
                    self.end_of_scanline(display)
                } else {
                    false
                }
            }
        }
    }

    fn start_oam_search(&mut self) {
        self.dots_this_scanline = 0;
        let ly = self.io.borrow().ly();
        self.selected_sprites = scan_sprites(&self.io.borrow(), ly);
        self.io.borrow_mut().set_mode(2);
    }

    fn start_pixel_rendering(&mut self) {
        self.fetcher.start();
        self.fifo.clear();
        let scx = self.io.borrow().scx();
        self.pixels_to_drop = 8 + (scx & 7) as u32;
        self.pixels_drawn = 0;
        self.io.borrow_mut().set_mode(3);
    }

    fn start_hblank(&mut self) {
        self.io.borrow_mut().set_mode(0);
    }

    fn start_vblank(&mut self) {
        self.io.borrow_mut().set_mode(1);
        self.interrupts.borrow_mut().request(InterruptSource::VBlank);
    }

    fn tick_pixel_rendering(&mut self, bus: &Mmu, display: &mut dyn Display) {
        let ly = self.io.borrow().ly();
        let fifo_len = self.fifo.len();
        let row = {
            let io_ref = self.io.borrow();
            self.fetcher.tick(bus, &io_ref, ly, fifo_len)
        };
        if let Some(row) = row {
            self.fifo.push_row(row);
        }

        if let Some(pixel) = self.fifo.pop() {
            if self.pixels_to_drop > 0 {
                self.pixels_to_drop -= 1;
            } else {
                let (r, g, b) = PALETTE[pixel.color_id as usize];
                display.draw(self.pixels_drawn, ly as u32, Rgba { r, g, b, a: 0xFF });
                self.pixels_drawn += 1;
            }
        }
    }

    /// Called once `dots_this_scanline` reaches 456 in HBlank or VBlank.
    /// Returns whether this was the HBlank→VBlank transition (frame flip).
    fn end_of_scanline(&mut self, display: &mut dyn Display) -> bool {
        self.dots_this_scanline = 0;
        let ly = self.io.borrow().ly();
        match self.phase {
            Phase::HBlank => {
                if ly == 143 {
                    self.io.borrow_mut().set_ly(ly + 1);
                    self.phase = Phase::VBlank;
                    self.start_vblank();
                    display.update_frame();
                    true
                } else {
                    self.io.borrow_mut().set_ly(ly + 1);
                    self.phase = Phase::OamSearch;
                    self.start_oam_search();
                    false
                }
            }
            Phase::VBlank => {
                if ly >= 153 {
                    self.io.borrow_mut().set_ly(0);
                    self.phase = Phase::OamSearch;
                    self.start_oam_search();
                } else {
                    self.io.borrow_mut().set_ly(ly + 1);
                }
                false
            }
            _ => unreachable!("end_of_scanline only called from HBlank/VBlank"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::RecordingDisplay;
    use crate::memory_map::{
        BG_WIN_TILEDATA_ADDRESS1, BG_WIN_TILEMAP_ADDRESS0, VRAM_SIZE, VRAM_START,
    };
    use crate::memory_region::{MemoryRegion, RamRegion};

    fn test_bus() -> Mmu {
        let mut bus = Mmu::new();
        bus.add_region(Box::new(RamRegion::new(VRAM_SIZE, VRAM_START)));
        bus
    }

    fn new_ppu() -> (Ppu, Rc<RefCell<PpuIo>>) {
        let io = Rc::new(RefCell::new(PpuIo::new()));
        let interrupts = Rc::new(RefCell::new(InterruptController::new()));
        (Ppu::new(io.clone(), interrupts), io)
    }

    #[test]
    fn oam_search_lasts_eighty_dots() {
        let (mut ppu, io) = new_ppu();
        let bus = test_bus();
        let mut display = RecordingDisplay::new();
        for _ in 0..79 {
            ppu.tick(&bus, &mut display);
        }
        assert_eq!(io.borrow().read(crate::memory_map::STAT_ADDR) & 0x03, 2);
        ppu.tick(&bus, &mut display);
        assert_eq!(io.borrow().read(crate::memory_map::STAT_ADDR) & 0x03, 3);
    }

    #[test]
    fn scanline_zero_background_renders_fixed_palette_colors() {
        let (mut ppu, io) = new_ppu();
        let mut bus = test_bus();

        // Tile 0 at $8000: every row's low byte 0xFF, high byte 0x00 -> colorId 1.
        for row in 0..8u16 {
            bus.write_byte(BG_WIN_TILEDATA_ADDRESS1 + row * 2, 0xFF);
            bus.write_byte(BG_WIN_TILEDATA_ADDRESS1 + row * 2 + 1, 0x00);
        }
        // Tilemap entry for (0,0) already defaults to 0 (tile index 0); since
        // LCDC defaults to bit3=0/bit4=0 here we force the unsigned/$8000
        // addressing mode explicitly via LCDC bit 4, keeping tilemap at $9800.
        bus.write_byte(crate::memory_map::LCDC_ADDR, 1 << 4);

        let mut display = RecordingDisplay::new();
        for _ in 0..DOTS_PER_SCANLINE {
            ppu.tick(&bus, &mut display);
        }

        assert_eq!(io.borrow().ly(), 1);
        let row0: Vec<_> = display.pixels.iter().filter(|(_, y, _)| *y == 0).collect();
        assert_eq!(row0.len(), 160);
        for (x, _, color) in &row0 {
            assert_eq!(*color, Rgba { r: 0x55, g: 0x64, b: 0x5A, a: 0xFF });
            let _ = x;
        }
    }

    #[test]
    fn first_tile_fetched_after_start_is_dropped_not_advanced() {
        let (mut ppu, io) = new_ppu();
        let mut bus = test_bus();

        // Tile 0: colorId 1 on every row. Tile 1: colorId 2 on every row.
        for row in 0..8u16 {
            bus.write_byte(BG_WIN_TILEDATA_ADDRESS1 + row * 2, 0xFF);
            bus.write_byte(BG_WIN_TILEDATA_ADDRESS1 + row * 2 + 1, 0x00);
            bus.write_byte(BG_WIN_TILEDATA_ADDRESS1 + 16 + row * 2, 0x00);
            bus.write_byte(BG_WIN_TILEDATA_ADDRESS1 + 16 + row * 2 + 1, 0xFF);
        }
        // Tilemap: entry 0 stays index 0 (default); entry 1 is index 1, so a
        // fetcher that wrongly advances on the dropped initial fetch would
        // read tile 1 for the visible columns instead of tile 0.
        bus.write_byte(BG_WIN_TILEMAP_ADDRESS0 + 1, 1);
        bus.write_byte(crate::memory_map::LCDC_ADDR, 1 << 4);

        let mut display = RecordingDisplay::new();
        for _ in 0..DOTS_PER_SCANLINE {
            ppu.tick(&bus, &mut display);
        }

        assert_eq!(io.borrow().ly(), 1);
        let mut row0: Vec<_> = display.pixels.iter().filter(|(_, y, _)| *y == 0).collect();
        row0.sort_by_key(|(x, _, _)| *x);
        assert_eq!(row0.len(), 160);
        for (x, _, color) in row0.iter().take(8) {
            assert_eq!(
                *color,
                Rgba { r: 0x55, g: 0x64, b: 0x5A, a: 0xFF },
                "screen column {x} should show tilemap tile 0, not tile 1"
            );
        }
    }

    #[test]
    fn one_frame_calls_update_frame_exactly_once() {
        let (mut ppu, _io) = new_ppu();
        let bus = test_bus();
        let mut display = RecordingDisplay::new();
        let total_dots = 154u32 * DOTS_PER_SCANLINE;
        for _ in 0..total_dots {
            ppu.tick(&bus, &mut display);
        }
        assert_eq!(display.frame_count, 1);
    }

    #[test]
    fn pixel_fifo_length_never_exceeds_sixteen() {
        // Exercised indirectly: push_row() itself asserts this (see fifo.rs);
        // running pixel rendering end to end without panicking is the check.
        let (mut ppu, _io) = new_ppu();
        let bus = test_bus();
        let mut display = RecordingDisplay::new();
        for _ in 0..DOTS_PER_SCANLINE {
            ppu.tick(&bus, &mut display);
        }
    }
}
