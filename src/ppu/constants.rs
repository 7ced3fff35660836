#![allow(dead_code)]

pub const SCREEN_WIDTH: u32 = 160;
pub const SCREEN_HEIGHT: u32 = 144;

pub const OAM_SCAN_DOTS: u32 = 80;
pub const VBLANK_SCANLINES: u32 = 10;

pub const SPRITE_COUNT: usize = 40;
pub const SPRITE_BYTES: usize = 4;
pub const MAX_SPRITES_PER_LINE: usize = 10;

pub const FIFO_MAX_ENTRIES: usize = 16;
pub const FIFO_REFILL_THRESHOLD: usize = 8;

pub const LCDC_BG_TILEMAP_BIT: u8 = 3;
pub const LCDC_BG_TILEDATA_BIT: u8 = 4;
pub const LCDC_OBJ_SIZE_BIT: u8 = 2;

/// `colorId` (0..3) -> RGB, alpha always 0xFF. Fixed; not indirected through
/// a BGP-register palette (see `ppu` module docs).
pub const PALETTE: [(u8, u8, u8); 4] = [
    (0x34, 0x3D, 0x37),
    (0x55, 0x64, 0x5A),
    (0x8B, 0xA3, 0x94),
    (0xE0, 0xF0, 0xE7),
];
