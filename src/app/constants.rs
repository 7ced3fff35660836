use gbcore::ppu::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub const GB_SCALE_FACTOR: u32 = 3;
pub const GB_SCREEN_WIDTH: u32 = SCREEN_WIDTH * GB_SCALE_FACTOR;
pub const GB_SCREEN_HEIGHT: u32 = SCREEN_HEIGHT * GB_SCALE_FACTOR;
