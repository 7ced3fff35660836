use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use crate::boot_rom::BootRom;
use crate::cartridge;
use crate::cpu::Cpu;
use crate::display::Display;
use crate::error::EmuError;
use crate::interrupt::{InterruptController, SharedInterruptController};
use crate::memory_map::{HRAM_SIZE, HRAM_START, VRAM_SIZE, VRAM_START, WRAM_SIZE, WRAM_START};
use crate::memory_region::RamRegion;
use crate::mmu::Mmu;
use crate::ppu::io::{PpuIo, SharedPpuIo};
use crate::ppu::Ppu;

/// Wires the CPU, MMU, interrupt controller, and PPU together and drives
/// them with a cooperative single-threaded loop, mirroring the reference
/// binary's `Emulator` (`cpu` + `ppu` + `memory_bus`, minus the APU, which is
/// an explicit non-goal here).
pub struct GameBoy {
    cpu: Cpu,
    bus: Mmu,
    ppu: Ppu,
}

impl GameBoy {
    /// Assembles a fresh machine with `boot_rom_path` shadowing `$0000-$00FF`
    /// and `cartridge_path` loaded as a flat, unbanked ROM region. Region
    /// registration order matches §4.2: boot ROM, then cartridge, then RAM
    /// regions, then PPU, then interrupt controller.
    pub fn new(
        boot_rom_path: impl AsRef<Path>,
        cartridge_path: impl AsRef<Path>,
    ) -> Result<Self, EmuError> {
        let boot_rom = BootRom::load(boot_rom_path)?;
        let cartridge_rom = cartridge::load(cartridge_path)?;

        let interrupts = Rc::new(RefCell::new(InterruptController::new()));
        let ppu_io = Rc::new(RefCell::new(PpuIo::new()));

        let mut bus = Mmu::new();
        bus.set_boot_rom(boot_rom);
        bus.add_region(Box::new(cartridge_rom));
        bus.add_region(Box::new(RamRegion::new(VRAM_SIZE, VRAM_START)));
        bus.add_region(Box::new(RamRegion::new(WRAM_SIZE, WRAM_START)));
        bus.add_region(Box::new(RamRegion::new(HRAM_SIZE, HRAM_START)));
        bus.add_region(Box::new(SharedPpuIo(ppu_io.clone())));
        bus.add_region(Box::new(SharedInterruptController(interrupts.clone())));

        let cpu = Cpu::new_at_boot_rom(interrupts.clone());
        let ppu = Ppu::new(ppu_io, interrupts);

        Ok(GameBoy { cpu, bus, ppu })
    }

    /// Runs one CPU instruction (or serviced interrupt, or idle HALT/STOP
    /// tick) and ticks the PPU for the matching number of dots (one
    /// T-cycle == one dot, per §4.5). Returns whether a frame was just
    /// completed, so callers can drive `update_frame` pacing without
    /// assuming a fixed cycle budget.
    pub fn step(&mut self, display: &mut dyn Display) -> Result<bool, EmuError> {
        let cycles = self.cpu.step(&mut self.bus)?;
        let mut frame_complete = false;
        for _ in 0..cycles {
            if self.ppu.tick(&self.bus, display) {
                frame_complete = true;
            }
        }
        Ok(frame_complete)
    }

    /// Runs CPU steps until exactly one frame has completed.
    pub fn run_frame(&mut self, display: &mut dyn Display) -> Result<(), EmuError> {
        loop {
            if self.step(display)? {
                return Ok(());
            }
        }
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::RecordingDisplay;
    use std::fs;
    use std::io::Write;

    fn write_temp(name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn new_fails_with_fatal_error_on_missing_boot_rom() {
        let cart = write_temp("gbcore_system_test_cart.gb", &[0u8; 32]);
        let result = GameBoy::new("/nonexistent/boot.bin", &cart);
        assert!(matches!(result, Err(EmuError::RomOpen { .. })));
        let _ = fs::remove_file(&cart);
    }

    #[test]
    fn step_executes_instructions_and_ticks_ppu() {
        let boot = write_temp("gbcore_system_test_boot.bin", &[0x00; 256]); // all NOP
        let cart = write_temp("gbcore_system_test_cart2.gb", &[0u8; 32]);
        let mut gb = GameBoy::new(&boot, &cart).unwrap();
        let mut display = RecordingDisplay::new();
        for _ in 0..10 {
            gb.step(&mut display).unwrap();
        }
        assert!(gb.cpu().pc() > 0);
        let _ = fs::remove_file(&boot);
        let _ = fs::remove_file(&cart);
    }
}
