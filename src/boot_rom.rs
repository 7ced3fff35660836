use std::fs;
use std::path::Path;

use crate::error::EmuError;
use crate::memory_region::{MemoryRegion, RamRegion};

/// Shadows `$0000-$00FF` until a write to `$FF50` permanently disables it
/// (I3 in the data model: the latch is write-once and irreversible).
pub struct BootRom {
    rom: RamRegion,
    enabled: bool,
}

impl BootRom {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EmuError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| EmuError::RomOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(BootRom {
            rom: RamRegion::from_bytes(bytes, crate::memory_map::BOOT_ROM_START),
            enabled: true,
        })
    }

    pub fn disable(&mut self) {
        if self.enabled {
            log::debug!("boot ROM disabled, cartridge now visible at $0000");
        }
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[cfg(test)]
    pub(crate) fn from_bytes_for_test(bytes: Vec<u8>) -> Self {
        BootRom {
            rom: RamRegion::from_bytes(bytes, crate::memory_map::BOOT_ROM_START),
            enabled: true,
        }
    }
}

impl MemoryRegion for BootRom {
    fn contains(&self, addr: u16) -> bool {
        self.enabled && self.rom.contains(addr)
    }

    fn read(&self, addr: u16) -> u8 {
        self.rom.read(addr)
    }

    fn write(&mut self, addr: u16, data: u8) {
        log::warn!("ignoring write to boot ROM address {addr:#06X}, data {data:#04X}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disable_is_permanent() {
        let mut rom = BootRom {
            rom: RamRegion::from_bytes(vec![0xAA], 0x0000),
            enabled: true,
        };
        assert!(rom.contains(0x0000));
        rom.disable();
        assert!(!rom.contains(0x0000));
        rom.disable(); // idempotent, stays disabled
        assert!(!rom.contains(0x0000));
    }
}
