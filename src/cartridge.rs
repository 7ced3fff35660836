use std::fs;
use std::path::Path;

use crate::error::EmuError;
use crate::memory_map::{ROM_SIZE, ROM_START};
use crate::memory_region::RamRegion;

/// Loads a cartridge ROM image into a flat, unbanked region spanning
/// `$0000-$7FFF`. No memory bank controller is modeled (MBC1/MBC3/RTC are
/// out of scope); images larger than `ROM_SIZE` are truncated and images
/// smaller are zero-padded, each logged once.
pub fn load(path: impl AsRef<Path>) -> Result<RamRegion, EmuError> {
    let path = path.as_ref();
    let mut bytes = fs::read(path).map_err(|source| EmuError::RomOpen {
        path: path.to_path_buf(),
        source,
    })?;

    if bytes.len() > ROM_SIZE {
        log::warn!(
            "cartridge {:?} is {} bytes, truncating to {} (no MBC support)",
            path,
            bytes.len(),
            ROM_SIZE
        );
        bytes.truncate(ROM_SIZE);
    } else if bytes.len() < ROM_SIZE {
        log::warn!(
            "cartridge {:?} is only {} bytes, padding to {}",
            path,
            bytes.len(),
            ROM_SIZE
        );
        bytes.resize(ROM_SIZE, 0xFF);
    }

    Ok(RamRegion::from_bytes(bytes, ROM_START))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn oversized_rom_is_truncated() {
        let path = write_temp("gbcore_test_oversized.rom", &vec![0xAB; ROM_SIZE + 10]);
        let region = load(&path).unwrap();
        assert_eq!(region.len(), ROM_SIZE);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn undersized_rom_is_padded() {
        let path = write_temp("gbcore_test_undersized.rom", &[0x11; 16]);
        let region = load(&path).unwrap();
        assert_eq!(region.len(), ROM_SIZE);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_a_rom_open_error() {
        let result = load("/nonexistent/path/to/rom.gb");
        assert!(matches!(result, Err(EmuError::RomOpen { .. })));
    }
}
