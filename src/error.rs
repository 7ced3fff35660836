use std::path::PathBuf;

/// Fatal-tier failures. Soft-bus conditions (unmapped read/write) are never
/// represented here; those are logged warnings that fall through to the
/// documented default (0xFF on read, no-op on write).
#[derive(Debug, thiserror::Error)]
pub enum EmuError {
    #[error("failed to open rom {path:?}: {source}")]
    RomOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PC: {pc:#06X}, failed to execute instruction {opcode:#04X}")]
    IllegalOpcode { pc: u16, opcode: u8 },
}
