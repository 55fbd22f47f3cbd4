use std::path::Path;

use crate::emulator::{Error, Result, MAX_ROM_SIZE};

/// Read a ROM image from disk. The size is checked here as well so an
/// oversized file is reported before an emulator is even created.
pub fn read_rom<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let program = std::fs::read(path).map_err(|source| Error::RomUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    if program.len() > MAX_ROM_SIZE {
        return Err(Error::RomTooLarge {
            size: program.len(),
            max: MAX_ROM_SIZE,
        });
    }

    log::info!("Read {} bytes from {:?}", program.len(), path);
    Ok(program)
}
