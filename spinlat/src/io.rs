//! Byte-stream persistence of the representative list.
//!
//! The format is a fixed magic, a format version, the state count, and the
//! raw little-endian states. Whatever `save_states` writes, `load_states`
//! reads back bit-identically.

use std::io::{self, Read, Write};

const MAGIC: [u8; 8] = *b"SPNLATRC";
const VERSION: u32 = 1;

pub(crate) fn save_states(states: &[u64], writer: &mut impl Write) -> io::Result<()> {
    writer.write_all(&MAGIC)?;
    writer.write_all(&VERSION.to_le_bytes())?;
    writer.write_all(&(states.len() as u64).to_le_bytes())?;
    let mut payload = Vec::with_capacity(states.len() * size_of::<u64>());
    for &state in states {
        payload.extend_from_slice(&state.to_le_bytes());
    }
    writer.write_all(&payload)
}

pub(crate) fn load_states(reader: &mut impl Read) -> io::Result<Vec<u64>> {
    let mut magic = [0u8; 8];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "not a representative cache stream",
        ));
    }
    let mut version = [0u8; 4];
    reader.read_exact(&mut version)?;
    if u32::from_le_bytes(version) != VERSION {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "unsupported representative cache version",
        ));
    }
    let mut count = [0u8; 8];
    reader.read_exact(&mut count)?;
    let count = u64::from_le_bytes(count) as usize;

    let mut payload = vec![0u8; count * size_of::<u64>()];
    reader.read_exact(&mut payload)?;
    Ok(payload
        .chunks_exact(size_of::<u64>())
        .map(|chunk| {
            let mut bytes = [0u8; size_of::<u64>()];
            bytes.copy_from_slice(chunk);
            u64::from_le_bytes(bytes)
        })
        .collect())
}
