//! File I/O for caching the corner pattern database.
//!
//! Binary format for `corner_db.bin` (little endian):
//! - 4 bytes: magic `CPDB`
//! - u8: max depth the table was built with
//! - u32: entry count
//! - repeat per entry:
//!   - u64: packed corner key
//!   - u8: distance

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{info, warn};

use crate::error::SolverError;
use crate::pattern_db::PatternDatabase;
use crate::state::CornerKey;

/// Default cache location, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "corner_db.bin";

const MAGIC: &[u8; 4] = b"CPDB";

/// Upper bound on entries reserved from the header count.
const MAX_PREALLOCATED_ENTRIES: usize = 1 << 20;

/// Saves the table in the binary format above.
pub fn save(path: &Path, database: &PatternDatabase) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    file.write_all(MAGIC)?;
    file.write_all(&[database.max_depth()])?;
    file.write_all(&(database.len() as u32).to_le_bytes())?;

    for (key, depth) in database.iter() {
        file.write_all(&key.0.to_le_bytes())?;
        file.write_all(&[depth])?;
    }

    file.flush()
}

/// Loads a table from disk.
///
/// Returns `None` if the file is missing, truncated, has the wrong magic, or
/// holds an entry that is not a valid corner configuration or lies past the
/// recorded max depth. The table is not validated against the goal state.
pub fn load(path: &Path) -> Option<PatternDatabase> {
    let mut file = BufReader::new(File::open(path).ok()?);
    let mut magic = [0u8; 4];
    let mut u8_buffer = [0u8; 1];
    let mut u32_buffer = [0u8; 4];
    let mut u64_buffer = [0u8; 8];

    file.read_exact(&mut magic).ok()?;
    if &magic != MAGIC {
        return None;
    }

    file.read_exact(&mut u8_buffer).ok()?;
    let max_depth = u8_buffer[0];

    file.read_exact(&mut u32_buffer).ok()?;
    let entry_count = u32::from_le_bytes(u32_buffer) as usize;

    // the header is untrusted until the entries are actually read
    let mut entries = Vec::with_capacity(entry_count.min(MAX_PREALLOCATED_ENTRIES));
    for _ in 0..entry_count {
        file.read_exact(&mut u64_buffer).ok()?;
        let key = CornerKey(u64::from_le_bytes(u64_buffer));
        key.to_state()?;

        file.read_exact(&mut u8_buffer).ok()?;
        let depth = u8_buffer[0];
        if depth > max_depth {
            return None;
        }

        entries.push((key, depth));
    }

    // trailing bytes mean the count and the body disagree
    if file.read(&mut u8_buffer).ok()? != 0 {
        return None;
    }

    Some(PatternDatabase::from_entries(max_depth, entries))
}

/// Returns the number of saved entries without loading them.
pub fn count(path: &Path) -> Option<usize> {
    let mut file = File::open(path).ok()?;
    let mut header = [0u8; 9];
    file.read_exact(&mut header).ok()?;
    if &header[..4] != MAGIC {
        return None;
    }
    let mut u32_buffer = [0u8; 4];
    u32_buffer.copy_from_slice(&header[5..]);
    Some(u32::from_le_bytes(u32_buffer) as usize)
}

/// Loads the cached table at `path` if it is usable, otherwise builds a new
/// one and tries to cache it.
///
/// A missing, corrupt or mismatched cache is never an error; it only causes a
/// rebuild. Failing to write the cache is logged and ignored.
///
/// # Errors
///
/// `DatabaseIntegrity` if a freshly built table fails validation.
pub fn load_or_build(path: &Path, max_depth: u8) -> Result<PatternDatabase, SolverError> {
    match load(path) {
        Some(database) if database.max_depth() != max_depth => warn!(
            "Cached pattern database at {} has max depth {}, expected {}; regenerating",
            path.display(),
            database.max_depth(),
            max_depth
        ),
        Some(database) => match database.validate() {
            Ok(()) => {
                info!(
                    "Loaded {} corner pattern entries from {}",
                    database.len(),
                    path.display()
                );
                return Ok(database);
            }
            Err(e) => warn!("Cached pattern database is invalid ({e}); regenerating"),
        },
        None if path.exists() => warn!(
            "Cached pattern database at {} is corrupted; regenerating",
            path.display()
        ),
        None => {}
    }

    let database = PatternDatabase::build(max_depth);
    database.validate()?;

    match save(path, &database) {
        Ok(()) => info!("Database cached to {}", path.display()),
        Err(e) => warn!("Could not save database cache to {}: {e}", path.display()),
    }

    Ok(database)
}
