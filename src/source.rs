//! Byte sources backing a database handle.
//!
//! A [`ByteSource`] exposes stateless positional reads over the raw BIN
//! file. There is no shared seek cursor, so a single source can serve any
//! number of concurrent readers. Two implementations are provided:
//!
//! - [`MmapSource`]: memory-maps the file for zero-copy access. Opening
//!   costs one `mmap()` syscall; page faults pull data in on demand and
//!   the OS shares physical pages between processes mapping the same file.
//! - [`MemSource`]: buffers the whole file in an owned `Vec<u8>`. Slightly
//!   faster per query on small files and independent of the filesystem
//!   once loaded.
//!
//! Both sources support an idempotent [`close`](ByteSource::close); reads
//! after close fail with an I/O error.

use memmap2::Mmap;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// Positional-read access to a BIN database image.
///
/// Offsets are 0-indexed byte positions into the file. `read_at` must fill
/// the entire buffer; a short read is an error. Implementations must not
/// keep a shared mutable cursor, so that `&self` reads are safe from
/// multiple threads at once.
pub trait ByteSource: Send + Sync {
    /// Fill `buf` with bytes starting at absolute offset `offset`.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()>;

    /// Release the underlying resources. Idempotent; reads made after
    /// close fail with an I/O error.
    fn close(&self);
}

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "byte source is closed")
}

fn short_read_error(offset: u64, len: usize, size: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!(
            "short read: {} bytes at offset {} exceeds source size {}",
            len, offset, size
        ),
    )
}

fn copy_range(data: &[u8], buf: &mut [u8], offset: u64) -> io::Result<()> {
    let start = usize::try_from(offset)
        .map_err(|_| short_read_error(offset, buf.len(), data.len()))?;
    let end = start
        .checked_add(buf.len())
        .filter(|&end| end <= data.len())
        .ok_or_else(|| short_read_error(offset, buf.len(), data.len()))?;
    buf.copy_from_slice(&data[start..end]);
    Ok(())
}

/// A memory-mapped byte source.
///
/// The mapping is read-only and stays valid for the lifetime of the
/// source; `close` only flips a flag since the pages are reclaimed when
/// the source is dropped.
pub struct MmapSource {
    map: Mmap,
    closed: AtomicBool,
}

impl MmapSource {
    /// Open and memory-map a database file.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path.as_ref())?;
        // SAFETY: the mapping is read-only. Mutating the file underneath a
        // live map is undefined per POSIX, but the same caveat applies to
        // every mmap-backed reader; lookups never write through the map.
        let map = unsafe { Mmap::map(&file)? };
        Ok(MmapSource {
            map,
            closed: AtomicBool::new(false),
        })
    }
}

impl ByteSource for MmapSource {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(closed_error());
        }
        copy_range(&self.map, buf, offset)
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

/// A fully in-memory byte source.
pub struct MemSource {
    data: Vec<u8>,
    closed: AtomicBool,
}

impl MemSource {
    /// Wrap an already-loaded database image.
    pub fn new(data: Vec<u8>) -> Self {
        MemSource {
            data,
            closed: AtomicBool::new(false),
        }
    }

    /// Read an entire database file into memory.
    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(MemSource::new(std::fs::read(path)?))
    }
}

impl ByteSource for MemSource {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(closed_error());
        }
        copy_range(&self.data, buf, offset)
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}
