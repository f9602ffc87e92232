//! Primitive decoders over a byte source.
//!
//! All multi-byte values in a BIN file are little-endian. The file stores
//! its absolute pointers 1-indexed: a stored position `p` names the byte
//! at file offset `p - 1`. That convention is applied here, once, for the
//! fixed-width readers. String pointers are the exception: they already
//! name the length byte directly, so [`read_str`] uses them as-is and
//! reads the payload at `pointer + 1`.

use crate::source::ByteSource;
use std::io;

fn file_offset(pos: u64) -> io::Result<u64> {
    pos.checked_sub(1)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "zero file position"))
}

/// Read one byte at 1-indexed position `pos`.
pub(crate) fn read_u8(src: &dyn ByteSource, pos: u64) -> io::Result<u8> {
    let mut buf = [0u8; 1];
    src.read_at(&mut buf, file_offset(pos)?)?;
    Ok(buf[0])
}

/// Read a little-endian u32 at 1-indexed position `pos`.
pub(crate) fn read_u32(src: &dyn ByteSource, pos: u64) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    src.read_at(&mut buf, file_offset(pos)?)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian u128 at 1-indexed position `pos`.
pub(crate) fn read_u128(src: &dyn ByteSource, pos: u64) -> io::Result<u128> {
    let mut buf = [0u8; 16];
    src.read_at(&mut buf, file_offset(pos)?)?;
    Ok(u128::from_le_bytes(buf))
}

/// Read a little-endian IEEE-754 f32 at 1-indexed position `pos`.
#[allow(dead_code)]
pub(crate) fn read_f32(src: &dyn ByteSource, pos: u64) -> io::Result<f32> {
    let mut buf = [0u8; 4];
    src.read_at(&mut buf, file_offset(pos)?)?;
    Ok(f32::from_le_bytes(buf))
}

/// Fill `buf` with row bytes starting at 1-indexed position `pos`.
pub(crate) fn read_row(src: &dyn ByteSource, pos: u64, buf: &mut [u8]) -> io::Result<()> {
    src.read_at(buf, file_offset(pos)?)
}

/// Read a length-prefixed string whose length byte sits at `ptr`.
///
/// `ptr` is used without adjustment: one length byte, then that many bytes
/// of payload. Empty strings (length 0) are permitted.
pub(crate) fn read_str(src: &dyn ByteSource, ptr: u64) -> io::Result<String> {
    let mut len = [0u8; 1];
    src.read_at(&mut len, ptr)?;
    let mut buf = vec![0u8; usize::from(len[0])];
    src.read_at(&mut buf, ptr + 1)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Read a little-endian u32 from a prefetched row buffer.
pub(crate) fn read_u32_row(row: &[u8], offset: u32) -> u32 {
    let offset = offset as usize;
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&row[offset..offset + 4]);
    u32::from_le_bytes(buf)
}

/// Read a little-endian IEEE-754 f32 from a prefetched row buffer.
pub(crate) fn read_f32_row(row: &[u8], offset: u32) -> f32 {
    f32::from_bits(read_u32_row(row, offset))
}
