//! One-call helpers for whole values.

use std::io::{Read, Write};

use crate::codec::{Pack, Unpack};
use crate::endian::{Endianness, LittleEndian};
use crate::error::{PacketError, Result};
use crate::io::SizeCounter;
use crate::packer::Packer;
use crate::unpacker::Unpacker;

/// Whole-value helpers over common transports.
///
/// Each call opens one facade session for a single value. For a stream of
/// several values, bind a [`Packer`] / [`Unpacker`] directly.
#[derive(Debug)]
pub struct PacketBuffer;

impl PacketBuffer {
    /// Encodes `value` little-endian into a fresh buffer.
    pub fn to_vec<T: Pack + ?Sized>(value: &T) -> Result<Vec<u8>> {
        Self::to_vec_ordered::<LittleEndian, T>(value)
    }

    /// Encodes `value` into a fresh buffer using byte order `E`.
    pub fn to_vec_ordered<E: Endianness, T: Pack + ?Sized>(value: &T) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Packer::<_, E>::with_order(&mut buffer).pack(value)?;
        Ok(buffer)
    }

    /// Decodes a little-endian `T` that must span all of `bytes`.
    pub fn from_slice<T: Unpack>(bytes: &[u8]) -> Result<T> {
        Self::from_slice_ordered::<LittleEndian, T>(bytes)
    }

    /// Decodes a `T` in byte order `E` that must span all of `bytes`.
    ///
    /// # Errors
    /// [`PacketError::Format`] if bytes remain after the value.
    pub fn from_slice_ordered<E: Endianness, T: Unpack>(bytes: &[u8]) -> Result<T> {
        let mut rest = bytes;
        let value = Unpacker::<_, E>::with_order(&mut rest).unpack()?;
        if !rest.is_empty() {
            return Err(PacketError::Format(format!(
                "{} trailing bytes after decoded value",
                rest.len()
            )));
        }
        Ok(value)
    }

    /// Encodes `value` little-endian into any `std::io::Write`.
    ///
    /// The writer is not flushed.
    pub fn write<W: Write + ?Sized, T: Pack + ?Sized>(writer: &mut W, value: &T) -> Result<()> {
        Packer::new(writer).pack(value)?;
        Ok(())
    }

    /// Decodes one little-endian `T` from any `std::io::Read`, leaving the
    /// reader positioned right after it.
    pub fn read<R: Read + ?Sized, T: Unpack>(reader: &mut R) -> Result<T> {
        Unpacker::new(reader).unpack()
    }

    /// Returns the number of bytes `value` encodes to, without storing them.
    pub fn packed_len<T: Pack + ?Sized>(value: &T) -> Result<u64> {
        let mut counter = SizeCounter::new();
        Packer::new(&mut counter).pack(value)?;
        Ok(counter.written())
    }
}
