use std::marker::PhantomData;

use crate::codec::{Pack, Unpack, prealloc_hint};
use crate::endian::Endianness;
use crate::error::{PacketError, Result};
use crate::io::{Sink, Source};
use crate::packer::Packer;
use crate::unpacker::Unpacker;

/// Implements `Pack`/`Unpack` for fixed-width scalars by forwarding to the
/// facade's primitive calls.
macro_rules! impl_primitive_codec {
    ($($t:ty => $pack:ident, $unpack:ident);* $(;)?) => {
        $(
            impl Pack for $t {
                #[inline]
                fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
                    packer.$pack(*self)?;
                    Ok(())
                }
            }

            impl Unpack for $t {
                #[inline]
                fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
                    unpacker.$unpack()
                }
            }
        )*
    };
}

impl_primitive_codec!(
    i8 => pack_i8, unpack_i8;
    u16 => pack_u16, unpack_u16;
    i16 => pack_i16, unpack_i16;
    u32 => pack_u32, unpack_u32;
    i32 => pack_i32, unpack_i32;
    u64 => pack_u64, unpack_u64;
    i64 => pack_i64, unpack_i64;
    u128 => pack_u128, unpack_u128;
    i128 => pack_i128, unpack_i128;
    f32 => pack_f32, unpack_f32;
    f64 => pack_f64, unpack_f64;
    bool => pack_bool, unpack_bool;
);

// Bytes move as whole spans wherever they appear in a run.

impl Pack for u8 {
    #[inline]
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
        packer.pack_u8(*self)?;
        Ok(())
    }

    fn pack_slice<S: Sink + ?Sized, E: Endianness>(
        items: &[Self],
        packer: &mut Packer<'_, S, E>,
    ) -> Result<()> {
        packer.write_raw(items)?;
        Ok(())
    }
}

impl Unpack for u8 {
    #[inline]
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        unpacker.unpack_u8()
    }

    fn unpack_slice_in_place<S: Source + ?Sized, E: Endianness>(
        items: &mut [Self],
        unpacker: &mut Unpacker<'_, S, E>,
    ) -> Result<()> {
        unpacker.read_raw(items)?;
        Ok(())
    }

    fn unpack_extend<S: Source + ?Sized, E: Endianness>(
        count: usize,
        out: &mut Vec<Self>,
        unpacker: &mut Unpacker<'_, S, E>,
    ) -> Result<()> {
        // Grow in bounded steps so a bogus count cannot allocate ahead of the data.
        let mut remaining = count;
        while remaining > 0 {
            let step = prealloc_hint::<u8>(remaining);
            let start = out.len();
            out.resize(start + step, 0);
            unpacker.read_raw(&mut out[start..])?;
            remaining -= step;
        }
        Ok(())
    }
}

impl Pack for char {
    #[inline]
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
        packer.pack_u32(u32::from(*self))?;
        Ok(())
    }
}

impl Unpack for char {
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        let scalar = unpacker.unpack_u32()?;
        char::from_u32(scalar)
            .ok_or_else(|| PacketError::Format(format!("{scalar:#x} is not a Unicode scalar value")))
    }
}

impl Pack for () {
    #[inline]
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, _packer: &mut Packer<'_, S, E>) -> Result<()> {
        Ok(())
    }
}

impl Unpack for () {
    #[inline]
    fn unpack<S: Source + ?Sized, E: Endianness>(_unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        Ok(())
    }
}

impl<T: ?Sized> Pack for PhantomData<T> {
    #[inline]
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, _packer: &mut Packer<'_, S, E>) -> Result<()> {
        Ok(())
    }
}

impl<T: ?Sized> Unpack for PhantomData<T> {
    #[inline]
    fn unpack<S: Source + ?Sized, E: Endianness>(_unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        Ok(PhantomData)
    }
}
