use crate::codec::{Pack, Unpack};
use crate::endian::Endianness;
use crate::error::Result;
use crate::io::{Sink, Source};
use crate::packer::Packer;
use crate::unpacker::Unpacker;

/// `Option<T>`: a presence flag, followed by the value only when present.
impl<T: Pack> Pack for Option<T> {
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
        match self {
            Some(value) => {
                packer.pack_bool(true)?;
                value.pack(packer)
            }
            None => {
                packer.pack_bool(false)?;
                Ok(())
            }
        }
    }
}

impl<T: Unpack> Unpack for Option<T> {
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        if unpacker.unpack_bool()? {
            T::unpack(unpacker).map(Some)
        } else {
            Ok(None)
        }
    }

    fn unpack_in_place<S: Source + ?Sized, E: Endianness>(
        &mut self,
        unpacker: &mut Unpacker<'_, S, E>,
    ) -> Result<()> {
        if !unpacker.unpack_bool()? {
            *self = None;
            return Ok(());
        }
        match self {
            Some(value) => value.unpack_in_place(unpacker),
            None => {
                *self = Some(T::unpack(unpacker)?);
                Ok(())
            }
        }
    }
}
