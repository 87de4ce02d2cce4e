use crate::codec::{Pack, Unpack};
use crate::endian::Endianness;
use crate::error::{PacketError, Result};
use crate::io::{Sink, Source};
use crate::packer::Packer;
use crate::unpacker::Unpacker;

/// `[T; N]`: N elements in index order, no count. `[u8; N]` is one raw span.
impl<T: Pack, const N: usize> Pack for [T; N] {
    #[inline]
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
        T::pack_slice(self, packer)
    }
}

impl<T: Unpack, const N: usize> Unpack for [T; N] {
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        let mut items = Vec::with_capacity(N);
        T::unpack_extend(N, &mut items, unpacker)?;
        items.try_into().map_err(|items: Vec<T>| {
            PacketError::Internal(format!("expected {N} array elements, decoded {}", items.len()))
        })
    }

    #[inline]
    fn unpack_in_place<S: Source + ?Sized, E: Endianness>(
        &mut self,
        unpacker: &mut Unpacker<'_, S, E>,
    ) -> Result<()> {
        T::unpack_slice_in_place(self, unpacker)
    }
}
