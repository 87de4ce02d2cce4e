use std::collections::{LinkedList, VecDeque};

use crate::codec::{Pack, Unpack, prealloc_hint};
use crate::endian::Endianness;
use crate::error::Result;
use crate::io::{Sink, Source};
use crate::packer::Packer;
use crate::unpacker::Unpacker;

/// Ordered sequences: u64 element count, then the elements in iteration order.
impl<T: Pack> Pack for [T] {
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
        packer.pack_len(self.len())?;
        T::pack_slice(self, packer)
    }
}

impl<T: Pack> Pack for Vec<T> {
    #[inline]
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
        self.as_slice().pack(packer)
    }
}

impl<T: Unpack> Unpack for Vec<T> {
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        let count = unpacker.unpack_len()?;
        let mut out = Vec::new();
        T::unpack_extend(count, &mut out, unpacker)?;
        Ok(out)
    }

    fn unpack_in_place<S: Source + ?Sized, E: Endianness>(
        &mut self,
        unpacker: &mut Unpacker<'_, S, E>,
    ) -> Result<()> {
        let count = unpacker.unpack_len()?;
        self.clear();
        T::unpack_extend(count, self, unpacker)
    }
}

impl<T: Unpack> Unpack for Box<[T]> {
    #[inline]
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        Vec::<T>::unpack(unpacker).map(Vec::into_boxed_slice)
    }
}

impl<T: Pack> Pack for VecDeque<T> {
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
        packer.pack_len(self.len())?;
        let (front, back) = self.as_slices();
        T::pack_slice(front, packer)?;
        T::pack_slice(back, packer)
    }
}

impl<T: Unpack> Unpack for VecDeque<T> {
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        let count = unpacker.unpack_len()?;
        let mut out = VecDeque::with_capacity(prealloc_hint::<T>(count));
        for _ in 0..count {
            out.push_back(T::unpack(unpacker)?);
        }
        Ok(out)
    }
}

impl<T: Pack> Pack for LinkedList<T> {
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
        packer.pack_len(self.len())?;
        for item in self {
            item.pack(packer)?;
        }
        Ok(())
    }
}

impl<T: Unpack> Unpack for LinkedList<T> {
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        let count = unpacker.unpack_len()?;
        let mut out = LinkedList::new();
        for _ in 0..count {
            out.push_back(T::unpack(unpacker)?);
        }
        Ok(out)
    }
}
