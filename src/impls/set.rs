use std::collections::{BTreeSet, HashSet};
use std::hash::{BuildHasher, Hash};

use crate::codec::{Pack, Unpack, prealloc_hint};
use crate::endian::Endianness;
use crate::error::Result;
use crate::io::{Sink, Source};
use crate::packer::Packer;
use crate::unpacker::Unpacker;

/// Sets: u64 element count, then the elements. Duplicates on the wire collapse.
impl<T: Pack, H> Pack for HashSet<T, H> {
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
        packer.pack_len(self.len())?;
        for item in self {
            item.pack(packer)?;
        }
        Ok(())
    }
}

impl<T, H> Unpack for HashSet<T, H>
where
    T: Unpack + Eq + Hash,
    H: BuildHasher + Default,
{
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        let count = unpacker.unpack_len()?;
        let mut out = HashSet::with_capacity_and_hasher(prealloc_hint::<T>(count), H::default());
        for _ in 0..count {
            out.insert(T::unpack(unpacker)?);
        }
        Ok(out)
    }
}

impl<T: Pack> Pack for BTreeSet<T> {
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
        packer.pack_len(self.len())?;
        for item in self {
            item.pack(packer)?;
        }
        Ok(())
    }
}

impl<T: Unpack + Ord> Unpack for BTreeSet<T> {
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        let count = unpacker.unpack_len()?;
        let mut out = BTreeSet::new();
        for _ in 0..count {
            out.insert(T::unpack(unpacker)?);
        }
        Ok(out)
    }
}
