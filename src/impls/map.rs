use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::codec::{Pack, Unpack, prealloc_hint};
use crate::endian::Endianness;
use crate::error::Result;
use crate::io::{Sink, Source};
use crate::packer::Packer;
use crate::unpacker::Unpacker;

/// Associative maps: u64 entry count, then each key/value pair, key first.
///
/// Entries are written in the map's iteration order, which carries no meaning.
/// Decoding inserts every pair, so a duplicated key keeps its last value.
impl<K: Pack, V: Pack, H> Pack for HashMap<K, V, H> {
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
        packer.pack_len(self.len())?;
        for (key, value) in self {
            key.pack(packer)?;
            value.pack(packer)?;
        }
        Ok(())
    }
}

impl<K, V, H> Unpack for HashMap<K, V, H>
where
    K: Unpack + Eq + Hash,
    V: Unpack,
    H: BuildHasher + Default,
{
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        let mut out = HashMap::with_hasher(H::default());
        fill_hash_map(&mut out, unpacker)?;
        Ok(out)
    }

    fn unpack_in_place<S: Source + ?Sized, E: Endianness>(
        &mut self,
        unpacker: &mut Unpacker<'_, S, E>,
    ) -> Result<()> {
        self.clear();
        fill_hash_map(self, unpacker)
    }
}

fn fill_hash_map<K, V, H, S, E>(map: &mut HashMap<K, V, H>, unpacker: &mut Unpacker<'_, S, E>) -> Result<()>
where
    K: Unpack + Eq + Hash,
    V: Unpack,
    H: BuildHasher,
    S: Source + ?Sized,
    E: Endianness,
{
    let count = unpacker.unpack_len()?;
    map.reserve(prealloc_hint::<(K, V)>(count));
    for _ in 0..count {
        let key = K::unpack(unpacker)?;
        let value = V::unpack(unpacker)?;
        map.insert(key, value);
    }
    Ok(())
}

impl<K: Pack, V: Pack> Pack for BTreeMap<K, V> {
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
        packer.pack_len(self.len())?;
        for (key, value) in self {
            key.pack(packer)?;
            value.pack(packer)?;
        }
        Ok(())
    }
}

impl<K: Unpack + Ord, V: Unpack> Unpack for BTreeMap<K, V> {
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        let count = unpacker.unpack_len()?;
        let mut out = BTreeMap::new();
        for _ in 0..count {
            let key = K::unpack(unpacker)?;
            let value = V::unpack(unpacker)?;
            out.insert(key, value);
        }
        Ok(out)
    }
}
