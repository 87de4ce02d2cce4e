//! The encoding facade.
//!
//! A [`Packer`] is permanently bound to one [`Sink`] and one byte order. It
//! encodes values strictly in call order; that order is the whole wire schema.

use std::fmt;
use std::marker::PhantomData;

use crate::codec::{Codec, Pack};
use crate::endian::{Endianness, LittleEndian};
use crate::error::{PacketError, Result};
use crate::io::Sink;

/// Converts typed values into a platform-independent byte stream.
///
/// By default multi-byte integers are written little-endian; name the type as
/// `Packer<'_, S, BigEndian>` to change that.
///
/// The packer owns nothing but the borrow of its sink: it buffers nothing and
/// has no flush or close step. It is neither `Clone` nor `Copy`.
///
/// ```rust
/// use packetbuf::Packer;
///
/// let mut bytes = Vec::new();
/// let mut packer = Packer::new(&mut bytes);
/// packer.pack(&1u16)?.pack("hi")?;
/// assert_eq!(bytes, [1, 0, 2, 0, 0, 0, 0, 0, 0, 0, b'h', b'i']);
/// # Ok::<(), packetbuf::PacketError>(())
/// ```
pub struct Packer<'a, S: Sink + ?Sized, E: Endianness = LittleEndian> {
    sink: &'a mut S,
    _order: PhantomData<E>,
}

impl<'a, S: Sink + ?Sized> Packer<'a, S> {
    /// Binds a little-endian packer to `sink`.
    pub fn new(sink: &'a mut S) -> Self {
        Self::with_order(sink)
    }
}

impl<'a, S: Sink + ?Sized, E: Endianness> Packer<'a, S, E> {
    /// Binds a packer using the byte order `E`, e.g.
    /// `Packer::<_, BigEndian>::with_order(..)`.
    pub fn with_order(sink: &'a mut S) -> Self {
        tracing::trace!(order = ?E::ORDER, "packer bound to sink");
        Self {
            sink,
            _order: PhantomData,
        }
    }

    /// Packs one value through its own [`Pack`] impl.
    #[inline]
    pub fn pack<T: Pack + ?Sized>(&mut self, value: &T) -> Result<&mut Self> {
        value.pack(self)?;
        Ok(self)
    }

    /// Packs one value through the override codec `C`, ignoring `T`'s own impl.
    #[inline]
    pub fn pack_with<C: Codec<T>, T: ?Sized>(&mut self, value: &T) -> Result<&mut Self> {
        C::pack(value, self)?;
        Ok(self)
    }

    /// Writes `bytes` to the sink verbatim.
    ///
    /// This is the only place encoded data leaves the packer. A sink failure
    /// is returned unchanged as [`PacketError::Io`].
    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        if let Err(e) = self.sink.write_bytes(bytes) {
            tracing::debug!(len = bytes.len(), error = %e, "sink rejected write");
            return Err(PacketError::from(e));
        }
        Ok(self)
    }

    /// Writes a variable-size length or element count as a u64.
    pub fn pack_len(&mut self, len: usize) -> Result<&mut Self> {
        let len = u64::try_from(len)
            .map_err(|_| PacketError::Format(format!("length {len} does not fit in u64")))?;
        self.pack_u64(len)
    }

    #[inline]
    fn write_ordered<const N: usize>(&mut self, mut bytes: [u8; N]) -> Result<&mut Self> {
        if E::ORDER.differs_from_native() {
            bytes.reverse();
        }
        self.write_raw(&bytes)
    }

    /// Packs a boolean as a single `0x01` or `0x00` byte.
    #[inline]
    pub fn pack_bool(&mut self, value: bool) -> Result<&mut Self> {
        self.write_raw(&[u8::from(value)])
    }

    /// Packs an `f32` as its IEEE-754 bit pattern.
    #[inline]
    pub fn pack_f32(&mut self, value: f32) -> Result<&mut Self> {
        self.pack_u32(value.to_bits())
    }

    /// Packs an `f64` as its IEEE-754 bit pattern.
    #[inline]
    pub fn pack_f64(&mut self, value: f64) -> Result<&mut Self> {
        self.pack_u64(value.to_bits())
    }
}

macro_rules! impl_pack_int {
    ($($name:ident: $t:ty),* $(,)?) => {
        impl<'a, S: Sink + ?Sized, E: Endianness> Packer<'a, S, E> {
            $(
                #[doc = concat!("Packs a `", stringify!($t), "` in the packer's byte order.")]
                #[inline]
                pub fn $name(&mut self, value: $t) -> Result<&mut Self> {
                    self.write_ordered(value.to_ne_bytes())
                }
            )*
        }
    };
}

impl_pack_int!(
    pack_u8: u8,
    pack_i8: i8,
    pack_u16: u16,
    pack_i16: i16,
    pack_u32: u32,
    pack_i32: i32,
    pack_u64: u64,
    pack_i64: i64,
    pack_u128: u128,
    pack_i128: i128,
);

impl<S: Sink + ?Sized, E: Endianness> fmt::Debug for Packer<'_, S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packer")
            .field("order", &E::ORDER)
            .finish_non_exhaustive()
    }
}
