//! The decoding facade, the mirror of [`Packer`](crate::Packer).

use std::fmt;
use std::marker::PhantomData;

use crate::codec::{Codec, Unpack};
use crate::endian::{Endianness, LittleEndian};
use crate::error::{PacketError, Result};
use crate::io::Source;

/// Reconstructs typed values from a byte stream written by a [`Packer`](crate::Packer)
/// with the same byte order.
///
/// Counts and lengths read from the stream are trusted: they are never checked
/// against the bytes left in the source. A count that promises more data than
/// exists fails when the source runs dry, with [`PacketError::Io`] of kind
/// `UnexpectedEof`.
///
/// ```rust
/// use packetbuf::Unpacker;
///
/// let mut bytes: &[u8] = &[1, 0, 2, 0, 0, 0, 0, 0, 0, 0, b'h', b'i'];
/// let mut unpacker = Unpacker::new(&mut bytes);
/// let number: u16 = unpacker.unpack()?;
/// let text: String = unpacker.unpack()?;
/// assert_eq!((number, text.as_str()), (1, "hi"));
/// # Ok::<(), packetbuf::PacketError>(())
/// ```
pub struct Unpacker<'a, S: Source + ?Sized, E: Endianness = LittleEndian> {
    source: &'a mut S,
    _order: PhantomData<E>,
}

impl<'a, S: Source + ?Sized> Unpacker<'a, S> {
    /// Binds a little-endian unpacker to `source`.
    pub fn new(source: &'a mut S) -> Self {
        Self::with_order(source)
    }
}

impl<'a, S: Source + ?Sized, E: Endianness> Unpacker<'a, S, E> {
    /// Binds an unpacker using the byte order `E`, e.g.
    /// `Unpacker::<_, BigEndian>::with_order(..)`.
    pub fn with_order(source: &'a mut S) -> Self {
        tracing::trace!(order = ?E::ORDER, "unpacker bound to source");
        Self {
            source,
            _order: PhantomData,
        }
    }

    /// Decodes the next value as a `T`.
    #[inline]
    pub fn unpack<T: Unpack>(&mut self) -> Result<T> {
        T::unpack(self)
    }

    /// Decodes the next value into `place`, reusing its storage where possible.
    #[inline]
    pub fn unpack_into<T: Unpack>(&mut self, place: &mut T) -> Result<&mut Self> {
        place.unpack_in_place(self)?;
        Ok(self)
    }

    /// Decodes the next value through the override codec `C`.
    #[inline]
    pub fn unpack_with<C: Codec<T>, T>(&mut self) -> Result<T> {
        C::unpack(self)
    }

    /// Decodes the next value into `place` through the override codec `C`.
    #[inline]
    pub fn unpack_into_with<C: Codec<T>, T>(&mut self, place: &mut T) -> Result<&mut Self> {
        C::unpack_in_place(place, self)?;
        Ok(self)
    }

    /// Fills `buf` from the source verbatim.
    ///
    /// This is the only place encoded data enters the unpacker. A source
    /// failure is returned unchanged as [`PacketError::Io`].
    pub fn read_raw(&mut self, buf: &mut [u8]) -> Result<&mut Self> {
        if let Err(e) = self.source.read_bytes(buf) {
            tracing::debug!(len = buf.len(), error = %e, "source could not satisfy read");
            return Err(PacketError::from(e));
        }
        Ok(self)
    }

    /// Reads a u64 length or element count written by [`Packer::pack_len`](crate::Packer::pack_len).
    pub fn unpack_len(&mut self) -> Result<usize> {
        let len = self.unpack_u64()?;
        tracing::trace!(len, "read length prefix");
        usize::try_from(len).map_err(|_| {
            tracing::debug!(len, "length prefix exceeds the address space");
            PacketError::Format(format!("length {len} does not fit in usize"))
        })
    }

    #[inline]
    fn read_ordered<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        self.read_raw(&mut bytes)?;
        if E::ORDER.differs_from_native() {
            bytes.reverse();
        }
        Ok(bytes)
    }

    /// Reads a boolean byte; zero is `false`, anything else is `true`.
    #[inline]
    pub fn unpack_bool(&mut self) -> Result<bool> {
        let [byte] = self.read_ordered::<1>()?;
        Ok(byte != 0)
    }

    /// Reads an `f32` from its IEEE-754 bit pattern.
    #[inline]
    pub fn unpack_f32(&mut self) -> Result<f32> {
        self.unpack_u32().map(f32::from_bits)
    }

    /// Reads an `f64` from its IEEE-754 bit pattern.
    #[inline]
    pub fn unpack_f64(&mut self) -> Result<f64> {
        self.unpack_u64().map(f64::from_bits)
    }
}

macro_rules! impl_unpack_int {
    ($($name:ident: $t:ty),* $(,)?) => {
        impl<'a, S: Source + ?Sized, E: Endianness> Unpacker<'a, S, E> {
            $(
                #[doc = concat!("Reads a `", stringify!($t), "` in the unpacker's byte order.")]
                #[inline]
                pub fn $name(&mut self) -> Result<$t> {
                    self.read_ordered().map(<$t>::from_ne_bytes)
                }
            )*
        }
    };
}

impl_unpack_int!(
    unpack_u8: u8,
    unpack_i8: i8,
    unpack_u16: u16,
    unpack_i16: i16,
    unpack_u32: u32,
    unpack_i32: i32,
    unpack_u64: u64,
    unpack_i64: i64,
    unpack_u128: u128,
    unpack_i128: i128,
);

impl<S: Source + ?Sized, E: Endianness> fmt::Debug for Unpacker<'_, S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unpacker")
            .field("order", &E::ORDER)
            .finish_non_exhaustive()
    }
}
