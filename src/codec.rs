//! The type-dispatch registry.
//!
//! Every value position resolves to exactly one codec, statically, through
//! trait resolution. Nothing on the wire identifies a type; encoder and
//! decoder agree on the type of every position out of band.
//!
//! ## Resolution order
//!
//! 1. **Override.** A [`Codec<T>`] selected at the value position with
//!    [`Packer::pack_with`] / [`Unpacker::unpack_with`], or with the
//!    `#[packetbuf(with = "...")]` field attribute of `#[derive(Packable)]`.
//!    It wins even when `T` has its own [`Pack`]/[`Unpack`] impls, which is how
//!    a consumer replaces a built-in encoding without touching the type.
//! 2. **Structural.** Built-in [`Pack`]/[`Unpack`] impls for primitives,
//!    arrays, strings, sequences, maps, sets, options, tuples and time values.
//! 3. **Self-describing.** A caller's own type implements [`Pack`]/[`Unpack`]
//!    by forwarding its fields, by hand or with `#[derive(Packable)]`.
//! 4. **Compile error.** A type with none of the above does not build; the
//!    diagnostic names the type and the missing trait.
//!
//! ## Example
//!
//! ```rust
//! use packetbuf::{Pack, Packer, Unpack, Unpacker, Result};
//! use packetbuf::endian::Endianness;
//! use packetbuf::io::{Sink, Source};
//!
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Pack for Point {
//!     fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
//!         packer.pack(&self.x)?.pack(&self.y)?;
//!         Ok(())
//!     }
//! }
//!
//! impl Unpack for Point {
//!     fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
//!         Ok(Point { x: unpacker.unpack()?, y: unpacker.unpack()? })
//!     }
//! }
//!
//! let bytes = packetbuf::PacketBuffer::to_vec(&Point { x: 1, y: -1 })?;
//! assert_eq!(bytes, [1, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
//! # Ok::<(), packetbuf::PacketError>(())
//! ```

use crate::constants::PREALLOC_BYTES;
use crate::endian::Endianness;
use crate::error::Result;
use crate::io::{Sink, Source};
use crate::packer::Packer;
use crate::unpacker::Unpacker;

/// Types that know how to encode themselves.
///
/// A type with no `Pack` impl cannot be packed; the error names the type:
///
/// ```compile_fail
/// struct Opaque;
///
/// let _ = packetbuf::PacketBuffer::to_vec(&Opaque);
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be packed: no `Pack` implementation",
    label = "`{Self}` does not implement `packetbuf::Pack`",
    note = "derive it with `#[derive(packetbuf::Packable)]`, implement `Pack::pack` by hand, or pick an override with `Packer::pack_with::<YourCodec, _>`"
)]
pub trait Pack {
    /// Encodes `self` into the packer, writing its parts in a fixed order.
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()>;

    /// Encodes a contiguous run of values.
    ///
    /// The wire bytes must equal packing each item in order. Single-byte types
    /// override this to move the run as one raw span.
    #[doc(hidden)]
    fn pack_slice<S: Sink + ?Sized, E: Endianness>(
        items: &[Self],
        packer: &mut Packer<'_, S, E>,
    ) -> Result<()>
    where
        Self: Sized,
    {
        for item in items {
            item.pack(packer)?;
        }
        Ok(())
    }
}

/// Types that know how to decode themselves.
///
/// ```compile_fail
/// struct Opaque;
///
/// let _ = packetbuf::PacketBuffer::from_slice::<Opaque>(&[]);
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be unpacked: no `Unpack` implementation",
    label = "`{Self}` does not implement `packetbuf::Unpack`",
    note = "derive it with `#[derive(packetbuf::Packable)]`, implement `Unpack::unpack` by hand, or pick an override with `Unpacker::unpack_with::<YourCodec, _>`"
)]
pub trait Unpack: Sized {
    /// Decodes a fresh value, reading its parts in the order `Pack` wrote them.
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self>;

    /// Decodes into an existing value.
    ///
    /// The default replaces `self`. Containers override it to reuse their
    /// allocation; the result is the same value `unpack` would produce.
    fn unpack_in_place<S: Source + ?Sized, E: Endianness>(
        &mut self,
        unpacker: &mut Unpacker<'_, S, E>,
    ) -> Result<()> {
        *self = Self::unpack(unpacker)?;
        Ok(())
    }

    /// Decodes into every slot of a fixed-size destination, in index order.
    #[doc(hidden)]
    fn unpack_slice_in_place<S: Source + ?Sized, E: Endianness>(
        items: &mut [Self],
        unpacker: &mut Unpacker<'_, S, E>,
    ) -> Result<()> {
        for item in items {
            item.unpack_in_place(unpacker)?;
        }
        Ok(())
    }

    /// Decodes `count` values and appends them to `out`.
    ///
    /// `count` comes off the wire, so at most [`PREALLOC_BYTES`] worth of
    /// elements is reserved up front; the rest grows as values arrive.
    #[doc(hidden)]
    fn unpack_extend<S: Source + ?Sized, E: Endianness>(
        count: usize,
        out: &mut Vec<Self>,
        unpacker: &mut Unpacker<'_, S, E>,
    ) -> Result<()> {
        out.reserve(prealloc_hint::<Self>(count));
        for _ in 0..count {
            out.push(Self::unpack(unpacker)?);
        }
        Ok(())
    }
}

/// An external codec for values of type `T`.
///
/// Implement it on a marker type to encode `T` differently from `T`'s own
/// [`Pack`]/[`Unpack`] impls, or to encode a foreign type that has none.
///
/// ```rust
/// use packetbuf::{Codec, Packer, Unpacker, Result};
/// use packetbuf::endian::Endianness;
/// use packetbuf::io::{Sink, Source};
///
/// /// Stores a `u64` in 4 bytes.
/// struct Compact;
///
/// impl Codec<u64> for Compact {
///     fn pack<S: Sink + ?Sized, E: Endianness>(value: &u64, packer: &mut Packer<'_, S, E>) -> Result<()> {
///         let narrow = u32::try_from(*value)
///             .map_err(|_| packetbuf::PacketError::Format(format!("{value} does not fit in 4 bytes")))?;
///         packer.pack_u32(narrow)?;
///         Ok(())
///     }
///
///     fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<u64> {
///         Ok(u64::from(unpacker.unpack_u32()?))
///     }
/// }
///
/// let mut bytes = Vec::new();
/// Packer::new(&mut bytes).pack_with::<Compact, _>(&7u64)?;
/// assert_eq!(bytes, [7, 0, 0, 0]);
/// # Ok::<(), packetbuf::PacketError>(())
/// ```
pub trait Codec<T: ?Sized> {
    /// Encodes `value`.
    fn pack<S: Sink + ?Sized, E: Endianness>(value: &T, packer: &mut Packer<'_, S, E>) -> Result<()>;

    /// Decodes a fresh value.
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<T>
    where
        T: Sized;

    /// Decodes into an existing value. The default replaces it.
    fn unpack_in_place<S: Source + ?Sized, E: Endianness>(
        value: &mut T,
        unpacker: &mut Unpacker<'_, S, E>,
    ) -> Result<()>
    where
        T: Sized,
    {
        *value = Self::unpack(unpacker)?;
        Ok(())
    }
}

/// The identity override: encodes `T` exactly as its own `Pack`/`Unpack` do.
///
/// Handy as the default argument of generic code that takes a codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Native;

impl<T: Pack + Unpack> Codec<T> for Native {
    fn pack<S: Sink + ?Sized, E: Endianness>(value: &T, packer: &mut Packer<'_, S, E>) -> Result<()> {
        value.pack(packer)
    }

    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<T> {
        T::unpack(unpacker)
    }

    fn unpack_in_place<S: Source + ?Sized, E: Endianness>(
        value: &mut T,
        unpacker: &mut Unpacker<'_, S, E>,
    ) -> Result<()> {
        value.unpack_in_place(unpacker)
    }
}

/// Applies codec `C` to every element of a `Vec`, keeping the sequence layout
/// (u64 count, then elements).
#[derive(Debug, Clone, Copy, Default)]
pub struct Each<C>(std::marker::PhantomData<C>);

impl<T, C: Codec<T>> Codec<Vec<T>> for Each<C> {
    fn pack<S: Sink + ?Sized, E: Endianness>(value: &Vec<T>, packer: &mut Packer<'_, S, E>) -> Result<()> {
        packer.pack_len(value.len())?;
        for item in value {
            C::pack(item, packer)?;
        }
        Ok(())
    }

    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Vec<T>> {
        let count = unpacker.unpack_len()?;
        let mut out = Vec::with_capacity(prealloc_hint::<T>(count));
        for _ in 0..count {
            out.push(C::unpack(unpacker)?);
        }
        Ok(out)
    }
}

/// Applies codec `C` to the inner value of an `Option`, keeping the optional
/// layout (presence flag, then the value if present).
#[derive(Debug, Clone, Copy, Default)]
pub struct Maybe<C>(std::marker::PhantomData<C>);

impl<T, C: Codec<T>> Codec<Option<T>> for Maybe<C> {
    fn pack<S: Sink + ?Sized, E: Endianness>(value: &Option<T>, packer: &mut Packer<'_, S, E>) -> Result<()> {
        packer.pack_bool(value.is_some())?;
        if let Some(inner) = value {
            C::pack(inner, packer)?;
        }
        Ok(())
    }

    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Option<T>> {
        if unpacker.unpack_bool()? {
            Ok(Some(C::unpack(unpacker)?))
        } else {
            Ok(None)
        }
    }
}

/// Number of `T` slots worth reserving for a wire-supplied `count`.
#[inline]
pub(crate) fn prealloc_hint<T>(count: usize) -> usize {
    count.min(PREALLOC_BYTES / std::mem::size_of::<T>().max(1))
}
