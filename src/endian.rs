//! Byte-order policy for multi-byte primitives.
//!
//! The policy is a type parameter of the facade, fixed when the
//! [`Packer`](crate::Packer) or [`Unpacker`](crate::Unpacker) type is named.
//! It is never written to the wire: producer and consumer must pick the same
//! marker out of band.

/// A concrete byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

impl ByteOrder {
    /// The byte order of the machine this code was compiled for.
    #[cfg(target_endian = "little")]
    pub const NATIVE: ByteOrder = ByteOrder::Little;
    /// The byte order of the machine this code was compiled for.
    #[cfg(target_endian = "big")]
    pub const NATIVE: ByteOrder = ByteOrder::Big;

    /// Returns true if values must be byte-swapped to go from native order to `self`.
    #[inline]
    pub const fn differs_from_native(self) -> bool {
        !matches!(
            (self, Self::NATIVE),
            (ByteOrder::Little, ByteOrder::Little) | (ByteOrder::Big, ByteOrder::Big)
        )
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::LittleEndian {}
    impl Sealed for super::BigEndian {}
}

/// Marker trait selecting the byte order of a facade at compile time.
pub trait Endianness: sealed::Sealed + 'static {
    /// The order every multi-byte primitive is written and read in.
    const ORDER: ByteOrder;
}

/// Little-endian wire order. This is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LittleEndian;

/// Big-endian (network) wire order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BigEndian;

impl Endianness for LittleEndian {
    const ORDER: ByteOrder = ByteOrder::Little;
}

impl Endianness for BigEndian {
    const ORDER: ByteOrder = ByteOrder::Big;
}

/// The machine's own order. Streams written with it are not portable.
#[cfg(target_endian = "little")]
pub type NativeEndian = LittleEndian;
/// The machine's own order. Streams written with it are not portable.
#[cfg(target_endian = "big")]
pub type NativeEndian = BigEndian;

/// Network order, an alias for [`BigEndian`].
pub type NetworkEndian = BigEndian;
