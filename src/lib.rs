//! # PacketBuffer
//!
//! A compact, schema-less binary serialization engine with static dispatch.
//!
//! ## Overview
//!
//! PacketBuffer turns typed values into a platform-independent byte stream and
//! back. There is no schema, no type tag and no framing on the wire: the
//! encoder and decoder agree, out of band, on the order and types of the
//! values in a session. In return the encoding is as small as the data itself
//! and every codec is chosen at compile time.
//!
//! ### Key Features
//!
//! *   **Static Dispatch:** Every value position resolves to one codec through
//!     trait resolution. A type without a codec is a compile error naming it.
//! *   **Deterministic Byte Order:** Multi-byte values are little-endian by
//!     default. The order is a type parameter of the facade, so a big-endian
//!     session is a different type and the two are never mixed by accident.
//! *   **Composites:** Arrays, strings, sequences, maps, sets, options, tuples
//!     and time values are built in. Your own types join through
//!     `#[derive(Packable)]` or a hand-written [`Pack`]/[`Unpack`] impl.
//! *   **Overrides:** A [`Codec<T>`] selected at a value position replaces
//!     `T`'s own encoding without touching `T`.
//! *   **Any Transport:** Anything implementing `std::io::Write` /
//!     `std::io::Read` is a valid sink / source.
//!
//! ## Wire Format
//!
//! ```text
//! u8 / i8 / bool ........ 1 byte (bool: 0x00 or 0x01)
//! u16 .. i128, f32, f64 . fixed width, in the session's byte order
//! [T; N] ................ N elements, no prefix
//! String / Vec / Map .... [u64 count] [elements...]
//! Option<T> ............. [bool present] [T if present]
//! (A, B, ..) ............ elements in order, no prefix
//! ```
//!
//! ## Usage Patterns
//!
//! ### One value at a time
//!
//! ```rust
//! use packetbuf::{Packer, Unpacker, pack, unpack};
//!
//! let mut bytes = Vec::new();
//! let mut packer = Packer::new(&mut bytes);
//! pack!(packer, 7u32, "name", Some(1.5f64))?;
//!
//! let (mut id, mut name, mut weight) = (0u32, String::new(), None::<f64>);
//! let mut source = bytes.as_slice();
//! let mut unpacker = Unpacker::new(&mut source);
//! unpack!(unpacker, id, name, weight)?;
//! assert_eq!((id, name.as_str(), weight), (7, "name", Some(1.5)));
//! # Ok::<(), packetbuf::PacketError>(())
//! ```
//!
//! ### Deriving
//!
//! ```rust
//! use packetbuf::{PacketBuffer, Packable};
//!
//! #[derive(Packable, Debug, PartialEq)]
//! struct Header {
//!     version: u16,
//!     flags: [u8; 2],
//!     tags: Vec<String>,
//! }
//!
//! let header = Header { version: 3, flags: [1, 0], tags: vec!["a".into()] };
//! let bytes = PacketBuffer::to_vec(&header)?;
//! assert_eq!(PacketBuffer::from_slice::<Header>(&bytes)?, header);
//! # Ok::<(), packetbuf::PacketError>(())
//! ```
//!
//! ### Safety and Error Handling
//!
//! * **No Unsafe:** the crate forbids `unsafe` code.
//! * **No Panics:** No `unwrap()` or `panic!()` calls in the library (enforced by clippy lints).
//! * **Comprehensive Errors:** All failures correspond to a [`PacketError`] type.
//! * **Untrusted Counts:** Lengths read off the wire are never used to reserve
//!   more than [`constants::PREALLOC_BYTES`] up front.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

// Lets the derive macro's `::packetbuf::` paths resolve inside this crate's own tests.
extern crate self as packetbuf;

// --- PUBLIC API MODULES ---
pub mod api;
pub mod codec;
pub mod endian;
pub mod error;
pub mod io;
pub mod time;

// --- FACADES ---
mod packer;
mod unpacker;

// Built-in codecs for std types.
mod impls;

// --- RE-EXPORTS ---

pub use api::PacketBuffer;
pub use codec::{Codec, Pack, Unpack};
pub use endian::{BigEndian, LittleEndian, NativeEndian, NetworkEndian};
pub use error::{PacketError, Result};
pub use packer::Packer;
pub use unpacker::Unpacker;

// Re-export the derive macro so it is accessible as `packetbuf::Packable`
/// Derives [`Pack`] and [`Unpack`].
///
/// Enums need an explicit integer repr:
///
/// ```compile_fail
/// #[derive(packetbuf::Packable)]
/// enum NoRepr {
///     A,
///     B,
/// }
/// ```
///
/// Variants cannot carry data:
///
/// ```compile_fail
/// #[derive(packetbuf::Packable)]
/// #[repr(u8)]
/// enum Shape {
///     Dot,
///     Circle(u32),
/// }
/// ```
///
/// A field is either skipped or encoded through an override, not both:
///
/// ```compile_fail
/// #[derive(packetbuf::Packable)]
/// struct Config {
///     #[packetbuf(skip, with = "packetbuf::time::Seconds")]
///     timeout: std::time::Duration,
/// }
/// ```
///
/// Unions are rejected:
///
/// ```compile_fail
/// #[derive(packetbuf::Packable)]
/// union Bits {
///     word: u32,
///     bytes: [u8; 4],
/// }
/// ```
pub use packetbuf_derive::Packable;

/// Constants used throughout the library.
pub mod constants {
    /// Upper bound, in bytes, on the storage reserved up front when a
    /// collection is decoded from a count read off the wire.
    pub const PREALLOC_BYTES: usize = 64 * 1024;
}

/// Packs several values in order; the bytes equal packing each one in turn.
///
/// Evaluates to `packetbuf::Result<()>` and stops at the first failure.
///
/// ```rust
/// use packetbuf::{Packer, pack};
///
/// let mut bytes = Vec::new();
/// let mut packer = Packer::new(&mut bytes);
/// pack!(packer, 1u8, 2u16)?;
/// assert_eq!(bytes, [1, 2, 0]);
/// # Ok::<(), packetbuf::PacketError>(())
/// ```
#[macro_export]
macro_rules! pack {
    ($packer:expr $(, $value:expr)+ $(,)?) => {{
        let packer = &mut $packer;
        let result: $crate::Result<()> = Ok(());
        $(
            let result = result.and_then(|()| packer.pack(&$value).map(|_| ()));
        )+
        result
    }};
}

/// Unpacks into several places in order, the mirror of [`pack!`].
///
/// Each argument must be a mutable place; it is decoded with
/// [`Unpacker::unpack_into`].
#[macro_export]
macro_rules! unpack {
    ($unpacker:expr $(, $place:expr)+ $(,)?) => {{
        let unpacker = &mut $unpacker;
        let result: $crate::Result<()> = Ok(());
        $(
            let result = result.and_then(|()| unpacker.unpack_into(&mut $place).map(|_| ()));
        )+
        result
    }};
}
