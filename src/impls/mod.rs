//! Built-in codecs, one module per structural shape.
//!
//! Every composite codec is written purely in terms of [`Pack`](crate::Pack) /
//! [`Unpack`](crate::Unpack) for its parts. Only strings and byte runs touch
//! the raw transfer calls directly.
//!
//! Fixed-size shapes (arrays, tuples) carry no count on the wire because their
//! size is part of the type. Variable-size shapes (strings, sequences, maps,
//! sets) always start with a u64 count.

mod array;
mod map;
mod option;
mod pointer;
mod primitive;
mod seq;
mod set;
mod string;
mod tuple;
