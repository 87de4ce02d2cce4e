//! Durations and wall-clock instants.
//!
//! A time value is one signed 64-bit count of a fixed unit. The unit is not
//! written to the wire and no normalization happens on decode: both sides
//! must agree on it out of band.
//!
//! `Duration` and `SystemTime` use [`Nanos`] by default. To store a coarser
//! unit, select one of the unit codecs as an override:
//!
//! ```rust
//! use std::time::Duration;
//! use packetbuf::{Packer, Unpacker};
//! use packetbuf::time::Seconds;
//!
//! let mut bytes = Vec::new();
//! Packer::new(&mut bytes).pack_with::<Seconds, _>(&Duration::from_millis(2_900))?;
//! assert_eq!(bytes, 2i64.to_le_bytes());
//!
//! let back: Duration = Unpacker::new(&mut bytes.as_slice()).unpack_with::<Seconds, _>()?;
//! assert_eq!(back, Duration::from_secs(2));
//! # Ok::<(), packetbuf::PacketError>(())
//! ```
//!
//! Encoding truncates toward zero in the chosen unit. `std::time::Instant` has
//! no fixed epoch and cannot be encoded; use `SystemTime`, which is measured
//! from `UNIX_EPOCH` and may be negative.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::codec::{Codec, Pack, Unpack};
use crate::endian::Endianness;
use crate::error::{PacketError, Result};
use crate::io::{Sink, Source};
use crate::packer::Packer;
use crate::unpacker::Unpacker;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// A fixed time unit, expressed in nanoseconds.
///
/// Every unit doubles as a [`Codec`] for `Duration` and `SystemTime`.
pub trait TimeUnit {
    /// Length of one unit in nanoseconds.
    const NANOS: u128;
    /// Name used in error messages.
    const NAME: &'static str;
}

macro_rules! time_units {
    ($($(#[$doc:meta])* $unit:ident = $nanos:expr, $label:literal;)*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $unit;

            impl TimeUnit for $unit {
                const NANOS: u128 = $nanos;
                const NAME: &'static str = $label;
            }
        )*
    };
}

time_units! {
    /// Nanosecond counts. The default unit.
    Nanos = 1, "nanoseconds";
    /// Microsecond counts.
    Micros = 1_000, "microseconds";
    /// Millisecond counts.
    Millis = 1_000_000, "milliseconds";
    /// Second counts.
    Seconds = NANOS_PER_SEC, "seconds";
    /// Minute counts.
    Minutes = 60 * NANOS_PER_SEC, "minutes";
    /// Hour counts.
    Hours = 3_600 * NANOS_PER_SEC, "hours";
}

/// Whole units in `span`, truncated toward zero.
fn to_count<U: TimeUnit>(span: Duration) -> Result<u64> {
    let count = span.as_nanos() / U::NANOS;
    u64::try_from(count)
        .ok()
        .filter(|c| i64::try_from(*c).is_ok())
        .ok_or_else(|| PacketError::Format(format!("{count} {} overflows an i64 count", U::NAME)))
}

fn from_count<U: TimeUnit>(count: u64) -> Result<Duration> {
    let nanos = u128::from(count) * U::NANOS;
    let secs = u64::try_from(nanos / NANOS_PER_SEC)
        .map_err(|_| PacketError::Format(format!("{count} {} overflows a Duration", U::NAME)))?;
    // Always below one billion.
    let subsec = (nanos % NANOS_PER_SEC) as u32;
    Ok(Duration::new(secs, subsec))
}

impl<U: TimeUnit> Codec<Duration> for U {
    fn pack<S: Sink + ?Sized, E: Endianness>(value: &Duration, packer: &mut Packer<'_, S, E>) -> Result<()> {
        let count = to_count::<U>(*value)?;
        packer.pack_i64(count as i64)?;
        Ok(())
    }

    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Duration> {
        let count = unpacker.unpack_i64()?;
        let count = u64::try_from(count).map_err(|_| {
            PacketError::Format(format!("negative count {count} cannot be a Duration"))
        })?;
        from_count::<U>(count)
    }
}

impl<U: TimeUnit> Codec<SystemTime> for U {
    fn pack<S: Sink + ?Sized, E: Endianness>(value: &SystemTime, packer: &mut Packer<'_, S, E>) -> Result<()> {
        let count = match value.duration_since(UNIX_EPOCH) {
            Ok(after) => to_count::<U>(after)? as i64,
            Err(before) => -(to_count::<U>(before.duration())? as i64),
        };
        packer.pack_i64(count)?;
        Ok(())
    }

    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<SystemTime> {
        let count = unpacker.unpack_i64()?;
        let span = from_count::<U>(count.unsigned_abs())?;
        let instant = if count >= 0 {
            UNIX_EPOCH.checked_add(span)
        } else {
            UNIX_EPOCH.checked_sub(span)
        };
        instant.ok_or_else(|| {
            PacketError::Format(format!("{count} {} since the epoch is out of range", U::NAME))
        })
    }
}

impl Pack for Duration {
    #[inline]
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
        <Nanos as Codec<Duration>>::pack(self, packer)
    }
}

impl Unpack for Duration {
    #[inline]
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        <Nanos as Codec<Duration>>::unpack(unpacker)
    }
}

impl Pack for SystemTime {
    #[inline]
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
        <Nanos as Codec<SystemTime>>::pack(self, packer)
    }
}

impl Unpack for SystemTime {
    #[inline]
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        <Nanos as Codec<SystemTime>>::unpack(unpacker)
    }
}
