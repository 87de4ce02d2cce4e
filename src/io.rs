//! The byte transport boundary.
//!
//! packetbuf never stores or moves bytes on its own. A [`Packer`](crate::Packer)
//! hands every encoded span to a [`Sink`], an [`Unpacker`](crate::Unpacker)
//! fills every decoded span from a [`Source`]. Both contracts are
//! "fully satisfy or fail": partial transfers are not modeled.
//!
//! Any `std::io::Write` is a `Sink` and any `std::io::Read` is a `Source`, so
//! `Vec<u8>`, `&[u8]`, `Cursor`, `File` and sockets work out of the box.

use std::io;

/// A destination for raw bytes.
pub trait Sink {
    /// Writes the whole buffer or fails.
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// An origin of raw bytes.
pub trait Source {
    /// Fills the whole buffer or fails.
    ///
    /// Running out of data must be reported as `io::ErrorKind::UnexpectedEof`.
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<()>;
}

impl<W: io::Write + ?Sized> Sink for W {
    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_all(bytes)
    }
}

impl<R: io::Read + ?Sized> Source for R {
    #[inline]
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.read_exact(buf)
    }
}

/// A sink that only counts the bytes written to it.
///
/// Used to size an encoding before committing it anywhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct SizeCounter {
    written: u64,
}

impl SizeCounter {
    /// Creates a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of bytes written so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl io::Write for SizeCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
