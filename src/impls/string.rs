use crate::codec::{Pack, Unpack};
use crate::endian::Endianness;
use crate::error::{PacketError, Result};
use crate::io::{Sink, Source};
use crate::packer::Packer;
use crate::unpacker::Unpacker;

/// Strings: u64 byte length, then the UTF-8 bytes as one raw span.
impl Pack for str {
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
        packer.pack_len(self.len())?.write_raw(self.as_bytes())?;
        Ok(())
    }
}

impl Pack for String {
    #[inline]
    fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
        self.as_str().pack(packer)
    }
}

// In-place decoding keeps the default: the target is only replaced once a
// whole valid string has been read.
impl Unpack for String {
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        let len = unpacker.unpack_len()?;
        let mut bytes = Vec::new();
        u8::unpack_extend(len, &mut bytes, unpacker)?;
        into_string(bytes)
    }
}

impl Unpack for Box<str> {
    #[inline]
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        String::unpack(unpacker).map(String::into_boxed_str)
    }
}

fn into_string(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| {
        tracing::debug!(error = %e, "string payload is not UTF-8");
        PacketError::from(e)
    })
}

#[cfg(test)]
mod tests {
    use crate::error::{PacketError, Result};
    use crate::{PacketBuffer, Unpacker};

    #[test]
    fn empty_string_is_just_the_prefix() -> Result<()> {
        assert_eq!(PacketBuffer::to_vec("")?, [0u8; 8]);
        assert_eq!(PacketBuffer::from_slice::<String>(&[0u8; 8])?, "");
        Ok(())
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let bytes = [2, 0, 0, 0, 0, 0, 0, 0, 0xC3, 0x28];
        let err = PacketBuffer::from_slice::<String>(&bytes).unwrap_err();
        assert!(matches!(err, PacketError::Utf8(_)));
    }

    #[test]
    fn in_place_replaces_previous_contents() -> Result<()> {
        let bytes = PacketBuffer::to_vec("new")?;
        let mut text = String::from("a much longer previous value");
        Unpacker::new(&mut bytes.as_slice()).unpack_into(&mut text)?;
        assert_eq!(text, "new");
        Ok(())
    }

    #[test]
    fn failed_in_place_decode_keeps_the_old_value() {
        let mut text = String::from("kept");

        let truncated = [5, 0, 0, 0, 0, 0, 0, 0, b'a', b'b'];
        let err = Unpacker::new(&mut truncated.as_slice())
            .unpack_into(&mut text)
            .unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::UnexpectedEof));
        assert_eq!(text, "kept");

        let invalid = [2, 0, 0, 0, 0, 0, 0, 0, 0xC3, 0x28];
        let err = Unpacker::new(&mut invalid.as_slice())
            .unpack_into(&mut text)
            .unwrap_err();
        assert!(matches!(err, PacketError::Utf8(_)));
        assert_eq!(text, "kept");
    }

    #[test]
    fn boxed_str_matches_string() -> Result<()> {
        let boxed: Box<str> = "boxed".into();
        let bytes = PacketBuffer::to_vec(&boxed)?;
        assert_eq!(bytes, PacketBuffer::to_vec("boxed")?);
        assert_eq!(PacketBuffer::from_slice::<Box<str>>(&bytes)?, boxed);
        Ok(())
    }
}
