#![allow(missing_docs)]

//! Byte-exact checks of the wire layout.

use packetbuf::{BigEndian, NetworkEndian, PacketBuffer, PacketError, Packer, Result, Unpacker};

fn le<T: packetbuf::Pack + ?Sized>(value: &T) -> Result<String> {
    PacketBuffer::to_vec(value).map(hex::encode)
}

fn be<T: packetbuf::Pack + ?Sized>(value: &T) -> Result<String> {
    PacketBuffer::to_vec_ordered::<BigEndian, T>(value).map(hex::encode)
}

#[test]
fn test_integer_byte_order() -> Result<()> {
    assert_eq!(le(&1u16)?, "0100");
    assert_eq!(be(&1u16)?, "0001");
    assert_eq!(le(&-128i8)?, "80");
    assert_eq!(be(&0x0102_0304u32)?, "01020304");
    assert_eq!(le(&-2i64)?, "feffffffffffffff");
    assert_eq!(be(&1u128)?, format!("{}01", "00".repeat(15)));
    Ok(())
}

#[test]
fn test_network_order_is_big_endian() -> Result<()> {
    assert_eq!(
        PacketBuffer::to_vec_ordered::<NetworkEndian, _>(&0xABCDu16)?,
        PacketBuffer::to_vec_ordered::<BigEndian, _>(&0xABCDu16)?
    );
    Ok(())
}

#[test]
fn test_scalars() -> Result<()> {
    assert_eq!(le(&true)?, "01");
    assert_eq!(le(&false)?, "00");
    assert_eq!(le(&1.0f64)?, "000000000000f03f");
    assert_eq!(be(&1.0f64)?, "3ff0000000000000");
    assert_eq!(le(&'A')?, "41000000");
    assert_eq!(le(&())?, "");
    Ok(())
}

#[test]
fn test_string_length_prefix() -> Result<()> {
    assert_eq!(le("")?, "0000000000000000");

    let text = "Hello Testing World";
    let expected = format!("1300000000000000{}", hex::encode(text));
    assert_eq!(le(text)?, expected);
    assert_eq!(le(&text.to_string())?, expected);
    Ok(())
}

#[test]
fn test_fixed_arrays_have_no_prefix() -> Result<()> {
    assert_eq!(le(&[100u8, 200])?, "64c8");
    assert_eq!(le(&[-1i8, 1])?, "ff01");
    assert_eq!(be(&[1u16, 2])?, "00010002");
    assert_eq!(le(&[[1u8, 2], [3, 4]])?, "01020304");

    let back: [u8; 2] = PacketBuffer::from_slice(&[100, 200])?;
    assert_eq!(back, [100, 200]);
    Ok(())
}

#[test]
fn test_sequence_and_option_layout() -> Result<()> {
    assert_eq!(be(&vec![1u16, 2])?, "000000000000000200010002");
    assert_eq!(le(&Some(5u16))?, "010500");
    assert_eq!(le(&None::<u16>)?, "00");
    assert_eq!(be(&(1u8, 2u16))?, "010002");
    Ok(())
}

#[test]
fn test_sequential_heterogeneous_values() -> Result<()> {
    let mut bytes = Vec::new();
    Packer::new(&mut bytes)
        .pack(&1u8)?
        .pack("ab")?
        .pack(&-1i32)?
        .pack(&false)?
        .pack(&vec![7u64])?;

    let mut source = bytes.as_slice();
    let mut unpacker = Unpacker::new(&mut source);
    assert_eq!(unpacker.unpack::<u8>()?, 1);
    assert_eq!(unpacker.unpack::<String>()?, "ab");
    assert_eq!(unpacker.unpack::<i32>()?, -1);
    assert!(!unpacker.unpack::<bool>()?);
    assert_eq!(unpacker.unpack::<Vec<u64>>()?, vec![7u64]);
    assert!(source.is_empty());
    Ok(())
}

#[test]
fn test_big_endian_roundtrip() -> Result<()> {
    let value = (0x1234u16, -5i32, String::from("net"), [9u8; 3]);
    let bytes = PacketBuffer::to_vec_ordered::<BigEndian, _>(&value)?;
    let back = PacketBuffer::from_slice_ordered::<BigEndian, (u16, i32, String, [u8; 3])>(&bytes)?;
    assert_eq!(back, value);
    Ok(())
}

#[test]
fn test_truncated_input_is_unexpected_eof() {
    let err = PacketBuffer::from_slice::<u32>(&[1, 2]).unwrap_err();
    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::UnexpectedEof));

    // The count promises 4 bytes but only 2 follow.
    let err = PacketBuffer::from_slice::<String>(&[4, 0, 0, 0, 0, 0, 0, 0, b'a', b'b']).unwrap_err();
    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::UnexpectedEof));
}

#[test]
fn test_representation_errors() {
    let bad_utf8 = [2, 0, 0, 0, 0, 0, 0, 0, 0xC3, 0x28];
    assert!(matches!(
        PacketBuffer::from_slice::<String>(&bad_utf8),
        Err(PacketError::Utf8(_))
    ));

    let surrogate = 0xD800u32.to_le_bytes();
    assert!(matches!(
        PacketBuffer::from_slice::<char>(&surrogate),
        Err(PacketError::Format(_))
    ));
}
