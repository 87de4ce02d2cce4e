#![allow(missing_docs)]

use std::marker::PhantomData;
use std::time::Duration;

use packetbuf::{
    BigEndian, PacketBuffer, PacketError, Packable, Packer, Result, Unpacker, pack, unpack,
};

#[derive(Packable, Debug, PartialEq, Default, Clone)]
struct Telemetry {
    id: u32,
    name: String,
    readings: Vec<i16>,
    #[packetbuf(skip)]
    cached_total: Option<i64>,
}

#[derive(Packable, Debug, PartialEq)]
struct Meters(u32);

#[derive(Packable, Debug, PartialEq)]
struct Marker;

#[derive(Packable, Debug, PartialEq, Clone, Copy)]
#[repr(u8)]
enum Mode {
    Off = 0,
    On = 1,
    Auto = 7,
}

#[derive(Packable, Debug, PartialEq)]
#[repr(i16)]
enum Level {
    Low = -1,
    High = 1,
}

#[derive(Packable, Debug, PartialEq)]
struct Session {
    mode: Mode,
    #[packetbuf(with = "packetbuf::time::Seconds")]
    timeout: Duration,
    history: Vec<Telemetry>,
}

#[derive(Packable, Debug, PartialEq)]
struct Pair<T> {
    left: T,
    right: T,
}

#[derive(Packable, Debug, PartialEq)]
struct Tagged<Unit> {
    value: u32,
    unit: PhantomData<Unit>,
}

fn sample() -> Telemetry {
    Telemetry {
        id: 9,
        name: "probe".to_string(),
        readings: vec![-1, 2],
        cached_total: Some(1),
    }
}

#[test]
fn test_struct_fields_in_declaration_order() -> Result<()> {
    let bytes = PacketBuffer::to_vec(&sample())?;
    assert_eq!(
        bytes,
        PacketBuffer::to_vec(&(9u32, "probe", vec![-1i16, 2]))?,
        "derived layout must match the field tuple"
    );

    let back: Telemetry = PacketBuffer::from_slice(&bytes)?;
    assert_eq!(back.readings, [-1, 2]);
    // Skipped fields come back as their default.
    assert_eq!(back.cached_total, None);
    Ok(())
}

#[test]
fn test_tuple_and_unit_structs() -> Result<()> {
    assert_eq!(PacketBuffer::to_vec(&Meters(5))?, [5, 0, 0, 0]);
    assert_eq!(PacketBuffer::from_slice::<Meters>(&[5, 0, 0, 0])?, Meters(5));

    assert!(PacketBuffer::to_vec(&Marker)?.is_empty());
    assert_eq!(PacketBuffer::from_slice::<Marker>(&[])?, Marker);
    Ok(())
}

#[test]
fn test_enum_uses_its_repr() -> Result<()> {
    assert_eq!(PacketBuffer::to_vec(&Mode::Auto)?, [7]);
    assert_eq!(PacketBuffer::from_slice::<Mode>(&[1])?, Mode::On);
    assert_eq!(PacketBuffer::from_slice::<Mode>(&[0])?, Mode::Off);

    assert_eq!(PacketBuffer::to_vec_ordered::<BigEndian, _>(&Level::Low)?, [0xFF, 0xFF]);
    assert_eq!(
        PacketBuffer::from_slice_ordered::<BigEndian, Level>(&[0x00, 0x01])?,
        Level::High
    );
    Ok(())
}

#[test]
fn test_unknown_discriminant_is_a_format_error() {
    let err = PacketBuffer::from_slice::<Mode>(&[3]).unwrap_err();
    assert!(matches!(err, PacketError::Format(ref msg) if msg.contains("Mode")));
}

#[test]
fn test_field_override_codec() -> Result<()> {
    let session = Session {
        mode: Mode::On,
        timeout: Duration::from_secs(30),
        history: vec![Telemetry::default()],
    };
    let bytes = PacketBuffer::to_vec(&session)?;
    // mode (1) + timeout in whole seconds (8) + history.
    assert_eq!(&bytes[..9], [1, 30, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(PacketBuffer::from_slice::<Session>(&bytes)?, session);
    Ok(())
}

#[test]
fn test_generic_struct() -> Result<()> {
    let pair = Pair {
        left: "l".to_string(),
        right: "r".to_string(),
    };
    let bytes = PacketBuffer::to_vec(&pair)?;
    assert_eq!(PacketBuffer::from_slice::<Pair<String>>(&bytes)?, pair);

    let numbers = Pair { left: 1u8, right: 2u8 };
    assert_eq!(PacketBuffer::to_vec(&numbers)?, [1, 2]);
    Ok(())
}

#[test]
fn test_phantom_fields_take_no_space() -> Result<()> {
    let reading: Tagged<Meters> = Tagged { value: 21, unit: PhantomData };
    let bytes = PacketBuffer::to_vec(&reading)?;
    assert_eq!(bytes, [21, 0, 0, 0]);
    assert_eq!(PacketBuffer::from_slice::<Tagged<Meters>>(&bytes)?.value, 21);
    Ok(())
}

#[test]
fn test_derived_unpack_into() -> Result<()> {
    let bytes = PacketBuffer::to_vec(&sample())?;
    let mut target = Telemetry {
        id: 1,
        name: String::with_capacity(64),
        readings: vec![0; 10],
        cached_total: Some(99),
    };
    Unpacker::new(&mut bytes.as_slice()).unpack_into(&mut target)?;
    assert_eq!(target, Telemetry { cached_total: None, ..sample() });
    Ok(())
}

#[test]
fn test_variadic_macros_match_tuple_layout() -> Result<()> {
    let mut bytes = Vec::new();
    let mut packer = Packer::new(&mut bytes);
    pack!(packer, 1u8, "two", Mode::Auto, [4u16; 2])?;
    assert_eq!(bytes, PacketBuffer::to_vec(&(1u8, "two", Mode::Auto, [4u16; 2]))?);

    let (mut one, mut two, mut mode, mut four) = (0u8, String::new(), Mode::Off, [0u16; 2]);
    let mut source = bytes.as_slice();
    let mut unpacker = Unpacker::new(&mut source);
    unpack!(unpacker, one, two, mode, four)?;
    assert_eq!((one, two.as_str(), mode, four), (1, "two", Mode::Auto, [4, 4]));
    Ok(())
}

#[test]
fn test_variadic_unpack_stops_at_first_failure() {
    let bytes = PacketBuffer::to_vec(&7u8).unwrap();
    let (mut first, mut second) = (0u8, 0u32);
    let mut source = bytes.as_slice();
    let mut unpacker = Unpacker::new(&mut source);
    let err = unpack!(unpacker, first, second).unwrap_err();
    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::UnexpectedEof));
    assert_eq!((first, second), (7, 0));
}
