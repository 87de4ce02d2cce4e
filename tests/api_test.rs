#![allow(missing_docs)]

use std::collections::BTreeMap;
use std::io::{BufReader, BufWriter, Cursor, Seek, SeekFrom, Write};

use packetbuf::io::SizeCounter;
use packetbuf::{PacketBuffer, PacketError, Packable, Packer, Result, Unpacker};

#[derive(Packable, PartialEq, Debug, Clone)]
struct SimpleData {
    id: u32,
    message: String,
}

#[derive(Packable, PartialEq, Debug, Clone)]
struct ComplexData {
    title: String,
    numbers: Vec<u64>,
    inner: SimpleData,
    lookup: BTreeMap<u16, SimpleData>,
}

fn create_complex_data() -> ComplexData {
    let inner = SimpleData {
        id: 42,
        message: "Hello World".to_string(),
    };
    ComplexData {
        title: "Integration Test".to_string(),
        numbers: (0..50_000).collect(),
        lookup: BTreeMap::from([(1, inner.clone())]),
        inner,
    }
}

// --- TESTS ---

/// Standard file IO through `PacketBuffer::write` / `PacketBuffer::read`.
#[test]
#[cfg(not(target_arch = "wasm32"))]
fn test_standard_file_io() -> Result<()> {
    let data = create_complex_data();
    let mut file = tempfile::tempfile()?;

    PacketBuffer::write(&mut file, &data)?;
    file.seek(SeekFrom::Start(0))?;
    let loaded: ComplexData = PacketBuffer::read(&mut file)?;

    assert_eq!(loaded, data);
    Ok(())
}

/// Several values share one buffered file session.
#[test]
#[cfg(not(target_arch = "wasm32"))]
fn test_buffered_file_session() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.bin");

    {
        let mut writer = BufWriter::new(std::fs::File::create(&path)?);
        let mut packer = Packer::new(&mut writer);
        for i in 0..100u32 {
            packer.pack(&i)?.pack(&format!("row-{i}"))?;
        }
        writer.flush()?;
    }

    let mut reader = BufReader::new(std::fs::File::open(&path)?);
    let mut unpacker = Unpacker::new(&mut reader);
    for i in 0..100u32 {
        assert_eq!(unpacker.unpack::<u32>()?, i);
        assert_eq!(unpacker.unpack::<String>()?, format!("row-{i}"));
    }
    let eof = unpacker.unpack::<u32>().unwrap_err();
    assert_eq!(eof.io_kind(), Some(std::io::ErrorKind::UnexpectedEof));
    Ok(())
}

/// In-memory vector round trip.
#[test]
fn test_memory_roundtrip() -> Result<()> {
    let data = create_complex_data();
    let bytes = PacketBuffer::to_vec(&data)?;
    assert_eq!(PacketBuffer::from_slice::<ComplexData>(&bytes)?, data);
    Ok(())
}

#[test]
fn test_read_leaves_the_rest_of_the_stream() -> Result<()> {
    let mut cursor = Cursor::new(Vec::new());
    PacketBuffer::write(&mut cursor, &1u16)?;
    PacketBuffer::write(&mut cursor, "tail")?;

    cursor.set_position(0);
    assert_eq!(PacketBuffer::read::<_, u16>(&mut cursor)?, 1);
    assert_eq!(cursor.position(), 2);
    assert_eq!(PacketBuffer::read::<_, String>(&mut cursor)?, "tail");
    Ok(())
}

#[test]
fn test_from_slice_rejects_trailing_bytes() -> Result<()> {
    let mut bytes = PacketBuffer::to_vec(&5u32)?;
    bytes.push(0);
    let err = PacketBuffer::from_slice::<u32>(&bytes).unwrap_err();
    assert!(matches!(err, PacketError::Format(_)));
    Ok(())
}

#[test]
fn test_packed_len_stores_nothing() -> Result<()> {
    let data = create_complex_data();
    let expected = PacketBuffer::to_vec(&data)?.len() as u64;
    assert_eq!(PacketBuffer::packed_len(&data)?, expected);

    let mut counter = SizeCounter::new();
    Packer::new(&mut counter).pack(&data)?.pack(&0u8)?;
    assert_eq!(counter.written(), expected + 1);
    Ok(())
}

/// A sink that accepts a fixed number of bytes, then fails.
struct Quota(usize);

impl Write for Quota {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.0 == 0 {
            return Err(std::io::Error::new(std::io::ErrorKind::StorageFull, "quota exhausted"));
        }
        let n = buf.len().min(self.0);
        self.0 -= n;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_sink_failure_is_propagated_unchanged() {
    let mut sink = Quota(4);
    let err = PacketBuffer::write(&mut sink, &create_complex_data()).unwrap_err();
    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::StorageFull));

    let source = std::error::Error::source(&err).map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("quota exhausted"));
}
