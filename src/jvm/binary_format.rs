use super::Error;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read};

/// Utility trait for serializing data inside class files
///
/// Java class files have some peculiarities that make it useful to define an extra trait (instead
/// of just using `serde`):
///
///   - tags are always `u8`
///   - when serializing a sequence, the length of the sequence is usually `u16`
///
pub trait Serialize: Sized {
    /// Serialize construct into a binary output stream
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> io::Result<()>;
}

/// Counterpart of [`Serialize`] for reading class files
///
/// Reads are strictly sequential: implementations consume exactly the bytes of their encoding
/// and never seek.
pub trait Deserialize: Sized {
    /// Deserialize construct from a binary input stream
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error>;
}

impl Serialize for u8 {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u8(*self)
    }
}

impl Serialize for u16 {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u16::<BigEndian>(*self)
    }
}

impl Serialize for u32 {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u32::<BigEndian>(*self)
    }
}

impl Serialize for i32 {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_i32::<BigEndian>(*self)
    }
}

impl Serialize for i64 {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_i64::<BigEndian>(*self)
    }
}

impl Serialize for f32 {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_f32::<BigEndian>(*self)
    }
}

impl Serialize for f64 {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_f64::<BigEndian>(*self)
    }
}

/// Size in `u16` is the first thing serialized/deserialized
impl<A: Serialize> Serialize for Vec<A> {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> io::Result<()> {
        (self.len() as u16).serialize(writer)?;
        for elem in self {
            elem.serialize(writer)?;
        }
        Ok(())
    }
}

impl Deserialize for u8 {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        Ok(reader.read_u8()?)
    }
}

impl Deserialize for u16 {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        Ok(reader.read_u16::<BigEndian>()?)
    }
}

impl Deserialize for u32 {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        Ok(reader.read_u32::<BigEndian>()?)
    }
}

impl Deserialize for i32 {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        Ok(reader.read_i32::<BigEndian>()?)
    }
}

impl Deserialize for i64 {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        Ok(reader.read_i64::<BigEndian>()?)
    }
}

impl Deserialize for f32 {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        Ok(reader.read_f32::<BigEndian>()?)
    }
}

impl Deserialize for f64 {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        Ok(reader.read_f64::<BigEndian>()?)
    }
}

/// Read exactly `len` bytes
///
/// The buffer grows with the data actually read, so a bogus length on a short stream fails with
/// [`Error::TruncatedStream`] instead of allocating up front.
pub fn read_bytes<R: Read>(reader: &mut R, len: u64) -> Result<Vec<u8>, Error> {
    let mut bytes = vec![];
    let read = reader.by_ref().take(len).read_to_end(&mut bytes)?;
    if (read as u64) < len {
        return Err(Error::TruncatedStream);
    }
    Ok(bytes)
}

/// Consume and discard exactly `len` bytes
pub fn skip_bytes<R: Read>(reader: &mut R, len: u64) -> Result<(), Error> {
    let skipped = io::copy(&mut reader.by_ref().take(len), &mut io::sink())?;
    if skipped < len {
        return Err(Error::TruncatedStream);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn big_endian_integers() {
        let mut bytes: &[u8] = &[0x12, 0x34, 0xCA, 0xFE, 0xBA, 0xBE];
        assert_eq!(u16::deserialize(&mut bytes).unwrap(), 0x1234);
        assert_eq!(u32::deserialize(&mut bytes).unwrap(), 0xCAFE_BABE);
        assert!(bytes.is_empty());
    }

    #[test]
    fn short_reads_are_truncation() {
        let mut bytes: &[u8] = &[0x12];
        assert!(matches!(
            u16::deserialize(&mut bytes),
            Err(Error::TruncatedStream)
        ));

        let mut bytes: &[u8] = &[1, 2, 3];
        assert!(matches!(
            read_bytes(&mut bytes, 4),
            Err(Error::TruncatedStream)
        ));

        let mut bytes: &[u8] = &[1, 2, 3];
        assert!(matches!(
            skip_bytes(&mut bytes, u32::MAX as u64),
            Err(Error::TruncatedStream)
        ));
    }

    #[test]
    fn skip_consumes_exactly() {
        let mut bytes: &[u8] = &[1, 2, 3, 4, 5];
        skip_bytes(&mut bytes, 3).unwrap();
        assert_eq!(bytes, &[4, 5]);
        assert_eq!(read_bytes(&mut bytes, 2).unwrap(), vec![4, 5]);
    }
}
