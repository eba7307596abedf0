// Rust Dash Library
// Originally written in 2014 by
//     Andrew Poelstra <apoelstra@wpsoftware.net>
//     For Bitcoin
// Updated for Dash in 2022 by
//     The Dash Core Developers
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! Dash consensus-encodable types.
//!
//! This is basically a replacement of the `Encodable` trait which does
//! normalization of endianness etc., to ensure that the encoding matches
//! the network consensus encoding.
//!
//! Essentially, anything that must go on the _disk_ or _network_ must be
//! encoded using the `Encodable` trait, since this data must be the same for
//! all systems. Any data going to the _user_ e.g., over JSONRPC, should use the
//! ordinary JSON encoding.
//!
//! Multi-byte integers are little-endian. The one exception used by special
//! transaction payloads is the service port, which is written in network byte
//! order through [`write_u16_be`] and [`read_u16_be`].

use thiserror::Error;

use crate::io::{self, Cursor, Read, Write};

/// Maximum size, in bytes, of a vector we are allowed to decode.
pub const MAX_VEC_SIZE: usize = 4_000_000;

/// Encoding error.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error other than running out of input.
    #[error("I/O error: {0}")]
    Io(io::Error),
    /// Tried to read more bytes than the buffer holds.
    #[error("buffer underrun: tried to read past the end of the payload")]
    Underrun,
    /// All fields were decoded but bytes remain.
    #[error("raw payload is bigger than expected ({remaining} trailing bytes)")]
    TrailingData {
        /// Number of bytes left unread.
        remaining: usize,
    },
    /// A varint was not encoded in its shortest form.
    #[error("non-minimal varint")]
    NonMinimalVarInt,
    /// Tried to allocate an oversized vector.
    #[error("allocation of oversized vector: requested {requested}, maximum {max}")]
    OversizedVectorAllocation {
        /// The capacity requested.
        requested: usize,
        /// The maximum capacity.
        max: usize,
    },
    /// An enum discriminant was out of range.
    #[error("invalid enum value {received} (max {max}): {msg}")]
    InvalidEnumValue {
        /// The highest valid discriminant.
        max: u16,
        /// The discriminant read.
        received: u16,
        /// What was being decoded.
        msg: String,
    },
    /// A length-prefixed string was not valid UTF-8.
    #[error("invalid UTF-8 string")]
    InvalidUtf8,
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::UnexpectedEof {
            Error::Underrun
        } else {
            Error::Io(error)
        }
    }
}

/// Encodes an object into a vector.
pub fn serialize<T: Encodable + ?Sized>(data: &T) -> Vec<u8> {
    let mut encoder = Vec::new();
    let len = data.consensus_encode(&mut encoder).expect("in-memory writers don't error");
    debug_assert_eq!(len, encoder.len());
    encoder
}

/// Encodes an object into a hex-encoded string.
pub fn serialize_hex<T: Encodable + ?Sized>(data: &T) -> String {
    hex::encode(serialize(data))
}

/// Deserializes an object from a vector, will error if said deserialization
/// doesn't consume the entire vector.
pub fn deserialize<T: Decodable>(data: &[u8]) -> Result<T, Error> {
    let (rv, consumed) = deserialize_partial(data)?;

    if consumed == data.len() {
        Ok(rv)
    } else {
        Err(Error::TrailingData {
            remaining: data.len() - consumed,
        })
    }
}

/// Deserializes an object from a vector, but will not report an error if said deserialization
/// doesn't consume the entire vector.
pub fn deserialize_partial<T: Decodable>(data: &[u8]) -> Result<(T, usize), Error> {
    let mut decoder = Cursor::new(data);
    let rv = Decodable::consensus_decode(&mut decoder)?;
    let consumed = decoder.position() as usize;

    Ok((rv, consumed))
}

/// Data which can be encoded in a consensus-consistent way.
pub trait Encodable {
    /// Encodes an object with a well-defined format.
    ///
    /// # Returns
    ///
    /// The number of bytes written on success. The only errors returned are errors propagated from
    /// the writer.
    fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<usize, io::Error>;
}

/// Data which can be encoded in a consensus-consistent way.
pub trait Decodable: Sized {
    /// Decodes an object with a well-defined format.
    ///
    /// Running out of input yields [`Error::Underrun`].
    fn consensus_decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self, Error>;
}

/// A variable-length unsigned integer.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Gets the length of this VarInt when encoded.
    ///
    /// Returns 1 for 0..=0xFC, 3 for 0xFD..=(2^16-1), 5 for 0x10000..=(2^32-1),
    /// and 9 otherwise.
    #[inline]
    pub const fn len(&self) -> usize {
        match self.0 {
            0..=0xFC => 1,
            0xFD..=0xFFFF => 3,
            0x10000..=0xFFFFFFFF => 5,
            _ => 9,
        }
    }

    /// Whether the encoded value is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool { self.0 == 0 }
}

impl Encodable for VarInt {
    #[inline]
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        match self.0 {
            0..=0xFC => {
                (self.0 as u8).consensus_encode(w)?;
                Ok(1)
            }
            0xFD..=0xFFFF => {
                w.write_all(&[0xFD])?;
                (self.0 as u16).consensus_encode(w)?;
                Ok(3)
            }
            0x10000..=0xFFFFFFFF => {
                w.write_all(&[0xFE])?;
                (self.0 as u32).consensus_encode(w)?;
                Ok(5)
            }
            _ => {
                w.write_all(&[0xFF])?;
                self.0.consensus_encode(w)?;
                Ok(9)
            }
        }
    }
}

impl Decodable for VarInt {
    #[inline]
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, Error> {
        let n = u8::consensus_decode(r)?;
        match n {
            0xFF => {
                let x = u64::consensus_decode(r)?;
                if x < 0x100000000 { Err(Error::NonMinimalVarInt) } else { Ok(VarInt(x)) }
            }
            0xFE => {
                let x = u32::consensus_decode(r)?;
                if x < 0x10000 { Err(Error::NonMinimalVarInt) } else { Ok(VarInt(x as u64)) }
            }
            0xFD => {
                let x = u16::consensus_decode(r)?;
                if x < 0xFD { Err(Error::NonMinimalVarInt) } else { Ok(VarInt(x as u64)) }
            }
            n => Ok(VarInt(n as u64)),
        }
    }
}

macro_rules! impl_int_encodable {
    ($ty:ident, $len:expr) => {
        impl Decodable for $ty {
            #[inline]
            fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, Error> {
                let mut buf = [0u8; $len];
                r.read_exact(&mut buf)?;
                Ok($ty::from_le_bytes(buf))
            }
        }
        impl Encodable for $ty {
            #[inline]
            fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
                w.write_all(&self.to_le_bytes())?;
                Ok($len)
            }
        }
    };
}

impl_int_encodable!(u8, 1);
impl_int_encodable!(u16, 2);
impl_int_encodable!(u32, 4);
impl_int_encodable!(u64, 8);

/// Writes a `u16` in network byte order.
pub fn write_u16_be<W: Write + ?Sized>(w: &mut W, value: u16) -> Result<usize, io::Error> {
    w.write_all(&value.to_be_bytes())?;
    Ok(2)
}

/// Reads a `u16` stored in network byte order.
pub fn read_u16_be<R: Read + ?Sized>(r: &mut R) -> Result<u16, Error> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_be_bytes(buf))
}

impl<const N: usize> Encodable for [u8; N] {
    #[inline]
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        w.write_all(&self[..])?;
        Ok(N)
    }
}

impl<const N: usize> Decodable for [u8; N] {
    #[inline]
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, Error> {
        let mut ret = [0u8; N];
        r.read_exact(&mut ret)?;
        Ok(ret)
    }
}

/// Writes a varint length prefix followed by the bytes.
pub fn consensus_encode_with_size<W: Write + ?Sized>(
    data: &[u8],
    w: &mut W,
) -> Result<usize, io::Error> {
    let vi_len = VarInt(data.len() as u64).consensus_encode(w)?;
    w.write_all(data)?;
    Ok(vi_len + data.len())
}

impl Encodable for Vec<u8> {
    #[inline]
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        consensus_encode_with_size(self, w)
    }
}

impl Decodable for Vec<u8> {
    #[inline]
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, Error> {
        let len = VarInt::consensus_decode(r)?.0 as usize;
        if len > MAX_VEC_SIZE {
            return Err(Error::OversizedVectorAllocation {
                requested: len,
                max: MAX_VEC_SIZE,
            });
        }
        let mut ret = vec![0u8; len];
        r.read_exact(&mut ret)?;
        Ok(ret)
    }
}

impl Encodable for String {
    #[inline]
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        consensus_encode_with_size(self.as_bytes(), w)
    }
}

impl Decodable for String {
    #[inline]
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, Error> {
        String::from_utf8(Vec::<u8>::consensus_decode(r)?).map_err(|_| Error::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn serialize_int_test() {
        assert_eq!(serialize(&1u8), vec![1u8]);
        assert_eq!(serialize(&256u16), vec![0u8, 1]);
        assert_eq!(serialize(&5000u16), vec![136u8, 19]);
        assert_eq!(serialize(&70211u32), vec![0x43, 0x12, 0x01, 0x00]);
        assert_eq!(serialize(&723401728380766730u64), vec![10u8, 10, 10, 10, 10, 10, 10, 10]);
    }

    #[test]
    fn serialize_varint_test() {
        assert_eq!(serialize(&VarInt(10)), vec![10u8]);
        assert_eq!(serialize(&VarInt(0xFC)), vec![0xFCu8]);
        assert_eq!(serialize(&VarInt(0xFD)), vec![0xFDu8, 0xFD, 0]);
        assert_eq!(serialize(&VarInt(0xFFF)), vec![0xFDu8, 0xFF, 0xF]);
        assert_eq!(serialize(&VarInt(0xF0F0F0F)), vec![0xFEu8, 0xF, 0xF, 0xF, 0xF]);
        assert_eq!(
            serialize(&VarInt(0xF0F0F0F0F0E0)),
            vec![0xFFu8, 0xE0, 0xF0, 0xF0, 0xF0, 0xF0, 0xF0, 0, 0]
        );
        for value in [0u64, 0xFC, 0xFD, 0xFFFF, 0x10000, 0xFFFFFFFF, 0x100000000] {
            assert_eq!(serialize(&VarInt(value)).len(), VarInt(value).len());
        }
    }

    #[test]
    fn deserialize_nonminimal_vec() {
        assert_matches!(
            deserialize::<VarInt>(&[0xfd, 0x00, 0x00]),
            Err(Error::NonMinimalVarInt)
        );
        assert_matches!(
            deserialize::<VarInt>(&[0xfe, 0xff, 0xff, 0x00, 0x00]),
            Err(Error::NonMinimalVarInt)
        );
        assert_matches!(
            deserialize::<VarInt>(&[0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00]),
            Err(Error::NonMinimalVarInt)
        );
        assert_eq!(deserialize::<VarInt>(&[0xfd, 0xfd, 0x00]).unwrap(), VarInt(0xfd));
    }

    #[test]
    fn deserialize_underrun_and_trailing_data() {
        assert_matches!(deserialize::<u32>(&[1, 2, 3]), Err(Error::Underrun));
        assert_matches!(deserialize::<Vec<u8>>(&[3, 1, 2]), Err(Error::Underrun));
        assert_matches!(
            deserialize::<u16>(&[1, 2, 3]),
            Err(Error::TrailingData {
                remaining: 1
            })
        );
        let (value, consumed) = deserialize_partial::<u16>(&[1, 2, 3]).unwrap();
        assert_eq!((value, consumed), (0x0201, 2));
    }

    #[test]
    fn deserialize_oversized_vec() {
        let mut data = serialize(&VarInt(MAX_VEC_SIZE as u64 + 1));
        data.extend_from_slice(&[0; 8]);
        assert_matches!(
            deserialize::<Vec<u8>>(&data),
            Err(Error::OversizedVectorAllocation { .. })
        );
    }

    #[test]
    fn strings_are_length_prefixed_utf8() {
        assert_eq!(serialize(&"test".to_string()), vec![4, b't', b'e', b's', b't']);
        assert_eq!(deserialize::<String>(&[2, b'o', b'k']).unwrap(), "ok");
        assert_matches!(deserialize::<String>(&[1, 0xff]), Err(Error::InvalidUtf8));
    }

    #[test]
    fn port_is_big_endian() {
        let mut buf = Vec::new();
        write_u16_be(&mut buf, 1237).unwrap();
        assert_eq!(buf, vec![0x04, 0xd5]);
        assert_eq!(read_u16_be(&mut Cursor::new(&buf)).unwrap(), 1237);
    }
}
