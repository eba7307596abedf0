// Rust Dash Library
// Written for Dash in 2022 by
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

//! Internal macros.
//!
//! Macros meant to be used inside the library only.

/// Implements a fixed-length byte array newtype for opaque byte containers.
///
/// The hex form is the bytes in wire order; hashes use [`hashes::hash_newtype`] instead.
macro_rules! impl_array_newtype {
    ($(#[$attr:meta])* $name:ident, $len:expr) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Length of the value in bytes.
            pub const LEN: usize = $len;

            /// Creates the value from bytes in wire order.
            pub const fn from_byte_array(bytes: [u8; $len]) -> Self { $name(bytes) }

            /// Returns the bytes in wire order.
            pub const fn to_byte_array(self) -> [u8; $len] { self.0 }

            /// Borrows the bytes in wire order.
            pub const fn as_byte_array(&self) -> &[u8; $len] { &self.0 }

            /// A value with every byte set to zero.
            pub const fn all_zeros() -> Self { $name([0; $len]) }

            /// Copies a slice in wire order, checking its length.
            pub fn from_slice(slice: &[u8]) -> Result<Self, $crate::Error> {
                let bytes: [u8; $len] = slice.try_into().map_err(|_| {
                    $crate::Error::invalid_argument(
                        stringify!($name),
                        format!("{} bytes", $len),
                        format!("{} bytes", slice.len()),
                    )
                })?;
                Ok($name(bytes))
            }

            /// Lowercase hex in wire order.
            pub fn to_hex(&self) -> String { ::hex::encode(self.0) }

            /// Parses lowercase hex in wire order.
            pub fn from_hex(s: &str) -> Result<Self, $crate::Error> {
                <Self as $crate::validation::FromHexField>::from_hex_field(stringify!($name), s)
            }
        }

        impl $crate::validation::FromHexField for $name {
            fn from_hex_field(field: &'static str, s: &str) -> Result<Self, $crate::Error> {
                $crate::validation::expect_hex_string_of_length(field, s, $len)?;
                let mut bytes = [0u8; $len];
                ::hex::decode_to_slice(s, &mut bytes).map_err(|e| {
                    $crate::Error::invalid_argument(field, "a hex string", e.to_string())
                })?;
                Ok($name(bytes))
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self { $name(bytes) }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] { &self.0 }
        }

        impl Default for $name {
            fn default() -> Self { Self::all_zeros() }
        }

        impl $crate::consensus::Encodable for $name {
            fn consensus_encode<W: $crate::io::Write + ?Sized>(
                &self,
                w: &mut W,
            ) -> Result<usize, $crate::io::Error> {
                w.write_all(&self.0)?;
                Ok($len)
            }
        }

        impl $crate::consensus::Decodable for $name {
            fn consensus_decode<R: $crate::io::Read + ?Sized>(
                r: &mut R,
            ) -> Result<Self, $crate::consensus::encode::Error> {
                Ok($name(<[u8; $len] as $crate::consensus::Decodable>::consensus_decode(r)?))
            }
        }

        #[cfg(feature = "serde")]
        impl $crate::serde::Serialize for $name {
            fn serialize<S: $crate::serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str(&self.to_hex())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> $crate::serde::Deserialize<'de> for $name {
            fn deserialize<D: $crate::serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                use $crate::serde::de::Error as _;
                let s = <String as $crate::serde::Deserialize>::deserialize(d)?;
                Self::from_hex(&s).map_err(D::Error::custom)
            }
        }
    };
}

/// Implements `Display`, `Debug`, `LowerHex` and `FromStr` through the display-order hex.
macro_rules! impl_hex_display {
    ($name:ident) => {
        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl ::core::fmt::LowerHex for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> { Self::from_hex(s) }
        }
    };
}

/// Implements the consensus codec for a [`hashes::hash_newtype`] hash: its bytes in
/// internal order.
macro_rules! impl_hashencode {
    ($hashtype:ident) => {
        impl $crate::consensus::Encodable for $hashtype {
            fn consensus_encode<W: $crate::io::Write + ?Sized>(
                &self,
                w: &mut W,
            ) -> Result<usize, $crate::io::Error> {
                $crate::consensus::Encodable::consensus_encode(::hashes::Hash::as_byte_array(self), w)
            }
        }

        impl $crate::consensus::Decodable for $hashtype {
            fn consensus_decode<R: $crate::io::Read + ?Sized>(
                r: &mut R,
            ) -> Result<Self, $crate::consensus::encode::Error> {
                use ::hashes::Hash;
                let bytes =
                    <<$hashtype as Hash>::Bytes as $crate::consensus::Decodable>::consensus_decode(r)?;
                Ok(Self::from_byte_array(bytes))
            }
        }
    };
}

/// Adds field-named hex parsing to a [`hashes::hash_newtype`] hash.
///
/// `$check` validates the string and names the field on failure; the hash's own `FromStr`
/// then applies its display byte order.
macro_rules! impl_hash_hex_field {
    ($hashtype:ident, $check:path) => {
        impl $hashtype {
            /// Lowercase hex in display order.
            pub fn to_hex(&self) -> String { self.to_string() }

            /// Parses lowercase hex in display order.
            pub fn from_hex(s: &str) -> Result<Self, $crate::Error> {
                <Self as $crate::validation::FromHexField>::from_hex_field(stringify!($hashtype), s)
            }
        }

        impl $crate::validation::FromHexField for $hashtype {
            fn from_hex_field(field: &'static str, s: &str) -> Result<Self, $crate::Error> {
                $check(field, s)?;
                s.parse::<$hashtype>().map_err(|e| {
                    $crate::Error::invalid_argument(field, "a hex string", e.to_string())
                })
            }
        }
    };
}

/// Implements `Encodable` and `Display` for a special transaction payload.
///
/// The consensus encoding is the signed form; `Display` shows it as hex.
macro_rules! impl_payload_encodable {
    ($name:ident) => {
        impl $crate::consensus::Encodable for $name {
            fn consensus_encode<W: $crate::io::Write + ?Sized>(
                &self,
                w: &mut W,
            ) -> Result<usize, $crate::io::Error> {
                <Self as $crate::special_transaction::payload::SpecialTransactionPayload>::encode_with_options(
                    self,
                    w,
                    $crate::special_transaction::payload::EncodeOptions::default(),
                )
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&$crate::consensus::encode::serialize_hex(self))
            }
        }
    };
}

/// Dispatches a method call to the payload held by a [`TransactionPayload`].
///
/// [`TransactionPayload`]: crate::blockdata::transaction::special_transaction::TransactionPayload
macro_rules! dispatch_payload {
    ($self:expr, $p:ident => $body:expr) => {
        match $self {
            TransactionPayload::ProviderRegistrationPayloadType($p) => $body,
            TransactionPayload::ProviderUpdateServicePayloadType($p) => $body,
            TransactionPayload::ProviderUpdateRegistrarPayloadType($p) => $body,
            TransactionPayload::ProviderUpdateRevocationPayloadType($p) => $body,
            TransactionPayload::CoinbasePayloadType($p) => $body,
            TransactionPayload::QuorumCommitmentPayloadType($p) => $body,
            TransactionPayload::SubTxRegisterPayloadType($p) => $body,
            TransactionPayload::SubTxTopupPayloadType($p) => $body,
            TransactionPayload::SubTxResetKeyPayloadType($p) => $body,
            TransactionPayload::SubTxCloseAccountPayloadType($p) => $body,
            TransactionPayload::SubTxTransitionPayloadType($p) => $body,
        }
    };
}
