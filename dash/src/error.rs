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

//! Error type of the payload library.
//!
//! Codec failures (buffer underruns, trailing bytes, malformed varints) live in
//! [`crate::consensus::encode::Error`] and are wrapped by [`Error::Encode`].

use thiserror::Error;

use crate::blockdata::transaction::special_transaction::TransactionType;
use crate::consensus::encode;

/// Errors produced while building, parsing, validating or signing payloads.
#[derive(Debug, Error)]
pub enum Error {
    /// A field failed validation.
    #[error("invalid argument `{field}`: expected {expected}, got {actual}")]
    InvalidArgument {
        /// Name of the offending field or argument.
        field: &'static str,
        /// What the field should have been.
        expected: String,
        /// What was found instead.
        actual: String,
    },
    /// No payload type is registered for this special transaction type.
    #[error("unknown special transaction type {0}")]
    UnknownType(u16),
    /// The payload type carries no ECDSA signature.
    #[error("{0} payloads are not signed")]
    Unsignable(TransactionType),
    /// A payload was converted into the wrong concrete type.
    #[error("wrong special transaction payload conversion: expected {expected}, got {actual}")]
    WrongPayloadConversion {
        /// The requested payload type.
        expected: TransactionType,
        /// The payload type actually held.
        actual: TransactionType,
    },
    /// Binary decoding or encoding failed.
    #[error(transparent)]
    Encode(#[from] encode::Error),
    /// A secp256k1 operation failed.
    #[error("secp256k1 error: {0}")]
    Secp256k1(#[from] secp256k1::Error),
    /// A base58check string could not be decoded.
    #[error("base58 decoding error: {0}")]
    Base58(#[from] bs58::decode::Error),
}

impl Error {
    pub(crate) fn invalid_argument(
        field: &'static str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Error::InvalidArgument {
            field,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Returns the field name if this is a validation error.
    pub fn invalid_field(&self) -> Option<&'static str> {
        match self {
            Error::InvalidArgument {
                field,
                ..
            } => Some(field),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Encode(encode::Error::from(e))
    }
}
