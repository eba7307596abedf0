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

//! Behaviour shared by all special transaction payloads.
//!
//! A payload has three representations that must agree with each other: the consensus wire
//! encoding, a JSON record with display-order hashes, and the double-SHA256 of the wire
//! encoding. [`SpecialTransactionPayload`] ties them together and runs [`validate`] on every
//! way in and out. Payloads that carry a compact ECDSA signature also implement
//! [`SignedPayload`], which signs the hash of the payload written with the signature left
//! out.
//!
//! [`validate`]: SpecialTransactionPayload::validate

use hashes::Hash;
use serde_json::{Map, Value};
use tracing::debug;

use crate::Error;
use crate::blockdata::transaction::special_transaction::TransactionType;
use crate::consensus::encode::consensus_encode_with_size;
use crate::consensus::{Decodable, Encodable, VarInt, deserialize};
use crate::hash_types::{PubkeyHash, SpecialTransactionPayloadHash};
use crate::io;
use crate::signer::{SignerKey, sign_hash, verify_hash_signature};
use crate::validation::{JsonRecord, expect_hex_string};

/// Options for writing a payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EncodeOptions {
    /// Write an empty signature in place of the stored one.
    pub skip_signature: bool,
}

impl EncodeOptions {
    /// Options producing the form a payload signature commits to.
    pub const fn unsigned() -> Self {
        EncodeOptions {
            skip_signature: true,
        }
    }
}

/// The accepted inputs for building a payload.
#[derive(Clone, Copy, Debug)]
pub enum PayloadSource<'a> {
    /// Consensus encoded bytes.
    Bytes(&'a [u8]),
    /// Hex of the consensus encoded bytes.
    Hex(&'a str),
    /// The JSON record.
    Json(&'a Value),
}

/// A typed special transaction payload.
pub trait SpecialTransactionPayload: Encodable + Decodable + Clone {
    /// The special transaction type that carries this payload.
    const TRANSACTION_TYPE: TransactionType;

    /// Checks every field invariant of the payload.
    fn validate(&self) -> Result<(), Error>;

    /// Writes the consensus encoding without validating.
    fn encode_with_options<W: io::Write + ?Sized>(
        &self,
        w: &mut W,
        options: EncodeOptions,
    ) -> Result<usize, io::Error>;

    /// Builds the JSON record without validating.
    fn to_json_with_options(&self, options: EncodeOptions) -> Value;

    /// Reads the fields from a JSON record without validating.
    fn from_json_record(record: &JsonRecord) -> Result<Self, Error>;

    /// The size of the consensus encoding in bytes.
    fn size(&self) -> usize;

    /// Decodes a payload, rejecting trailing bytes and invalid fields.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let payload: Self = deserialize(bytes).inspect_err(|e| {
            debug!(ty = %Self::TRANSACTION_TYPE, len = bytes.len(), error = %e, "rejecting payload bytes");
        })?;
        payload.validate()?;
        Ok(payload)
    }

    /// Decodes a payload from the hex of its consensus encoding.
    fn from_hex(s: &str) -> Result<Self, Error> {
        expect_hex_string("payload", s)?;
        let bytes = hex::decode(s)
            .map_err(|e| Error::invalid_argument("payload", "a hex string", e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Reads a payload from its JSON record.
    fn from_json(value: &Value) -> Result<Self, Error> {
        let payload = Self::from_json_record(&JsonRecord::new(value)?).inspect_err(|e| {
            debug!(ty = %Self::TRANSACTION_TYPE, error = %e, "rejecting payload JSON");
        })?;
        payload.validate()?;
        Ok(payload)
    }

    /// Builds a payload from any of its accepted inputs.
    fn from_source(source: PayloadSource) -> Result<Self, Error> {
        match source {
            PayloadSource::Bytes(bytes) => Self::from_bytes(bytes),
            PayloadSource::Hex(s) => Self::from_hex(s),
            PayloadSource::Json(value) => Self::from_json(value),
        }
    }

    /// The consensus encoding.
    fn to_bytes(&self, options: EncodeOptions) -> Result<Vec<u8>, Error> {
        self.validate()?;
        let mut bytes = Vec::with_capacity(self.size());
        self.encode_with_options(&mut bytes, options)?;
        Ok(bytes)
    }

    /// Hex of the consensus encoding.
    fn to_hex(&self, options: EncodeOptions) -> Result<String, Error> {
        Ok(hex::encode(self.to_bytes(options)?))
    }

    /// The JSON record.
    fn to_json(&self, options: EncodeOptions) -> Result<Value, Error> {
        self.validate()?;
        Ok(self.to_json_with_options(options))
    }

    /// Double-SHA256 of the consensus encoding.
    fn hash(&self, options: EncodeOptions) -> Result<SpecialTransactionPayloadHash, Error> {
        Ok(SpecialTransactionPayloadHash::hash(&self.to_bytes(options)?))
    }

    /// An independent copy made by reading back the JSON record.
    fn copy(&self) -> Result<Self, Error> { Self::from_json(&self.to_json(EncodeOptions::default())?) }
}

/// A payload authorised by a compact ECDSA signature.
pub trait SignedPayload: SpecialTransactionPayload {
    /// Name of the signature field in the JSON record.
    const SIGNATURE_FIELD: &'static str;

    /// The stored signature; empty when unsigned.
    fn signature(&self) -> &[u8];

    /// Replaces the stored signature.
    fn set_signature(&mut self, signature: Vec<u8>);

    /// Signs the unsigned payload hash and stores the signature.
    fn sign<'a>(&mut self, key: impl Into<SignerKey<'a>>) -> Result<&mut Self, Error> {
        let hash = self.hash(EncodeOptions::unsigned())?;
        let signature = sign_hash(hash.as_byte_array(), key)?;
        self.set_signature(signature.to_vec());
        Ok(self)
    }

    /// Whether the stored signature was made by the key with this identity.
    ///
    /// Never fails: a missing or malformed signature, or a payload that does not validate,
    /// yields `false`.
    fn verify_signature(&self, key_id: &PubkeyHash) -> bool {
        if self.signature().is_empty() {
            debug!(ty = %Self::TRANSACTION_TYPE, "payload is not signed");
            return false;
        }
        let hash = match self.hash(EncodeOptions::unsigned()) {
            Ok(hash) => hash,
            Err(e) => {
                debug!(ty = %Self::TRANSACTION_TYPE, error = %e, "cannot hash payload");
                return false;
            }
        };
        verify_hash_signature(hash.as_byte_array(), self.signature(), key_id).unwrap_or_else(|e| {
            debug!(ty = %Self::TRANSACTION_TYPE, error = %e, "malformed payload signature");
            false
        })
    }
}

/// Writes a signature blob, or an empty one when signatures are skipped.
pub(crate) fn encode_signature<W: io::Write + ?Sized>(
    signature: &[u8],
    options: EncodeOptions,
    w: &mut W,
) -> Result<usize, io::Error> {
    if options.skip_signature {
        consensus_encode_with_size(&[], w)
    } else {
        consensus_encode_with_size(signature, w)
    }
}

/// Encoded length of a varint-prefixed blob.
pub(crate) fn var_bytes_size(bytes: &[u8]) -> usize { VarInt(bytes.len() as u64).len() + bytes.len() }

/// Adds the signature to a JSON record unless it is skipped or empty.
pub(crate) fn insert_signature(
    fields: &mut Map<String, Value>,
    field: &str,
    signature: &[u8],
    options: EncodeOptions,
) {
    if !options.skip_signature && !signature.is_empty() {
        fields.insert(field.to_string(), Value::String(hex::encode(signature)));
    }
}
