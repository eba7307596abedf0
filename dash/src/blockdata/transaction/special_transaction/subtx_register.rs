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

//! Dash User Registration Subtransaction.
//!
//! A SubTxRegister creates a named user identity controlled by an ECDSA key. The payload is
//! signed with that same key, proving control of it at registration. The hash of the
//! registering transaction (the "regTxHash") identifies the user in every later
//! subtransaction.

use hashes::Hash;
use serde_json::{Map, Value, json};

use crate::Error;
use crate::blockdata::transaction::special_transaction::TransactionType;
use crate::blockdata::transaction::special_transaction::payload::{
    EncodeOptions, SignedPayload, SpecialTransactionPayload, encode_signature, insert_signature,
    var_bytes_size,
};
use crate::consensus::{Decodable, Encodable, encode};
use crate::crypto::key::PrivateKey;
use crate::hash_types::PubkeyHash;
use crate::io;
use crate::validation::{JsonRecord, expect_compact_signature};

/// Payload of a user registration subtransaction.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct SubTxRegisterPayload {
    pub version: u16,
    pub user_name: String,
    pub pub_key_id: PubkeyHash,
    pub vch_sig: Vec<u8>,
}

impl Default for SubTxRegisterPayload {
    fn default() -> Self {
        SubTxRegisterPayload {
            version: 1,
            user_name: String::new(),
            pub_key_id: PubkeyHash::all_zeros(),
            vch_sig: Vec::new(),
        }
    }
}

impl SubTxRegisterPayload {
    /// Sets the user name.
    pub fn set_user_name(&mut self, user_name: impl Into<String>) -> &mut Self {
        self.user_name = user_name.into();
        self
    }

    /// Sets the identity of the key controlling the user.
    pub fn set_pub_key_id(&mut self, pub_key_id: PubkeyHash) -> &mut Self {
        self.pub_key_id = pub_key_id;
        self
    }

    /// Sets the identity of the key controlling the user from hex.
    pub fn set_pub_key_id_hex(&mut self, pub_key_id: &str) -> Result<&mut Self, Error> {
        self.pub_key_id = PubkeyHash::from_hex(pub_key_id)?;
        Ok(self)
    }

    /// Sets the controlling key to the public key of `key`.
    pub fn set_pub_key_id_from_private_key(&mut self, key: &PrivateKey) -> &mut Self {
        self.pub_key_id = key.pubkey_hash();
        self
    }
}

impl SpecialTransactionPayload for SubTxRegisterPayload {
    const TRANSACTION_TYPE: TransactionType = TransactionType::SubTxRegister;

    fn validate(&self) -> Result<(), Error> {
        if self.user_name.is_empty() {
            return Err(Error::invalid_argument("userName", "a non-empty string", "an empty string"));
        }
        expect_compact_signature("vchSig", &self.vch_sig)
    }

    fn encode_with_options<W: io::Write + ?Sized>(
        &self,
        w: &mut W,
        options: EncodeOptions,
    ) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += self.user_name.consensus_encode(w)?;
        len += self.pub_key_id.consensus_encode(w)?;
        len += encode_signature(&self.vch_sig, options, w)?;
        Ok(len)
    }

    fn to_json_with_options(&self, options: EncodeOptions) -> Value {
        let mut fields = Map::new();
        fields.insert("version".into(), json!(self.version));
        fields.insert("userName".into(), json!(self.user_name));
        fields.insert("pubKeyId".into(), json!(self.pub_key_id.to_hex()));
        insert_signature(&mut fields, Self::SIGNATURE_FIELD, &self.vch_sig, options);
        Value::Object(fields)
    }

    fn from_json_record(record: &JsonRecord) -> Result<Self, Error> {
        Ok(SubTxRegisterPayload {
            version: record.u16("version")?,
            user_name: record.string("userName")?.to_string(),
            pub_key_id: record.parse("pubKeyId")?,
            vch_sig: record.signature(Self::SIGNATURE_FIELD)?,
        })
    }

    fn size(&self) -> usize {
        2 + var_bytes_size(self.user_name.as_bytes()) + 20 + var_bytes_size(&self.vch_sig)
    }
}

impl SignedPayload for SubTxRegisterPayload {
    const SIGNATURE_FIELD: &'static str = "vchSig";

    fn signature(&self) -> &[u8] { &self.vch_sig }

    fn set_signature(&mut self, signature: Vec<u8>) { self.vch_sig = signature; }
}

impl_payload_encodable!(SubTxRegisterPayload);

impl Decodable for SubTxRegisterPayload {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let version = u16::consensus_decode(r)?;
        let user_name = String::consensus_decode(r)?;
        let pub_key_id = PubkeyHash::consensus_decode(r)?;
        let vch_sig = Vec::<u8>::consensus_decode(r)?;
        Ok(SubTxRegisterPayload {
            version,
            user_name,
            pub_key_id,
            vch_sig,
        })
    }
}
