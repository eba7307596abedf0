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

//! Dash User Reset Key Subtransaction.
//!
//! Replaces the key controlling a user identity. The payload is signed with the user's current
//! key; `newPubKey` takes effect once the subtransaction is mined. Each subtransaction links to
//! the previous one of the same user through `hashPrevSubTx`.

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
use crate::hash_types::{PubkeyHash, RegTxHash, SubTxHash};
use crate::io;
use crate::validation::{JsonRecord, expect_compact_signature};

/// Payload of a user key reset subtransaction.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct SubTxResetKeyPayload {
    pub version: u16,
    pub reg_tx_hash: RegTxHash,
    pub hash_prev_sub_tx: SubTxHash,
    /// Credits charged to the user for this subtransaction, in duffs.
    pub credit_fee: u64,
    pub new_pub_key_id: PubkeyHash,
    pub payload_sig: Vec<u8>,
}

impl Default for SubTxResetKeyPayload {
    fn default() -> Self {
        SubTxResetKeyPayload {
            version: 1,
            reg_tx_hash: RegTxHash::all_zeros(),
            hash_prev_sub_tx: SubTxHash::all_zeros(),
            credit_fee: 0,
            new_pub_key_id: PubkeyHash::all_zeros(),
            payload_sig: Vec::new(),
        }
    }
}

impl SubTxResetKeyPayload {
    /// Sets the user from the display-order hex of its registration hash.
    pub fn set_reg_tx_hash(&mut self, reg_tx_hash: &str) -> Result<&mut Self, Error> {
        self.reg_tx_hash = RegTxHash::from_hex(reg_tx_hash)?;
        Ok(self)
    }

    /// Sets the previous subtransaction of the user from display-order hex.
    pub fn set_hash_prev_sub_tx(&mut self, hash_prev_sub_tx: &str) -> Result<&mut Self, Error> {
        self.hash_prev_sub_tx = SubTxHash::from_hex(hash_prev_sub_tx)?;
        Ok(self)
    }

    /// Sets the credits charged for this subtransaction, in duffs.
    pub fn set_credit_fee(&mut self, credit_fee: u64) -> &mut Self {
        self.credit_fee = credit_fee;
        self
    }

    /// Sets the identity of the key that replaces the current one.
    pub fn set_new_pub_key(&mut self, new_pub_key_id: PubkeyHash) -> &mut Self {
        self.new_pub_key_id = new_pub_key_id;
        self
    }

    /// Sets the replacement key to the public key of `key`.
    pub fn set_new_pub_key_from_private_key(&mut self, key: &PrivateKey) -> &mut Self {
        self.new_pub_key_id = key.pubkey_hash();
        self
    }
}

impl SpecialTransactionPayload for SubTxResetKeyPayload {
    const TRANSACTION_TYPE: TransactionType = TransactionType::SubTxResetKey;

    fn validate(&self) -> Result<(), Error> { expect_compact_signature("payloadSig", &self.payload_sig) }

    fn encode_with_options<W: io::Write + ?Sized>(
        &self,
        w: &mut W,
        options: EncodeOptions,
    ) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += self.reg_tx_hash.consensus_encode(w)?;
        len += self.hash_prev_sub_tx.consensus_encode(w)?;
        len += self.credit_fee.consensus_encode(w)?;
        len += self.new_pub_key_id.consensus_encode(w)?;
        len += encode_signature(&self.payload_sig, options, w)?;
        Ok(len)
    }

    fn to_json_with_options(&self, options: EncodeOptions) -> Value {
        let mut fields = Map::new();
        fields.insert("version".into(), json!(self.version));
        fields.insert("regTxHash".into(), json!(self.reg_tx_hash.to_hex()));
        fields.insert("hashPrevSubTx".into(), json!(self.hash_prev_sub_tx.to_hex()));
        fields.insert("creditFee".into(), json!(self.credit_fee));
        fields.insert("newPubKey".into(), json!(self.new_pub_key_id.to_hex()));
        insert_signature(&mut fields, Self::SIGNATURE_FIELD, &self.payload_sig, options);
        Value::Object(fields)
    }

    fn from_json_record(record: &JsonRecord) -> Result<Self, Error> {
        Ok(SubTxResetKeyPayload {
            version: record.u16("version")?,
            reg_tx_hash: record.parse("regTxHash")?,
            hash_prev_sub_tx: record.parse("hashPrevSubTx")?,
            credit_fee: record.u64("creditFee")?,
            new_pub_key_id: record.parse("newPubKey")?,
            payload_sig: record.signature(Self::SIGNATURE_FIELD)?,
        })
    }

    fn size(&self) -> usize { 2 + 32 + 32 + 8 + 20 + var_bytes_size(&self.payload_sig) }
}

impl SignedPayload for SubTxResetKeyPayload {
    const SIGNATURE_FIELD: &'static str = "payloadSig";

    fn signature(&self) -> &[u8] { &self.payload_sig }

    fn set_signature(&mut self, signature: Vec<u8>) { self.payload_sig = signature; }
}

impl_payload_encodable!(SubTxResetKeyPayload);

impl Decodable for SubTxResetKeyPayload {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let version = u16::consensus_decode(r)?;
        let reg_tx_hash = RegTxHash::consensus_decode(r)?;
        let hash_prev_sub_tx = SubTxHash::consensus_decode(r)?;
        let credit_fee = u64::consensus_decode(r)?;
        let new_pub_key_id = PubkeyHash::consensus_decode(r)?;
        let payload_sig = Vec::<u8>::consensus_decode(r)?;
        Ok(SubTxResetKeyPayload {
            version,
            reg_tx_hash,
            hash_prev_sub_tx,
            credit_fee,
            new_pub_key_id,
            payload_sig,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::test_utils::payload::{signer_key, test_subtx_reset_key_payload};

    #[test]
    fn test_layout() {
        let payload = test_subtx_reset_key_payload();
        let bytes = payload.to_bytes(EncodeOptions::default()).unwrap();
        assert_eq!(bytes.len(), 95);
        assert_eq!(payload.size(), 95);
        // credit fee, little endian
        assert_eq!(bytes[66..74], 1000u64.to_le_bytes());
        assert_eq!(bytes[74..94], payload.new_pub_key_id.to_byte_array());
        assert_eq!(bytes[94], 0);
        assert_eq!(SubTxResetKeyPayload::from_bytes(&bytes).unwrap(), payload);
    }

    #[test]
    fn test_signed_by_current_key() {
        let current = signer_key(61);
        let next = signer_key(62);
        let mut payload = test_subtx_reset_key_payload();
        payload.set_new_pub_key_from_private_key(&next).sign(current).unwrap();

        let decoded =
            SubTxResetKeyPayload::from_hex(&payload.to_hex(EncodeOptions::default()).unwrap())
                .unwrap();
        assert_eq!(decoded.new_pub_key_id, next.pubkey_hash());
        assert!(decoded.verify_signature(&current.pubkey_hash()));
        assert!(!decoded.verify_signature(&next.pubkey_hash()));
    }

    #[test]
    fn test_credit_fee_json() {
        let mut record =
            test_subtx_reset_key_payload().to_json(EncodeOptions::default()).unwrap();
        assert_eq!(record["creditFee"], json!(1000));
        record["creditFee"] = json!(-1);
        assert_matches!(
            SubTxResetKeyPayload::from_json(&record),
            Err(Error::InvalidArgument { field: "creditFee", .. })
        );
        record["creditFee"] = json!(u64::MAX);
        assert_eq!(SubTxResetKeyPayload::from_json(&record).unwrap().credit_fee, u64::MAX);
    }
}
