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

//! Dash Provider Update Registrar Special Transaction.
//!
//! The provider update registrar special transaction is used to update the owner controlled
//! options for a masternode.
//!
//! It is defined in DIP3 [dip-0003](https://github.com/dashpay/dips/blob/master/dip-0003.md) as follows:
//!
//! To registrar update a masternode, the masternode owner must submit another special transaction
//! (DIP2) to the network. This special transaction is called a Provider Update Registrar
//! Transaction and is abbreviated as ProUpRegTx. It can only be done by the owner.
//!
//! A ProUpRegTx is only valid for masternodes in the registered masternodes subset. When
//! processed, it updates the metadata of the masternode entry. It does not revive masternodes
//! previously marked as PoSe-banned.
//!
//! The special transaction type used for ProUpRegTx Transactions is 3.
//!
//! The `mode` field that DIP3 reserves in this payload is not part of the wire layout here.

use hashes::Hash;
use serde_json::{Map, Value, json};

use crate::Error;
use crate::blockdata::transaction::special_transaction::TransactionType;
use crate::blockdata::transaction::special_transaction::payload::{
    EncodeOptions, SignedPayload, SpecialTransactionPayload, encode_signature, insert_signature,
    var_bytes_size,
};
use crate::consensus::{Decodable, Encodable, encode};
use crate::hash_types::{InputsHash, ProTxHash, PubkeyHash};
use crate::io;
use crate::validation::{JsonRecord, expect_compact_signature};

/// A Provider Update Registrar Payload used in a Provider Update Registrar Special Transaction.
/// This is used to update the base aspects a Masternode on the network.
/// It must be signed by the owner's key that was set at registration.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct ProviderUpdateRegistrarPayload {
    pub version: u16,
    pub pro_tx_hash: ProTxHash,
    pub operator_key_hash: PubkeyHash,
    pub voting_key_hash: PubkeyHash,
    pub script_payout: Vec<u8>,
    pub inputs_hash: InputsHash,
    pub payload_sig: Vec<u8>,
}

impl Default for ProviderUpdateRegistrarPayload {
    fn default() -> Self {
        ProviderUpdateRegistrarPayload {
            version: 1,
            pro_tx_hash: ProTxHash::all_zeros(),
            operator_key_hash: PubkeyHash::all_zeros(),
            voting_key_hash: PubkeyHash::all_zeros(),
            script_payout: Vec::new(),
            inputs_hash: InputsHash::all_zeros(),
            payload_sig: Vec::new(),
        }
    }
}

impl SpecialTransactionPayload for ProviderUpdateRegistrarPayload {
    const TRANSACTION_TYPE: TransactionType = TransactionType::ProviderUpdateRegistrar;

    fn validate(&self) -> Result<(), Error> { expect_compact_signature("payloadSig", &self.payload_sig) }

    fn encode_with_options<W: io::Write + ?Sized>(
        &self,
        w: &mut W,
        options: EncodeOptions,
    ) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += self.pro_tx_hash.consensus_encode(w)?;
        len += self.operator_key_hash.consensus_encode(w)?;
        len += self.voting_key_hash.consensus_encode(w)?;
        len += self.script_payout.consensus_encode(w)?;
        len += self.inputs_hash.consensus_encode(w)?;
        len += encode_signature(&self.payload_sig, options, w)?;
        Ok(len)
    }

    fn to_json_with_options(&self, options: EncodeOptions) -> Value {
        let mut fields = Map::new();
        fields.insert("version".into(), json!(self.version));
        fields.insert("proTXHash".into(), json!(self.pro_tx_hash.to_hex()));
        fields.insert("keyIdOperator".into(), json!(self.operator_key_hash.to_hex()));
        fields.insert("keyIdVoting".into(), json!(self.voting_key_hash.to_hex()));
        fields.insert("scriptPayout".into(), json!(hex::encode(&self.script_payout)));
        fields.insert("inputsHash".into(), json!(self.inputs_hash.to_hex()));
        insert_signature(&mut fields, Self::SIGNATURE_FIELD, &self.payload_sig, options);
        Value::Object(fields)
    }

    fn from_json_record(record: &JsonRecord) -> Result<Self, Error> {
        Ok(ProviderUpdateRegistrarPayload {
            version: record.u16("version")?,
            pro_tx_hash: record.parse("proTXHash")?,
            operator_key_hash: record.parse("keyIdOperator")?,
            voting_key_hash: record.parse("keyIdVoting")?,
            script_payout: record.hex_bytes("scriptPayout")?,
            inputs_hash: record.parse("inputsHash")?,
            payload_sig: record.signature(Self::SIGNATURE_FIELD)?,
        })
    }

    fn size(&self) -> usize {
        2 + 32 + 20 + 20 + 32 + var_bytes_size(&self.script_payout) + var_bytes_size(&self.payload_sig)
    }
}

impl SignedPayload for ProviderUpdateRegistrarPayload {
    const SIGNATURE_FIELD: &'static str = "payloadSig";

    fn signature(&self) -> &[u8] { &self.payload_sig }

    fn set_signature(&mut self, signature: Vec<u8>) { self.payload_sig = signature; }
}

impl_payload_encodable!(ProviderUpdateRegistrarPayload);

impl Decodable for ProviderUpdateRegistrarPayload {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let version = u16::consensus_decode(r)?;
        let pro_tx_hash = ProTxHash::consensus_decode(r)?;
        let operator_key_hash = PubkeyHash::consensus_decode(r)?;
        let voting_key_hash = PubkeyHash::consensus_decode(r)?;
        let script_payout = Vec::<u8>::consensus_decode(r)?;
        let inputs_hash = InputsHash::consensus_decode(r)?;
        let payload_sig = Vec::<u8>::consensus_decode(r)?;

        Ok(ProviderUpdateRegistrarPayload {
            version,
            pro_tx_hash,
            operator_key_hash,
            voting_key_hash,
            script_payout,
            inputs_hash,
            payload_sig,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use hex_lit::hex;
    use serde_json::json;

    use super::*;
    use crate::test_utils::payload::{signer_key, test_provider_update_registrar_payload};

    const UNSIGNED_PAYLOAD: [u8; 133] = hex!(
        "0100ca9a43051750da7c5f858008f2ff7732d15691e48eb7f845c791e5dca78bab58157b10706659e25eb362b5d902d809f9160b16884ee1d4e5d61ac40a13b357ac6e368997079678c81976a9144fbc8fb6e11e253d77e5a9c987418e89cf4a63d288ac517b2230689fcc1412cce13ab9e18eac62054060c2a93a510001255603555fe600"
    );

    #[test]
    fn test_fixture() {
        let payload = ProviderUpdateRegistrarPayload::from_bytes(&UNSIGNED_PAYLOAD).unwrap();
        assert_eq!(payload, test_provider_update_registrar_payload());
        assert_eq!(
            payload.operator_key_hash.to_hex(),
            "157b10706659e25eb362b5d902d809f9160b1688"
        );
        assert_eq!(payload.size(), UNSIGNED_PAYLOAD.len());
        assert_eq!(payload.to_bytes(EncodeOptions::default()).unwrap(), UNSIGNED_PAYLOAD);
    }

    #[test]
    fn test_json_record_and_signature() {
        let owner = signer_key(31);
        let mut payload = test_provider_update_registrar_payload();
        payload.sign(owner).unwrap();

        let record = payload.to_json(EncodeOptions::default()).unwrap();
        assert_eq!(record["proTXHash"], json!("58ab8ba7dce591c745f8b78ee49156d13277fff20880855f7cda501705439aca"));
        assert_eq!(record["payloadSig"].as_str().map(str::len), Some(130));

        let copy = payload.copy().unwrap();
        assert_eq!(copy, payload);
        assert!(copy.verify_signature(&owner.pubkey_hash()));
    }

    #[test]
    fn test_wrong_key_id_length() {
        let mut record = test_provider_update_registrar_payload()
            .to_json(EncodeOptions::default())
            .unwrap();
        record["keyIdOperator"] = json!("157b10706659e25eb362b5d902d809f9160b168800");
        assert_matches!(
            ProviderUpdateRegistrarPayload::from_json(&record),
            Err(Error::InvalidArgument { field: "keyIdOperator", .. })
        );
    }
}
