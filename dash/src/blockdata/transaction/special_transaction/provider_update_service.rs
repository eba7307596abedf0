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

//! Dash Provider Update Service Special Transaction.
//!
//! The provider update service special transaction is used to update the operator controlled
//! options for a masternode.
//!
//! It is defined in DIP3 [dip-0003](https://github.com/dashpay/dips/blob/master/dip-0003.md) as follows:
//!
//! To service update a masternode, the masternode operator must submit another special
//! transaction (DIP2) to the network. This special transaction is called a Provider Update
//! Service Transaction and is abbreviated as ProUpServTx. It can only be done by the operator.
//!
//! An operator can update the IP address and port fields of a masternode entry. If a non-zero
//! operatorReward was set in the initial ProRegTx, the operator may also set the
//! scriptOperatorPayout field in the ProUpServTx. If scriptOperatorPayout is not set and
//! operatorReward is non-zero, the owner gets the full masternode reward.
//!
//! A ProUpServTx is only valid for masternodes in the registered masternodes subset. When
//! processed, it updates the metadata of the masternode entry and revives the masternode if it was
//! previously marked as PoSe-banned.
//!
//! The special transaction type used for ProUpServTx Transactions is 2.

use std::net::SocketAddr;

use hashes::Hash;
use serde_json::{Map, Value, json};

use crate::Error;
use crate::blockdata::transaction::special_transaction::TransactionType;
use crate::blockdata::transaction::special_transaction::payload::{
    EncodeOptions, SignedPayload, SpecialTransactionPayload, encode_signature, insert_signature,
    var_bytes_size,
};
use crate::consensus::encode::{read_u16_be, write_u16_be};
use crate::consensus::{Decodable, Encodable, encode};
use crate::hash_types::{InputsHash, ProTxHash, ServiceIpAddress};
use crate::io;
use crate::validation::{JsonRecord, expect_compact_signature};

/// A Provider Update Service Payload used in a Provider Update Service Special Transaction.
/// This is used to update the operational aspects a Masternode on the network.
/// It must be signed by the operator's key that was set either at registration or by the last
/// registrar update of the masternode.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct ProviderUpdateServicePayload {
    pub version: u16,
    pub pro_tx_hash: ProTxHash,
    pub protocol_version: u32,
    pub ip_address: ServiceIpAddress,
    pub port: u16,
    pub script_operator_payout: Vec<u8>,
    pub inputs_hash: InputsHash,
    pub payload_sig: Vec<u8>,
}

impl Default for ProviderUpdateServicePayload {
    fn default() -> Self {
        ProviderUpdateServicePayload {
            version: 1,
            pro_tx_hash: ProTxHash::all_zeros(),
            protocol_version: 0,
            ip_address: ServiceIpAddress::all_zeros(),
            port: 0,
            script_operator_payout: Vec::new(),
            inputs_hash: InputsHash::all_zeros(),
            payload_sig: Vec::new(),
        }
    }
}

impl ProviderUpdateServicePayload {
    /// The masternode service address.
    pub fn service_address(&self) -> SocketAddr { self.ip_address.to_socket_addr(self.port) }

    /// Sets the IP address and port from a socket address.
    pub fn set_service_address(&mut self, address: SocketAddr) -> &mut Self {
        self.ip_address = ServiceIpAddress::from(address.ip());
        self.port = address.port();
        self
    }
}

impl SpecialTransactionPayload for ProviderUpdateServicePayload {
    const TRANSACTION_TYPE: TransactionType = TransactionType::ProviderUpdateService;

    fn validate(&self) -> Result<(), Error> { expect_compact_signature("payloadSig", &self.payload_sig) }

    fn encode_with_options<W: io::Write + ?Sized>(
        &self,
        w: &mut W,
        options: EncodeOptions,
    ) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += self.pro_tx_hash.consensus_encode(w)?;
        len += self.protocol_version.consensus_encode(w)?;
        len += self.ip_address.consensus_encode(w)?;
        len += write_u16_be(w, self.port)?;
        len += self.script_operator_payout.consensus_encode(w)?;
        len += self.inputs_hash.consensus_encode(w)?;
        len += encode_signature(&self.payload_sig, options, w)?;
        Ok(len)
    }

    fn to_json_with_options(&self, options: EncodeOptions) -> Value {
        let mut fields = Map::new();
        fields.insert("version".into(), json!(self.version));
        fields.insert("proTXHash".into(), json!(self.pro_tx_hash.to_hex()));
        fields.insert("protocolVersion".into(), json!(self.protocol_version));
        fields.insert("ipAddress".into(), json!(self.ip_address.to_hex()));
        fields.insert("port".into(), json!(self.port));
        fields.insert("scriptOperatorPayout".into(), json!(hex::encode(&self.script_operator_payout)));
        fields.insert("inputsHash".into(), json!(self.inputs_hash.to_hex()));
        insert_signature(&mut fields, Self::SIGNATURE_FIELD, &self.payload_sig, options);
        Value::Object(fields)
    }

    fn from_json_record(record: &JsonRecord) -> Result<Self, Error> {
        Ok(ProviderUpdateServicePayload {
            version: record.u16("version")?,
            pro_tx_hash: record.parse("proTXHash")?,
            protocol_version: record.u32("protocolVersion")?,
            ip_address: record.parse("ipAddress")?,
            port: record.u16("port")?,
            script_operator_payout: record.hex_bytes("scriptOperatorPayout")?,
            inputs_hash: record.parse("inputsHash")?,
            payload_sig: record.signature(Self::SIGNATURE_FIELD)?,
        })
    }

    /// The size of the payload in bytes.
    fn size(&self) -> usize {
        let mut size = 2 + 32 + 4 + 16 + 2 + 32; // 88
        size += var_bytes_size(&self.script_operator_payout);
        size += var_bytes_size(&self.payload_sig);
        size
    }
}

impl SignedPayload for ProviderUpdateServicePayload {
    const SIGNATURE_FIELD: &'static str = "payloadSig";

    fn signature(&self) -> &[u8] { &self.payload_sig }

    fn set_signature(&mut self, signature: Vec<u8>) { self.payload_sig = signature; }
}

impl_payload_encodable!(ProviderUpdateServicePayload);

impl Decodable for ProviderUpdateServicePayload {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let version = u16::consensus_decode(r)?;
        let pro_tx_hash = ProTxHash::consensus_decode(r)?;
        let protocol_version = u32::consensus_decode(r)?;
        let ip_address = ServiceIpAddress::consensus_decode(r)?;
        let port = read_u16_be(r)?;
        let script_operator_payout = Vec::<u8>::consensus_decode(r)?;
        let inputs_hash = InputsHash::consensus_decode(r)?;
        let payload_sig = Vec::<u8>::consensus_decode(r)?;

        Ok(ProviderUpdateServicePayload {
            version,
            pro_tx_hash,
            protocol_version,
            ip_address,
            port,
            script_operator_payout,
            inputs_hash,
            payload_sig,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use hex_lit::hex;

    use super::*;
    use crate::test_utils::payload::{signer_key, test_provider_update_service_payload};

    const UNSIGNED_PAYLOAD: [u8; 115] = hex!(
        "0100ca9a43051750da7c5f858008f2ff7732d15691e48eb7f845c791e5dca78bab584312010000000000000000000000ffff010205064e1f1976a9144ee1d4e5d61ac40a13b357ac6e368997079678c888ac517b2230689fcc1412cce13ab9e18eac62054060c2a93a510001255603555fe600"
    );

    #[test]
    fn test_fixture() {
        let payload = ProviderUpdateServicePayload::from_bytes(&UNSIGNED_PAYLOAD).unwrap();
        assert_eq!(
            payload.pro_tx_hash.to_hex(),
            "58ab8ba7dce591c745f8b78ee49156d13277fff20880855f7cda501705439aca"
        );
        assert_eq!(payload.service_address().to_string(), "1.2.5.6:19999");
        assert_eq!(payload.protocol_version, 70211);
        assert_eq!(payload, test_provider_update_service_payload());
        assert_eq!(payload.size(), UNSIGNED_PAYLOAD.len());
        assert_eq!(payload.to_string(), hex::encode(UNSIGNED_PAYLOAD));
    }

    #[test]
    fn test_operator_signature() {
        let operator = signer_key(21);
        let mut payload = test_provider_update_service_payload();
        payload.sign(operator).unwrap();

        let record = payload.to_json(EncodeOptions::default()).unwrap();
        let from_json = ProviderUpdateServicePayload::from_json(&record).unwrap();
        assert_eq!(from_json, payload);
        assert!(from_json.verify_signature(&operator.pubkey_hash()));

        let bytes = payload.to_bytes(EncodeOptions::default()).unwrap();
        let mut tampered = ProviderUpdateServicePayload::from_bytes(&bytes).unwrap();
        tampered.port = 19998;
        assert!(!tampered.verify_signature(&operator.pubkey_hash()));
    }

    #[test]
    fn test_rejects_trailing_bytes() {
        let mut bytes = UNSIGNED_PAYLOAD.to_vec();
        bytes.extend_from_slice(&[0, 0]);
        assert_matches!(
            ProviderUpdateServicePayload::from_bytes(&bytes),
            Err(Error::Encode(encode::Error::TrailingData {
                remaining: 2
            }))
        );
    }
}
