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

//! Dash Provider Update Revocation Special Transaction.
//!
//! The provider update revocation special transaction is used to signal the termination of
//! service by the operator, or that the operator keys have to be replaced.
//!
//! It is defined in DIP3 [dip-0003](https://github.com/dashpay/dips/blob/master/dip-0003.md).
//! A ProUpRevTx must be signed by the operator. Once processed, the masternode is put into the
//! PoSe-banned state until the owner issues a ProUpRegTx with new operator keys.
//!
//! The special transaction type used for ProUpRevTx Transactions is 4.

use core::fmt;

use hashes::Hash;
use serde_json::{Map, Value, json};

use crate::Error;
use crate::blockdata::transaction::special_transaction::TransactionType;
use crate::blockdata::transaction::special_transaction::payload::{
    EncodeOptions, SignedPayload, SpecialTransactionPayload, encode_signature, insert_signature,
    var_bytes_size,
};
use crate::consensus::{Decodable, Encodable, encode};
use crate::hash_types::{InputsHash, ProTxHash};
use crate::io;
use crate::validation::{JsonRecord, expect_compact_signature};

/// Why the operator gave up the masternode.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
#[repr(u16)]
pub enum RevocationReason {
    #[default]
    NotSpecified = 0,
    TerminationOfService = 1,
    CompromisedKeys = 2,
    ChangeOfKeys = 3,
}

impl TryFrom<u16> for RevocationReason {
    type Error = encode::Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RevocationReason::NotSpecified),
            1 => Ok(RevocationReason::TerminationOfService),
            2 => Ok(RevocationReason::CompromisedKeys),
            3 => Ok(RevocationReason::ChangeOfKeys),
            received => Err(encode::Error::InvalidEnumValue {
                max: RevocationReason::ChangeOfKeys as u16,
                received,
                msg: "Invalid revocation reason".to_string(),
            }),
        }
    }
}

impl fmt::Display for RevocationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevocationReason::NotSpecified => f.write_str("not specified"),
            RevocationReason::TerminationOfService => f.write_str("termination of service"),
            RevocationReason::CompromisedKeys => f.write_str("compromised keys"),
            RevocationReason::ChangeOfKeys => f.write_str("change of keys"),
        }
    }
}

impl Encodable for RevocationReason {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        (*self as u16).consensus_encode(w)
    }
}

impl Decodable for RevocationReason {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        RevocationReason::try_from(u16::consensus_decode(r)?)
    }
}

/// A Provider Update Revocation Payload used in a Provider Update Revocation Special Transaction.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct ProviderUpdateRevocationPayload {
    pub version: u16,
    pub pro_tx_hash: ProTxHash,
    pub reason: RevocationReason,
    pub inputs_hash: InputsHash,
    pub payload_sig: Vec<u8>,
}

impl Default for ProviderUpdateRevocationPayload {
    fn default() -> Self {
        ProviderUpdateRevocationPayload {
            version: 1,
            pro_tx_hash: ProTxHash::all_zeros(),
            reason: RevocationReason::NotSpecified,
            inputs_hash: InputsHash::all_zeros(),
            payload_sig: Vec::new(),
        }
    }
}

impl SpecialTransactionPayload for ProviderUpdateRevocationPayload {
    const TRANSACTION_TYPE: TransactionType = TransactionType::ProviderUpdateRevocation;

    fn validate(&self) -> Result<(), Error> { expect_compact_signature("payloadSig", &self.payload_sig) }

    fn encode_with_options<W: io::Write + ?Sized>(
        &self,
        w: &mut W,
        options: EncodeOptions,
    ) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += self.pro_tx_hash.consensus_encode(w)?;
        len += self.reason.consensus_encode(w)?;
        len += self.inputs_hash.consensus_encode(w)?;
        len += encode_signature(&self.payload_sig, options, w)?;
        Ok(len)
    }

    fn to_json_with_options(&self, options: EncodeOptions) -> Value {
        let mut fields = Map::new();
        fields.insert("version".into(), json!(self.version));
        fields.insert("proTXHash".into(), json!(self.pro_tx_hash.to_hex()));
        fields.insert("reason".into(), json!(self.reason as u16));
        fields.insert("inputsHash".into(), json!(self.inputs_hash.to_hex()));
        insert_signature(&mut fields, Self::SIGNATURE_FIELD, &self.payload_sig, options);
        Value::Object(fields)
    }

    fn from_json_record(record: &JsonRecord) -> Result<Self, Error> {
        let reason = RevocationReason::try_from(record.u16("reason")?)
            .map_err(|e| Error::invalid_argument("reason", "a revocation reason", e.to_string()))?;
        Ok(ProviderUpdateRevocationPayload {
            version: record.u16("version")?,
            pro_tx_hash: record.parse("proTXHash")?,
            reason,
            inputs_hash: record.parse("inputsHash")?,
            payload_sig: record.signature(Self::SIGNATURE_FIELD)?,
        })
    }

    /// version(2) + pro_tx_hash(32) + reason(2) + inputs_hash(32) + payload_sig
    fn size(&self) -> usize { 2 + 32 + 2 + 32 + var_bytes_size(&self.payload_sig) }
}

impl SignedPayload for ProviderUpdateRevocationPayload {
    const SIGNATURE_FIELD: &'static str = "payloadSig";

    fn signature(&self) -> &[u8] { &self.payload_sig }

    fn set_signature(&mut self, signature: Vec<u8>) { self.payload_sig = signature; }
}

impl_payload_encodable!(ProviderUpdateRevocationPayload);

impl Decodable for ProviderUpdateRevocationPayload {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let version = u16::consensus_decode(r)?;
        let pro_tx_hash = ProTxHash::consensus_decode(r)?;
        let reason = RevocationReason::consensus_decode(r)?;
        let inputs_hash = InputsHash::consensus_decode(r)?;
        let payload_sig = Vec::<u8>::consensus_decode(r)?;

        Ok(ProviderUpdateRevocationPayload {
            version,
            pro_tx_hash,
            reason,
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
    use crate::test_utils::payload::{signer_key, test_provider_update_revocation_payload};

    const UNSIGNED_PAYLOAD: [u8; 69] = hex!(
        "0100ca9a43051750da7c5f858008f2ff7732d15691e48eb7f845c791e5dca78bab580200517b2230689fcc1412cce13ab9e18eac62054060c2a93a510001255603555fe600"
    );

    #[test]
    fn test_fixture() {
        let payload = ProviderUpdateRevocationPayload::from_bytes(&UNSIGNED_PAYLOAD).unwrap();
        assert_eq!(payload.reason, RevocationReason::CompromisedKeys);
        assert_eq!(payload, test_provider_update_revocation_payload());
        assert_eq!(payload.size(), 69);
        assert_eq!(
            payload.to_json(EncodeOptions::default()).unwrap(),
            json!({
                "version": 1,
                "proTXHash": "58ab8ba7dce591c745f8b78ee49156d13277fff20880855f7cda501705439aca",
                "reason": 2,
                "inputsHash": "e65f550356250100513aa9c260400562ac8ee1b93ae1cc1214cc9f6830227b51",
            })
        );
    }

    #[test]
    fn test_unknown_reason() {
        let mut bytes = UNSIGNED_PAYLOAD;
        bytes[34] = 4;
        assert_matches!(
            ProviderUpdateRevocationPayload::from_bytes(&bytes),
            Err(Error::Encode(encode::Error::InvalidEnumValue { received: 4, .. }))
        );

        let mut record =
            test_provider_update_revocation_payload().to_json(EncodeOptions::default()).unwrap();
        record["reason"] = json!(4);
        assert_matches!(
            ProviderUpdateRevocationPayload::from_json(&record),
            Err(Error::InvalidArgument { field: "reason", .. })
        );
    }

    #[test]
    fn test_sign_and_verify() {
        let operator = signer_key(41);
        let mut payload = test_provider_update_revocation_payload();
        payload.sign(operator).unwrap().reason = RevocationReason::ChangeOfKeys;
        // the signature covered the previous reason
        assert!(!payload.verify_signature(&operator.pubkey_hash()));
        payload.sign(operator).unwrap();
        assert!(payload.verify_signature(&operator.pubkey_hash()));
        assert_eq!(RevocationReason::ChangeOfKeys.to_string(), "change of keys");
    }
}
