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

//! Dash User Topup Subtransaction.
//!
//! Funds a registered user's credit balance. The payload only names the user; it is not signed.

use hashes::Hash;
use serde_json::{Value, json};

use crate::Error;
use crate::blockdata::transaction::special_transaction::TransactionType;
use crate::blockdata::transaction::special_transaction::payload::{
    EncodeOptions, SpecialTransactionPayload,
};
use crate::consensus::{Decodable, Encodable, encode};
use crate::hash_types::RegTxHash;
use crate::io;
use crate::validation::JsonRecord;

/// Payload of a user topup subtransaction.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct SubTxTopupPayload {
    pub version: u16,
    pub reg_tx_hash: RegTxHash,
}

impl Default for SubTxTopupPayload {
    fn default() -> Self {
        SubTxTopupPayload {
            version: 1,
            reg_tx_hash: RegTxHash::all_zeros(),
        }
    }
}

impl SubTxTopupPayload {
    /// Sets the user being funded from a display-order hex hash.
    pub fn set_reg_tx_hash(&mut self, reg_tx_hash: &str) -> Result<&mut Self, Error> {
        self.reg_tx_hash = RegTxHash::from_hex(reg_tx_hash)?;
        Ok(self)
    }
}

impl SpecialTransactionPayload for SubTxTopupPayload {
    const TRANSACTION_TYPE: TransactionType = TransactionType::SubTxTopup;

    fn validate(&self) -> Result<(), Error> { Ok(()) }

    fn encode_with_options<W: io::Write + ?Sized>(
        &self,
        w: &mut W,
        _options: EncodeOptions,
    ) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += self.reg_tx_hash.consensus_encode(w)?;
        Ok(len)
    }

    fn to_json_with_options(&self, _options: EncodeOptions) -> Value {
        json!({
            "version": self.version,
            "regTxHash": self.reg_tx_hash.to_hex(),
        })
    }

    fn from_json_record(record: &JsonRecord) -> Result<Self, Error> {
        Ok(SubTxTopupPayload {
            version: record.u16("version")?,
            reg_tx_hash: record.parse("regTxHash")?,
        })
    }

    fn size(&self) -> usize { 2 + 32 }
}

impl_payload_encodable!(SubTxTopupPayload);

impl Decodable for SubTxTopupPayload {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let version = u16::consensus_decode(r)?;
        let reg_tx_hash = RegTxHash::consensus_decode(r)?;
        Ok(SubTxTopupPayload {
            version,
            reg_tx_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use hex_lit::hex;
    use serde_json::json;

    use super::*;
    use crate::test_utils::payload::test_subtx_topup_payload;

    const PAYLOAD: [u8; 34] =
        hex!("0100d4ad2eb8ae0e4b3b54437d4ac3a0ba9e2b9a4e0e0b6b6a2b1d7a0f6a3ba01c23");

    #[test]
    fn test_fixture() {
        let payload = SubTxTopupPayload::from_bytes(&PAYLOAD).unwrap();
        assert_eq!(payload, test_subtx_topup_payload());
        assert_eq!(
            payload.to_json(EncodeOptions::default()).unwrap(),
            json!({
                "version": 1,
                "regTxHash": "231ca03b6a0f7a1d2b6a6b0b0e4e9a2b9ebaa0c34a7d43543b4b0eaeb82eadd4",
            })
        );
        assert_eq!(payload.size(), 34);
        assert_eq!(payload.to_hex(EncodeOptions::default()).unwrap(), hex::encode(PAYLOAD));
    }

    #[test]
    fn test_setter_and_errors() {
        let mut payload = SubTxTopupPayload::default();
        payload
            .set_reg_tx_hash("231ca03b6a0f7a1d2b6a6b0b0e4e9a2b9ebaa0c34a7d43543b4b0eaeb82eadd4")
            .unwrap();
        assert_eq!(payload, test_subtx_topup_payload());

        assert_matches!(
            payload.set_reg_tx_hash("231ca03b"),
            Err(Error::InvalidArgument { .. })
        );
        assert_matches!(
            SubTxTopupPayload::from_bytes(&PAYLOAD[..33]),
            Err(Error::Encode(encode::Error::Underrun))
        );
        assert_matches!(
            SubTxTopupPayload::from_json(&json!({ "version": 1 })),
            Err(Error::InvalidArgument { field: "regTxHash", .. })
        );
    }
}
