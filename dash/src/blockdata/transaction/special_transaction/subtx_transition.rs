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

//! Dash State Transition Subtransaction.
//!
//! Commits a user's state transition packet to the chain. Only the packet hash is carried; the
//! packet itself travels separately.

use hashes::Hash;
use serde_json::{Map, Value, json};

use crate::Error;
use crate::blockdata::transaction::special_transaction::TransactionType;
use crate::blockdata::transaction::special_transaction::payload::{
    EncodeOptions, SignedPayload, SpecialTransactionPayload, encode_signature, insert_signature,
    var_bytes_size,
};
use crate::consensus::{Decodable, Encodable, encode};
use crate::hash_types::{RegTxHash, STPacketHash, SubTxHash};
use crate::io;
use crate::validation::{JsonRecord, expect_compact_signature};

/// Payload of a state transition subtransaction.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct SubTxTransitionPayload {
    pub version: u16,
    pub reg_tx_id: RegTxHash,
    pub hash_prev_sub_tx: SubTxHash,
    pub credit_fee: u64,
    pub hash_st_packet: STPacketHash,
    pub vch_sig: Vec<u8>,
}

impl Default for SubTxTransitionPayload {
    fn default() -> Self {
        SubTxTransitionPayload {
            version: 1,
            reg_tx_id: RegTxHash::all_zeros(),
            hash_prev_sub_tx: SubTxHash::all_zeros(),
            credit_fee: 0,
            hash_st_packet: STPacketHash::all_zeros(),
            vch_sig: Vec::new(),
        }
    }
}

impl SubTxTransitionPayload {
    /// Sets the user from the display-order hex of its registration hash.
    pub fn set_reg_tx_id(&mut self, reg_tx_id: &str) -> Result<&mut Self, Error> {
        self.reg_tx_id = RegTxHash::from_hex(reg_tx_id)?;
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

    /// Sets the state transition packet hash from display-order hex.
    pub fn set_hash_st_packet(&mut self, hash_st_packet: &str) -> Result<&mut Self, Error> {
        self.hash_st_packet = STPacketHash::from_hex(hash_st_packet)?;
        Ok(self)
    }
}

impl SpecialTransactionPayload for SubTxTransitionPayload {
    const TRANSACTION_TYPE: TransactionType = TransactionType::SubTxTransition;

    fn validate(&self) -> Result<(), Error> { expect_compact_signature("vchSig", &self.vch_sig) }

    fn encode_with_options<W: io::Write + ?Sized>(
        &self,
        w: &mut W,
        options: EncodeOptions,
    ) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += self.reg_tx_id.consensus_encode(w)?;
        len += self.hash_prev_sub_tx.consensus_encode(w)?;
        len += self.credit_fee.consensus_encode(w)?;
        len += self.hash_st_packet.consensus_encode(w)?;
        len += encode_signature(&self.vch_sig, options, w)?;
        Ok(len)
    }

    fn to_json_with_options(&self, options: EncodeOptions) -> Value {
        let mut fields = Map::new();
        fields.insert("version".into(), json!(self.version));
        fields.insert("regTxId".into(), json!(self.reg_tx_id.to_hex()));
        fields.insert("hashPrevSubTx".into(), json!(self.hash_prev_sub_tx.to_hex()));
        fields.insert("creditFee".into(), json!(self.credit_fee));
        fields.insert("hashSTPacket".into(), json!(self.hash_st_packet.to_hex()));
        insert_signature(&mut fields, Self::SIGNATURE_FIELD, &self.vch_sig, options);
        Value::Object(fields)
    }

    fn from_json_record(record: &JsonRecord) -> Result<Self, Error> {
        Ok(SubTxTransitionPayload {
            version: record.u16("version")?,
            reg_tx_id: record.parse("regTxId")?,
            hash_prev_sub_tx: record.parse("hashPrevSubTx")?,
            credit_fee: record.u64("creditFee")?,
            hash_st_packet: record.parse("hashSTPacket")?,
            vch_sig: record.signature(Self::SIGNATURE_FIELD)?,
        })
    }

    fn size(&self) -> usize { 2 + 32 + 32 + 8 + 32 + var_bytes_size(&self.vch_sig) }
}

impl SignedPayload for SubTxTransitionPayload {
    const SIGNATURE_FIELD: &'static str = "vchSig";

    fn signature(&self) -> &[u8] { &self.vch_sig }

    fn set_signature(&mut self, signature: Vec<u8>) { self.vch_sig = signature; }
}

impl_payload_encodable!(SubTxTransitionPayload);

impl Decodable for SubTxTransitionPayload {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let version = u16::consensus_decode(r)?;
        let reg_tx_id = RegTxHash::consensus_decode(r)?;
        let hash_prev_sub_tx = SubTxHash::consensus_decode(r)?;
        let credit_fee = u64::consensus_decode(r)?;
        let hash_st_packet = STPacketHash::consensus_decode(r)?;
        let vch_sig = Vec::<u8>::consensus_decode(r)?;
        Ok(SubTxTransitionPayload {
            version,
            reg_tx_id,
            hash_prev_sub_tx,
            credit_fee,
            hash_st_packet,
            vch_sig,
        })
    }
}
