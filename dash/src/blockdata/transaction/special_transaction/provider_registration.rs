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

//! Dash Provider Registration Special Transaction.
//!
//! The provider registration special transaction is used to register a masternode.
//! It is defined in DIP3 [dip-0003](https://github.com/dashpay/dips/blob/master/dip-0003.md).
//!
//! The ProRegTx contains 3 public key IDs, which represent 3 different roles in the masternode
//! and define update and voting rights. A "public key ID" refers to the hash160 of an ECDSA
//! public key. The keys are:
//!
//! KeyIdOwner (owner_key_hash): This is the public key ID of the masternode or collateral
//! owner. It is different than the key used in the collateral output. Only the owner is
//! allowed to issue ProUpRegTx transactions.
//!
//! KeyIdOperator (operator_key_hash): This is the public key ID of the masternode operator.
//! Only the operator is allowed to issue ProUpServTx and ProUpRevTx transactions.
//!
//! KeyIdVoting (voting_key_hash): This is the public key ID used for proposal voting.
//! Votes signed with this key are valid while the masternode is in the registered set.

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
use crate::hash_types::{InputsHash, PubkeyHash, ServiceIpAddress};
use crate::io;
use crate::validation::{JsonRecord, expect_at_most, expect_compact_signature};

/// The largest operator reward, in hundredths of a percent.
pub const MAX_OPERATOR_REWARD: u16 = 10000;

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub enum ProviderMasternodeType {
    #[default]
    Regular = 0,
    HighPerformance = 1,
}

impl TryFrom<u16> for ProviderMasternodeType {
    type Error = encode::Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ProviderMasternodeType::Regular),
            1 => Ok(ProviderMasternodeType::HighPerformance),
            received => Err(encode::Error::InvalidEnumValue {
                max: 1,
                received,
                msg: "Invalid MasternodeType variant".to_string(),
            }),
        }
    }
}

impl Encodable for ProviderMasternodeType {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        (*self as u16).consensus_encode(w)
    }
}

impl Decodable for ProviderMasternodeType {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        ProviderMasternodeType::try_from(u16::consensus_decode(r)?)
    }
}

/// A Provider Registration Payload used in a Provider Registration Special Transaction.
/// This is used to register a Masternode on the network.
/// Interesting Fields:
/// *Provider type refers to the type of Masternode.
/// *Provider mode refers to the mode of the Masternode. Currently only valid value is 0.
/// *The collateral index points at the output of this transaction holding the 1000 Dash
/// collateral.
/// *The operator reward defines the ratio when divided by 10000 of the amount going to the operator.
/// The max value for the operator reward is 10000.
/// *The script payout is the script to which one wants to have the masternode pay out.
/// *The inputs hash is used to guarantee the uniqueness of the payload sig.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct ProviderRegistrationPayload {
    pub version: u16,
    pub masternode_type: ProviderMasternodeType,
    pub masternode_mode: u16,
    pub collateral_index: u32,
    pub ip_address: ServiceIpAddress,
    pub port: u16,
    pub protocol_version: u32,
    pub owner_key_hash: PubkeyHash,
    pub operator_key_hash: PubkeyHash,
    pub voting_key_hash: PubkeyHash,
    pub operator_reward: u16,
    pub script_payout: Vec<u8>,
    pub inputs_hash: InputsHash,
    pub payload_sig: Vec<u8>,
}

impl Default for ProviderRegistrationPayload {
    fn default() -> Self {
        ProviderRegistrationPayload {
            version: 1,
            masternode_type: ProviderMasternodeType::Regular,
            masternode_mode: 0,
            collateral_index: 0,
            ip_address: ServiceIpAddress::all_zeros(),
            port: 0,
            protocol_version: 0,
            owner_key_hash: PubkeyHash::all_zeros(),
            operator_key_hash: PubkeyHash::all_zeros(),
            voting_key_hash: PubkeyHash::all_zeros(),
            operator_reward: 0,
            script_payout: Vec::new(),
            inputs_hash: InputsHash::all_zeros(),
            payload_sig: Vec::new(),
        }
    }
}

impl ProviderRegistrationPayload {
    /// The masternode service address.
    pub fn service_address(&self) -> SocketAddr { self.ip_address.to_socket_addr(self.port) }

    /// Sets the IP address and port from a socket address.
    pub fn set_service_address(&mut self, address: SocketAddr) -> &mut Self {
        self.ip_address = ServiceIpAddress::from(address.ip());
        self.port = address.port();
        self
    }
}

impl SpecialTransactionPayload for ProviderRegistrationPayload {
    const TRANSACTION_TYPE: TransactionType = TransactionType::ProviderRegistration;

    fn validate(&self) -> Result<(), Error> {
        expect_at_most("operatorReward", self.operator_reward.into(), MAX_OPERATOR_REWARD.into())?;
        expect_compact_signature("payloadSig", &self.payload_sig)
    }

    fn encode_with_options<W: io::Write + ?Sized>(
        &self,
        w: &mut W,
        options: EncodeOptions,
    ) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += self.masternode_type.consensus_encode(w)?;
        len += self.masternode_mode.consensus_encode(w)?;
        len += self.collateral_index.consensus_encode(w)?;
        len += self.ip_address.consensus_encode(w)?;
        len += write_u16_be(w, self.port)?;
        len += self.protocol_version.consensus_encode(w)?;
        len += self.owner_key_hash.consensus_encode(w)?;
        len += self.operator_key_hash.consensus_encode(w)?;
        len += self.voting_key_hash.consensus_encode(w)?;
        len += self.operator_reward.consensus_encode(w)?;
        len += self.script_payout.consensus_encode(w)?;
        len += self.inputs_hash.consensus_encode(w)?;
        len += encode_signature(&self.payload_sig, options, w)?;
        Ok(len)
    }

    fn to_json_with_options(&self, options: EncodeOptions) -> Value {
        let mut fields = Map::new();
        fields.insert("version".into(), json!(self.version));
        fields.insert("type".into(), json!(self.masternode_type as u16));
        fields.insert("mode".into(), json!(self.masternode_mode));
        fields.insert("collateralIndex".into(), json!(self.collateral_index));
        fields.insert("ipAddress".into(), json!(self.ip_address.to_hex()));
        fields.insert("port".into(), json!(self.port));
        fields.insert("protocolVersion".into(), json!(self.protocol_version));
        fields.insert("keyIdOwner".into(), json!(self.owner_key_hash.to_hex()));
        fields.insert("keyIdOperator".into(), json!(self.operator_key_hash.to_hex()));
        fields.insert("keyIdVoting".into(), json!(self.voting_key_hash.to_hex()));
        fields.insert("operatorReward".into(), json!(self.operator_reward));
        fields.insert("scriptPayout".into(), json!(hex::encode(&self.script_payout)));
        fields.insert("inputsHash".into(), json!(self.inputs_hash.to_hex()));
        insert_signature(&mut fields, Self::SIGNATURE_FIELD, &self.payload_sig, options);
        Value::Object(fields)
    }

    fn from_json_record(record: &JsonRecord) -> Result<Self, Error> {
        let masternode_type = ProviderMasternodeType::try_from(record.u16("type")?)
            .map_err(|e| Error::invalid_argument("type", "a masternode type", e.to_string()))?;
        Ok(ProviderRegistrationPayload {
            version: record.u16("version")?,
            masternode_type,
            masternode_mode: record.u16("mode")?,
            collateral_index: record.u32("collateralIndex")?,
            ip_address: record.parse("ipAddress")?,
            port: record.u16("port")?,
            protocol_version: record.u32("protocolVersion")?,
            owner_key_hash: record.parse("keyIdOwner")?,
            operator_key_hash: record.parse("keyIdOperator")?,
            voting_key_hash: record.parse("keyIdVoting")?,
            operator_reward: record.u16("operatorReward")?,
            script_payout: record.hex_bytes("scriptPayout")?,
            inputs_hash: record.parse("inputsHash")?,
            payload_sig: record.signature(Self::SIGNATURE_FIELD)?,
        })
    }

    /// The size of the payload in bytes.
    /// version(2) + provider_type(2) + provider_mode(2) + collateral_index(4) + ip_address(16) +
    /// port(2) + protocol_version(4) + owner_key_hash(20) + operator_key_hash(20) +
    /// voting_key_hash(20) + operator_reward(2) +
    /// script_payout(VarInt(script_payout_len).len() + script_payout_len) +
    /// inputs_hash(32) +
    /// payload_sig(VarInt(payload_sig_len).len() + payload_sig_len)
    fn size(&self) -> usize {
        let mut size = 2 + 2 + 2 + 4 + 16 + 2 + 4 + 20 + 20 + 20 + 2 + 32; // 126 bytes
        size += var_bytes_size(&self.script_payout);
        size += var_bytes_size(&self.payload_sig);
        size
    }
}

impl SignedPayload for ProviderRegistrationPayload {
    const SIGNATURE_FIELD: &'static str = "payloadSig";

    fn signature(&self) -> &[u8] { &self.payload_sig }

    fn set_signature(&mut self, signature: Vec<u8>) { self.payload_sig = signature; }
}

impl_payload_encodable!(ProviderRegistrationPayload);

impl Decodable for ProviderRegistrationPayload {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let version = u16::consensus_decode(r)?;
        let masternode_type = ProviderMasternodeType::consensus_decode(r)?;
        let masternode_mode = u16::consensus_decode(r)?;
        let collateral_index = u32::consensus_decode(r)?;
        let ip_address = ServiceIpAddress::consensus_decode(r)?;
        let port = read_u16_be(r)?;
        let protocol_version = u32::consensus_decode(r)?;
        let owner_key_hash = PubkeyHash::consensus_decode(r)?;
        let operator_key_hash = PubkeyHash::consensus_decode(r)?;
        let voting_key_hash = PubkeyHash::consensus_decode(r)?;
        let operator_reward = u16::consensus_decode(r)?;
        let script_payout = Vec::<u8>::consensus_decode(r)?;
        let inputs_hash = InputsHash::consensus_decode(r)?;
        let payload_sig = Vec::<u8>::consensus_decode(r)?;

        Ok(ProviderRegistrationPayload {
            version,
            masternode_type,
            masternode_mode,
            collateral_index,
            ip_address,
            port,
            protocol_version,
            owner_key_hash,
            operator_key_hash,
            voting_key_hash,
            operator_reward,
            script_payout,
            inputs_hash,
            payload_sig,
        })
    }
}
