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

//! Dash Quorum Commitment Special Transaction.
//!
//! It is defined in DIP6 [dip-0006.md](https://github.com/dashpay/dips/blob/master/dip-0006.md).
//!
//! The `signers` and `validMembers` bitsets are carried as opaque bytes; nothing here reads
//! individual bits.

use hashes::Hash;
use serde_json::{Value, json};

use crate::Error;
use crate::blockdata::transaction::special_transaction::TransactionType;
use crate::blockdata::transaction::special_transaction::payload::{
    EncodeOptions, SpecialTransactionPayload, var_bytes_size,
};
use crate::bls_sig_utils::{BLSPublicKey, BLSSignature};
use crate::consensus::{Decodable, Encodable, encode};
use crate::hash_types::{QuorumHash, QuorumVVecHash};
use crate::io;
use crate::validation::JsonRecord;

/// A Quorum Commitment Payload used in a Quorum Commitment Special Transaction.
/// This is used in the mining phase as described in DIP 6:
/// [dip-0006.md#7-mining-phase](https://github.com/dashpay/dips/blob/master/dip-0006.md#7-mining-phase).
///
/// Miners take the best final commitment for a DKG session and mine it into a block. The
/// commitment itself is described in the finalization section of DIP6:
/// [dip-0006.md#6-finalization-phase](https://github.com/dashpay/dips/blob/master/dip-0006.md#6-finalization-phase)
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct QuorumCommitmentPayload {
    pub version: u16,
    pub height: u32,
    pub commitment_version: u16,
    pub llmq_type: u8,
    pub quorum_hash: QuorumHash,
    pub signers: Vec<u8>,
    pub valid_members: Vec<u8>,
    pub quorum_public_key: BLSPublicKey,
    pub quorum_vvec_hash: QuorumVVecHash,
    pub quorum_sig: BLSSignature,
    pub sig: BLSSignature,
}

impl Default for QuorumCommitmentPayload {
    fn default() -> Self {
        QuorumCommitmentPayload {
            version: 1,
            height: 0,
            commitment_version: 0,
            llmq_type: 0,
            quorum_hash: QuorumHash::all_zeros(),
            signers: Vec::new(),
            valid_members: Vec::new(),
            quorum_public_key: BLSPublicKey::all_zeros(),
            quorum_vvec_hash: QuorumVVecHash::all_zeros(),
            quorum_sig: BLSSignature::all_zeros(),
            sig: BLSSignature::all_zeros(),
        }
    }
}

impl SpecialTransactionPayload for QuorumCommitmentPayload {
    const TRANSACTION_TYPE: TransactionType = TransactionType::QuorumCommitment;

    fn validate(&self) -> Result<(), Error> { Ok(()) }

    fn encode_with_options<W: io::Write + ?Sized>(
        &self,
        w: &mut W,
        _options: EncodeOptions,
    ) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += self.height.consensus_encode(w)?;
        len += self.commitment_version.consensus_encode(w)?;
        len += self.llmq_type.consensus_encode(w)?;
        len += self.quorum_hash.consensus_encode(w)?;
        len += self.signers.consensus_encode(w)?;
        len += self.valid_members.consensus_encode(w)?;
        len += self.quorum_public_key.consensus_encode(w)?;
        len += self.quorum_vvec_hash.consensus_encode(w)?;
        len += self.quorum_sig.consensus_encode(w)?;
        len += self.sig.consensus_encode(w)?;
        Ok(len)
    }

    fn to_json_with_options(&self, _options: EncodeOptions) -> Value {
        json!({
            "version": self.version,
            "height": self.height,
            "qfcVersion": self.commitment_version,
            "llmqType": self.llmq_type,
            "quorumHash": self.quorum_hash.to_hex(),
            "signers": hex::encode(&self.signers),
            "validMembers": hex::encode(&self.valid_members),
            "quorumPublicKey": self.quorum_public_key.to_hex(),
            "quorumVvecHash": self.quorum_vvec_hash.to_hex(),
            "quorumSig": self.quorum_sig.to_hex(),
            "sig": self.sig.to_hex(),
        })
    }

    fn from_json_record(record: &JsonRecord) -> Result<Self, Error> {
        Ok(QuorumCommitmentPayload {
            version: record.u16("version")?,
            height: record.u32("height")?,
            commitment_version: record.u16("qfcVersion")?,
            llmq_type: record.u8("llmqType")?,
            quorum_hash: record.parse("quorumHash")?,
            signers: record.hex_bytes("signers")?,
            valid_members: record.hex_bytes("validMembers")?,
            quorum_public_key: record.parse("quorumPublicKey")?,
            quorum_vvec_hash: record.parse("quorumVvecHash")?,
            quorum_sig: record.parse("quorumSig")?,
            sig: record.parse("sig")?,
        })
    }

    /// The size of the payload in bytes.
    fn size(&self) -> usize {
        let mut size = 2 + 4 + 2 + 1 + 32 + 64 + 32 + 96 + 96;
        size += var_bytes_size(&self.signers);
        size += var_bytes_size(&self.valid_members);
        size
    }
}

impl_payload_encodable!(QuorumCommitmentPayload);

impl Decodable for QuorumCommitmentPayload {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let version = u16::consensus_decode(r)?;
        let height = u32::consensus_decode(r)?;
        let commitment_version = u16::consensus_decode(r)?;
        let llmq_type = u8::consensus_decode(r)?;
        let quorum_hash = QuorumHash::consensus_decode(r)?;
        let signers = Vec::<u8>::consensus_decode(r)?;
        let valid_members = Vec::<u8>::consensus_decode(r)?;
        let quorum_public_key = BLSPublicKey::consensus_decode(r)?;
        let quorum_vvec_hash = QuorumVVecHash::consensus_decode(r)?;
        let quorum_sig = BLSSignature::consensus_decode(r)?;
        let sig = BLSSignature::consensus_decode(r)?;
        Ok(QuorumCommitmentPayload {
            version,
            height,
            commitment_version,
            llmq_type,
            quorum_hash,
            signers,
            valid_members,
            quorum_public_key,
            quorum_vvec_hash,
            quorum_sig,
            sig,
        })
    }
}
