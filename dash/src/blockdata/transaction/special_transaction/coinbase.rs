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

//! Dash Coinbase Special Transaction.
//!
//! Each time a block is mined it includes a coinbase special transaction.
//! It is defined in DIP4 [dip-0004](https://github.com/dashpay/dips/blob/master/dip-0004.md).
//!

use hashes::Hash;
use serde_json::{Value, json};

use crate::Error;
use crate::blockdata::transaction::special_transaction::TransactionType;
use crate::blockdata::transaction::special_transaction::payload::{
    EncodeOptions, SpecialTransactionPayload,
};
use crate::consensus::{Decodable, Encodable, encode};
use crate::hash_types::MerkleRootMasternodeList;
use crate::io;
use crate::validation::JsonRecord;

/// A Coinbase payload. This is contained as the payload of a coinbase special transaction.
/// The Coinbase payload is described in DIP4.
///
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct CoinbasePayload {
    pub version: u16,
    pub height: u32,
    pub merkle_root_masternode_list: MerkleRootMasternodeList,
}

impl Default for CoinbasePayload {
    fn default() -> Self {
        CoinbasePayload {
            version: 1,
            height: 0,
            merkle_root_masternode_list: MerkleRootMasternodeList::all_zeros(),
        }
    }
}

impl SpecialTransactionPayload for CoinbasePayload {
    const TRANSACTION_TYPE: TransactionType = TransactionType::Coinbase;

    fn validate(&self) -> Result<(), Error> { Ok(()) }

    fn encode_with_options<W: io::Write + ?Sized>(
        &self,
        w: &mut W,
        _options: EncodeOptions,
    ) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += self.height.consensus_encode(w)?;
        len += self.merkle_root_masternode_list.consensus_encode(w)?;
        Ok(len)
    }

    fn to_json_with_options(&self, _options: EncodeOptions) -> Value {
        json!({
            "version": self.version,
            "height": self.height,
            "merkleRootMNList": self.merkle_root_masternode_list.to_hex(),
        })
    }

    fn from_json_record(record: &JsonRecord) -> Result<Self, Error> {
        Ok(CoinbasePayload {
            version: record.u16("version")?,
            height: record.u32("height")?,
            merkle_root_masternode_list: record.parse("merkleRootMNList")?,
        })
    }

    /// The size of the payload in bytes.
    /// version(2) + height(4) + merkle_root_masternode_list(32)
    fn size(&self) -> usize { 2 + 4 + 32 }
}

impl_payload_encodable!(CoinbasePayload);

impl Decodable for CoinbasePayload {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let version = u16::consensus_decode(r)?;
        let height = u32::consensus_decode(r)?;
        let merkle_root_masternode_list = MerkleRootMasternodeList::consensus_decode(r)?;
        Ok(CoinbasePayload {
            version,
            height,
            merkle_root_masternode_list,
        })
    }
}
