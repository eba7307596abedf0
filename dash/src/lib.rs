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

//! # Rust Dash Special Transaction Payloads
//!
//! Special transactions (DIP2) carry a typed payload next to the usual inputs and outputs.
//! This library constructs, parses, validates, signs and serializes those payloads:
//!
//! * provider transactions (DIP3): ProRegTx, ProUpServTx, ProUpRegTx, ProUpRevTx,
//! * the coinbase payload (DIP4) and quorum commitments (DIP6),
//! * identity subtransactions: SubTxRegister, SubTxTopup, SubTxResetKey,
//!   SubTxCloseAccount and SubTxTransition.
//!
//! Every payload has three representations that must agree: the consensus wire encoding,
//! a JSON record with hashes in display order, and the double-SHA256 hash that payload
//! signatures commit to.
//!
//! ```rust
//! use dashcore_payloads::{CoinbasePayload, EncodeOptions, SpecialTransactionPayload};
//!
//! let raw = hex::decode(concat!(
//!     "0a0014000000",
//!     "b91b8a22e7fbe0c4c48ee2baf48c3e5a9f4e16c0a8a8af09ef6d2bb5f1e43ce8"
//! )).unwrap();
//! let payload = CoinbasePayload::from_bytes(&raw).unwrap();
//! assert_eq!(payload.height, 20);
//! assert_eq!(payload.to_bytes(EncodeOptions::default()).unwrap(), raw);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "serde")]
#[macro_use]
extern crate actual_serde as serde;

#[macro_use]
mod internal_macros;

pub mod blockdata;
pub mod bls_sig_utils;
pub mod consensus;
pub mod crypto;
pub mod error;
pub mod hash_types;
pub mod signer;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;

pub(crate) use std::io;

pub use dash_network::Network;
pub use hashes;
pub use secp256k1;

pub use crate::blockdata::transaction::special_transaction;
pub use crate::blockdata::transaction::special_transaction::coinbase::CoinbasePayload;
pub use crate::blockdata::transaction::special_transaction::payload::{
    EncodeOptions, PayloadSource, SignedPayload, SpecialTransactionPayload,
};
pub use crate::blockdata::transaction::special_transaction::provider_registration::{
    ProviderMasternodeType, ProviderRegistrationPayload,
};
pub use crate::blockdata::transaction::special_transaction::provider_update_registrar::ProviderUpdateRegistrarPayload;
pub use crate::blockdata::transaction::special_transaction::provider_update_revocation::{
    ProviderUpdateRevocationPayload, RevocationReason,
};
pub use crate::blockdata::transaction::special_transaction::provider_update_service::ProviderUpdateServicePayload;
pub use crate::blockdata::transaction::special_transaction::quorum_commitment::QuorumCommitmentPayload;
pub use crate::blockdata::transaction::special_transaction::subtx_close_account::SubTxCloseAccountPayload;
pub use crate::blockdata::transaction::special_transaction::subtx_register::SubTxRegisterPayload;
pub use crate::blockdata::transaction::special_transaction::subtx_reset_key::SubTxResetKeyPayload;
pub use crate::blockdata::transaction::special_transaction::subtx_topup::SubTxTopupPayload;
pub use crate::blockdata::transaction::special_transaction::subtx_transition::SubTxTransitionPayload;
pub use crate::blockdata::transaction::special_transaction::{TransactionPayload, TransactionType};
pub use crate::bls_sig_utils::{BLSPublicKey, BLSSignature};
pub use crate::consensus::encode::VarInt;
pub use crate::crypto::key::PrivateKey;
pub use crate::error::Error;
pub use crate::hash_types::{
    InputsHash, MerkleRootMasternodeList, ProTxHash, PubkeyHash, QuorumHash, QuorumVVecHash,
    RegTxHash, STPacketHash, ServiceIpAddress, SpecialTransactionPayloadHash, SubTxHash,
};
pub use crate::signer::SignerKey;
