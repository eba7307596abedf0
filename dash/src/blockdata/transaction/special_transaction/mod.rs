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

//! Dash Special Transaction.
//!
//! A dash special transaction's purpose is to relay more data than just economic information.
//! They are defined in DIP2 [dip-0002](https://github.com/dashpay/dips/blob/master/dip-0002.md).
//! The list of special transactions can be found here:
//! [dip-0002-special-transactions](https://github.com/dashpay/dips/blob/master/dip-0002-special-transactions.md)
//!
//! A transaction carries its special transaction type as a number next to the payload bytes.
//! [`TransactionPayload`] resolves that number to the concrete payload type, so code handling
//! transactions does not need to know which payload it carries.

use core::fmt::{Debug, Display, Formatter};

use serde_json::Value;
use tracing::trace;

use crate::Error;
use crate::blockdata::transaction::special_transaction::TransactionPayload::{
    CoinbasePayloadType, ProviderRegistrationPayloadType, ProviderUpdateRegistrarPayloadType,
    ProviderUpdateRevocationPayloadType, ProviderUpdateServicePayloadType,
    QuorumCommitmentPayloadType, SubTxCloseAccountPayloadType, SubTxRegisterPayloadType,
    SubTxResetKeyPayloadType, SubTxTopupPayloadType, SubTxTransitionPayloadType,
};
use crate::blockdata::transaction::special_transaction::coinbase::CoinbasePayload;
use crate::blockdata::transaction::special_transaction::payload::{
    EncodeOptions, PayloadSource, SignedPayload, SpecialTransactionPayload,
};
use crate::blockdata::transaction::special_transaction::provider_registration::ProviderRegistrationPayload;
use crate::blockdata::transaction::special_transaction::provider_update_registrar::ProviderUpdateRegistrarPayload;
use crate::blockdata::transaction::special_transaction::provider_update_revocation::ProviderUpdateRevocationPayload;
use crate::blockdata::transaction::special_transaction::provider_update_service::ProviderUpdateServicePayload;
use crate::blockdata::transaction::special_transaction::quorum_commitment::QuorumCommitmentPayload;
use crate::blockdata::transaction::special_transaction::subtx_close_account::SubTxCloseAccountPayload;
use crate::blockdata::transaction::special_transaction::subtx_register::SubTxRegisterPayload;
use crate::blockdata::transaction::special_transaction::subtx_reset_key::SubTxResetKeyPayload;
use crate::blockdata::transaction::special_transaction::subtx_topup::SubTxTopupPayload;
use crate::blockdata::transaction::special_transaction::subtx_transition::SubTxTransitionPayload;
use crate::consensus::{Decodable, Encodable, encode};
use crate::hash_types::{PubkeyHash, SpecialTransactionPayloadHash};
use crate::io;
use crate::signer::SignerKey;

pub mod coinbase;
pub mod payload;
pub mod provider_registration;
pub mod provider_update_registrar;
pub mod provider_update_revocation;
pub mod provider_update_service;
pub mod quorum_commitment;
pub mod subtx_close_account;
pub mod subtx_register;
pub mod subtx_reset_key;
pub mod subtx_topup;
pub mod subtx_transition;

/// An enum wrapper around various special transaction payloads.
/// Special transactions are defined in DIP 2.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub enum TransactionPayload {
    /// A wrapper for a Masternode Registration payload
    ProviderRegistrationPayloadType(ProviderRegistrationPayload),
    /// A wrapper for a Masternode Update Service payload
    ProviderUpdateServicePayloadType(ProviderUpdateServicePayload),
    /// A wrapper for a Masternode Update Registrar payload
    ProviderUpdateRegistrarPayloadType(ProviderUpdateRegistrarPayload),
    /// A wrapper for a Masternode Update Revocation payload
    ProviderUpdateRevocationPayloadType(ProviderUpdateRevocationPayload),
    /// A wrapper for a Coinbase payload
    CoinbasePayloadType(CoinbasePayload),
    /// A wrapper for a Quorum Commitment payload
    QuorumCommitmentPayloadType(QuorumCommitmentPayload),
    /// A wrapper for a user identity registration payload
    SubTxRegisterPayloadType(SubTxRegisterPayload),
    /// A wrapper for a user identity top-up payload
    SubTxTopupPayloadType(SubTxTopupPayload),
    /// A wrapper for a user identity key reset payload
    SubTxResetKeyPayloadType(SubTxResetKeyPayload),
    /// A wrapper for a user identity close payload
    SubTxCloseAccountPayloadType(SubTxCloseAccountPayload),
    /// A wrapper for a user identity state transition payload
    SubTxTransitionPayloadType(SubTxTransitionPayload),
}

impl Encodable for TransactionPayload {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        dispatch_payload!(self, p => p.consensus_encode(w))
    }
}

impl Display for TransactionPayload {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        dispatch_payload!(self, p => Display::fmt(p, f))
    }
}

macro_rules! impl_payload_conversion {
    ($fn_name:ident, $variant:ident, $payload:ty, $ty:ident) => {
        #[doc = concat!("Convenience method that assumes the payload is a `", stringify!($payload), "`.")]
        ///
        /// Returns an error if the payload is of another type.
        pub fn $fn_name(self) -> Result<$payload, Error> {
            if let $variant(payload) = self {
                Ok(payload)
            } else {
                Err(Error::WrongPayloadConversion {
                    expected: TransactionType::$ty,
                    actual: self.get_type(),
                })
            }
        }
    };
}

impl TransactionPayload {
    /// Gets the Transaction Type for a Special Transaction Payload
    pub fn get_type(&self) -> TransactionType {
        dispatch_payload!(self, p => payload_type_of(p))
    }

    /// Decodes the payload registered for `tag` from consensus bytes.
    pub fn parse_bytes(tag: u16, bytes: &[u8]) -> Result<Self, Error> {
        Self::parse(tag, PayloadSource::Bytes(bytes))
    }

    /// Reads the payload registered for `tag` from its JSON record.
    pub fn parse_json(tag: u16, value: &Value) -> Result<Self, Error> {
        Self::parse(tag, PayloadSource::Json(value))
    }

    /// Builds the payload registered for `tag` from any accepted input.
    pub fn parse(tag: u16, source: PayloadSource) -> Result<Self, Error> {
        let ty = registered_type(tag)?;
        trace!(%ty, "parsing special transaction payload");
        Ok(match ty {
            TransactionType::ProviderRegistration => {
                ProviderRegistrationPayload::from_source(source)?.into()
            }
            TransactionType::ProviderUpdateService => {
                ProviderUpdateServicePayload::from_source(source)?.into()
            }
            TransactionType::ProviderUpdateRegistrar => {
                ProviderUpdateRegistrarPayload::from_source(source)?.into()
            }
            TransactionType::ProviderUpdateRevocation => {
                ProviderUpdateRevocationPayload::from_source(source)?.into()
            }
            TransactionType::Coinbase => CoinbasePayload::from_source(source)?.into(),
            TransactionType::QuorumCommitment => QuorumCommitmentPayload::from_source(source)?.into(),
            TransactionType::SubTxRegister => SubTxRegisterPayload::from_source(source)?.into(),
            TransactionType::SubTxTopup => SubTxTopupPayload::from_source(source)?.into(),
            TransactionType::SubTxResetKey => SubTxResetKeyPayload::from_source(source)?.into(),
            TransactionType::SubTxCloseAccount => {
                SubTxCloseAccountPayload::from_source(source)?.into()
            }
            TransactionType::SubTxTransition => SubTxTransitionPayload::from_source(source)?.into(),
            TransactionType::Classic => return Err(Error::UnknownType(tag)),
        })
    }

    /// A default payload of the type registered for `tag`.
    pub fn create(tag: u16) -> Result<Self, Error> {
        let ty = registered_type(tag)?;
        trace!(%ty, "creating special transaction payload");
        Ok(match ty {
            TransactionType::ProviderRegistration => ProviderRegistrationPayload::default().into(),
            TransactionType::ProviderUpdateService => ProviderUpdateServicePayload::default().into(),
            TransactionType::ProviderUpdateRegistrar => {
                ProviderUpdateRegistrarPayload::default().into()
            }
            TransactionType::ProviderUpdateRevocation => {
                ProviderUpdateRevocationPayload::default().into()
            }
            TransactionType::Coinbase => CoinbasePayload::default().into(),
            TransactionType::QuorumCommitment => QuorumCommitmentPayload::default().into(),
            TransactionType::SubTxRegister => SubTxRegisterPayload::default().into(),
            TransactionType::SubTxTopup => SubTxTopupPayload::default().into(),
            TransactionType::SubTxResetKey => SubTxResetKeyPayload::default().into(),
            TransactionType::SubTxCloseAccount => SubTxCloseAccountPayload::default().into(),
            TransactionType::SubTxTransition => SubTxTransitionPayload::default().into(),
            TransactionType::Classic => return Err(Error::UnknownType(tag)),
        })
    }

    /// Whether this payload is the one registered for `tag`.
    pub fn has_correct_type(&self, tag: u16) -> bool {
        TransactionType::try_from(tag).is_ok_and(|ty| ty == self.get_type())
    }

    /// Checks every field invariant of the payload.
    pub fn validate(&self) -> Result<(), Error> { dispatch_payload!(self, p => p.validate()) }

    /// The size of the consensus encoding in bytes.
    pub fn size(&self) -> usize { dispatch_payload!(self, p => p.size()) }

    /// The consensus encoding.
    pub fn to_bytes(&self, options: EncodeOptions) -> Result<Vec<u8>, Error> {
        dispatch_payload!(self, p => p.to_bytes(options))
    }

    /// The JSON record.
    pub fn to_json(&self, options: EncodeOptions) -> Result<Value, Error> {
        dispatch_payload!(self, p => p.to_json(options))
    }

    /// Double-SHA256 of the consensus encoding.
    pub fn hash(&self, options: EncodeOptions) -> Result<SpecialTransactionPayloadHash, Error> {
        dispatch_payload!(self, p => p.hash(options))
    }

    /// Signs the payload; fails with [`Error::Unsignable`] for payloads without an ECDSA
    /// signature.
    pub fn sign<'a>(&mut self, key: impl Into<SignerKey<'a>>) -> Result<&mut Self, Error> {
        match self {
            ProviderRegistrationPayloadType(p) => p.sign(key).map(drop)?,
            ProviderUpdateServicePayloadType(p) => p.sign(key).map(drop)?,
            ProviderUpdateRegistrarPayloadType(p) => p.sign(key).map(drop)?,
            ProviderUpdateRevocationPayloadType(p) => p.sign(key).map(drop)?,
            SubTxRegisterPayloadType(p) => p.sign(key).map(drop)?,
            SubTxResetKeyPayloadType(p) => p.sign(key).map(drop)?,
            SubTxCloseAccountPayloadType(p) => p.sign(key).map(drop)?,
            SubTxTransitionPayloadType(p) => p.sign(key).map(drop)?,
            CoinbasePayloadType(_) | QuorumCommitmentPayloadType(_) | SubTxTopupPayloadType(_) => {
                return Err(Error::Unsignable(self.get_type()));
            }
        }
        Ok(self)
    }

    /// Whether the payload carries a signature made by the key with this identity.
    ///
    /// Always `false` for payloads without an ECDSA signature.
    pub fn verify_signature(&self, key_id: &PubkeyHash) -> bool {
        match self {
            ProviderRegistrationPayloadType(p) => p.verify_signature(key_id),
            ProviderUpdateServicePayloadType(p) => p.verify_signature(key_id),
            ProviderUpdateRegistrarPayloadType(p) => p.verify_signature(key_id),
            ProviderUpdateRevocationPayloadType(p) => p.verify_signature(key_id),
            SubTxRegisterPayloadType(p) => p.verify_signature(key_id),
            SubTxResetKeyPayloadType(p) => p.verify_signature(key_id),
            SubTxCloseAccountPayloadType(p) => p.verify_signature(key_id),
            SubTxTransitionPayloadType(p) => p.verify_signature(key_id),
            CoinbasePayloadType(_) | QuorumCommitmentPayloadType(_) | SubTxTopupPayloadType(_) => {
                false
            }
        }
    }

    impl_payload_conversion!(
        to_provider_registration_payload,
        ProviderRegistrationPayloadType,
        ProviderRegistrationPayload,
        ProviderRegistration
    );
    impl_payload_conversion!(
        to_update_service_payload,
        ProviderUpdateServicePayloadType,
        ProviderUpdateServicePayload,
        ProviderUpdateService
    );
    impl_payload_conversion!(
        to_update_registrar_payload,
        ProviderUpdateRegistrarPayloadType,
        ProviderUpdateRegistrarPayload,
        ProviderUpdateRegistrar
    );
    impl_payload_conversion!(
        to_update_revocation_payload,
        ProviderUpdateRevocationPayloadType,
        ProviderUpdateRevocationPayload,
        ProviderUpdateRevocation
    );
    impl_payload_conversion!(to_coinbase_payload, CoinbasePayloadType, CoinbasePayload, Coinbase);
    impl_payload_conversion!(
        to_quorum_commitment_payload,
        QuorumCommitmentPayloadType,
        QuorumCommitmentPayload,
        QuorumCommitment
    );
    impl_payload_conversion!(
        to_subtx_register_payload,
        SubTxRegisterPayloadType,
        SubTxRegisterPayload,
        SubTxRegister
    );
    impl_payload_conversion!(to_subtx_topup_payload, SubTxTopupPayloadType, SubTxTopupPayload, SubTxTopup);
    impl_payload_conversion!(
        to_subtx_reset_key_payload,
        SubTxResetKeyPayloadType,
        SubTxResetKeyPayload,
        SubTxResetKey
    );
    impl_payload_conversion!(
        to_subtx_close_account_payload,
        SubTxCloseAccountPayloadType,
        SubTxCloseAccountPayload,
        SubTxCloseAccount
    );
    impl_payload_conversion!(
        to_subtx_transition_payload,
        SubTxTransitionPayloadType,
        SubTxTransitionPayload,
        SubTxTransition
    );
}

fn payload_type_of<P: SpecialTransactionPayload>(_: &P) -> TransactionType { P::TRANSACTION_TYPE }

/// Resolves a tag to a type that has a payload.
fn registered_type(tag: u16) -> Result<TransactionType, Error> {
    match TransactionType::try_from(tag) {
        Ok(TransactionType::Classic) | Err(_) => {
            tracing::debug!(tag, "no payload registered for special transaction type");
            Err(Error::UnknownType(tag))
        }
        Ok(ty) => Ok(ty),
    }
}

macro_rules! impl_from_payload {
    ($payload:ty, $variant:ident) => {
        impl From<$payload> for TransactionPayload {
            fn from(payload: $payload) -> Self { $variant(payload) }
        }
    };
}

impl_from_payload!(ProviderRegistrationPayload, ProviderRegistrationPayloadType);
impl_from_payload!(ProviderUpdateServicePayload, ProviderUpdateServicePayloadType);
impl_from_payload!(ProviderUpdateRegistrarPayload, ProviderUpdateRegistrarPayloadType);
impl_from_payload!(ProviderUpdateRevocationPayload, ProviderUpdateRevocationPayloadType);
impl_from_payload!(CoinbasePayload, CoinbasePayloadType);
impl_from_payload!(QuorumCommitmentPayload, QuorumCommitmentPayloadType);
impl_from_payload!(SubTxRegisterPayload, SubTxRegisterPayloadType);
impl_from_payload!(SubTxTopupPayload, SubTxTopupPayloadType);
impl_from_payload!(SubTxResetKeyPayload, SubTxResetKeyPayloadType);
impl_from_payload!(SubTxCloseAccountPayload, SubTxCloseAccountPayloadType);
impl_from_payload!(SubTxTransitionPayload, SubTxTransitionPayloadType);

/// The transaction type. Special transactions were introduced in DIP2.
/// Compared to Bitcoin the version field is split into two 16 bit integers.
/// The first part for the version and the second part for the transaction
/// type.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
#[repr(u16)]
pub enum TransactionType {
    /// A Classic transaction
    Classic = 0,
    /// A Masternode Registration Transaction
    ProviderRegistration = 1,
    /// A Masternode Update Service Transaction, used by the operator to signal changes to service
    ProviderUpdateService = 2,
    /// A Masternode Update Registrar Transaction, used by the owner to signal base changes
    ProviderUpdateRegistrar = 3,
    /// A Masternode Update Revocation Transaction, used by the operator to signal termination of service
    ProviderUpdateRevocation = 4,
    /// A Coinbase Transaction, contained as the first transaction in each Block
    Coinbase = 5,
    /// A Quorum Commitment Transaction, used to save quorum information to the state
    QuorumCommitment = 6,
    /// A User Identity Registration Transaction
    SubTxRegister = 8,
    /// A User Identity Top-up Transaction
    SubTxTopup = 9,
    /// A User Identity Key Reset Transaction
    SubTxResetKey = 10,
    /// A User Identity Close Account Transaction
    SubTxCloseAccount = 11,
    /// A User Identity State Transition Transaction
    SubTxTransition = 12,
}

impl Debug for TransactionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            TransactionType::Classic => write!(f, "Classic Transaction (Normal)"),
            TransactionType::ProviderRegistration => {
                write!(f, "Provider Registration Transaction (ProRegTx)")
            }
            TransactionType::ProviderUpdateService => {
                write!(f, "Provider Update Service Transaction (ProUpServTx)")
            }
            TransactionType::ProviderUpdateRegistrar => {
                write!(f, "Provider Update Registrar Transaction (ProUpRegTx)")
            }
            TransactionType::ProviderUpdateRevocation => {
                write!(f, "Provider Update Revocation Transaction (ProUpRevTx)")
            }
            TransactionType::Coinbase => write!(f, "Coinbase Transaction (CbTx)"),
            TransactionType::QuorumCommitment => {
                write!(f, "Quorum Commitment Transaction (QcTx)")
            }
            TransactionType::SubTxRegister => write!(f, "User Registration Transaction (SubTxRegister)"),
            TransactionType::SubTxTopup => write!(f, "User Top-up Transaction (SubTxTopup)"),
            TransactionType::SubTxResetKey => write!(f, "User Key Reset Transaction (SubTxResetKey)"),
            TransactionType::SubTxCloseAccount => {
                write!(f, "User Close Account Transaction (SubTxCloseAccount)")
            }
            TransactionType::SubTxTransition => {
                write!(f, "User State Transition Transaction (SubTxTransition)")
            }
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            TransactionType::Classic => write!(f, "Classic"),
            TransactionType::ProviderRegistration => write!(f, "ProRegTx"),
            TransactionType::ProviderUpdateService => write!(f, "ProUpServTx"),
            TransactionType::ProviderUpdateRegistrar => write!(f, "ProUpRegTx"),
            TransactionType::ProviderUpdateRevocation => write!(f, "ProUpRevTx"),
            TransactionType::Coinbase => write!(f, "CbTx"),
            TransactionType::QuorumCommitment => write!(f, "QcTx"),
            TransactionType::SubTxRegister => write!(f, "SubTxRegister"),
            TransactionType::SubTxTopup => write!(f, "SubTxTopup"),
            TransactionType::SubTxResetKey => write!(f, "SubTxResetKey"),
            TransactionType::SubTxCloseAccount => write!(f, "SubTxCloseAccount"),
            TransactionType::SubTxTransition => write!(f, "SubTxTransition"),
        }
    }
}

impl TryFrom<u16> for TransactionType {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TransactionType::Classic),
            1 => Ok(TransactionType::ProviderRegistration),
            2 => Ok(TransactionType::ProviderUpdateService),
            3 => Ok(TransactionType::ProviderUpdateRegistrar),
            4 => Ok(TransactionType::ProviderUpdateRevocation),
            5 => Ok(TransactionType::Coinbase),
            6 => Ok(TransactionType::QuorumCommitment),
            8 => Ok(TransactionType::SubTxRegister),
            9 => Ok(TransactionType::SubTxTopup),
            10 => Ok(TransactionType::SubTxResetKey),
            11 => Ok(TransactionType::SubTxCloseAccount),
            12 => Ok(TransactionType::SubTxTransition),
            _ => Err(Error::UnknownType(value)),
        }
    }
}

impl From<TransactionType> for u16 {
    fn from(ty: TransactionType) -> Self { ty as u16 }
}

impl TransactionType {
    /// Get the transaction type from an optional special transaction payload
    pub fn from_optional_payload(payload: &Option<TransactionPayload>) -> Self {
        match payload {
            None => TransactionType::Classic,
            Some(payload) => payload.get_type(),
        }
    }
}

impl Encodable for TransactionType {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        (*self as u16).consensus_encode(w)
    }
}

impl Decodable for TransactionType {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let value = u16::consensus_decode(r)?;
        TransactionType::try_from(value).map_err(|_| encode::Error::InvalidEnumValue {
            max: TransactionType::SubTxTransition as u16,
            received: value,
            msg: "unknown special transaction type".to_string(),
        })
    }
}
