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

//! Payload signing.
//!
//! Special transaction payloads are signed with compact recoverable ECDSA signatures: 65 bytes,
//! a header byte `27 + recovery id (+ 4 when the key is compressed)` followed by `r` and `s`.
//! A signature is checked by recovering the public key and comparing its hash160 with the key
//! identity the payload expects, so only the 20-byte identity has to be known to verify.

use std::sync::OnceLock;

use hashes::Hash;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};
use tracing::debug;

use crate::Error;
use crate::crypto::key::PrivateKey;
use crate::hash_types::PubkeyHash;
use crate::validation::{COMPACT_SIGNATURE_SIZE, expect_buffer_of_length};

const COMPACT_HEADER_BASE: u8 = 27;
const COMPACT_HEADER_COMPRESSED: u8 = 4;

/// The shared signing and verification context.
pub(crate) fn secp() -> &'static Secp256k1<All> {
    static SECP: OnceLock<Secp256k1<All>> = OnceLock::new();
    SECP.get_or_init(Secp256k1::new)
}

/// The key a payload is signed with.
#[derive(Clone, Debug)]
pub enum SignerKey<'a> {
    /// A private key with its compression flag.
    Private(PrivateKey),
    /// A bare secret key; its public key is taken as compressed.
    Secret(SecretKey),
    /// A WIF string, parsed when signing.
    Wif(&'a str),
}

impl SignerKey<'_> {
    /// Resolves the key to its secret and compression flag.
    pub fn resolve(&self) -> Result<(SecretKey, bool), Error> {
        match self {
            SignerKey::Private(key) => Ok((key.inner, key.compressed)),
            SignerKey::Secret(secret) => Ok((*secret, true)),
            SignerKey::Wif(wif) => {
                let key = PrivateKey::from_wif(wif)?;
                Ok((key.inner, key.compressed))
            }
        }
    }
}

impl From<PrivateKey> for SignerKey<'_> {
    fn from(key: PrivateKey) -> Self { SignerKey::Private(key) }
}

impl From<&PrivateKey> for SignerKey<'_> {
    fn from(key: &PrivateKey) -> Self { SignerKey::Private(*key) }
}

impl From<SecretKey> for SignerKey<'_> {
    fn from(secret: SecretKey) -> Self { SignerKey::Secret(secret) }
}

impl<'a> From<&'a str> for SignerKey<'a> {
    fn from(wif: &'a str) -> Self { SignerKey::Wif(wif) }
}

/// hash160 of the public key in the requested serialization.
pub fn pubkey_hash_of(public_key: &PublicKey, compressed: bool) -> PubkeyHash {
    if compressed {
        PubkeyHash::hash(&public_key.serialize())
    } else {
        PubkeyHash::hash(&public_key.serialize_uncompressed())
    }
}

fn message_of(hash: &[u8]) -> Result<Message, Error> {
    let digest: [u8; 32] = hash.try_into().map_err(|_| {
        Error::invalid_argument("hash", "32 bytes", format!("{} bytes", hash.len()))
    })?;
    Ok(Message::from_digest(digest))
}

/// Signs a 32-byte hash, producing a compact recoverable signature.
pub fn sign_hash<'a>(hash: &[u8], key: impl Into<SignerKey<'a>>) -> Result<[u8; 65], Error> {
    let message = message_of(hash)?;
    let (secret, compressed) = key.into().resolve()?;

    let signature = secp().sign_ecdsa_recoverable(&message, &secret);
    let (recovery_id, rs) = signature.serialize_compact();

    let mut compact = [0u8; COMPACT_SIGNATURE_SIZE];
    compact[0] = COMPACT_HEADER_BASE + i32::from(recovery_id) as u8;
    if compressed {
        compact[0] += COMPACT_HEADER_COMPRESSED;
    }
    compact[1..].copy_from_slice(&rs);
    Ok(compact)
}

/// Recovers the public key that produced a compact signature over `hash`.
///
/// Returns `Ok(None)` when the header byte is out of range or no key can be recovered.
pub fn recover_public_key(hash: &[u8], signature: &[u8]) -> Result<Option<(PublicKey, bool)>, Error> {
    let message = message_of(hash)?;
    expect_buffer_of_length("signature", signature, COMPACT_SIGNATURE_SIZE)?;

    let header = signature[0];
    if !(COMPACT_HEADER_BASE..COMPACT_HEADER_BASE + 8).contains(&header) {
        debug!(header, "compact signature header out of range");
        return Ok(None);
    }
    let mut recid = header - COMPACT_HEADER_BASE;
    let compressed = recid >= COMPACT_HEADER_COMPRESSED;
    if compressed {
        recid -= COMPACT_HEADER_COMPRESSED;
    }

    let recovered = RecoveryId::try_from(i32::from(recid))
        .and_then(|recovery_id| RecoverableSignature::from_compact(&signature[1..], recovery_id))
        .and_then(|signature| secp().recover_ecdsa(&message, &signature));
    match recovered {
        Ok(public_key) => Ok(Some((public_key, compressed))),
        Err(e) => {
            debug!(error = %e, "public key recovery failed");
            Ok(None)
        }
    }
}

/// Checks a compact signature over `hash` against a public key identity.
///
/// Wrongly sized inputs are errors; a well-formed signature made by another key, or one from
/// which no key can be recovered, gives `Ok(false)`.
pub fn verify_hash_signature(
    hash: &[u8],
    signature: &[u8],
    expected: &PubkeyHash,
) -> Result<bool, Error> {
    let Some((public_key, compressed)) = recover_public_key(hash, signature)? else {
        return Ok(false);
    };
    let recovered = pubkey_hash_of(&public_key, compressed);
    if recovered != *expected {
        debug!(%recovered, %expected, "signature made by a different key");
        return Ok(false);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use dash_network::Network;

    use super::*;

    fn key(byte: u8) -> PrivateKey { PrivateKey::from_slice(&[byte; 32], Network::Testnet).unwrap() }

    #[test]
    fn test_sign_and_verify() {
        let hash = [0x5a; 32];
        let signer = key(1);
        let signature = sign_hash(&hash, signer).unwrap();
        assert_eq!(signature.len(), 65);
        assert!((31..35).contains(&signature[0]));

        assert!(verify_hash_signature(&hash, &signature, &signer.pubkey_hash()).unwrap());
        assert!(!verify_hash_signature(&hash, &signature, &key(2).pubkey_hash()).unwrap());
        assert!(!verify_hash_signature(&[0x5b; 32], &signature, &signer.pubkey_hash()).unwrap());
    }

    #[test]
    fn test_signer_key_forms_agree() {
        let hash = [7; 32];
        let private = key(4);
        let wif = private.to_wif();
        let from_private = sign_hash(&hash, &private).unwrap();
        let from_secret = sign_hash(&hash, private.inner).unwrap();
        let from_wif = sign_hash(&hash, wif.as_str()).unwrap();
        // RFC 6979 nonces make signing deterministic
        assert_eq!(from_private, from_secret);
        assert_eq!(from_private, from_wif);
    }

    #[test]
    fn test_uncompressed_header() {
        let hash = [9; 32];
        let private = PrivateKey::new_uncompressed(key(5).inner, Network::Dash);
        let signature = sign_hash(&hash, private).unwrap();
        assert!((27..31).contains(&signature[0]));
        assert!(verify_hash_signature(&hash, &signature, &private.pubkey_hash()).unwrap());
        assert!(!verify_hash_signature(&hash, &signature, &key(5).pubkey_hash()).unwrap());
    }

    #[test]
    fn test_malformed_inputs() {
        let signer = key(6);
        assert_matches!(sign_hash(&[0; 31], signer), Err(Error::InvalidArgument { field: "hash", .. }));
        assert_matches!(
            verify_hash_signature(&[0; 32], &[0; 64], &signer.pubkey_hash()),
            Err(Error::InvalidArgument { field: "signature", .. })
        );

        let mut signature = sign_hash(&[1; 32], signer).unwrap();
        signature[0] = 99;
        assert!(!verify_hash_signature(&[1; 32], &signature, &signer.pubkey_hash()).unwrap());
        let zeroed = [31u8; 65];
        assert!(!verify_hash_signature(&[1; 32], &zeroed, &signer.pubkey_hash()).unwrap());
        assert_matches!(sign_hash(&[1; 32], "garbage"), Err(Error::Base58(_)));
    }
}
