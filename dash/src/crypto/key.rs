// Rust Dash Library
// Originally written in 2014 by
//     Andrew Poelstra <apoelstra@wpsoftware.net>
//     For Bitcoin
// Updated for Dash in 2022 by
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

//! Dash private keys.
//!
//! Private keys used to sign special transaction payloads, with their WIF
//! (Wallet Import Format) encoding.

use core::fmt;
use core::str::FromStr;

use secp256k1::{PublicKey, SecretKey};

use crate::Error;
use crate::hash_types::PubkeyHash;
use crate::signer::{pubkey_hash_of, secp};
use dash_network::Network;

/// A secp256k1 private key together with the way its public key is serialized.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct PrivateKey {
    /// Whether this private key should be serialized as compressed
    pub compressed: bool,
    /// The network on which this key should be used
    pub network: Network,
    /// The actual ECDSA key
    pub inner: SecretKey,
}

impl PrivateKey {
    /// Constructs a compressed ECDSA private key from the provided generic Secp256k1 private key
    /// and the specified network.
    pub fn new(key: SecretKey, network: Network) -> PrivateKey {
        PrivateKey {
            compressed: true,
            network,
            inner: key,
        }
    }

    /// Constructs an uncompressed (legacy) ECDSA private key.
    pub fn new_uncompressed(key: SecretKey, network: Network) -> PrivateKey {
        PrivateKey {
            compressed: false,
            network,
            inner: key,
        }
    }

    /// Deserializes a private key from a 32-byte slice.
    pub fn from_slice(data: &[u8], network: Network) -> Result<PrivateKey, Error> {
        if data.len() != 32 {
            return Err(Error::invalid_argument(
                "privateKey",
                "32 bytes",
                format!("{} bytes", data.len()),
            ));
        }
        Ok(PrivateKey::new(SecretKey::from_slice(data)?, network))
    }

    /// Serializes the private key to bytes.
    pub fn to_bytes(self) -> Vec<u8> { self.inner.secret_bytes().to_vec() }

    /// Creates the public key for this private key.
    pub fn public_key(&self) -> PublicKey { PublicKey::from_secret_key(secp(), &self.inner) }

    /// The public key serialized the way this key is flagged: 33 bytes compressed or
    /// 65 bytes uncompressed.
    pub fn public_key_bytes(&self) -> Vec<u8> {
        let public_key = self.public_key();
        if self.compressed {
            public_key.serialize().to_vec()
        } else {
            public_key.serialize_uncompressed().to_vec()
        }
    }

    /// The 20-byte identity of the public key, as stored in `keyId*` and `pubKeyId` fields.
    pub fn pubkey_hash(&self) -> PubkeyHash { pubkey_hash_of(&self.public_key(), self.compressed) }

    /// Formats the private key to WIF format.
    pub fn fmt_wif(&self, fmt: &mut dyn fmt::Write) -> fmt::Result {
        fmt.write_str(&self.to_wif())
    }

    /// Gets the WIF encoding of this private key.
    pub fn to_wif(self) -> String {
        let mut ret = Vec::with_capacity(34);
        ret.push(self.network.wif_prefix());
        ret.extend_from_slice(&self.inner.secret_bytes());
        if self.compressed {
            ret.push(1);
        }
        bs58::encode(ret).with_check().into_string()
    }

    /// Parses WIF encoded private key.
    pub fn from_wif(wif: &str) -> Result<PrivateKey, Error> {
        let data = bs58::decode(wif).with_check(None).into_vec()?;

        let compressed = match data.len() {
            33 => false,
            34 if data[33] == 1 => true,
            34 => {
                return Err(Error::invalid_argument(
                    "wif",
                    "compression flag 0x01",
                    format!("{:#04x}", data[33]),
                ));
            }
            len => {
                return Err(Error::invalid_argument(
                    "wif",
                    "33 or 34 decoded bytes",
                    format!("{} bytes", len),
                ));
            }
        };

        let network = Network::from_wif_prefix(data[0]).ok_or_else(|| {
            Error::invalid_argument("wif", "a known network prefix", format!("{:#04x}", data[0]))
        })?;

        Ok(PrivateKey {
            compressed,
            network,
            inner: SecretKey::from_slice(&data[1..33])?,
        })
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { self.fmt_wif(f) }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "[private key data]") }
}

impl FromStr for PrivateKey {
    type Err = Error;
    fn from_str(s: &str) -> Result<PrivateKey, Error> { PrivateKey::from_wif(s) }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use hashes::Hash;

    use super::*;

    #[test]
    fn test_wif_round_trip() {
        let key = PrivateKey::from_slice(&[1; 32], Network::Testnet).unwrap();
        let wif = key.to_wif();
        assert!(wif.starts_with('c'));
        let parsed = PrivateKey::from_wif(&wif).unwrap();
        assert_eq!(parsed, key);
        assert!(parsed.compressed);
        assert_eq!(parsed.network, Network::Testnet);
        assert_eq!(parsed.to_string(), wif);

        let mainnet = PrivateKey::from_slice(&[1; 32], Network::Dash).unwrap();
        assert!(mainnet.to_wif().starts_with('X'));
        assert_eq!(PrivateKey::from_str(&mainnet.to_wif()).unwrap().network, Network::Dash);
    }

    #[test]
    fn test_uncompressed_keys() {
        let secret = SecretKey::from_slice(&[2; 32]).unwrap();
        let key = PrivateKey::new_uncompressed(secret, Network::Dash);
        assert_eq!(key.public_key_bytes().len(), 65);
        let parsed = PrivateKey::from_wif(&key.to_wif()).unwrap();
        assert!(!parsed.compressed);
        assert_ne!(parsed.pubkey_hash(), PrivateKey::new(secret, Network::Dash).pubkey_hash());
    }

    #[test]
    fn test_pubkey_hash_is_hash160_of_public_key() {
        let key = PrivateKey::from_slice(&[3; 32], Network::Regtest).unwrap();
        let public_key = key.public_key_bytes();
        assert_eq!(public_key.len(), 33);
        assert_eq!(key.pubkey_hash(), PubkeyHash::hash(&public_key));
    }

    #[test]
    fn test_invalid_wif() {
        assert_matches!(PrivateKey::from_wif("not base58 0OIl"), Err(Error::Base58(_)));
        let mut data = vec![0x42];
        data.extend_from_slice(&[1; 32]);
        data.push(1);
        let unknown_prefix = bs58::encode(data).with_check().into_string();
        assert_matches!(
            PrivateKey::from_wif(&unknown_prefix),
            Err(Error::InvalidArgument { field: "wif", .. })
        );
        assert_matches!(
            PrivateKey::from_slice(&[1; 31], Network::Dash),
            Err(Error::InvalidArgument { field: "privateKey", .. })
        );
        assert_matches!(PrivateKey::from_slice(&[0; 32], Network::Dash), Err(Error::Secp256k1(_)));
    }
}
