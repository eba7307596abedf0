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

//! BLS key and signature containers.
//!
//! Quorum commitments carry BLS material that this library passes through without
//! interpreting it; only the sizes are enforced.

impl_array_newtype!(
    /// A quorum public key as carried by a quorum commitment.
    BLSPublicKey, 64
);
impl_hex_display!(BLSPublicKey);

impl_array_newtype!(
    /// A BLS signature.
    BLSSignature, 96
);
impl_hex_display!(BLSSignature);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::{deserialize, serialize};

    #[test]
    fn bls_material_is_passed_through() {
        let key = BLSPublicKey::from([7; 64]);
        assert_eq!(serialize(&key), vec![7; 64]);
        assert_eq!(key.to_hex(), "07".repeat(64));

        let sig = BLSSignature::from_hex(&"ab".repeat(96)).unwrap();
        assert_eq!(deserialize::<BLSSignature>(&serialize(&sig)).unwrap(), sig);
        assert!(BLSSignature::from_hex(&"ab".repeat(95)).is_err());
    }
}
