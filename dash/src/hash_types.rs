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

//! Dash hash types.
//!
//! This module defines types for hashes and fixed-size identifiers used throughout the
//! special transaction payloads.
//!
//! 32-byte hashes that point at chain objects are written to the wire in internal byte order
//! and shown reversed, the way Dash Core displays a `uint256`. 20-byte key identifiers are
//! shown in wire order.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use hashes::{hash160, hash_newtype, sha256d};

use crate::validation::{expect_key_id_hex_string, expect_sha256_hex_string};

hash_newtype! {
    /// Hash of the ProRegTx that registered a masternode.
    #[hash_newtype(backward)]
    pub struct ProTxHash(sha256d::Hash);

    /// Hash of all outpoints spent by a special transaction; makes payload signatures unique.
    #[hash_newtype(backward)]
    pub struct InputsHash(sha256d::Hash);

    /// Merkle root of the deterministic masternode list, committed in the coinbase payload.
    #[hash_newtype(backward)]
    pub struct MerkleRootMasternodeList(sha256d::Hash);

    /// Block hash identifying an LLMQ.
    #[hash_newtype(backward)]
    pub struct QuorumHash(sha256d::Hash);

    /// Hash of a quorum verification vector.
    #[hash_newtype(backward)]
    pub struct QuorumVVecHash(sha256d::Hash);

    /// Hash of the SubTxRegister transaction that created a user identity.
    #[hash_newtype(backward)]
    pub struct RegTxHash(sha256d::Hash);

    /// Hash of the previous subtransaction of a user identity.
    #[hash_newtype(backward)]
    pub struct SubTxHash(sha256d::Hash);

    /// Hash of a state transition packet.
    #[hash_newtype(backward)]
    pub struct STPacketHash(sha256d::Hash);

    /// Double-SHA256 of a serialized special transaction payload.
    #[hash_newtype(backward)]
    pub struct SpecialTransactionPayloadHash(sha256d::Hash);

    /// A public key identifier: the hash160 of a serialized ECDSA public key.
    #[hash_newtype(forward)]
    pub struct PubkeyHash(hash160::Hash);
}

impl_hashencode!(ProTxHash);
impl_hashencode!(InputsHash);
impl_hashencode!(MerkleRootMasternodeList);
impl_hashencode!(QuorumHash);
impl_hashencode!(QuorumVVecHash);
impl_hashencode!(RegTxHash);
impl_hashencode!(SubTxHash);
impl_hashencode!(STPacketHash);
impl_hashencode!(SpecialTransactionPayloadHash);
impl_hashencode!(PubkeyHash);

impl_hash_hex_field!(ProTxHash, expect_sha256_hex_string);
impl_hash_hex_field!(InputsHash, expect_sha256_hex_string);
impl_hash_hex_field!(MerkleRootMasternodeList, expect_sha256_hex_string);
impl_hash_hex_field!(QuorumHash, expect_sha256_hex_string);
impl_hash_hex_field!(QuorumVVecHash, expect_sha256_hex_string);
impl_hash_hex_field!(RegTxHash, expect_sha256_hex_string);
impl_hash_hex_field!(SubTxHash, expect_sha256_hex_string);
impl_hash_hex_field!(STPacketHash, expect_sha256_hex_string);
impl_hash_hex_field!(SpecialTransactionPayloadHash, expect_sha256_hex_string);
impl_hash_hex_field!(PubkeyHash, expect_key_id_hex_string);

impl_array_newtype!(
    /// A masternode service IP address.
    ///
    /// Stored as 16 bytes of IPv6 in network byte order; IPv4 hosts use the IPv4-mapped form
    /// `::ffff:a.b.c.d`, so only the last 4 bytes vary.
    ServiceIpAddress, 16
);

impl ServiceIpAddress {
    /// Maps an IPv4 address into the 16-byte form.
    pub fn from_ipv4(ip: Ipv4Addr) -> Self { ServiceIpAddress(ip.to_ipv6_mapped().octets()) }

    /// The address as a standard library IP, unmapping IPv4.
    pub fn to_ip_addr(&self) -> IpAddr {
        let v6 = Ipv6Addr::from(self.0);
        match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(v6),
        }
    }

    /// Combines the address with a port.
    pub fn to_socket_addr(&self, port: u16) -> SocketAddr { SocketAddr::new(self.to_ip_addr(), port) }
}

impl From<IpAddr> for ServiceIpAddress {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => ServiceIpAddress::from_ipv4(v4),
            IpAddr::V6(v6) => ServiceIpAddress(v6.octets()),
        }
    }
}

/// Eight 2-byte groups joined by `:`, without zero compression.
impl core::fmt::Display for ServiceIpAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, group) in self.0.chunks(2).enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}{:02x}", group[0], group[1])?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for ServiceIpAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ServiceIpAddress({})", self)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use assert_matches::assert_matches;
    use hashes::Hash;

    use super::*;
    use crate::Error;
    use crate::consensus::{deserialize, serialize};

    #[test]
    fn hashes_display_reversed() {
        let hash = ProTxHash::from_hex(
            "e83c0ad7a2e2e2a4b8ccb0bc0e3dca5cdcca0c2bc9f2b23e4ac3c45b8a1901b9",
        )
        .unwrap();
        assert_eq!(hash.as_byte_array()[0], 0xb9);
        assert_eq!(hash.as_byte_array()[31], 0xe8);
        assert_eq!(
            hash.to_string(),
            "e83c0ad7a2e2e2a4b8ccb0bc0e3dca5cdcca0c2bc9f2b23e4ac3c45b8a1901b9"
        );
        let wire = serialize(&hash);
        assert_eq!(wire[0], 0xb9);
        assert_eq!(deserialize::<ProTxHash>(&wire).unwrap(), hash);
    }

    #[test]
    fn key_ids_display_forward() {
        let key_id = PubkeyHash::from_str("3dd03f9ec192b5f275a433bfc90f468ee1a3eb4c").unwrap();
        assert_eq!(key_id.as_byte_array()[0], 0x3d);
        assert_eq!(serialize(&key_id)[..2], [0x3d, 0xd0]);
        assert_eq!(key_id.to_hex(), "3dd03f9ec192b5f275a433bfc90f468ee1a3eb4c");
    }

    #[test]
    fn wrong_lengths_are_invalid_arguments() {
        let short = "e83c0ad7a2e2e2a4b8ccb0bc0e3dca5cdcca0c2bc9f2b23e4ac3c45b8a1901b";
        assert_eq!(short.len(), 63);
        assert_matches!(InputsHash::from_hex(short), Err(Error::InvalidArgument { .. }));
        assert_matches!(
            PubkeyHash::from_hex("3dd03f9ec192b5f275a433bfc90f468ee1a3eb"),
            Err(Error::InvalidArgument { field: "PubkeyHash", .. })
        );
        assert!(PubkeyHash::from_slice(&[0; 19]).is_err());
        assert!(PubkeyHash::from_slice(&[0; 20]).is_ok());
        assert_matches!(
            ServiceIpAddress::from_slice(&[0; 15]),
            Err(Error::InvalidArgument { .. })
        );
        assert_matches!(
            PubkeyHash::from_hex("3DD03F9EC192B5F275A433BFC90F468EE1A3EB4C"),
            Err(Error::InvalidArgument { .. })
        );
    }

    #[test]
    fn payload_hash_is_double_sha256() {
        // sha256d of the empty string
        let hash = SpecialTransactionPayloadHash::hash(&[]);
        assert_eq!(
            hex::encode(hash.as_byte_array()),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn service_ip_address_forms() {
        let ip = ServiceIpAddress::from_ipv4(Ipv4Addr::new(1, 2, 3, 7));
        assert_eq!(ip.to_hex(), "00000000000000000000ffff01020307");
        assert_eq!(ip.to_string(), "0000:0000:0000:0000:0000:ffff:0102:0307");
        assert_eq!(ip.to_ip_addr(), IpAddr::V4(Ipv4Addr::new(1, 2, 3, 7)));
        assert_eq!(ip.to_socket_addr(1237).to_string(), "1.2.3.7:1237");
        assert_eq!(ServiceIpAddress::from(ip.to_ip_addr()), ip);
    }
}
