use std::net::Ipv4Addr;

use hashes::Hash;

use crate::bls_sig_utils::{BLSPublicKey, BLSSignature};
use crate::crypto::key::PrivateKey;
use crate::hash_types::{
    InputsHash, MerkleRootMasternodeList, ProTxHash, PubkeyHash, QuorumHash, QuorumVVecHash,
    RegTxHash, STPacketHash, ServiceIpAddress, SubTxHash,
};
use crate::special_transaction::coinbase::CoinbasePayload;
use crate::special_transaction::provider_registration::{
    ProviderMasternodeType, ProviderRegistrationPayload,
};
use crate::special_transaction::provider_update_registrar::ProviderUpdateRegistrarPayload;
use crate::special_transaction::provider_update_revocation::{
    ProviderUpdateRevocationPayload, RevocationReason,
};
use crate::special_transaction::provider_update_service::ProviderUpdateServicePayload;
use crate::special_transaction::quorum_commitment::QuorumCommitmentPayload;
use crate::special_transaction::subtx_close_account::SubTxCloseAccountPayload;
use crate::special_transaction::subtx_register::SubTxRegisterPayload;
use crate::special_transaction::subtx_reset_key::SubTxResetKeyPayload;
use crate::special_transaction::subtx_topup::SubTxTopupPayload;
use crate::special_transaction::subtx_transition::SubTxTransitionPayload;
use crate::Network;

const PRO_TX_HASH: &str = "58ab8ba7dce591c745f8b78ee49156d13277fff20880855f7cda501705439aca";
const INPUTS_HASH: &str = "e65f550356250100513aa9c260400562ac8ee1b93ae1cc1214cc9f6830227b51";
const REG_TX_HASH: &str = "231ca03b6a0f7a1d2b6a6b0b0e4e9a2b9ebaa0c34a7d43543b4b0eaeb82eadd4";
const PREV_SUB_TX_HASH: &str = "0c2b4d39e9a0b58f8dcbf4b0ee7a2a3d1c9e6a5f4b3c2d1e0f9a8b7c6d5e4f30";

const OWNER_KEY_ID: &str = "3dd03f9ec192b5f275a433bfc90f468ee1a3eb4c";
const OPERATOR_KEY_ID: &str = "157b10706659e25eb362b5d902d809f9160b1688";
const VOTING_KEY_ID: &str = "4ee1d4e5d61ac40a13b357ac6e368997079678c8";

/// A deterministic compressed testnet key.
pub fn signer_key(n: u8) -> PrivateKey { PrivateKey::from_slice(&[n; 32], Network::Testnet).unwrap() }

pub fn test_coinbase_payload() -> CoinbasePayload {
    CoinbasePayload {
        version: 2,
        height: 1000,
        merkle_root_masternode_list: MerkleRootMasternodeList::from_hex(
            "e83c0ad7a2e2e2a4b8ccb0bc0e3dca5cdcca0c2bc9f2b23e4ac3c45b8a1901b9",
        )
        .unwrap(),
    }
}

pub fn test_provider_registration_payload() -> ProviderRegistrationPayload {
    ProviderRegistrationPayload {
        version: 1,
        masternode_type: ProviderMasternodeType::Regular,
        masternode_mode: 0,
        collateral_index: 1,
        ip_address: ServiceIpAddress::from_ipv4(Ipv4Addr::new(1, 2, 3, 7)),
        port: 1237,
        protocol_version: 70211,
        owner_key_hash: PubkeyHash::from_hex(OWNER_KEY_ID).unwrap(),
        operator_key_hash: PubkeyHash::from_hex(OPERATOR_KEY_ID).unwrap(),
        voting_key_hash: PubkeyHash::from_hex(VOTING_KEY_ID).unwrap(),
        operator_reward: 1200,
        script_payout: hex::decode("76a9144fbc8fb6e11e253d77e5a9c987418e89cf4a63d288ac").unwrap(),
        inputs_hash: InputsHash::from_hex(INPUTS_HASH).unwrap(),
        payload_sig: Vec::new(),
    }
}

pub fn test_provider_update_service_payload() -> ProviderUpdateServicePayload {
    ProviderUpdateServicePayload {
        version: 1,
        pro_tx_hash: ProTxHash::from_hex(PRO_TX_HASH).unwrap(),
        protocol_version: 70211,
        ip_address: ServiceIpAddress::from_ipv4(Ipv4Addr::new(1, 2, 5, 6)),
        port: 19999,
        script_operator_payout: hex::decode("76a9144ee1d4e5d61ac40a13b357ac6e368997079678c888ac")
            .unwrap(),
        inputs_hash: InputsHash::from_hex(INPUTS_HASH).unwrap(),
        payload_sig: Vec::new(),
    }
}

pub fn test_provider_update_registrar_payload() -> ProviderUpdateRegistrarPayload {
    ProviderUpdateRegistrarPayload {
        version: 1,
        pro_tx_hash: ProTxHash::from_hex(PRO_TX_HASH).unwrap(),
        operator_key_hash: PubkeyHash::from_hex(OPERATOR_KEY_ID).unwrap(),
        voting_key_hash: PubkeyHash::from_hex(VOTING_KEY_ID).unwrap(),
        script_payout: hex::decode("76a9144fbc8fb6e11e253d77e5a9c987418e89cf4a63d288ac").unwrap(),
        inputs_hash: InputsHash::from_hex(INPUTS_HASH).unwrap(),
        payload_sig: Vec::new(),
    }
}

pub fn test_provider_update_revocation_payload() -> ProviderUpdateRevocationPayload {
    ProviderUpdateRevocationPayload {
        version: 1,
        pro_tx_hash: ProTxHash::from_hex(PRO_TX_HASH).unwrap(),
        reason: RevocationReason::CompromisedKeys,
        inputs_hash: InputsHash::from_hex(INPUTS_HASH).unwrap(),
        payload_sig: Vec::new(),
    }
}

pub fn test_quorum_commitment_payload() -> QuorumCommitmentPayload {
    QuorumCommitmentPayload {
        version: 1,
        height: 1000,
        commitment_version: 1,
        llmq_type: 1,
        quorum_hash: QuorumHash::from_hex(
            "0000000000000010b8d7b33a4e3b4e6a3b1b5a21b25ee2a3d0f8e7b0c0e0a1b2",
        )
        .unwrap(),
        signers: vec![0xff, 0x03],
        valid_members: vec![0xff, 0x01],
        quorum_public_key: BLSPublicKey::from([0x11; 64]),
        quorum_vvec_hash: QuorumVVecHash::from_byte_array([0xaa; 32]),
        quorum_sig: BLSSignature::from([0x22; 96]),
        sig: BLSSignature::from([0x33; 96]),
    }
}

pub fn test_subtx_register_payload() -> SubTxRegisterPayload {
    SubTxRegisterPayload {
        version: 1,
        user_name: "test".to_string(),
        pub_key_id: PubkeyHash::from_hex(OWNER_KEY_ID).unwrap(),
        vch_sig: Vec::new(),
    }
}

pub fn test_subtx_topup_payload() -> SubTxTopupPayload {
    SubTxTopupPayload {
        version: 1,
        reg_tx_hash: RegTxHash::from_hex(REG_TX_HASH).unwrap(),
    }
}

pub fn test_subtx_reset_key_payload() -> SubTxResetKeyPayload {
    SubTxResetKeyPayload {
        version: 1,
        reg_tx_hash: RegTxHash::from_hex(REG_TX_HASH).unwrap(),
        hash_prev_sub_tx: SubTxHash::from_hex(PREV_SUB_TX_HASH).unwrap(),
        credit_fee: 1000,
        new_pub_key_id: PubkeyHash::from_hex(VOTING_KEY_ID).unwrap(),
        payload_sig: Vec::new(),
    }
}

pub fn test_subtx_close_account_payload() -> SubTxCloseAccountPayload {
    SubTxCloseAccountPayload {
        version: 1,
        reg_tx_hash: RegTxHash::from_hex(REG_TX_HASH).unwrap(),
        hash_prev_sub_tx: SubTxHash::from_hex(PREV_SUB_TX_HASH).unwrap(),
        credit_fee: 1000,
        payload_sig: Vec::new(),
    }
}

pub fn test_subtx_transition_payload() -> SubTxTransitionPayload {
    SubTxTransitionPayload {
        version: 1,
        reg_tx_id: RegTxHash::from_hex(&format!("aa{}01", "00".repeat(30))).unwrap(),
        hash_prev_sub_tx: SubTxHash::from_hex(PREV_SUB_TX_HASH).unwrap(),
        credit_fee: 1000,
        hash_st_packet: STPacketHash::from_byte_array([0x5c; 32]),
        vch_sig: Vec::new(),
    }
}
