// Special transaction payload tests
// These tests drive the public API the way a transaction parser does: a type tag plus the
// bytes or JSON record of the payload.

use assert_matches::assert_matches;
use dashcore_payloads::consensus::encode;
use dashcore_payloads::{
    CoinbasePayload, EncodeOptions, Error, Network, PayloadSource, PrivateKey,
    ProviderRegistrationPayload, SignedPayload, SpecialTransactionPayload, SubTxRegisterPayload,
    TransactionPayload, TransactionType,
};
use hex_lit::hex;
use serde_json::json;

const PROREGTX_HEX: &str = "0100000000000100000000000000000000000000ffff0102030704d5431201003dd03f9ec192b5f275a433bfc90f468ee1a3eb4c157b10706659e25eb362b5d902d809f9160b16884ee1d4e5d61ac40a13b357ac6e368997079678c8b0041976a9144fbc8fb6e11e253d77e5a9c987418e89cf4a63d288ac517b2230689fcc1412cce13ab9e18eac62054060c2a93a510001255603555fe600";

fn key(n: u8) -> PrivateKey { PrivateKey::from_slice(&[n; 32], Network::Testnet).unwrap() }

// =============================================================================
// Test: Coinbase payload, JSON to wire and back
// =============================================================================

#[test]
fn test_coinbase_json_to_wire() {
    let record = json!({
        "version": 10,
        "height": 20,
        "merkleRootMNList": "e83c0ad7a2e2e2a4b8ccb0bc0e3dca5cdcca0c2bc9f2b23e4ac3c45b8a1901b9",
    });
    let payload = TransactionPayload::parse_json(5, &record).unwrap();
    let hex = hex::encode(payload.to_bytes(EncodeOptions::default()).unwrap());
    assert_eq!(hex, "0a0014000000b901198a5bc4c34a3eb2f2c92b0ccadc5cca3d0ebcb0ccb8a4e2e2a2d70a3ce8");

    let parsed = TransactionPayload::parse(5, PayloadSource::Hex(&hex)).unwrap();
    assert_eq!(parsed.to_json(EncodeOptions::default()).unwrap(), record);
    assert_eq!(parsed.to_coinbase_payload().unwrap().height, 20);
}

// =============================================================================
// Test: ProRegTx fixture survives both codecs unchanged
// =============================================================================

#[test]
fn test_provider_registration_fixture() {
    let bytes = hex::decode(PROREGTX_HEX).unwrap();
    let payload = TransactionPayload::parse_bytes(1, &bytes).unwrap();
    assert_eq!(payload.get_type(), TransactionType::ProviderRegistration);
    assert!(payload.has_correct_type(1));
    assert!(!payload.has_correct_type(2));

    let record = payload.to_json(EncodeOptions::default()).unwrap();
    assert_eq!(record["version"], 1);
    assert_eq!(record["ipAddress"], "00000000000000000000ffff01020307");
    assert_eq!(record["port"], 1237);
    assert_eq!(record["protocolVersion"], 70211);
    assert_eq!(record["collateralIndex"], 1);
    assert_eq!(record["operatorReward"], 1200);

    assert_eq!(hex::encode(payload.to_bytes(EncodeOptions::default()).unwrap()), PROREGTX_HEX);
    assert_eq!(payload.to_string(), PROREGTX_HEX);

    let from_json = ProviderRegistrationPayload::from_json(&record).unwrap();
    assert_eq!(from_json.to_hex(EncodeOptions::default()).unwrap(), PROREGTX_HEX);
}

// =============================================================================
// Test: SubTxRegister is signed and verified by the same key
// =============================================================================

#[test]
fn test_subtx_register_signature() {
    let private_key = key(7);
    let mut payload = SubTxRegisterPayload::default();
    let bytes = payload
        .set_user_name("test")
        .set_pub_key_id(private_key.pubkey_hash())
        .sign(private_key)
        .unwrap()
        .to_bytes(EncodeOptions::default())
        .unwrap();

    let parsed = TransactionPayload::parse_bytes(8, &bytes).unwrap();
    assert!(parsed.verify_signature(&private_key.pubkey_hash()));
    assert!(!parsed.verify_signature(&key(8).pubkey_hash()));
}

#[test]
fn test_sign_with_wif() {
    let private_key = key(9);
    let wif = private_key.to_wif();
    assert_eq!(wif.parse::<PrivateKey>().unwrap(), private_key);

    let mut payload = TransactionPayload::parse_bytes(1, &hex::decode(PROREGTX_HEX).unwrap()).unwrap();
    payload.sign(wif.as_str()).unwrap();
    assert!(payload.verify_signature(&private_key.pubkey_hash()));

    let signed = payload.to_bytes(EncodeOptions::default()).unwrap();
    assert_eq!(signed.len(), 153 + 65);
    // the unsigned form is the fixture again
    assert_eq!(
        hex::encode(payload.to_bytes(EncodeOptions::unsigned()).unwrap()),
        PROREGTX_HEX
    );
}

// =============================================================================
// Test: registry rejections
// =============================================================================

#[test]
fn test_unknown_types() {
    for tag in [0u16, 7, 13, 0xffff] {
        assert_matches!(TransactionPayload::parse_bytes(tag, &[1, 0]), Err(Error::UnknownType(t)) if t == tag);
        assert_matches!(TransactionPayload::create(tag), Err(Error::UnknownType(_)));
    }
}

#[test]
fn test_malformed_bytes() {
    let coinbase = hex!("0a0014000000b901198a5bc4c34a3eb2f2c92b0ccadc5cca3d0ebcb0ccb8a4e2e2a2d70a3ce8");

    let mut longer = coinbase.to_vec();
    longer.push(0);
    let err = TransactionPayload::parse_bytes(5, &longer).unwrap_err();
    assert_matches!(err, Error::Encode(encode::Error::TrailingData { remaining: 1 }));
    assert!(err.to_string().starts_with("raw payload is bigger than expected"));

    assert_matches!(
        CoinbasePayload::from_bytes(&coinbase[..30]),
        Err(Error::Encode(encode::Error::Underrun))
    );
}

#[test]
fn test_unsigned_types_cannot_sign() {
    let mut payload = TransactionPayload::create(9).unwrap();
    assert_matches!(payload.sign(key(1)), Err(Error::Unsignable(TransactionType::SubTxTopup)));
    assert!(!payload.verify_signature(&key(1).pubkey_hash()));
}

#[test]
fn test_bad_hash_field_in_json() {
    let record = json!({
        "version": 1,
        "regTxHash": "a".repeat(63),
    });
    let err = TransactionPayload::parse_json(9, &record).unwrap_err();
    assert_eq!(err.invalid_field(), Some("regTxHash"));
}
