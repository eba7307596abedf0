// Payload values and the shared signing context are used from several threads at once.

use std::sync::Arc;
use std::thread;

use dashcore_payloads::{
    EncodeOptions, Network, PrivateKey, SignedPayload, SpecialTransactionPayload,
    SubTxCloseAccountPayload, TransactionPayload,
};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_payloads_are_send_and_sync() {
    assert_send_sync::<TransactionPayload>();
    assert_send_sync::<PrivateKey>();
    assert_send_sync::<dashcore_payloads::Error>();
}

#[test]
fn test_parallel_sign_and_verify() {
    let handles: Vec<_> = (1u8..=8)
        .map(|n| {
            thread::spawn(move || {
                let key = PrivateKey::from_slice(&[n; 32], Network::Testnet).unwrap();
                let mut payload = SubTxCloseAccountPayload::default();
                payload.set_credit_fee(u64::from(n) * 1000);
                payload.sign(key).unwrap();

                let bytes = payload.to_bytes(EncodeOptions::default()).unwrap();
                let parsed = TransactionPayload::parse_bytes(11, &bytes).unwrap();
                assert!(parsed.verify_signature(&key.pubkey_hash()));
                bytes
            })
        })
        .collect();

    let results: Vec<Vec<u8>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results.len(), 8);
    for bytes in &results {
        assert_eq!(bytes.len(), 75 + 65);
    }
}

#[test]
fn test_shared_payload_read_from_threads() {
    let key = PrivateKey::from_slice(&[42; 32], Network::Testnet).unwrap();
    let mut payload = SubTxCloseAccountPayload::default();
    payload.sign(key).unwrap();
    let payload = Arc::new(payload);
    let expected = payload.hash(EncodeOptions::default()).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let payload = Arc::clone(&payload);
            thread::spawn(move || {
                assert!(payload.verify_signature(&key.pubkey_hash()));
                payload.hash(EncodeOptions::default()).unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
