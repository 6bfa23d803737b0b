//! Integration test: full end-to-end workflow.
//!
//! Tests the complete lifecycle:
//! 1. Register an identity, a key, and a certificate
//! 2. Set all three defaults
//! 3. Resolve defaults and listings
//! 4. Check the certificate's encoded validity bytes
//! 5. Delete the identity and observe the cascade

use chrono::{TimeZone, Utc};
use ndn_pib::{
    decode_time, encode_generalized_time, Certificate, KeyType, MemoryPib, Name, Pib, PibError,
    ValidityPeriod,
};

fn n(s: &str) -> Name {
    s.parse().expect("parse name")
}

#[test]
fn full_workflow_registration_to_cascade() {
    let mut pib = MemoryPib::new();
    let key_bits = hex::decode("30819f300d06092a864886f70d010101050003818d00").unwrap();

    // ── Step 1: Register identity, key, and certificate ─────────────────
    pib.add_identity(&n("/alice"));
    assert!(pib.identity_exists(&n("/alice")));

    pib.add_public_key(&n("/alice/KEY/1"), KeyType::Rsa, &key_bits)
        .expect("key registration should succeed");

    let not_before = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let not_after = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
    let certificate = Certificate {
        name: n("/alice/KEY/1/ID-CERT/1"),
        subject_key: n("/alice/KEY/1"),
        validity: ValidityPeriod::new(not_before, not_after),
        signature: vec![0x5A; 32],
        issuer: b"/alice".to_vec(),
    };
    pib.add_certificate(certificate.clone())
        .expect("certificate registration should succeed");

    // The stored key round-trips byte-identically.
    let info = pib.get_public_key(&n("/alice/KEY/1")).unwrap();
    assert_eq!(info.key_type, KeyType::Rsa);
    assert_eq!(info.bits, key_bits);

    // ── Step 2: Set all three defaults ──────────────────────────────────
    // No default is visible before any setter runs.
    assert!(matches!(
        pib.default_key_for_identity(&n("/alice")),
        Err(PibError::NoDefault(_))
    ));

    pib.set_default_identity_unchecked(&n("/alice"));
    pib.set_default_key_for_identity_unchecked(&n("/alice"), &n("/alice/KEY/1"));
    pib.set_default_certificate_for_key_unchecked(&n("/alice/KEY/1"), &n("/alice/KEY/1/ID-CERT/1"));

    // ── Step 3: Resolve defaults and listings ───────────────────────────
    assert_eq!(pib.default_identity().unwrap(), n("/alice"));
    assert_eq!(
        pib.default_key_for_identity(&n("/alice")).unwrap(),
        n("/alice/KEY/1")
    );
    assert_eq!(
        pib.default_certificate_for_key(&n("/alice/KEY/1")).unwrap(),
        n("/alice/KEY/1/ID-CERT/1")
    );

    assert_eq!(pib.list_identities(true), vec![n("/alice")]);
    assert_eq!(pib.list_keys(true), vec![n("/alice/KEY/1")]);
    assert_eq!(
        pib.list_certificates(true),
        vec![n("/alice/KEY/1/ID-CERT/1")]
    );

    // ── Step 4: Encoded validity bytes ──────────────────────────────────
    let encoded = encode_generalized_time(&certificate.validity.not_before);
    assert_eq!(
        encoded,
        hex::decode("180F32303230303130313030303030305A").unwrap()
    );
    assert_eq!(decode_time(&encoded).unwrap(), not_before);

    let stored = pib.get_certificate(&n("/alice/KEY/1/ID-CERT/1")).unwrap();
    assert_eq!(stored, certificate);
    assert!(stored
        .validity
        .covers(&Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap()));

    // ── Step 5: Delete the identity and observe the cascade ─────────────
    pib.delete_identity(&n("/alice"))
        .expect("delete should succeed");

    assert!(!pib.identity_exists(&n("/alice")));
    assert!(!pib.key_exists(&n("/alice/KEY/1")));
    assert!(!pib.certificate_exists(&n("/alice/KEY/1/ID-CERT/1")));
    assert!(pib.list_identities(false).is_empty());
    assert!(pib.list_identities(true).is_empty());
    assert!(matches!(
        pib.default_identity(),
        Err(PibError::NoDefault(_))
    ));

    // The copy taken before deletion is still intact.
    assert_eq!(stored.name, n("/alice/KEY/1/ID-CERT/1"));
}
