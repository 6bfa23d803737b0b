//! Stress test: many identities, keys, and certificates.
//!
//! Registers a few hundred entities, then deletes half the identities
//! and checks that every cascade landed and nothing else was touched.

use chrono::{TimeZone, Utc};
use ndn_pib::{Certificate, KeyType, MemoryPib, Name, Pib, ValidityPeriod};

const IDENTITIES: usize = 100;
const KEYS_PER_IDENTITY: usize = 3;

fn n(s: &str) -> Name {
    s.parse().expect("parse name")
}

fn populate() -> MemoryPib {
    let mut pib = MemoryPib::new();
    let validity = ValidityPeriod::new(
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
    );

    for i in 0..IDENTITIES {
        let identity = n(&format!("/org/user-{i}"));
        pib.add_identity(&identity);
        for k in 0..KEYS_PER_IDENTITY {
            let key = n(&format!("/org/user-{i}/KEY/{k}"));
            pib.add_public_key(&key, KeyType::Ec, format!("bits-{i}-{k}").as_bytes())
                .unwrap();
            pib.add_certificate(Certificate {
                name: n(&format!("/org/user-{i}/KEY/{k}/ID-CERT/1")),
                subject_key: key,
                validity,
                signature: vec![i as u8, k as u8],
                issuer: b"/org".to_vec(),
            })
            .unwrap();
        }
    }
    pib
}

#[test]
fn scale_populate_and_list() {
    let pib = populate();
    assert_eq!(pib.list_identities(false).len(), IDENTITIES);
    assert_eq!(pib.list_keys(false).len(), IDENTITIES * KEYS_PER_IDENTITY);
    assert_eq!(
        pib.list_certificates(false).len(),
        IDENTITIES * KEYS_PER_IDENTITY
    );

    for i in 0..IDENTITIES {
        let keys = pib.list_keys_of_identity(&n(&format!("/org/user-{i}")), false);
        assert_eq!(keys.len(), KEYS_PER_IDENTITY);
    }
}

#[test]
fn scale_delete_half_cascades_exactly() {
    let mut pib = populate();

    for i in (0..IDENTITIES).step_by(2) {
        pib.delete_identity(&n(&format!("/org/user-{i}"))).unwrap();
    }

    assert_eq!(pib.list_identities(false).len(), IDENTITIES / 2);
    assert_eq!(
        pib.list_keys(false).len(),
        (IDENTITIES / 2) * KEYS_PER_IDENTITY
    );
    assert_eq!(
        pib.list_certificates(false).len(),
        (IDENTITIES / 2) * KEYS_PER_IDENTITY
    );

    for i in 0..IDENTITIES {
        let identity = n(&format!("/org/user-{i}"));
        let survives = i % 2 == 1;
        assert_eq!(pib.identity_exists(&identity), survives);
        for k in 0..KEYS_PER_IDENTITY {
            let key = n(&format!("/org/user-{i}/KEY/{k}"));
            assert_eq!(pib.key_exists(&key), survives);
            assert_eq!(
                pib.certificate_exists(&n(&format!("/org/user-{i}/KEY/{k}/ID-CERT/1"))),
                survives
            );
        }
    }
}

#[test]
fn scale_defaults_survive_unrelated_deletions() {
    let mut pib = populate();
    pib.set_default_identity(&n("/org/user-1")).unwrap();
    pib.set_default_key_for_identity(&n("/org/user-1"), &n("/org/user-1/KEY/0"))
        .unwrap();
    pib.set_default_certificate_for_key(
        &n("/org/user-1/KEY/0"),
        &n("/org/user-1/KEY/0/ID-CERT/1"),
    )
    .unwrap();

    for i in (0..IDENTITIES).step_by(2) {
        pib.delete_identity(&n(&format!("/org/user-{i}"))).unwrap();
    }

    assert_eq!(pib.default_identity().unwrap(), n("/org/user-1"));
    assert_eq!(pib.list_keys(true), vec![n("/org/user-1/KEY/0")]);
    assert_eq!(
        pib.list_certificates(true),
        vec![n("/org/user-1/KEY/0/ID-CERT/1")]
    );
}
