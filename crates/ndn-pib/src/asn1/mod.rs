//! ASN.1 BER/DER encoding for certificate validity fields.

pub mod time;

pub use time::{decode_time, encode_generalized_time, TAG_GENERALIZED_TIME, TAG_UTC_TIME};
