//! GeneralizedTime / UTCTime codec.
//!
//! Certificates carry their validity interval as ASN.1 time values.
//! Encoding always produces GeneralizedTime; decoding also accepts
//! UTCTime for interoperability with older issuers. Only Zulu (UTC)
//! time is supported: an offset suffix is rejected, never interpreted.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

use crate::error::{PibError, Result};

/// ASN.1 tag for GeneralizedTime (`YYYYMMDDHHMMSSZ`).
pub const TAG_GENERALIZED_TIME: u8 = 0x18;

/// ASN.1 tag for UTCTime (`YYMMDDHHMMSSZ`).
pub const TAG_UTC_TIME: u8 = 0x17;

const GENERALIZED_CONTENT_LEN: usize = 15;
const UTC_CONTENT_LEN: usize = 13;

// ── Encoding ──────────────────────────────────────────────────────────────────

/// Encode `time` as a DER GeneralizedTime TLV.
///
/// The content is the 14 ASCII digits `YYYYMMDDHHMMSS` followed by `Z`.
/// Sub-second precision is truncated, not rounded. Years outside
/// 0000–9999 are not representable in GeneralizedTime; certificate
/// validity dates are expected to be in range.
pub fn encode_generalized_time(time: &DateTime<Utc>) -> Vec<u8> {
    let content = format!(
        "{:04}{:02}{:02}{:02}{:02}{:02}Z",
        time.year(),
        time.month(),
        time.day(),
        time.hour(),
        time.minute(),
        time.second()
    );
    let mut out = Vec::with_capacity(2 + content.len());
    out.push(TAG_GENERALIZED_TIME);
    encode_length(content.len(), &mut out);
    out.extend_from_slice(content.as_bytes());
    out
}

/// Append a DER length: short form below 128, minimal long form above.
fn encode_length(len: usize, out: &mut Vec<u8>) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }
    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    let significant = &bytes[skip..];
    out.push(0x80 | significant.len() as u8);
    out.extend_from_slice(significant);
}

// ── Decoding ──────────────────────────────────────────────────────────────────

/// Decode a GeneralizedTime or UTCTime TLV spanning the whole buffer.
///
/// UTCTime two-digit years resolve through the standard pivot:
/// `00–49 → 2000–2049`, `50–99 → 1950–1999`.
///
/// # Errors
///
/// Returns `PibError::Decode` when the tag is neither GeneralizedTime
/// nor UTCTime, the length is indefinite or does not match the content,
/// a digit position holds a non-digit, the final character is not `Z`,
/// or the digits do not name a valid calendar date.
pub fn decode_time(buf: &[u8]) -> Result<DateTime<Utc>> {
    let (&tag, rest) = buf
        .split_first()
        .ok_or_else(|| PibError::Decode("empty time value".to_string()))?;

    let (len, consumed) = read_length(rest)?;
    let content = &rest[consumed..];
    if content.len() != len {
        return Err(PibError::Decode(format!(
            "declared length {len} does not match {} content byte(s)",
            content.len()
        )));
    }

    match tag {
        TAG_GENERALIZED_TIME => {
            expect_content_len(content, GENERALIZED_CONTENT_LEN, "GeneralizedTime")?;
            let year = digits(content, 0, 4)? as i32;
            decode_fields(content, 4, year)
        }
        TAG_UTC_TIME => {
            expect_content_len(content, UTC_CONTENT_LEN, "UTCTime")?;
            let yy = digits(content, 0, 2)? as i32;
            let year = if yy <= 49 { 2000 + yy } else { 1900 + yy };
            decode_fields(content, 2, year)
        }
        other => Err(PibError::Decode(format!(
            "unexpected tag 0x{other:02X}, want GeneralizedTime (0x18) or UTCTime (0x17)"
        ))),
    }
}

/// Read a BER/DER length, returning `(length, bytes consumed)`.
fn read_length(buf: &[u8]) -> Result<(usize, usize)> {
    let (&first, rest) = buf
        .split_first()
        .ok_or_else(|| PibError::Decode("missing length".to_string()))?;

    if first < 0x80 {
        return Ok((first as usize, 1));
    }
    if first == 0x80 {
        return Err(PibError::Decode(
            "indefinite length is not allowed".to_string(),
        ));
    }

    let count = (first & 0x7F) as usize;
    if count > std::mem::size_of::<usize>() {
        return Err(PibError::Decode(format!(
            "length field of {count} bytes is too large"
        )));
    }
    if rest.len() < count {
        return Err(PibError::Decode("truncated length field".to_string()));
    }

    let mut len = 0usize;
    for &b in &rest[..count] {
        len = (len << 8) | b as usize;
    }
    Ok((len, 1 + count))
}

fn expect_content_len(content: &[u8], expected: usize, kind: &str) -> Result<()> {
    if content.len() != expected {
        return Err(PibError::Decode(format!(
            "{kind} content must be {expected} bytes, got {}",
            content.len()
        )));
    }
    Ok(())
}

/// Parse `MMDDHHMMSSZ` starting at `offset` and combine with `year`.
fn decode_fields(content: &[u8], offset: usize, year: i32) -> Result<DateTime<Utc>> {
    let month = digits(content, offset, 2)?;
    let day = digits(content, offset + 2, 2)?;
    let hour = digits(content, offset + 4, 2)?;
    let minute = digits(content, offset + 6, 2)?;
    let second = digits(content, offset + 8, 2)?;

    if content[offset + 10] != b'Z' {
        return Err(PibError::Decode(
            "only Zulu time is accepted (missing 'Z' suffix)".to_string(),
        ));
    }

    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .ok_or_else(|| {
            PibError::Decode(format!(
                "invalid calendar time {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
            ))
        })?;
    Ok(DateTime::from_naive_utc_and_offset(naive, Utc))
}

/// Parse `count` ASCII digits at `offset`.
fn digits(content: &[u8], offset: usize, count: usize) -> Result<u32> {
    let mut value = 0u32;
    for &b in &content[offset..offset + count] {
        if !b.is_ascii_digit() {
            return Err(PibError::Decode(format!(
                "non-digit byte 0x{b:02X} in time content"
            )));
        }
        value = value * 10 + u32::from(b - b'0');
    }
    Ok(value)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
