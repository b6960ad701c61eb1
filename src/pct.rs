//! Percent-encoding codec: sizing, validation, decoding, re-encoding,
//! and decoded-order comparison over percent-encoded byte sequences.

use crate::charset::CharSet;
use crate::error::{Error, ErrorKind, Result};

/// Options controlling the encode side of the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingOpts {
    /// Substitute `+` for 0x20 instead of `%20`. The permitted set must
    /// not itself contain 0x20 when this is set.
    pub space_as_plus: bool,
    /// Emit lowercase hex digits in escapes. Uppercase is canonical.
    pub lower_case: bool,
}

impl Default for EncodingOpts {
    fn default() -> Self {
        EncodingOpts {
            space_as_plus: false,
            lower_case: false,
        }
    }
}

/// Options controlling the decode side of the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodingOpts {
    /// Substitute 0x20 for `+` during decoding.
    pub plus_to_space: bool,
    /// Allow a decoded NUL byte (`%00` or raw 0x00). Default rejects it.
    pub allow_null: bool,
}

impl Default for DecodingOpts {
    fn default() -> Self {
        DecodingOpts {
            plus_to_space: false,
            allow_null: false,
        }
    }
}

pub(crate) fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Returns the number of bytes that decoding `s` under `opt` would
/// produce, without allocating. Validates escapes as it scans.
pub fn decoded_size(s: &str, opt: DecodingOpts) -> Result<usize> {
    let b = s.as_bytes();
    let mut i = 0;
    let mut n = 0;
    while i < b.len() {
        match b[i] {
            b'%' => {
                if i + 2 >= b.len() {
                    return Err(Error::new(ErrorKind::IncompleteEncoding, i));
                }
                let hi = hex_val(b[i + 1]).ok_or(Error::new(ErrorKind::BadHexDigit, i + 1))?;
                let lo = hex_val(b[i + 2]).ok_or(Error::new(ErrorKind::BadHexDigit, i + 2))?;
                let byte = (hi << 4) | lo;
                if byte == 0 && !opt.allow_null {
                    return Err(Error::new(ErrorKind::IllegalNull, i));
                }
                n += 1;
                i += 3;
            }
            0 => {
                if !opt.allow_null {
                    return Err(Error::new(ErrorKind::IllegalNull, i));
                }
                n += 1;
                i += 1;
            }
            _ => {
                n += 1;
                i += 1;
            }
        }
    }
    Ok(n)
}

/// Percent-decodes `s` into `dest`, writing at most `dest.len()` bytes
/// and returning the number actually written. Truncates silently if
/// `dest` is too small (matching the C-buffer semantics of the
/// original operation); use [`decoded_size`] first to size a buffer
/// exactly, or [`decode`] to get an owned `String`.
pub fn decode_to(dest: &mut [u8], s: &str, opt: DecodingOpts) -> Result<usize> {
    let b = s.as_bytes();
    let mut i = 0;
    let mut w = 0;
    while i < b.len() {
        let byte = match b[i] {
            b'%' => {
                if i + 2 >= b.len() {
                    return Err(Error::new(ErrorKind::IncompleteEncoding, i));
                }
                let hi = hex_val(b[i + 1]).ok_or(Error::new(ErrorKind::BadHexDigit, i + 1))?;
                let lo = hex_val(b[i + 2]).ok_or(Error::new(ErrorKind::BadHexDigit, i + 2))?;
                i += 3;
                (hi << 4) | lo
            }
            b'+' if opt.plus_to_space => {
                i += 1;
                b' '
            }
            c => {
                i += 1;
                c
            }
        };
        if byte == 0 && !opt.allow_null {
            return Err(Error::new(ErrorKind::IllegalNull, i));
        }
        if w < dest.len() {
            dest[w] = byte;
        }
        w += 1;
    }
    Ok(w.min(dest.len()))
}

/// Percent-decodes `s` and returns an owned, allocated `String`. Uses
/// this thread's [`crate::recycled`] scratch buffer as the decode
/// destination, so repeated calls on one thread reuse one growing
/// allocation instead of a fresh `Vec` per call; only the final,
/// exact-size copy handed back to the caller is a new allocation.
pub fn decode(s: &str, opt: DecodingOpts) -> Result<String> {
    let n = decoded_size(s, opt)?;
    let mut scratch = crate::recycled::checkout();
    let buf = scratch.as_mut_string();
    buf.clear();
    // Safe: every emitted byte is either ASCII or a raw byte carried
    // through from `s`, which is itself valid UTF-8 by construction —
    // non-ASCII octets only ever arrive already percent-encoded, the
    // same invariant `decode_to`'s callers already rely on.
    let bytes = unsafe { buf.as_mut_vec() };
    bytes.resize(n, 0);
    decode_to(bytes, s, opt)?;
    if std::str::from_utf8(bytes).is_err() {
        return Err(Error::new(ErrorKind::Invalid, 0));
    }
    Ok(buf.clone())
}

/// Returns the number of bytes that encoding `s` against `cset` under
/// `opt` would produce.
pub fn encoded_size<C: CharSet>(s: &[u8], cset: &C, opt: EncodingOpts) -> usize {
    let mut n = 0;
    for &c in s {
        if opt.space_as_plus && c == b' ' {
            n += 1;
        } else if cset.contains(c) {
            n += 1;
        } else {
            n += 3;
        }
    }
    n
}

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";
const HEX_LOWER: &[u8; 16] = b"0123456789abcdef";

/// Encodes `s` against `cset` into `dest`, returning the number of
/// bytes written. `dest` must be at least [`encoded_size`] bytes; if
/// not, writes as much as fits and returns `NoSpace`.
pub fn encode_to<C: CharSet>(
    dest: &mut [u8],
    s: &[u8],
    cset: &C,
    opt: EncodingOpts,
) -> Result<usize> {
    let hex = if opt.lower_case { HEX_LOWER } else { HEX_UPPER };
    let mut w = 0;
    for &c in s {
        if opt.space_as_plus && c == b' ' {
            if w >= dest.len() {
                return Err(Error::new(ErrorKind::NoSpace, w));
            }
            dest[w] = b'+';
            w += 1;
        } else if cset.contains(c) {
            if w >= dest.len() {
                return Err(Error::new(ErrorKind::NoSpace, w));
            }
            dest[w] = c;
            w += 1;
        } else {
            if w + 3 > dest.len() {
                return Err(Error::new(ErrorKind::NoSpace, w));
            }
            dest[w] = b'%';
            dest[w + 1] = hex[(c >> 4) as usize];
            dest[w + 2] = hex[(c & 0xf) as usize];
            w += 3;
        }
    }
    Ok(w)
}

/// Encodes `s` against `cset` and returns an owned `String`.
pub fn encode<C: CharSet>(s: &[u8], cset: &C, opt: EncodingOpts) -> String {
    let n = encoded_size(s, cset, opt);
    let mut buf = vec![0u8; n];
    let w = encode_to(&mut buf, s, cset, opt).expect("buffer sized by encoded_size");
    debug_assert_eq!(w, n);
    // Safe: every byte is either an original ASCII-permitted octet, a
    // '%'/'+' substitute, or a canonical hex digit.
    String::from_utf8(buf).expect("pct-encoded output is ASCII")
}

/// Validates that `s` is correctly percent-encoded against `cset`
/// (every literal, unescaped byte lies in `cset`) and returns the
/// decoded size on success.
pub fn validate<C: CharSet>(s: &str, cset: &C, opt: DecodingOpts) -> Result<usize> {
    let b = s.as_bytes();
    let mut i = 0;
    let mut n = 0;
    while i < b.len() {
        match b[i] {
            b'%' => {
                if i + 2 >= b.len() {
                    return Err(Error::new(ErrorKind::IncompleteEncoding, i));
                }
                let hi = hex_val(b[i + 1]).ok_or(Error::new(ErrorKind::BadHexDigit, i + 1))?;
                let lo = hex_val(b[i + 2]).ok_or(Error::new(ErrorKind::BadHexDigit, i + 2))?;
                let byte = (hi << 4) | lo;
                if byte == 0 && !opt.allow_null {
                    return Err(Error::new(ErrorKind::IllegalNull, i));
                }
                n += 1;
                i += 3;
            }
            c if cset.contains(c) => {
                n += 1;
                i += 1;
            }
            _ => return Err(Error::new(ErrorKind::IllegalReservedChar, i)),
        }
    }
    Ok(n)
}

/// Re-encodes an already-percent-encoded string `s`, canonicalizing
/// hex-digit case per `opt.lower_case`. Every literal byte must satisfy
/// `cset`, as in [`validate`].
pub fn re_encode<C: CharSet>(s: &str, cset: &C, opt: EncodingOpts) -> Result<String> {
    let hex = if opt.lower_case { HEX_LOWER } else { HEX_UPPER };
    let b = s.as_bytes();
    let mut out = String::with_capacity(b.len());
    let mut i = 0;
    while i < b.len() {
        match b[i] {
            b'%' => {
                if i + 2 >= b.len() {
                    return Err(Error::new(ErrorKind::IncompleteEncoding, i));
                }
                let hi = hex_val(b[i + 1]).ok_or(Error::new(ErrorKind::BadHexDigit, i + 1))?;
                let lo = hex_val(b[i + 2]).ok_or(Error::new(ErrorKind::BadHexDigit, i + 2))?;
                out.push('%');
                out.push(hex[(hi) as usize] as char);
                out.push(hex[(lo) as usize] as char);
                i += 3;
            }
            c if cset.contains(c) => {
                out.push(c as char);
                i += 1;
            }
            _ => return Err(Error::new(ErrorKind::IllegalReservedChar, i)),
        }
    }
    Ok(out)
}

fn next_decoded(b: &[u8], i: usize, opt: DecodingOpts) -> Option<(u8, usize)> {
    if i >= b.len() {
        return None;
    }
    match b[i] {
        b'%' if i + 2 < b.len() => {
            let hi = hex_val(b[i + 1])?;
            let lo = hex_val(b[i + 2])?;
            Some(((hi << 4) | lo, i + 3))
        }
        b'+' if opt.plus_to_space => Some((b' ', i + 1)),
        c => Some((c, i + 1)),
    }
}

/// Three-way comparison of the decoded forms of two percent-encoded
/// strings, without materializing either decoded string.
pub fn compare_decoded(a: &str, b: &str) -> std::cmp::Ordering {
    compare_decoded_opt(a, b, DecodingOpts::default(), false)
}

/// Case-insensitive variant of [`compare_decoded`], comparing decoded
/// octets after ASCII-lowercasing.
pub fn ci_compare_decoded(a: &str, b: &str) -> std::cmp::Ordering {
    compare_decoded_opt(a, b, DecodingOpts::default(), true)
}

fn compare_decoded_opt(
    a: &str,
    b: &str,
    opt: DecodingOpts,
    ci: bool,
) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    let (ab, bb) = (a.as_bytes(), b.as_bytes());
    let (mut ia, mut ib) = (0, 0);
    loop {
        let da = next_decoded(ab, ia, opt);
        let db = next_decoded(bb, ib, opt);
        match (da, db) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some((ca, na)), Some((cb, nb))) => {
                let (ca, cb) = if ci {
                    (ca.to_ascii_lowercase(), cb.to_ascii_lowercase())
                } else {
                    (ca, cb)
                };
                match ca.cmp(&cb) {
                    Ordering::Equal => {
                        ia = na;
                        ib = nb;
                    }
                    other => return other,
                }
            }
        }
    }
}

/// Returns the number of source bytes of `a` consumed by a decoded
/// prefix match against `b`, or 0 if `a`'s decoded form does not start
/// with `b`'s decoded form.
pub fn starts_with_decoded(a: &str, b: &str) -> usize {
    let (ab, bb) = (a.as_bytes(), b.as_bytes());
    let (mut ia, mut ib) = (0, 0);
    let opt = DecodingOpts::default();
    loop {
        let db = next_decoded(bb, ib, opt);
        let db = match db {
            None => return ia,
            Some(v) => v,
        };
        let da = match next_decoded(ab, ia, opt) {
            None => return 0,
            Some(v) => v,
        };
        if da.0 != db.0 {
            return 0;
        }
        ia = da.1;
        ib = db.1;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::charset::{PChar, Unreserved};

    #[test]
    fn decode_basic() {
        assert_eq!(decode("My%20Stuff", DecodingOpts::default()).unwrap(), "My Stuff");
        assert_eq!(decoded_size("My%20Stuff", DecodingOpts::default()).unwrap(), 8);
    }

    #[test]
    fn decode_rejects_null_by_default() {
        assert!(decode("%00", DecodingOpts::default()).is_err());
        let opt = DecodingOpts { allow_null: true, ..Default::default() };
        assert_eq!(decode("%00", opt).unwrap(), "\0");
    }

    #[test]
    fn decode_incomplete_and_bad_hex() {
        assert_eq!(
            decode("100%", DecodingOpts::default()).unwrap_err().kind,
            ErrorKind::IncompleteEncoding
        );
        assert_eq!(
            decode("100%zz", DecodingOpts::default()).unwrap_err().kind,
            ErrorKind::BadHexDigit
        );
    }

    #[test]
    fn plus_to_space() {
        let opt = DecodingOpts { plus_to_space: true, ..Default::default() };
        assert_eq!(decode("a+b", opt).unwrap(), "a b");
    }

    #[test]
    fn encode_round_trips_through_decode() {
        let s = b"hello world/?#";
        let enc = encode(s, &PChar, EncodingOpts::default());
        let dec = decode(&enc, DecodingOpts::default()).unwrap();
        assert_eq!(dec.as_bytes(), s);
    }

    #[test]
    fn encode_space_as_plus() {
        let opt = EncodingOpts { space_as_plus: true, ..Default::default() };
        assert_eq!(encode(b"a b", &Unreserved, opt), "a+b");
    }

    #[test]
    fn validate_rejects_reserved_outside_set() {
        assert!(validate("a/b", &Unreserved, DecodingOpts::default()).is_err());
        assert!(validate("a%2Fb", &Unreserved, DecodingOpts::default()).is_ok());
    }

    #[test]
    fn compare_decoded_matches_materialized_decode() {
        use std::cmp::Ordering;
        assert_eq!(compare_decoded("a%20b", "a b"), Ordering::Equal);
        assert_eq!(compare_decoded("a", "b"), Ordering::Less);
        assert_eq!(compare_decoded("ab", "a"), Ordering::Greater);
    }

    #[test]
    fn ci_compare_decoded_ignores_case() {
        use std::cmp::Ordering;
        assert_eq!(ci_compare_decoded("ABC", "abc"), Ordering::Equal);
    }

    #[test]
    fn starts_with_decoded_reports_consumed_length() {
        assert_eq!(starts_with_decoded("foo%2Fbar", "foo/"), 7);
        assert_eq!(starts_with_decoded("foo", "bar"), 0);
    }
}
