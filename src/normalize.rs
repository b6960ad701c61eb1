//! RFC 3986 §6 syntax-based normalization and §5.3 reference
//! resolution.
//!
//! `remove_dot_segments` is a direct transcription of the RFC 3986
//! §5.2.4 algorithm's string-prefix pseudocode; `resolve` follows the
//! §5.3 "Merge Paths" + "Remove Dot Segments" pseudocode, applying the
//! latter on every branch (including when the reference carries its
//! own authority, not only when it carries a scheme).

use crate::error::{Error, ErrorKind, Result};
use crate::pct::EncodingOpts;
use crate::rules::segment_texts;
use crate::url::Url;

/// RFC 3986 §5.2.4: removes `.` and `..` segments from a path, relative
/// to nothing but the path itself (no filesystem semantics). This is a
/// direct transcription of the five-way prefix match the RFC specifies
/// (input/output string buffers, not a segment `Vec`) — the edge cases
/// around a bare trailing `.`/`..` are easy to get subtly wrong with a
/// `split('/')`-based reimplementation, so this follows the spec text
/// exactly rather than reconstructing its effect.
pub fn remove_dot_segments(path: &str) -> String {
    let mut input = path.to_string();
    let mut output = String::new();
    while !input.is_empty() {
        if input.starts_with("../") {
            input.replace_range(0..3, "");
        } else if input.starts_with("./") {
            input.replace_range(0..2, "");
        } else if input.starts_with("/./") {
            input.replace_range(0..2, "");
        } else if input == "/." {
            input.replace_range(0..2, "/");
        } else if input.starts_with("/../") {
            input.replace_range(0..3, "");
            remove_last_segment(&mut output);
        } else if input == "/.." {
            input.replace_range(0..3, "/");
            remove_last_segment(&mut output);
        } else if input == "." || input == ".." {
            input.clear();
        } else {
            let search_from = if input.starts_with('/') { 1 } else { 0 };
            let seg_end = input[search_from..]
                .find('/')
                .map(|i| i + search_from)
                .unwrap_or_else(|| input.len());
            output.push_str(&input[..seg_end]);
            input.replace_range(0..seg_end, "");
        }
    }
    output
}

fn remove_last_segment(output: &mut String) {
    match output.rfind('/') {
        Some(i) => output.truncate(i),
        None => output.clear(),
    }
}

/// Lowercases the scheme and, for `Name`-typed hosts, the registered
/// name; re-encodes every percent-escape with uppercase hex digits
/// (unless `opt.lower_case` is set) and decodes any percent-triplet
/// whose decoded byte is itself `unreserved`, per RFC 3986 §6.2.2.
pub fn normalize_in_place(url: &mut Url, opt: EncodingOpts) -> Result<()> {
    log::trace!("normalizing url in place");
    if let Some(scheme) = url.scheme() {
        let lower = scheme.to_ascii_lowercase();
        if lower != scheme {
            url.set_scheme(&lower)?;
        }
    }
    if url.host_type() == crate::index::HostType::Name {
        let canon = unreserved_canonical(url.host(), opt)?;
        let lower = canon.to_ascii_lowercase();
        url.set_host(&lower)?;
    }
    if !url.path().is_empty() {
        let canon = unreserved_canonical(url.path(), opt)?;
        url.set_path(&canon)?;
    }
    if let Some(q) = url.query() {
        let canon = unreserved_canonical(q, opt)?;
        url.set_query(Some(&canon))?;
    }
    if let Some(f) = url.fragment() {
        let canon = unreserved_canonical(f, opt)?;
        url.set_fragment(Some(&canon))?;
    }
    Ok(())
}

/// Re-encodes `s` (already percent-encoded path/query/fragment/host
/// text) so every `%XX` triplet whose decoded byte is `unreserved` is
/// un-escaped, and every remaining triplet uses canonical hex-digit
/// case, per RFC 3986 §6.2.2.2. Literal bytes (including sub-delims and
/// other already-unescaped reserved characters) are left untouched —
/// unlike [`crate::pct::re_encode`], which assumes every literal byte belongs to a
/// single caller-supplied `CharSet`, this walks mixed-charset text
/// (a path carries `/`, a query carries `&`/`=`, ...).
fn unreserved_canonical(s: &str, opt: EncodingOpts) -> Result<String> {
    use crate::charset::{CharSet, Unreserved};
    use crate::pct::hex_val;
    let b = s.as_bytes();
    let hex: &[u8; 16] = if opt.lower_case { b"0123456789abcdef" } else { b"0123456789ABCDEF" };
    let mut out = String::with_capacity(b.len());
    let mut i = 0;
    while i < b.len() {
        if b[i] == b'%' {
            if i + 2 >= b.len() {
                return Err(Error::new(ErrorKind::IncompleteEncoding, i));
            }
            let hi = hex_val(b[i + 1]).ok_or_else(|| Error::new(ErrorKind::BadHexDigit, i + 1))?;
            let lo = hex_val(b[i + 2]).ok_or_else(|| Error::new(ErrorKind::BadHexDigit, i + 2))?;
            let byte = (hi << 4) | lo;
            if Unreserved.contains(byte) {
                out.push(byte as char);
            } else {
                out.push('%');
                out.push(hex[hi as usize] as char);
                out.push(hex[lo as usize] as char);
            }
            i += 3;
        } else {
            out.push(b[i] as char);
            i += 1;
        }
    }
    Ok(out)
}

/// RFC 3986 §5.3: resolves `reference` against `base`, returning a
/// freshly-built target `Url`. `base` must be absolute (carry a
/// scheme); otherwise returns `NotABase`.
pub fn resolve(base: &Url, reference: &Url) -> Result<Url> {
    log::trace!("resolving reference against base");
    let base_scheme = base.scheme().ok_or_else(|| Error::new(ErrorKind::NotABase, 0))?;

    if let Some(scheme) = reference.scheme() {
        let mut target = Url::parse(reference.as_str())?;
        let _ = scheme;
        return Ok(normalize_path_in(&mut target));
    }

    let mut out = String::new();
    out.push_str(base_scheme);
    out.push(':');

    if reference.has_authority() {
        append_authority(&mut out, reference);
        out.push_str(&remove_dot_segments(reference.path()));
        append_query(&mut out, reference);
    } else if reference.path().is_empty() {
        if base.has_authority() {
            append_authority(&mut out, base);
        }
        out.push_str(base.path());
        if reference.has_query() {
            append_query(&mut out, reference);
        } else {
            append_query(&mut out, base);
        }
    } else {
        if base.has_authority() {
            append_authority(&mut out, base);
        }
        let merged = if reference.path().starts_with('/') {
            reference.path().to_string()
        } else if base.has_authority() && base.path().is_empty() {
            format!("/{}", reference.path())
        } else {
            merge_paths(base.path(), reference.path())
        };
        out.push_str(&remove_dot_segments(&merged));
        append_query(&mut out, reference);
    }

    if reference.has_fragment() {
        out.push('#');
        out.push_str(reference.fragment().unwrap());
    }

    Url::parse(&out)
}

fn normalize_path_in(target: &mut Url) -> Url {
    let cleaned = remove_dot_segments(target.path());
    if cleaned != target.path() {
        let _ = target.set_path(&cleaned);
    }
    target.clone()
}

fn append_authority(out: &mut String, u: &Url) {
    out.push_str("//");
    if let Some(user) = u.user() {
        out.push_str(user);
        if let Some(pass) = u.password() {
            out.push(':');
            out.push_str(pass);
        }
        out.push('@');
    }
    out.push_str(u.host());
    if let Some(port) = u.port() {
        out.push(':');
        out.push_str(port);
    }
}

fn append_query(out: &mut String, u: &Url) {
    if let Some(q) = u.query() {
        out.push('?');
        out.push_str(q);
    }
}

/// RFC 3986 §5.3 "merge": the base's path up to and including its last
/// `/`, followed by the reference's path; `""` base path with an
/// authority merges as `"/" + reference`, handled by the caller.
fn merge_paths(base_path: &str, ref_path: &str) -> String {
    match base_path.rfind('/') {
        Some(i) => format!("{}{}", &base_path[..=i], ref_path),
        None => ref_path.to_string(),
    }
}

/// Exposed for tests and callers that want just the segment count of a
/// normalized path without building a full [`Url`].
pub fn normalized_segment_count(path: &str) -> usize {
    segment_texts(&remove_dot_segments(path)).len()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn remove_dot_segments_examples() {
        assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
        assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");
    }

    #[test]
    fn resolve_relative_path() {
        let base = Url::parse("http://a/b/c/d;p?q").unwrap();
        let r = Url::parse("g").unwrap();
        let out = resolve(&base, &r).unwrap();
        assert_eq!(out.as_str(), "http://a/b/c/g");
    }

    #[test]
    fn resolve_authority_reference_removes_dot_segments() {
        let base = Url::parse("http://a/b").unwrap();
        let r = Url::parse("//g/./x").unwrap();
        let out = resolve(&base, &r).unwrap();
        assert_eq!(out.as_str(), "http://g/x");
    }

    #[test]
    fn resolve_absolute_path_keeps_authority() {
        let base = Url::parse("http://a/b/c/d;p?q").unwrap();
        let r = Url::parse("/g").unwrap();
        let out = resolve(&base, &r).unwrap();
        assert_eq!(out.as_str(), "http://a/g");
    }

    #[test]
    fn resolve_query_only_keeps_base_path() {
        let base = Url::parse("http://a/b/c/d;p?q").unwrap();
        let r = Url::parse("?y").unwrap();
        let out = resolve(&base, &r).unwrap();
        assert_eq!(out.as_str(), "http://a/b/c/d;p?y");
    }

    #[test]
    fn resolve_empty_reference_keeps_everything() {
        let base = Url::parse("http://a/b/c/d;p?q").unwrap();
        let r = Url::parse("").unwrap();
        let out = resolve(&base, &r).unwrap();
        assert_eq!(out.as_str(), "http://a/b/c/d;p?q");
    }

    #[test]
    fn normalize_in_place_lowercases_scheme_and_host() {
        let mut u = Url::parse("HTTP://EXAMPLE.com/a%2Fb").unwrap();
        normalize_in_place(&mut u, EncodingOpts::default()).unwrap();
        assert_eq!(u.scheme(), Some("http"));
        assert_eq!(u.host(), "example.com");
    }
}
