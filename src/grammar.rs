//! Grammar combinators.
//!
//! `auris` parses URI references with [`nom`] the same way the teacher
//! crate's `parsers` module does; this module is the thin, URI-shaped
//! vocabulary layer described in the design notes — named combinators
//! (`tuple_rule`/`variant_rule` via `nom::sequence::tuple`/
//! `nom::branch::alt` directly, plus `range_rule`, `token_rule`,
//! `not_empty_rule`, `squelch`) that read like the RFC 3986 grammar
//! they implement. No parallel combinator engine is built here: `nom`
//! remains the engine doing the sequencing/alternation/repetition
//! work; this module only adds the pieces `nom` doesn't ship —
//! char-set tokens and a `min`/`max` bounded range.
//!
//! Every rule in this crate parses `&str` input, so the combinators
//! below are specialized to it rather than generic over `nom`'s input
//! trait — there is exactly one caller.

use crate::charset::{find_if_not, CharSet};
use nom::error::{ErrorKind as NomErrorKind, ParseError};
use nom::Err as NomErr;

/// The error type every rule in this crate parses with: nom's own
/// `(input, kind)` pair, converted to this crate's [`crate::error::Error`]
/// at the public boundary (see `rules.rs`).
pub type NErr<'a> = (&'a str, NomErrorKind);

pub type PResult<'a, O> = nom::IResult<&'a str, O, NErr<'a>>;

/// `token_rule(cset)` — matches the maximal run of bytes in `cset`,
/// including a possibly-empty run. Percent-escapes are not special
/// here: callers that need `pct-encoded` runs inside a char-set token
/// (host, path, query, fragment) rely on `%` being a member of the
/// relevant [`CharSet`] (see [`crate::charset::PChar`] and friends).
pub fn token_rule<'a, C: CharSet>(cset: &C, input: &'a str) -> PResult<'a, &'a str> {
    let b = input.as_bytes();
    let n = find_if_not(b, cset);
    Ok((&input[n..], &input[..n]))
}

/// `delim_rule(c)` — matches a single literal byte.
pub fn delim_rule(c: char, input: &str) -> PResult<char> {
    nom::character::complete::char(c)(input)
}

/// `literal_rule(s)` — matches a literal string.
pub fn literal_rule<'a>(s: &'static str, input: &'a str) -> PResult<'a, &'a str> {
    nom::bytes::complete::tag(s)(input)
}

/// `not_empty_rule` — wraps `rule` and fails if it matched a
/// zero-length output.
pub fn not_empty_rule<'a, F>(mut rule: F, input: &'a str) -> PResult<'a, &'a str>
where
    F: FnMut(&'a str) -> PResult<'a, &'a str>,
{
    let (rest, value) = rule(input)?;
    if value.is_empty() {
        Err(NomErr::Error((rest, NomErrorKind::Verify)))
    } else {
        Ok((rest, value))
    }
}

/// `squelch` — run `rule`, discard its value.
pub fn squelch<'a, O, F>(mut rule: F, input: &'a str) -> PResult<'a, ()>
where
    F: FnMut(&'a str) -> PResult<'a, O>,
{
    let (rest, _) = rule(input)?;
    Ok((rest, ()))
}

/// `range_rule` — greedy repetition: apply `first` once then `next`
/// repeatedly, enforcing `min <= count <= max`. Returns the matched
/// elements as a `Vec`. This is an eager specialization appropriate
/// for this crate's transient grammar parse; the long-lived
/// [`crate::view::Segments`]/[`crate::view::Params`] views are lazy
/// over the *stored buffer*, independent of this parse-time range.
pub fn range_rule<'a, O, F, G>(
    mut first: F,
    mut next: G,
    min: usize,
    max: usize,
    input: &'a str,
) -> PResult<'a, Vec<O>>
where
    F: FnMut(&'a str) -> PResult<'a, O>,
    G: FnMut(&'a str) -> PResult<'a, O>,
{
    let mut out = Vec::new();
    let mut rest = input;
    match first(rest) {
        Ok((r, v)) => {
            out.push(v);
            rest = r;
        }
        Err(e) => {
            if min == 0 {
                return Ok((rest, out));
            }
            return Err(e);
        }
    }
    while out.len() < max {
        match next(rest) {
            Ok((r, v)) => {
                out.push(v);
                rest = r;
            }
            Err(_) => break,
        }
    }
    if out.len() < min {
        return Err(NomErr::Error((input, NomErrorKind::Many1)));
    }
    Ok((rest, out))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::charset::Alpha;

    #[test]
    fn token_rule_matches_maximal_run() {
        let (rest, tok) = token_rule(&Alpha, "abc123");
        assert_eq!(tok, "abc");
        assert_eq!(rest, "123");
    }

    #[test]
    fn range_rule_respects_min_max() {
        let one_digit = |i: &str| nom::bytes::complete::take::<_, _, NErr>(1usize)(i);
        assert!(range_rule(one_digit, one_digit, 1, 2, "").is_err());
        let (rest, v) = range_rule(one_digit, one_digit, 1, 2, "12345").unwrap();
        assert_eq!(v, vec!["1", "2"]);
        assert_eq!(rest, "345");
    }

    #[test]
    fn not_empty_rejects_blank_match() {
        assert!(not_empty_rule(|i| token_rule(&Alpha, i), "123").is_err());
        assert!(not_empty_rule(|i| token_rule(&Alpha, i), "abc123").is_ok());
    }
}
