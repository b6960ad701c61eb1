//! The owning, mutable `Url`: a growable buffer plus its
//! [`ComponentIndex`], and the edit-engine primitive every mutator in
//! this module is built on.
//!
//! The edit primitive mirrors `boost::urls::url_base::resize_impl` in
//! shape (`original_source/include/boost/url/impl/url_base.hpp`):
//! replace a byte range, then shift every span whose start lies at or past the
//! tail of the replaced range by the resulting length delta. This port
//! keeps the component spans as plain `Range<usize>` fields on
//! [`ComponentIndex`] rather than a single shared offset array, so the
//! shift is a handful of field updates instead of a loop over a fixed
//! table — see the representation note in `index.rs`.

use crate::charset::{CharSet, Fragment, Query, RegName, SchemeChar, UserinfoNc};
use crate::error::{Error, ErrorKind, Result};
use crate::index::{ComponentIndex, HostType, SchemeId, UserinfoIndex};
use crate::ip::{Ipv4Address, Ipv6Address};
use crate::pct::{self, DecodingOpts};
use crate::rules::{param_texts, parse_uri_reference, segment_texts, validate_path_text};
use crate::view::{split_param, Params, Segments, UrlView};

/// An owned, mutable URI reference: a `String` buffer plus the
/// [`ComponentIndex`] describing its structure.
#[derive(Debug, Clone)]
pub struct Url {
    buf: String,
    idx: ComponentIndex,
}

impl Url {
    pub fn parse(s: &str) -> Result<Url> {
        log::trace!("parsing url of length {}", s.len());
        let idx = parse_uri_reference(s)?;
        Ok(Url { buf: s.to_string(), idx })
    }

    pub fn view(&self) -> UrlView<'_> {
        UrlView::new(&self.buf, &self.idx)
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    // --- read accessors, delegating to `UrlView` ---

    pub fn scheme(&self) -> Option<&str> {
        self.view().scheme()
    }
    pub fn scheme_id(&self) -> SchemeId {
        self.idx.scheme_id
    }
    pub fn has_authority(&self) -> bool {
        self.idx.has_authority
    }
    pub fn has_userinfo(&self) -> bool {
        self.idx.has_userinfo()
    }
    pub fn user(&self) -> Option<&str> {
        self.view().user()
    }
    pub fn has_password(&self) -> bool {
        self.idx.has_password()
    }
    pub fn password(&self) -> Option<&str> {
        self.view().password()
    }
    pub fn host(&self) -> &str {
        self.view().host()
    }
    pub fn host_type(&self) -> HostType {
        self.idx.host_type
    }
    pub fn has_port(&self) -> bool {
        self.idx.has_port()
    }
    pub fn port(&self) -> Option<&str> {
        self.view().port()
    }
    pub fn port_number(&self) -> Option<u16> {
        self.idx.port_number(&self.buf)
    }
    pub fn path(&self) -> &str {
        self.view().path()
    }
    pub fn is_path_absolute(&self) -> bool {
        self.idx.is_path_absolute
    }
    pub fn segments(&self) -> Segments<'_> {
        self.view().segments()
    }
    pub fn has_query(&self) -> bool {
        self.idx.has_query()
    }
    pub fn query(&self) -> Option<&str> {
        self.view().query()
    }
    pub fn params(&self) -> Params<'_> {
        self.view().params()
    }
    pub fn has_fragment(&self) -> bool {
        self.idx.has_fragment()
    }
    pub fn fragment(&self) -> Option<&str> {
        self.view().fragment()
    }

    // --- the edit primitive ---

    fn ensure_capacity(&mut self, additional: usize) {
        let needed = self.buf.len() + additional;
        if needed > self.buf.capacity() {
            let grown = (self.buf.capacity() as f64 * 1.5) as usize;
            let target = grown.max(needed);
            log::trace!("growing url buffer from {} to {} bytes", self.buf.capacity(), target);
            self.buf.reserve(target - self.buf.len());
        }
    }

    /// `span.start` shifts when it lies at or after the edit point (it
    /// names something that comes after the edit); `span.end` only
    /// shifts when it lies strictly after it. A span whose `.end`
    /// merely coincides with the edit point (e.g. `host.end` sitting
    /// exactly where a port is about to be inserted) ends *before* the
    /// inserted text, not after it, and must not grow to swallow it.
    /// The exception is a zero-width span pinned exactly at the edit
    /// point (an empty path sitting right where a port or query is
    /// inserted): its `start` always shifts under the rule above, so
    /// `end` must follow it or the span stops being empty.
    fn shift(span: &mut std::ops::Range<usize>, at: usize, delta: isize) {
        let empty_at_edit = span.start == span.end && span.start == at;
        if span.start >= at {
            span.start = (span.start as isize + delta) as usize;
        }
        if span.end > at || empty_at_edit {
            span.end = (span.end as isize + delta) as usize;
        }
    }

    fn shift_spans(&mut self, at: usize, delta: isize) {
        if let Some(s) = self.idx.scheme.as_mut() {
            Self::shift(s, at, delta);
        }
        if let Some(u) = self.idx.userinfo.as_mut() {
            Self::shift(&mut u.user, at, delta);
            if let Some(p) = u.pass.as_mut() {
                Self::shift(p, at, delta);
            }
        }
        Self::shift(&mut self.idx.host, at, delta);
        if let Some(p) = self.idx.port.as_mut() {
            Self::shift(p, at, delta);
        }
        Self::shift(&mut self.idx.path, at, delta);
        if let Some(q) = self.idx.query.as_mut() {
            Self::shift(q, at, delta);
        }
        if let Some(f) = self.idx.fragment.as_mut() {
            Self::shift(f, at, delta);
        }
    }

    /// Replaces `buf[first..last]` with `encoded`, growing the buffer
    /// 1.5x ahead of need when it's too small, then shifts every span
    /// at or past `last` by the resulting length delta. Callers that
    /// replace a named component always overwrite that component's own
    /// span afterward with an exact value, so it doesn't matter whether
    /// this generic shift also touched it along the way.
    fn splice(&mut self, first: usize, last: usize, encoded: &str) -> isize {
        let old_len = last - first;
        if encoded.len() > old_len {
            self.ensure_capacity(encoded.len() - old_len);
        }
        self.buf.replace_range(first..last, encoded);
        let delta = encoded.len() as isize - old_len as isize;
        self.shift_spans(last, delta);
        delta
    }

    // --- scheme ---

    pub fn set_scheme(&mut self, scheme_text: &str) -> Result<()> {
        let b = scheme_text.as_bytes();
        if b.is_empty() || !b[0].is_ascii_alphabetic() {
            return Err(Error::new(ErrorKind::BadSchemeStart, 0));
        }
        if let Some(bad) = b.iter().position(|&c| !SchemeChar.contains(c)) {
            return Err(Error::new(ErrorKind::BadSchemeChar, bad));
        }
        match self.idx.scheme.clone() {
            Some(span) => {
                self.splice(span.start, span.end, scheme_text);
                self.idx.scheme = Some(span.start..span.start + scheme_text.len());
            }
            None => {
                let mut text = String::with_capacity(scheme_text.len() + 1);
                text.push_str(scheme_text);
                text.push(':');
                self.splice(0, 0, &text);
                self.idx.scheme = Some(0..scheme_text.len());
            }
        }
        self.idx.scheme_id = SchemeId::classify(scheme_text);
        Ok(())
    }

    // --- userinfo ---

    fn userinfo_bounds(&self) -> Option<(usize, usize)> {
        self.idx.userinfo.as_ref().map(|u| {
            let last = u.pass.as_ref().map(|p| p.end).unwrap_or(u.user.end);
            (u.user.start, last)
        })
    }

    pub fn set_userinfo(&mut self, user: &str, pass: Option<&str>) -> Result<()> {
        if !self.idx.has_authority {
            return Err(Error::new(ErrorKind::BadAuthority, 0));
        }
        pct::validate(user, &UserinfoNc, DecodingOpts::default())?;
        if let Some(p) = pass {
            pct::validate(p, &UserinfoNc, DecodingOpts::default())?;
        }
        let body = match pass {
            Some(p) => format!("{}:{}", user, p),
            None => user.to_string(),
        };
        let (first, last, had_existing) = match self.userinfo_bounds() {
            Some((first, last)) => (first, last, true),
            None => (self.idx.host.start, self.idx.host.start, false),
        };
        let text = if had_existing { body.clone() } else { format!("{}@", body) };
        self.splice(first, last, &text);
        let user_span = first..first + user.len();
        let pass_span = pass.map(|p| user_span.end + 1..user_span.end + 1 + p.len());
        self.idx.userinfo = Some(UserinfoIndex { user: user_span, pass: pass_span });
        Ok(())
    }

    pub fn set_password(&mut self, pass: Option<&str>) -> Result<()> {
        let user = self
            .view()
            .user()
            .ok_or_else(|| Error::new(ErrorKind::BadAuthority, 0))?
            .to_string();
        self.set_userinfo(&user, pass)
    }

    pub fn remove_userinfo(&mut self) -> Result<()> {
        if let Some((first, _)) = self.userinfo_bounds() {
            let last = self.idx.host.start;
            self.splice(first, last, "");
            self.idx.userinfo = None;
        }
        Ok(())
    }

    // --- host ---

    pub fn set_host(&mut self, host_encoded: &str) -> Result<()> {
        if !self.idx.has_authority {
            return Err(Error::new(ErrorKind::BadAuthority, 0));
        }
        pct::validate(host_encoded, &RegName, DecodingOpts::default())?;
        let (first, last) = (self.idx.host.start, self.idx.host.end);
        self.splice(first, last, host_encoded);
        self.idx.host = first..first + host_encoded.len();
        self.idx.host_type = HostType::Name;
        self.idx.ip_addr = [0; 16];
        self.idx.decoded_host_len =
            pct::decoded_size(host_encoded, DecodingOpts::default()).unwrap_or(host_encoded.len());
        Ok(())
    }

    pub fn set_host_ipv4(&mut self, addr: Ipv4Address) -> Result<()> {
        if !self.idx.has_authority {
            return Err(Error::new(ErrorKind::BadAuthority, 0));
        }
        let text = addr.to_string();
        let (first, last) = (self.idx.host.start, self.idx.host.end);
        self.splice(first, last, &text);
        self.idx.host = first..first + text.len();
        self.idx.host_type = HostType::Ipv4;
        self.idx.ip_addr = [0; 16];
        self.idx.ip_addr[..4].copy_from_slice(&addr.to_bytes());
        self.idx.decoded_host_len = text.len();
        Ok(())
    }

    pub fn set_host_ipv6(&mut self, addr: Ipv6Address) -> Result<()> {
        if !self.idx.has_authority {
            return Err(Error::new(ErrorKind::BadAuthority, 0));
        }
        let text = format!("[{}]", addr);
        let (first, last) = (self.idx.host.start, self.idx.host.end);
        self.splice(first, last, &text);
        self.idx.host = first..first + text.len();
        self.idx.host_type = HostType::Ipv6;
        self.idx.ip_addr = addr.to_bytes();
        self.idx.decoded_host_len = text.len();
        Ok(())
    }

    // --- port ---

    pub fn set_port(&mut self, port: u16) -> Result<()> {
        if !self.idx.has_authority {
            return Err(Error::new(ErrorKind::BadAuthority, 0));
        }
        let text = port.to_string();
        match self.idx.port.clone() {
            Some(span) => {
                self.splice(span.start, span.end, &text);
                self.idx.port = Some(span.start..span.start + text.len());
            }
            None => {
                let at = self.idx.host.end;
                let insert = format!(":{}", text);
                self.splice(at, at, &insert);
                self.idx.port = Some(at + 1..at + 1 + text.len());
            }
        }
        Ok(())
    }

    pub fn remove_port(&mut self) -> Result<()> {
        if let Some(span) = self.idx.port.clone() {
            self.splice(span.start - 1, span.end, "");
            self.idx.port = None;
        }
        Ok(())
    }

    // --- path ---

    pub fn set_path(&mut self, path_encoded: &str) -> Result<()> {
        validate_path_text(path_encoded)?;
        if self.idx.has_authority {
            if !path_encoded.is_empty() && !path_encoded.starts_with('/') {
                return Err(Error::new(ErrorKind::MissingPathSeparator, 0));
            }
        } else if path_encoded.starts_with('/') {
            if path_encoded[1..].starts_with('/') {
                return Err(Error::new(ErrorKind::EmptyPathSegment, 1));
            }
        } else if !path_encoded.is_empty() && !self.idx.has_scheme() {
            let first_end = path_encoded.find('/').unwrap_or(path_encoded.len());
            if path_encoded[..first_end].contains(':') {
                return Err(Error::new(ErrorKind::MissingPathSeparator, first_end));
            }
        }
        let (first, last) = (self.idx.path.start, self.idx.path.end);
        self.splice(first, last, path_encoded);
        self.idx.path = first..first + path_encoded.len();
        self.idx.is_path_absolute = path_encoded.starts_with('/');
        self.idx.nseg = segment_texts(path_encoded).len();
        self.idx.decoded_path_len =
            pct::decoded_size(path_encoded, DecodingOpts::default()).unwrap_or(path_encoded.len());
        Ok(())
    }

    pub fn set_path_absolute(&mut self, path_encoded: &str) -> Result<()> {
        if path_encoded.is_empty() || path_encoded.starts_with('/') {
            self.set_path(path_encoded)
        } else {
            let text = format!("/{}", path_encoded);
            self.set_path(&text)
        }
    }

    pub fn segments_mut(&mut self) -> SegmentsMut<'_> {
        SegmentsMut { url: self }
    }

    // --- query ---

    pub fn set_query(&mut self, query_encoded: Option<&str>) -> Result<()> {
        match query_encoded {
            Some(q) => {
                pct::validate(q, &Query, DecodingOpts::default())?;
                match self.idx.query.clone() {
                    Some(span) => {
                        self.splice(span.start, span.end, q);
                        self.idx.query = Some(span.start..span.start + q.len());
                    }
                    None => {
                        let at = self
                            .idx
                            .fragment
                            .as_ref()
                            .map(|f| f.start - 1)
                            .unwrap_or(self.buf.len());
                        let text = format!("?{}", q);
                        self.splice(at, at, &text);
                        self.idx.query = Some(at + 1..at + 1 + q.len());
                    }
                }
                self.idx.nparam = param_texts(q).len();
                self.idx.decoded_query_len =
                    pct::decoded_size(q, DecodingOpts::default()).unwrap_or(q.len());
            }
            None => {
                if let Some(span) = self.idx.query.clone() {
                    self.splice(span.start - 1, span.end, "");
                    self.idx.query = None;
                    self.idx.nparam = 0;
                    self.idx.decoded_query_len = 0;
                }
            }
        }
        Ok(())
    }

    pub fn remove_query(&mut self) -> Result<()> {
        self.set_query(None)
    }

    pub fn params_mut(&mut self) -> ParamsMut<'_> {
        ParamsMut { url: self }
    }

    // --- fragment ---

    pub fn set_fragment(&mut self, frag_encoded: Option<&str>) -> Result<()> {
        match frag_encoded {
            Some(f) => {
                pct::validate(f, &Fragment, DecodingOpts::default())?;
                match self.idx.fragment.clone() {
                    Some(span) => {
                        self.splice(span.start, span.end, f);
                        self.idx.fragment = Some(span.start..span.start + f.len());
                    }
                    None => {
                        let at = self.buf.len();
                        let text = format!("#{}", f);
                        self.splice(at, at, &text);
                        self.idx.fragment = Some(at + 1..at + 1 + f.len());
                    }
                }
                self.idx.decoded_frag_len =
                    pct::decoded_size(f, DecodingOpts::default()).unwrap_or(f.len());
            }
            None => {
                if let Some(span) = self.idx.fragment.clone() {
                    self.splice(span.start - 1, span.end, "");
                    self.idx.fragment = None;
                    self.idx.decoded_frag_len = 0;
                }
            }
        }
        Ok(())
    }

    pub fn remove_fragment(&mut self) -> Result<()> {
        self.set_fragment(None)
    }

    // --- authority ---

    pub fn remove_authority(&mut self) -> Result<()> {
        if !self.idx.has_authority {
            return Ok(());
        }
        let content_start = match &self.idx.userinfo {
            Some(u) => u.user.start,
            None => self.idx.host.start,
        };
        let first = content_start - 2; // the "//" marker
        let last = self.idx.path.start;
        self.splice(first, last, "");
        self.idx.has_authority = false;
        self.idx.userinfo = None;
        self.idx.host = 0..0;
        self.idx.host_type = HostType::None;
        self.idx.port = None;
        self.idx.ip_addr = [0; 16];
        self.idx.decoded_host_len = 0;
        Ok(())
    }
}

/// Mutating handle over a [`Url`]'s path segments. Every operation
/// reconstructs the whole path from the current segment list and
/// re-splices it in one [`Url::set_path`] call; the edit engine's
/// per-call overhead is the same order of magnitude as a single-segment
/// splice would be, and this keeps segment bookkeeping in one place.
pub struct SegmentsMut<'u> {
    url: &'u mut Url,
}

impl<'u> SegmentsMut<'u> {
    fn current(&self) -> Vec<String> {
        segment_texts(self.url.path()).into_iter().map(String::from).collect()
    }

    fn rebuild(&mut self, segs: &[String]) -> Result<()> {
        if segs.is_empty() {
            self.url.set_path("")
        } else {
            let joined = segs.join("/");
            if self.url.is_path_absolute()
                || self.url.has_authority()
                || self.url.has_scheme_prefixed_colon_risk(&segs[0])
            {
                self.url.set_path(&format!("/{}", joined))
            } else {
                self.url.set_path(&joined)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    pub fn push(&mut self, segment_encoded: &str) -> Result<()> {
        let mut segs = self.current();
        segs.push(segment_encoded.to_string());
        self.rebuild(&segs)
    }

    pub fn pop(&mut self) -> Result<Option<String>> {
        let mut segs = self.current();
        let popped = segs.pop();
        self.rebuild(&segs)?;
        Ok(popped)
    }

    pub fn insert(&mut self, index: usize, segment_encoded: &str) -> Result<()> {
        let mut segs = self.current();
        if index > segs.len() {
            return Err(Error::new(ErrorKind::Invalid, index));
        }
        segs.insert(index, segment_encoded.to_string());
        self.rebuild(&segs)
    }

    pub fn erase(&mut self, index: usize) -> Result<()> {
        let mut segs = self.current();
        if index >= segs.len() {
            return Err(Error::new(ErrorKind::Invalid, index));
        }
        segs.remove(index);
        self.rebuild(&segs)
    }

    pub fn replace(&mut self, index: usize, segment_encoded: &str) -> Result<()> {
        let mut segs = self.current();
        if index >= segs.len() {
            return Err(Error::new(ErrorKind::Invalid, index));
        }
        segs[index] = segment_encoded.to_string();
        self.rebuild(&segs)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.url.set_path("")
    }
}

impl Url {
    /// `path-rootless`'s first segment may not contain `:` when there's
    /// no scheme to disambiguate it from one; `set_path` already checks
    /// this, but `SegmentsMut` needs to decide whether to force a
    /// leading `/` onto an otherwise scheme-less, authority-less,
    /// colon-bearing first segment rather than let it misparse as a
    /// scheme on reparse.
    fn has_scheme_prefixed_colon_risk(&self, first_segment: &str) -> bool {
        !self.has_scheme() && first_segment.contains(':')
    }

    fn has_scheme(&self) -> bool {
        self.idx.has_scheme()
    }
}

/// Mutating handle over a [`Url`]'s query parameters.
pub struct ParamsMut<'u> {
    url: &'u mut Url,
}

impl<'u> ParamsMut<'u> {
    fn current(&self) -> Vec<(String, Option<String>)> {
        match self.url.query() {
            Some(q) => param_texts(q)
                .into_iter()
                .map(|p| {
                    let (k, v) = split_param(p);
                    (k.to_string(), v.map(String::from))
                })
                .collect(),
            None => Vec::new(),
        }
    }

    fn rebuild(&mut self, params: &[(String, Option<String>)]) -> Result<()> {
        if params.is_empty() {
            self.url.set_query(None)
        } else {
            let text = params
                .iter()
                .map(|(k, v)| match v {
                    Some(v) => format!("{}={}", k, v),
                    None => k.clone(),
                })
                .collect::<Vec<_>>()
                .join("&");
            self.url.set_query(Some(&text))
        }
    }

    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    pub fn append(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        let mut params = self.current();
        params.push((key.to_string(), value.map(String::from)));
        self.rebuild(&params)
    }

    pub fn insert(&mut self, index: usize, key: &str, value: Option<&str>) -> Result<()> {
        let mut params = self.current();
        if index > params.len() {
            return Err(Error::new(ErrorKind::Invalid, index));
        }
        params.insert(index, (key.to_string(), value.map(String::from)));
        self.rebuild(&params)
    }

    pub fn erase(&mut self, index: usize) -> Result<()> {
        let mut params = self.current();
        if index >= params.len() {
            return Err(Error::new(ErrorKind::Invalid, index));
        }
        params.remove(index);
        self.rebuild(&params)
    }

    /// Replaces the first case-sensitive match for `key`, or appends if
    /// none exists.
    pub fn replace(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        let mut params = self.current();
        match params.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.map(String::from),
            None => params.push((key.to_string(), value.map(String::from))),
        }
        self.rebuild(&params)
    }

    /// Case-insensitive variant of [`ParamsMut::replace`], comparing
    /// decoded key bytes.
    pub fn replace_ci(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        let mut params = self.current();
        match params
            .iter_mut()
            .find(|(k, _)| pct::ci_compare_decoded(k, key) == std::cmp::Ordering::Equal)
        {
            Some(entry) => entry.1 = value.map(String::from),
            None => params.push((key.to_string(), value.map(String::from))),
        }
        self.rebuild(&params)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn set_scheme_replaces_in_place() {
        let mut u = Url::parse("http://example.com/a").unwrap();
        u.set_scheme("https").unwrap();
        assert_eq!(u.as_str(), "https://example.com/a");
        assert_eq!(u.scheme_id(), SchemeId::Https);
    }

    #[test]
    fn set_host_and_port() {
        let mut u = Url::parse("http://old.example/a?x=1").unwrap();
        u.set_host("new.example").unwrap();
        u.set_port(8080).unwrap();
        assert_eq!(u.as_str(), "http://new.example:8080/a?x=1");
        assert_eq!(u.port_number(), Some(8080));
    }

    #[test]
    fn set_host_ipv6_brackets_and_classifies() {
        let mut u = Url::parse("http://old.example/a").unwrap();
        let addr = Ipv6Address::parse("::1").unwrap();
        u.set_host_ipv6(addr).unwrap();
        assert_eq!(u.as_str(), "http://[::1]/a");
        assert_eq!(u.host_type(), HostType::Ipv6);
    }

    #[test]
    fn segments_mut_push_and_pop() {
        let mut u = Url::parse("http://h/a/b").unwrap();
        u.segments_mut().push("c").unwrap();
        assert_eq!(u.as_str(), "http://h/a/b/c");
        let popped = u.segments_mut().pop().unwrap();
        assert_eq!(popped, Some("c".to_string()));
        assert_eq!(u.as_str(), "http://h/a/b");
    }

    #[test]
    fn segments_mut_clear_leaves_empty_path() {
        let mut u = Url::parse("http://h/a/b").unwrap();
        u.segments_mut().clear().unwrap();
        assert_eq!(u.as_str(), "http://h");
    }

    #[test]
    fn params_mut_append_and_replace() {
        let mut u = Url::parse("http://h/p?a=1").unwrap();
        u.params_mut().append("b", Some("2")).unwrap();
        assert_eq!(u.as_str(), "http://h/p?a=1&b=2");
        u.params_mut().replace("a", Some("9")).unwrap();
        assert_eq!(u.as_str(), "http://h/p?a=9&b=2");
    }

    #[test]
    fn set_query_and_remove_query_roundtrip() {
        let mut u = Url::parse("http://h/p#frag").unwrap();
        u.set_query(Some("x=1")).unwrap();
        assert_eq!(u.as_str(), "http://h/p?x=1#frag");
        u.remove_query().unwrap();
        assert_eq!(u.as_str(), "http://h/p#frag");
    }

    #[test]
    fn set_fragment_insert_and_remove() {
        let mut u = Url::parse("http://h/p").unwrap();
        u.set_fragment(Some("top")).unwrap();
        assert_eq!(u.as_str(), "http://h/p#top");
        u.remove_fragment().unwrap();
        assert_eq!(u.as_str(), "http://h/p");
    }

    #[test]
    fn set_userinfo_and_remove() {
        let mut u = Url::parse("http://h/p").unwrap();
        u.set_userinfo("bob", Some("secret")).unwrap();
        assert_eq!(u.as_str(), "http://bob:secret@h/p");
        u.remove_userinfo().unwrap();
        assert_eq!(u.as_str(), "http://h/p");
    }

    #[test]
    fn remove_authority_drops_double_slash_and_host() {
        let mut u = Url::parse("http://h/p?q=1").unwrap();
        u.remove_authority().unwrap();
        assert_eq!(u.as_str(), "http:/p?q=1");
        assert!(!u.has_authority());
    }
}
