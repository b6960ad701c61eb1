//! `ComponentIndex` — the fixed-slot offset table populated by the
//! grammar and consumed by the view layer and edit engine.
//!
//! This is the idiomatic-Rust reading of Boost.URL's
//! `detail::url_impl` (`original_source/include/boost/url/detail/url_impl.hpp`):
//! a fixed set of component slots, a host-type/scheme-id discriminant,
//! cached decoded lengths, and segment/parameter counts. Where the C++
//! original stores every component as a single offset into a shared
//! array (so a component's extent is implicit in the next slot's
//! offset, and its leading RFC delimiter lives *inside* the stored
//! range), this port stores an explicit `(start, end)` byte range per
//! component with the delimiter already stripped, plus a presence
//! flag for components that distinguish "absent" from "present but
//! empty" (userinfo, password, port, query, fragment). The public
//! contract in spec.md §4.5 only ever hands callers delimiter-stripped
//! substrings, so this is an internal representation choice, not an
//! observable difference — see the Open Questions note in DESIGN.md.

use std::ops::Range;

pub type Span = Range<usize>;

/// Host classification, mirroring spec.md's `host_type` discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostType {
    #[default]
    None,
    Name,
    Ipv4,
    Ipv6,
    IpvFuture,
}

/// Well-known scheme classification. Comparison is ASCII
/// case-insensitive, per spec.md §4.4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemeId {
    #[default]
    None,
    Http,
    Https,
    Ws,
    Wss,
    Ftp,
    File,
    Unknown,
}

impl SchemeId {
    pub fn classify(scheme: &str) -> SchemeId {
        if scheme.eq_ignore_ascii_case("http") {
            SchemeId::Http
        } else if scheme.eq_ignore_ascii_case("https") {
            SchemeId::Https
        } else if scheme.eq_ignore_ascii_case("ws") {
            SchemeId::Ws
        } else if scheme.eq_ignore_ascii_case("wss") {
            SchemeId::Wss
        } else if scheme.eq_ignore_ascii_case("ftp") {
            SchemeId::Ftp
        } else if scheme.eq_ignore_ascii_case("file") {
            SchemeId::File
        } else {
            SchemeId::Unknown
        }
    }
}

/// Userinfo sub-components: a user span is always present once
/// userinfo is present at all (possibly empty); the password span is
/// `None` when no `:` separator appeared, `Some(span)` (possibly
/// empty) when one did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserinfoIndex {
    pub user: Span,
    pub pass: Option<Span>,
}

/// The populated component layout for one URI reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentIndex {
    pub scheme: Option<Span>,
    pub has_authority: bool,
    pub userinfo: Option<UserinfoIndex>,
    pub host: Span,
    pub host_type: HostType,
    pub port: Option<Span>,
    pub path: Span,
    pub is_path_absolute: bool,
    pub query: Option<Span>,
    pub fragment: Option<Span>,
    pub scheme_id: SchemeId,
    pub ip_addr: [u8; 16],
    pub nseg: usize,
    pub nparam: usize,
    pub decoded_host_len: usize,
    pub decoded_path_len: usize,
    pub decoded_query_len: usize,
    pub decoded_frag_len: usize,
}

impl ComponentIndex {
    pub fn has_scheme(&self) -> bool {
        self.scheme.is_some()
    }

    pub fn has_userinfo(&self) -> bool {
        self.userinfo.is_some()
    }

    pub fn has_password(&self) -> bool {
        matches!(&self.userinfo, Some(u) if u.pass.is_some())
    }

    pub fn has_port(&self) -> bool {
        self.port.is_some()
    }

    pub fn has_query(&self) -> bool {
        self.query.is_some()
    }

    pub fn has_fragment(&self) -> bool {
        self.fragment.is_some()
    }

    pub fn port_number(&self, buf: &str) -> Option<u16> {
        let span = self.port.as_ref()?;
        let text = &buf[span.clone()];
        if text.is_empty() {
            Some(0)
        } else {
            text.parse().ok()
        }
    }
}

#[inline]
pub fn slice<'a>(buf: &'a str, span: &Span) -> &'a str {
    &buf[span.clone()]
}
