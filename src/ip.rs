//! IPv4/IPv6 host address support.
//!
//! `auris`'s teacher parses hosts by handing the bracket-stripped text
//! straight to `std::net::Ipv4Addr`/`Ipv6Addr`'s `FromStr` (see
//! `parsers::parse_host`); this module keeps that approach — std
//! already enforces RFC 3986's no-leading-zero `dec-octet` rule and
//! understands `::`-compressed and IPv4-mapped IPv6 forms — and adds
//! the small classification surface Boost.URL's `ipv4_address`/
//! `ipv6_address` expose (`is_loopback`, `is_multicast`, ...), which
//! spec.md's out-of-scope list never excludes; it only excludes
//! "IPv4/IPv6 string formatting beyond what the grammar requires."
//! These are read-only classifications, not formatting.

use std::net::{Ipv4Addr, Ipv6Addr};

/// A parsed IPv4 host address, backing `host_type == Ipv4` in a
/// [`crate::index::ComponentIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Address(Ipv4Addr);

impl Ipv4Address {
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Ipv4Addr>().ok().map(Ipv4Address)
    }

    pub fn to_bytes(self) -> [u8; 4] {
        self.0.octets()
    }

    pub fn is_loopback(self) -> bool {
        self.0.is_loopback()
    }

    pub fn is_unspecified(self) -> bool {
        self.0.is_unspecified()
    }

    pub fn is_multicast(self) -> bool {
        self.0.is_multicast()
    }
}

impl std::fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A parsed IPv6 host address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv6Address(Ipv6Addr);

impl Ipv6Address {
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Ipv6Addr>().ok().map(Ipv6Address)
    }

    pub fn to_bytes(self) -> [u8; 16] {
        self.0.octets()
    }

    pub fn is_loopback(self) -> bool {
        self.0.is_loopback()
    }

    pub fn is_unspecified(self) -> bool {
        self.0.is_unspecified()
    }

    pub fn is_multicast(self) -> bool {
        self.0.is_multicast()
    }

    /// `fe80::/10`
    pub fn is_link_local(self) -> bool {
        let o = self.0.octets();
        o[0] == 0xfe && (o[1] & 0xc0) == 0x80
    }

    /// `fec0::/10` (deprecated by RFC 3879, still worth recognizing).
    pub fn is_site_local(self) -> bool {
        let o = self.0.octets();
        o[0] == 0xfe && (o[1] & 0xc0) == 0xc0
    }

    /// `::ffff:0:0/96`
    pub fn is_v4_mapped(self) -> bool {
        matches!(
            self.0.octets(),
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, ..]
        )
    }
}

impl std::fmt::Display for Ipv6Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ipv4_parses_and_classifies() {
        let a = Ipv4Address::parse("127.0.0.1").unwrap();
        assert!(a.is_loopback());
        assert_eq!(a.to_bytes(), [127, 0, 0, 1]);
    }

    #[test]
    fn ipv4_rejects_leading_zero() {
        assert!(Ipv4Address::parse("192.168.001.1").is_none());
    }

    #[test]
    fn ipv6_parses_and_classifies() {
        let a = Ipv6Address::parse("2001:db8::1").unwrap();
        assert_eq!(
            a.to_bytes(),
            [0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]
        );
        assert!(Ipv6Address::parse("::1").unwrap().is_loopback());
        assert!(Ipv6Address::parse("fe80::1").unwrap().is_link_local());
    }

    #[test]
    fn ipv6_v4_mapped() {
        let a = Ipv6Address::parse("::ffff:192.0.2.128").unwrap();
        assert!(a.is_v4_mapped());
    }
}
