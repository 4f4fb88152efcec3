//! Socket-API style address helpers.
//!
//! Byte swaps between host and network order, the strict dotted-quad parser
//! used for CIDR input, the permissive BSD `inet_aton` parser and the
//! `inet_ntoa` renderer. Integers handed to or returned from `inet_aton` and
//! `inet_ntoa` are in network byte order, i.e. the value an `in_addr.s_addr`
//! would hold on this machine.

use crate::error::ParseError;
use crate::render::{dotted, ByteOrder, Format, Rendered};
use lazy_static::lazy_static;
use regex::Regex;
use std::net::Ipv4Addr;
use std::str::FromStr;

#[inline]
pub fn htonl(v: u32) -> u32 {
    v.to_be()
}

#[inline]
pub fn ntohl(v: u32) -> u32 {
    u32::from_be(v)
}

#[inline]
pub fn htons(v: u16) -> u16 {
    v.to_be()
}

#[inline]
pub fn ntohs(v: u16) -> u16 {
    u16::from_be(v)
}

/// Parses exactly four decimal octets, `0..=255`, no leading zeros.
pub fn inet_pton(s: &str) -> Result<Ipv4Addr, ParseError> {
    Ipv4Addr::from_str(s).map_err(|_| ParseError::InvalidAddress(s.to_owned()))
}

/// Parses an address the way BSD `inet_aton` does.
///
/// Accepts one to four parts, each decimal, octal (leading `0`) or hex
/// (leading `0x`). The last part fills all remaining low-order bytes, so
/// `127.1` is `127.0.0.1` and `10.65536` is `10.1.0.0`.
/// Returns the address in network byte order.
pub fn inet_aton(s: &str) -> Result<u32, ParseError> {
    lazy_static! {
        static ref PART: Regex =
            Regex::new(r"^(?:0[xX]([0-9a-fA-F]+)|0([0-7]*)|([1-9][0-9]*))$").expect("Not possible");
    }
    let invalid = || ParseError::InvalidAddress(s.to_owned());

    let mut parts = Vec::with_capacity(4);
    for p in s.split('.') {
        if parts.len() == 4 {
            return Err(invalid());
        }
        let caps = PART.captures(p).ok_or_else(invalid)?;
        let parsed = if let Some(hex) = caps.get(1) {
            u32::from_str_radix(hex.as_str(), 16)
        } else if let Some(oct) = caps.get(2) {
            match oct.as_str() {
                "" => Ok(0),
                o => u32::from_str_radix(o, 8),
            }
        } else {
            caps.get(3)
                .map(|d| d.as_str())
                .ok_or_else(invalid)?
                .parse::<u32>()
        };
        parts.push(parsed.map_err(|_| invalid())?);
    }

    // every part but the last is one byte; the last fills what is left
    let (last, head) = parts.split_last().ok_or_else(invalid)?;
    if head.iter().any(|&b| b > 0xFF) {
        return Err(invalid());
    }
    let tail_bits = 32 - 8 * head.len() as u32;
    if tail_bits < 32 && *last >> tail_bits != 0 {
        return Err(invalid());
    }
    let host = head
        .iter()
        .enumerate()
        .fold(*last, |acc, (i, &b)| acc | (b << (24 - 8 * i as u32)));
    log::trace!("inet_aton({}) = {}", s, Ipv4Addr::from(host));
    Ok(htonl(host))
}

/// Renders a network-order integer as a dotted string or a byte array.
///
/// With `ByteOrder::Host` the value is taken to be in host order and is
/// converted with `htonl` first. `Format::Integer` is not a valid target.
pub fn inet_ntoa(value: u32, format: Format, order: ByteOrder) -> Result<Rendered, ParseError> {
    let net = match order {
        ByteOrder::Host => htonl(value),
        ByteOrder::Network => value,
    };
    let bytes = net.to_ne_bytes();
    match format {
        Format::String => Ok(Rendered::Str(dotted(bytes))),
        Format::Bytes => Ok(Rendered::Bytes(bytes)),
        Format::Integer => Err(ParseError::InvalidSelector(format!(
            "format {} is not supported by inet_ntoa",
            format as i64
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn swaps() {
        assert_eq!([127, 0, 0, 1], htonl(0x7f000001).to_ne_bytes());
        assert_eq!([0x12, 0x34], htons(0x1234).to_ne_bytes());
        assert_eq!(0x7f000001, ntohl(htonl(0x7f000001)));
        assert_eq!(0x1234, ntohs(htons(0x1234)));
    }

    #[test]
    fn pton_is_strict() {
        assert_eq!(Ipv4Addr::new(10, 0, 0, 1), inet_pton("10.0.0.1").unwrap());
        for bad in ["999.1.1.1", "10.0.0", "10.0.0.1.2", "010.0.0.1", "", "a.b.c.d", "1.2.3.4 "].iter() {
            assert_eq!(Err(ParseError::InvalidAddress(bad.to_string())), inet_pton(bad));
        }
    }

    #[test]
    fn aton_legacy_forms() {
        let host = |s: &str| ntohl(inet_aton(s).unwrap());
        assert_eq!(0x7f000001, host("127.0.0.1"));
        assert_eq!(0x7f000001, host("127.1"));
        assert_eq!(0x7f000001, host("0x7f.1"));
        assert_eq!(0x7f000001, host("0177.0.0.01"));
        assert_eq!(0x0a010000, host("10.65536"));
        assert_eq!(0xc0a80102, host("192.168.258"));
        assert_eq!(0xffffffff, host("4294967295"));
        assert_eq!(0, host("0"));
        assert_eq!([127, 0, 0, 1], inet_aton("127.0.0.1").unwrap().to_ne_bytes());
    }

    #[test]
    fn aton_rejects() {
        for bad in [
            "", "1.", ".1", "1..2", "256.1.1.1", "1.2.3.256", "1.2.65536", "4294967296",
            "08", "0xg", "1.2.3.4.5", "+1", "1 ",
        ]
        .iter()
        {
            assert!(inet_aton(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn ntoa_selectors() {
        let net = htonl(0xc0a80001);
        assert_eq!(
            Rendered::Str("192.168.0.1".to_owned()),
            inet_ntoa(net, Format::String, ByteOrder::Network).unwrap()
        );
        assert_eq!(
            Rendered::Str("192.168.0.1".to_owned()),
            inet_ntoa(0xc0a80001, Format::String, ByteOrder::Host).unwrap()
        );
        assert_eq!(
            Rendered::Bytes([192, 168, 0, 1]),
            inet_ntoa(0xc0a80001, Format::Bytes, ByteOrder::Host).unwrap()
        );
        assert!(matches!(
            inet_ntoa(net, Format::Integer, ByteOrder::Network),
            Err(ParseError::InvalidSelector(_))
        ));
    }

    #[quickcheck]
    fn aton_reads_what_ntoa_writes(net: u32) -> bool {
        match inet_ntoa(net, Format::String, ByteOrder::Network) {
            Ok(Rendered::Str(s)) => inet_aton(&s) == Ok(net),
            _ => false,
        }
    }
}
