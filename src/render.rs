//! Presentation of parsed blocks.
//!
//! A `CidrBlock` keeps host-order integers. Callers pick a `Format` and a
//! `ByteOrder` and get the mask and range rendered the way the socket API
//! would show the corresponding `in_addr` values.

use crate::error::ParseError;
use crate::inet::htonl;
use crate::ipv4::{parse_cidr, CidrBlock};
use std::fmt::{Display, Error, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Format {
    String = 0,
    Bytes = 1,
    Integer = 2,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ByteOrder {
    Network = 0,
    Host = 1,
}

impl TryFrom<i64> for Format {
    type Error = ParseError;
    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Format::String),
            1 => Ok(Format::Bytes),
            2 => Ok(Format::Integer),
            _ => Err(ParseError::InvalidSelector(format!("format {}", code))),
        }
    }
}

impl TryFrom<i64> for ByteOrder {
    type Error = ParseError;
    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ByteOrder::Network),
            1 => Ok(ByteOrder::Host),
            _ => Err(ParseError::InvalidSelector(format!("byte order {}", code))),
        }
    }
}

impl FromStr for Format {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" | "str" => Ok(Format::String),
            "bytes" | "array" | "ary" => Ok(Format::Bytes),
            "integer" | "int" | "num" => Ok(Format::Integer),
            _ => Err(ParseError::InvalidSelector(format!("format {}", s))),
        }
    }
}

impl FromStr for ByteOrder {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "network" | "net" => Ok(ByteOrder::Network),
            "host" => Ok(ByteOrder::Host),
            _ => Err(ParseError::InvalidSelector(format!("byte order {}", s))),
        }
    }
}

/// One rendered address or mask.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Rendered {
    Str(String),
    Bytes([u8; 4]),
    Integer(u32),
}

impl Rendered {
    /// Renders a host-order value.
    ///
    /// `Network` shows the value as it sits in an `in_addr`; `Host` shows the
    /// raw host integer, so on little-endian machines its bytes come reversed.
    pub fn new(value: u32, format: Format, order: ByteOrder) -> Self {
        let v = match order {
            ByteOrder::Network => htonl(value),
            ByteOrder::Host => value,
        };
        match format {
            Format::String => Rendered::Str(dotted(v.to_ne_bytes())),
            Format::Bytes => Rendered::Bytes(v.to_ne_bytes()),
            Format::Integer => Rendered::Integer(v),
        }
    }
}

impl Display for Rendered {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            Rendered::Str(s) => write!(f, "{}", s),
            Rendered::Bytes(b) => write!(f, "[{}, {}, {}, {}]", b[0], b[1], b[2], b[3]),
            Rendered::Integer(v) => write!(f, "{}", v),
        }
    }
}

pub(crate) fn dotted(b: [u8; 4]) -> String {
    format!("{}.{}.{}.{}", b[0], b[1], b[2], b[3])
}

/// Everything the host boundary reports for one block.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CidrReport {
    pub cidr: String,
    pub address_count: u64,
    pub byte_order: ByteOrder,
    pub mask: Rendered,
    pub first: Rendered,
    pub last: Rendered,
}

impl CidrReport {
    pub fn new(block: &CidrBlock, format: Format, order: ByteOrder) -> Self {
        CidrReport {
            cidr: block.to_string(),
            address_count: block.address_count(),
            byte_order: order,
            mask: Rendered::new(block.mask(), format, order),
            first: Rendered::new(block.first_address(), format, order),
            last: Rendered::new(block.last_address(), format, order),
        }
    }
}

impl Display for CidrReport {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        writeln!(f, "cidr\t{}", self.cidr)?;
        writeln!(f, "count\t{}", self.address_count)?;
        writeln!(f, "order\t{}", self.byte_order as i64)?;
        writeln!(f, "mask\t{}", self.mask)?;
        writeln!(f, "first\t{}", self.first)?;
        writeln!(f, "last\t{}", self.last)
    }
}

/// Parses `text` and renders the block in one step.
pub fn cidr(text: &str, format: Format, order: ByteOrder) -> Result<CidrReport, ParseError> {
    parse_cidr(text).map(|block| CidrReport::new(&block, format, order))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_codes() {
        assert_eq!(Ok(Format::Integer), Format::try_from(2i64));
        assert_eq!(Ok(ByteOrder::Host), ByteOrder::try_from(1i64));
        assert!(matches!(Format::try_from(3i64), Err(ParseError::InvalidSelector(_))));
        assert!(matches!(Format::try_from(-1i64), Err(ParseError::InvalidSelector(_))));
        assert!(matches!(ByteOrder::try_from(2i64), Err(ParseError::InvalidSelector(_))));
        assert_eq!(Ok(Format::Bytes), "ARY".parse::<Format>());
        assert_eq!(Ok(ByteOrder::Network), "net".parse::<ByteOrder>());
        assert!("little".parse::<ByteOrder>().is_err());
    }

    #[test]
    fn network_order_report() {
        let r = cidr("10.0.0.0/24", Format::String, ByteOrder::Network).unwrap();
        assert_eq!("10.0.0.0/24", r.cidr);
        assert_eq!(256, r.address_count);
        assert_eq!(Rendered::Str("255.255.255.0".to_owned()), r.mask);
        assert_eq!(Rendered::Str("10.0.0.0".to_owned()), r.first);
        assert_eq!(Rendered::Str("10.0.0.255".to_owned()), r.last);

        let r = cidr("10.0.0.0/24", Format::Bytes, ByteOrder::Network).unwrap();
        assert_eq!(Rendered::Bytes([255, 255, 255, 0]), r.mask);
        assert_eq!(Rendered::Bytes([10, 0, 0, 255]), r.last);

        let r = cidr("10.0.0.0/24", Format::Integer, ByteOrder::Network).unwrap();
        assert_eq!(Rendered::Integer(htonl(0x0a0000ff)), r.last);
    }

    #[test]
    fn host_order_report() {
        let r = cidr("10.0.0.0/24", Format::Integer, ByteOrder::Host).unwrap();
        assert_eq!(ByteOrder::Host, r.byte_order);
        assert_eq!(Rendered::Integer(0xffffff00), r.mask);
        assert_eq!(Rendered::Integer(0x0a000000), r.first);
        assert_eq!(Rendered::Integer(0x0a0000ff), r.last);

        let r = cidr("10.0.0.0/24", Format::Bytes, ByteOrder::Host).unwrap();
        assert_eq!(Rendered::Bytes(0x0a0000ff_u32.to_ne_bytes()), r.last);
        // the cidr text never flips
        assert_eq!("10.0.0.0/24", r.cidr);
    }

    #[test]
    fn report_display() {
        let r = cidr("192.168.1.7/30", Format::String, ByteOrder::Network).unwrap();
        assert_eq!(
            "cidr\t192.168.1.4/30\ncount\t4\norder\t0\nmask\t255.255.255.252\nfirst\t192.168.1.4\nlast\t192.168.1.7\n",
            r.to_string()
        );
        assert_eq!("[1, 2, 3, 4]", Rendered::Bytes([1, 2, 3, 4]).to_string());
    }

    #[test]
    fn parse_failure_propagates() {
        assert!(matches!(
            cidr("10.0.0.0/", Format::String, ByteOrder::Network),
            Err(ParseError::InvalidPrefix(_))
        ));
    }
}
