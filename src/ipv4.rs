use crate::error::{ParseError, MAX_INPUT_LEN};
use crate::inet::inet_pton;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// An IPv4 address with its prefix, plus the range it covers.
///
/// All integers are host order. `address` keeps the host bits as written,
/// `first_address` and `last_address` are the inclusive bounds of the block.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct CidrBlock {
    address: u32,
    mask: u32,
    prefix: u8,
    first: u32,
    last: u32,
}

/// Mask with `prefix` leading one bits. `prefix` must be at most 32.
pub fn prefix_mask(prefix: u8) -> u32 {
    match prefix {
        0 => 0,
        p if p >= 32 => u32::MAX,
        p => u32::MAX << (32 - p),
    }
}

impl CidrBlock {
    pub fn new(address: u32, prefix: u8) -> Result<Self, ParseError> {
        if prefix > 32 {
            return Err(ParseError::InvalidPrefix(prefix.to_string()));
        }
        let mask = prefix_mask(prefix);
        let first = address & mask;
        Ok(CidrBlock {
            address,
            mask,
            prefix,
            first,
            last: first | (mask ^ u32::MAX),
        })
    }

    pub fn address(&self) -> u32 {
        self.address
    }

    pub fn mask(&self) -> u32 {
        self.mask
    }

    pub fn prefix_length(&self) -> u8 {
        self.prefix
    }

    pub fn first_address(&self) -> u32 {
        self.first
    }

    pub fn last_address(&self) -> u32 {
        self.last
    }

    pub fn first_ip(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.first)
    }

    pub fn last_ip(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.last)
    }

    /// Number of addresses in the block.
    ///
    /// A zero-width range reports 1, anything wider reports the inclusive
    /// count, so `/0` gives 2^32.
    pub fn address_count(&self) -> u64 {
        let nip = u64::from(self.last - self.first);
        if nip > 0 {
            nip + 1
        } else {
            1
        }
    }

    pub fn contains(&self, ip: &Ipv4Addr) -> bool {
        u32::from(*ip) & self.mask == self.first
    }
}

/// Parses `a.b.c.d` or `a.b.c.d/p`.
///
/// A bare address is a `/32`. The prefix must be plain decimal digits with a
/// value in `0..=32`; nothing may follow it.
pub fn parse_cidr(text: &str) -> Result<CidrBlock, ParseError> {
    lazy_static! {
        static ref PREFIX: Regex = Regex::new(r"^[0-9]+$").expect("Not possible");
    }
    if text.len() > MAX_INPUT_LEN {
        log::debug!("rejecting {} byte input", text.len());
        return Err(ParseError::TooLong { len: text.len() });
    }
    let block = match text.split_once('/') {
        None => CidrBlock::new(u32::from(inet_pton(text)?), 32)?,
        Some((addr, prefix)) => {
            let address = u32::from(inet_pton(addr)?);
            let invalid = || ParseError::InvalidPrefix(prefix.to_owned());
            if !PREFIX.is_match(prefix) {
                log::debug!("rejecting prefix {:?} of {:?}", prefix, text);
                return Err(invalid());
            }
            let p = prefix.parse::<u8>().map_err(|_| invalid())?;
            CidrBlock::new(address, p).map_err(|_| invalid())?
        }
    };
    log::trace!("parsed {} as {}", text, block);
    Ok(block)
}

impl FromStr for CidrBlock {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cidr(s)
    }
}

impl Display for CidrBlock {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "{}/{}", self.first_ip(), self.prefix)
    }
}
