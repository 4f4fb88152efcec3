//! IPv4 address helpers and CIDR block parsing.
//!
//! ```
//! use iputil::{parse_cidr, ByteOrder, Format};
//!
//! let block = parse_cidr("10.0.0.0/24").unwrap();
//! assert_eq!(256, block.address_count());
//!
//! let report = iputil::cidr("10.0.0.7/24", Format::String, ByteOrder::Network).unwrap();
//! assert_eq!("10.0.0.0/24", report.cidr);
//! ```

pub mod error;
pub mod inet;
pub mod ipv4;
pub mod render;

pub use error::ParseError;
pub use inet::{htonl, htons, inet_aton, inet_ntoa, inet_pton, ntohl, ntohs};
pub use ipv4::{parse_cidr, prefix_mask, CidrBlock};
pub use render::{cidr, ByteOrder, CidrReport, Format, Rendered};
