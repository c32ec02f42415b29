//! Implementation of the [netstring] wire format.
//!
//! A netstring frames a byte payload as `<decimal length>:<payload>,`.
//! This crate provides a blocking decoder and encoder over `std::io`, a
//! streaming [`NetstringReader`] with configurable limits, and async
//! equivalents over tokio.
//!
//! [netstring]: https://cr.yp.to/proto/netstrings.txt

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod nonblocking;
pub mod reader;

pub use config::{DecoderConfig, DEFAULT_MAX_LEN};
pub use decode::{decode, decode_len};
pub use encode::{encode, encoded_len, to_vec};
pub use error::Error;
pub use nonblocking::{decode_async, encode_async};
pub use reader::NetstringReader;
