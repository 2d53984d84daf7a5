//! # vsversion, a `VS_VERSIONINFO` parser
//!
//! `vsversion` reads the version resource (`RT_VERSION`) of a Windows PE binary and extracts the
//! product metadata in it: the binary `VS_FIXEDFILEINFO` record and the localized strings such as
//! `ProductName`, `CompanyName` or `FileVersion`.
//!
//! The input is the raw resource data, as found through the PE resource directory; locating it is
//! left to a PE parser.
//!
//! The resource is untrusted input. Every block is parsed inside a window bounded by its parent,
//! so nothing is ever read past a block's declared end. Problems that only mean "this is not a
//! version resource we understand" (a wrong signature, unknown blocks, string tables in other
//! languages) are skipped quietly; only structural corruption is reported as an
//! [`error::Error`].
//!
//! # Example
//!
//! ```rust
//! fn product_name(resource: &[u8]) -> Option<String> {
//!     match vsversion::parse(resource) {
//!         Ok(info) => info.properties.product_name().map(String::from),
//!         Err(err) => {
//!             eprintln!("broken version resource: {}", err);
//!             None
//!         }
//!     }
//! }
//! ```
//!
//! Tables are picked by a [`language::LanguageFilter`]; [`language::Whitelist::default`] reads
//! the language neutral and English ones. Anything implementing `Fn(&str) -> bool` works too:
//!
//! ```rust
//! use vsversion::{ParseOptions, VersionInfo};
//!
//! fn german_only(resource: &[u8]) -> vsversion::error::Result<VersionInfo> {
//!     let german = |key: &str| key.starts_with("0407");
//!     VersionInfo::parse_with_opts(resource, &german, &ParseOptions::permissive())
//! }
//! ```
//!
//! # Logging
//!
//! Skipped blocks, bad signatures and every extracted string are reported through the
//! [`log`](https://docs.rs/log) facade at `debug` level.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
extern crate alloc;

pub mod block;
pub mod error;
pub mod fixed;
pub mod language;
pub mod options;
pub mod properties;
pub mod utf16;
pub mod version_info;
pub mod window;

pub use crate::fixed::{VersionField, VsFixedFileInfo};
pub use crate::language::{AnyLanguage, LanguageFilter, Whitelist};
pub use crate::options::{ParseMode, ParseOptions};
pub use crate::properties::VersionProperties;
pub use crate::version_info::{VersionInfo, parse_properties_into};

/// Parses a raw `VS_VERSIONINFO` resource with the default language whitelist and options.
pub fn parse(bytes: &[u8]) -> error::Result<VersionInfo> {
    VersionInfo::parse(bytes)
}
