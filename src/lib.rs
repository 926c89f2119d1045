//! LDAP distinguished names.
//!
//! This crate provides types for working with distinguished names (DNs),
//! the hierarchical identifiers of entries in a directory service such as
//! LDAP. A DN consists of a sequence of *relative distinguished names*
//! (RDNs), each an `attribute=value` pair. In its string form the RDNs are
//! separated by commas and listed from the most specific to the least
//! specific one:
//!
//! ```text
//! cn=Andreas\, Arvidsson,ou=Karlstad,o=Repill Linpro,c=Sverige
//! ```
//!
//! Characters that would otherwise be mistaken for part of the syntax, such
//! as the comma in the first value above, are escaped with a backslash.
//!
//! The main types are [`Dn`] for a complete name and [`Rdn`] for one of its
//! components. An [`Rdn`] keeps its value both in raw form and in escaped
//! form. A [`Dn`] keeps its string form alongside the parsed components and
//! provides navigation to its ancestors as well as a hierarchical order.
//!
//! ```
//! use dn::Dn;
//!
//! let dn: Dn = r"cn=Andreas\, Arvidsson,ou=Karlstad,c=Sverige"
//!     .parse()
//!     .unwrap();
//! assert_eq!(dn.len(), 3);
//! assert_eq!(dn.rdn(0).to_string(), "c=Sverige");
//! assert_eq!(dn.last_value(), "Andreas, Arvidsson");
//! assert_eq!(dn.parent().unwrap(), "ou=Karlstad,c=Sverige");
//! ```
//!
//! The [scan] module contains the escape-aware scanner used for splitting
//! the string form.
//!
//! # Reference of Feature Flags
//!
//! * `serde`: Enables serializing [`Dn`] and [`Rdn`] as their string form
//!   and deserializing a [`Dn`] from it via
//!   [serde](https://serde.rs/).
//! * `std`: support for the Rust std library. This feature is enabled by
//!   default. Without it, the crate only requires `alloc`.
//! * `tracing`: emits trace events when parsing and deriving names via
//!   the [tracing](https://github.com/tokio-rs/tracing) crate.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
#[allow(unused_imports)] // Import macros even if unused.
#[macro_use]
extern crate std;

extern crate alloc;

pub use self::dn::{Dn, MalformedDnError, ParentIter, RdnIter};
pub use self::rdn::{escape_value, unescape_value, Rdn};

pub mod scan;

mod dn;
mod rdn;
mod serde;
