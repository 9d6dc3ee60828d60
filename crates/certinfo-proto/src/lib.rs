//! Wire records for certificate chain disclosure.
//!
//! A certificate chain travels to the client as a sequence of text lines.
//! Each line is one [`Record`]: a batch opening, a batch closing, or a single
//! line of a certificate's armored text. Records optionally carry a
//! `@batch=<id>` tag that places them inside an enclosing batch, which is how
//! nesting is expressed on a transport that has no native grouping.
//!
//! ```text
//! :znc.in BATCH +<g0> znc.in/certinfo
//! @batch=<g0> :znc.in BATCH +<g1> znc.in/certinfo-certificate
//! @batch=<g1> :znc.in CERTINFO alice :-----BEGIN CERTIFICATE-----
//! @batch=<g0> :znc.in BATCH -<g1>
//! :znc.in BATCH -<g0>
//! ```
//!
//! # Security
//!
//! Encoding refuses payloads containing CR, LF or NUL, and tokens containing
//! spaces, so a record always occupies exactly one line and can never inject
//! a second command into the stream.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod batch;
pub mod errors;
pub mod record;
pub mod verb;

pub use batch::{BatchId, CERTIFICATE_BATCH_TYPE, CHAIN_BATCH_TYPE};
pub use errors::{ProtocolError, Result};
pub use record::{Record, WireLine};
pub use verb::Verb;
