//! Discovery documents for the federation protocol.
//!
//! - [`XrdDocument`] / [`Link`] — the Extensible Resource Descriptor model
//! - [`xml`] and [`json`] — its two wire codecs, both strict readers that
//!   report unreadable input as [`Error::InvalidDocument`]
//! - [`HostMeta`] — the `/.well-known/host-meta` document pointing at
//!   WebFinger
//!
//! Serialization is deterministic: the same document always produces the
//! same bytes for a given [`WireConfig`].

mod host_meta;
pub mod json;
mod link;
pub mod xml;
mod xrd;

pub use federation_types::{Error, Format, Result, Timestamp, WireConfig};
pub use host_meta::{HostMeta, LRDD_REL, LRDD_TYPE, URI_PLACEHOLDER};
pub use link::Link;
pub use xrd::{XRD_NAMESPACE, XrdDocument};
