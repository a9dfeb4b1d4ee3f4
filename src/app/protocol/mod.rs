//! Native messaging protocol
//!
//! Chrome's native messaging contract: each direction carries a stream of
//! `[4-byte native-endian length][UTF-8 JSON]` frames and nothing else.
//! `framing` owns the byte layer; `messages` owns the typed request and
//! response shapes, validated at this boundary rather than accessed ad hoc.

pub mod framing;
pub mod messages;

pub use framing::{read_message, write_message};
pub use messages::{ErrorReply, LaunchReply, ListingReply, Request, Response};
