#![doc(html_root_url = "https://docs.rs/lcmframe/latest")]
//! Decoding and reassembly of LCM datagrams.
//!
//! This crate turns raw UDP payloads of the LCM publish/subscribe protocol
//! into complete messages. It parses the short and fragmented header
//! variants, reassembles fragmented messages keyed by sequence number, and
//! offers a channel router for dispatching the results. The crate performs
//! no network I/O: callers hand it datagrams already read off the wire.

pub mod byte_order;
pub mod channel;
pub mod defragmenter;
pub mod error;
pub mod header;
pub mod metrics;
pub mod reassembler;

pub use channel::{ChannelHandler, ChannelRouter, Dispatch, Handler};
pub use defragmenter::Defragmenter;
pub use error::{DecodeError, ReassemblyError, RouteError, SubmitError};
pub use header::{
    Datagram,
    FragmentIndex,
    FragmentInfo,
    Header,
    LCM_DEFAULT_PORT,
    Magic,
    SequenceNumber,
    decode,
    decode_slice,
};
pub use reassembler::{
    AssembledMessage,
    PendingStatus,
    REASSEMBLY_TIMEOUT,
    ReassemblyConfig,
    Reassembler,
};
