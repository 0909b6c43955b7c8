//! Utilities for building LCM datagrams and capturing logs in tests.
//!
//! The encoders produce raw wire bytes so tests can feed the decoder and the
//! reassembler exactly what a sender would put on the network.
//!
//! ```rust
//! use lcmframe_testing::encode_short;
//!
//! let wire = encode_short(1, "TEST", b"hello");
//! let datagram = lcmframe::decode(wire).expect("valid datagram");
//! assert_eq!(datagram.payload(), b"hello");
//! ```

pub mod datagram;
pub mod logging;

pub use datagram::{FragmentSpec, encode_fragment, encode_short, split_message};
pub use logging::{LoggerHandle, logger};
