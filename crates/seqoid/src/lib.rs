//! Sortable, 12-byte, ObjectId-style identifiers.
//!
//! Every [`ObjectId`] packs four big-endian fields:
//!
//! ```text
//!  Byte Index:  0          3 4        6 7       8 9        11
//!               +-----------+----------+---------+-----------+
//!  Field:       | timestamp | machine  | process | sequence  |
//!               |   (32)    |   (24)   |  (16)   |   (24)    |
//!               +-----------+----------+---------+-----------+
//!               |<-------------- MSB -- 96 bits -- LSB ----->|
//! ```
//!
//! - `timestamp`: Unix seconds at creation
//! - `machine`: the low-order 3 bytes of a host hardware address, resolved
//!   once per process
//! - `process`: the lower 16 bits of the OS process id
//! - `sequence`: a process-wide 24-bit counter seeded from the OS random source
//!   and wrapping modulo 2^24
//!
//! The canonical rendering is 24 lowercase hex characters, which sorts in the
//! same order as the underlying bytes.
//!
//! # Example
//!
//! ```no_run
//! let id = seqoid::try_object_id().expect("no hardware address on this host");
//! assert_eq!(id.to_hex().len(), 24);
//! ```
//!
//! Hosts without a discoverable hardware address can supply the machine id
//! explicitly:
//!
//! ```
//! use seqoid::{
//!     AtomicSequenceCounter, ObjectIdGenerator, OsRandom, StaticMachineId, UnixClock,
//! };
//!
//! let generator = ObjectIdGenerator::new(
//!     AtomicSequenceCounter::new(OsRandom),
//!     UnixClock,
//!     StaticMachineId::new([0xaa, 0xbb, 0xcc]),
//! );
//! let id = generator.try_next_id().unwrap();
//! assert_eq!(id.machine_id(), [0xaa, 0xbb, 0xcc]);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod base32;
mod error;
mod generator;
mod global;
mod id;
mod machine;
mod rand;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::base32::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::global::*;
pub use crate::id::*;
pub use crate::machine::*;
pub use crate::rand::*;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
