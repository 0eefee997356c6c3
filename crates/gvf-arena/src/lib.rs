//! Double-buffered working storage for iterative solvers.
//!
//! # Architecture
//!
//! ```text
//! PingPong<B>
//! ├── buffers: [B; 2]   (seed slot = First)
//! ├── read: Slot        (flipped on every commit)
//! └── steps: u32        (completed steps)
//! ```
//!
//! Step `i` reads `buffers[read]` and writes `buffers[1 - read]`. A step
//! can never read and write the same buffer: the two halves are handed out
//! as a split borrow, one shared and one exclusive.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod pingpong;

pub use pingpong::{PingPong, Slot};
