//! A partial-information ("single dummy") contract bridge play engine.
//!
//! Where double-dummy analysis sees all four hands, this crate plays with
//! some hands unknown: the [`Game`] state machine tracks known holdings, a
//! shared pool of hidden cards, and per-seat voids inferred from failures to
//! follow suit, while keeping move legality exact and every play undoable.
//! The [`Sampler`] completes the partial deal into full deals consistent
//! with all accumulated information and scores each legal move through
//! [`dds-bridge/dds`][dds], the fundamental C++ double dummy solver, via
//! [our system crate][sys].
//!
//! [dds]: https://github.com/dds-bridge/dds
//! [sys]: https://lib.rs/crates/dds-bridge-sys
#![warn(missing_docs)]

mod contract;
mod deal;
mod play;
mod sample;
mod solver;

pub use contract::*;
pub use deal::*;
pub use play::*;
pub use sample::*;
pub use solver::*;
