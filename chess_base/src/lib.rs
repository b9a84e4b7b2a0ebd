//! # Base types for gridchess
//!
//! This is an auxiliary crate for `gridchess`, which contains the primitive value types
//! (squares, sides, piece kinds, square sets) and board geometry.
//!
//! Normally you don't want to use this crate directly. Use `gridchess` instead, which
//! re-exports everything declared here.

pub mod bitboard;
pub mod geometry;
pub mod types;
