//! Syntax trees for both sides of the conversion.
//!
//! [`vb`] holds the source-side tree the front end hands over: an owned,
//! trivia-free Visual Basic subset where every node keeps its original
//! [`recast_common::Span`]. [`cs`] holds the target-side C# tree the
//! converter produces, together with a canonical compact rendering used by
//! logs and tests. Neither module interprets anything: the whole point of
//! keeping the trees dumb is that every translation decision lives in
//! `recast-convert` where it can be logged and diagnosed.

pub mod cs;
pub mod vb;
