//! Metro route planner server.
//!
//! Loads a transit network from stop and edge records, and answers:
//! "what is the fastest way from this stop to that one, and where do I
//! change lines?"

pub mod config;
pub mod coordinator;
pub mod graph;
pub mod highlight;
pub mod network;
pub mod routing;
pub mod source;
pub mod web;
