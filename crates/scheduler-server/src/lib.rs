//! HTTP front-end for the task scheduler.
//!
//! The binary wires [`config::Config`] into [`server::serve`]; the router is
//! exposed separately so it can be driven in tests without a socket.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod server;
pub mod state;
