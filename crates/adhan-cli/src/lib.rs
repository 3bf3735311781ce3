//! Implementation crate for the `adhan` binary: schedule client, the
//! monitor loop, desktop alerts and the interactive command surface.

pub mod client;
pub mod config;
pub mod monitor;
pub mod notify;
pub mod repl;
pub mod table;
