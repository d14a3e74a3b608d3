//! `lsrs` lists directory contents. Options come from the command line and
//! from JSON documents named or embedded on it, which may load further
//! documents in turn.

pub mod cli;
pub mod dispatch;
pub mod display;
pub mod entry;
pub mod error;
pub mod options;
