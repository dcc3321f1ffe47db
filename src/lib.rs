//! wg-conf: WireGuard configuration file editing
//!
//! A library for reading, editing, and saving WireGuard configuration files
//! while preserving their line layout, ordering, comments, and any lines it
//! does not understand.

pub mod conf;
pub mod filter;
pub mod settings;
pub mod storage;

pub use conf::{AttrMap, ConfError, ConfigModel, PeerMap, Section, WireguardConfig};
