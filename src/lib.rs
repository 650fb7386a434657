//! Sliding-tile merge puzzle ("2048").
//!
//! `core` holds the rules: a [`core::GameManager`] owns the [`core::Grid`],
//! resolves moves, spawns tiles and hands every resulting frame to an
//! [`core::Actuator`]. The remaining modules are adapters around it: a
//! ratatui terminal front end, plain text and JSON line writers, and the
//! TOML configuration used by the binary.

pub mod config;
pub mod console_interface;
pub mod core;
pub mod logging;
pub mod models;
pub mod text_interface;

#[cfg(test)]
mod test;
