//! Zellij plugin wrapper and entry point.
//!
//! The plugin shim only exists for `wasm` targets, where Zellij provides the
//! host functions it calls. Native builds get a stub `main` so the library and
//! its tests build and run on the development machine.

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
mod plugin;

#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
register_plugin!(plugin::State);

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!(
        "bookshelf {} is a Zellij plugin; build it with `--target wasm32-wasip1` and load the .wasm in Zellij",
        env!("CARGO_PKG_VERSION")
    );
}
