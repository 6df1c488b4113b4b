// Copyright (C) 2024 Ecutel Project Developers
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

/// The `ecutel` library provides the core of the synthetic ECU telemetry
/// generator.
///
/// The `core` module holds the telemetry record and the engine phase model.
/// The `sim` module provides the `EngineSimulator`, which advances a
/// telemetry record through the engine operating phases on a fixed wall
/// clock interval. The library exports the `config` module and re-exports
/// the `rand` crate.
///
/// The simulator produces data for downstream consumers such as dashboards
/// and protocol testers. It does not talk to real hardware and defines no
/// wire format; the telemetry record layout is the only boundary artifact.
pub mod core;
pub mod sim;

#[macro_use]
extern crate log;

mod config;

pub use self::config::*;

pub use rand;

pub mod consts {
    /// Ecutel runtime version.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Minimum time between two committed simulator updates, in milliseconds.
    pub const UPDATE_INTERVAL_MS: u64 = 5_000;

    /// Number of auxiliary CAN input channels in the telemetry record.
    pub const CAN_CHANNELS: usize = 32;

    /// Number of auxiliary CAN input channels refreshed per update cycle.
    pub const CAN_CHANNELS_REFRESH: usize = 16;
}
