#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::module_name_repetitions,
)]
pub mod cli;
pub mod engine;
pub mod grid;
pub mod host;
pub mod pilots;
pub mod stats;
