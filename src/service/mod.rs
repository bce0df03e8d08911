//! Application wiring for the ladder tool

pub mod app;

pub use app::Ladder;
