//! EdgeLab Core — candle domain, indicator kit, strategy catalog, and the
//! bar-by-bar position simulator.
//!
//! This crate contains everything needed to score one parameter set against
//! one candle series:
//! - Domain types (candles, intervals, signals, positions, trades)
//! - Canonical parameter sets with content-addressed fingerprints
//! - The legal parameter space every generator draws from
//! - Pure indicator functions over trailing slices
//! - Twenty-two signal strategies behind one trait
//! - The simulator with TP/SL-before-signal exit ordering
//!
//! Exploration scheduling, persistence, and scoring across periods live in
//! `edgelab-runner`.

pub mod backtest;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod params;
pub mod space;
pub mod strategy;
