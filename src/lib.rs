// lib.rs
pub mod builder;
pub mod classifier;
pub mod error;
pub mod graph;
pub mod mdcg;
pub mod pairing;
pub mod region;
pub mod result;
pub mod scaffold;
pub mod solution;
pub mod walk;
