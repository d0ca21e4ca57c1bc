// src/application/mod.rs
//
// Application Layer
//
// Wires the database, repositories, services and sources together for the
// binary. Holds no logic of its own.

pub mod state;

pub use state::AppState;
