// Three-phase voltage monitoring: raw telemetry batches in, metrics snapshots out
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
