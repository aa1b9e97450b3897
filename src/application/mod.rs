// Application layer - Pipeline stages and the ports they depend on
pub mod aggregator;
pub mod clock;
pub mod load;
pub mod phase_classifier;
pub mod phase_extractor;
pub mod sanitizer;
pub mod snapshot_builder;
pub mod staleness;
pub mod trend;
