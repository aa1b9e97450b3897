// Domain layer - Telemetry input and metrics output models
pub mod alert;
pub mod phase;
pub mod snapshot;
pub mod telemetry;
