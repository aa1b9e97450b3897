// Infrastructure layer - External dependencies and adapters
pub mod clock;
pub mod config;
