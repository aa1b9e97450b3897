// Application state for HTTP handlers
use crate::application::snapshot_builder::SnapshotBuilder;

#[derive(Clone)]
pub struct AppState {
    pub snapshot_builder: SnapshotBuilder,
}
