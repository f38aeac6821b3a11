pub mod delegation;
pub mod physics;
pub mod replication;
pub mod snapshot;
