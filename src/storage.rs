mod registry;
/// Roster files holding lists of employee records.
pub mod roster;

pub use registry::{Registry, RestoreError, SaveError, SeedError, seed};
pub use roster::{Format, LoadError, Roster};
