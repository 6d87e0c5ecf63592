// Domain models: one sampled snapshot and the frame composed from it

mod frame;
mod snapshot;

pub use frame::{Frame, LINE_COUNT, Page};
pub use snapshot::{Celsius, SentinelReason, Snapshot};
