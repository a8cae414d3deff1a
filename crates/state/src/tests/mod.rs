//! End-to-end flows through the bridge entry points.

mod deposits;
mod utils;
