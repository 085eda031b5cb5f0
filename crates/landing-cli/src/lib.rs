//! Landing pipeline orchestration and CLI support.

pub mod logging;
pub mod pipeline;
