//! Infrastructure layer: adapters for side channels the domain reports to.

pub mod diagnostics;
