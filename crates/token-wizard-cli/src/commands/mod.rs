//! CLI command implementations for token-wizard.
//!
//! Each module corresponds to a subcommand (`token-wizard <command>`).

pub mod generate;
pub mod serve;
