//! Core library for the token-wizard toolkit.
//!
//! Generates ERC20-style Solidity contracts by composing template fragments around a
//! base contract from a [`provider::BaseContractProvider`]:
//! - [`ContractWizard::generate_utility`] — utility token, optionally with an
//!   auto-approving `transferFrom` for reward payouts
//! - [`ContractWizard::generate_governance`] — vote-delegating governance token with
//!   optional staking and reward transfers
//!
//! Generation is pure and synchronous: no I/O, no shared state, identical input
//! always yields byte-identical output. Fragments are placed through the section
//! model in [`contract`] rather than by splicing at brace offsets.

pub mod address;
pub mod contract;
pub mod error;
pub mod fragments;
pub mod governance;
pub mod params;
pub mod provider;
pub mod request;
pub mod templates;
pub mod utility;
mod wizard;

pub use contract::ContractSource;
pub use error::{Result, WizardError};
pub use governance::{GovernanceOptions, RewardConfig, RewardToken, StakingConfig};
pub use params::TokenParams;
pub use wizard::ContractWizard;
