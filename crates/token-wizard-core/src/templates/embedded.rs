//! Compile-time embedded Solidity templates.
//!
//! Each constant loads a template file from `templates/solidity/` via [`include_str!`].
//! The paths are relative to this source file
//! (`crates/token-wizard-core/src/templates/embedded.rs`).
//!
//! ## Adding a new template
//!
//! 1. Place the template file under `templates/solidity/` (fragments in `fragments/`)
//! 2. Add a `pub const` here with `include_str!("../../../../templates/solidity/<path>")`
//! 3. Render it from [`crate::fragments`] or [`crate::provider`]
//! 4. A wrong path is a compile error, so a successful build confirms it
//!
//! ## Warning
//!
//! Do NOT modify template files without checking that the Handlebars variables still match
//! what the fragment builders pass in. Fragments are written with 4-space member
//! indentation and no surrounding blank lines.

// -------------------------------------------------------
// Base contract
// -------------------------------------------------------

pub const ERC20_BASE: &str = include_str!("../../../../templates/solidity/erc20.sol.hbs");

// -------------------------------------------------------
// Transfer fragments
// -------------------------------------------------------

pub const PLAIN_TRANSFER: &str = include_str!("../../../../templates/solidity/fragments/plain_transfer.sol.hbs");
pub const AUTO_APPROVE_TRANSFER_FROM: &str = include_str!("../../../../templates/solidity/fragments/auto_approve_transfer_from.sol.hbs");
pub const STAKED_REWARD_TRANSFER: &str = include_str!("../../../../templates/solidity/fragments/staked_reward_transfer.sol.hbs");
pub const REWARD_TRANSFER: &str = include_str!("../../../../templates/solidity/fragments/reward_transfer.sol.hbs");
pub const STAKED_TRANSFER: &str = include_str!("../../../../templates/solidity/fragments/staked_transfer.sol.hbs");

// -------------------------------------------------------
// Staking and reward fragments
// -------------------------------------------------------

pub const UPDATE_DELEGATE: &str = include_str!("../../../../templates/solidity/fragments/update_delegate.sol.hbs");
pub const REWARD_DECLARATIONS: &str = include_str!("../../../../templates/solidity/fragments/reward_declarations.sol.hbs");
pub const STAKING_STORAGE: &str = include_str!("../../../../templates/solidity/fragments/staking_storage.sol.hbs");
pub const CAN_WITHDRAW: &str = include_str!("../../../../templates/solidity/fragments/can_withdraw.sol.hbs");
pub const STAKING_FUNCTIONS: &str = include_str!("../../../../templates/solidity/fragments/staking_functions.sol.hbs");
