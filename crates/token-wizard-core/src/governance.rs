//! Governance-token generator: base ERC20Votes plus optional staking and rewards.
//!
//! ## Feature coupling
//!
//! Staking drives vote delegation (`updateDelegate`), so it needs `ERC20Votes` in the
//! base contract:
//! - staking forces `votes` on before the base contract is requested;
//! - an explicit `votes: false` suppresses staking entirely.
//!
//! ## Layout
//!
//! ```text
//! Storage    staking mappings and constants          (staking)
//! Modifiers  canWithdraw                             (staking)
//! Members    REWARD_MULTIPLIER [UTILITY_TOKEN] event (rewards)
//!            transfer variant                        (always)
//!            updateDelegate                          (staking)
//!            withdraw / getStakedBalance / stake     (staking)
//! ```

use std::num::NonZeroU64;

use crate::address::Address;
use crate::contract::{ContractLayout, ContractSource, Section};
use crate::error::Result;
use crate::fragments::{self, TransferVariant};
use crate::params::{Amount, TokenParams};
use crate::provider::BaseContractProvider;
use crate::wizard::ContractWizard;

/// Staking parameters embedded as contract constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakingConfig {
    /// Minimum lock time in seconds before `withdraw` is allowed.
    pub min_staking_duration: u64,
    /// Staked balance at which an account self-delegates its votes.
    pub voting_threshold: Amount,
}

/// Where the reward payout token address comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RewardToken {
    /// Passed by the caller on every transfer: `transfer(address,uint256,address)`.
    #[default]
    CallerSupplied,
    /// Fixed at generation time as `UTILITY_TOKEN`; `transfer` keeps its ERC20 signature.
    Fixed(Address),
}

/// Reward payout parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardConfig {
    /// Divisor applied to the transferred amount.
    pub multiplier: NonZeroU64,
    pub token: RewardToken,
}

/// Optional governance features. `Some` enables a feature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GovernanceOptions {
    pub staking: Option<StakingConfig>,
    pub rewards: Option<RewardConfig>,
}

/// Feature set after applying the votes/staking coupling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    pub staking: bool,
    pub rewards: bool,
    pub votes: bool,
}

impl FeatureFlags {
    pub fn resolve(votes: Option<bool>, staking: bool, rewards: bool) -> Self {
        let staking = staking && votes != Some(false);
        Self {
            staking,
            rewards,
            votes: staking || votes == Some(true),
        }
    }
}

impl<P: BaseContractProvider> ContractWizard<P> {
    /// Generate a governance-token contract.
    pub fn generate_governance(
        &self,
        params: &TokenParams,
        options: &GovernanceOptions,
    ) -> Result<ContractSource> {
        params.validate()?;

        let flags = FeatureFlags::resolve(
            params.votes,
            options.staking.is_some(),
            options.rewards.is_some(),
        );
        let staking = options.staking.as_ref().filter(|_| flags.staking);
        let rewards = options.rewards.as_ref();

        if options.staking.is_some() && staking.is_none() {
            tracing::warn!(token = %params.symbol, "staking disabled because votes is explicitly off");
        }

        let mut params = params.clone();
        if flags.staking {
            params.votes = Some(true);
        }

        let base = self.provider.print(&params)?;
        let mut layout = ContractLayout::parse(&base)?;

        if let Some(config) = rewards {
            layout.push(
                Section::Members,
                fragments::reward_declarations(&self.renderer, config)?,
            );
        }

        let variant = TransferVariant::select(flags.staking, flags.rewards);
        layout.push(
            Section::Members,
            fragments::governance_transfer(&self.renderer, variant, rewards)?,
        );

        if let Some(config) = staking {
            layout.push(Section::Members, fragments::update_delegate(&self.renderer)?);
            layout.push(
                Section::Storage,
                fragments::staking_storage(&self.renderer, config)?,
            );
            layout.push(
                Section::Modifiers,
                fragments::can_withdraw(&self.renderer, config)?,
            );
            layout.push(Section::Members, fragments::staking_functions(&self.renderer)?);
        }

        let source = layout.render();
        tracing::info!(
            provider = self.provider.name(),
            token = %params.symbol,
            staking = flags.staking,
            rewards = flags.rewards,
            votes = flags.votes,
            ?variant,
            bytes = source.as_str().len(),
            "generated governance contract"
        );
        Ok(source)
    }
}
