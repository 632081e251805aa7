//! Solidity fragments spliced into base contracts.
//!
//! Each builder renders one embedded template; the generators decide which
//! fragments are needed and in which [`crate::contract::Section`] they go.

use serde::Serialize;
use serde_json::json;

use crate::error::Result;
use crate::governance::{RewardConfig, RewardToken, StakingConfig};
use crate::templates::embedded;
use crate::templates::renderer::TemplateRenderer;

/// Transfer function body, selected from the (staking, rewards) decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferVariant {
    /// Staking check, delegate update, reward payout.
    StakedWithRewards,
    /// Reward payout only.
    Rewards,
    /// Staking check and delegate update.
    Staked,
    /// Unconditional transfer returning `true`.
    Plain,
}

impl TransferVariant {
    pub fn select(staking: bool, rewards: bool) -> Self {
        match (staking, rewards) {
            (true, true) => Self::StakedWithRewards,
            (false, true) => Self::Rewards,
            (true, false) => Self::Staked,
            (false, false) => Self::Plain,
        }
    }

    fn template(&self) -> &'static str {
        match self {
            Self::StakedWithRewards => embedded::STAKED_REWARD_TRANSFER,
            Self::Rewards => embedded::REWARD_TRANSFER,
            Self::Staked => embedded::STAKED_TRANSFER,
            Self::Plain => embedded::PLAIN_TRANSFER,
        }
    }
}

#[derive(Serialize)]
struct RewardData {
    reward_multiplier: u64,
    reward_token_param: bool,
    reward_token: &'static str,
    reward_token_address: String,
}

impl RewardData {
    fn new(config: &RewardConfig) -> Self {
        let (reward_token_param, reward_token, reward_token_address) = match &config.token {
            RewardToken::CallerSupplied => (true, "utAddr", String::new()),
            RewardToken::Fixed(address) => (false, "UTILITY_TOKEN", address.to_string()),
        };
        Self {
            reward_multiplier: config.multiplier.get(),
            reward_token_param,
            reward_token,
            reward_token_address,
        }
    }
}

/// `transfer(address,uint256)` override forwarding to `_transfer`.
pub fn plain_transfer(renderer: &TemplateRenderer) -> Result<String> {
    renderer.render(embedded::PLAIN_TRANSFER, &json!({}))
}

/// `transferFrom` override that approves the source before transferring.
pub fn auto_approve_transfer_from(renderer: &TemplateRenderer) -> Result<String> {
    renderer.render(embedded::AUTO_APPROVE_TRANSFER_FROM, &json!({}))
}

/// Governance transfer function for `variant`. Reward variants need `rewards`.
pub fn governance_transfer(
    renderer: &TemplateRenderer,
    variant: TransferVariant,
    rewards: Option<&RewardConfig>,
) -> Result<String> {
    match rewards {
        Some(config) => renderer.render(variant.template(), &RewardData::new(config)),
        None => renderer.render(variant.template(), &json!({})),
    }
}

/// Internal helper that delegates votes to holders above the voting threshold.
pub fn update_delegate(renderer: &TemplateRenderer) -> Result<String> {
    renderer.render(embedded::UPDATE_DELEGATE, &json!({}))
}

/// Reward multiplier constant, optional fixed token constant, and the payout event.
pub fn reward_declarations(renderer: &TemplateRenderer, config: &RewardConfig) -> Result<String> {
    renderer.render(embedded::REWARD_DECLARATIONS, &RewardData::new(config))
}

/// Staking balance/timestamp mappings and the staking constants.
pub fn staking_storage(renderer: &TemplateRenderer, config: &StakingConfig) -> Result<String> {
    renderer.render(
        embedded::STAKING_STORAGE,
        &json!({
            "min_staking_duration": config.min_staking_duration,
            "voting_threshold": config.voting_threshold.as_str(),
        }),
    )
}

/// `canWithdraw` modifier enforcing the minimum staking duration.
pub fn can_withdraw(renderer: &TemplateRenderer, config: &StakingConfig) -> Result<String> {
    renderer.render(
        embedded::CAN_WITHDRAW,
        &json!({ "duration_label": humanize_duration(config.min_staking_duration) }),
    )
}

/// `withdraw`, `getStakedBalance` and `stake`.
pub fn staking_functions(renderer: &TemplateRenderer) -> Result<String> {
    renderer.render(embedded::STAKING_FUNCTIONS, &json!({}))
}

/// Express a duration in the largest whole unit: `172800` → `2 days`.
pub fn humanize_duration(seconds: u64) -> String {
    const UNITS: [(u64, &str); 4] = [(86_400, "day"), (3_600, "hour"), (60, "minute"), (1, "second")];

    let (size, unit) = UNITS
        .iter()
        .copied()
        .find(|(size, _)| seconds != 0 && seconds % size == 0)
        .unwrap_or((1, "second"));
    let n = seconds / size;
    let plural = if n == 1 { "" } else { "s" };
    format!("{n} {unit}{plural}")
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU64;

    use super::*;
    use crate::address::Address;
    use crate::params::Amount;

    fn rewards(token: RewardToken) -> RewardConfig {
        RewardConfig {
            multiplier: NonZeroU64::new(10).unwrap(),
            token,
        }
    }

    #[test]
    fn test_decision_table() {
        assert_eq!(TransferVariant::select(true, true), TransferVariant::StakedWithRewards);
        assert_eq!(TransferVariant::select(false, true), TransferVariant::Rewards);
        assert_eq!(TransferVariant::select(true, false), TransferVariant::Staked);
        assert_eq!(TransferVariant::select(false, false), TransferVariant::Plain);
    }

    #[test]
    fn test_humanize_duration() {
        assert_eq!(humanize_duration(172_800), "2 days");
        assert_eq!(humanize_duration(86_400), "1 day");
        assert_eq!(humanize_duration(7_200), "2 hours");
        assert_eq!(humanize_duration(5_400), "90 minutes");
        assert_eq!(humanize_duration(45), "45 seconds");
        assert_eq!(humanize_duration(0), "0 seconds");
    }

    #[test]
    fn test_caller_supplied_reward_transfer() {
        let r = TemplateRenderer::new();
        let out = governance_transfer(
            &r,
            TransferVariant::Rewards,
            Some(&rewards(RewardToken::CallerSupplied)),
        )
        .unwrap();
        assert!(out.contains("function transfer(address to, uint256 amount, address utAddr) public {"));
        assert!(out.contains("ERC20 utilityToken = ERC20(utAddr);"));
        assert!(!out.contains("return true;"));
        assert!(!out.contains("getStakedBalance"));
    }

    #[test]
    fn test_fixed_token_reward_transfer() {
        let r = TemplateRenderer::new();
        let token = Address::parse("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        let config = rewards(RewardToken::Fixed(token));

        let out = governance_transfer(&r, TransferVariant::StakedWithRewards, Some(&config)).unwrap();
        assert!(out.contains(
            "function transfer(address to, uint256 amount) public override returns (bool) {"
        ));
        assert!(out.contains("ERC20 utilityToken = ERC20(UTILITY_TOKEN);"));
        assert!(out.contains("emit rewardsTransferred(from, to, rewardAmount);\n        return true;"));

        let decls = reward_declarations(&r, &config).unwrap();
        assert!(decls.contains(
            "address public constant UTILITY_TOKEN = 0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed;"
        ));
    }

    #[test]
    fn test_reward_declarations_order() {
        let r = TemplateRenderer::new();
        let out = reward_declarations(&r, &rewards(RewardToken::CallerSupplied)).unwrap();
        let constant = out.find("uint256 public constant REWARD_MULTIPLIER = 10;").unwrap();
        let event = out
            .find("event rewardsTransferred(address indexed from, address indexed to, uint256 amount);")
            .unwrap();
        assert!(constant < event);
        assert!(!out.contains("UTILITY_TOKEN"));
    }

    #[test]
    fn test_staking_fragments() {
        let r = TemplateRenderer::new();
        let config = StakingConfig {
            min_staking_duration: 172_800,
            voting_threshold: Amount::from(1000),
        };
        let storage = staking_storage(&r, &config).unwrap();
        assert!(storage.contains("uint256 public constant MIN_STAKING_DURATION = 172800;"));
        assert!(storage.contains("uint256 public constant VOTING_THRESHOLD = 1000;"));
        assert!(storage.contains("mapping(address => uint256) private stakingTimestamp;"));

        let guard = can_withdraw(&r, &config).unwrap();
        assert!(guard.contains("stakingTimestamp[msg.sender] + MIN_STAKING_DURATION"));
        assert!(guard.contains("minimum staking duration which is 2 days."));
    }
}
