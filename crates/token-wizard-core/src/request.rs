//! Request payloads for the generators.
//!
//! These are the JSON bodies accepted by the HTTP gateway and the request files read
//! by `token-wizard generate`. Field names are camelCase:
//!
//! ```json
//! {
//!   "name": "Gov", "symbol": "GOV", "premint": "1000",
//!   "mintable": false, "burnable": false, "pausable": false,
//!   "permit": false, "flashmint": false, "access": false,
//!   "staking": true, "rewards": true,
//!   "minStakingDuration": 172800, "rewardsMultiplier": 10, "votingThreshold": 1000
//! }
//! ```
//!
//! Values belonging to a disabled feature are ignored.

use std::num::NonZeroU64;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::{Result, WizardError};
use crate::governance::{GovernanceOptions, RewardConfig, RewardToken, StakingConfig};
use crate::params::{deserialize_optional_u64, Amount, TokenParams};

/// Body of `POST /ut-contract`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilityContractRequest {
    #[serde(flatten)]
    pub token: TokenParams,
    #[serde(default)]
    pub rewards: bool,
}

impl UtilityContractRequest {
    /// Validated token parameters and the rewards flag.
    pub fn into_parts(self) -> Result<(TokenParams, bool)> {
        self.token.validate()?;
        Ok((self.token, self.rewards))
    }
}

/// Body of `POST /gt-contract`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceContractRequest {
    #[serde(flatten)]
    pub token: TokenParams,
    #[serde(default)]
    pub staking: bool,
    #[serde(default)]
    pub rewards: bool,
    /// Seconds. Required when `staking` is set.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_staking_duration: Option<u64>,
    /// Required when `rewards` is set; must be positive.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub rewards_multiplier: Option<u64>,
    /// Required when `staking` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voting_threshold: Option<Amount>,
    /// Fixes the reward token at generation time instead of taking it per transfer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utility_token_address: Option<Address>,
}

impl GovernanceContractRequest {
    /// Validated token parameters and the enabled governance features.
    pub fn into_parts(self) -> Result<(TokenParams, GovernanceOptions)> {
        self.token.validate()?;

        let staking = if self.staking {
            Some(StakingConfig {
                min_staking_duration: self
                    .min_staking_duration
                    .ok_or(WizardError::MissingOption("minStakingDuration"))?,
                voting_threshold: self
                    .voting_threshold
                    .ok_or(WizardError::MissingOption("votingThreshold"))?,
            })
        } else {
            None
        };

        let rewards = if self.rewards {
            let multiplier = self
                .rewards_multiplier
                .ok_or(WizardError::MissingOption("rewardsMultiplier"))?;
            let multiplier = NonZeroU64::new(multiplier).ok_or_else(|| WizardError::InvalidAmount {
                field: "rewardsMultiplier",
                value: multiplier.to_string(),
            })?;
            Some(RewardConfig {
                multiplier,
                token: self
                    .utility_token_address
                    .map_or(RewardToken::CallerSupplied, RewardToken::Fixed),
            })
        } else {
            None
        };

        Ok((self.token, GovernanceOptions { staking, rewards }))
    }
}

/// Load a request payload from a JSON file.
pub fn load_request<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path).map_err(|e| WizardError::ConfigNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| WizardError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}
