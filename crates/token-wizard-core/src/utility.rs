//! Utility-token generator: base ERC20 plus transfer overrides.
//!
//! With rewards enabled the contract also gets an auto-approving `transferFrom`, so a
//! governance token can pull reward payouts from it on every transfer.

use crate::contract::{ContractLayout, ContractSource, Section};
use crate::error::Result;
use crate::fragments;
use crate::params::TokenParams;
use crate::provider::BaseContractProvider;
use crate::wizard::ContractWizard;

impl<P: BaseContractProvider> ContractWizard<P> {
    /// Generate a utility-token contract.
    pub fn generate_utility(&self, params: &TokenParams, rewards: bool) -> Result<ContractSource> {
        params.validate()?;

        let base = self.provider.print(params)?;
        let mut layout = ContractLayout::parse(&base)?;

        if rewards {
            layout.push(
                Section::Members,
                fragments::auto_approve_transfer_from(&self.renderer)?,
            );
        }
        layout.push(Section::Members, fragments::plain_transfer(&self.renderer)?);

        let source = layout.render();
        tracing::info!(
            provider = self.provider.name(),
            token = %params.symbol,
            rewards,
            bytes = source.as_str().len(),
            "generated utility contract"
        );
        Ok(source)
    }
}
