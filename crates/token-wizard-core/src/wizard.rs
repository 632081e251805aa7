use crate::provider::{BaseContractProvider, Erc20Provider};
use crate::templates::renderer::TemplateRenderer;

/// Entry point for contract generation.
///
/// Holds the base contract provider and the fragment renderer. Generation itself is
/// stateless: every call builds its layout from scratch, so one wizard can serve
/// concurrent requests. The generators live in [`crate::utility`] and
/// [`crate::governance`].
pub struct ContractWizard<P = Erc20Provider> {
    pub(crate) provider: P,
    pub(crate) renderer: TemplateRenderer,
}

impl ContractWizard<Erc20Provider> {
    /// Wizard backed by the built-in OpenZeppelin-style ERC20 provider.
    pub fn new() -> Self {
        Self::with_provider(Erc20Provider::new())
    }
}

impl Default for ContractWizard<Erc20Provider> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: BaseContractProvider> ContractWizard<P> {
    pub fn with_provider(provider: P) -> Self {
        Self {
            provider,
            renderer: TemplateRenderer::new(),
        }
    }
}
