//! Handlebars-based template renderer for Solidity fragments.
//!
//! Wraps the [`handlebars::Handlebars`] engine with **strict mode** enabled and HTML
//! escaping disabled. Strict mode ensures that any `{{variable}}` referenced in a
//! template is present in the data context; a silently missing variable would emit
//! Solidity that fails to compile far from the actual cause. Escaping is disabled
//! because the output is Solidity, where `"` and `&` are meaningful.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::templates::{embedded, renderer::TemplateRenderer};
//!
//! let renderer = TemplateRenderer::new();
//! let data = serde_json::json!({ "reward_multiplier": 10, "reward_token_param": true });
//! let output = renderer.render(embedded::REWARD_DECLARATIONS, &data)?;
//! ```

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::{Result, WizardError};

/// Template renderer used by the base provider and the fragment builders.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a new renderer with strict mode on and escaping off.
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs }
    }

    /// Render a template string with the given data context.
    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        self.hbs
            .render_template(template, data)
            .map_err(|e| WizardError::TemplateRender(e.to_string()))
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
