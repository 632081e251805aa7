//! Template system for Solidity generation.
//!
//! Templates are embedded into the binary at compile-time via [`include_str!`] in the
//! [`embedded`] module, then rendered at runtime with [Handlebars](https://handlebarsjs.com/)
//! via the [`renderer::TemplateRenderer`].
//!
//! ## Template variables
//!
//! The base contract template (`erc20.sol.hbs`) receives pre-assembled blocks:
//! - `{{contract_name}}` — Solidity identifier derived from the token name
//! - `{{imports}}`, `{{parents}}`, `{{members}}` — assembled by the provider
//!
//! Fragment templates receive feature values such as `{{reward_multiplier}}`,
//! `{{min_staking_duration}}`, `{{voting_threshold}}` and `{{reward_token}}`.
//!
//! Conditionals are kept inline (`...;{{#if x}}` / `{{/if}}` on content lines) so the
//! output never depends on standalone-tag whitespace handling.
//!
//! **Warning**: Template files in `templates/solidity/` and constants in [`embedded`]
//! must stay in sync. The `include_str!` paths are relative to this file and checked
//! at compile-time.

pub mod embedded;
pub mod renderer;
