//! Base contract provider: canonical ERC20 boilerplate for a [`TokenParams`] set.
//!
//! The generators treat the provider as a black box that returns complete Solidity
//! source; they only rely on the `contract <Name> ... {` declaration and the final
//! closing brace (see [`crate::contract::ContractLayout`]).
//!
//! [`Erc20Provider`] renders OpenZeppelin Contracts 5.x style output from the embedded
//! `erc20.sol.hbs` skeleton. Imports, the inheritance list and the member blocks are
//! assembled here and handed to the template as plain strings.

use serde::Serialize;

use crate::error::Result;
use crate::params::{escape_string_literal, Access, TokenParams};
use crate::templates::embedded;
use crate::templates::renderer::TemplateRenderer;

/// Produces base contract source for a parameter set.
pub trait BaseContractProvider: Send + Sync {
    /// Human-readable name used in logs.
    fn name(&self) -> &'static str;

    /// Render complete contract source for `params`.
    fn print(&self, params: &TokenParams) -> Result<String>;
}

const OZ: &str = "@openzeppelin/contracts";

/// OpenZeppelin-style ERC20 provider backed by the embedded Handlebars skeleton.
#[derive(Default)]
pub struct Erc20Provider {
    renderer: TemplateRenderer,
}

impl Erc20Provider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Serialize)]
struct BaseContractData {
    contract_name: String,
    imports: String,
    parents: String,
    members: String,
}

impl BaseContractProvider for Erc20Provider {
    fn name(&self) -> &'static str {
        "openzeppelin-erc20"
    }

    fn print(&self, params: &TokenParams) -> Result<String> {
        params.validate()?;
        let model = Erc20Model::build(params)?;

        let data = BaseContractData {
            contract_name: model.contract_name,
            imports: model
                .imports
                .iter()
                .map(|(name, path)| format!("import {{{name}}} from \"{OZ}/{path}\";"))
                .collect::<Vec<_>>()
                .join("\n"),
            parents: model.parents.join(", "),
            members: model.members.join("\n\n"),
        };

        self.renderer.render(embedded::ERC20_BASE, &data)
    }
}

/// Access mode actually used: guarded features force `Ownable` when none was chosen.
pub fn effective_access(params: &TokenParams) -> Access {
    if params.access == Access::None && (params.mintable || params.pausable) {
        Access::Ownable
    } else {
        params.access
    }
}

struct Erc20Model {
    contract_name: String,
    imports: Vec<(&'static str, &'static str)>,
    parents: Vec<&'static str>,
    members: Vec<String>,
}

impl Erc20Model {
    fn build(params: &TokenParams) -> Result<Self> {
        let access = effective_access(params);
        let votes = params.votes_enabled();
        let name = escape_string_literal(&params.name);
        let symbol = escape_string_literal(&params.symbol);

        let mut imports = vec![("ERC20", "token/ERC20/ERC20.sol")];
        let mut parents = vec!["ERC20"];

        if params.burnable {
            imports.push(("ERC20Burnable", "token/ERC20/extensions/ERC20Burnable.sol"));
            parents.push("ERC20Burnable");
        }
        if params.pausable {
            imports.push(("ERC20Pausable", "token/ERC20/extensions/ERC20Pausable.sol"));
            parents.push("ERC20Pausable");
        }
        match access {
            Access::Ownable => {
                imports.push(("Ownable", "access/Ownable.sol"));
                parents.push("Ownable");
            }
            Access::Roles => {
                imports.push(("AccessControl", "access/AccessControl.sol"));
                parents.push("AccessControl");
            }
            Access::None => {}
        }
        if params.permit {
            imports.push(("ERC20Permit", "token/ERC20/extensions/ERC20Permit.sol"));
            parents.push("ERC20Permit");
        }
        if votes {
            if !params.permit {
                imports.push(("EIP712", "utils/cryptography/EIP712.sol"));
                parents.push("EIP712");
            }
            imports.push(("ERC20Votes", "token/ERC20/extensions/ERC20Votes.sol"));
            parents.push("ERC20Votes");
            if params.permit {
                imports.push(("Nonces", "utils/Nonces.sol"));
            }
        }
        if params.flashmint {
            imports.push(("ERC20FlashMint", "token/ERC20/extensions/ERC20FlashMint.sol"));
            parents.push("ERC20FlashMint");
        }

        let mut members = Vec::new();

        if access == Access::Roles {
            let mut roles = Vec::new();
            if params.pausable {
                roles.push(role_constant("PAUSER_ROLE"));
            }
            if params.mintable {
                roles.push(role_constant("MINTER_ROLE"));
            }
            if !roles.is_empty() {
                members.push(roles.join("\n"));
            }
        }

        members.push(constructor(params, access, &name, &symbol));

        if params.pausable {
            let guard = guard(access, "PAUSER_ROLE");
            members.push(function(&format!("pause() public {guard}"), &["_pause();"]));
            members.push(function(&format!("unpause() public {guard}"), &["_unpause();"]));
        }
        if params.mintable {
            let guard = guard(access, "MINTER_ROLE");
            members.push(function(
                &format!("mint(address to, uint256 amount) public {guard}"),
                &["_mint(to, amount);"],
            ));
        }

        let mut overrides = Vec::new();
        if params.pausable || votes {
            let mut bases = vec!["ERC20"];
            if params.pausable {
                bases.push("ERC20Pausable");
            }
            if votes {
                bases.push("ERC20Votes");
            }
            overrides.push(function(
                &format!(
                    "_update(address from, address to, uint256 value)\n        internal\n        override({})",
                    bases.join(", ")
                ),
                &["super._update(from, to, value);"],
            ));
        }
        if votes && params.permit {
            overrides.push(function(
                "nonces(address owner)\n        public\n        view\n        override(ERC20Permit, Nonces)\n        returns (uint256)",
                &["return super.nonces(owner);"],
            ));
        }
        if !overrides.is_empty() {
            let mut block = String::from("    // The following functions are overrides required by Solidity.\n\n");
            block.push_str(&overrides.join("\n\n"));
            members.push(block);
        }

        Ok(Self {
            contract_name: params.contract_name()?,
            imports,
            parents,
            members,
        })
    }
}

fn role_constant(role: &str) -> String {
    format!("    bytes32 public constant {role} = keccak256(\"{role}\");")
}

fn guard(access: Access, role: &str) -> String {
    match access {
        Access::Roles => format!("onlyRole({role})"),
        _ => "onlyOwner".to_string(),
    }
}

/// Render a member function with 4-space member and 8-space body indentation.
fn function(signature: &str, body: &[&str]) -> String {
    let mut out = format!("    function {signature} {{\n");
    for line in body {
        out.push_str("        ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("    }");
    out
}

fn constructor(params: &TokenParams, access: Access, name: &str, symbol: &str) -> String {
    let mut args = Vec::new();
    let mut modifiers = vec![format!("ERC20(\"{name}\", \"{symbol}\")")];
    let mut body = Vec::new();

    let premint = params.premint.to_solidity();
    if premint.is_some() {
        args.push("address recipient");
    }
    match access {
        Access::Ownable => {
            args.push("address initialOwner");
            modifiers.push("Ownable(initialOwner)".into());
        }
        Access::Roles => {
            args.push("address defaultAdmin");
            if params.pausable {
                args.push("address pauser");
            }
            if params.mintable {
                args.push("address minter");
            }
        }
        Access::None => {}
    }
    if params.permit {
        modifiers.push(format!("ERC20Permit(\"{name}\")"));
    } else if params.votes_enabled() {
        modifiers.push(format!("EIP712(\"{name}\", \"1\")"));
    }

    if let Some(amount) = premint {
        body.push(format!("_mint(recipient, {amount});"));
    }
    if access == Access::Roles {
        body.push("_grantRole(DEFAULT_ADMIN_ROLE, defaultAdmin);".into());
        if params.pausable {
            body.push("_grantRole(PAUSER_ROLE, pauser);".into());
        }
        if params.mintable {
            body.push("_grantRole(MINTER_ROLE, minter);".into());
        }
    }

    let mut out = format!("    constructor({})\n", args.join(", "));
    for modifier in &modifiers {
        out.push_str("        ");
        out.push_str(modifier);
        out.push('\n');
    }
    out.push_str("    {");
    if body.is_empty() {
        out.push('}');
    } else {
        out.push('\n');
        for line in &body {
            out.push_str("        ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("    }");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Premint;

    fn print(params: &TokenParams) -> String {
        Erc20Provider::new().print(params).unwrap()
    }

    #[test]
    fn test_minimal_contract() {
        let out = print(&TokenParams::new("Util", "UTL"));
        assert!(out.contains("pragma solidity ^0.8.20;"));
        assert!(out.contains("import {ERC20} from \"@openzeppelin/contracts/token/ERC20/ERC20.sol\";"));
        assert!(out.contains("contract Util is ERC20 {"));
        assert!(out.contains("ERC20(\"Util\", \"UTL\")"));
        assert!(out.trim_end().ends_with('}'));
        assert!(!out.contains("Ownable"));
    }

    #[test]
    fn test_mintable_defaults_to_ownable() {
        let mut params = TokenParams::new("Util", "UTL");
        params.mintable = true;
        let out = print(&params);
        assert!(out.contains("contract Util is ERC20, Ownable {"));
        assert!(out.contains("constructor(address initialOwner)"));
        assert!(out.contains("function mint(address to, uint256 amount) public onlyOwner {"));
    }

    #[test]
    fn test_roles_grant_each_role() {
        let mut params = TokenParams::new("Util", "UTL");
        params.mintable = true;
        params.pausable = true;
        params.access = Access::Roles;
        params.premint = Premint::parse("1000").unwrap();
        let out = print(&params);
        assert!(out.contains("bytes32 public constant PAUSER_ROLE = keccak256(\"PAUSER_ROLE\");"));
        assert!(out.contains("bytes32 public constant MINTER_ROLE = keccak256(\"MINTER_ROLE\");"));
        assert!(out.contains(
            "constructor(address recipient, address defaultAdmin, address pauser, address minter)"
        ));
        assert!(out.contains("_mint(recipient, 1000 * 10 ** decimals());"));
        assert!(out.contains("_grantRole(MINTER_ROLE, minter);"));
        assert!(out.contains("function pause() public onlyRole(PAUSER_ROLE) {"));
        assert!(out.contains("override(ERC20, ERC20Pausable)"));
    }

    #[test]
    fn test_votes_without_permit_uses_eip712() {
        let mut params = TokenParams::new("Gov", "GOV");
        params.votes = Some(true);
        let out = print(&params);
        assert!(out.contains("contract Gov is ERC20, EIP712, ERC20Votes {"));
        assert!(out.contains("EIP712(\"Gov\", \"1\")"));
        assert!(out.contains("override(ERC20, ERC20Votes)"));
        assert!(!out.contains("nonces"));
    }

    #[test]
    fn test_votes_with_permit_overrides_nonces() {
        let mut params = TokenParams::new("Gov", "GOV");
        params.votes = Some(true);
        params.permit = true;
        let out = print(&params);
        assert!(out.contains("contract Gov is ERC20, ERC20Permit, ERC20Votes {"));
        assert!(out.contains("import {Nonces} from \"@openzeppelin/contracts/utils/Nonces.sol\";"));
        assert!(out.contains("override(ERC20Permit, Nonces)"));
    }

    #[test]
    fn test_quotes_in_name_are_escaped() {
        let out = print(&TokenParams::new("The \"Best\" Token", "BST"));
        assert!(out.contains("contract TheBestToken is ERC20 {"));
        assert!(out.contains("ERC20(\"The \\\"Best\\\" Token\", \"BST\")"));
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(Erc20Provider::new().print(&TokenParams::new("", "X")).is_err());
    }
}
