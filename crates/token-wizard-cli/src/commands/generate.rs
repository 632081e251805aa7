use std::path::Path;

use anyhow::{Context, Result};
use dialoguer::Select;
use sha2::{Digest, Sha256};

use token_wizard_core::request::{load_request, GovernanceContractRequest, UtilityContractRequest};
use token_wizard_core::{ContractSource, ContractWizard};

use crate::output;
use crate::ContractKind;

/// Generate a contract from a JSON request file.
///
/// Writes the contract to `output_path` (reporting its SHA-256) or, without one, to
/// stdout. If no kind is given, prompts interactively.
pub fn run(request: &Path, kind: Option<ContractKind>, output_path: Option<&Path>) -> Result<()> {
    output::print_banner("generate", Some(&request.display().to_string()));

    let kind = match kind {
        Some(k) => k,
        None => {
            let options = [ContractKind::Utility, ContractKind::Governance];
            let descriptions = &[
                "Utility token: ERC20 with optional reward-aware transferFrom",
                "Governance token: ERC20Votes with optional staking and rewards",
            ];

            let selection = Select::new()
                .with_prompt("Select contract kind")
                .items(descriptions)
                .default(0)
                .interact()?;

            options[selection].clone()
        }
    };

    output::print_step(1, 2, &format!("Generating {} contract", kind.as_str()));
    let wizard = ContractWizard::new();
    let contract = generate_from_file(&wizard, request, &kind)?;

    output::print_contract_summary(&contract);

    output::print_step(2, 2, "Writing contract");
    match output_path {
        Some(path) => {
            let digest = write_contract(path, &contract)?;
            output::print_done(&format!("contract written to {}", path.display()));
            output::print_field("sha256", &digest);
        }
        None => {
            print!("{contract}");
            output::print_done("contract written to stdout");
        }
    }

    Ok(())
}

/// Load the request for `kind` from `path` and run the matching generator.
pub fn generate_from_file(
    wizard: &ContractWizard,
    path: &Path,
    kind: &ContractKind,
) -> Result<ContractSource> {
    let contract = match kind {
        ContractKind::Utility => {
            let (params, rewards) = load_request::<UtilityContractRequest>(path)?.into_parts()?;
            if rewards {
                output::print_notice("rewards enabled: transferFrom auto-approves the source account");
            }
            wizard.generate_utility(&params, rewards)?
        }
        ContractKind::Governance => {
            let (params, options) = load_request::<GovernanceContractRequest>(path)?.into_parts()?;
            wizard.generate_governance(&params, &options)?
        }
    };
    Ok(contract)
}

/// Write the contract and return the hex SHA-256 of the written bytes.
pub fn write_contract(path: &Path, contract: &ContractSource) -> Result<String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contract.as_str())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(hex::encode(Sha256::digest(contract.as_str().as_bytes())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_file(dir: &Path, name: &str, body: serde_json::Value) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body.to_string()).unwrap();
        path
    }

    #[test]
    fn test_generate_utility_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = request_file(
            dir.path(),
            "util.json",
            serde_json::json!({ "name": "Util", "symbol": "UTL", "rewards": false }),
        );
        let contract =
            generate_from_file(&ContractWizard::new(), &path, &ContractKind::Utility).unwrap();
        assert!(contract.as_str().contains("contract Util is ERC20 {"));
        assert!(!contract.as_str().contains("transferFrom"));
    }

    #[test]
    fn test_generate_governance_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = request_file(
            dir.path(),
            "gov.json",
            serde_json::json!({
                "name": "Gov",
                "symbol": "GOV",
                "staking": true,
                "minStakingDuration": 3600,
                "votingThreshold": "500",
            }),
        );
        let contract =
            generate_from_file(&ContractWizard::new(), &path, &ContractKind::Governance).unwrap();
        assert!(contract.as_str().contains("minimum staking duration which is 1 hour."));
        assert!(contract.as_str().contains("VOTING_THRESHOLD = 500;"));
    }

    #[test]
    fn test_bundled_sample_requests() {
        let samples = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../requests");
        let wizard = ContractWizard::new();

        let util = generate_from_file(&wizard, &samples.join("utility.json"), &ContractKind::Utility)
            .unwrap();
        assert!(util.as_str().contains("contract Util is ERC20, ERC20Burnable, Ownable {"));

        let gov =
            generate_from_file(&wizard, &samples.join("governance.json"), &ContractKind::Governance)
                .unwrap();
        assert!(gov.as_str().contains("VOTING_THRESHOLD = 1000000000000000000000;"));
        assert!(gov.as_str().contains("override(ERC20Permit, Nonces)"));
    }

    #[test]
    fn test_invalid_request_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = request_file(dir.path(), "bad.json", serde_json::json!({ "symbol": "X" }));
        assert!(generate_from_file(&ContractWizard::new(), &path, &ContractKind::Utility).is_err());
    }

    #[test]
    fn test_write_contract_digest() {
        let dir = tempfile::tempdir().unwrap();
        let contract = ContractWizard::new()
            .generate_utility(&token_wizard_core::TokenParams::new("Util", "UTL"), false)
            .unwrap();
        let path = dir.path().join("out/Util.sol");

        let digest = write_contract(&path, &contract).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), contract.as_str());
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, hex::encode(Sha256::digest(contract.as_str().as_bytes())));
    }
}
