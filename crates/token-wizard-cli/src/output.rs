//! Status reporting for the token-wizard CLI.
//!
//! Everything here writes to stderr. `generate` without `--output` streams the
//! contract to stdout, which has to stay clean for redirection.

use console::style;
use token_wizard_core::ContractSource;

const FIELD_WIDTH: usize = 10;

/// `token-wizard <command>` banner, with an optional dimmed subject (a path, an address).
pub fn print_banner(command: &str, subject: Option<&str>) {
    let title = format!("token-wizard {command}");
    match subject {
        Some(subject) => eprintln!("\n{} {}", style(&title).bold().cyan(), style(subject).dim()),
        None => eprintln!("\n{}", style(&title).bold().cyan()),
    }
}

/// `[1/2] Generating utility contract`
pub fn print_step(step: u32, total: u32, text: &str) {
    eprintln!("{} {}", style(format!("[{step}/{total}]")).dim(), text);
}

pub fn print_done(text: &str) {
    eprintln!("{} {}", style("done").green().bold(), text);
}

/// Caveat about the generated contract the user should read before deploying.
pub fn print_notice(text: &str) {
    eprintln!("{} {}", style("note").yellow().bold(), text);
}

/// Indented `key  value` line with keys padded to a common width.
pub fn print_field(key: &str, value: &str) {
    eprintln!("  {:<width$} {}", style(key).dim(), value, width = FIELD_WIDTH);
}

/// Size and shape of a generated contract.
pub fn print_contract_summary(contract: &ContractSource) {
    for (key, value) in summary_fields(contract) {
        print_field(key, &value);
    }
}

fn summary_fields(contract: &ContractSource) -> [(&'static str, String); 3] {
    let text = contract.as_str();
    [
        ("functions", contract.count("function ").to_string()),
        ("lines", text.lines().count().to_string()),
        ("bytes", text.len().to_string()),
    ]
}
