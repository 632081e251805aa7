//! Ethereum addresses embedded as Solidity literals.
//!
//! Solidity rejects 40-digit hex literals that fail the EIP-55 checksum, so every
//! address is normalized to its checksummed form before it reaches a template.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use sha3::{Digest, Keccak256};

use crate::error::{Result, WizardError};

/// A 20-byte address in EIP-55 checksummed `0x` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Parse `0x` + 40 hex digits.
    ///
    /// All-lowercase and all-uppercase input is accepted and checksummed; mixed-case
    /// input must already carry a valid checksum.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let hex = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .filter(|h| h.len() == 40 && h.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| WizardError::InvalidAddress(value.to_string()))?;

        let checksummed = checksum(hex);
        let mixed_case =
            hex.bytes().any(|b| b.is_ascii_lowercase()) && hex.bytes().any(|b| b.is_ascii_uppercase());
        if mixed_case && checksummed[2..] != *hex {
            return Err(WizardError::InvalidAddress(value.to_string()));
        }

        Ok(Self(checksummed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn checksum(hex: &str) -> String {
    let lower = hex.to_ascii_lowercase();
    let hash = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 { hash[i / 2] >> 4 } else { hash[i / 2] & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
