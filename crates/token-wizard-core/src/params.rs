//! Token parameters passed to the base contract provider.
//!
//! [`TokenParams`] is also the wire shape of the token fields in request payloads,
//! so its serde attributes follow the camelCase JSON convention of the gateway.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, WizardError};

/// Access control mode of the base contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Access {
    /// No access control (only valid when nothing needs guarding).
    #[default]
    None,
    /// Single owner via `Ownable`.
    Ownable,
    /// Role-based via `AccessControl`.
    Roles,
}

impl Access {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ownable => "ownable",
            Self::Roles => "roles",
        }
    }

    /// Resolve an access mode by name. `""` and `"none"` both mean no access control.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "" | "none" => Some(Self::None),
            "ownable" => Some(Self::Ownable),
            "roles" => Some(Self::Roles),
            _ => None,
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Access {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Access {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        // Clients send `false` for "no access control".
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Flag(false) => Ok(Self::None),
            Repr::Flag(true) => Ok(Self::Ownable),
            Repr::Name(name) => Self::from_name(&name).ok_or_else(|| {
                serde::de::Error::custom(format!(
                    "unknown access mode: {name} (supported: none, ownable, roles)"
                ))
            }),
        }
    }
}

/// Numeric payload field: clients send either a JSON number or a decimal string.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
    Null,
}

/// Optional whole-number field (seconds, multipliers) given as a JSON number or a
/// decimal string. `null` and absence both yield `None`.
pub(crate) fn deserialize_optional_u64<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<u64>, D::Error> {
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(Some(n)),
        NumberOrText::Text(s) => s.trim().parse().map(Some).map_err(|_| {
            serde::de::Error::custom(format!("expected a whole number, got '{s}'"))
        }),
        NumberOrText::Null => Ok(None),
    }
}

/// A non-negative integer amount of arbitrary size, kept as normalized decimal digits.
///
/// Token amounts routinely exceed `u64` once scaled by 18 decimals, and the value is
/// only ever embedded into Solidity source, so it is never converted to a machine integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    /// Parse a string of decimal digits. Leading zeros are dropped.
    pub fn parse(field: &'static str, value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(WizardError::InvalidAmount {
                field,
                value: value.to_string(),
            });
        }
        let digits = value.trim_start_matches('0');
        Ok(Self(if digits.is_empty() { "0".into() } else { digits.into() }))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == "0"
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(n) => Ok(Self::from(n)),
            NumberOrText::Text(s) => Self::parse("amount", &s).map_err(serde::de::Error::custom),
            NumberOrText::Null => Err(serde::de::Error::custom("amount must not be null")),
        }
    }
}

/// Token decimals assumed by the `decimals()` scaling of the premint.
pub const PREMINT_DECIMALS: usize = 18;

/// Initial supply minted to the deployer-chosen recipient, in whole tokens.
///
/// Accepts a fractional part (`"1000.5"`); the fraction is folded into the exponent
/// of the `10 ** decimals()` scaling when rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Premint {
    integer: String,
    fraction: String,
}

impl Premint {
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Self::default());
        }

        let (integer, fraction) = value.split_once('.').unwrap_or((value, ""));
        let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        let fraction_ok = !value.contains('.') || !fraction.is_empty();
        if integer.is_empty() || !digits_only(integer) || !digits_only(fraction) || !fraction_ok {
            return Err(WizardError::InvalidAmount {
                field: "premint",
                value: value.to_string(),
            });
        }

        let fraction = fraction.trim_end_matches('0');
        if fraction.len() > PREMINT_DECIMALS {
            return Err(WizardError::InvalidAmount {
                field: "premint",
                value: value.to_string(),
            });
        }

        Ok(Self {
            integer: integer.to_string(),
            fraction: fraction.to_string(),
        })
    }

    pub fn is_zero(&self) -> bool {
        self.integer.bytes().all(|b| b == b'0') && self.fraction.is_empty()
    }

    /// Solidity expression for the minted amount in base units, or `None` for no premint.
    ///
    /// `1000` → `1000 * 10 ** decimals()`, `1000.5` → `10005 * 10 ** (decimals() - 1)`.
    pub fn to_solidity(&self) -> Option<String> {
        if self.is_zero() {
            return None;
        }
        let joined = format!("{}{}", self.integer, self.fraction);
        let digits = joined.trim_start_matches('0');
        if self.fraction.is_empty() {
            Some(format!("{digits} * 10 ** decimals()"))
        } else {
            Some(format!(
                "{digits} * 10 ** (decimals() - {})",
                self.fraction.len()
            ))
        }
    }
}

impl Default for Premint {
    fn default() -> Self {
        Self {
            integer: "0".into(),
            fraction: String::new(),
        }
    }
}

impl fmt::Display for Premint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fraction.is_empty() {
            write!(f, "{}", self.integer)
        } else {
            write!(f, "{}.{}", self.integer, self.fraction)
        }
    }
}

impl Serialize for Premint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Premint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(n) => Ok(Self {
                integer: n.to_string(),
                fraction: String::new(),
            }),
            NumberOrText::Text(s) => Self::parse(&s).map_err(serde::de::Error::custom),
            NumberOrText::Null => Ok(Self::default()),
        }
    }
}

/// Parameter set handed unmodified to the base contract provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenParams {
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub premint: Premint,
    #[serde(default)]
    pub mintable: bool,
    #[serde(default)]
    pub burnable: bool,
    #[serde(default)]
    pub pausable: bool,
    #[serde(default)]
    pub permit: bool,
    #[serde(default)]
    pub flashmint: bool,
    #[serde(default)]
    pub access: Access,
    /// Vote delegation (`ERC20Votes`). `None` = not specified, `Some(false)` = explicitly off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<bool>,
}

impl TokenParams {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn votes_enabled(&self) -> bool {
        self.votes == Some(true)
    }

    /// Check the invariants the provider relies on.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(WizardError::InvalidParams("name must not be empty".into()));
        }
        if self.symbol.trim().is_empty() {
            return Err(WizardError::InvalidParams("symbol must not be empty".into()));
        }
        for (field, value) in [("name", &self.name), ("symbol", &self.symbol)] {
            if value.chars().any(char::is_control) {
                return Err(WizardError::InvalidParams(format!(
                    "{field} must not contain control characters"
                )));
            }
        }
        self.contract_name().map(|_| ())
    }

    /// Solidity contract identifier derived from the token name.
    pub fn contract_name(&self) -> Result<String> {
        let ident = to_identifier(&self.name);
        if ident.is_empty() {
            return Err(WizardError::InvalidParams(format!(
                "name '{}' does not yield a valid contract identifier",
                self.name
            )));
        }
        Ok(ident)
    }
}

/// Convert free text into a capitalized Solidity identifier.
///
/// Leading characters that cannot start an identifier are dropped, runs of invalid
/// characters are removed and the following character is upper-cased:
/// `"my token"` → `"MyToken"`, `"42 Club"` → `"Club"`.
pub fn to_identifier(text: &str) -> String {
    let is_start = |c: char| c.is_ascii_alphabetic() || c == '_' || c == '$';
    let is_part = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '$';

    let mut ident = String::with_capacity(text.len());
    let mut upper_next = true;
    for c in text.chars().skip_while(|c| !is_start(*c)) {
        if is_part(c) {
            if upper_next {
                ident.push(c.to_ascii_uppercase());
                upper_next = false;
            } else {
                ident.push(c);
            }
        } else {
            upper_next = true;
        }
    }
    ident
}

/// Escape text for a Solidity double-quoted string literal.
pub fn escape_string_literal(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
