//! Domain types representing recorded income and expense events.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::common::{Displayable, TransactionId};
use crate::errors::LedgerError;

/// Field names owned by the record itself; draft details never override them.
const RESERVED_FIELDS: [&str; 4] = ["id", "type", "category", "amount"];

/// Transaction type. Anything other than `Income` or `Expense` is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionKind {
    Income,
    Expense,
    Other(String),
}

impl TransactionKind {
    /// Typed input: case-insensitive for the two built-in types, verbatim otherwise.
    /// Persisted names go through `From<String>` and are matched exactly.
    pub fn from_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("income") {
            TransactionKind::Income
        } else if trimmed.eq_ignore_ascii_case("expense") {
            TransactionKind::Expense
        } else {
            TransactionKind::Other(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
            TransactionKind::Other(name) => name,
        }
    }
}

impl From<String> for TransactionKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Income" => TransactionKind::Income,
            "Expense" => TransactionKind::Expense,
            _ => TransactionKind::Other(value),
        }
    }
}

impl From<&str> for TransactionKind {
    fn from(value: &str) -> Self {
        TransactionKind::from(value.to_string())
    }
}

impl From<TransactionKind> for String {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TransactionKind::from_input(s))
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides what happens to amount input that does not parse as a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountPolicy {
    /// The whole text must be a finite number; anything else is rejected.
    #[default]
    Strict,
    /// Parse the longest numeric prefix and admit `NaN` when there is none.
    Lenient,
}

/// Amount as entered by the caller: free text from a form, or an already numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    pub fn coerce(&self, policy: AmountPolicy) -> Result<f64, LedgerError> {
        match (self, policy) {
            (AmountInput::Number(value), AmountPolicy::Lenient) => Ok(*value),
            (AmountInput::Text(text), AmountPolicy::Lenient) => Ok(parse_amount_prefix(text)),
            (AmountInput::Number(value), AmountPolicy::Strict) => {
                if value.is_finite() {
                    Ok(*value)
                } else {
                    Err(LedgerError::InvalidAmount(value.to_string()))
                }
            }
            (AmountInput::Text(text), AmountPolicy::Strict) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| LedgerError::InvalidAmount(format!("`{}` is not a number", text))),
        }
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        AmountInput::Text(value)
    }
}

/// Parses the longest leading decimal number of `raw`, ignoring leading
/// whitespace and any trailing text. Returns `NaN` when no number is found.
pub fn parse_amount_prefix(raw: &str) -> f64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if text[end..].starts_with("Infinity") {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut cursor = end + 1;
        if matches!(bytes.get(cursor), Some(b'+') | Some(b'-')) {
            cursor += 1;
        }
        let exp_digits = count_digits(&bytes[cursor..]);
        if exp_digits > 0 {
            end = cursor + exp_digits;
        }
    }

    text[..end].parse::<f64>().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Caller-supplied fields for a new transaction; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: String,
    pub amount: AmountInput,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl TransactionDraft {
    pub fn new(
        kind: impl Into<TransactionKind>,
        category: impl Into<String>,
        amount: impl Into<AmountInput>,
    ) -> Self {
        Self {
            kind: kind.into(),
            category: category.into(),
            amount: amount.into(),
            details: Map::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// A single recorded financial event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: String,
    /// Non-finite values are stored as `"NaN"`, `"Infinity"` or `"-Infinity"`.
    #[serde(default = "missing_amount", with = "amount_format")]
    pub amount: f64,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Transaction {
    pub(crate) fn from_draft(id: TransactionId, draft: TransactionDraft, amount: f64) -> Self {
        let mut details = draft.details;
        for field in RESERVED_FIELDS {
            details.remove(field);
        }
        Self {
            id,
            kind: draft.kind,
            category: draft.category,
            amount,
            details,
        }
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }

    pub fn is_kind(&self, kind: &TransactionKind) -> bool {
        &self.kind == kind
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        let category = if self.category.is_empty() {
            "(uncategorized)"
        } else {
            self.category.as_str()
        };
        format!("#{} {} / {}", self.id, self.kind, category)
    }
}

fn missing_amount() -> f64 {
    f64::NAN
}

mod amount_format {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    const NAN: &str = "NaN";
    const INFINITY: &str = "Infinity";
    const NEG_INFINITY: &str = "-Infinity";

    /// Finite amounts are plain numbers; the rest are named strings, `null` reads as `NaN`.
    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Stored {
        Number(f64),
        Named(String),
    }

    pub fn serialize<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        let stored = match *amount {
            value if value.is_finite() => Stored::Number(value),
            value if value.is_nan() => Stored::Named(NAN.into()),
            value if value > 0.0 => Stored::Named(INFINITY.into()),
            _ => Stored::Named(NEG_INFINITY.into()),
        };
        stored.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(match Option::<Stored>::deserialize(deserializer)? {
            Some(Stored::Number(value)) => value,
            Some(Stored::Named(name)) if name == INFINITY => f64::INFINITY,
            Some(Stored::Named(name)) if name == NEG_INFINITY => f64::NEG_INFINITY,
            Some(Stored::Named(_)) | None => f64::NAN,
        })
    }
}
