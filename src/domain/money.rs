use serde::{Deserialize, Serialize, Serializer};

/// Amounts are plain JSON numbers so that exported documents stay compatible
/// with anything that reads them as such. Precision is whatever f64 carries.
pub type Amount = f64;

/// Format an amount with two decimals and no grouping.
/// Example: 1200.0 -> "1200.00", -3.5 -> "-3.50"
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", amount)
}

/// Parse a decimal string into an amount.
/// Accepts both "12.50" and "12,50". Rejects anything that is not a finite number.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let normalized = if input.contains(',') && !input.contains('.') {
        input.replace(',', ".")
    } else {
        input.to_string()
    };

    let value: Amount = normalized
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat(input.to_string()))?;

    if !value.is_finite() {
        return Err(ParseAmountError::InvalidFormat(input.to_string()));
    }
    Ok(value)
}

/// Coerce free-form numeric input. Anything unparseable becomes 0.
pub fn coerce_amount(input: &str) -> Amount {
    parse_amount(input).unwrap_or(0.0)
}

/// Serialize whole amounts as integers so that `1200` is not written as `1200.0`.
pub fn serialize_amount<S: Serializer>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53

    if amount.fract() == 0.0 && amount.abs() < MAX_EXACT {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseAmountError {
    #[error("empty amount")]
    Empty,

    #[error("invalid amount: {0}")]
    InvalidFormat(String),
}

/// Display convention for currency values.
///
/// The default renders like de-DE/EUR: `1.234,56 €`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimal_separator: char,
    pub thousands_separator: char,
    pub symbol_after: bool,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "€".to_string(),
            decimal_separator: ',',
            thousands_separator: '.',
            symbol_after: true,
        }
    }
}

impl CurrencyFormat {
    pub fn format(&self, amount: Amount) -> String {
        let rounded = (amount * 100.0).round() / 100.0;
        let sign = if rounded < 0.0 { "-" } else { "" };
        let plain = format!("{:.2}", rounded.abs());
        let (units, decimals) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (i, digit) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(digit);
        }

        let number = format!("{}{}{}", grouped, self.decimal_separator, decimals);
        if self.symbol_after {
            format!("{}{} {}", sign, number, self.symbol)
        } else {
            format!("{}{}{}", sign, self.symbol, number)
        }
    }
}
