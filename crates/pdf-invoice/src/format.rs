//! Explicit number formatting for amounts
//!
//! Formatting is configured per call instead of through process-wide locale
//! state.

use serde::{Deserialize, Serialize};

/// Where the currency symbol goes relative to the number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolPosition {
    Prefix,
    Suffix,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub thousands_separator: Option<char>,
    pub currency_symbol: String,
    pub symbol_position: SymbolPosition,
    /// Put a space between number and symbol
    pub symbol_spacing: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::german()
    }
}

impl NumberFormat {
    /// `1.234,56 €`
    pub fn german() -> Self {
        Self {
            decimal_separator: ',',
            thousands_separator: Some('.'),
            currency_symbol: "€".to_string(),
            symbol_position: SymbolPosition::Suffix,
            symbol_spacing: true,
        }
    }

    /// `€1,234.56`
    pub fn english() -> Self {
        Self {
            decimal_separator: '.',
            thousands_separator: Some(','),
            currency_symbol: "€".to_string(),
            symbol_position: SymbolPosition::Prefix,
            symbol_spacing: false,
        }
    }

    /// Format an amount given in cents
    pub fn format_amount(&self, cents: i64) -> String {
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        let number = format!(
            "{}{}{:02}",
            self.group_thousands(abs / 100),
            self.decimal_separator,
            abs % 100
        );

        let space = if self.symbol_spacing { " " } else { "" };
        match self.symbol_position {
            SymbolPosition::Prefix => format!("{}{}{}{}", sign, self.currency_symbol, space, number),
            SymbolPosition::Suffix => format!("{}{}{}{}", sign, number, space, self.currency_symbol),
        }
    }

    fn group_thousands(&self, units: u64) -> String {
        let digits = units.to_string();
        let Some(separator) = self.thousands_separator else {
            return digits;
        };

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(separator);
            }
            grouped.push(ch);
        }
        grouped
    }
}
