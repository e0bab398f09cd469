//! Spelling out monetary amounts for payment and petty-cash vouchers.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

const ONES: [&str; 20] = [
    "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
    "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const SCALES: [(u64, &str); 4] = [
    (1_000_000_000_000, "Trillion"),
    (1_000_000_000, "Billion"),
    (1_000_000, "Million"),
    (1_000, "Thousand"),
];

/// Error type for amount spelling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordsError {
    #[error("Amount must be non-negative")]
    Negative,
    #[error("Amount is too large to spell out")]
    TooLarge,
}

/// Spells out an amount in shillings, e.g. `1250.50` becomes
/// "One Thousand Two Hundred Fifty Shillings and Fifty Cents Only".
///
/// Cents are rounded to two decimal places.
pub fn amount_in_words(amount: Decimal) -> Result<String, WordsError> {
    if amount < Decimal::ZERO {
        return Err(WordsError::Negative);
    }

    let rounded = amount.round_dp(2);
    let whole = rounded.trunc();
    let shillings = whole.to_u64().ok_or(WordsError::TooLarge)?;
    if shillings >= 1_000_000_000_000_000 {
        return Err(WordsError::TooLarge);
    }
    let cents = ((rounded - whole) * Decimal::ONE_HUNDRED)
        .to_u64()
        .unwrap_or(0);

    let mut words = format!("{} Shillings", spell(shillings));
    if cents > 0 {
        words.push_str(&format!(" and {} Cents", spell(cents)));
    }
    words.push_str(" Only");
    Ok(words)
}

fn spell(n: u64) -> String {
    if n < 1_000 {
        return spell_hundreds(n);
    }

    let mut parts = Vec::new();
    let mut rest = n;
    for (scale, name) in SCALES {
        if rest >= scale {
            parts.push(format!("{} {}", spell_hundreds(rest / scale), name));
            rest %= scale;
        }
    }
    if rest > 0 {
        parts.push(spell_hundreds(rest));
    }
    parts.join(" ")
}

fn spell_hundreds(n: u64) -> String {
    debug_assert!(n < 1_000);
    let hundreds = n / 100;
    let rest = n % 100;

    let tail = if rest < 20 {
        ONES[rest as usize].to_string()
    } else if rest % 10 == 0 {
        TENS[(rest / 10) as usize].to_string()
    } else {
        format!("{}-{}", TENS[(rest / 10) as usize], ONES[(rest % 10) as usize])
    };

    match (hundreds, rest) {
        (0, _) => tail,
        (h, 0) => format!("{} Hundred", ONES[h as usize]),
        (h, _) => format!("{} Hundred {}", ONES[h as usize], tail),
    }
}
