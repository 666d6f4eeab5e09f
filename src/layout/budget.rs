//! Budget arithmetic for the event approval letter.
//!
//! Amounts are summed in fixed point so the same particulars always produce
//! the same total string. The magnitude is unbounded: digits are kept in
//! base-10^9 limbs, so no input can overflow the total.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

const SCALE_DIGITS: usize = 9;
const LIMB: u32 = 1_000_000_000;
/// Half a cent, in units of 10^-9.
const HALF_CENT: u32 = 5_000_000;

/// Non-negative decimal amount in units of 10^-9.
///
/// Little-endian base-10^9 limbs with no trailing zero limb, so equal values
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Amount {
    limbs: Vec<u32>,
}

impl Amount {
    pub const ZERO: Amount = Amount { limbs: Vec::new() };

    /// Lenient parse of a user-entered amount.
    ///
    /// Thousands separators are removed, then the leading `digits[.digits]`
    /// prefix is read. Anything without a leading digit (empty, text,
    /// negative numbers) is zero. Digits beyond nine decimal places are
    /// ignored.
    pub fn parse_lenient(raw: &str) -> Amount {
        let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
        let whole: String = cleaned.chars().take_while(char::is_ascii_digit).collect();
        let rest = &cleaned[whole.len()..];
        let frac: String = match rest.strip_prefix('.') {
            Some(tail) => tail.chars().take_while(char::is_ascii_digit).collect(),
            None => String::new(),
        };

        if whole.is_empty() && frac.is_empty() {
            return Amount::ZERO;
        }

        let mut digits = whole;
        digits.extend(frac.chars().take(SCALE_DIGITS));
        let kept = frac.len().min(SCALE_DIGITS);
        digits.extend(std::iter::repeat('0').take(SCALE_DIGITS - kept));
        Amount::from_digits(&digits)
    }

    /// Builds an amount from an ASCII digit string already scaled by 10^9.
    fn from_digits(digits: &str) -> Amount {
        let bytes = digits.as_bytes();
        let mut limbs = Vec::with_capacity(bytes.len() / SCALE_DIGITS + 1);
        let mut end = bytes.len();
        while end > 0 {
            let start = end.saturating_sub(SCALE_DIGITS);
            let limb = bytes[start..end]
                .iter()
                .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
            limbs.push(limb);
            end = start;
        }
        Amount { limbs }.normalized()
    }

    fn normalized(mut self) -> Amount {
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }
        self
    }

    /// Formats with exactly two decimals, rounding half up.
    pub fn to_fixed_2(&self) -> String {
        let rounded = self.clone() + Amount { limbs: vec![HALF_CENT] };

        let mut digits = String::new();
        for (i, limb) in rounded.limbs.iter().rev().enumerate() {
            if i == 0 {
                digits.push_str(&limb.to_string());
            } else {
                digits.push_str(&format!("{:09}", limb));
            }
        }
        // At least one whole digit in front of the nine fractional ones.
        while digits.len() <= SCALE_DIGITS {
            digits.insert(0, '0');
        }

        let split = digits.len() - SCALE_DIGITS;
        format!("{}.{}", &digits[..split], &digits[split..split + 2])
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        let len = self.limbs.len().max(rhs.limbs.len());
        let mut limbs = Vec::with_capacity(len + 1);
        let mut carry = 0u32;
        for i in 0..len {
            let a = self.limbs.get(i).copied().unwrap_or(0);
            let b = rhs.limbs.get(i).copied().unwrap_or(0);
            // Each operand is below 10^9, so the sum fits in u32.
            let sum = a + b + carry;
            limbs.push(sum % LIMB);
            carry = sum / LIMB;
        }
        if carry > 0 {
            limbs.push(carry);
        }
        Amount { limbs }.normalized()
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fixed_2())
    }
}

/// Sums the raw amount strings of a particulars list.
pub fn total_of<'a, I>(amounts: I) -> Amount
where
    I: IntoIterator<Item = &'a str>,
{
    amounts.into_iter().map(Amount::parse_lenient).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_with_thousands_separator() {
        assert_eq!(total_of(["1500", "2,500.50"]).to_fixed_2(), "4000.50");
    }

    #[test]
    fn test_unparseable_is_zero() {
        assert_eq!(Amount::parse_lenient(""), Amount::ZERO);
        assert_eq!(Amount::parse_lenient("abc"), Amount::ZERO);
        assert_eq!(Amount::parse_lenient("-250"), Amount::ZERO);
        assert_eq!(Amount::parse_lenient("."), Amount::ZERO);
    }

    #[test]
    fn test_leading_prefix_is_used() {
        assert_eq!(Amount::parse_lenient("12abc").to_fixed_2(), "12.00");
        assert_eq!(Amount::parse_lenient(".5").to_fixed_2(), "0.50");
        assert_eq!(Amount::parse_lenient("7.").to_fixed_2(), "7.00");
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(Amount::parse_lenient("0.005").to_fixed_2(), "0.01");
        assert_eq!(Amount::parse_lenient("0.0049").to_fixed_2(), "0.00");
        assert_eq!(total_of(["0.1", "0.2"]).to_fixed_2(), "0.30");
    }

    #[test]
    fn test_long_amounts_sum_exactly() {
        let nines = "9".repeat(40);
        assert_eq!(total_of([nines.as_str()]).to_fixed_2(), format!("{}.00", nines));
        assert_eq!(
            total_of([nines.as_str(), "1"]).to_fixed_2(),
            format!("1{}.00", "0".repeat(40))
        );
        assert_eq!(
            total_of([nines.as_str(), "0.995"]).to_fixed_2(),
            format!("1{}.00", "0".repeat(40))
        );
    }

    #[test]
    fn test_leading_zeros_do_not_change_value() {
        assert_eq!(Amount::parse_lenient("000120.5"), Amount::parse_lenient("120.50"));
        assert_eq!(Amount::parse_lenient("0000"), Amount::ZERO);
    }

    #[test]
    fn test_empty_list_totals_zero() {
        assert_eq!(total_of(Vec::<&str>::new()).to_string(), "0.00");
    }
}
