//! CLDR plural operands, see
//! <https://unicode.org/reports/tr35/tr35-numbers.html#Operands>.

use alloc::string::String;

use crate::{Arg, CoreError, CoreResult};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Operands {
    /// Absolute value of the input.
    pub n: f64,
    /// Integer digits of `n`.
    pub i: u64,
    /// Count of visible fraction digits, with trailing zeros.
    pub v: u64,
    /// Count of visible fraction digits, without trailing zeros.
    pub w: u64,
    /// Visible fraction digits, with trailing zeros.
    pub f: u64,
    /// Visible fraction digits, without trailing zeros.
    pub t: u64,
    /// Compact decimal exponent. Always 0 for plain decimal input.
    pub c: u64,
}

impl Operands {
    pub fn from_unsigned(value: u64) -> Self {
        Self {
            n: value as f64,
            i: value,
            ..Self::default()
        }
    }

    pub fn from_signed(value: i64) -> Self {
        Self::from_unsigned(value.unsigned_abs())
    }

    /// Parses a decimal literal, keeping the fraction digits exactly as
    /// written so that `"1.30"` and `"1.3"` yield different operands.
    pub fn from_decimal(input: &str) -> CoreResult<Self> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix('-')
            .or_else(|| trimmed.strip_prefix('+'))
            .unwrap_or(trimmed);

        let (integer, fraction) = match digits.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (digits, ""),
        };
        if integer.is_empty()
            || !integer.bytes().all(|byte| byte.is_ascii_digit())
            || !fraction.bytes().all(|byte| byte.is_ascii_digit())
        {
            return Err(invalid_number(input));
        }

        let n: f64 = digits.parse().map_err(|_| invalid_number(input))?;
        let i: u64 = integer.parse().map_err(|_| invalid_number(input))?;

        let v = fraction.len();
        let significant = fraction.trim_end_matches('0');
        let w = significant.len();
        let f = parse_fraction(fraction).ok_or_else(|| invalid_number(input))?;
        let t = parse_fraction(significant).ok_or_else(|| invalid_number(input))?;

        Ok(Self {
            n,
            i,
            v: v as u64,
            w: w as u64,
            f,
            t,
            c: 0,
        })
    }
}

impl TryFrom<&Arg> for Operands {
    type Error = CoreError;

    fn try_from(arg: &Arg) -> Result<Self, Self::Error> {
        match arg {
            Arg::Int(value) => Ok(Operands::from_signed(*value)),
            Arg::Uint(value) => Ok(Operands::from_unsigned(*value)),
            Arg::Str(value) => Operands::from_decimal(value),
            Arg::Float(_) => Err(CoreError::UnsupportedType("float")),
            Arg::Bool(_) => Err(CoreError::UnsupportedType("bool")),
        }
    }
}

impl TryFrom<&str> for Operands {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Operands::from_decimal(value)
    }
}

fn parse_fraction(digits: &str) -> Option<u64> {
    if digits.is_empty() {
        return Some(0);
    }
    digits.parse().ok()
}

fn invalid_number(input: &str) -> CoreError {
    CoreError::InvalidNumber(String::from(input))
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::Operands;
    use crate::{Arg, CoreError};

    fn ops(n: f64, i: u64, v: u64, w: u64, f: u64, t: u64) -> Operands {
        Operands {
            n,
            i,
            v,
            w,
            f,
            t,
            c: 0,
        }
    }

    #[test]
    fn integers_have_no_fraction_operands() {
        assert_eq!(Operands::from_signed(0), ops(0.0, 0, 0, 0, 0, 0));
        assert_eq!(Operands::from_signed(1), ops(1.0, 1, 0, 0, 0, 0));
        assert_eq!(Operands::from_signed(-21), ops(21.0, 21, 0, 0, 0, 0));
        assert_eq!(Operands::from_unsigned(7), ops(7.0, 7, 0, 0, 0, 0));
    }

    #[test]
    fn decimal_strings_keep_visible_digits() {
        let cases = [
            ("0", ops(0.0, 0, 0, 0, 0, 0)),
            ("1", ops(1.0, 1, 0, 0, 0, 0)),
            ("1.0", ops(1.0, 1, 1, 0, 0, 0)),
            ("1.00", ops(1.0, 1, 2, 0, 0, 0)),
            ("1.3", ops(1.3, 1, 1, 1, 3, 3)),
            ("1.30", ops(1.3, 1, 2, 1, 30, 3)),
            ("1.03", ops(1.03, 1, 2, 2, 3, 3)),
            ("1.230", ops(1.23, 1, 3, 2, 230, 23)),
            ("20.0230", ops(20.023, 20, 4, 3, 230, 23)),
            ("-1234.5678", ops(1234.5678, 1234, 4, 4, 5678, 5678)),
        ];
        for (input, expected) in cases {
            let actual = Operands::from_decimal(input).expect("valid decimal");
            assert_eq!(actual, expected, "input {input}");
        }
    }

    #[test]
    fn extraction_is_repeatable() {
        let a = Operands::from_decimal("1234.56780000").expect("valid decimal");
        let b = Operands::from_decimal("1234.56780000").expect("valid decimal");
        assert_eq!(a, b);
        assert_eq!(a.i, 1234);
        assert_eq!(a.v, 8);
        assert_eq!(a.w, 4);
    }

    #[test]
    fn rejects_floats_and_bools() {
        let err = Operands::try_from(&Arg::Float(20.023)).expect_err("floats are rejected");
        assert_eq!(err, CoreError::UnsupportedType("float"));
        let err = Operands::try_from(&Arg::Bool(true)).expect_err("bools are rejected");
        assert_eq!(err, CoreError::UnsupportedType("bool"));
    }

    #[test]
    fn rejects_malformed_strings() {
        for input in ["", "abc", ".5", "1.2.3", "1e3", "--1"] {
            let err = Operands::from_decimal(input).expect_err("malformed decimal");
            assert_eq!(err, CoreError::InvalidNumber(String::from(input)));
        }
    }

    #[test]
    fn arg_dispatch_matches_direct_construction() {
        let from_arg = Operands::try_from(&Arg::Str(String::from("2.50"))).expect("decimal");
        assert_eq!(from_arg, ops(2.5, 2, 2, 1, 50, 5));
        let from_arg = Operands::try_from(&Arg::Int(-3)).expect("int");
        assert_eq!(from_arg, ops(3.0, 3, 0, 0, 0, 0));
    }
}
