use alloc::string::String;
use core::fmt;

/// A positional translation argument.
///
/// Plural selection accepts integers and decimal strings; floats and
/// booleans can still be formatted but cannot drive a plural form.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    Int(i64),
    Uint(u64),
    Str(String),
    Float(f64),
    Bool(bool),
}

impl Arg {
    pub fn type_name(&self) -> &'static str {
        match self {
            Arg::Int(_) => "int",
            Arg::Uint(_) => "uint",
            Arg::Str(_) => "string",
            Arg::Float(_) => "float64",
            Arg::Bool(_) => "bool",
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Int(value) => write!(f, "{value}"),
            Arg::Uint(value) => write!(f, "{value}"),
            Arg::Str(value) => f.write_str(value),
            Arg::Float(value) => write!(f, "{value}"),
            Arg::Bool(value) => write!(f, "{value}"),
        }
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Arg {
            fn from(value: $ty) -> Self {
                Arg::Int(value as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Arg {
            fn from(value: $ty) -> Self {
                Arg::Uint(value as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Arg::Float(f64::from(value))
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(String::from(value))
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Str(value.clone())
    }
}

/// Builds a `Vec<Arg>` from heterogeneous values.
#[macro_export]
macro_rules! args {
    () => {
        $crate::__private::Vec::<$crate::Arg>::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::__private::vec![$($crate::Arg::from($value)),+]
    };
}

/// Translates `key` with `locale`, converting each argument through [`Arg::from`].
#[macro_export]
macro_rules! tr {
    ($locale:expr, $key:expr) => {
        $locale.translate($key, &[])
    };
    ($locale:expr, $key:expr, $($value:expr),+ $(,)?) => {
        $locale.translate($key, &$crate::args![$($value),+])
    };
}
