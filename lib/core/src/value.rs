//! Typed conversion of stored parameter text
//!
//! Every parameter is stored as text. A consumer picks the target type at the
//! call site and the matching [`ParamValue`] impl decides how the text is read.
//! Numeric, boolean and character types must consume the whole string (leading
//! whitespace is skipped, anything left over is an error). Floating point text
//! must be a finite number, `inf` and `NaN` are rejected. `String` is the
//! identity conversion and never fails.

use crate::error::{ParamError, Result};
use std::fmt::Display;

/// A type that can be read from, and written back to, parameter text.
///
/// Implement this for consumer-specific types (enums, units) to make them
/// available through [`ParameterManager`](crate::ParameterManager) getters.
pub trait ParamValue: Display + Sized {
    /// Name reported in conversion errors.
    const TYPE_NAME: &'static str;

    /// Parses the complete text, returning `None` on malformed or trailing input.
    fn parse_param(text: &str) -> Option<Self>;
}

macro_rules! impl_from_str_param {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ParamValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                #[inline]
                fn parse_param(text: &str) -> Option<Self> {
                    text.trim_start().parse().ok()
                }
            }
        )*
    };
}

impl_from_str_param!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, char);

macro_rules! impl_float_param {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ParamValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                #[inline]
                fn parse_param(text: &str) -> Option<Self> {
                    text.trim_start()
                        .parse::<$ty>()
                        .ok()
                        .filter(|value| value.is_finite())
                }
            }
        )*
    };
}

impl_float_param!(f32, f64);

impl ParamValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn parse_param(text: &str) -> Option<Self> {
        match text.trim_start() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        }
    }
}

impl ParamValue for String {
    const TYPE_NAME: &'static str = "String";

    #[inline]
    fn parse_param(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

/// Converts the stored text of parameter `name` into `T`.
pub(crate) fn convert<T: ParamValue>(name: &str, text: &str) -> Result<T> {
    T::parse_param(text).ok_or_else(|| ParamError::Conversion {
        name: name.to_string(),
        value: text.to_string(),
        type_name: T::TYPE_NAME,
    })
}
