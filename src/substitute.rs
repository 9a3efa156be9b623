// src/substitute.rs

//! Input substitution.
//!
//! The playground frontend sends Jac source together with an ordered list of
//! typed values. Jac programs read interactive input through `input()`; here
//! each of those calls is rewritten, left to right, into the literal rendering
//! of the corresponding value before the program ever reaches the interpreter.
//!
//! Matching is purely textual: an `input` identifier followed by empty
//! parentheses, with optional whitespace before and inside the parentheses.
//! No Jac parsing is performed.

use regex::{Captures, Regex};
use serde::Deserialize;
use std::sync::OnceLock;
use thiserror::Error;

/// A caller-supplied value plus the type tag dictating how it is rendered
/// into source text.
#[derive(Debug, Clone, Deserialize)]
pub struct TypedInput {
    /// Raw value, always transported as a string.
    pub value: String,

    /// Type tag: "int" | "float" | "str".
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Error)]
pub enum SubstituteError {
    /// The raw value could not be parsed under its declared type tag.
    #[error("invalid {kind} value: {value:?}")]
    ValueConversion { kind: &'static str, value: String },

    /// Type tag outside the recognized set.
    #[error("Unsupported input type: {0}")]
    UnsupportedType(String),

    /// A placeholder was matched with no value left to consume. Only
    /// reachable with an empty input list: a non-empty list caps the match
    /// count at its own length.
    #[error("no input value available for input() call")]
    ExhaustedInputs,
}

fn input_call() -> &'static Regex {
    static INPUT_CALL: OnceLock<Regex> = OnceLock::new();
    INPUT_CALL.get_or_init(|| Regex::new(r"input\s*\(\s*\)").unwrap())
}

/// Render a single input as Jac literal text.
///
/// Note: "str" values are wrapped in double quotes verbatim, with no escaping.
/// A value containing a quote or backslash produces invalid Jac; the
/// interpreter reports that, not us.
fn render_literal(input: &TypedInput) -> Result<String, SubstituteError> {
    match input.kind.as_str() {
        "int" => {
            let n: i64 = input.value.trim().parse().map_err(|_| {
                SubstituteError::ValueConversion {
                    kind: "int",
                    value: input.value.clone(),
                }
            })?;
            Ok(n.to_string())
        }
        "float" => {
            let f: f64 = input.value.trim().parse().map_err(|_| {
                SubstituteError::ValueConversion {
                    kind: "float",
                    value: input.value.clone(),
                }
            })?;
            Ok(f.to_string())
        }
        "str" => Ok(format!("\"{}\"", input.value)),
        other => Err(SubstituteError::UnsupportedType(other.to_string())),
    }
}

/// Replace the first N `input()` calls in `code` with literal renderings of
/// `inputs`, in order of appearance (N = `inputs.len()`).
///
/// Extra inputs are silently ignored; extra placeholders pass through as
/// literal `input()` text. An empty input list is the exception: any
/// placeholder then fails with [`SubstituteError::ExhaustedInputs`]. Any
/// conversion failure aborts the whole substitution with no partial result.
pub fn substitute_inputs(
    code: &str,
    inputs: &[TypedInput],
) -> Result<String, SubstituteError> {
    // Convert everything up front so a bad value can fail the request
    // before any text is rewritten.
    let literals = inputs
        .iter()
        .map(render_literal)
        .collect::<Result<Vec<_>, _>>()?;

    // regex::replacen treats a limit of 0 as "replace all": with no inputs
    // supplied, the first placeholder already exhausts the supply.
    let mut pending = literals.into_iter();
    let mut exhausted = false;
    let rewritten = input_call().replacen(code, inputs.len(), |caps: &Captures| {
        match pending.next() {
            Some(literal) => literal,
            None => {
                exhausted = true;
                caps[0].to_string()
            }
        }
    });

    if exhausted {
        return Err(SubstituteError::ExhaustedInputs);
    }

    Ok(rewritten.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(value: &str, kind: &str) -> TypedInput {
        TypedInput {
            value: value.to_string(),
            kind: kind.to_string(),
        }
    }

    #[test]
    fn substitutes_int() {
        let out = substitute_inputs("x = input()", &[input("5", "int")]).unwrap();
        assert_eq!(out, "x = 5");
    }

    #[test]
    fn substitutes_str_with_quotes_unescaped() {
        let out = substitute_inputs("x = input()", &[input("hello", "str")]).unwrap();
        assert_eq!(out, "x = \"hello\"");

        // Embedded quotes are passed through verbatim.
        let out = substitute_inputs("x = input()", &[input("a\"b", "str")]).unwrap();
        assert_eq!(out, "x = \"a\"b\"");
    }

    #[test]
    fn substitutes_float() {
        let out = substitute_inputs("y = input()", &[input("2.5", "float")]).unwrap();
        assert_eq!(out, "y = 2.5");
    }

    #[test]
    fn replaces_left_to_right_and_preserves_other_text() {
        let code = "a = input();\nb = input ( );\nc = a + b;";
        let out = substitute_inputs(code, &[input("1", "int"), input("two", "str")]).unwrap();
        assert_eq!(out, "a = 1;\nb = \"two\";\nc = a + b;");
    }

    #[test]
    fn matches_whitespace_variants() {
        let out = substitute_inputs("x = input  (   )", &[input("7", "int")]).unwrap();
        assert_eq!(out, "x = 7");
    }

    #[test]
    fn leaves_excess_placeholders_untouched() {
        let code = "a = input(); b = input();";
        let out = substitute_inputs(code, &[input("1", "int")]).unwrap();
        assert_eq!(out, "a = 1; b = input();");
    }

    #[test]
    fn ignores_excess_inputs() {
        let code = "a = input();";
        let out =
            substitute_inputs(code, &[input("1", "int"), input("2", "int")]).unwrap();
        assert_eq!(out, "a = 1;");
    }

    #[test]
    fn empty_inputs_fail_on_the_first_placeholder() {
        let err = substitute_inputs("a = input(); b = input();", &[]).unwrap_err();
        assert!(matches!(err, SubstituteError::ExhaustedInputs));
    }

    #[test]
    fn empty_inputs_without_placeholders_are_fine() {
        let code = "a = 1; b = 2;";
        let out = substitute_inputs(code, &[]).unwrap();
        assert_eq!(out, code);
    }

    #[test]
    fn unsupported_type_aborts() {
        let err = substitute_inputs("x = input()", &[input("true", "bool")]).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported input type: bool");
    }

    #[test]
    fn bad_int_is_a_conversion_error() {
        let err = substitute_inputs("x = input()", &[input("abc", "int")]).unwrap_err();
        assert!(matches!(err, SubstituteError::ValueConversion { kind: "int", .. }));
    }

    #[test]
    fn bad_float_is_a_conversion_error() {
        let err = substitute_inputs("x = input()", &[input("1.2.3", "float")]).unwrap_err();
        assert!(matches!(
            err,
            SubstituteError::ValueConversion { kind: "float", .. }
        ));
    }

    #[test]
    fn conversion_failure_returns_no_partial_result() {
        // First input is fine, second is not; nothing may be rewritten.
        let code = "a = input(); b = input();";
        assert!(substitute_inputs(code, &[input("1", "int"), input("x", "int")]).is_err());
    }

    #[test]
    fn case_sensitive_match_only() {
        let code = "a = Input(); b = INPUT();";
        let out = substitute_inputs(code, &[input("1", "int")]).unwrap();
        assert_eq!(out, code);
    }
}
