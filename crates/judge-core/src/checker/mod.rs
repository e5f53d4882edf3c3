//! The checker language and its evaluator.
//!
//! A checker is a short program in the language implemented by
//! [`lexer`]/[`parser`]/[`interpreter`] that must define a function named
//! `checker` of the shape `def checker(right_value, value) -> bool:`.
//! [`validate`] performs three structural checks in order: parse, look for
//! a `checker` definition, then look for a `return`. [`invoke`] runs the
//! validated program and maps any runtime failure to the single
//! `checker-non-boolean` identity.

pub mod ast;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod value;

use ast::Program;
use value::Value;

use crate::messages;

/// A structured failure in checker authoring or evaluation.
#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    /// Checker source failed to lex or parse. Canonical identity:
    /// `checker-call-failed`.
    #[error("{}", messages::CHECKER_CALL_FAILED)]
    InvalidCall { details: String },

    /// No top-level `def checker(...)` was found. Canonical identity:
    /// `checker-signature-missing`.
    #[error("{}", messages::CHECKER_SIGNATURE_MISSING)]
    SignatureMissing,

    /// `checker`'s body never textually contains `return`. Canonical
    /// identity: `checker-no-return`.
    #[error("{}", messages::CHECKER_NO_RETURN)]
    NoReturn,

    /// Either the call raised a runtime error, or it returned something
    /// other than a boolean. Canonical identity: `checker-non-boolean`.
    #[error("{}", messages::CHECKER_NON_BOOLEAN)]
    NonBoolean { details: Option<String> },
}

/// Parses and structurally validates a checker source, without invoking it.
pub fn validate(source: &str) -> Result<Program, CheckerError> {
    let tokens = lexer::lex(source).map_err(|e| CheckerError::InvalidCall {
        details: e.to_string(),
    })?;
    let program = parser::parse(tokens).map_err(|e| CheckerError::InvalidCall {
        details: e.to_string(),
    })?;

    let has_checker = program.stmts.iter().any(|stmt| {
        matches!(stmt, ast::Stmt::Def(def) if def.name == "checker")
    });
    if !has_checker {
        return Err(CheckerError::SignatureMissing);
    }

    let after_def = source
        .split_once("def checker")
        .map(|(_, rest)| rest)
        .unwrap_or("");
    if !after_def.contains("return") {
        return Err(CheckerError::NoReturn);
    }

    Ok(program)
}

/// Invokes a validated `checker` program with the given bindings.
pub fn invoke(
    program: &Program,
    right_value: &str,
    value: Option<&str>,
) -> Result<bool, CheckerError> {
    let value_arg = match value {
        Some(v) => Value::Str(v.to_string()),
        None => Value::None,
    };

    let result = interpreter::call(
        program,
        "checker",
        vec![Value::Str(right_value.to_string()), value_arg],
    );

    match result {
        Ok(Value::Bool(b)) => Ok(b),
        Ok(_) => Err(CheckerError::NonBoolean { details: None }),
        Err(err) => Err(CheckerError::NonBoolean {
            details: Some(err.to_string()),
        }),
    }
}

/// Validates and invokes a checker source in one step.
pub fn check(source: &str, right_value: &str, value: Option<&str>) -> Result<bool, CheckerError> {
    let program = validate(source)?;
    invoke(&program, right_value, value)
}
