//! Recursive contract validator.
//!
//! # Design Decisions
//! - First violation wins: fields are visited in declaration order and the
//!   walk stops at the first failure
//! - A missing required field is reported at the path of the missing key
//! - Keys not named by the contract are ignored

use std::fmt;

use serde_json::{Map, Value};

use crate::descriptor::contract::{Contract, ObjectShape, Shape};

/// The first constraint a document violates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Property names from the document root to the violation.
    pub path: Vec<String>,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}: {}", self.path.join("/"), self.message)
    }
}

impl std::error::Error for SchemaViolation {}

/// Validate `value` against `contract`.
pub fn validate(contract: &Contract, value: &Value) -> Result<(), SchemaViolation> {
    let mut path = Vec::new();
    check_object(&contract.root, value, &mut path)
}

fn check_object(
    shape: &ObjectShape,
    value: &Value,
    path: &mut Vec<String>,
) -> Result<(), SchemaViolation> {
    let object = expect_object(value, path)?;

    for field in shape.fields {
        path.push(field.name.to_string());
        match object.get(field.name) {
            Some(child) => check_shape(&field.shape, child, path)?,
            None if field.required => {
                return Err(violation(path, "required property is missing".to_string()));
            }
            None => {}
        }
        path.pop();
    }

    if let Some(keys) = shape.exactly_one_of {
        let present = keys.iter().filter(|k| object.contains_key(**k)).count();
        if present != 1 {
            let names = quoted(keys);
            return Err(violation(path, format!("exactly one of {names} must be present")));
        }
    }

    Ok(())
}

fn check_shape(shape: &Shape, value: &Value, path: &mut Vec<String>) -> Result<(), SchemaViolation> {
    match shape {
        Shape::Object(inner) => check_object(inner, value, path),
        Shape::AnyObject => expect_object(value, path).map(|_| ()),
        Shape::String => expect_str(value, path).map(|_| ()),
        Shape::StringEnum(allowed) => {
            let s = expect_str(value, path)?;
            if allowed.iter().any(|a| *a == s) {
                Ok(())
            } else {
                Err(violation(path, format!("'{s}' is not one of {}", quoted(allowed))))
            }
        }
        Shape::NonNegativeInteger => match value.as_u64() {
            Some(_) => Ok(()),
            None => Err(violation(
                path,
                format!("expected non-negative integer, found {}", describe(value)),
            )),
        },
        Shape::StringMap => {
            let object = expect_object(value, path)?;
            for (key, entry) in object {
                if !entry.is_string() {
                    path.push(key.clone());
                    return Err(violation(
                        path,
                        format!("expected string, found {}", describe(entry)),
                    ));
                }
            }
            Ok(())
        }
    }
}

fn expect_object<'a>(
    value: &'a Value,
    path: &[String],
) -> Result<&'a Map<String, Value>, SchemaViolation> {
    value
        .as_object()
        .ok_or_else(|| violation(path, format!("expected object, found {}", describe(value))))
}

fn expect_str<'a>(value: &'a Value, path: &[String]) -> Result<&'a str, SchemaViolation> {
    value
        .as_str()
        .ok_or_else(|| violation(path, format!("expected string, found {}", describe(value))))
}

fn violation(path: &[String], message: String) -> SchemaViolation {
    SchemaViolation {
        path: path.to_vec(),
        message,
    }
}

fn quoted(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
