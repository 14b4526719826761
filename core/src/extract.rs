//! Raw string to typed value extraction.
//!
//! [`extract_value`] converts one raw token segment into a [`Value`] per the
//! declared [`ValueType`]; [`dynamic_array`] infers the element type of a
//! literal value list.

use crate::error::{Error, Result, ValueError};
use crate::value::{Value, ValueType};

fn extract_int(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| Error::IncorrectValue(raw.to_string()))
}

fn extract_double(raw: &str) -> Result<f64> {
    raw.parse()
        .map_err(|_| Error::IncorrectValue(raw.to_string()))
}

fn extract_bool(raw: &str) -> Result<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(Error::IncorrectValue(raw.to_string())),
    }
}

// Opportunistic parse for Compound array elements, fixed priority.
fn extract_compound_element(raw: &str) -> Value {
    if let Ok(int) = extract_int(raw) {
        Value::Int(int)
    } else if let Ok(double) = extract_double(raw) {
        Value::Double(double)
    } else if let Ok(boolean) = extract_bool(raw) {
        Value::Bool(boolean)
    } else {
        Value::String(raw.to_string())
    }
}

/// Converts one raw string into a [`Value`] of the expected shape.
///
/// Array values split the raw string on `,` and extract each piece with the
/// element rule. `Array(Compound)` elements are tried as Int, then Double,
/// then Bool, falling back to String. Nested array shapes cannot be parsed
/// from a flat comma list and fail with
/// [`Error::IndirectValue`]; a top-level `Compound` fails with
/// [`ValueError::CompoundIsNotTopLevelType`].
///
/// # Examples
///
/// ```
/// use console_args_core::{extract_value, Value, ValueType};
///
/// let value = extract_value(&ValueType::Int, "-125").unwrap();
/// assert_eq!(value, Value::Int(-125));
///
/// let bools = extract_value(&ValueType::array(ValueType::Bool), "false,TRUE,1").unwrap();
/// assert_eq!(bools.array_value().unwrap().len(), 3);
///
/// assert!(extract_value(&ValueType::Int, "twelve").is_err());
/// ```
pub fn extract_value(expected: &ValueType, raw: &str) -> Result<Value> {
    match expected {
        ValueType::Int => Ok(Value::Int(extract_int(raw)?)),
        ValueType::Double => Ok(Value::Double(extract_double(raw)?)),
        ValueType::String => Ok(Value::String(raw.to_string())),
        ValueType::Bool => Ok(Value::Bool(extract_bool(raw)?)),
        ValueType::Array(element) => {
            let pieces = raw.split(',');
            let values: Vec<Value> = match element.as_ref() {
                ValueType::Int => pieces
                    .map(|piece| extract_int(piece).map(Value::Int))
                    .collect::<Result<_>>()?,
                ValueType::Double => pieces
                    .map(|piece| extract_double(piece).map(Value::Double))
                    .collect::<Result<_>>()?,
                ValueType::String => pieces.map(|piece| Value::String(piece.to_string())).collect(),
                ValueType::Bool => pieces
                    .map(|piece| extract_bool(piece).map(Value::Bool))
                    .collect::<Result<_>>()?,
                ValueType::Compound => pieces.map(extract_compound_element).collect(),
                ValueType::Array(_) => return Err(Error::IndirectValue),
            };
            Ok(Value::Array(values, element.as_ref().clone()))
        }
        ValueType::Compound => Err(ValueError::CompoundIsNotTopLevelType.into()),
    }
}

/// Builds an array [`Value`] from a literal list, inferring the element type.
///
/// All elements sharing one type yield that type; mixed elements are tagged
/// [`ValueType::Compound`]. An empty list yields an empty `Compound` array.
///
/// # Examples
///
/// ```
/// use console_args_core::{dynamic_array, Value, ValueType};
///
/// let same = dynamic_array(vec![Value::Int(1), Value::Int(2)]);
/// assert_eq!(same.type_of(), ValueType::array(ValueType::Int));
///
/// let mixed = dynamic_array(vec![Value::Int(1), Value::Bool(true)]);
/// assert_eq!(mixed.type_of(), ValueType::array(ValueType::Compound));
///
/// assert_eq!(dynamic_array(vec![]).type_of(), ValueType::array(ValueType::Compound));
/// ```
pub fn dynamic_array(values: Vec<Value>) -> Value {
    let mut element = ValueType::Compound;
    if let Some(first) = values.first() {
        let candidate = first.type_of();
        if values.iter().skip(1).all(|value| value.type_of() == candidate) {
            element = candidate;
        }
    }
    Value::Array(values, element)
}
