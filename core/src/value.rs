//! Typed values and their declared shapes.
//!
//! [`Value`] is the tagged union every parameter resolves to; [`ValueType`]
//! describes the shape a parameter declares up front. Both serialize with
//! [`serde`] so parameter schemas can round-trip through JSON.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Declared shape of a parameter value.
///
/// `Compound` marks a heterogeneous array element and is never a valid
/// top-level declared type. Equality is structural: arrays are equal iff
/// their element types are equal.
///
/// # Examples
///
/// ```
/// use console_args_core::ValueType;
///
/// assert_eq!(ValueType::array(ValueType::Int), ValueType::array(ValueType::Int));
/// assert_ne!(ValueType::array(ValueType::Int), ValueType::array(ValueType::Bool));
/// assert_eq!(ValueType::Double.to_string(), "Double");
/// assert_eq!(ValueType::array(ValueType::String).to_string(), "Array<String>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    /// Integer.
    Int,
    /// Double-precision floating point.
    Double,
    /// String.
    String,
    /// Boolean.
    Bool,
    /// Homogeneously typed array.
    Array(Box<ValueType>),
    /// Mixed array element marker; only valid inside `Array`.
    Compound,
}

impl ValueType {
    /// Shorthand for `Array(Box::new(element))`.
    pub fn array(element: ValueType) -> Self {
        ValueType::Array(Box::new(element))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Int => write!(f, "Int"),
            ValueType::Double => write!(f, "Double"),
            ValueType::String => write!(f, "String"),
            ValueType::Bool => write!(f, "Bool"),
            ValueType::Array(element) => write!(f, "Array<{element}>"),
            ValueType::Compound => write!(f, "Compound"),
        }
    }
}

/// A parsed parameter value.
///
/// Array values carry the element [`ValueType`] they were parsed as, or
/// [`ValueType::Compound`] when elements are mixed. A non-`Compound` tag is
/// expected to match every contained element's type.
///
/// Equality and ordering are defined only across matching variants;
/// cross-variant comparisons are never equal and never less.
///
/// # Examples
///
/// ```
/// use console_args_core::{Value, ValueType};
///
/// let value = Value::Int(42);
/// assert_eq!(value.int_value().unwrap(), 42);
/// assert!(value.string_value().is_err());
/// assert_eq!(value.type_of(), ValueType::Int);
///
/// assert!(Value::Int(1) < Value::Int(2));
/// assert_ne!(Value::Int(1), Value::Double(1.0));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Integer.
    Int(i64),
    /// Double-precision floating point.
    Double(f64),
    /// String.
    String(String),
    /// Boolean.
    Bool(bool),
    /// Array of values tagged with their common element type.
    Array(Vec<Value>, ValueType),
}

impl Value {
    /// The declared-shape tag of this value.
    pub fn type_of(&self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Int,
            Value::Double(_) => ValueType::Double,
            Value::String(_) => ValueType::String,
            Value::Bool(_) => ValueType::Bool,
            Value::Array(_, element) => ValueType::array(element.clone()),
        }
    }

    /// Returns the contained integer, failing on any other variant.
    pub fn int_value(&self) -> Result<i64, ValueError> {
        match self {
            Value::Int(value) => Ok(*value),
            _ => Err(ValueError::NoValue),
        }
    }

    /// Returns the contained double, failing on any other variant.
    pub fn double_value(&self) -> Result<f64, ValueError> {
        match self {
            Value::Double(value) => Ok(*value),
            _ => Err(ValueError::NoValue),
        }
    }

    /// Returns the contained string, failing on any other variant.
    pub fn string_value(&self) -> Result<&str, ValueError> {
        match self {
            Value::String(value) => Ok(value),
            _ => Err(ValueError::NoValue),
        }
    }

    /// Returns the contained boolean, failing on any other variant.
    pub fn bool_value(&self) -> Result<bool, ValueError> {
        match self {
            Value::Bool(value) => Ok(*value),
            _ => Err(ValueError::NoValue),
        }
    }

    /// Returns the contained elements, failing on any other variant.
    pub fn array_value(&self) -> Result<&[Value], ValueError> {
        match self {
            Value::Array(values, _) => Ok(values),
            _ => Err(ValueError::NoValue),
        }
    }

    /// Best-effort integer coercion.
    ///
    /// Doubles truncate, numeric strings parse, and a single-element array
    /// coerces to its element's coercion.
    ///
    /// ```
    /// use console_args_core::{Value, ValueType};
    ///
    /// assert_eq!(Value::Double(3.9).as_int(), Some(3));
    /// assert_eq!(Value::String("17".into()).as_int(), Some(17));
    /// assert_eq!(Value::Array(vec![Value::Int(5)], ValueType::Int).as_int(), Some(5));
    /// assert_eq!(Value::Bool(true).as_int(), None);
    /// ```
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            Value::Double(value) => Some(*value as i64),
            Value::String(value) => value.parse().ok(),
            Value::Array(values, _) if values.len() == 1 => values[0].as_int(),
            _ => None,
        }
    }

    /// Best-effort double coercion.
    ///
    /// Integers widen, numeric strings parse, and a single-element array
    /// coerces to its element's coercion.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(value) => Some(*value),
            Value::Int(value) => Some(*value as f64),
            Value::String(value) => value.parse().ok(),
            Value::Array(values, _) if values.len() == 1 => values[0].as_double(),
            _ => None,
        }
    }

    /// Best-effort boolean coercion.
    ///
    /// Accepts `0`/`1` integers, the case-insensitive strings
    /// `"true"`/`"1"`/`"false"`/`"0"`, and single-element arrays.
    ///
    /// ```
    /// use console_args_core::Value;
    ///
    /// assert_eq!(Value::String("TRUE".into()).as_bool(), Some(true));
    /// assert_eq!(Value::Int(0).as_bool(), Some(false));
    /// assert_eq!(Value::Int(2).as_bool(), None);
    /// ```
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            Value::Int(0) => Some(false),
            Value::Int(1) => Some(true),
            Value::String(value) => match value.to_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            Value::Array(values, _) if values.len() == 1 => values[0].as_bool(),
            _ => None,
        }
    }

    /// Flat textual rendition: scalars print bare, arrays comma-join their
    /// elements.
    pub fn raw_string(&self) -> String {
        match self {
            Value::Int(value) => value.to_string(),
            Value::Double(value) => format!("{value:?}"),
            Value::String(value) => value.clone(),
            Value::Bool(value) => value.to_string(),
            Value::Array(values, _) => values
                .iter()
                .map(Value::raw_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    // Element rendition inside an array display: scalars bare, nested arrays
    // parenthesized.
    fn compact(&self) -> String {
        match self {
            Value::Array(values, _) => {
                let inner = values
                    .iter()
                    .map(Value::compact)
                    .collect::<Vec<_>>()
                    .join(",");
                format!("({inner})")
            }
            other => other.raw_string(),
        }
    }
}

impl fmt::Display for Value {
    /// Renders the value with its type tag, e.g. `Int(10)` or
    /// `Array<String>(a,b,c)`. Nested array elements appear parenthesized:
    /// `Array<Array<String>>((a,b),(a,b))`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "Int({value})"),
            Value::Double(value) => write!(f, "Double({value:?})"),
            Value::String(value) => write!(f, "String({value})"),
            Value::Bool(value) => write!(f, "Bool({value})"),
            Value::Array(values, element) => {
                let contents = values
                    .iter()
                    .map(Value::compact)
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "Array<{element}>({contents})")
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(lhs), Value::Int(rhs)) => lhs == rhs,
            (Value::Double(lhs), Value::Double(rhs)) => lhs == rhs,
            (Value::String(lhs), Value::String(rhs)) => lhs == rhs,
            (Value::Bool(lhs), Value::Bool(rhs)) => lhs == rhs,
            (Value::Array(lhs, lhs_ty), Value::Array(rhs, rhs_ty)) => {
                lhs_ty == rhs_ty && lhs == rhs
            }
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    /// Ordering is defined only across matching variants; arrays compare
    /// lexicographically when their element tags match. Everything else is
    /// unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(lhs), Value::Int(rhs)) => lhs.partial_cmp(rhs),
            (Value::Double(lhs), Value::Double(rhs)) => lhs.partial_cmp(rhs),
            (Value::String(lhs), Value::String(rhs)) => lhs.partial_cmp(rhs),
            (Value::Bool(lhs), Value::Bool(rhs)) => lhs.partial_cmp(rhs),
            (Value::Array(lhs, lhs_ty), Value::Array(rhs, rhs_ty)) if lhs_ty == rhs_ty => {
                lhs.partial_cmp(rhs)
            }
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Vec<Value>> for Value {
    /// Builds an array with the inferred common element type; see
    /// [`dynamic_array`](crate::dynamic_array).
    fn from(values: Vec<Value>) -> Self {
        crate::extract::dynamic_array(values)
    }
}
