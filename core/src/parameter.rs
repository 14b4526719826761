//! Parameter schema descriptors.
//!
//! A command declares its inputs as a list of [`Parameter`] values — a closed
//! sum over the four descriptor kinds:
//!
//! - [`Argument`] — argument-prefixed, must carry an explicit value when used.
//! - [`ValueOption`] — option-prefixed, may fall back to a default.
//! - [`FlagOption`] — option-prefixed boolean presence marker.
//! - [`CaseArgument`] — an argument restricted to an enumerated allow-list.
//!
//! Every kind resolves through the single
//! [`Parameter::resolve`] operation, keyed on whether the user supplied the
//! parameter and the raw value segment, if any.

use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::extract::extract_value;
use crate::value::{Value, ValueType};

/// An argument-prefixed parameter.
///
/// When present in the input it must carry an explicit `=value` (or
/// short-form) segment; when omitted it falls back to its default.
///
/// # Examples
///
/// ```
/// use console_args_core::{Argument, ValueType};
///
/// let argument = Argument::new("test", ValueType::String)
///     .with_default("val".into())
///     .with_short_form('t');
/// assert_eq!(argument.name, "test");
/// assert_eq!(argument.short_form, Some('t'));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Parameter name (without prefix).
    pub name: String,
    /// Declared value shape.
    pub expected: ValueType,
    /// Fallback when the argument is omitted.
    pub default: Option<Value>,
    /// Human-readable description lines.
    pub description: Vec<String>,
    /// Single-character abbreviation.
    pub short_form: Option<char>,
}

impl Argument {
    /// Creates an argument with no default, description, or short form.
    pub fn new(name: impl Into<String>, expected: ValueType) -> Self {
        Self {
            name: name.into(),
            expected,
            default: None,
            description: Vec::new(),
            short_form: None,
        }
    }

    /// Sets the fallback value used when the argument is omitted.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Adds description lines.
    pub fn with_description(mut self, lines: &[&str]) -> Self {
        self.description = lines.iter().map(|line| line.to_string()).collect();
        self
    }

    /// Sets the single-character short form.
    pub fn with_short_form(mut self, short_form: char) -> Self {
        self.short_form = Some(short_form);
        self
    }
}

/// An option-prefixed parameter carrying a typed value.
///
/// May be omitted entirely (resolves to its default, or to "not supplied"
/// when there is none) or used bare (resolves to its default; an error when
/// no default is configured).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueOption {
    /// Parameter name (without prefix).
    pub name: String,
    /// Declared value shape.
    pub expected: ValueType,
    /// Fallback when the option is omitted or used bare.
    pub default: Option<Value>,
    /// Human-readable description lines.
    pub description: Vec<String>,
    /// Single-character abbreviation.
    pub short_form: Option<char>,
}

impl ValueOption {
    /// Creates a value option with no default, description, or short form.
    pub fn new(name: impl Into<String>, expected: ValueType) -> Self {
        Self {
            name: name.into(),
            expected,
            default: None,
            description: Vec::new(),
            short_form: None,
        }
    }

    /// Sets the fallback value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Adds description lines.
    pub fn with_description(mut self, lines: &[&str]) -> Self {
        self.description = lines.iter().map(|line| line.to_string()).collect();
        self
    }

    /// Sets the single-character short form.
    pub fn with_short_form(mut self, short_form: char) -> Self {
        self.short_form = Some(short_form);
        self
    }
}

/// An option-prefixed boolean presence marker.
///
/// Absent resolves to `false`, present to `true`. Any `=value` suffix on a
/// flag token is ignored rather than rejected; the flag still just counts as
/// present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagOption {
    /// Parameter name (without prefix).
    pub name: String,
    /// Human-readable description lines.
    pub description: Vec<String>,
    /// Single-character abbreviation.
    pub short_form: Option<char>,
}

impl FlagOption {
    /// Creates a flag with no description or short form.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Vec::new(),
            short_form: None,
        }
    }

    /// Adds description lines.
    pub fn with_description(mut self, lines: &[&str]) -> Self {
        self.description = lines.iter().map(|line| line.to_string()).collect();
        self
    }

    /// Sets the single-character short form.
    pub fn with_short_form(mut self, short_form: char) -> Self {
        self.short_form = Some(short_form);
        self
    }
}

/// Default selection for a [`CaseArgument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefaultCases {
    /// The whole allow-list is the default.
    All,
    /// A custom subset is the default; an empty subset means no default.
    Custom(Vec<Value>),
    /// No default; the argument must be supplied.
    None,
}

/// An argument restricted to an enumerated allow-list of raw values.
///
/// Parses as an array of the allow-list's element type and validates every
/// parsed element against the list.
///
/// # Examples
///
/// ```
/// use console_args_core::CaseArgument;
///
/// let operation = CaseArgument::strings("op", &["sum", "mean", "max"]);
/// assert!(operation.resolve_from("sum,max").is_ok());
/// assert!(operation.resolve_from("median").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseArgument {
    /// Parameter name (without prefix).
    pub name: String,
    /// Allow-list of raw values, all of one element type.
    allowed: Vec<Value>,
    /// Element type of the allow-list.
    element: ValueType,
    /// Fallback when the argument is omitted.
    pub default: Option<Value>,
    /// Human-readable description lines.
    pub description: Vec<String>,
    /// Single-character abbreviation.
    pub short_form: Option<char>,
}

impl CaseArgument {
    fn new(name: impl Into<String>, allowed: Vec<Value>, element: ValueType) -> Self {
        let default = Some(Value::Array(allowed.clone(), element.clone()));
        Self {
            name: name.into(),
            allowed,
            element,
            default,
            description: Vec::new(),
            short_form: None,
        }
    }

    /// Creates a string-backed case argument; the whole allow-list is the
    /// default.
    pub fn strings(name: impl Into<String>, allowed: &[&str]) -> Self {
        let allowed = allowed.iter().map(|raw| Value::from(*raw)).collect();
        Self::new(name, allowed, ValueType::String)
    }

    /// Creates an int-backed case argument; the whole allow-list is the
    /// default.
    pub fn ints(name: impl Into<String>, allowed: &[i64]) -> Self {
        let allowed = allowed.iter().map(|raw| Value::Int(*raw)).collect();
        Self::new(name, allowed, ValueType::Int)
    }

    /// Replaces the default selection.
    pub fn with_default_cases(mut self, default: DefaultCases) -> Self {
        self.default = match default {
            DefaultCases::All => Some(Value::Array(self.allowed.clone(), self.element.clone())),
            DefaultCases::Custom(custom) if !custom.is_empty() => {
                Some(Value::Array(custom, self.element.clone()))
            }
            DefaultCases::Custom(_) | DefaultCases::None => None,
        };
        self
    }

    /// Adds description lines.
    pub fn with_description(mut self, lines: &[&str]) -> Self {
        self.description = lines.iter().map(|line| line.to_string()).collect();
        self
    }

    /// Sets the single-character short form.
    pub fn with_short_form(mut self, short_form: char) -> Self {
        self.short_form = Some(short_form);
        self
    }

    /// The declared shape: an array of the allow-list element type.
    pub fn expected(&self) -> ValueType {
        ValueType::array(self.element.clone())
    }

    /// Allow-list of raw values.
    pub fn allowed(&self) -> &[Value] {
        &self.allowed
    }

    /// Extracts a raw segment as an array and validates every element against
    /// the allow-list.
    pub fn resolve_from(&self, raw: &str) -> Result<Value> {
        let value = extract_value(&self.expected(), raw)?;
        let elements = value.array_value().map_err(Error::from)?;
        for element in elements {
            if !self.allowed.contains(element) {
                return Err(Error::UnknownCase {
                    allowed: self.allowed.iter().map(Value::raw_string).collect(),
                    got: raw.to_string(),
                });
            }
        }
        Ok(value)
    }
}

/// Parameter kind group, deciding which prefix introduces the parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterKind {
    /// Argument-prefixed ([`Argument`], [`CaseArgument`]).
    Argument,
    /// Option-prefixed ([`ValueOption`], [`FlagOption`]).
    Option,
}

/// A declared parameter: the closed sum over all descriptor kinds.
///
/// # Examples
///
/// ```
/// use console_args_core::{Argument, Configuration, Parameter, ValueType};
///
/// let parameter = Parameter::Argument(
///     Argument::new("nums", ValueType::array(ValueType::Int)).with_short_form('n'),
/// );
/// let config = Configuration::default();
/// assert_eq!(parameter.console_name(&config), "-nums");
/// assert_eq!(parameter.console_short_form(&config), Some("-n".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Parameter {
    /// Argument-prefixed parameter with a required value when used.
    Argument(Argument),
    /// Option-prefixed parameter carrying a typed value.
    Option(ValueOption),
    /// Option-prefixed boolean presence marker.
    Flag(FlagOption),
    /// Argument restricted to an allow-list.
    Case(CaseArgument),
}

impl Parameter {
    /// Parameter name without prefix.
    pub fn name(&self) -> &str {
        match self {
            Parameter::Argument(argument) => &argument.name,
            Parameter::Option(option) => &option.name,
            Parameter::Flag(flag) => &flag.name,
            Parameter::Case(case) => &case.name,
        }
    }

    /// Single-character abbreviation, if declared.
    pub fn short_form(&self) -> Option<char> {
        match self {
            Parameter::Argument(argument) => argument.short_form,
            Parameter::Option(option) => option.short_form,
            Parameter::Flag(flag) => flag.short_form,
            Parameter::Case(case) => case.short_form,
        }
    }

    /// The kind group this parameter belongs to.
    pub fn kind(&self) -> ParameterKind {
        match self {
            Parameter::Argument(_) | Parameter::Case(_) => ParameterKind::Argument,
            Parameter::Option(_) | Parameter::Flag(_) => ParameterKind::Option,
        }
    }

    /// Declared value shape (flags are boolean).
    pub fn expected(&self) -> ValueType {
        match self {
            Parameter::Argument(argument) => argument.expected.clone(),
            Parameter::Option(option) => option.expected.clone(),
            Parameter::Flag(_) => ValueType::Bool,
            Parameter::Case(case) => case.expected(),
        }
    }

    /// Default value (flags implicitly default to `false`).
    pub fn default_value(&self) -> Option<Value> {
        match self {
            Parameter::Argument(argument) => argument.default.clone(),
            Parameter::Option(option) => option.default.clone(),
            Parameter::Flag(_) => Some(Value::Bool(false)),
            Parameter::Case(case) => case.default.clone(),
        }
    }

    /// Description lines; case arguments append their allow-list.
    pub fn description_lines(&self) -> Vec<String> {
        match self {
            Parameter::Argument(argument) => argument.description.clone(),
            Parameter::Option(option) => option.description.clone(),
            Parameter::Flag(flag) => flag.description.clone(),
            Parameter::Case(case) => {
                let mut lines = case.description.clone();
                lines.push(String::new());
                lines.extend(case.allowed.iter().map(Value::raw_string));
                lines
            }
        }
    }

    /// Fully prefixed console name, e.g. `-nums` or `--verbose`.
    pub fn console_name(&self, config: &Configuration) -> String {
        format!("{}{}", self.prefix(config), self.name())
    }

    /// Fully prefixed short form, e.g. `-n`.
    pub fn console_short_form(&self, config: &Configuration) -> Option<String> {
        self.short_form()
            .map(|short| format!("{}{}", self.prefix(config), short))
    }

    fn prefix<'a>(&self, config: &'a Configuration) -> &'a str {
        match self.kind() {
            ParameterKind::Argument => config.argument_prefix(),
            ParameterKind::Option => config.option_prefix(),
        }
    }

    /// Identity comparison: two parameters are the same slot iff they belong
    /// to the same kind group and either their names match or both declare
    /// the same short form. This is the basis for collision checking and
    /// value lookup; structural equality (`==`) compares full descriptors
    /// instead.
    ///
    /// ```
    /// use console_args_core::{Argument, Parameter, ValueType};
    ///
    /// let by_name = Parameter::Argument(Argument::new("exp", ValueType::Int));
    /// let with_default = Parameter::Argument(
    ///     Argument::new("exp", ValueType::Int).with_default(1.into()),
    /// );
    /// assert!(by_name.matches_identity(&with_default));
    /// ```
    pub fn matches_identity(&self, other: &Parameter) -> bool {
        if self.kind() != other.kind() {
            return false;
        }
        if self.name() == other.name() {
            return true;
        }
        match (self.short_form(), other.short_form()) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            _ => false,
        }
    }

    /// Resolves the parameter to a value.
    ///
    /// `used_by_user` states whether a token referenced this parameter; `raw`
    /// carries the value segment of that token, if any. Returns `Ok(None)`
    /// for an omitted defaultless value option ("not supplied").
    pub fn resolve(&self, used_by_user: bool, raw: Option<&str>) -> Result<Option<Value>> {
        match self {
            Parameter::Argument(argument) => {
                if !used_by_user {
                    return match &argument.default {
                        Some(default) => Ok(Some(default.clone())),
                        None => Err(Error::NoValue(argument.name.clone())),
                    };
                }
                match raw {
                    Some(raw) => Ok(Some(extract_value(&argument.expected, raw)?)),
                    // arguments must carry a value when invoked
                    None => Err(Error::ArgumentWithoutValueFound(argument.name.clone())),
                }
            }
            Parameter::Option(option) => match raw {
                Some(raw) => Ok(Some(extract_value(&option.expected, raw)?)),
                None => {
                    if used_by_user && option.default.is_none() {
                        return Err(Error::RequestedFlagOnValueOption(option.name.clone()));
                    }
                    Ok(option.default.clone())
                }
            },
            // Presence is all that counts; a `=value` suffix is not validated.
            Parameter::Flag(_) => Ok(Some(Value::Bool(used_by_user))),
            Parameter::Case(case) => {
                if !used_by_user {
                    return match &case.default {
                        Some(default) => Ok(Some(default.clone())),
                        None => Err(Error::NoValue(case.name.clone())),
                    };
                }
                match raw {
                    Some(raw) => Ok(Some(case.resolve_from(raw)?)),
                    None => Err(Error::ArgumentWithoutValueFound(case.name.clone())),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(name: &str, short_form: Option<char>) -> Parameter {
        let mut argument = Argument::new(name, ValueType::Int).with_default(0.into());
        argument.short_form = short_form;
        Parameter::Argument(argument)
    }

    fn opt(name: &str, short_form: Option<char>) -> Parameter {
        let mut option = ValueOption::new(name, ValueType::Int).with_default(0.into());
        option.short_form = short_form;
        Parameter::Option(option)
    }

    #[test]
    fn test_identity_table() {
        let exp_e_opt = opt("exp", Some('e'));
        let exp_e_arg = arg("exp", Some('e'));
        let exp_nil_arg = arg("exp", None);
        let exp_nil_opt = opt("exp", None);
        let other_e_arg = arg("other", Some('e'));

        let pairs = [
            (&exp_e_opt, &exp_e_arg, false), // kinds differ
            (&exp_e_arg, &exp_e_arg, true),
            (&exp_e_opt, &exp_e_opt, true),
            (&exp_nil_opt, &exp_nil_arg, false),
            (&exp_nil_arg, &exp_e_arg, true),  // names match
            (&other_e_arg, &exp_e_arg, true),  // short forms match
            (&other_e_arg, &exp_nil_arg, false),
        ];
        for (lhs, rhs, expected) in pairs {
            assert_eq!(lhs.matches_identity(rhs), expected, "{lhs:?} vs {rhs:?}");
            assert_eq!(rhs.matches_identity(lhs), expected);
        }
    }

    #[test]
    fn test_identity_ignores_defaults() {
        let plain = arg("exp", Some('e'));
        let with_default = Parameter::Argument(
            Argument::new("exp", ValueType::Int)
                .with_default(1.into())
                .with_short_form('e'),
        );
        assert!(plain.matches_identity(&with_default));
        assert_ne!(plain, with_default);
    }

    #[test]
    fn test_argument_resolution() {
        let argument = Parameter::Argument(
            Argument::new("test", ValueType::String).with_default("val".into()),
        );
        assert_eq!(
            argument.resolve(false, None).unwrap(),
            Some(Value::from("val"))
        );
        assert_eq!(
            argument.resolve(true, Some("some")).unwrap(),
            Some(Value::from("some"))
        );
        assert_eq!(
            argument.resolve(true, None),
            Err(Error::ArgumentWithoutValueFound("test".to_string()))
        );

        let defaultless = Parameter::Argument(Argument::new("bare", ValueType::Int));
        assert_eq!(
            defaultless.resolve(false, None),
            Err(Error::NoValue("bare".to_string()))
        );
    }

    #[test]
    fn test_value_option_resolution() {
        let with_default = Parameter::Option(
            ValueOption::new("test", ValueType::String).with_default("optval".into()),
        );
        assert_eq!(
            with_default.resolve(false, None).unwrap(),
            Some(Value::from("optval"))
        );
        assert_eq!(
            with_default.resolve(true, None).unwrap(),
            Some(Value::from("optval"))
        );

        let defaultless = Parameter::Option(ValueOption::new("some", ValueType::Bool));
        assert_eq!(defaultless.resolve(false, None).unwrap(), None);
        assert_eq!(
            defaultless.resolve(true, None),
            Err(Error::RequestedFlagOnValueOption("some".to_string()))
        );
        assert_eq!(
            defaultless.resolve(true, Some("1")).unwrap(),
            Some(Value::Bool(true))
        );
    }

    #[test]
    fn test_flag_resolution() {
        let flag = Parameter::Flag(FlagOption::new("verbose"));
        assert_eq!(flag.resolve(false, None).unwrap(), Some(Value::Bool(false)));
        assert_eq!(flag.resolve(true, None).unwrap(), Some(Value::Bool(true)));
        // presence wins even with a value segment attached
        assert_eq!(flag.resolve(true, Some("x")).unwrap(), Some(Value::Bool(true)));
    }

    #[test]
    fn test_case_argument_resolution() {
        let case = CaseArgument::strings("op", &["sum", "mean"]);
        let value = case.resolve_from("sum,mean").unwrap();
        assert_eq!(value.array_value().unwrap().len(), 2);

        let err = case.resolve_from("sum,median").unwrap_err();
        assert!(matches!(err, Error::UnknownCase { .. }));

        let parameter = Parameter::Case(case.clone());
        // defaults to the whole allow-list
        assert_eq!(
            parameter.resolve(false, None).unwrap(),
            Some(Value::Array(
                vec![Value::from("sum"), Value::from("mean")],
                ValueType::String,
            ))
        );

        let no_default = Parameter::Case(case.with_default_cases(DefaultCases::None));
        assert_eq!(
            no_default.resolve(false, None),
            Err(Error::NoValue("op".to_string()))
        );
    }

    #[test]
    fn test_int_backed_case_argument() {
        let case = CaseArgument::ints("level", &[1, 2, 3]);
        assert!(case.resolve_from("2,3").is_ok());
        assert!(case.resolve_from("4").is_err());
        assert_eq!(case.expected(), ValueType::array(ValueType::Int));
    }

    #[test]
    fn test_console_names() {
        let config = Configuration::default();
        let argument = arg("test", Some('t'));
        let option = opt("verbose", Some('v'));
        assert_eq!(argument.console_name(&config), "-test");
        assert_eq!(argument.console_short_form(&config), Some("-t".to_string()));
        assert_eq!(option.console_name(&config), "--verbose");
        assert_eq!(option.console_short_form(&config), Some("--v".to_string()));
    }
}
