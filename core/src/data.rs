//! The parameter resolution engine.
//!
//! [`CommandData`] is the immutable result of matching one parameter schema
//! against one token slice: a parameter→value store, an optional link to the
//! parent command's data for scoped fallback lookup, and an optional marker
//! for a detected subcommand boundary.
//!
//! Construction walks the tokens left to right against a shrinking candidate
//! pool (a parameter is matched by at most one token), then resolves every
//! unmatched parameter with its default semantics. Construction is atomic:
//! either every parameter resolves or no `CommandData` is produced.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::command::Command;
use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::parameter::{Argument, CaseArgument, FlagOption, Parameter, ParameterKind, ValueOption};
use crate::value::Value;

/// Resolved values for one command level.
///
/// Lookups check the local store first and fall back to the parent chain, so
/// a subcommand transparently reads parameters declared by an ancestor. The
/// parent never sees the child's parameters.
///
/// # Examples
///
/// ```
/// use console_args_core::*;
///
/// let config = Configuration::default();
/// let nums = Argument::new("nums", ValueType::array(ValueType::Int)).with_short_form('n');
/// let tokens = vec!["-n1,2,3".to_string()];
///
/// let data = CommandData::resolve(
///     &config,
///     vec![Parameter::Argument(nums.clone())],
///     &tokens,
///     &[],
///     None,
/// ).unwrap();
///
/// let value = data.argument_value(&nums).unwrap();
/// assert_eq!(value.array_value().unwrap().len(), 3);
/// ```
pub struct CommandData {
    resolved: Vec<(Parameter, Option<Value>)>,
    parent: Option<Rc<CommandData>>,
    next: Option<(Rc<dyn Command>, Vec<String>)>,
}

impl fmt::Debug for CommandData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandData")
            .field("resolved", &self.resolved)
            .field("has_parent", &self.parent.is_some())
            .field("next", &self.next.as_ref().map(|(command, rest)| {
                (command.name().to_string(), rest.clone())
            }))
            .finish()
    }
}

// One successful token match: candidate pool index plus the raw value segment
// accompanying it, if any.
type TokenMatch = (usize, Option<String>);

// Matches one token against the remaining candidates, in declaration order.
// A token with an `=` is only ever a `name=value` form; otherwise the exact
// console name is tried before the short form. `Ok(None)` means no candidate
// claimed the token.
fn match_parameter(
    config: &Configuration,
    token: &str,
    pool: &[Parameter],
) -> Result<Option<TokenMatch>> {
    for (index, candidate) in pool.iter().enumerate() {
        let console_name = candidate.console_name(config);
        if let Some(equal) = token.find('=') {
            if console_name == token[..equal] {
                let value = &token[equal + 1..];
                if value.is_empty() {
                    // syntax error, no value means no `=` should be present
                    return Err(Error::MissingValueAfterEqualSign);
                }
                return Ok(Some((index, Some(value.to_string()))));
            }
        } else if token == console_name {
            // flag, or option falling back to its default
            return Ok(Some((index, None)));
        } else if let Some(short) = candidate.console_short_form(config) {
            if let Some(rest) = token.strip_prefix(short.as_str()) {
                // empty remainder is "no value", not an empty string
                let value = (!rest.is_empty()).then(|| rest.to_string());
                return Ok(Some((index, value)));
            }
        }
    }
    Ok(None)
}

impl CommandData {
    /// Checks a parameter list for internal collisions.
    ///
    /// Only same-kind parameters are compared (arguments never collide with
    /// options). A schema is rejected before any token is read when two
    /// parameters share a name ([`Error::NameCollision`]) or a short form
    /// ([`Error::ShortFormCollision`]).
    pub fn verify(parameters: &[Parameter]) -> Result<()> {
        for (index, parameter) in parameters.iter().enumerate() {
            for earlier in &parameters[..index] {
                if parameter.kind() != earlier.kind() {
                    continue;
                }
                if parameter.name() == earlier.name() {
                    return Err(Error::NameCollision(parameter.name().to_string()));
                }
                if let (Some(lhs), Some(rhs)) = (parameter.short_form(), earlier.short_form()) {
                    if lhs == rhs {
                        return Err(Error::ShortFormCollision(lhs));
                    }
                }
            }
        }
        Ok(())
    }

    /// Resolves a parameter schema against a token slice.
    ///
    /// Tokens are consumed strictly left to right. An unprefixed token marks
    /// a subcommand boundary: when it names one of `subcommands`, the walk
    /// stops and the remaining slice (boundary token inclusive) is recorded
    /// as [`next`](CommandData::next); otherwise resolution fails with
    /// [`Error::UnexpectedCommandParameter`]. A matched parameter leaves the
    /// candidate pool, so a repeated token falls through to the same error.
    ///
    /// After the walk every unmatched parameter resolves with its
    /// omitted-semantics; a parameter that cannot produce a value fails the
    /// whole construction with [`Error::MissingOptionValue`].
    pub fn resolve(
        config: &Configuration,
        parameters: Vec<Parameter>,
        input: &[String],
        subcommands: &[Rc<dyn Command>],
        parent: Option<Rc<CommandData>>,
    ) -> Result<Self> {
        Self::verify(&parameters)?;

        let mut pool = parameters;
        let mut resolved = Vec::with_capacity(pool.len());
        let mut next = None;

        for (position, token) in input.iter().enumerate() {
            if !token.starts_with(config.argument_prefix())
                && !token.starts_with(config.option_prefix())
            {
                // No prefix, so this is either a subcommand or a stray token.
                // An unknown name could be a missing subcommand or a missing
                // prefix; no assumption is made either way.
                let Some(subcommand) = subcommands
                    .iter()
                    .find(|subcommand| subcommand.name() == token.as_str())
                else {
                    return Err(Error::UnexpectedCommandParameter(token.clone()));
                };
                debug!(subcommand = token.as_str(), "subcommand boundary");
                next = Some((Rc::clone(subcommand), input[position..].to_vec()));
                break;
            }

            let Some((index, raw)) = match_parameter(config, token, &pool)? else {
                return Err(Error::UnexpectedCommandParameter(token.clone()));
            };
            let parameter = pool.remove(index);
            debug!(
                parameter = parameter.name(),
                raw = raw.as_deref(),
                "matched token"
            );
            let value = parameter.resolve(true, raw.as_deref())?;
            resolved.push((parameter, value));
        }

        for parameter in pool {
            match parameter.resolve(false, None) {
                Ok(value) => resolved.push((parameter, value)),
                Err(cause) => {
                    debug!(parameter = parameter.name(), %cause, "unresolvable parameter");
                    return Err(Error::MissingOptionValue(parameter.name().to_string()));
                }
            }
        }

        Ok(Self {
            resolved,
            parent,
            next,
        })
    }

    /// The detected subcommand boundary: the subcommand plus the remaining
    /// tokens beginning at its name.
    pub fn next(&self) -> Option<(&Rc<dyn Command>, &[String])> {
        self.next
            .as_ref()
            .map(|(command, rest)| (command, rest.as_slice()))
    }

    // Local-then-parent identity lookup.
    fn find(
        &self,
        kind: ParameterKind,
        name: &str,
        short_form: Option<char>,
    ) -> Option<&Option<Value>> {
        for (parameter, value) in &self.resolved {
            if parameter.kind() != kind {
                continue;
            }
            let short_forms_match = match (parameter.short_form(), short_form) {
                (Some(lhs), Some(rhs)) => lhs == rhs,
                _ => false,
            };
            if parameter.name() == name || short_forms_match {
                return Some(value);
            }
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.find(kind, name, short_form))
    }

    // Name-only lookup used by the `*_named` accessors.
    fn find_named(&self, kind: ParameterKind, name: &str) -> Option<&Option<Value>> {
        for (parameter, value) in &self.resolved {
            if parameter.kind() == kind && parameter.name() == name {
                return Some(value);
            }
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.find_named(kind, name))
    }

    /// The resolved value of an argument declared by this command or an
    /// ancestor.
    pub fn argument_value(&self, argument: &Argument) -> Result<Value> {
        match self.find(ParameterKind::Argument, &argument.name, argument.short_form) {
            Some(Some(value)) => Ok(value.clone()),
            Some(None) => Err(Error::Internal("argument resolved without a value")),
            None => Err(Error::ParameterNotAllowed(argument.name.clone())),
        }
    }

    /// The resolved value of an argument, looked up by name.
    pub fn argument_value_named(&self, name: &str) -> Result<Value> {
        match self.find_named(ParameterKind::Argument, name) {
            Some(Some(value)) => Ok(value.clone()),
            Some(None) => Err(Error::Internal("argument resolved without a value")),
            None => Err(Error::ParameterNotFound(name.to_string())),
        }
    }

    /// The resolved value of a value option; `None` means the option was not
    /// supplied and has no default.
    pub fn option_value(&self, option: &ValueOption) -> Result<Option<Value>> {
        match self.find(ParameterKind::Option, &option.name, option.short_form) {
            Some(value) => Ok(value.clone()),
            None => Err(Error::ParameterNotAllowed(option.name.clone())),
        }
    }

    /// The resolved value of a value option, looked up by name.
    pub fn option_value_named(&self, name: &str) -> Result<Option<Value>> {
        match self.find_named(ParameterKind::Option, name) {
            Some(value) => Ok(value.clone()),
            None => Err(Error::ParameterNotFound(name.to_string())),
        }
    }

    /// Whether a flag was present in the input.
    pub fn flag(&self, flag: &FlagOption) -> Result<bool> {
        match self.find(ParameterKind::Option, &flag.name, flag.short_form) {
            Some(Some(value)) => value
                .bool_value()
                .map_err(|_| Error::Internal("flag resolved to a non-boolean value")),
            Some(None) => Ok(false),
            None => Err(Error::ParameterNotAllowed(flag.name.clone())),
        }
    }

    /// The validated elements of a case argument.
    pub fn case_values(&self, case: &CaseArgument) -> Result<Vec<Value>> {
        match self.find(ParameterKind::Argument, &case.name, case.short_form) {
            Some(Some(value)) => Ok(value.array_value().map_err(Error::from)?.to_vec()),
            Some(None) => Err(Error::Internal("case argument resolved without a value")),
            None => Err(Error::ParameterNotAllowed(case.name.clone())),
        }
    }
}
