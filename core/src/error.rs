//! Error types for schema resolution and command dispatch.
//!
//! Provides a unified [`Error`] covering all failure modes: schema collisions,
//! token-level parse failures, dispatch errors, and value lookups, plus the
//! narrower [`ValueError`] and [`ConfigurationError`] enums that bridge into
//! it via `#[from]`.

use thiserror::Error;

/// Convenience alias for results with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by [`Value`](crate::Value) accessors and shape checks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// The value does not hold the requested variant.
    #[error("value does not hold the requested type")]
    NoValue,
    /// `Compound` was used as a declared top-level type; it is only valid as
    /// an array element type.
    #[error("Compound is only valid as an array element type")]
    CompoundIsNotTopLevelType,
}

/// Errors raised when constructing a [`Configuration`](crate::Configuration).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Argument and option prefixes are identical.
    #[error("argument and option prefixes must be different")]
    SamePrefix,
    /// The argument prefix is empty.
    #[error("argument prefix may not be empty, prefix-free syntax is reserved for subcommands")]
    EmptyArgumentPrefix,
    /// The option prefix is empty.
    #[error("option prefix may not be empty, prefix-free syntax is reserved for subcommands")]
    EmptyOptionPrefix,
}

/// Errors that can occur during parameter resolution and command dispatch.
///
/// Every variant surfaces to the caller of [`Console::run`](crate::Console::run)
/// except [`IncorrectCommandName`](Error::IncorrectCommandName), which the
/// dispatch loop catches internally to try the next sibling command.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    // Schema errors: configuration bugs caught before any token is read.
    /// Two same-kind parameters in one schema share a name.
    #[error("parameter name collision: {0}")]
    NameCollision(String),
    /// Two same-kind parameters in one schema share a short form.
    #[error("parameter short form collision: {0}")]
    ShortFormCollision(char),

    // Value extraction errors.
    /// A raw string could not be parsed as the expected type.
    #[error("could not parse value from `{0}`")]
    IncorrectValue(String),
    /// Nested array types cannot be parsed from a flat comma list.
    #[error("nested array values cannot be parsed from flat input")]
    IndirectValue,
    /// An argument was omitted and has no default to fall back to.
    #[error("argument `{0}` is missing a value")]
    NoValue(String),
    /// An argument appeared in the input without an `=value` segment.
    #[error("argument `{0}` was used but no value was given")]
    ArgumentWithoutValueFound(String),
    /// A value-mode option with no default appeared bare in the input.
    #[error("option `{0}` has no default value and was used without one")]
    RequestedFlagOnValueOption(String),
    /// A case argument value is outside the declared allow-list.
    #[error("unknown case `{got}`, allowed values: {allowed:?}")]
    UnknownCase {
        /// Raw renditions of the allowed values.
        allowed: Vec<String>,
        /// The raw input that failed validation.
        got: String,
    },

    // Token errors.
    /// A token matched no remaining parameter and no subcommand.
    #[error("unexpected parameter: {0}")]
    UnexpectedCommandParameter(String),
    /// A matched `name=` token ended right after the equal sign.
    #[error("missing value after `=`")]
    MissingValueAfterEqualSign,
    /// A parameter left unmatched by the token walk could not fall back to a
    /// resolvable value, so the command cannot be entered.
    #[error("parameter `{0}` could not be resolved to a value")]
    MissingOptionValue(String),

    // Dispatch errors.
    /// The first token does not name this command. Internal sentinel used to
    /// continue with the next top-level command.
    #[error("command name does not match")]
    IncorrectCommandName,
    /// No top-level command matched the first token.
    #[error("command not found: {0}, use `help`")]
    CommandNotFound(String),
    /// The token list was empty.
    #[error("missing command, use `help`")]
    MissingCommand,

    // Lookup errors: programming bugs on the caller's side.
    /// A value was requested for a parameter the command never declared.
    #[error("parameter `{0}` is not declared by this command")]
    ParameterNotAllowed(String),
    /// A by-name lookup found no parameter with that name.
    #[error("parameter named `{0}` not found")]
    ParameterNotFound(String),

    /// An internal invariant was violated; indicates a library bug.
    #[error("internal error: {0}")]
    Internal(&'static str),

    /// Value accessor or shape failure.
    #[error(transparent)]
    Value(#[from] ValueError),
    /// Prefix configuration failure.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
