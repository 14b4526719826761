//! Declarative command-line argument resolution.
//!
//! This crate parses a raw token list against a declared schema of named
//! parameters and dispatches nested subcommands:
//!
//! - [`Value`] / [`ValueType`] — parsed data and its declared shape.
//! - [`Parameter`] — the closed set of parameter kinds: [`Argument`],
//!   [`ValueOption`], [`FlagOption`], and [`CaseArgument`].
//! - [`CommandData`] — the resolution engine's immutable result: a typed
//!   value store with parent-scoped fallback lookup and subcommand boundary
//!   detection.
//! - [`Command`] / [`Subcommand`] — the command tree, dispatched by
//!   [`Console`] from the deepest subcommand back toward the root.
//!
//! Token syntax (prefixes configurable via [`Configuration`]): arguments as
//! `-name=value` or `-xvalue` (short form), options as `--name[=value]`,
//! flags as bare `--name`, array values as comma lists, and subcommands as
//! bare unprefixed tokens.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use console_args_core::*;
//!
//! struct Sum;
//!
//! impl Command for Sum {
//!     fn name(&self) -> &str {
//!         "sum"
//!     }
//!
//!     fn parameters(&self) -> Vec<Parameter> {
//!         vec![
//!             Parameter::Argument(
//!                 Argument::new("nums", ValueType::array(ValueType::Int)).with_short_form('n'),
//!             ),
//!             Parameter::Flag(FlagOption::new("verbose")),
//!         ]
//!     }
//!
//!     fn run(&self, data: &CommandData, _child: Option<&dyn Command>) -> Result<()> {
//!         let nums = data.argument_value_named("nums")?;
//!         let total: i64 = nums
//!             .array_value()
//!             .map_err(Error::from)?
//!             .iter()
//!             .filter_map(Value::as_int)
//!             .sum();
//!         if data.flag(&FlagOption::new("verbose"))? {
//!             println!("sum = {total}");
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let console = Console::new(vec![Rc::new(Sum)]);
//! let tokens: Vec<String> = ["sum", "-n1,2,3", "--verbose"]
//!     .iter()
//!     .map(|token| token.to_string())
//!     .collect();
//! assert!(console.run(&tokens, false).is_ok());
//! ```

mod command;
mod config;
mod console;
mod data;
mod error;
mod extract;
mod help;
mod parameter;
mod value;

pub use command::{Command, Subcommand, prepare_data};
pub use config::Configuration;
pub use console::Console;
pub use data::CommandData;
pub use error::{ConfigurationError, Error, Result, ValueError};
pub use extract::{dynamic_array, extract_value};
pub use help::{HelpCommand, render_help};
pub use parameter::{
    Argument, CaseArgument, DefaultCases, FlagOption, Parameter, ParameterKind, ValueOption,
};
pub use value::{Value, ValueType};
