//! Command tree nodes.
//!
//! Commands are organized in a rooted tree: each node declares a name, its
//! parameter schema (built by value, no reflection), child subcommands, and a
//! handler. [`Subcommand`] nodes additionally run in the context of their
//! parent and decide whether the parent runs too.

use std::rc::Rc;

use crate::config::Configuration;
use crate::data::CommandData;
use crate::error::{Error, Result};
use crate::help::render_help;
use crate::parameter::Parameter;

/// A node in the command tree.
///
/// # Examples
///
/// ```
/// use console_args_core::*;
///
/// struct Greet;
///
/// impl Command for Greet {
///     fn name(&self) -> &str {
///         "greet"
///     }
///
///     fn parameters(&self) -> Vec<Parameter> {
///         vec![Parameter::Argument(
///             Argument::new("who", ValueType::String).with_default("world".into()),
///         )]
///     }
///
///     fn run(&self, data: &CommandData, _child: Option<&dyn Command>) -> Result<()> {
///         let who = data.argument_value_named("who")?;
///         println!("hello {}", who.raw_string());
///         Ok(())
///     }
/// }
///
/// let config = Configuration::default();
/// let tokens = vec!["greet".to_string(), "-who=you".to_string()];
/// let data = prepare_data(&Greet, &config, &tokens, None).unwrap();
/// assert_eq!(data.argument_value_named("who").unwrap(), Value::from("you"));
/// ```
pub trait Command {
    /// Command name; the token that selects this command.
    fn name(&self) -> &str;

    /// Free-form help lines shown by the help renderer.
    fn help(&self) -> Vec<String> {
        Vec::new()
    }

    /// The parameter schema, built by value on each call.
    fn parameters(&self) -> Vec<Parameter> {
        Vec::new()
    }

    /// Child subcommands.
    fn subcommands(&self) -> Vec<Rc<dyn Command>> {
        Vec::new()
    }

    /// Runs the command with its resolved data. `child` is the immediate
    /// subcommand of this invocation, if one was dispatched.
    fn run(&self, data: &CommandData, child: Option<&dyn Command>) -> Result<()>;

    /// Whether a dispatched subcommand should actually run.
    fn should_run(&self, subcommand: &dyn Command) -> bool {
        let _ = subcommand;
        true
    }

    /// Downcast seam for nodes that can run as subcommands.
    fn as_subcommand(&self) -> Option<&dyn Subcommand> {
        None
    }

    /// Prints this command's help text.
    fn print_help(&self) {
        println!(
            "{}",
            render_help(self.name(), &self.help(), &self.parameters())
        );
    }
}

/// A command that can run nested under a parent.
pub trait Subcommand: Command {
    /// Runs with the resolved data of this level and a reference to the
    /// parent node. Returns whether the parent (and further ancestors)
    /// should also run.
    fn run_as_subcommand(&self, data: &CommandData, parent: &dyn Command) -> Result<bool>;
}

/// Resolves a command's schema against an invocation token list.
///
/// The first token must equal the command's name;
/// [`Error::IncorrectCommandName`] otherwise, which the dispatch loop uses as
/// the try-next-sibling sentinel. The remaining tokens feed
/// [`CommandData::resolve`].
pub fn prepare_data(
    command: &dyn Command,
    config: &Configuration,
    arguments: &[String],
    parent: Option<Rc<CommandData>>,
) -> Result<CommandData> {
    match arguments.first() {
        Some(first) if first.as_str() == command.name() => CommandData::resolve(
            config,
            command.parameters(),
            &arguments[1..],
            &command.subcommands(),
            parent,
        ),
        _ => Err(Error::IncorrectCommandName),
    }
}
