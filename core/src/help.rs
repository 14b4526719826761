//! Help rendering over resolved schema data.
//!
//! The core never formats text beyond named errors; this module is the
//! presentation collaborator. [`render_help`] formats one command's schema,
//! and [`HelpCommand`] is the auto-registered `help` command the
//! [`Console`](crate::Console) appends to its command list.

use std::rc::Rc;

use crate::command::{Command, Subcommand};
use crate::config::Configuration;
use crate::data::CommandData;
use crate::error::{Error, Result};
use crate::parameter::Parameter;

/// Formats a command's name, help lines, and parameter summaries.
///
/// Each parameter renders as its name, kind label, and the default value when
/// one is configured (the expected type otherwise), followed by its
/// description lines.
///
/// # Examples
///
/// ```
/// use console_args_core::*;
///
/// let parameters = vec![Parameter::Flag(
///     FlagOption::new("verbose").with_description(&["print more"]),
/// )];
/// let text = render_help("demo", &["a demo command".to_string()], &parameters);
/// assert!(text.contains("Command: demo"));
/// assert!(text.contains("- verbose Flag"));
/// assert!(text.contains("print more"));
/// ```
pub fn render_help(name: &str, help: &[String], parameters: &[Parameter]) -> String {
    let mut text = format!("Command: {name}\n");
    for line in help {
        text.push_str(line);
        text.push('\n');
    }
    text.push('\n');

    for parameter in parameters {
        let kind = match parameter {
            Parameter::Argument(_) | Parameter::Case(_) => "Argument",
            Parameter::Option(_) => "Option",
            Parameter::Flag(_) => "Flag",
        };
        let shape = match parameter.default_value() {
            Some(default) => format!("<{default}>"),
            None => format!("<{}>", parameter.expected()),
        };
        text.push_str(&format!("\t- {} {kind}{shape}", parameter.name()));

        let description = parameter.description_lines();
        if let Some(first) = description.first() {
            text.push_str(&format!(" {first}"));
            for line in &description[1..] {
                text.push_str(&format!("\n\t\t{line}"));
            }
        }
        text.push('\n');
    }
    text
}

/// The auto-registered top-level `help` command.
///
/// Bare `help` prints a usage overview plus one summary per registered
/// command. `help <command>` dispatches through the normal engine (each
/// registered command is wrapped as a help topic subcommand) and prints that
/// command's full help. As a subcommand (`<command> help`, when wired in by
/// the user) it prints the parent's help and vetoes the parent run.
pub struct HelpCommand {
    commands: Vec<Rc<dyn Command>>,
    topics: Vec<Rc<dyn Command>>,
    argument_prefix: String,
    option_prefix: String,
}

impl HelpCommand {
    /// Wraps the registered commands; prefixes are captured up front so the
    /// overview matches the console's configuration.
    pub fn new(commands: &[Rc<dyn Command>], configuration: &Configuration) -> Self {
        let topics = commands
            .iter()
            .map(|command| {
                Rc::new(HelpTopic {
                    source: Rc::clone(command),
                }) as Rc<dyn Command>
            })
            .collect();
        Self {
            commands: commands.to_vec(),
            topics,
            argument_prefix: configuration.argument_prefix().to_string(),
            option_prefix: configuration.option_prefix().to_string(),
        }
    }

    fn overview(&self) -> String {
        let arg = &self.argument_prefix;
        let opt = &self.option_prefix;
        let mut text = format!(
            "Command: help\n\
             \tFormat:\n\t\t{arg}someArgument=value\n\t\t{opt}someOption[=optionalValue]\n\n\
             \tFor array values use the following:\n\t\t{arg}someArgument=1,2,3,4\n\n\
             \tArguments may have default values, but when used they must be given some input.\n\n\
             \tOptions resolve to their defaults when not given in the input;\n\
             \tused without a value they act as flags or fall back to their defaults.\n\n\
             \tUse `help` with a command's name to see its help, e.g. `help someCommand`.\n\n"
        );
        for command in &self.commands {
            text.push_str(&format!("- {}\n", command.name()));
            for line in command.help() {
                text.push_str(&format!("\t{line}\n"));
            }
        }
        text
    }
}

impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn help(&self) -> Vec<String> {
        vec!["prints command overviews".to_string()]
    }

    fn subcommands(&self) -> Vec<Rc<dyn Command>> {
        self.topics.clone()
    }

    fn run(&self, _data: &CommandData, child: Option<&dyn Command>) -> Result<()> {
        match child {
            Some(child) => child.print_help(),
            None => println!("{}", self.overview()),
        }
        Ok(())
    }

    fn should_run(&self, _subcommand: &dyn Command) -> bool {
        false
    }

    fn as_subcommand(&self) -> Option<&dyn Subcommand> {
        Some(self)
    }
}

impl Subcommand for HelpCommand {
    fn run_as_subcommand(&self, _data: &CommandData, parent: &dyn Command) -> Result<bool> {
        parent.print_help();
        Ok(false)
    }
}

// Parameterless shim turning a registered command into a `help` subcommand so
// `help <command>` flows through the normal dispatch engine.
struct HelpTopic {
    source: Rc<dyn Command>,
}

impl Command for HelpTopic {
    fn name(&self) -> &str {
        self.source.name()
    }

    fn run(&self, _data: &CommandData, _child: Option<&dyn Command>) -> Result<()> {
        Err(Error::Internal("help topics have no subcommands"))
    }

    fn as_subcommand(&self) -> Option<&dyn Subcommand> {
        Some(self)
    }

    fn print_help(&self) {
        self.source.print_help();
    }
}

impl Subcommand for HelpTopic {
    fn run_as_subcommand(&self, _data: &CommandData, _parent: &dyn Command) -> Result<bool> {
        Ok(true)
    }
}
