//! The command dispatch loop.
//!
//! [`Console`] owns the top-level command list (plus an auto-appended `help`
//! command) and a prefix [`Configuration`], and drives one invocation's token
//! list through resolution and dispatch.

use std::rc::Rc;

use tracing::debug;

use crate::command::{Command, Subcommand, prepare_data};
use crate::config::Configuration;
use crate::data::CommandData;
use crate::error::{Error, Result};
use crate::help::HelpCommand;

/// Entry point: a forest of top-level commands and the prefix configuration
/// shared by every resolution in one `run` call.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use console_args_core::*;
///
/// struct Noop;
///
/// impl Command for Noop {
///     fn name(&self) -> &str {
///         "noop"
///     }
///
///     fn run(&self, _data: &CommandData, _child: Option<&dyn Command>) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// let console = Console::new(vec![Rc::new(Noop)]);
/// let tokens = vec!["noop".to_string()];
/// assert!(console.run(&tokens, false).is_ok());
///
/// let unknown = vec!["nope".to_string()];
/// assert_eq!(
///     console.run(&unknown, false),
///     Err(Error::CommandNotFound("nope".to_string()))
/// );
/// ```
pub struct Console {
    commands: Vec<Rc<dyn Command>>,
    configuration: Configuration,
}

impl Console {
    /// Creates a console with the default `-`/`--` prefixes.
    pub fn new(commands: Vec<Rc<dyn Command>>) -> Self {
        Self::with_configuration(commands, Configuration::default())
    }

    /// Creates a console with an explicit prefix configuration.
    ///
    /// A [`HelpCommand`] covering `commands` is appended to the list.
    pub fn with_configuration(
        mut commands: Vec<Rc<dyn Command>>,
        configuration: Configuration,
    ) -> Self {
        let help = HelpCommand::new(&commands, &configuration);
        commands.push(Rc::new(help));
        Self {
            commands,
            configuration,
        }
    }

    /// The registered commands, `help` included.
    pub fn commands(&self) -> &[Rc<dyn Command>] {
        &self.commands
    }

    /// The prefix configuration used by every resolution.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Resolves and dispatches one invocation.
    ///
    /// `trim_first` drops the leading token (conventionally the executable
    /// path).
    pub fn run(&self, arguments: &[String], trim_first: bool) -> Result<()> {
        let arguments = if trim_first {
            arguments.get(1..).unwrap_or_default()
        } else {
            arguments
        };
        self.loop_commands(arguments)
    }

    /// Runs against the process argument list, trimming the executable path.
    pub fn run_env(&self) -> Result<()> {
        let arguments: Vec<String> = std::env::args().collect();
        self.run(&arguments, true)
    }

    fn loop_commands(&self, arguments: &[String]) -> Result<()> {
        if arguments.is_empty() {
            return Err(Error::MissingCommand);
        }

        for command in &self.commands {
            let data =
                match prepare_data(command.as_ref(), &self.configuration, arguments, None) {
                    Ok(data) => data,
                    // name mismatch: try the next top-level command
                    Err(Error::IncorrectCommandName) => continue,
                    Err(err) => return Err(err),
                };
            debug!(command = command.name(), "dispatching");
            return self.dispatch(Rc::clone(command), data);
        }

        Err(Error::CommandNotFound(arguments[0].clone()))
    }

    // Follows the subcommand chain top-down, then unwinds it deepest-first.
    fn dispatch(&self, root: Rc<dyn Command>, data: CommandData) -> Result<()> {
        let mut current = Rc::new(data);
        let mut stack: Vec<(Rc<dyn Command>, Rc<CommandData>)> =
            vec![(root, Rc::clone(&current))];

        while let Some((subcommand, remaining)) = current
            .next()
            .map(|(subcommand, rest)| (Rc::clone(subcommand), rest.to_vec()))
        {
            debug!(subcommand = subcommand.name(), "descending");
            let data = prepare_data(
                subcommand.as_ref(),
                &self.configuration,
                &remaining,
                Some(Rc::clone(&current)),
            )?;
            current = Rc::new(data);
            stack.push((subcommand, Rc::clone(&current)));
        }

        let mut index = stack.len() - 1;
        while index > 0 {
            let (child_command, child_data) = &stack[index];
            let (parent_command, _) = &stack[index - 1];
            index -= 1;

            if !parent_command.should_run(child_command.as_ref()) {
                continue;
            }

            let Some(subcommand) = child_command.as_subcommand() else {
                break;
            };
            if !subcommand.run_as_subcommand(child_data, parent_command.as_ref())? {
                // the subcommand vetoed running its ancestors
                return Ok(());
            }
        }

        let child = stack.get(1).map(|(command, _)| Rc::clone(command));
        let (root, root_data) = &stack[0];
        root.run(root_data, child.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::parameter::{Argument, FlagOption, Parameter};
    use crate::value::{Value, ValueType};

    struct Mock {
        subcommands: Vec<Rc<dyn Command>>,
        ran: RefCell<bool>,
    }

    impl Mock {
        fn new(subcommands: Vec<Rc<dyn Command>>) -> Rc<Self> {
            Rc::new(Self {
                subcommands,
                ran: RefCell::new(false),
            })
        }
    }

    impl Command for Mock {
        fn name(&self) -> &str {
            "mock"
        }

        fn parameters(&self) -> Vec<Parameter> {
            vec![Parameter::Argument(
                Argument::new("test", ValueType::String)
                    .with_default("val".into())
                    .with_short_form('t'),
            )]
        }

        fn subcommands(&self) -> Vec<Rc<dyn Command>> {
            self.subcommands.clone()
        }

        fn run(&self, _data: &CommandData, _child: Option<&dyn Command>) -> Result<()> {
            *self.ran.borrow_mut() = true;
            Ok(())
        }
    }

    struct Sub {
        run_parent: bool,
        seen_flag: RefCell<Option<bool>>,
        seen_parent_argument: RefCell<Option<Value>>,
    }

    impl Sub {
        fn new(run_parent: bool) -> Rc<Self> {
            Rc::new(Self {
                run_parent,
                seen_flag: RefCell::new(None),
                seen_parent_argument: RefCell::new(None),
            })
        }
    }

    impl Command for Sub {
        fn name(&self) -> &str {
            "subtest"
        }

        fn parameters(&self) -> Vec<Parameter> {
            vec![Parameter::Flag(FlagOption::new("subflag"))]
        }

        fn run(&self, _data: &CommandData, _child: Option<&dyn Command>) -> Result<()> {
            Ok(())
        }

        fn as_subcommand(&self) -> Option<&dyn Subcommand> {
            Some(self)
        }
    }

    impl crate::command::Subcommand for Sub {
        fn run_as_subcommand(&self, data: &CommandData, _parent: &dyn Command) -> Result<bool> {
            *self.seen_flag.borrow_mut() = Some(data.flag(&FlagOption::new("subflag"))?);
            *self.seen_parent_argument.borrow_mut() =
                Some(data.argument_value_named("test")?);
            Ok(self.run_parent)
        }
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|token| token.to_string()).collect()
    }

    #[test]
    fn test_missing_command() {
        let console = Console::new(vec![Mock::new(Vec::new())]);
        assert_eq!(console.run(&[], false), Err(Error::MissingCommand));
    }

    #[test]
    fn test_command_not_found() {
        let console = Console::new(vec![Mock::new(Vec::new())]);
        assert_eq!(
            console.run(&tokens(&["other"]), false),
            Err(Error::CommandNotFound("other".to_string()))
        );
    }

    #[test]
    fn test_trim_first_drops_executable_path() {
        let mock = Mock::new(Vec::new());
        let console = Console::new(vec![mock.clone()]);
        console
            .run(&tokens(&["/usr/bin/demo", "mock"]), true)
            .unwrap();
        assert!(*mock.ran.borrow());
    }

    #[test]
    fn test_subcommand_dispatch_with_veto() {
        let sub = Sub::new(false);
        let mock = Mock::new(vec![sub.clone()]);
        let console = Console::new(vec![mock.clone()]);

        console
            .run(&tokens(&["mock", "subtest", "--subflag"]), false)
            .unwrap();

        assert_eq!(*sub.seen_flag.borrow(), Some(true));
        // the subcommand returned false, so the root never ran
        assert!(!*mock.ran.borrow());
    }

    #[test]
    fn test_subcommand_allows_parent_run() {
        let sub = Sub::new(true);
        let mock = Mock::new(vec![sub.clone()]);
        let console = Console::new(vec![mock.clone()]);

        console.run(&tokens(&["mock", "subtest"]), false).unwrap();

        assert_eq!(*sub.seen_flag.borrow(), Some(false));
        assert!(*mock.ran.borrow());
    }

    #[test]
    fn test_subcommand_reads_parent_scope() {
        let sub = Sub::new(false);
        let mock = Mock::new(vec![sub.clone()]);
        let console = Console::new(vec![mock]);

        console
            .run(&tokens(&["mock", "-test=scoped", "subtest"]), false)
            .unwrap();

        assert_eq!(
            *sub.seen_parent_argument.borrow(),
            Some(Value::from("scoped"))
        );
    }

    #[test]
    fn test_resolution_errors_propagate() {
        let console = Console::new(vec![Mock::new(Vec::new())]);
        assert_eq!(
            console.run(&tokens(&["mock", "-bogus=1"]), false),
            Err(Error::UnexpectedCommandParameter("-bogus=1".to_string()))
        );
    }

    #[test]
    fn test_help_command_registered() {
        let console = Console::new(vec![Mock::new(Vec::new())]);
        assert!(console.run(&tokens(&["help"]), false).is_ok());
        assert!(console.run(&tokens(&["help", "mock"]), false).is_ok());
    }
}
