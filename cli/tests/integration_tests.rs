//! End-to-end resolution and dispatch over a realistic command set.

use std::cell::RefCell;
use std::rc::Rc;

use console_args_core::{
    Argument, CaseArgument, Command, CommandData, Console, DefaultCases, Error, FlagOption,
    Parameter, Result, Subcommand, Value, ValueOption, ValueType,
};

/// Everything one invocation resolved, captured for assertions.
#[derive(Debug, Clone, PartialEq)]
struct Invocation {
    values: Vec<f64>,
    operations: Vec<String>,
    precision: i64,
    verbose: bool,
}

struct StatsCommand {
    subcommands: Vec<Rc<dyn Command>>,
    last: RefCell<Option<Invocation>>,
}

impl StatsCommand {
    fn new(subcommands: Vec<Rc<dyn Command>>) -> Rc<Self> {
        Rc::new(Self {
            subcommands,
            last: RefCell::new(None),
        })
    }

    fn capture(data: &CommandData) -> Result<Invocation> {
        let values = data.argument_value_named("values")?;
        let values = values
            .array_value()
            .map_err(Error::from)?
            .iter()
            .filter_map(Value::as_double)
            .collect();
        let operations = data
            .case_values(&operations_argument())?
            .iter()
            .map(Value::raw_string)
            .collect();
        let precision = data
            .option_value_named("precision")?
            .and_then(|value| value.as_int())
            .unwrap_or(2);
        let verbose = data.flag(&FlagOption::new("verbose"))?;
        Ok(Invocation {
            values,
            operations,
            precision,
            verbose,
        })
    }
}

fn operations_argument() -> CaseArgument {
    CaseArgument::strings("ops", &["sum", "mean", "min", "max"])
        .with_default_cases(DefaultCases::All)
        .with_short_form('o')
}

impl Command for StatsCommand {
    fn name(&self) -> &str {
        "stats"
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::Argument(
                Argument::new("values", ValueType::array(ValueType::Double)).with_short_form('v'),
            ),
            Parameter::Case(operations_argument()),
            Parameter::Option(ValueOption::new("precision", ValueType::Int).with_default(2.into())),
            Parameter::Flag(FlagOption::new("verbose")),
        ]
    }

    fn subcommands(&self) -> Vec<Rc<dyn Command>> {
        self.subcommands.clone()
    }

    fn run(&self, data: &CommandData, _child: Option<&dyn Command>) -> Result<()> {
        *self.last.borrow_mut() = Some(Self::capture(data)?);
        Ok(())
    }
}

/// Subcommand that reads the parent's resolved values and vetoes the parent.
struct JsonCommand {
    seen_values: RefCell<Option<Value>>,
}

impl JsonCommand {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            seen_values: RefCell::new(None),
        })
    }
}

impl Command for JsonCommand {
    fn name(&self) -> &str {
        "json"
    }

    fn run(&self, _data: &CommandData, _child: Option<&dyn Command>) -> Result<()> {
        Ok(())
    }

    fn as_subcommand(&self) -> Option<&dyn Subcommand> {
        Some(self)
    }
}

impl Subcommand for JsonCommand {
    fn run_as_subcommand(&self, data: &CommandData, _parent: &dyn Command) -> Result<bool> {
        *self.seen_values.borrow_mut() = Some(data.argument_value_named("values")?);
        Ok(false)
    }
}

fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|token| token.to_string()).collect()
}

#[test]
fn test_defaults_resolve_for_untouched_parameters() {
    let stats = StatsCommand::new(Vec::new());
    let console = Console::new(vec![stats.clone()]);

    console.run(&tokens(&["stats", "-v1,2,3"]), false).unwrap();

    let last = stats.last.borrow().clone().unwrap();
    assert_eq!(last.values, vec![1.0, 2.0, 3.0]);
    assert_eq!(last.operations, vec!["sum", "mean", "min", "max"]);
    assert_eq!(last.precision, 2);
    assert!(!last.verbose);
}

#[test]
fn test_short_forms_and_explicit_selection() {
    let stats = StatsCommand::new(Vec::new());
    let console = Console::new(vec![stats.clone()]);

    console
        .run(
            &tokens(&["stats", "-v10,20", "-omean", "--precision=0", "--verbose"]),
            false,
        )
        .unwrap();

    let last = stats.last.borrow().clone().unwrap();
    assert_eq!(last.values, vec![10.0, 20.0]);
    assert_eq!(last.operations, vec!["mean"]);
    assert_eq!(last.precision, 0);
    assert!(last.verbose);
}

#[test]
fn test_trim_first_skips_the_executable_path() {
    let stats = StatsCommand::new(Vec::new());
    let console = Console::new(vec![stats.clone()]);

    console
        .run(&tokens(&["target/debug/stats", "stats", "-v5"]), true)
        .unwrap();

    assert_eq!(stats.last.borrow().clone().unwrap().values, vec![5.0]);
}

#[test]
fn test_missing_required_argument_fails() {
    let stats = StatsCommand::new(Vec::new());
    let console = Console::new(vec![stats]);

    assert_eq!(
        console.run(&tokens(&["stats"]), false),
        Err(Error::MissingOptionValue("values".to_string()))
    );
}

#[test]
fn test_unknown_case_reports_the_allow_list() {
    let stats = StatsCommand::new(Vec::new());
    let console = Console::new(vec![stats]);

    assert_eq!(
        console.run(&tokens(&["stats", "-v1", "-omedian"]), false),
        Err(Error::UnknownCase {
            allowed: ["sum", "mean", "min", "max"]
                .iter()
                .map(|raw| raw.to_string())
                .collect(),
            got: "median".to_string(),
        })
    );
}

#[test]
fn test_undeclared_parameter_is_rejected() {
    let stats = StatsCommand::new(Vec::new());
    let console = Console::new(vec![stats]);

    assert_eq!(
        console.run(&tokens(&["stats", "-v1", "--color=red"]), false),
        Err(Error::UnexpectedCommandParameter("--color=red".to_string()))
    );
}

#[test]
fn test_unknown_command_name() {
    let console = Console::new(vec![StatsCommand::new(Vec::new()) as Rc<dyn Command>]);

    assert_eq!(
        console.run(&tokens(&["status"]), false),
        Err(Error::CommandNotFound("status".to_string()))
    );
    assert_eq!(console.run(&[], false), Err(Error::MissingCommand));
}

#[test]
fn test_subcommand_sees_parent_scope_and_vetoes_parent() {
    let json = JsonCommand::new();
    let stats = StatsCommand::new(vec![json.clone()]);
    let console = Console::new(vec![stats.clone()]);

    console
        .run(&tokens(&["stats", "-v1.5,2.5", "json"]), false)
        .unwrap();

    let seen = json.seen_values.borrow().clone().unwrap();
    assert_eq!(
        seen,
        Value::Array(
            vec![Value::Double(1.5), Value::Double(2.5)],
            ValueType::Double,
        )
    );
    // the subcommand returned false, so the parent handler never ran
    assert!(stats.last.borrow().is_none());
}

#[test]
fn test_help_covers_registered_commands() {
    let console = Console::new(vec![StatsCommand::new(Vec::new()) as Rc<dyn Command>]);

    assert!(console.run(&tokens(&["help"]), false).is_ok());
    assert!(console.run(&tokens(&["help", "stats"]), false).is_ok());
    assert_eq!(
        console.run(&tokens(&["help", "bogus"]), false),
        Err(Error::UnexpectedCommandParameter("bogus".to_string()))
    );
}
