//! `stats` — a small aggregation tool built on `console-args-core`.
//!
//! One top-level command computes aggregate statistics over a comma-separated
//! number list, with a `json` subcommand switching the output format:
//!
//! ```text
//! stats -v1,2,3.5 -osum,mean --precision=1 --verbose
//! stats -v1,2,3.5 json
//! stats help
//! help stats
//! ```

use std::process;
use std::rc::Rc;

use console_args_core::{
    Argument, CaseArgument, Command, CommandData, Console, DefaultCases, Error, FlagOption,
    Parameter, Result, Subcommand, Value, ValueOption, ValueType,
};

const OPERATIONS: [&str; 4] = ["sum", "mean", "min", "max"];

fn main() {
    let console = Console::new(vec![Rc::new(StatsCommand)]);
    if let Err(err) = console.run_env() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn values_argument() -> Argument {
    Argument::new("values", ValueType::array(ValueType::Double))
        .with_short_form('v')
        .with_description(&["comma-separated numbers to aggregate"])
}

fn operations_argument() -> CaseArgument {
    CaseArgument::strings("ops", &OPERATIONS)
        .with_default_cases(DefaultCases::All)
        .with_short_form('o')
        .with_description(&["aggregations to compute"])
}

fn precision_option() -> ValueOption {
    ValueOption::new("precision", ValueType::Int)
        .with_default(Value::Int(2))
        .with_description(&["decimal places in the output"])
}

fn verbose_flag() -> FlagOption {
    FlagOption::new("verbose").with_description(&["also print the sample count"])
}

fn collect_values(data: &CommandData) -> Result<Vec<f64>> {
    let values = data.argument_value(&values_argument())?;
    Ok(values
        .array_value()
        .map_err(Error::from)?
        .iter()
        .filter_map(Value::as_double)
        .collect())
}

fn operation_names(data: &CommandData) -> Result<Vec<String>> {
    Ok(data
        .case_values(&operations_argument())?
        .iter()
        .map(Value::raw_string)
        .collect())
}

fn precision(data: &CommandData) -> Result<usize> {
    let digits = data
        .option_value(&precision_option())?
        .and_then(|value| value.as_int())
        .unwrap_or(2);
    Ok(digits.max(0) as usize)
}

fn apply(operation: &str, values: &[f64]) -> f64 {
    match operation {
        "sum" => values.iter().sum(),
        "mean" => values.iter().sum::<f64>() / values.len() as f64,
        "min" => values.iter().copied().fold(f64::INFINITY, f64::min),
        "max" => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        _ => f64::NAN,
    }
}

struct StatsCommand;

impl Command for StatsCommand {
    fn name(&self) -> &str {
        "stats"
    }

    fn help(&self) -> Vec<String> {
        vec!["computes aggregate statistics over a list of numbers".to_string()]
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::Argument(values_argument()),
            Parameter::Case(operations_argument()),
            Parameter::Option(precision_option()),
            Parameter::Flag(verbose_flag()),
        ]
    }

    fn subcommands(&self) -> Vec<Rc<dyn Command>> {
        vec![Rc::new(JsonCommand)]
    }

    fn run(&self, data: &CommandData, _child: Option<&dyn Command>) -> Result<()> {
        let values = collect_values(data)?;
        let precision = precision(data)?;
        if data.flag(&verbose_flag())? {
            println!("samples: {}", values.len());
        }
        for operation in operation_names(data)? {
            let result = apply(&operation, &values);
            println!("{operation} = {result:.precision$}");
        }
        Ok(())
    }
}

/// Prints the selected aggregations as one JSON object instead of lines.
///
/// Reads `values` and `ops` from the parent scope and vetoes the parent run,
/// so plain output and JSON output never mix.
struct JsonCommand;

impl JsonCommand {
    fn print_report(&self, data: &CommandData) -> Result<()> {
        let values = collect_values(data)?;
        let mut report = serde_json::Map::new();
        for operation in operation_names(data)? {
            let result = apply(&operation, &values);
            report.insert(operation, serde_json::json!(result));
        }
        println!("{}", serde_json::Value::Object(report));
        Ok(())
    }
}

impl Command for JsonCommand {
    fn name(&self) -> &str {
        "json"
    }

    fn help(&self) -> Vec<String> {
        vec!["prints the results as a JSON object".to_string()]
    }

    fn run(&self, data: &CommandData, _child: Option<&dyn Command>) -> Result<()> {
        self.print_report(data)
    }

    fn as_subcommand(&self) -> Option<&dyn Subcommand> {
        Some(self)
    }
}

impl Subcommand for JsonCommand {
    fn run_as_subcommand(&self, data: &CommandData, _parent: &dyn Command) -> Result<bool> {
        self.print_report(data)?;
        Ok(false)
    }
}
