use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::{DateKey, MonthCursor};

#[derive(Parser)]
#[command(name = "daybook", about = concat!("daybook v", env!("CARGO_PKG_VERSION"), " - tasks on a calendar"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different task file
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task to a day
    Add(AddArgs),
    /// List tasks, grouped by day
    List(ListArgs),
    /// Show one task in full
    Show(TaskRefArgs),
    /// Mark a task complete, or incomplete again
    Toggle(TaskRefArgs),
    /// Delete a task
    Delete(TaskRefArgs),
    /// Print a month grid with task counts
    Month(MonthArgs),
}

// ---------------------------------------------------------------------------
// Args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Day to add the task to (YYYY-MM-DD)
    pub date: DateKey,
    /// Task text
    pub text: String,
    /// Longer description
    #[arg(short, long, default_value = "")]
    pub description: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only list this day (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<DateKey>,
}

#[derive(Args)]
pub struct TaskRefArgs {
    /// Day of the task (YYYY-MM-DD)
    pub date: DateKey,
    /// Position of the task within the day, starting at 0
    pub index: usize,
}

#[derive(Args)]
pub struct MonthArgs {
    /// Month to print (YYYY-MM, default: the current month)
    #[arg(value_parser = parse_month_arg)]
    pub month: Option<MonthCursor>,
}

/// Parse `YYYY-MM` into a month cursor
pub fn parse_month_arg(s: &str) -> Result<MonthCursor, String> {
    let err = || format!("invalid month \"{}\": expected YYYY-MM", s);
    let (year, month) = s.split_once('-').ok_or_else(err)?;
    if year.len() != 4 || month.len() != 2 {
        return Err(err());
    }
    let year: i32 = year.parse().map_err(|_| err())?;
    let month: u32 = month.parse().map_err(|_| err())?;
    if !(1..=12).contains(&month) {
        return Err(err());
    }
    Ok(MonthCursor {
        year,
        month: month - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_arg() {
        assert_eq!(
            parse_month_arg("2024-03"),
            Ok(MonthCursor { year: 2024, month: 2 })
        );
        assert!(parse_month_arg("2024-13").is_err());
        assert!(parse_month_arg("2024-00").is_err());
        assert!(parse_month_arg("2024-3").is_err());
        assert!(parse_month_arg("march").is_err());
    }

    #[test]
    fn test_cli_parses_task_refs() {
        let cli = Cli::try_parse_from(["daybook", "toggle", "2024-03-01", "2", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Some(Commands::Toggle(args)) => {
                assert_eq!(args.date.to_string(), "2024-03-01");
                assert_eq!(args.index, 2);
            }
            _ => panic!("expected toggle"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        assert!(Cli::try_parse_from(["daybook", "add", "2024-3-1", "x"]).is_err());
        assert!(Cli::try_parse_from(["daybook", "delete", "2024-03-01", "-1"]).is_err());
    }
}
