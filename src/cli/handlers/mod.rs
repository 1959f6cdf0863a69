mod month;
pub use month::cmd_month;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::coordinator::ViewCoordinator;
use crate::io::config_io;
use crate::io::persistence::{JsonFileStore, PersistencePort};
use crate::logging::{self, LogSink};
use crate::model::DateKey;
use crate::ops::task_ops;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let config = config_io::read_config()?;
    logging::init_logging(&config.log.level, LogSink::Stderr)?;

    let path = config_io::resolve_storage_path(&config, cli.file.as_deref());
    let mut coord = ViewCoordinator::new(JsonFileStore::new(path), DateKey::today()?);

    match cli.command {
        None => {
            eprintln!("no subcommand given (try `daybook --help`)");
            Ok(())
        }
        Some(cmd) => match cmd {
            // Read commands
            Commands::List(args) => cmd_list(&coord, args, json),
            Commands::Show(args) => cmd_show(&mut coord, args, json),
            Commands::Month(args) => cmd_month(&coord, args, json),

            // Write commands
            Commands::Add(args) => cmd_add(&mut coord, args, json),
            Commands::Toggle(args) => cmd_toggle(&mut coord, args, json),
            Commands::Delete(args) => cmd_delete(&mut coord, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Turn a save failure the coordinator swallowed into a command failure.
/// The in-memory change is already applied, so only the exit status changes.
fn ensure_saved<P: PersistencePort>(
    coord: &ViewCoordinator<P>,
) -> Result<(), Box<dyn std::error::Error>> {
    match coord.last_persist_error() {
        Some(e) => Err(format!("change not saved: {}", e).into()),
        None => Ok(()),
    }
}

fn print_task<P: PersistencePort>(
    coord: &ViewCoordinator<P>,
    date: DateKey,
    index: usize,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    task_ops::check_index(coord.store(), &date, index)?;
    let Some(task) = coord.store().task(&date, index) else {
        return Ok(());
    };
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&task_to_json(date, index, task))?
        );
    } else {
        println!("{} #{} {}", date, index, format_state(task.completed));
    }
    Ok(())
}

fn format_state(completed: bool) -> &'static str {
    if completed { "done" } else { "open" }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list<P: PersistencePort>(
    coord: &ViewCoordinator<P>,
    args: ListArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let days: Vec<_> = coord
        .flat_list()
        .filter(|(date, _)| args.date.is_none_or(|d| d == **date))
        .collect();

    if json {
        let out: Vec<DayJson> = days
            .iter()
            .map(|(date, tasks)| day_to_json(**date, tasks))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let blocks: Vec<String> = days
            .iter()
            .map(|(date, tasks)| format_day(**date, tasks))
            .collect();
        if !blocks.is_empty() {
            println!("{}", blocks.join("\n\n"));
        }
    }
    Ok(())
}

fn cmd_show<P: PersistencePort>(
    coord: &mut ViewCoordinator<P>,
    args: TaskRefArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !coord.open_detail(Some(args.date), Some(args.index)) {
        task_ops::check_index(coord.store(), &args.date, args.index)?;
    }
    let Some(modal) = coord.modal() else {
        return Ok(());
    };
    let (date, index, task) = (modal.target.date, modal.target.index, &modal.snapshot);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&task_to_json(date, index, task))?
        );
    } else {
        print!("{}", format_task_detail(date, index, task));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add<P: PersistencePort>(
    coord: &mut ViewCoordinator<P>,
    args: AddArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    coord.select_date(Some(args.date));
    let index = coord.add_task(&args.text, &args.description)?;
    ensure_saved(coord)?;
    if json {
        print_task(coord, args.date, index, true)
    } else {
        println!("{} #{}", args.date, index);
        Ok(())
    }
}

fn cmd_toggle<P: PersistencePort>(
    coord: &mut ViewCoordinator<P>,
    args: TaskRefArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    coord.toggle_completion(args.date, args.index)?;
    ensure_saved(coord)?;
    print_task(coord, args.date, args.index, json)
}

fn cmd_delete<P: PersistencePort>(
    coord: &mut ViewCoordinator<P>,
    args: TaskRefArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let removed = coord.store().task(&args.date, args.index).cloned();
    coord.delete_task(args.date, args.index)?;
    ensure_saved(coord)?;

    if let Some(task) = removed {
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&task_to_json(args.date, args.index, &task))?
            );
        } else {
            println!("deleted {} #{}: {}", args.date, args.index, task.text);
        }
    }
    Ok(())
}
