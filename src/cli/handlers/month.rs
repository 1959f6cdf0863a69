use crate::cli::commands::MonthArgs;
use crate::cli::output::{format_month, month_to_json};
use crate::coordinator::ViewCoordinator;
use crate::io::persistence::PersistencePort;
use crate::ops::calendar;

pub fn cmd_month<P: PersistencePort>(
    coord: &ViewCoordinator<P>,
    args: MonthArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let cursor = args.month.unwrap_or_else(|| coord.cursor());
    // The coordinator only caches the grid of its own cursor
    let cells = if cursor == coord.cursor() {
        coord.grid().to_vec()
    } else {
        calendar::generate_for(cursor)
    };

    if json {
        let month = month_to_json(cursor, &cells, coord.store());
        println!("{}", serde_json::to_string_pretty(&month)?);
    } else {
        println!("{}", format_month(cursor, &cells, coord.store()));
    }
    Ok(())
}
