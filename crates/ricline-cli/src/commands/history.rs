use ricline_core::{
    DataAccess, DateRange, FieldId, HistoryBatch, HistoryInterval, HistoryRequest, Ric,
};

use crate::cli::HistoryArgs;
use crate::error::CliError;
use crate::output::{Section, Table};

use super::CommandResult;

pub async fn run(args: &HistoryArgs, source: &dyn DataAccess) -> Result<CommandResult, CliError> {
    let rics = args
        .rics
        .iter()
        .map(|raw| Ric::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let fields = args
        .fields
        .iter()
        .map(|raw| FieldId::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let interval = HistoryInterval::parse(&args.interval)?;

    // Clap enforces that --start and --end come together.
    let range = match (&args.start, &args.end) {
        (Some(start), Some(end)) => Some(DateRange::parse(start, end)?),
        _ => None,
    };

    let request = HistoryRequest::new(rics, fields, interval, range, args.count)?;
    let batch = source.history(request).await?;

    let data = serde_json::to_value(&batch)?;
    let mut result = CommandResult::ok(data);
    for table in history_tables(&batch) {
        result = result.with_section(Section::Table(table));
    }
    Ok(result)
}

fn history_tables(batch: &HistoryBatch) -> Vec<Table> {
    batch
        .series
        .iter()
        .map(|series| {
            let mut headers = vec![String::from("DATE")];
            headers.extend(batch.fields.iter().map(|field| field.as_str().to_owned()));

            let mut table = Table::new(headers)
                .with_title(format!("{} ({})", series.ric, series.interval));
            for row in &series.rows {
                let mut cells = vec![row.date.to_string()];
                cells.extend(row.fields.iter().map(|entry| entry.value.to_string()));
                table.push_row(cells);
            }
            table
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ricline_core::{parse_date, FieldEntry, FieldValue, HistoryRow, HistorySeries};

    #[test]
    fn one_table_per_series_with_interval_in_the_title() {
        let bid = FieldId::parse("BID").expect("field");
        let ric = Ric::parse("AMD.O").expect("ric");
        let date = parse_date("2025-10-03").expect("date");

        let batch = HistoryBatch {
            fields: vec![bid.clone()],
            series: vec![HistorySeries::new(
                ric,
                HistoryInterval::Weekly,
                vec![HistoryRow::new(
                    date,
                    vec![FieldEntry::new(bid, FieldValue::Number(162.1))],
                )],
            )],
        };

        let tables = history_tables(&batch);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].title.as_deref(), Some("AMD.O (weekly)"));
        assert_eq!(tables[0].rows[0], vec!["2025-10-03", "162.1"]);
    }
}
