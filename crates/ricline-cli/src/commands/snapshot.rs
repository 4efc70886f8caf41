use ricline_core::{DataAccess, FieldId, Ric, SnapshotBatch, SnapshotRequest};

use crate::cli::SnapshotArgs;
use crate::error::CliError;
use crate::output::{Section, Table};

use super::CommandResult;

pub async fn run(args: &SnapshotArgs, source: &dyn DataAccess) -> Result<CommandResult, CliError> {
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

    let request = SnapshotRequest::new(rics, fields)?;
    let batch = source.snapshot(request).await?;

    let table = snapshot_table(&batch);
    let data = serde_json::to_value(&batch)?;
    Ok(CommandResult::ok(data).with_section(Section::Table(table)))
}

fn snapshot_table(batch: &SnapshotBatch) -> Table {
    let mut headers = vec![String::from("RIC")];
    headers.extend(batch.fields.iter().map(|field| field.as_str().to_owned()));

    let mut table = Table::new(headers);
    for row in &batch.rows {
        let mut cells = vec![row.ric.to_string()];
        cells.extend(row.fields.iter().map(|entry| entry.value.to_string()));
        table.push_row(cells);
    }
    table
}
