use ricline_core::{DataAccess, HeadlineBatch, HeadlinesRequest};

use crate::cli::HeadlinesArgs;
use crate::error::CliError;
use crate::output::{Section, Table};

use super::CommandResult;

pub async fn run(args: &HeadlinesArgs, source: &dyn DataAccess) -> Result<CommandResult, CliError> {
    let request = HeadlinesRequest::new(args.query.clone(), args.count)?;
    let batch = source.headlines(request).await?;

    let table = headline_table(&batch);
    let data = serde_json::to_value(&batch)?;
    Ok(CommandResult::ok(data).with_section(Section::Table(table)))
}

fn headline_table(batch: &HeadlineBatch) -> Table {
    let mut table = Table::new(vec![
        String::from("CREATED"),
        String::from("STORY_ID"),
        String::from("TITLE"),
    ])
    .with_title(format!("headlines: {}", batch.query));

    for headline in &batch.headlines {
        let created = headline
            .created
            .map(|ts| ts.to_string())
            .unwrap_or_default();
        table.push_row(vec![
            created,
            headline.story_id.to_string(),
            headline.title.clone(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use ricline_core::{Headline, StoryId};

    #[test]
    fn rows_carry_story_ids_for_the_story_command() {
        let batch = HeadlineBatch {
            query: String::from("chips"),
            headlines: vec![Headline::new(
                StoryId::parse("urn:newsml:reuters.com:20251110:nNRA1:1").expect("story id"),
                "Chipmaker beats estimates",
                None,
            )],
        };

        let table = headline_table(&batch);
        assert_eq!(table.title.as_deref(), Some("headlines: chips"));
        assert_eq!(table.rows[0][1], "urn:newsml:reuters.com:20251110:nNRA1:1");
    }
}
