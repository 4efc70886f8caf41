use ricline_core::{DataAccess, NewsStory, StoryId, StoryRequest};

use crate::cli::StoryArgs;
use crate::error::CliError;
use crate::output::Section;

use super::CommandResult;

pub async fn run(args: &StoryArgs, source: &dyn DataAccess) -> Result<CommandResult, CliError> {
    let story_id = StoryId::parse(&args.story_id)?;
    let request = StoryRequest::new(story_id);
    let story = source.story(request).await?;

    let text = story_text(&story);
    let data = serde_json::to_value(&story)?;
    Ok(CommandResult::ok(data).with_section(Section::Text(text)))
}

fn story_text(story: &NewsStory) -> String {
    format!("{}\n{}\n\n{}", story.story_id, story.headline, story.body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_text_leads_with_id_and_headline() {
        let story = NewsStory::new(
            StoryId::parse("urn:newsml:reuters.com:20251110:nNRA1:1").expect("story id"),
            "Chipmaker beats estimates",
            "Full story body.",
        );

        let text = story_text(&story);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("urn:newsml:reuters.com:20251110:nNRA1:1"));
        assert_eq!(lines.next(), Some("Chipmaker beats estimates"));
    }
}
