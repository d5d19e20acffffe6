use crate::infer::{Client, Completion, Message, PlainText};
use crate::prompts;

const STORY_TEMPERATURE: f32 = 0.9;
const STORY_MAX_TOKENS: u16 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub title: String,
    pub body: String,
    /// False when `body` is the apology rather than model output.
    pub generated: bool,
}

pub fn title(subject: &str, author: &str) -> String {
    format!("Story about {subject} in the style of {author}")
}

pub fn apology(subject: &str, author: &str) -> String {
    format!(
        "Sorry, could not generate a story about {subject} in the style of {author}. \
         Please contact the administrator."
    )
}

/// Drafts a story and has the model edit it in the same reply.
///
/// Never fails: a completion error is logged and the story body becomes
/// [`apology`]. The error text itself is not passed on.
pub async fn generate<C: Completion>(client: &Client<C>, subject: &str, author: &str) -> Story {
    let messages = [
        Message::system(prompts::WRITER_SYSTEM_PROMPT),
        Message::assistant(prompts::EDITING_GUIDANCE),
        Message::user(prompts::write_then_edit(subject, author)),
    ];

    let (body, generated) = match client
        .infer::<PlainText>(&messages, STORY_TEMPERATURE, STORY_MAX_TOKENS)
        .await
    {
        Ok(text) => (text.get().into_string(), true),
        Err(error) => {
            tracing::error!(subject, author, %error, "Story generation failed");
            (apology(subject, author), false)
        }
    };

    Story { title: title(subject, author), body, generated }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer::MessageRole;
    use crate::infer::mock::MockCompletion;

    #[tokio::test]
    async fn one_call_with_write_then_edit_prompt() {
        let client = Client::new(MockCompletion::replying("\nThe robot dipped its brush.\n"), "test-model");
        let story = generate(&client, "a robot learning to paint", "Shakespeare").await;

        assert!(story.generated);
        assert_eq!(story.body, "The robot dipped its brush.");
        assert_eq!(story.title, "Story about a robot learning to paint in the style of Shakespeare");

        let calls = client.completion().calls();
        assert_eq!(calls.len(), 1);
        let roles: Vec<_> = calls[0].messages.iter().map(|message| message.role).collect();
        assert_eq!(roles, [MessageRole::System, MessageRole::Assistant, MessageRole::User]);
        let prompt = &calls[0].messages[2].content;
        assert!(prompt.contains("a robot learning to paint"));
        assert!(prompt.contains("Shakespeare"));
        assert_eq!(calls[0].temperature, 0.9);
        assert_eq!(calls[0].max_tokens, 1000);
    }

    #[tokio::test]
    async fn failure_becomes_apology() {
        let client = Client::new(MockCompletion::failing(), "test-model");
        let story = generate(&client, "a lighthouse keeper", "Stephen King").await;

        assert!(!story.generated);
        assert_eq!(story.body, apology("a lighthouse keeper", "Stephen King"));
        assert!(story.body.contains("a lighthouse keeper"));
        assert!(story.body.contains("Stephen King"));
        assert!(!story.body.contains("overloaded"));
        assert_eq!(client.completion().calls().len(), 1);
    }

    #[tokio::test]
    async fn empty_inputs_pass_through() {
        let client = Client::new(MockCompletion::replying("..."), "test-model");
        generate(&client, "", "").await;

        let calls = client.completion().calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].messages[2].content.starts_with("Write a short story about  in the style of ."));
    }
}
