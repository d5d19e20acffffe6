use crate::infer::{Client, Completion, Message, YesNoReply};
use crate::prompts;

pub const KNOWN_AUTHORS: [&str; 4] = [
    "Shakespeare",
    "Stephen King",
    "J.K. Rowling",
    "George Bernard Shaw",
];

const CHECK_TEMPERATURE: f32 = 0.0;
const CHECK_MAX_TOKENS: u16 = 10;

/// Answer used when the plausibility check itself fails.
const ESTABLISHED_ON_FAILURE: bool = false;

pub fn is_known(author: &str) -> bool {
    let author = author.trim().to_lowercase();
    KNOWN_AUTHORS.iter().any(|known| known.to_lowercase() == author)
}

pub async fn is_established<C: Completion>(client: &Client<C>, author: &str) -> bool {
    let author = author.trim();
    if is_known(author) {
        return true;
    }

    let messages = [
        Message::system(prompts::LITERARY_ASSISTANT_PROMPT),
        Message::user(prompts::is_author_established(author)),
    ];
    match client
        .infer::<YesNoReply>(&messages, CHECK_TEMPERATURE, CHECK_MAX_TOKENS)
        .await
    {
        Ok(reply) => reply.into(),
        Err(error) => {
            tracing::warn!(author, %error, "Author check failed");
            ESTABLISHED_ON_FAILURE
        }
    }
}
