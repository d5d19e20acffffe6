pub const WRITER_SYSTEM_PROMPT: &str = "You are a creative and imaginative story writer \
who also acts as a skilled editor. \
Your job is to craft engaging stories and refine them for clarity, emotion, and style. \
Always preserve the tone and author's voice while improving the narrative.";

pub const EDITING_GUIDANCE: &str = "Before finalizing the story, ensure it reads smoothly, \
with vivid imagery, natural dialogue, and emotional depth. \
Make minor grammar or pacing improvements as needed.";

pub const LITERARY_ASSISTANT_PROMPT: &str = "You are an expert literary assistant.";

pub fn write_then_edit(subject: &str, author: &str) -> String {
    format!(
        "Write a short story about {subject} in the style of {author}. \
         Then act as an editor: make the story more engaging, fix grammar, enhance the plot, \
         and preserve the original style. Return only the final story text."
    )
}

pub fn is_author_established(author: &str) -> String {
    format!("Is '{author}' a published or well-known author? Reply with 'yes' or 'no'.")
}
