pub trait FromLlmReply {
    fn from_reply(reply: &str) -> Self;
}

pub struct PlainText(pub Box<str>);

impl PlainText {
    pub fn get(self) -> Box<str> {
        self.0
    }
}

impl FromLlmReply for PlainText {
    fn from_reply(reply: &str) -> Self {
        PlainText(reply.trim().into())
    }
}

/// Any reply that starts with "yes" (ignoring case and surrounding
/// whitespace) counts as yes; everything else is no.
pub struct YesNoReply {
    pub answer: bool,
}

impl FromLlmReply for YesNoReply {
    fn from_reply(reply: &str) -> Self {
        YesNoReply {
            answer: reply.trim().to_lowercase().starts_with("yes"),
        }
    }
}

impl From<YesNoReply> for bool {
    fn from(value: YesNoReply) -> Self {
        value.answer
    }
}
