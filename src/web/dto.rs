use serde::{Deserialize, Serialize};

/// Fields posted by the story form. Missing fields read as empty.
#[derive(Debug, Default, Deserialize)]
pub struct StoryForm {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, rename = "establishedAuthor")]
    pub established_author: String,
    #[serde(default)]
    pub selected_author: Option<String>,
}

impl StoryForm {
    pub fn is_established(&self) -> bool {
        self.established_author.trim().eq_ignore_ascii_case("true")
    }

    pub fn selected_author(&self) -> Option<&str> {
        self.selected_author
            .as_deref()
            .map(str::trim)
            .filter(|author| !author.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckAuthorRequest {
    #[serde(default)]
    pub author: String,
}

#[derive(Debug, Serialize)]
pub struct CheckAuthorResponse {
    pub established: bool,
}
