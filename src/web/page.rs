use askama_escape::{Html, escape};
use dioxus_lib::prelude::*;

use crate::author::KNOWN_AUTHORS;
use crate::story::Story;

const PAGE_STYLE: &str = r#"
body { font-family: Georgia, serif; background: #faf7f2; color: #222; margin: 0; }
main { max-width: 42rem; margin: 2rem auto; padding: 0 1rem; }
label { display: block; margin-top: 1rem; font-weight: bold; }
input, select { width: 100%; padding: .5rem; font-size: 1rem; box-sizing: border-box; }
button { margin-top: 1.5rem; padding: .6rem 1.4rem; font-size: 1rem; }
.notice { background: #fff4d6; border-left: 4px solid #e0a800; padding: .75rem 1rem; }
.story-body { white-space: pre-wrap; line-height: 1.6; }
"#;

// Asks /check_author before the first submit and records the answer in the
// hidden establishedAuthor field. A picked author skips the check.
const PAGE_SCRIPT: &str = r#"
(() => {
  const form = document.getElementById('story-form');
  const flag = document.getElementById('establishedAuthor');
  const picker = document.getElementById('selected_author');
  let checked = false;
  form.addEventListener('submit', async (event) => {
    if (checked || (picker && picker.value)) return;
    event.preventDefault();
    const author = document.getElementById('author').value;
    try {
      const response = await fetch('/check_author', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ author }),
      });
      const result = await response.json();
      flag.value = result.established ? 'true' : 'false';
    } catch (error) {
      flag.value = 'false';
    }
    checked = true;
    form.requestSubmit();
  });
})();
"#;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageView {
    pub subject: String,
    pub author: String,
    pub story: Option<Story>,
    pub needs_selection: bool,
}

pub fn render(view: PageView) -> String {
    let page = dioxus_ssr::render_element(rsx! {
        StoryPage { view: view }
    });
    format!("<!DOCTYPE html><html lang=\"en\">{page}</html>")
}

#[component]
fn StoryPage(view: PageView) -> Element {
    rsx! {
        head {
            meta { charset: "utf-8" }
            title { "AI Story Writer" }
            style { dangerous_inner_html: PAGE_STYLE }
        }
        body {
            main {
                h1 { "AI Story Writer" }
                StoryForm {
                    subject: view.subject.clone(),
                    author: view.author.clone(),
                    needs_selection: view.needs_selection,
                }
                if let Some(story) = view.story.clone() {
                    StoryView { story: story }
                }
            }
            script { dangerous_inner_html: PAGE_SCRIPT }
        }
    }
}

#[component]
fn StoryForm(subject: String, author: String, needs_selection: bool) -> Element {
    // dioxus-ssr writes attribute values verbatim.
    let subject_value = escape(&subject, Html).to_string();
    let author_value = escape(&author, Html).to_string();
    rsx! {
        form { id: "story-form", method: "post", action: "/",
            label { r#for: "subject", "Subject" }
            input {
                r#type: "text",
                id: "subject",
                name: "subject",
                placeholder: "a robot learning to paint",
                value: "{subject_value}",
            }
            label { r#for: "author", "Author" }
            input {
                r#type: "text",
                id: "author",
                name: "author",
                placeholder: "Shakespeare",
                value: "{author_value}",
            }
            input {
                r#type: "hidden",
                id: "establishedAuthor",
                name: "establishedAuthor",
                value: "false",
            }
            if needs_selection {
                AuthorPicker { author: author.clone() }
            }
            button { r#type: "submit", "Write story" }
        }
    }
}

#[component]
fn AuthorPicker(author: String) -> Element {
    rsx! {
        p { class: "notice",
            "\"{author}\" is not an author we know. Pick one of these instead:"
        }
        label { r#for: "selected_author", "Known authors" }
        select { id: "selected_author", name: "selected_author",
            option { value: "", "Choose an author" }
            for known in KNOWN_AUTHORS {
                option { key: "{known}", value: "{known}", "{known}" }
            }
        }
    }
}

#[component]
fn StoryView(story: Story) -> Element {
    let Story { title, body, generated } = story;
    let body_class = if generated { "story-body" } else { "story-body notice" };
    rsx! {
        article { class: "story",
            h2 { "{title}" }
            div { class: body_class, "{body}" }
        }
    }
}
