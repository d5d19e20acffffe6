use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{State, rejection::JsonRejection},
    response::Html,
};

use super::AppState;
use super::dto::{CheckAuthorRequest, CheckAuthorResponse, StoryForm};
use super::page::{self, PageView};
use crate::infer::Completion;
use crate::{author, service, story};

/// Which author a form submission should be written as.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum AuthorChoice<'a> {
    Resolved(&'a str),
    NeedsSelection,
}

pub(crate) fn resolve_author(form: &StoryForm) -> AuthorChoice<'_> {
    if let Some(selected) = form.selected_author() {
        AuthorChoice::Resolved(selected)
    } else if form.is_established() {
        AuthorChoice::Resolved(form.author.trim())
    } else {
        AuthorChoice::NeedsSelection
    }
}

pub async fn index() -> Html<String> {
    Html(page::render(PageView::default()))
}

pub async fn submit<C: Completion>(
    State(state): State<Arc<AppState<C>>>,
    Form(form): Form<StoryForm>,
) -> Html<String> {
    let subject = form.subject.trim();

    let view = match resolve_author(&form) {
        AuthorChoice::Resolved(author) => {
            let story = story::generate(&state.client, subject, author).await;
            PageView {
                subject: subject.to_owned(),
                author: author.to_owned(),
                story: Some(story),
                needs_selection: false,
            }
        }
        AuthorChoice::NeedsSelection => {
            tracing::debug!(author = form.author.trim(), "Author not established, offering known authors");
            PageView {
                subject: subject.to_owned(),
                author: form.author.trim().to_owned(),
                story: None,
                needs_selection: true,
            }
        }
    };

    Html(page::render(view))
}

pub async fn check_author<C: Completion>(
    State(state): State<Arc<AppState<C>>>,
    payload: Result<Json<CheckAuthorRequest>, JsonRejection>,
) -> service::Result<Json<CheckAuthorResponse>> {
    let Json(request) =
        payload.map_err(|rejection| service::Error::BadRequest(rejection.body_text().into()))?;
    let established = author::is_established(&state.client, &request.author).await;
    Ok(Json(CheckAuthorResponse { established }))
}

pub async fn not_found() -> service::Error {
    service::Error::NotFound
}
