// File: src/app.rs
// Purpose: Router and handlers wiring htmx requests to one form dialog

use crate::login;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use formbody::{Config, FieldDescriptor, FormDialog, FormOptions, FormValues, SubmitOutcome};
use maud::{html, Markup, DOCTYPE};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    dialog: Arc<FormDialog>,
    submissions: Arc<RwLock<Vec<FormValues>>>,
}

impl AppState {
    /// Build the demo dialog; configured `[[fields]]` replace the default descriptors
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let submissions = Arc::new(RwLock::new(Vec::new()));
        let fields: Vec<FieldDescriptor> = if config.fields.is_empty() {
            login::fields()
        } else {
            config.fields.clone()
        };

        let sink = submissions.clone();
        let options = FormOptions::new(login::schema(), fields)
            .initial_data(login::initial_data())
            .on_submit(move |data: FormValues| {
                let sink = sink.clone();
                async move {
                    let payload = serde_json::to_string(&data)?;
                    info!(%payload, "submission stored");
                    sink.write().await.push(data);
                    Ok(())
                }
            });

        let dialog = FormDialog::new(login::TITLE, options, config.form.clone(), || {
            info!("dialog closed");
        })?;

        Ok(Self {
            dialog: Arc::new(dialog),
            submissions,
        })
    }

    pub fn dialog(&self) -> &FormDialog {
        &self.dialog
    }

    pub async fn submissions(&self) -> Vec<FormValues> {
        self.submissions.read().await.clone()
    }
}

pub fn router(state: AppState) -> Router {
    let action = state.dialog.form().settings().action.clone();
    Router::new()
        .route("/", get(index_handler))
        .route(&format!("{}/open", action), post(open_handler))
        .route(&format!("{}/edit", action), post(edit_handler))
        .route(&format!("{}/submit", action), post(submit_handler))
        .route(&format!("{}/reset/:name", action), post(reset_handler))
        .route(&format!("{}/cancel", action), post(cancel_handler))
        .with_state(state)
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let submissions = state.submissions().await;
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (login::TITLE) }
                script src=(HTMX_SRC) {}
            }
            body {
                main {
                    @if state.dialog.is_open() {
                        (state.dialog.render())
                    } @else {
                        (open_button(&state))
                    }
                    (submission_log(&submissions))
                }
            }
        }
    };
    Html(markup.into_string())
}

async fn open_handler(State(state): State<AppState>) -> Html<String> {
    state.dialog.open();
    Html(state.dialog.render().into_string())
}

async fn edit_handler(
    State(state): State<AppState>,
    Form(input): Form<HashMap<String, String>>,
) -> StatusCode {
    state.dialog.form().apply_input(&input);
    StatusCode::NO_CONTENT
}

async fn submit_handler(
    State(state): State<AppState>,
    Form(input): Form<HashMap<String, String>>,
) -> Html<String> {
    let form = state.dialog.form();
    form.apply_input(&input);

    match form.submit().await {
        SubmitOutcome::Submitted { result: Err(e), .. } => {
            warn!("submission handler failed: {:#}", e);
        }
        SubmitOutcome::Invalid(errors) => {
            info!(fields = ?errors.keys().collect::<Vec<_>>(), "submission needs corrections");
        }
        SubmitOutcome::Submitted { .. } | SubmitOutcome::AlreadySubmitting => {}
    }

    Html(form.render_form().into_string())
}

async fn reset_handler(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let form = state.dialog.form();
    match form.reset(&name) {
        Ok(()) => Html(form.render_form().into_string()).into_response(),
        Err(e) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    }
}

async fn cancel_handler(State(state): State<AppState>) -> Html<String> {
    state.dialog.close();
    Html(open_button(&state).into_string())
}

fn open_button(state: &AppState) -> Markup {
    let action = &state.dialog.form().settings().action;
    html! {
        button.open type="button"
            hx-post=(format!("{}/open", action))
            hx-swap="outerHTML" {
            "Open " (state.dialog.title())
        }
    }
}

fn submission_log(submissions: &[FormValues]) -> Markup {
    html! {
        section.submissions {
            h2 { "Submissions" }
            @if submissions.is_empty() {
                p { "Nothing submitted yet." }
            }
            @for data in submissions {
                pre { (serde_json::to_string_pretty(data).unwrap_or_default()) }
            }
        }
    }
}
