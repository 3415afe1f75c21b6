// File: src/dialog.rs
// Purpose: Titled modal wrapper whose cancel action closes it

use crate::config::FormSettings;
use crate::controller::{CancelHandler, FormController, FormOptions};
use crate::error::ConfigResult;
use crate::schema::{Schema, Validator};
use maud::{html, Markup};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A form shown inside a `<dialog>`.
///
/// The form's cancel button closes the dialog and calls `on_close`; any
/// `on_cancel` already present in the options is replaced.
pub struct FormDialog<V: Validator = Schema> {
    title: String,
    open: Arc<AtomicBool>,
    form: FormController<V>,
}

impl<V: Validator> FormDialog<V> {
    pub fn new<F>(
        title: impl Into<String>,
        mut options: FormOptions<V>,
        settings: FormSettings,
        on_close: F,
    ) -> ConfigResult<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let open = Arc::new(AtomicBool::new(true));
        let closing: CancelHandler = {
            let open = open.clone();
            Arc::new(move || {
                open.store(false, Ordering::SeqCst);
                on_close();
            })
        };
        options.on_cancel = Some(closing);

        Ok(Self {
            title: title.into(),
            open,
            form: FormController::with_settings(options, settings)?,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn form(&self) -> &FormController<V> {
        &self.form
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub fn open(&self) {
        self.open.store(true, Ordering::SeqCst);
    }

    /// Close the dialog and notify the owner
    pub fn close(&self) {
        self.form.cancel();
    }

    /// A closed dialog renders nothing
    pub fn render(&self) -> Markup {
        if !self.is_open() {
            return html! {};
        }
        html! {
            dialog.form-dialog open data-form-host aria-labelledby=(self.title_id()) {
                header.dialog-header {
                    h2.dialog-title id=(self.title_id()) { (self.title) }
                }
                (self.form.render_form())
            }
        }
    }

    fn title_id(&self) -> String {
        format!("{}-title", self.form.settings().form_id)
    }
}
