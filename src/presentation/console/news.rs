//! News edit and deletion controllers.

use std::sync::Arc;

use super::{describe, FormFlow, Notifier};
use crate::application::dto::NewsForm;
use crate::application::services::{NewsDto, NewsError, NewsService};
use crate::shared::validation::validate_form;

/// Load a news item, edit it, submit, then confirm or cancel.
pub struct NewsEditController {
    service: Arc<dyn NewsService>,
    notifier: Arc<dyn Notifier>,
    flow: FormFlow<NewsDto>,
}

impl NewsEditController {
    pub fn new(service: Arc<dyn NewsService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            flow: FormFlow::default(),
        }
    }

    pub fn flow(&self) -> &FormFlow<NewsDto> {
        &self.flow
    }

    /// Open the edit form of news `id`.
    pub async fn load(&mut self, id: i64) -> bool {
        match self.service.load_news(id).await {
            Ok(dto) => {
                self.notifier
                    .info(&format!("Editing news {}: \"{}\"", dto.id, dto.form.title));
                self.flow.begin(dto);
                true
            }
            Err(e) => {
                self.notifier.error(&describe(e));
                self.flow.cancel();
                false
            }
        }
    }

    /// Change fields of the open form.
    pub fn edit(&mut self, change: impl FnOnce(&mut NewsForm)) -> bool {
        match self.flow.form_mut() {
            Some(dto) => {
                change(&mut dto.form);
                true
            }
            None => {
                self.notifier.error("No news is being edited");
                false
            }
        }
    }

    /// Validate the form and ask for confirmation. A failing form stays
    /// open for editing.
    pub fn submit(&mut self) -> bool {
        let Some(dto) = self.flow.form_mut() else {
            self.notifier.error("No news is being edited");
            return false;
        };
        if let Err(report) = validate_form(&dto.form) {
            self.notifier.error(&report.to_string());
            return false;
        }
        match self.flow.submit() {
            Ok(dto) => {
                let question = format!("Save changes to news {}?", dto.id);
                self.notifier.info(&question);
                true
            }
            Err(e) => {
                self.notifier.error(&e.to_string());
                false
            }
        }
    }

    /// Save the confirmed form.
    pub async fn confirm(&mut self) -> Option<NewsDto> {
        let dto = match self.flow.confirm() {
            Ok(dto) => dto,
            Err(e) => {
                self.notifier.error(&e.to_string());
                return None;
            }
        };

        match self.service.submit_edits(dto.clone()).await {
            Ok(saved) => {
                self.notifier.success("News updated successfully");
                Some(saved)
            }
            Err(NewsError::Validation(report)) => {
                self.notifier.error(&report.to_string());
                self.flow.begin(dto);
                None
            }
            Err(e) => {
                self.notifier.error(&describe(e));
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        if self.flow.cancel() {
            self.notifier.cancelled("News edit cancelled");
        }
    }
}

/// Pick a news item, confirm, delete.
pub struct NewsDeletionController {
    service: Arc<dyn NewsService>,
    notifier: Arc<dyn Notifier>,
    flow: FormFlow<NewsDto>,
}

impl NewsDeletionController {
    pub fn new(service: Arc<dyn NewsService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            flow: FormFlow::default(),
        }
    }

    pub fn flow(&self) -> &FormFlow<NewsDto> {
        &self.flow
    }

    pub async fn select(&mut self, id: i64) -> bool {
        match self.service.load_news(id).await {
            Ok(dto) => {
                self.notifier
                    .info(&format!("Delete news \"{}\"?", dto.form.title));
                self.flow.ask(dto);
                true
            }
            Err(e) => {
                self.notifier.error(&describe(e));
                false
            }
        }
    }

    pub async fn confirm(&mut self) -> bool {
        let dto = match self.flow.confirm() {
            Ok(dto) => dto,
            Err(e) => {
                self.notifier.error(&e.to_string());
                return false;
            }
        };

        match self.service.delete_news(dto.id).await {
            Ok(()) => {
                self.notifier.success("News deleted successfully");
                true
            }
            Err(e) => {
                self.notifier.error(&describe(e));
                false
            }
        }
    }

    pub fn cancel(&mut self) {
        if self.flow.cancel() {
            self.notifier.cancelled("News deletion cancelled");
        }
    }
}
