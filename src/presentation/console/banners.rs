//! Banner insertion controller.
//!
//! The banner count is checked as soon as a point is picked, so an operator
//! never chooses an image for a point that is already full.

use std::sync::Arc;

use super::{describe, FormFlow, Notifier};
use crate::application::services::{BannerError, BannerService, BannerUpload};
use crate::domain::Banner;

#[derive(Debug, Clone)]
pub struct BannerDraft {
    pub point_id: i64,
    pub upload: Option<BannerUpload>,
}

pub struct BannerInsertionController {
    service: Arc<dyn BannerService>,
    notifier: Arc<dyn Notifier>,
    flow: FormFlow<BannerDraft>,
}

impl BannerInsertionController {
    pub fn new(service: Arc<dyn BannerService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            flow: FormFlow::default(),
        }
    }

    pub fn flow(&self) -> &FormFlow<BannerDraft> {
        &self.flow
    }

    /// Pick the refreshment point that gets the banner.
    pub async fn select_point(&mut self, point_id: i64) -> bool {
        let points = match self.service.list_points().await {
            Ok(points) => points,
            Err(e) => {
                self.notifier.error(&describe(e));
                return false;
            }
        };

        let Some(point) = points.into_iter().find(|p| p.id == point_id) else {
            self.notifier.error(&describe(BannerError::PointNotFound));
            return false;
        };
        if point.banner_count >= point.max_banners {
            let refusal = BannerError::MaxBannersReached {
                max: point.max_banners,
            };
            self.notifier.error(&describe(refusal));
            return false;
        }

        self.notifier.info(&format!(
            "Choose an image for {} ({} of {} banners used)",
            point.name, point.banner_count, point.max_banners
        ));
        self.flow.begin(BannerDraft {
            point_id,
            upload: None,
        });
        true
    }

    /// Attach the chosen image and ask for confirmation.
    pub fn choose_image(&mut self, upload: BannerUpload) -> bool {
        let Some(draft) = self.flow.form_mut() else {
            self.notifier.error("Select a refreshment point first");
            return false;
        };
        let name = upload.file_name.clone();
        draft.upload = Some(upload);

        if self.flow.submit().is_ok() {
            self.notifier.info(&format!("Insert banner {}?", name));
        }
        true
    }

    pub async fn confirm(&mut self) -> Option<Banner> {
        let draft = match self.flow.confirm() {
            Ok(draft) => draft,
            Err(e) => {
                self.notifier.error(&e.to_string());
                return None;
            }
        };
        let Some(upload) = draft.upload.clone() else {
            self.notifier.error("No image chosen");
            self.flow.begin(draft);
            return None;
        };

        match self.service.insert_banner(draft.point_id, upload).await {
            Ok(banner) => {
                self.notifier.success("Banner inserted successfully");
                Some(banner)
            }
            Err(BannerError::Validation(report)) => {
                self.notifier.error(&report.to_string());
                self.flow.begin(BannerDraft {
                    upload: None,
                    ..draft
                });
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
            self.notifier.cancelled("Banner insertion cancelled");
        }
    }
}
