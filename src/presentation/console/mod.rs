//! Console Controllers
//!
//! Each controller receives one user action at a time, calls one service
//! method and reports the outcome to a [`Notifier`]. Forms go through the
//! [`FormFlow`] workflow; only a validation failure loops back to editing,
//! every other failure ends the operation.

mod addresses;
mod banners;
mod enrollment;
mod flow;
mod login;
mod news;
mod notifier;

pub use addresses::AddressDeletionController;
pub use banners::{BannerDraft, BannerInsertionController};
pub use enrollment::EnrollmentController;
pub use flow::{FlowError, FormFlow};
pub use login::LoginController;
pub use news::{NewsDeletionController, NewsEditController};
pub use notifier::{ConsoleNotifier, Notice, NoticeKind, Notifier, RecordingNotifier};

use crate::shared::error::{AppError, CONNECTION_INTERRUPTED_MESSAGE};

/// The text shown to the user for a failed use case.
pub fn describe(error: impl Into<AppError>) -> String {
    match error.into() {
        AppError::Connection(_) => CONNECTION_INTERRUPTED_MESSAGE.to_owned(),
        AppError::Validation(report) => report.to_string(),
        AppError::NotFound(msg)
        | AppError::BadRequest(msg)
        | AppError::Unauthorized(msg)
        | AppError::Forbidden(msg)
        | AppError::Conflict(msg)
        | AppError::Internal(msg) => msg,
    }
}
