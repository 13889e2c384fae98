//! Justification Service
//!
//! Absences of a student and the justifications given for them. An absence
//! carries at most one justification; removing it makes the absence
//! unjustified again.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;

use super::OutcomeLabel;
use crate::application::dto::JustificationForm;
use crate::domain::{
    Absence, AbsenceRepository, Justification, JustificationRepository, StudentRepository,
};
use crate::shared::error::{RepositoryError, ValidationReport};
use crate::shared::validation::validate_form;

#[async_trait]
pub trait JustificationService: Send + Sync {
    /// Absences of a student with their justification, if any
    async fn absences_of(&self, student_id: i64) -> Result<Vec<AbsenceDto>, JustificationError>;

    async fn justify(&self, absence_id: i64, form: JustificationForm) -> Result<Justification, JustificationError>;

    async fn edit(&self, absence_id: i64, form: JustificationForm) -> Result<Justification, JustificationError>;

    async fn delete(&self, absence_id: i64) -> Result<(), JustificationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbsenceDto {
    #[serde(flatten)]
    pub absence: Absence,
    pub justification: Option<Justification>,
}

#[derive(Debug, thiserror::Error)]
pub enum JustificationError {
    #[error("Student not found")]
    StudentNotFound,

    #[error("Absence not found")]
    AbsenceNotFound,

    #[error("Justification not found")]
    NotFound,

    #[error("Absence is already justified")]
    AlreadyJustified,

    #[error("{0}")]
    Validation(#[from] ValidationReport),

    #[error(transparent)]
    Connection(#[from] RepositoryError),
}

impl OutcomeLabel for JustificationError {
    fn outcome_label(&self) -> &'static str {
        match self {
            Self::StudentNotFound | Self::AbsenceNotFound | Self::NotFound => "not_found",
            Self::AlreadyJustified => "refused",
            Self::Validation(_) => "validation",
            Self::Connection(_) => "connection",
        }
    }
}

pub struct JustificationServiceImpl<S, A, J>
where
    S: StudentRepository,
    A: AbsenceRepository,
    J: JustificationRepository,
{
    student_repo: Arc<S>,
    absence_repo: Arc<A>,
    justification_repo: Arc<J>,
}

impl<S, A, J> JustificationServiceImpl<S, A, J>
where
    S: StudentRepository,
    A: AbsenceRepository,
    J: JustificationRepository,
{
    pub fn new(student_repo: Arc<S>, absence_repo: Arc<A>, justification_repo: Arc<J>) -> Self {
        Self {
            student_repo,
            absence_repo,
            justification_repo,
        }
    }

    async fn absence(&self, absence_id: i64) -> Result<Absence, JustificationError> {
        self.absence_repo
            .find_by_id(absence_id)
            .await?
            .ok_or(JustificationError::AbsenceNotFound)
    }

    async fn justification(&self, absence_id: i64) -> Result<Justification, JustificationError> {
        self.absence(absence_id).await?;
        self.justification_repo
            .find_by_absence(absence_id)
            .await?
            .ok_or(JustificationError::NotFound)
    }
}

#[async_trait]
impl<S, A, J> JustificationService for JustificationServiceImpl<S, A, J>
where
    S: StudentRepository + 'static,
    A: AbsenceRepository + 'static,
    J: JustificationRepository + 'static,
{
    async fn absences_of(&self, student_id: i64) -> Result<Vec<AbsenceDto>, JustificationError> {
        self.student_repo
            .find_by_id(student_id)
            .await?
            .ok_or(JustificationError::StudentNotFound)?;

        let mut absences = self.absence_repo.find_by_student(student_id).await?;
        absences.sort_by_key(|a| (a.date, a.id));

        let mut result = Vec::with_capacity(absences.len());
        for mut absence in absences {
            let justification = self.justification_repo.find_by_absence(absence.id).await?;
            absence.justified = justification.is_some();
            result.push(AbsenceDto {
                absence,
                justification,
            });
        }
        Ok(result)
    }

    async fn justify(&self, absence_id: i64, form: JustificationForm) -> Result<Justification, JustificationError> {
        validate_form(&form)?;

        // The stored justification decides; the flag on the absence follows it.
        let mut absence = self.absence(absence_id).await?;
        if self
            .justification_repo
            .find_by_absence(absence_id)
            .await?
            .is_some()
        {
            return Err(JustificationError::AlreadyJustified);
        }

        let justification = Justification {
            id: self.justification_repo.next_id().await?,
            absence_id,
            reason: form.reason.trim().to_string(),
            submitted_at: Utc::now(),
        };
        let saved = self.justification_repo.save(&justification).await?;

        absence.justified = true;
        if let Err(e) = self.absence_repo.save(&absence).await {
            if let Err(undo) = self.justification_repo.delete(saved.id).await {
                tracing::warn!(absence_id, error = %undo, "Could not roll back justification");
            }
            return Err(e.into());
        }

        tracing::info!(absence_id, justification_id = saved.id, "Absence justified");
        Ok(saved)
    }

    async fn edit(&self, absence_id: i64, form: JustificationForm) -> Result<Justification, JustificationError> {
        validate_form(&form)?;

        let mut justification = self.justification(absence_id).await?;
        justification.reason = form.reason.trim().to_string();

        let saved = self.justification_repo.save(&justification).await?;
        tracing::info!(absence_id, "Justification edited");
        Ok(saved)
    }

    async fn delete(&self, absence_id: i64) -> Result<(), JustificationError> {
        let justification = self.justification(absence_id).await?;

        let mut absence = self.absence(absence_id).await?;
        let was_justified = absence.justified;
        absence.justified = false;
        self.absence_repo.save(&absence).await?;

        if let Err(e) = self.justification_repo.delete(justification.id).await {
            absence.justified = was_justified;
            if let Err(undo) = self.absence_repo.save(&absence).await {
                tracing::warn!(absence_id, error = %undo, "Could not restore absence flag");
            }
            return Err(e.into());
        }

        tracing::info!(absence_id, "Justification removed");
        Ok(())
    }
}
