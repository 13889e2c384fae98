//! Late Entry Service
//!
//! Delays recorded in the class register: insert, edit, delete and the
//! per-day listing.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDate, NaiveTime};

use super::OutcomeLabel;
use crate::application::dto::LateEntryForm;
use crate::domain::{LateEntry, LateEntryRepository, StudentRepository};
use crate::shared::error::{RepositoryError, ValidationReport};
use crate::shared::validation::{parse_date, parse_time, validate_form};

/// First admissible entry time (inclusive).
pub const EARLIEST_ENTRY: (u32, u32) = (7, 0);

/// Last admissible entry time (inclusive).
pub const LATEST_ENTRY: (u32, u32) = (14, 0);

#[async_trait]
pub trait LateEntryService: Send + Sync {
    async fn list_by_date(&self, date: &str) -> Result<Vec<LateEntry>, LateEntryError>;

    async fn insert(&self, form: LateEntryForm) -> Result<LateEntry, LateEntryError>;

    async fn edit(&self, id: i64, form: LateEntryForm) -> Result<LateEntry, LateEntryError>;

    async fn delete(&self, id: i64) -> Result<(), LateEntryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LateEntryError {
    #[error("Late entry not found")]
    NotFound,

    #[error("Student not found")]
    StudentNotFound,

    #[error("{0}")]
    Validation(#[from] ValidationReport),

    #[error(transparent)]
    Connection(#[from] RepositoryError),
}

impl OutcomeLabel for LateEntryError {
    fn outcome_label(&self) -> &'static str {
        match self {
            Self::NotFound | Self::StudentNotFound => "not_found",
            Self::Validation(_) => "validation",
            Self::Connection(_) => "connection",
        }
    }
}

fn clock(hm: (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(hm.0, hm.1, 0).unwrap_or(NaiveTime::MIN)
}

/// Format and range checks. Returns the parsed date and time.
fn check_form(form: &LateEntryForm, today: NaiveDate) -> Result<(NaiveDate, NaiveTime), ValidationReport> {
    validate_form(form)?;

    let mut report = ValidationReport::new();
    let date = parse_date(&form.date);
    let time = parse_time(&form.entry_time);

    if date.is_some_and(|d| d > today) {
        report.add("date", "Date cannot be in the future");
    }
    if time.is_some_and(|t| t < clock(EARLIEST_ENTRY) || t > clock(LATEST_ENTRY)) {
        report.add("entry_time", "Entry time must be between 07:00 and 14:00");
    }
    report.into_result()?;

    match (date, time) {
        (Some(date), Some(time)) => Ok((date, time)),
        _ => Err(ValidationReport::single("date", "Date must be in YYYY-MM-DD format")),
    }
}

fn clean_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

pub struct LateEntryServiceImpl<L, S>
where
    L: LateEntryRepository,
    S: StudentRepository,
{
    entry_repo: Arc<L>,
    student_repo: Arc<S>,
}

impl<L, S> LateEntryServiceImpl<L, S>
where
    L: LateEntryRepository,
    S: StudentRepository,
{
    pub fn new(entry_repo: Arc<L>, student_repo: Arc<S>) -> Self {
        Self {
            entry_repo,
            student_repo,
        }
    }

    async fn checked(&self, id: i64, form: LateEntryForm) -> Result<LateEntry, LateEntryError> {
        let (date, entry_time) = check_form(&form, Local::now().date_naive())?;

        self.student_repo
            .find_by_id(form.student_id)
            .await?
            .ok_or(LateEntryError::StudentNotFound)?;

        Ok(LateEntry {
            id,
            student_id: form.student_id,
            date,
            entry_time,
            note: clean_note(form.note),
        })
    }
}

#[async_trait]
impl<L, S> LateEntryService for LateEntryServiceImpl<L, S>
where
    L: LateEntryRepository + 'static,
    S: StudentRepository + 'static,
{
    async fn list_by_date(&self, date: &str) -> Result<Vec<LateEntry>, LateEntryError> {
        let date = parse_date(date)
            .ok_or_else(|| ValidationReport::single("date", "Date must be in YYYY-MM-DD format"))?;

        let mut entries = self.entry_repo.find_by_date(date).await?;
        entries.sort_by_key(|e| (e.entry_time, e.id));
        Ok(entries)
    }

    async fn insert(&self, form: LateEntryForm) -> Result<LateEntry, LateEntryError> {
        let mut entry = self.checked(0, form).await?;
        entry.id = self.entry_repo.next_id().await?;

        let saved = self.entry_repo.save(&entry).await?;
        tracing::info!(
            entry_id = saved.id,
            student_id = saved.student_id,
            date = %saved.date,
            "Late entry recorded"
        );
        Ok(saved)
    }

    async fn edit(&self, id: i64, form: LateEntryForm) -> Result<LateEntry, LateEntryError> {
        self.entry_repo
            .find_by_id(id)
            .await?
            .ok_or(LateEntryError::NotFound)?;

        let entry = self.checked(id, form).await?;
        let saved = self.entry_repo.save(&entry).await?;
        tracing::info!(entry_id = id, "Late entry edited");
        Ok(saved)
    }

    async fn delete(&self, id: i64) -> Result<(), LateEntryError> {
        if !self.entry_repo.delete(id).await? {
            return Err(LateEntryError::NotFound);
        }
        tracing::info!(entry_id = id, "Late entry deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Student;
    use crate::infrastructure::repositories::{InMemoryLateEntryRepository, InMemoryStudentRepository};
    use crate::infrastructure::simulation::{ServerLink, SMOS};
    use chrono::{Duration, Utc};
    use test_case::test_case;

    async fn service() -> LateEntryServiceImpl<InMemoryLateEntryRepository, InMemoryStudentRepository> {
        let link = ServerLink::new(SMOS, true);
        let students = Arc::new(InMemoryStudentRepository::new(link.clone()));
        students
            .save(&Student {
                id: 1,
                name: "Giulia Verdi".into(),
                email: "giulia@school.example".into(),
                active: true,
                enrolled_at: Utc::now(),
            })
            .await
            .unwrap();
        LateEntryServiceImpl::new(Arc::new(InMemoryLateEntryRepository::new(link)), students)
    }

    fn form(date: &str, time: &str) -> LateEntryForm {
        LateEntryForm {
            student_id: 1,
            date: date.into(),
            entry_time: time.into(),
            note: Some("Bus strike".into()),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
    }

    #[test_case("07:00", true ; "opening bound")]
    #[test_case("14:00", true ; "closing bound")]
    #[test_case("06:59", false ; "too early")]
    #[test_case("14:01", false ; "too late")]
    fn test_entry_time_window(time: &str, ok: bool) {
        assert_eq!(check_form(&form("2024-03-11", time), today()).is_ok(), ok);
    }

    #[test]
    fn test_future_date_is_refused() {
        let report = check_form(&form("2024-03-12", "08:10"), today()).unwrap_err();
        assert_eq!(report.messages_for("date"), vec!["Date cannot be in the future"]);
    }

    #[test]
    fn test_malformed_fields_report_format_messages() {
        let report = check_form(&form("11/03/2024", "8.10"), today()).unwrap_err();
        assert_eq!(report.messages_for("date"), vec!["Date must be in YYYY-MM-DD format"]);
        assert_eq!(report.messages_for("entry_time"), vec!["Time must be in HH:MM format"]);
    }

    #[tokio::test]
    async fn test_insert_list_edit_delete() {
        let service = service().await;
        let yesterday = (Local::now().date_naive() - Duration::days(1)).to_string();

        let late = service.insert(form(&yesterday, "08:20")).await.unwrap();
        service.insert(form(&yesterday, "08:05")).await.unwrap();

        let listed = service.list_by_date(&yesterday).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].entry_time < listed[1].entry_time);

        let mut changed = form(&yesterday, "09:00");
        changed.note = Some("  ".into());
        let edited = service.edit(late.id, changed).await.unwrap();
        assert_eq!(edited.note, None);

        service.delete(late.id).await.unwrap();
        assert!(matches!(service.delete(late.id).await, Err(LateEntryError::NotFound)));
    }

    #[tokio::test]
    async fn test_unknown_student() {
        let service = service().await;
        let mut entry = form("2024-03-11", "08:00");
        entry.student_id = 99;
        assert!(matches!(
            service.insert(entry).await,
            Err(LateEntryError::StudentNotFound)
        ));
    }
}
