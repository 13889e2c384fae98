//! Class Service
//!
//! Classes held at a school address per academic year, and the teachings
//! each address offers. Inserting a class also records its name on the
//! address, which is what keeps the address from being deleted.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::Mutex;

use super::OutcomeLabel;
use crate::application::dto::{ClassForm, ClassQuery, TeachingAssignmentForm};
use crate::domain::{
    Address, AddressRepository, ClassRepository, SchoolClass, Teaching, TeachingRepository,
};
use crate::shared::error::{RepositoryError, ValidationReport};
use crate::shared::validation::validate_form;

#[async_trait]
pub trait ClassService: Send + Sync {
    /// Classes of an address, optionally limited to one academic year
    async fn list_classes(&self, address_id: i64, query: ClassQuery) -> Result<Vec<SchoolClass>, ClassError>;

    async fn insert_class(&self, address_id: i64, form: ClassForm) -> Result<SchoolClass, ClassError>;

    /// Teachings offered at an address next to those it could take on
    async fn teachings_of(&self, address_id: i64) -> Result<AddressTeachingsDto, ClassError>;

    async fn update_teachings(
        &self,
        address_id: i64,
        form: TeachingAssignmentForm,
    ) -> Result<AddressTeachingsDto, ClassError>;

    async fn view_teaching(&self, id: i64) -> Result<Teaching, ClassError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressTeachingsDto {
    pub address_id: i64,
    pub assigned: Vec<Teaching>,
    pub available: Vec<Teaching>,
}

#[derive(Debug, thiserror::Error)]
pub enum ClassError {
    #[error("Address not found")]
    AddressNotFound,

    #[error("Teaching not found: {0}")]
    TeachingNotFound(i64),

    #[error("{0}")]
    Validation(#[from] ValidationReport),

    #[error("Class {name} already exists at this address for {academic_year}")]
    Duplicate { name: String, academic_year: String },

    #[error(transparent)]
    Connection(#[from] RepositoryError),
}

impl OutcomeLabel for ClassError {
    fn outcome_label(&self) -> &'static str {
        match self {
            Self::AddressNotFound | Self::TeachingNotFound(_) => "not_found",
            Self::Validation(_) => "validation",
            Self::Duplicate { .. } => "refused",
            Self::Connection(_) => "connection",
        }
    }
}

pub struct ClassServiceImpl<A, C, T>
where
    A: AddressRepository,
    C: ClassRepository,
    T: TeachingRepository,
{
    address_repo: Arc<A>,
    class_repo: Arc<C>,
    teaching_repo: Arc<T>,
    write_lock: Mutex<()>,
}

impl<A, C, T> ClassServiceImpl<A, C, T>
where
    A: AddressRepository,
    C: ClassRepository,
    T: TeachingRepository,
{
    pub fn new(address_repo: Arc<A>, class_repo: Arc<C>, teaching_repo: Arc<T>) -> Self {
        Self {
            address_repo,
            class_repo,
            teaching_repo,
            write_lock: Mutex::new(()),
        }
    }

    async fn address(&self, id: i64) -> Result<Address, ClassError> {
        self.address_repo
            .find_by_id(id)
            .await?
            .ok_or(ClassError::AddressNotFound)
    }

    async fn overview(&self, address_id: i64) -> Result<AddressTeachingsDto, ClassError> {
        let (assigned, available): (Vec<Teaching>, Vec<Teaching>) = self
            .teaching_repo
            .find_all()
            .await?
            .into_iter()
            .partition(|t| t.is_taught_at(address_id));
        Ok(AddressTeachingsDto {
            address_id,
            assigned,
            available,
        })
    }

    /// Put back teachings saved before a failure.
    async fn restore(&self, originals: &[Teaching]) {
        for teaching in originals {
            if let Err(e) = self.teaching_repo.save(teaching).await {
                tracing::warn!(teaching_id = teaching.id, error = %e, "Could not restore teaching");
            }
        }
    }
}

fn check_assignment(form: &TeachingAssignmentForm) -> Result<(), ValidationReport> {
    let mut report = ValidationReport::new();
    if form.assign.is_empty() && form.remove.is_empty() {
        report.add("assign", "Select at least one teaching to assign or remove");
    }
    if form.assign.iter().any(|id| form.remove.contains(id)) {
        report.add("remove", "A teaching cannot be assigned and removed at once");
    }
    report.into_result()
}

#[async_trait]
impl<A, C, T> ClassService for ClassServiceImpl<A, C, T>
where
    A: AddressRepository + 'static,
    C: ClassRepository + 'static,
    T: TeachingRepository + 'static,
{
    async fn list_classes(&self, address_id: i64, query: ClassQuery) -> Result<Vec<SchoolClass>, ClassError> {
        self.address(address_id).await?;
        let year = query.academic_year.as_deref().map(str::trim).filter(|y| !y.is_empty());

        let classes = self.class_repo.find_by_address(address_id).await?;
        Ok(classes
            .into_iter()
            .filter(|c| year.map_or(true, |y| c.academic_year == y))
            .collect())
    }

    async fn insert_class(&self, address_id: i64, form: ClassForm) -> Result<SchoolClass, ClassError> {
        validate_form(&form)?;
        let name = form.name.trim().to_string();
        let academic_year = form.academic_year.trim().to_string();

        let _guard = self.write_lock.lock().await;
        let mut address = self.address(address_id).await?;

        let clash = self
            .class_repo
            .find_by_address(address_id)
            .await?
            .into_iter()
            .any(|c| c.academic_year == academic_year && c.name.eq_ignore_ascii_case(&name));
        if clash {
            return Err(ClassError::Duplicate {
                name,
                academic_year,
            });
        }

        let class = SchoolClass {
            id: self.class_repo.next_id().await?,
            name,
            address_id,
            academic_year,
        };
        let saved = self.class_repo.save(&class).await?;

        if !address.associated_classes.iter().any(|c| c.eq_ignore_ascii_case(&saved.name)) {
            address.associated_classes.push(saved.name.clone());
            if let Err(e) = self.address_repo.save(&address).await {
                if let Err(undo) = self.class_repo.delete(saved.id).await {
                    tracing::warn!(class_id = saved.id, error = %undo, "Could not roll back class");
                }
                return Err(e.into());
            }
        }

        tracing::info!(class_id = saved.id, address_id, name = %saved.name, "Class inserted");
        Ok(saved)
    }

    async fn teachings_of(&self, address_id: i64) -> Result<AddressTeachingsDto, ClassError> {
        self.address(address_id).await?;
        self.overview(address_id).await
    }

    async fn update_teachings(
        &self,
        address_id: i64,
        form: TeachingAssignmentForm,
    ) -> Result<AddressTeachingsDto, ClassError> {
        check_assignment(&form)?;

        let _guard = self.write_lock.lock().await;
        self.address(address_id).await?;

        let assign: BTreeSet<i64> = form.assign.into_iter().collect();
        let remove: BTreeSet<i64> = form.remove.into_iter().collect();

        let mut changes = Vec::new();
        for &id in assign.iter().chain(remove.iter()) {
            let original = self
                .teaching_repo
                .find_by_id(id)
                .await?
                .ok_or(ClassError::TeachingNotFound(id))?;
            let mut updated = original.clone();
            if assign.contains(&id) {
                updated.address_ids.insert(address_id);
            } else {
                updated.address_ids.remove(&address_id);
            }
            if updated != original {
                changes.push((original, updated));
            }
        }

        let mut saved = Vec::with_capacity(changes.len());
        for (original, updated) in changes {
            if let Err(e) = self.teaching_repo.save(&updated).await {
                self.restore(&saved).await;
                return Err(e.into());
            }
            saved.push(original);
        }

        tracing::info!(address_id, changed = saved.len(), "Address teachings updated");
        self.overview(address_id).await
    }

    async fn view_teaching(&self, id: i64) -> Result<Teaching, ClassError> {
        self.teaching_repo
            .find_by_id(id)
            .await?
            .ok_or(ClassError::TeachingNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::{
        InMemoryAddressRepository, InMemoryClassRepository, InMemoryTeachingRepository,
    };
    use crate::infrastructure::simulation::{ServerLink, SMOS};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicBool, Ordering};

    type Service =
        ClassServiceImpl<InMemoryAddressRepository, InMemoryClassRepository, InMemoryTeachingRepository>;

    fn address(id: i64, classes: &[&str]) -> Address {
        Address {
            id,
            name: "Main Campus".into(),
            street: "Via Giovanni Paolo II 132".into(),
            city: "Fisciano".into(),
            zip_code: "84084".into(),
            country: "Italy".into(),
            associated_classes: classes.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn teaching(id: i64, code: &str, address_ids: &[i64]) -> Teaching {
        Teaching {
            id,
            code: code.into(),
            name: format!("Course {code}"),
            instructor: "Prof. Bruno Ferri".into(),
            schedule: "Mon 09:00-11:00".into(),
            description: String::new(),
            address_ids: address_ids.iter().copied().collect(),
        }
    }

    fn class_form(name: &str, year: &str) -> ClassForm {
        ClassForm {
            name: name.into(),
            academic_year: year.into(),
        }
    }

    async fn service() -> (Service, Arc<InMemoryAddressRepository>, Arc<InMemoryTeachingRepository>) {
        let link = ServerLink::new(SMOS, true);
        let addresses = Arc::new(InMemoryAddressRepository::new(link.clone()));
        let teachings = Arc::new(InMemoryTeachingRepository::new(link.clone()));
        addresses.save(&address(1, &[])).await.unwrap();
        for t in [teaching(1, "MAT1", &[1]), teaching(2, "ITA1", &[]), teaching(3, "ENG1", &[])] {
            teachings.save(&t).await.unwrap();
        }
        let service = ClassServiceImpl::new(
            addresses.clone(),
            Arc::new(InMemoryClassRepository::new(link)),
            teachings.clone(),
        );
        (service, addresses, teachings)
    }

    #[tokio::test]
    async fn test_insert_class_records_it_on_address() {
        let (service, addresses, _) = service().await;

        let class = service.insert_class(1, class_form(" 1A ", "2024-2025")).await.unwrap();
        assert_eq!(class.name, "1A");
        assert_eq!(
            addresses.find_by_id(1).await.unwrap().unwrap().associated_classes,
            vec!["1A"]
        );

        // Same name next year is a new class but not a new name on the address
        service.insert_class(1, class_form("1A", "2025-2026")).await.unwrap();
        assert_eq!(
            addresses.find_by_id(1).await.unwrap().unwrap().associated_classes,
            vec!["1A"]
        );

        let this_year = service
            .list_classes(
                1,
                ClassQuery {
                    academic_year: Some("2024-2025".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(this_year, vec![class]);
        assert_eq!(service.list_classes(1, ClassQuery::default()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_class_and_unknown_address() {
        let (service, _, _) = service().await;
        service.insert_class(1, class_form("2B", "2024-2025")).await.unwrap();

        assert!(matches!(
            service.insert_class(1, class_form("2b", "2024-2025")).await,
            Err(ClassError::Duplicate { .. })
        ));
        assert!(matches!(
            service.insert_class(7, class_form("2B", "2024-2025")).await,
            Err(ClassError::AddressNotFound)
        ));
        assert!(matches!(
            service.list_classes(7, ClassQuery::default()).await,
            Err(ClassError::AddressNotFound)
        ));
    }

    #[tokio::test]
    async fn test_assign_and_remove_teachings() {
        let (service, _, _) = service().await;

        let before = service.teachings_of(1).await.unwrap();
        assert_eq!(before.assigned.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(before.available.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 3]);

        let after = service
            .update_teachings(
                1,
                TeachingAssignmentForm {
                    assign: vec![2, 3],
                    remove: vec![1],
                },
            )
            .await
            .unwrap();
        assert_eq!(after.assigned.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(after.available.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1]);
        assert!(service.view_teaching(2).await.unwrap().is_taught_at(1));
    }

    #[tokio::test]
    async fn test_assignment_rules() {
        let (service, _, _) = service().await;

        let Err(ClassError::Validation(report)) = service
            .update_teachings(1, TeachingAssignmentForm::default())
            .await
        else {
            panic!("expected validation error");
        };
        assert!(report.has_field("assign"));

        let Err(ClassError::Validation(report)) = service
            .update_teachings(
                1,
                TeachingAssignmentForm {
                    assign: vec![2],
                    remove: vec![2],
                },
            )
            .await
        else {
            panic!("expected validation error");
        };
        assert!(report.has_field("remove"));

        assert!(matches!(
            service
                .update_teachings(
                    1,
                    TeachingAssignmentForm {
                        assign: vec![2, 9],
                        remove: vec![],
                    },
                )
                .await,
            Err(ClassError::TeachingNotFound(9))
        ));
        // Nothing was assigned before the unknown id surfaced
        assert!(!service.view_teaching(2).await.unwrap().is_taught_at(1));
    }

    /// Address table whose writes can be made to fail on demand.
    struct FlakyAddresses {
        inner: InMemoryAddressRepository,
        fail_saves: AtomicBool,
    }

    #[async_trait]
    impl AddressRepository for FlakyAddresses {
        async fn find_by_id(&self, id: i64) -> Result<Option<Address>, RepositoryError> {
            self.inner.find_by_id(id).await
        }

        async fn find_all(&self) -> Result<Vec<Address>, RepositoryError> {
            self.inner.find_all().await
        }

        async fn save(&self, address: &Address) -> Result<Address, RepositoryError> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(RepositoryError::ConnectionInterrupted { server: SMOS });
            }
            self.inner.save(address).await
        }

        async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
            self.inner.delete(id).await
        }

        async fn next_id(&self) -> Result<i64, RepositoryError> {
            self.inner.next_id().await
        }
    }

    #[tokio::test]
    async fn test_failed_address_write_rolls_back_class() {
        let link = ServerLink::new(SMOS, true);
        let addresses = Arc::new(FlakyAddresses {
            inner: InMemoryAddressRepository::new(link.clone()),
            fail_saves: AtomicBool::new(false),
        });
        addresses.save(&address(1, &[])).await.unwrap();
        addresses.fail_saves.store(true, Ordering::SeqCst);

        let service = ClassServiceImpl::new(
            addresses.clone(),
            Arc::new(InMemoryClassRepository::new(link.clone())),
            Arc::new(InMemoryTeachingRepository::new(link)),
        );

        assert!(matches!(
            service.insert_class(1, class_form("1A", "2024-2025")).await,
            Err(ClassError::Connection(_))
        ));
        assert!(service.list_classes(1, ClassQuery::default()).await.unwrap().is_empty());

        addresses.fail_saves.store(false, Ordering::SeqCst);
        service.insert_class(1, class_form("1A", "2024-2025")).await.unwrap();
        assert_eq!(
            addresses.find_by_id(1).await.unwrap().unwrap().associated_classes,
            vec!["1A"]
        );
    }
}
