//! Repository Implementations
//!
//! In-memory implementations of the domain repository traits.
//!
//! Every repository wraps a [`MemoryTable`] bound to the [`ServerLink`] of
//! its system: eTour repositories share the `ETOUR` link, SMOS repositories
//! (and accounts) share the `SMOS` link. Flipping a link off makes every
//! repository behind it fail with a connection error.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use crate::infrastructure::simulation::ServerLinks;
//! use crate::infrastructure::repositories::{InMemoryNewsRepository, InMemoryAddressRepository};
//!
//! let links = ServerLinks::connected();
//! let news_repo = InMemoryNewsRepository::new(links.etour.clone());
//! let address_repo = InMemoryAddressRepository::new(links.smos.clone());
//! ```
//!
//! [`ServerLink`]: crate::infrastructure::simulation::ServerLink

pub mod memory;

// eTour
pub mod banner_repository;
pub mod cultural_heritage_repository;
pub mod feedback_repository;
pub mod menu_repository;
pub mod news_repository;
pub mod tag_repository;
pub mod tourist_repository;

// SMOS
pub mod absence_repository;
pub mod account_repository;
pub mod address_repository;
pub mod class_repository;
pub mod enrollment_repository;
pub mod late_entry_repository;

pub use memory::MemoryTable;

pub use banner_repository::{InMemoryBannerRepository, InMemoryRefreshmentPointRepository};
pub use cultural_heritage_repository::InMemoryCulturalHeritageRepository;
pub use feedback_repository::InMemoryFeedbackRepository;
pub use menu_repository::InMemoryMenuRepository;
pub use news_repository::InMemoryNewsRepository;
pub use tag_repository::InMemoryTagRepository;
pub use tourist_repository::InMemoryTouristRepository;

pub use absence_repository::{InMemoryAbsenceRepository, InMemoryJustificationRepository};
pub use account_repository::InMemoryAccountRepository;
pub use address_repository::InMemoryAddressRepository;
pub use class_repository::{InMemoryClassRepository, InMemoryTeachingRepository};
pub use enrollment_repository::{
    InMemoryRegistrationRequestRepository, InMemoryStudentRepository,
};
pub use late_entry_repository::InMemoryLateEntryRepository;

use std::sync::Arc;

use crate::infrastructure::simulation::ServerLinks;

/// Every repository of the desk, bound to its server link.
#[derive(Clone)]
pub struct Repositories {
    pub news: Arc<InMemoryNewsRepository>,
    pub points: Arc<InMemoryRefreshmentPointRepository>,
    pub banners: Arc<InMemoryBannerRepository>,
    pub sites: Arc<InMemoryCulturalHeritageRepository>,
    pub tourists: Arc<InMemoryTouristRepository>,
    pub menus: Arc<InMemoryMenuRepository>,
    pub feedback: Arc<InMemoryFeedbackRepository>,
    pub tags: Arc<InMemoryTagRepository>,

    pub addresses: Arc<InMemoryAddressRepository>,
    pub classes: Arc<InMemoryClassRepository>,
    pub teachings: Arc<InMemoryTeachingRepository>,
    pub requests: Arc<InMemoryRegistrationRequestRepository>,
    pub students: Arc<InMemoryStudentRepository>,
    pub late_entries: Arc<InMemoryLateEntryRepository>,
    pub absences: Arc<InMemoryAbsenceRepository>,
    pub justifications: Arc<InMemoryJustificationRepository>,
    pub accounts: Arc<InMemoryAccountRepository>,
}

impl Repositories {
    pub fn new(links: &ServerLinks) -> Self {
        let etour = &links.etour;
        let smos = &links.smos;
        Self {
            news: Arc::new(InMemoryNewsRepository::new(etour.clone())),
            points: Arc::new(InMemoryRefreshmentPointRepository::new(etour.clone())),
            banners: Arc::new(InMemoryBannerRepository::new(etour.clone())),
            sites: Arc::new(InMemoryCulturalHeritageRepository::new(etour.clone())),
            tourists: Arc::new(InMemoryTouristRepository::new(etour.clone())),
            menus: Arc::new(InMemoryMenuRepository::new(etour.clone())),
            feedback: Arc::new(InMemoryFeedbackRepository::new(etour.clone())),
            tags: Arc::new(InMemoryTagRepository::new(etour.clone())),

            addresses: Arc::new(InMemoryAddressRepository::new(smos.clone())),
            classes: Arc::new(InMemoryClassRepository::new(smos.clone())),
            teachings: Arc::new(InMemoryTeachingRepository::new(smos.clone())),
            requests: Arc::new(InMemoryRegistrationRequestRepository::new(smos.clone())),
            students: Arc::new(InMemoryStudentRepository::new(smos.clone())),
            late_entries: Arc::new(InMemoryLateEntryRepository::new(smos.clone())),
            absences: Arc::new(InMemoryAbsenceRepository::new(smos.clone())),
            justifications: Arc::new(InMemoryJustificationRepository::new(smos.clone())),
            accounts: Arc::new(InMemoryAccountRepository::new(smos.clone())),
        }
    }
}
