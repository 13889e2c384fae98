//! # Domain Entities
//!
//! Each use case keeps its own small data model; entities do not reference
//! each other beyond plain ids.
//!
//! ## eTour (tourism agency)
//!
//! - **News**: news items published on the portal
//! - **RefreshmentPoint / Banner**: restaurants and their advertising banners
//! - **Tag**: search tags offered to tourists
//! - **CulturalHeritage**: cultural sites
//! - **Tourist**: registered tourist accounts
//! - **DailyMenu**: a refreshment point's menu for one weekday
//! - **Feedback**: a tourist's vote on a cultural site
//!
//! ## SMOS (school office)
//!
//! - **Address**: school sites with their classes
//! - **SchoolClass / Teaching**: classes per academic year, teachings per address
//! - **RegistrationRequest / Student**: enrollment requests and students
//! - **LateEntry**: delays recorded in the class register
//! - **Absence / Justification**: absences and their justifications
//!
//! ## Shared
//!
//! - **Account**: login accounts with roles
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod absence;
mod account;
mod address;
mod banner;
mod cultural_heritage;
mod enrollment;
mod feedback;
mod late_entry;
mod menu;
mod news;
mod school_class;
mod tag;
mod tourist;

pub use absence::{Absence, AbsenceRepository, Justification, JustificationRepository};
pub use account::{Account, AccountRepository};
pub use address::{Address, AddressRepository};
pub use banner::{
    Banner, BannerRepository, PointStatus, RefreshmentPoint, RefreshmentPointRepository,
};
pub use cultural_heritage::{CulturalHeritage, CulturalHeritageRepository};
pub use enrollment::{
    RegistrationRequest, RegistrationRequestRepository, RequestStatus, Student, StudentRepository,
};
pub use feedback::{Feedback, FeedbackRepository, MAX_RATING, MIN_RATING};
pub use late_entry::{LateEntry, LateEntryRepository};
pub use menu::{day_index, DailyMenu, MenuRepository};
pub use news::{News, NewsRepository, NewsStatus};
pub use school_class::{ClassRepository, SchoolClass, Teaching, TeachingRepository};
pub use tag::{Tag, TagRepository};
pub use tourist::{Tourist, TouristRepository};

#[cfg(test)]
pub use account::MockAccountRepository;
#[cfg(test)]
pub use news::MockNewsRepository;
