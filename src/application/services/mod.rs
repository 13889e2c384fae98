//! Application Services
//!
//! Business logic services that validate forms and coordinate repository
//! calls. Every service returns a tagged error distinguishing validation
//! failures, missing records, lost connections and use-case refusals.
//!
//! ## eTour
//!
//! - **NewsService**: Insert, edit, delete and list news
//! - **BannerService**: Banners of refreshment points
//! - **RefreshmentPointService**: Search, view and modify refreshment points
//! - **TagService**: Search tags
//! - **CulturalHeritageService**: Cultural sites
//! - **TouristService**: Tourist accounts
//! - **MenuService**: Daily menus of refreshment points
//! - **FeedbackService**: Votes on cultural sites
//!
//! ## SMOS
//!
//! - **AddressService**: School addresses
//! - **ClassService**: Classes per address and the teachings addresses offer
//! - **EnrollmentService**: Registration requests
//! - **LateEntryService**: Delays in the class register
//! - **JustificationService**: Absences and their justifications
//! - **AuthService** / **RoleService**: Login and account roles

pub mod address_service;
pub mod auth_service;
pub mod banner_service;
pub mod class_service;
pub mod cultural_heritage_service;
pub mod enrollment_service;
pub mod feedback_service;
pub mod justification_service;
pub mod late_entry_service;
pub mod menu_service;
pub mod news_service;
pub mod point_service;
pub mod role_service;
pub mod tag_service;
pub mod tourist_service;

pub use address_service::{AddressError, AddressService, AddressServiceImpl};
pub use auth_service::{
    AccountDto, AuthError, AuthService, AuthServiceImpl, AuthTokens, Claims, LoginResult,
    SessionRegistry,
};
pub use banner_service::{BannerError, BannerService, BannerServiceImpl, BannerUpload, PointSummaryDto};
pub use class_service::{AddressTeachingsDto, ClassError, ClassService, ClassServiceImpl};
pub use cultural_heritage_service::{
    CulturalHeritageService, CulturalHeritageServiceImpl, HeritageError,
};
pub use enrollment_service::{EnrollmentError, EnrollmentService, EnrollmentServiceImpl};
pub use feedback_service::{FeedbackError, FeedbackService, FeedbackServiceImpl, FeedbackSummaryDto};
pub use justification_service::{
    AbsenceDto, JustificationError, JustificationService, JustificationServiceImpl,
};
pub use late_entry_service::{LateEntryError, LateEntryService, LateEntryServiceImpl};
pub use menu_service::{parse_day, MenuError, MenuService, MenuServiceImpl};
pub use news_service::{NewsDto, NewsError, NewsService, NewsServiceImpl};
pub use point_service::{PointError, RefreshmentPointService, RefreshmentPointServiceImpl};
pub use role_service::{RoleError, RoleService, RoleServiceImpl};
pub use tag_service::{TagError, TagService, TagServiceImpl};
pub use tourist_service::{TouristError, TouristService, TouristServiceImpl};

/// Label of a failed outcome in the `usecase_outcomes_total` metric.
pub trait OutcomeLabel {
    fn outcome_label(&self) -> &'static str;
}

/// Count the outcome of a use case and hand the result back unchanged.
pub fn observe<T, E: OutcomeLabel>(usecase: &str, result: Result<T, E>) -> Result<T, E> {
    let outcome = match &result {
        Ok(_) => "success",
        Err(e) => e.outcome_label(),
    };
    crate::infrastructure::metrics::record_outcome(usecase, outcome);
    result
}
