//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

use crate::application::services::{
    AddressService, AddressServiceImpl, AuthService, AuthServiceImpl, BannerService,
    BannerServiceImpl, ClassService, ClassServiceImpl, CulturalHeritageService,
    CulturalHeritageServiceImpl, EnrollmentService, EnrollmentServiceImpl, FeedbackService,
    FeedbackServiceImpl, JustificationService, JustificationServiceImpl, LateEntryService,
    LateEntryServiceImpl, MenuService, MenuServiceImpl, NewsService, NewsServiceImpl,
    RefreshmentPointService, RefreshmentPointServiceImpl, RoleService, RoleServiceImpl,
    SessionRegistry, TagService, TagServiceImpl, TouristService, TouristServiceImpl,
};
use crate::config::Settings;
use crate::infrastructure::repositories::Repositories;
use crate::infrastructure::seed;
use crate::infrastructure::simulation::ServerLinks;
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub news: Arc<dyn NewsService>,
    pub banners: Arc<dyn BannerService>,
    pub points: Arc<dyn RefreshmentPointService>,
    pub tags: Arc<dyn TagService>,
    pub heritage: Arc<dyn CulturalHeritageService>,
    pub tourists: Arc<dyn TouristService>,
    pub menus: Arc<dyn MenuService>,
    pub feedback: Arc<dyn FeedbackService>,
    pub addresses: Arc<dyn AddressService>,
    pub classes: Arc<dyn ClassService>,
    pub enrollments: Arc<dyn EnrollmentService>,
    pub late_entries: Arc<dyn LateEntryService>,
    pub justifications: Arc<dyn JustificationService>,
    pub auth: Arc<dyn AuthService>,
    pub roles: Arc<dyn RoleService>,
    pub links: ServerLinks,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire every service over `repos`.
    pub fn new(repos: &Repositories, links: ServerLinks, settings: Settings) -> Self {
        let sessions = Arc::new(SessionRegistry::new());

        Self {
            news: Arc::new(NewsServiceImpl::new(repos.news.clone())),
            banners: Arc::new(BannerServiceImpl::new(
                repos.points.clone(),
                repos.banners.clone(),
                settings.banners.max_image_bytes,
            )),
            points: Arc::new(RefreshmentPointServiceImpl::new(repos.points.clone())),
            tags: Arc::new(TagServiceImpl::new(repos.tags.clone())),
            heritage: Arc::new(CulturalHeritageServiceImpl::new(repos.sites.clone())),
            tourists: Arc::new(TouristServiceImpl::new(repos.tourists.clone())),
            menus: Arc::new(MenuServiceImpl::new(repos.points.clone(), repos.menus.clone())),
            feedback: Arc::new(FeedbackServiceImpl::new(
                repos.sites.clone(),
                repos.tourists.clone(),
                repos.feedback.clone(),
            )),
            addresses: Arc::new(AddressServiceImpl::new(repos.addresses.clone())),
            classes: Arc::new(ClassServiceImpl::new(
                repos.addresses.clone(),
                repos.classes.clone(),
                repos.teachings.clone(),
            )),
            enrollments: Arc::new(EnrollmentServiceImpl::new(
                repos.requests.clone(),
                repos.students.clone(),
            )),
            late_entries: Arc::new(LateEntryServiceImpl::new(
                repos.late_entries.clone(),
                repos.students.clone(),
            )),
            justifications: Arc::new(JustificationServiceImpl::new(
                repos.students.clone(),
                repos.absences.clone(),
                repos.justifications.clone(),
            )),
            auth: Arc::new(AuthServiceImpl::new(
                repos.accounts.clone(),
                sessions,
                settings.auth.clone(),
            )),
            roles: Arc::new(RoleServiceImpl::new(repos.accounts.clone())),
            links,
            settings: Arc::new(settings),
        }
    }
}

/// Create repositories, seed them if configured, then bring the links to
/// their configured state.
pub async fn build_state(settings: Settings) -> Result<AppState> {
    let links = ServerLinks::connected();
    let repos = Repositories::new(&links);

    if settings.seed_demo_data {
        seed::seed(&repos).await?;
    }
    links.apply(&settings.simulation);
    tracing::info!(
        etour = links.etour.is_connected(),
        smos = links.smos.is_connected(),
        "Server links ready"
    );

    Ok(AppState::new(&repos, links, settings))
}

/// Router with tracing and CORS layers applied.
pub fn build_router(state: AppState) -> Router {
    let cors = cors::create_cors_layer(&state.settings.cors);
    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let addr: SocketAddr = settings.server_addr().parse()?;
        let state = build_state(settings).await?;
        let router = build_router(state);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}
