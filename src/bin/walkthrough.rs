//! Scripted console walkthrough of the use cases over the demo data.
//!
//! Every scenario drives a console controller exactly as an operator would
//! and prints the notifications it raises.

use std::sync::Arc;

use anyhow::Result;

use usecase_desk::application::services::BannerUpload;
use usecase_desk::config::Settings;
use usecase_desk::infrastructure::seed::DEMO_PASSWORD;
use usecase_desk::presentation::console::{
    AddressDeletionController, BannerInsertionController, ConsoleNotifier, EnrollmentController,
    LoginController, NewsDeletionController, NewsEditController, Notifier,
};
use usecase_desk::startup::{build_state, AppState};

fn heading(title: &str) {
    println!();
    println!("=== {} ===", title);
}

async fn news_edit(state: &AppState, notifier: Arc<dyn Notifier>) {
    heading("Edit news: validation failure, then success");
    let mut controller = NewsEditController::new(state.news.clone(), notifier);
    controller.load(1).await;
    controller.edit(|form| form.title = String::new());
    controller.submit();
    controller.edit(|form| form.title = "Tourism Booms Again".into());
    controller.submit();
    controller.confirm().await;
}

async fn news_deletion(state: &AppState, notifier: Arc<dyn Notifier>) {
    heading("Delete news: cancelled, then confirmed");
    let mut controller = NewsDeletionController::new(state.news.clone(), notifier);
    controller.select(2).await;
    controller.cancel();
    controller.select(2).await;
    controller.confirm().await;
}

async fn banner_maximum(state: &AppState, notifier: Arc<dyn Notifier>) {
    heading("Insert banner: point already at its maximum");
    let mut controller = BannerInsertionController::new(state.banners.clone(), notifier);
    controller.select_point(2).await;

    controller.select_point(1).await;
    controller.choose_image(BannerUpload {
        file_name: "gino-lunch.jpg".into(),
        data: b"gino-lunch-offer".to_vec(),
        width: 1200,
        height: 300,
    });
    controller.confirm().await;
}

async fn connection_loss(state: &AppState, notifier: Arc<dyn Notifier>) {
    heading("Connection interrupted, then restored by hand");
    let mut controller = NewsEditController::new(state.news.clone(), notifier);
    state.links.etour.disconnect();
    controller.load(1).await;
    state.links.etour.reconnect();
    controller.load(1).await;
    controller.cancel();
}

async fn address_deletion(state: &AppState, notifier: Arc<dyn Notifier>) {
    heading("Delete address: refused while classes are associated");
    let mut controller = AddressDeletionController::new(state.addresses.clone(), notifier);
    controller.select(1).await;
    controller.select(4).await;
    controller.confirm().await;
}

async fn enrollment(state: &AppState, notifier: Arc<dyn Notifier>) {
    heading("Review registration requests");
    let controller = EnrollmentController::new(state.enrollments.clone(), notifier);
    controller.show_pending().await;
    controller.accept(1).await;
    controller.reject(2).await;
    controller.reject(1).await;
}

async fn login_lockout(state: &AppState, notifier: Arc<dyn Notifier>) {
    heading("Login: success, then lockout");
    let mut controller = LoginController::new(state.auth.clone(), notifier);
    controller.login("admin", DEMO_PASSWORD).await;
    controller.logout().await;

    let attempts = state.settings.auth.max_failed_attempts + 1;
    for _ in 0..attempts {
        controller.login("teacher", "not-the-password").await;
    }
    controller.login("former", DEMO_PASSWORD).await;
}

#[tokio::main]
async fn main() -> Result<()> {
    usecase_desk::telemetry::init_tracing("pretty");

    let state = build_state(Settings::local()?).await?;
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);

    news_edit(&state, notifier.clone()).await;
    news_deletion(&state, notifier.clone()).await;
    banner_maximum(&state, notifier.clone()).await;
    connection_loss(&state, notifier.clone()).await;
    address_deletion(&state, notifier.clone()).await;
    enrollment(&state, notifier.clone()).await;
    login_lockout(&state, notifier).await;

    Ok(())
}
