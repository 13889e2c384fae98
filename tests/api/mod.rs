//! REST API endpoint tests

mod auth_tests;
mod banner_tests;
mod etour_tests;
mod health_tests;
mod news_tests;
mod roles_tests;
mod simulation_tests;
mod smos_tests;
