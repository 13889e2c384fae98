//! Settings for the server, the simulated links and the walkthrough.
//!
//! Sources, lowest priority first: built-in defaults, `config/default.toml`,
//! `config/{RUN_ENV}.toml`, `APP__SECTION__KEY` variables (a `.env` file is
//! read first), then `SERVER_HOST`, `SERVER_PORT` and `JWT_SECRET`.
//!
//! ```rust,ignore
//! use usecase_desk::config::Settings;
//!
//! let mut settings = Settings::local()?;
//! settings.simulation.smos_connected = false;
//! ```

mod settings;

pub use settings::*;
