//! Configuration files for the patchwire wire engine.
//!
//! # Features
//!
//! - **Racks**: TOML descriptions of device panels, their node I/O and ports
//! - **Scenarios**: scripted pointer gestures replayed against a rack
//! - **Settings**: user defaults (log filter, port hit radius, pointer name)
//! - **Paths**: platform-specific config and rack directories
//!
//! # Example
//!
//! ```rust,no_run
//! use patchwire_config::{Rack, RackSession, Scenario, Settings};
//!
//! let settings = Settings::load_or_default(patchwire_config::settings_path()).unwrap();
//! let rack = Rack::load("voice.toml").unwrap();
//! let mut session = RackSession::from_rack(&rack, &settings).unwrap();
//!
//! let scenario = Scenario::load("patch.toml").unwrap();
//! for outcome in scenario.run(&mut session).unwrap() {
//!     println!("{}: {} events", outcome.step, outcome.events().count());
//! }
//! println!("{:?}", session.bay.connections());
//! ```

mod error;
mod rack;
mod scenario;
mod session;
mod settings;

/// Platform-specific paths for racks and configuration.
pub mod paths;

pub use error::ConfigError;
pub use paths::{
    ensure_user_racks_dir, find_rack, list_user_racks, rack_name_from_path, settings_path,
    user_config_dir, user_racks_dir,
};
pub use rack::{DeviceConfig, PortConfig, Rack};
pub use scenario::{Scenario, Step, StepOutcome, Target};
pub use session::RackSession;
pub use settings::Settings;
