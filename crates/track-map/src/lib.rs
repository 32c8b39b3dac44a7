//! Track Map - command line front end
//!
//! Turns a GPX track into a MapQuest static map image: parse the settings, run the
//! filter/encoder pipeline from `track-map-lib`, fetch the image and write it to disk.

mod logging;
mod run;
mod settings;

pub use logging::setup_logging;
pub use run::run;
pub use settings::{ENDPOINT_ENV, Settings, get_env};
