mod logging;
mod startup;

pub use logging::init_logging;
pub use startup::initialize_on_startup;
