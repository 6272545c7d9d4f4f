pub mod csv_import;
pub mod file;

pub use csv_import::import_phase_plan;
pub use file::{load_template, save_template};
