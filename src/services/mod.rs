// Service exports
pub mod directory;
pub mod model;

pub use directory::{parse_accommodations, CsvEmployerDirectory, DirectoryError, EmployerSource};
pub use model::{LinearModel, Link, ModelError};
