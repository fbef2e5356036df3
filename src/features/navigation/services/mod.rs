mod landing_service;
mod structure_loader;

pub use landing_service::LandingService;
pub use structure_loader::{first_guide_path, StructureLoader};
