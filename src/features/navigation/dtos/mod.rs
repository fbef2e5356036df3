mod landing_dto;

pub use landing_dto::*;
