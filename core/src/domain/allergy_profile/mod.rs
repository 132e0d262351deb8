pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{AllergyProfile, COMMON_ALLERGENS};
pub use ports::{AllergyProfileRepository, AllergyProfileService};
pub use value_objects::{SessionContext, UpdateAllergyProfileInput};
