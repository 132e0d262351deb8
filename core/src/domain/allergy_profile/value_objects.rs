use uuid::Uuid;

use crate::domain::allergy_profile::entities::AllergyProfile;

/// Per-request session state, passed explicitly to every scan and check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub session_id: Uuid,
    pub profile: AllergyProfile,
}

impl SessionContext {
    pub fn new(session_id: Uuid, profile: AllergyProfile) -> Self {
        Self {
            session_id,
            profile,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAllergyProfileInput {
    /// Replaces the whole allergen list when present.
    pub allergens: Option<Vec<String>>,
    pub dietary_preferences: Option<String>,
    pub cuisine_preference: Option<String>,
}
