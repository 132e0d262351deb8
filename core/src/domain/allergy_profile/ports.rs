use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    allergy_profile::{entities::AllergyProfile, value_objects::UpdateAllergyProfileInput},
    common::CoreError,
};

/// Session-scoped profile storage with last-writer-wins semantics.
#[cfg_attr(test, mockall::automock)]
pub trait AllergyProfileRepository: Send + Sync {
    fn get(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<Option<AllergyProfile>, CoreError>> + Send;

    fn save(
        &self,
        session_id: Uuid,
        profile: AllergyProfile,
    ) -> impl Future<Output = Result<AllergyProfile, CoreError>> + Send;
}

pub trait AllergyProfileService: Send + Sync {
    /// Returns the stored profile, or the default one for a new session.
    fn get_profile(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<AllergyProfile, CoreError>> + Send;

    fn update_profile(
        &self,
        session_id: Uuid,
        input: UpdateAllergyProfileInput,
    ) -> impl Future<Output = Result<AllergyProfile, CoreError>> + Send;

    fn add_custom_allergen(
        &self,
        session_id: Uuid,
        allergen: String,
    ) -> impl Future<Output = Result<AllergyProfile, CoreError>> + Send;
}
