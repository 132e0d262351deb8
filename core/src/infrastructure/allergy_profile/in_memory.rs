use std::{collections::HashMap, sync::RwLock};

use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    allergy_profile::{entities::AllergyProfile, ports::AllergyProfileRepository},
    common::CoreError,
};

/// Session profiles held in process memory. Writes are last-writer-wins.
#[derive(Debug, Default)]
pub struct InMemoryAllergyProfileRepository {
    profiles: RwLock<HashMap<Uuid, AllergyProfile>>,
}

impl InMemoryAllergyProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AllergyProfileRepository for InMemoryAllergyProfileRepository {
    async fn get(&self, session_id: Uuid) -> Result<Option<AllergyProfile>, CoreError> {
        let profiles = self.profiles.read().unwrap_or_else(|e| e.into_inner());
        Ok(profiles.get(&session_id).cloned())
    }

    async fn save(
        &self,
        session_id: Uuid,
        profile: AllergyProfile,
    ) -> Result<AllergyProfile, CoreError> {
        let mut profiles = self.profiles.write().unwrap_or_else(|e| e.into_inner());
        profiles.insert(session_id, profile.clone());
        debug!(%session_id, sessions = profiles.len(), "allergy profile stored");

        Ok(profile)
    }
}
