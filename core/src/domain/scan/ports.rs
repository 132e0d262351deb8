use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    allergy_profile::value_objects::SessionContext,
    common::CoreError,
    scan::{entities::ScanResult, value_objects::ScanImageInput},
};

pub trait ScanService: Send + Sync {
    /// Classifies a dish photo, resolves its ingredients and evaluates them.
    fn scan_food(
        &self,
        context: SessionContext,
        input: ScanImageInput,
    ) -> impl Future<Output = Result<ScanResult, CoreError>> + Send;

    /// Reads a product label and evaluates the extracted ingredient text.
    fn scan_label(
        &self,
        context: SessionContext,
        input: ScanImageInput,
    ) -> impl Future<Output = Result<ScanResult, CoreError>> + Send;

    /// Supersedes the in-flight scan of a session. Returns whether one was pending.
    fn cancel_scan(&self, session_id: Uuid) -> bool;
}
