pub mod static_store;

pub use static_store::StaticFoodReferenceStore;
