// Providers layer - Seams over external collaborators
pub mod profile_provider;

pub use profile_provider::{ContactFields, DbProfileProvider, ProfileProvider};
