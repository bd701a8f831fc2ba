pub mod credential;
pub mod error;
pub mod expense;
pub mod house;
pub mod invitation;
pub mod invitation_service;
pub mod media;
pub mod media_service;
pub mod membership;
pub mod stay;
pub mod user;

#[cfg(test)]
mod invitation_test;
#[cfg(test)]
mod media_service_test;
#[cfg(test)]
mod membership_test;
#[cfg(test)]
mod stay_test;

pub use credential::{CredentialRepository, hash_token};
pub use error::RepositoryError;
pub use expense::{ExpenseRepository, MemberBalance};
pub use house::HouseRepository;
pub use invitation::InvitationRepository;
pub use invitation_service::{InvitationService, ReconcileOutcome};
pub use media::{MediaInfo, MediaRepository};
pub use media_service::{MediaError, MediaService, MediaUploadResult, ThumbnailMethod, ThumbnailResult};
pub use membership::{HouseMember, MembershipRepository};
pub use stay::StayRepository;
pub use user::UserRepository;
