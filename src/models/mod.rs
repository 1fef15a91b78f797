pub mod shirt;
pub mod user;

pub use shirt::{KitType, NewShirt, ShirtDraft, ShirtMetadata, ShirtRecord, UNKNOWN_USER};
pub use user::{Principal, ProfileRecord};
