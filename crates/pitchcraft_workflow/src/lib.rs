//! Workflow orchestration for Pitchcraft.
//!
//! A [`PitchSession`] holds one user's description, narrative, and derived
//! assets, and enforces the order they are built in: the narrative first,
//! then the image, video, and social posts in any order (posts need the
//! image). Each operation records its own loading flag and user-facing
//! error, visible through [`SessionSnapshot`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod operation;
mod session;
mod snapshot;

pub use operation::{
    IMAGE_FAILED, KEY_UNVERIFIED, NARRATIVE_FAILED, Operation, OperationStatus,
    SOCIAL_POSTS_FAILED, VIDEO_FAILED, VIDEO_INVALID_KEY,
};
pub use session::PitchSession;
pub use snapshot::SessionSnapshot;
