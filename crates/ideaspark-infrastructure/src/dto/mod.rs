//! Data Transfer Objects (DTOs) for persisted files.
//!
//! DTOs keep the on-disk shape apart from the domain models. Versioned shapes
//! are migrated on load through `version-migrate`; saves always write the
//! latest version.

pub mod app_state;
pub mod session;

pub use app_state::AppStateV1_0;
pub use session::{
    LEGACY_SESSIONS_VERSION, SESSIONS_ENTITY, SESSIONS_SCHEMA_VERSION, SessionV1_0_0,
    SessionV1_1_0, SessionsFileDTO, SessionsFileV1_0_0, SessionsFileV1_1_0,
    create_sessions_migrator, stored_version, tag_legacy,
};
