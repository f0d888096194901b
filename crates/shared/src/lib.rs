//! SheetKeeper Shared - wire contracts for Engine and Player communication
//!
//! This crate contains the REST request/response DTOs exchanged between the Engine
//! (backend) and the Player (frontend).
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - serde, serde_json, uuid, chrono and thiserror
//! 2. **No business logic** - Pure data types and serialization
//! 3. **WASM compatible** - Must compile for both native and wasm32 targets
//! 4. **No domain IDs** - use raw `uuid::Uuid` in DTOs

pub mod errors;
pub mod queries;
pub mod requests;
pub mod responses;

/// Header carrying the caller identity on every authenticated request.
pub const USER_ID_HEADER: &str = "x-user-id";

pub use errors::{ErrorBody, SkillPointsErrorDetail, SKILL_POINTS_ERROR_CODE};
pub use queries::{
    CharacterListQuery, CharacterSort, CocofoliaExportQuery, QueryError, DEFAULT_LIMIT,
    DEFAULT_PAGE, MAX_LIMIT,
};
pub use requests::{
    AutoRollRequest, CreateCharacterRequest, DiceRollRequest, ImageUploadUrlRequest,
    PublishRequest, UpdateCharacterRequest,
};
pub use responses::{
    AutoRollResponse, CharacterListResponse, CharacterResponse, CocofoliaExportMeta,
    CocofoliaExportResponse, DiceRollResponse, ImageUploadUrlResponse, MeResponse,
    PublishResponse,
};
