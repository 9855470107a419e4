//! Question Bank SDK
//!
//! Plain records exchanged with the question bank REST backend, the request
//! payloads the console sends, and the normalization of the heterogeneous list
//! envelopes the backend returns.
//!
//! Entities are passed through unchanged: the only thing this crate imposes is
//! defaulting of optional fields so callers can render partially populated
//! records.

pub mod envelope;
pub mod error;
pub mod models;
pub mod params;
pub mod requests;

pub use envelope::{Page, normalize_item, normalize_list, normalize_page};
pub use error::{EnvelopeError, FieldError, ValidationErrorBody, backend_message};
pub use models::{
    ActivityLog, Category, CompanyStats, FeatureToggle, Favorite, LeaderboardEntry, Permission,
    QrCode, Question, QuestionStatus, Reward, Role, RoleRef, Severity, Transaction, User,
    UserRank,
};
pub use params::{ListParams, SortOrder};
pub use requests::{
    AssignPermissionsRequest, BulkRoleAssignment, CategoryRequest, CompanyPayload,
    InvalidateQuestionRequest, LoginRequest, LoginResponse, RegisterRequest, StatusUpdate,
    UpdateUserRequest, VoteKind, VoteRequest,
};
