mod admin;
mod engagement;
mod payment;
mod question;
mod role;
mod user;

pub use admin::{ActivityLog, FeatureToggle};
pub use engagement::{Favorite, LeaderboardEntry, Reward, UserRank};
pub use payment::{QrCode, Transaction};
pub use question::{Category, Question, QuestionStatus, Severity};
pub use role::{Permission, Role};
pub use user::{CompanyStats, RoleRef, User};
