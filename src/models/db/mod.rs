//! Database models representing PostgreSQL tables
//!
//! All structs here derive `FromRow` for SQLx compatibility.

pub mod ad;
pub mod question;
pub mod quiz;
pub mod result;
pub mod user;
pub mod user_answer;

pub use ad::{AdAsset, AdSlot};
pub use question::Question;
pub use quiz::Quiz;
pub use result::Result as QuizResult;
pub use user::User;
pub use user_answer::UserAnswer;
