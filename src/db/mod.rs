//! Database repositories: one struct per entity, each a thin wrapper
//! around a shared `PgPool`, with operations split into per-concern
//! files (`create`, `read`, `update`) rather than one large `impl`.

pub mod ad;
pub mod question;
pub mod quiz;
pub mod result;
pub mod user;
pub mod user_answer;

use sqlx::PgPool;

use ad::AdRepository;
use question::QuestionRepository;
use quiz::QuizRepository;
use result::ResultRepository;
use user::UserRepository;
use user_answer::UserAnswerRepository;

/// All entity repositories, bundled for cheap cloning into `AppState`.
#[derive(Clone)]
pub struct Repositories {
    pub quiz: QuizRepository,
    pub question: QuestionRepository,
    pub ad: AdRepository,
    pub user_answer: UserAnswerRepository,
    pub result: ResultRepository,
    pub user: UserRepository,
    pub(crate) pool: PgPool,
}

impl Repositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            quiz: QuizRepository::new(pool.clone()),
            question: QuestionRepository::new(pool.clone()),
            ad: AdRepository::new(pool.clone()),
            user_answer: UserAnswerRepository::new(pool.clone()),
            result: ResultRepository::new(pool.clone()),
            user: UserRepository::new(pool.clone()),
            pool,
        }
    }

    /// Direct pool access for cross-repository transactions
    /// (`ResultFinalizer` needs a single transaction spanning
    /// `user_answer`, `result`, and `user` writes).
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
