//! Thin HTTP admin surface: scheduling, cancellation, and a
//! read-side state query. Full CRUD for quizzes/questions/ads is an
//! external collaborator's responsibility - this module only wires the
//! three operations whose contract lives on `QuizManager` itself: it
//! calls those public methods directly.

mod handlers;
mod routes;

pub use routes::http_router;
