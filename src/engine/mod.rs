//! The quiz engine: scheduler, question runner, answer processor,
//! result finalizer, and the manager that owns them. `quiz_manager` is
//! the only submodule external callers (HTTP/WS handlers) reach
//! directly, keeping ownership of a running quiz's state acyclic.

pub mod active_state;
pub mod adaptive_selector;
pub mod answer_processor;
pub mod cancel;
pub mod events;
pub mod question_runner;
pub mod quiz_manager;
pub mod result_finalizer;
pub mod scheduler;
