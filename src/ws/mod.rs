//! WebSocket transport: the HTTP upgrade route and the connection
//! lifecycle that bridges socket frames to `QuizManager` calls. The
//! engine itself does not authenticate connections - the external
//! auth/session layer is out of scope - so `user_id` arrives as a
//! path parameter, the way an API gateway would inject a verified
//! identity header upstream of this service in production.

mod handler;
mod routes;

pub use routes::ws_router;
