//! Models module - organized by storage layer and purpose
//!
//! - `db` - PostgreSQL models (`FromRow`-derived structs)
//! - `enums` - closed enums shared across storage layers (quiz status,
//!   elimination reason, media kind)

pub mod db;
pub mod enums;
