//! Database error translation shared by the SeaORM adapters.

pub mod db_errors;
