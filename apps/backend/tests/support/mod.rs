#![allow(dead_code)]

pub mod app_builder;
pub mod factory;

pub use app_builder::create_test_app;
pub use factory::{bearer, register_and_login, test_security, test_state};
