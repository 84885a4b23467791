pub mod identity_middleware;
pub mod login;
pub mod token_service;
