pub mod credential_validator;
pub mod password_service;
