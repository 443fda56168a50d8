pub mod otp;
pub mod password;
pub mod repository;
pub mod session;
pub mod types;
