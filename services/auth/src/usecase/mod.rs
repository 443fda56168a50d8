pub mod issuer;
pub mod login;
pub mod otp;
pub mod register;
pub mod streak;
