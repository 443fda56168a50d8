//! Auth types shared across MedRec services.
//!
//! Provides the session cookie builders and the `IdentityHeaders` extractor
//! for gateway-forwarded identity.

pub mod cookie;
pub mod identity;
