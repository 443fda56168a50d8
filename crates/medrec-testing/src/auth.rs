//! Mock identity helpers for integration tests.
//!
//! Services behind the gateway receive `x-medrec-user-id` + `x-medrec-user-role`
//! headers. Tests build them here instead of running the auth service.

use http::HeaderMap;

use medrec_auth_types::identity::IdentityHeaders;
use medrec_domain::id::AccountId;
use medrec_domain::role::Role;

pub const TEST_PATIENT_ID: &str = "PAT0000AAAA";
pub const TEST_DOCTOR_ID: &str = "DOC0000BBBB";

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub identity: IdentityHeaders,
}

impl MockAuth {
    pub fn new(user_id: &str, role: Role) -> Self {
        let user_id: AccountId = user_id
            .parse()
            .unwrap_or_else(|e| panic!("bad test account id: {e}"));
        Self {
            identity: IdentityHeaders { user_id, role },
        }
    }

    pub fn patient() -> Self {
        Self::new(TEST_PATIENT_ID, Role::Patient)
    }

    pub fn doctor() -> Self {
        Self::new(TEST_DOCTOR_ID, Role::Doctor)
    }

    /// Headers as the gateway would forward them.
    pub fn headers(&self) -> HeaderMap {
        self.identity.to_headers()
    }
}
