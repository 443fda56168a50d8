pub mod allergy;
pub mod directory;
pub mod emergency;
pub mod records;

use serde::de::DeserializeOwned;

use medrec_auth_types::identity::IdentityHeaders;
use medrec_domain::role::Role;

use crate::error::RecordsServiceError;

/// Reject callers whose forwarded role is not `role`.
pub(crate) fn require(identity: &IdentityHeaders, role: Role) -> Result<(), RecordsServiceError> {
    identity
        .require(role)
        .map_err(|_| RecordsServiceError::Forbidden)
}

/// Parse an optional query string; malformed input is `MissingData`.
pub(crate) fn parse_query<T>(raw_query: Option<&str>) -> Result<T, RecordsServiceError>
where
    T: DeserializeOwned + Default,
{
    raw_query
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| RecordsServiceError::MissingData)
        .map(Option::unwrap_or_default)
}
