use poem_openapi::Object;

/// Placeholder returned in place of every private field when access
/// is denied.
pub const MASKED_VALUE: &str = "********";

/// Candidate contact fields as disclosed to an authorized employer
#[derive(Object, Debug, Clone)]
pub struct ContactFieldsView {
    /// Phone number
    pub phone: Option<String>,

    /// Portfolio link
    pub portfolio_url: Option<String>,

    /// CV file reference
    pub cv_reference: Option<String>,
}

impl ContactFieldsView {
    /// Fixed-length placeholders; real values are never fetched when
    /// access is denied.
    pub fn masked() -> Self {
        Self {
            phone: Some(MASKED_VALUE.to_string()),
            portfolio_url: Some(MASKED_VALUE.to_string()),
            cv_reference: Some(MASKED_VALUE.to_string()),
        }
    }
}

/// Response model for the contact disclosure endpoint
#[derive(Object, Debug)]
pub struct ContactDisclosureView {
    /// The candidate's contact fields
    pub contact: ContactFieldsView,

    /// Authorization path that granted access:
    /// "active-application" or "accepted-request"
    pub via: String,
}

/// Response model for the explicit-consent-only contact endpoint
#[derive(Object, Debug)]
pub struct ContactByRequestView {
    /// Whether an accepted contact request grants access
    pub has_access: bool,

    /// Contact fields, present only when access is granted
    pub contact: Option<ContactFieldsView>,
}
