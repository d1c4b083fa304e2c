use serde::{Deserialize, Serialize};

/// Career data collected from the user. Every field except `linkedin` and
/// `additional_info` is required before generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub job_role: String,
    pub education: String,
    pub work_experience: String,
    pub skills: String,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
}

/// Target-company details for the cover-letter path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub company_name: String,
    #[serde(default)]
    pub hiring_manager: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
}

/// Identity fields printed in document headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub linkedin: Option<String>,
}

impl UserProfile {
    /// Names of required fields that are empty after trimming, in form order.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("job_role", &self.job_role),
            ("education", &self.education),
            ("work_experience", &self.work_experience),
            ("skills", &self.skills),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn contact(&self) -> ContactDetails {
        ContactDetails {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            linkedin: non_blank(&self.linkedin).map(str::to_string),
        }
    }
}

/// Treats `Some("   ")` the same as `None`.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
