pub mod document;
pub mod profile;

pub use document::{DocumentKind, DOCX_MIME};
pub use profile::{non_blank, CompanyInfo, ContactDetails, UserProfile};
