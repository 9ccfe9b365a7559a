//! TenderKit Store — JSON-file-backed company capability store and the
//! capability matcher.

pub mod matcher;
pub mod store;
pub mod types;

pub use matcher::{match_cases, match_products, match_qualifications};
pub use store::CompanyStore;
pub use types::{Case, Person, PersonnelBook, Product, Qualification};
