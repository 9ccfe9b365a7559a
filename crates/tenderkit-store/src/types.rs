//! Capability store record types, matching the on-disk JSON layouts.

use serde::{Deserialize, Serialize};

/// A company-held certification/license record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Qualification {
    pub id: u64,
    pub name: String,
    pub level: String,
    #[serde(default)]
    pub cert_no: String,
    /// ISO date, or empty when the certificate does not expire.
    #[serde(default)]
    pub valid_until: String,
    /// Relative path to the scanned certificate, or empty.
    #[serde(default)]
    pub cert_file: String,
    #[serde(default)]
    pub created_at: String,
}

/// A past-project record used as a track-record reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: u64,
    pub project_name: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: String,
}

/// A catalog product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub base_price: f64,
    #[serde(default)]
    pub created_at: String,
}

/// A personnel roster entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub title: String,
    /// Years of experience.
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub certificates: Vec<String>,
    #[serde(default)]
    pub created_at: String,
}

/// The personnel file groups people by role bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonnelBook {
    #[serde(default)]
    pub management: Vec<Person>,
    #[serde(default)]
    pub engineers: Vec<Person>,
    #[serde(default)]
    pub workers: Vec<Person>,
}

impl PersonnelBook {
    /// All entries across the three buckets, bucket order preserved.
    pub fn all(&self) -> Vec<Person> {
        let mut out = Vec::with_capacity(
            self.management.len() + self.engineers.len() + self.workers.len(),
        );
        out.extend(self.management.iter().cloned());
        out.extend(self.engineers.iter().cloned());
        out.extend(self.workers.iter().cloned());
        out
    }
}

// One wrapper per on-disk document.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct QualificationsDoc {
    #[serde(default)]
    pub qualifications: Vec<Qualification>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct CasesDoc {
    #[serde(default)]
    pub cases: Vec<Case>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct ProductsDoc {
    #[serde(default)]
    pub products: Vec<Product>,
}
