//! JSON-file-backed company capability store.
//!
//! Each collection is one JSON document. Opening the store loads every file
//! into an in-memory mirror; each mutation appends to the mirror and
//! rewrites the whole file. Records are append-only. There is no internal
//! cross-process locking — a concurrent host must serialize mutating calls
//! per data file.

use std::path::Path;

use chrono::Local;
use parking_lot::RwLock;
use tracing::{info, warn};

use tenderkit_core::{DataPaths, Error, Result};

use crate::matcher;
use crate::types::*;

#[derive(Default)]
struct Collections {
    qualifications: Vec<Qualification>,
    cases: Vec<Case>,
    products: Vec<Product>,
    personnel: PersonnelBook,
}

/// The company capability database.
pub struct CompanyStore {
    paths: DataPaths,
    data: RwLock<Collections>,
}

impl CompanyStore {
    /// Open the store, creating empty data files when missing.
    pub fn open(paths: DataPaths) -> Result<Self> {
        let data = Collections {
            qualifications: load_doc::<QualificationsDoc>(&paths.qualifications_file)?
                .qualifications,
            cases: load_doc::<CasesDoc>(&paths.cases_file)?.cases,
            products: load_doc::<ProductsDoc>(&paths.products_file)?.products,
            personnel: load_doc::<PersonnelBook>(&paths.personnel_file)?,
        };
        info!(
            "company store loaded: {} qualifications, {} cases, {} products",
            data.qualifications.len(),
            data.cases.len(),
            data.products.len()
        );
        Ok(Self {
            paths,
            data: RwLock::new(data),
        })
    }

    // ---------------------------------------------------------------
    // Qualifications
    // ---------------------------------------------------------------

    pub fn get_qualifications(&self) -> Vec<Qualification> {
        self.data.read().qualifications.clone()
    }

    /// Qualifications that have not expired. A blank validity date means the
    /// certificate does not expire.
    pub fn get_valid_qualifications(&self) -> Vec<Qualification> {
        let today = Local::now().format("%Y-%m-%d").to_string();
        self.data
            .read()
            .qualifications
            .iter()
            .filter(|q| {
                let valid_until = q.valid_until.trim();
                valid_until.is_empty() || valid_until >= today.as_str()
            })
            .cloned()
            .collect()
    }

    /// Append a qualification record and persist the collection.
    pub fn add_qualification(
        &self,
        name: &str,
        level: &str,
        cert_no: &str,
        valid_until: &str,
        cert_file: &str,
    ) -> Result<Qualification> {
        let mut data = self.data.write();
        let record = Qualification {
            id: next_id(data.qualifications.iter().map(|q| q.id)),
            name: name.to_string(),
            level: level.to_string(),
            cert_no: cert_no.to_string(),
            valid_until: valid_until.to_string(),
            cert_file: cert_file.to_string(),
            created_at: now_stamp(),
        };
        data.qualifications.push(record.clone());
        save_doc(
            &self.paths.qualifications_file,
            &QualificationsDoc {
                qualifications: data.qualifications.clone(),
            },
        )?;
        Ok(record)
    }

    // ---------------------------------------------------------------
    // Cases
    // ---------------------------------------------------------------

    pub fn get_cases(&self) -> Vec<Case> {
        self.data.read().cases.clone()
    }

    /// Append a past-project case and persist the collection.
    #[allow(clippy::too_many_arguments)]
    pub fn add_case(
        &self,
        project_name: &str,
        client: &str,
        industry: &str,
        product_type: &str,
        amount: f64,
        year: i32,
        description: &str,
    ) -> Result<Case> {
        let mut data = self.data.write();
        let record = Case {
            id: next_id(data.cases.iter().map(|c| c.id)),
            project_name: project_name.to_string(),
            client: client.to_string(),
            industry: industry.to_string(),
            product_type: product_type.to_string(),
            amount,
            year,
            description: description.to_string(),
            created_at: now_stamp(),
        };
        data.cases.push(record.clone());
        save_doc(
            &self.paths.cases_file,
            &CasesDoc {
                cases: data.cases.clone(),
            },
        )?;
        Ok(record)
    }

    // ---------------------------------------------------------------
    // Products
    // ---------------------------------------------------------------

    pub fn get_products(&self) -> Vec<Product> {
        self.data.read().products.clone()
    }

    pub fn get_product_by_model(&self, model: &str) -> Option<Product> {
        let model_lower = model.to_lowercase();
        self.data
            .read()
            .products
            .iter()
            .find(|p| p.model.to_lowercase() == model_lower)
            .cloned()
    }

    /// Append a catalog product and persist the collection.
    pub fn add_product(
        &self,
        name: &str,
        model: &str,
        category: &str,
        description: &str,
        base_price: f64,
    ) -> Result<Product> {
        let mut data = self.data.write();
        let record = Product {
            id: next_id(data.products.iter().map(|p| p.id)),
            name: name.to_string(),
            model: model.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            base_price,
            created_at: now_stamp(),
        };
        data.products.push(record.clone());
        save_doc(
            &self.paths.products_file,
            &ProductsDoc {
                products: data.products.clone(),
            },
        )?;
        Ok(record)
    }

    // ---------------------------------------------------------------
    // Personnel
    // ---------------------------------------------------------------

    /// All personnel, optionally filtered by a role substring.
    pub fn get_personnel(&self, role: Option<&str>) -> Vec<Person> {
        let all = self.data.read().personnel.all();
        match role {
            Some(role) if !role.is_empty() => {
                let role_lower = role.to_lowercase();
                all.into_iter()
                    .filter(|p| p.role.to_lowercase().contains(&role_lower))
                    .collect()
            }
            _ => all,
        }
    }

    /// Append a person, routed into a bucket by role, and persist.
    pub fn add_personnel(
        &self,
        name: &str,
        role: &str,
        title: &str,
        experience: u32,
        certificates: Vec<String>,
    ) -> Result<Person> {
        let mut data = self.data.write();
        let bucket = bucket_for_role(role);
        let existing = match bucket {
            Bucket::Management => &data.personnel.management,
            Bucket::Engineers => &data.personnel.engineers,
            Bucket::Workers => &data.personnel.workers,
        };
        let record = Person {
            id: next_id(existing.iter().map(|p| p.id)),
            name: name.to_string(),
            role: role.to_string(),
            title: title.to_string(),
            experience,
            certificates,
            created_at: now_stamp(),
        };
        match bucket {
            Bucket::Management => data.personnel.management.push(record.clone()),
            Bucket::Engineers => data.personnel.engineers.push(record.clone()),
            Bucket::Workers => data.personnel.workers.push(record.clone()),
        }
        save_doc(&self.paths.personnel_file, &data.personnel)?;
        Ok(record)
    }

    // ---------------------------------------------------------------
    // Matching
    // ---------------------------------------------------------------

    /// Match stored qualifications against requirement text.
    pub fn match_qualifications(&self, requirements: &[String]) -> Vec<Qualification> {
        matcher::match_qualifications(requirements, &self.data.read().qualifications)
    }

    /// Match stored cases by product type. `industry` is accepted but does
    /// not constrain results.
    pub fn match_cases(
        &self,
        industry: Option<&str>,
        product_type: Option<&str>,
        min_amount: f64,
        limit: usize,
    ) -> Vec<Case> {
        matcher::match_cases(
            industry,
            product_type,
            min_amount,
            limit,
            &self.data.read().cases,
        )
    }

    /// Match stored products against free-text keywords.
    pub fn match_products(&self, keywords: &[String]) -> Vec<Product> {
        matcher::match_products(keywords, &self.data.read().products)
    }
}

#[derive(Clone, Copy)]
enum Bucket {
    Management,
    Engineers,
    Workers,
}

fn bucket_for_role(role: &str) -> Bucket {
    if role.contains("经理") || role.contains("总监") || role.contains("总经理") {
        Bucket::Management
    } else if role.contains("工程师") || role.contains("技术") {
        Bucket::Engineers
    } else {
        Bucket::Workers
    }
}

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0) + 1
}

fn now_stamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Load one JSON document, creating it with defaults when missing.
fn load_doc<T>(path: &Path) -> Result<T>
where
    T: Default + serde::Serialize + serde::de::DeserializeOwned,
{
    if !path.exists() {
        let doc = T::default();
        save_doc(path, &doc)?;
        info!("created data file {}", path.display());
        return Ok(doc);
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        warn!("failed to parse {}: {}", path.display(), e);
        Error::Store(format!("{}: {e}", path.display()))
    })
}

fn save_doc<T: serde::Serialize>(path: &Path, doc: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(doc)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (CompanyStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path()).unwrap();
        let store = CompanyStore::open(paths).unwrap();
        (store, dir)
    }

    #[test]
    fn test_open_creates_empty_files() {
        let (store, dir) = test_store();
        assert!(dir.path().join("qualifications.json").exists());
        assert!(dir.path().join("cases.json").exists());
        assert!(dir.path().join("products.json").exists());
        assert!(dir.path().join("personnel.json").exists());
        assert!(store.get_qualifications().is_empty());
    }

    #[test]
    fn test_add_qualification_assigns_sequential_ids() {
        let (store, _dir) = test_store();
        let a = store
            .add_qualification("电力工程施工总承包", "三级", "A001", "2027-01-01", "")
            .unwrap();
        let b = store
            .add_qualification("质量管理体系认证", "一级", "B002", "", "certs/b.pdf")
            .unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(!b.created_at.is_empty());
    }

    #[test]
    fn test_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        {
            let paths = DataPaths::new(dir.path()).unwrap();
            let store = CompanyStore::open(paths).unwrap();
            store
                .add_product("低压抽出式开关柜", "MNS", "低压开关柜", "", 120_000.0)
                .unwrap();
        }
        let paths = DataPaths::new(dir.path()).unwrap();
        let store = CompanyStore::open(paths).unwrap();
        let products = store.get_products();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].model, "MNS");
    }

    #[test]
    fn test_valid_qualifications_filter() {
        let (store, _dir) = test_store();
        store
            .add_qualification("已过期资质", "三级", "X", "2020-01-01", "")
            .unwrap();
        store
            .add_qualification("长期有效资质", "一级", "Y", "", "")
            .unwrap();
        store
            .add_qualification("未过期资质", "二级", "Z", "2099-12-31", "")
            .unwrap();
        let valid = store.get_valid_qualifications();
        let names: Vec<&str> = valid.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, ["长期有效资质", "未过期资质"]);
    }

    #[test]
    fn test_personnel_routing_and_filter() {
        let (store, _dir) = test_store();
        store
            .add_personnel("张三", "项目经理", "高级", 10, vec![])
            .unwrap();
        store
            .add_personnel("李四", "电气工程师", "中级", 5, vec![])
            .unwrap();
        store.add_personnel("王五", "装配工", "", 3, vec![]).unwrap();

        assert_eq!(store.get_personnel(None).len(), 3);
        let engineers = store.get_personnel(Some("工程师"));
        assert_eq!(engineers.len(), 1);
        assert_eq!(engineers[0].name, "李四");
    }

    #[test]
    fn test_get_product_by_model_case_insensitive() {
        let (store, _dir) = test_store();
        store
            .add_product("箱式变电站", "ZGS11", "预制舱", "", 0.0)
            .unwrap();
        assert!(store.get_product_by_model("zgs11").is_some());
        assert!(store.get_product_by_model("KYN28").is_none());
    }
}
