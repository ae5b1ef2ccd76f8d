//! Seed data loading from config.toml
//!
//! A brand new data file is populated with the product catalogue and the
//! employee roster listed here. When no seed file exists, or a section is
//! left out, the built-in catalogue of cylinder sizes and the built-in
//! roster of eight employees are used.

use crate::entities::{Employee, EmployeeStatus, Product};
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct SeedConfig {
    /// Product catalogue
    #[serde(default = "default_products")]
    pub products: Vec<ProductSeed>,
    /// Initial employee roster
    #[serde(default = "default_employees")]
    pub employees: Vec<EmployeeSeed>,
}

/// One product in the catalogue
#[derive(Debug, Deserialize, Clone)]
pub struct ProductSeed {
    /// Product id such as `prod_14kg`
    pub id: String,
    /// Display name, usually the cylinder size
    pub name: String,
    /// Price of one refill
    pub unit_cost: f64,
}

/// One employee on the initial roster
#[derive(Debug, Deserialize, Clone)]
pub struct EmployeeSeed {
    /// Employee id such as `emp_01`
    pub id: String,
    /// Full name
    pub name: String,
    /// Contact number
    #[serde(default)]
    pub phone: String,
    /// Seed as inactive instead of active
    #[serde(default)]
    pub inactive: bool,
    /// First working day
    pub join_date: NaiveDate,
    /// Date of birth, if known
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            products: default_products(),
            employees: default_employees(),
        }
    }
}

impl SeedConfig {
    /// Catalogue as stored products.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.products
            .iter()
            .map(|p| Product::new(&p.id, &p.name, p.unit_cost))
            .collect()
    }

    /// Roster as stored employees.
    #[must_use]
    pub fn employees(&self) -> Vec<Employee> {
        self.employees
            .iter()
            .map(|e| Employee {
                id: e.id.clone(),
                name: e.name.clone(),
                phone: e.phone.clone(),
                status: if e.inactive {
                    EmployeeStatus::Inactive
                } else {
                    EmployeeStatus::Active
                },
                join_date: e.join_date,
                birthday: e.birthday,
                notes: None,
                avatar_url: crate::core::employee::placeholder_avatar(&e.id),
                profile_picture: None,
                aadhar_card: None,
                designation: None,
                gender: None,
                address: None,
                track_attendance: None,
                employment_type: None,
                daily_pay_rate: None,
            })
            .collect()
    }
}

fn default_products() -> Vec<ProductSeed> {
    [
        ("prod_14kg", "14.2kg", 855.50),
        ("prod_10kg", "10kg", 611.50),
        ("prod_19kg", "19kg", 1704.00),
        ("prod_5kg", "5kg", 538.00),
        ("prod_47_5kg", "47.5kg", 4700.00),
    ]
    .into_iter()
    .map(|(id, name, unit_cost)| ProductSeed {
        id: id.to_string(),
        name: name.to_string(),
        unit_cost,
    })
    .collect()
}

fn default_employees() -> Vec<EmployeeSeed> {
    [
        ("emp_01", "John Doe", "9876543210", false, (2022, 1, 15), (1990, 5, 20)),
        ("emp_02", "Jane Smith", "9876543211", false, (2022, 3, 22), (1992, 8, 12)),
        ("emp_03", "Peter Jones", "9876543212", true, (2021, 11, 30), (1988, 11, 25)),
        ("emp_04", "Mary Johnson", "9876543213", false, (2023, 2, 10), (1995, 2, 18)),
        ("emp_05", "David Williams", "9876543214", false, (2023, 5, 19), (1993, 7, 30)),
        ("emp_06", "Sarah Brown", "9876543215", false, (2023, 6, 1), (1991, 9, 5)),
        ("emp_07", "Michael Davis", "9876543216", true, (2022, 8, 14), (1989, 12, 15)),
        ("emp_08", "Emily Wilson", "9876543217", false, (2023, 9, 20), (1996, 4, 22)),
    ]
    .into_iter()
    .filter_map(|(id, name, phone, inactive, (jy, jm, jd), (by, bm, bd))| {
        Some(EmployeeSeed {
            id: id.to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            inactive,
            join_date: NaiveDate::from_ymd_opt(jy, jm, jd)?,
            birthday: NaiveDate::from_ymd_opt(by, bm, bd),
        })
    })
    .collect()
}

/// Parses seed configuration from a TOML string.
///
/// # Errors
/// Returns an error if the TOML syntax is invalid or required fields are missing.
pub fn parse_seed_config(contents: &str) -> Result<SeedConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed config: {e}"),
    })
}

/// Loads seed configuration from a TOML file, falling back to the built-in
/// catalogue when the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_seed_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("Seed config {} not found, using built-in catalogue", path.display());
        return Ok(SeedConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read seed config {}: {e}", path.display()),
    })?;
    let config = parse_seed_config(&contents)?;
    info!(
        products = config.products.len(),
        employees = config.employees.len(),
        "Loaded seed config from {}",
        path.display()
    );
    Ok(config)
}
