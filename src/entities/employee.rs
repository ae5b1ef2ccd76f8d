//! Employee entity - Delivery staff and office workers.
//!
//! Employees carry cylinders out to customers; their deliveries and dues are
//! recorded per day in [`super::DailyRecord`]. Only `id`, `name`, `phone`,
//! `status`, `joinDate` and `avatarUrl` are always present, the rest is HR
//! detail filled in from the employee form.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Employment status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    /// Currently working
    #[default]
    Active,
    /// Left or suspended
    Inactive,
}

/// Employee record as stored
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier such as `emp_01`
    pub id: String,
    /// Full name
    pub name: String,
    /// Contact number
    pub phone: String,
    /// Employment status
    pub status: EmployeeStatus,
    /// First working day
    pub join_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Avatar shown in tables
    pub avatar_url: String,
    /// Public path of an uploaded profile picture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    /// Public path of an uploaded Aadhaar card scan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aadhar_card: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_attendance: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_pay_rate: Option<f64>,
}

/// Payload for creating an employee; server fills in what is missing.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub status: Option<EmployeeStatus>,
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub aadhar_card: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub track_attendance: Option<bool>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub daily_pay_rate: Option<f64>,
}

/// Partial update; absent fields are left untouched.
///
/// Optional profile fields are doubly optional: an explicit `null` clears the
/// stored value, a missing key keeps it.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub join_date: Option<NaiveDate>,
    pub avatar_url: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub birthday: Option<Option<NaiveDate>>,
    #[serde(deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    pub profile_picture: Option<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    pub aadhar_card: Option<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    pub designation: Option<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    pub gender: Option<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    pub address: Option<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    pub track_attendance: Option<Option<bool>>,
    #[serde(deserialize_with = "nullable")]
    pub employment_type: Option<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    pub daily_pay_rate: Option<Option<f64>>,
}

/// A present key, `null` or not, becomes `Some`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Employee {
    /// Whether the employee is currently working.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// Shallow-merges the provided fields into this record.
    pub fn apply(&mut self, patch: EmployeePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(join_date) = patch.join_date {
            self.join_date = join_date;
        }
        if let Some(avatar_url) = patch.avatar_url {
            self.avatar_url = avatar_url;
        }
        merge(&mut self.birthday, patch.birthday);
        merge(&mut self.notes, patch.notes);
        merge(&mut self.profile_picture, patch.profile_picture);
        merge(&mut self.aadhar_card, patch.aadhar_card);
        merge(&mut self.designation, patch.designation);
        merge(&mut self.gender, patch.gender);
        merge(&mut self.address, patch.address);
        merge(&mut self.track_attendance, patch.track_attendance);
        merge(&mut self.employment_type, patch.employment_type);
        merge(&mut self.daily_pay_rate, patch.daily_pay_rate);
    }
}

fn merge<T>(slot: &mut Option<T>, value: Option<Option<T>>) {
    if let Some(value) = value {
        *slot = value;
    }
}
