use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

/// Doctor as shown in public listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub user_id: String,
    pub full_name: String,
    pub gender: Gender,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    pub qualification: String,
    pub years_of_experience: u32,
    pub consultation_fee: f64,
    pub specialty_name: String,
}

/// Bookable interval offered by a doctor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub slot_id: String,
    pub slot_date: String,
    pub start_time: String,
    pub end_time: String,
    pub is_available: bool,
}

/// Doctor profile with open slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDetail {
    pub user_id: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub gender: Gender,
    pub specialty_name: String,
    #[serde(default)]
    pub license_number: Option<String>,
    pub qualification: String,
    pub years_of_experience: u32,
    pub consultation_fee: f64,
    #[serde(default)]
    pub available_slots: Vec<TimeSlot>,
}

impl DoctorDetail {
    /// Slots that can still be booked
    pub fn open_slots(&self) -> impl Iterator<Item = &TimeSlot> {
        self.available_slots.iter().filter(|slot| slot.is_available)
    }
}
