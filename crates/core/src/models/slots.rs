use serde::{Deserialize, Serialize};

/// Admin request to generate slots for several doctors over a date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSlotGenerationRequest {
    pub doctor_ids: Vec<String>,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `YYYY-MM-DD`
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSlotResult {
    pub doctor_id: String,
    pub success: bool,
    pub slots_generated: u32,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSlotGenerationResponse {
    pub start_date: String,
    pub end_date: String,
    pub total_doctors: u32,
    pub successful_generations: u32,
    pub failed_generations: u32,
    pub total_slots_generated: u32,
    #[serde(default)]
    pub results: Vec<DoctorSlotResult>,
    #[serde(default)]
    pub message: Option<String>,
}
