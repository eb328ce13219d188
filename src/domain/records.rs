use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Anything a [`Repository`](crate::domain::traits::Repository) can hold.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Name of the collection the record lives in
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" | "o" => Ok(Gender::Other),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub id: String,
    pub cnic: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    #[serde(default)]
    pub medical_history: String,
    #[serde(default)]
    pub allergies: String,
    #[serde(default)]
    pub previous_treatments: String,
    #[serde(default)]
    pub blood_type: String,
    #[serde(default)]
    pub past_prescriptions: String,
    #[serde(default)]
    pub prescriptions: Vec<Prescription>,
    pub registered_at: DateTime<Utc>,
}

impl Record for Patient {
    const COLLECTION: &'static str = "patients";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Registration form, before an id is assigned
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPatient {
    pub cnic: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    #[serde(default)]
    pub medical_history: String,
    #[serde(default)]
    pub allergies: String,
    #[serde(default)]
    pub previous_treatments: String,
    #[serde(default)]
    pub blood_type: String,
    #[serde(default)]
    pub past_prescriptions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Medicine {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

impl std::str::FromStr for Medicine {
    type Err = String;

    // name:dosage:frequency:duration
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        match parts.as_slice() {
            [name, dosage, frequency, duration] if !name.is_empty() => Ok(Medicine {
                name: name.to_string(),
                dosage: dosage.to_string(),
                frequency: frequency.to_string(),
                duration: duration.to_string(),
            }),
            _ => Err(format!(
                "Invalid medicine '{}', expected name:dosage:frequency:duration",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prescription {
    pub id: String,
    pub patient_id: String,
    pub date: DateTime<Utc>,
    pub medicines: Vec<Medicine>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub doctor_notes: String,
}

impl Record for Prescription {
    const COLLECTION: &'static str = "prescriptions";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPrescription {
    pub patient_id: String,
    pub medicines: Vec<Medicine>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub doctor_notes: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Doctor,
    Patient,
    System,
}

impl std::str::FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "doctor" => Ok(Sender::Doctor),
            "patient" => Ok(Sender::Patient),
            "system" => Ok(Sender::System),
            _ => Err(format!("Unknown sender: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    Active,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Consultation {
    pub id: String,
    pub patient_id: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub prescription: Vec<Medicine>,
    pub notes: Option<String>,
    pub status: ConsultationStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Record for Consultation {
    const COLLECTION: &'static str = "consultations";

    fn id(&self) -> &str {
        &self.id
    }
}
