use crate::application::cnic::{format_cnic, validate_cnic};
use crate::domain::error::SignAidError;
use crate::domain::model::ApiResponse;
use crate::domain::records::{
    Consultation, ConsultationStatus, Medicine, Message, NewPatient, NewPrescription, Patient,
    Prescription, Record, Sender,
};
use crate::domain::traits::Repository;
use crate::infrastructure::storage::ClinicStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

const PATIENT_NOT_FOUND: &str = "Patient not found";
const CONSULTATION_NOT_FOUND: &str = "Consultation not found";

fn new_id(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &id[..8])
}

// 存储层错误统一记录日志，对外只返回操作级别的提示
fn respond<T>(context: &str, res: Result<ApiResponse<T>, SignAidError>) -> ApiResponse<T> {
    match res {
        Ok(response) => response,
        Err(e) => {
            error!("{}: {}", context, e);
            ApiResponse::err(context)
        }
    }
}

/// Patient intake, consultation and prescription records
pub struct ClinicService<S: ClinicStore + ?Sized> {
    store: Arc<S>,
}

impl<S: ClinicStore + ?Sized> Clone for ClinicService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ClinicStore + ?Sized> ClinicService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn load<T: Record>(&self, id: &str) -> Result<Option<T>, SignAidError>
    where
        S: Repository<T>,
    {
        Repository::<T>::get(self.store.as_ref(), id).await
    }

    async fn save<T: Record>(&self, record: &T) -> Result<(), SignAidError>
    where
        S: Repository<T>,
    {
        Repository::<T>::put(self.store.as_ref(), record).await
    }

    async fn find_patient_by_cnic(&self, cnic: &str) -> Result<Option<Patient>, SignAidError> {
        let cnic = cnic.to_string();
        let filter = move |p: &Patient| p.cnic == cnic;
        let mut found = Repository::<Patient>::find(self.store.as_ref(), &filter).await?;
        Ok(if found.is_empty() {
            None
        } else {
            Some(found.remove(0))
        })
    }

    pub async fn register_patient(&self, form: NewPatient) -> ApiResponse<Patient> {
        let cnic = match validate_cnic(&form.cnic) {
            Ok(cnic) => cnic,
            Err(e) => return ApiResponse::err(e.to_string()),
        };
        if form.name.trim().is_empty() {
            return ApiResponse::err("Patient name is required");
        }

        let res = async {
            if self.find_patient_by_cnic(&cnic).await?.is_some() {
                return Ok(ApiResponse::err("Patient with this CNIC already exists"));
            }

            let patient = Patient {
                id: new_id("P"),
                cnic,
                name: form.name.trim().to_string(),
                age: form.age,
                gender: form.gender,
                medical_history: form.medical_history,
                allergies: form.allergies,
                previous_treatments: form.previous_treatments,
                blood_type: form.blood_type,
                past_prescriptions: form.past_prescriptions,
                prescriptions: Vec::new(),
                registered_at: Utc::now(),
            };
            self.save(&patient).await?;
            info!("Registered patient {}", patient.id);
            Ok::<_, SignAidError>(ApiResponse::ok(patient))
        }
        .await;

        respond("Failed to register patient", res)
    }

    pub async fn patient_by_cnic(&self, cnic: &str) -> ApiResponse<Patient> {
        if let Err(e) = validate_cnic(cnic) {
            return ApiResponse::err(e.to_string());
        }

        let res = async {
            Ok::<_, SignAidError>(match self.find_patient_by_cnic(&format_cnic(cnic)).await? {
                Some(patient) => ApiResponse::ok(patient),
                None => ApiResponse::err(PATIENT_NOT_FOUND),
            })
        }
        .await;

        respond("Failed to fetch patient data", res)
    }

    pub async fn patient_by_id(&self, id: &str) -> ApiResponse<Patient> {
        let res = async {
            Ok::<_, SignAidError>(match self.load::<Patient>(id).await? {
                Some(patient) => ApiResponse::ok(patient),
                None => ApiResponse::err(PATIENT_NOT_FOUND),
            })
        }
        .await;

        respond("Failed to fetch patient data", res)
    }

    pub async fn patient_count(&self) -> Result<usize, SignAidError> {
        let all = |_: &Patient| true;
        Ok(Repository::<Patient>::find(self.store.as_ref(), &all)
            .await?
            .len())
    }

    pub async fn start_consultation(&self, patient_id: &str) -> ApiResponse<Consultation> {
        let res = async {
            if self.load::<Patient>(patient_id).await?.is_none() {
                return Ok(ApiResponse::err(PATIENT_NOT_FOUND));
            }

            let consultation = Consultation {
                id: new_id("C"),
                patient_id: patient_id.to_string(),
                messages: Vec::new(),
                prescription: Vec::new(),
                notes: None,
                status: ConsultationStatus::Active,
                started_at: Utc::now(),
                completed_at: None,
            };
            self.save(&consultation).await?;
            info!("Started consultation {} for {}", consultation.id, patient_id);
            Ok::<_, SignAidError>(ApiResponse::ok(consultation))
        }
        .await;

        respond("Failed to start consultation", res)
    }

    pub async fn consultation(&self, consultation_id: &str) -> ApiResponse<Consultation> {
        let res = async {
            Ok::<_, SignAidError>(match self.load::<Consultation>(consultation_id).await? {
                Some(consultation) => ApiResponse::ok(consultation),
                None => ApiResponse::err(CONSULTATION_NOT_FOUND),
            })
        }
        .await;

        respond("Failed to fetch consultation", res)
    }

    /// Load, mutate and store a consultation in one step
    async fn modify_consultation<F>(
        &self,
        consultation_id: &str,
        context: &str,
        apply: F,
    ) -> ApiResponse<Consultation>
    where
        F: FnOnce(&mut Consultation) -> Result<(), String> + Send,
    {
        let res = async {
            let Some(mut consultation) = self.load::<Consultation>(consultation_id).await? else {
                return Ok(ApiResponse::err(CONSULTATION_NOT_FOUND));
            };
            if let Err(msg) = apply(&mut consultation) {
                return Ok(ApiResponse::err(msg));
            }
            self.save(&consultation).await?;
            Ok::<_, SignAidError>(ApiResponse::ok(consultation))
        }
        .await;

        respond(context, res)
    }

    pub async fn add_message(
        &self,
        consultation_id: &str,
        sender: Sender,
        content: &str,
    ) -> ApiResponse<Message> {
        let content = content.trim();
        if content.is_empty() {
            return ApiResponse::err("Message content is required");
        }

        let message = Message {
            id: new_id("M"),
            sender,
            content: content.to_string(),
            timestamp: Utc::now(),
        };
        let pushed = message.clone();
        let res = self
            .modify_consultation(consultation_id, "Failed to add message", move |c| {
                if c.status == ConsultationStatus::Completed {
                    return Err("Consultation is already completed".to_string());
                }
                c.messages.push(pushed);
                Ok(())
            })
            .await;

        match res.into_result() {
            Ok(_) => ApiResponse::ok(message),
            Err(e) => ApiResponse::err(e),
        }
    }

    pub async fn update_notes(&self, consultation_id: &str, notes: &str) -> ApiResponse<Consultation> {
        let notes = notes.to_string();
        self.modify_consultation(consultation_id, "Failed to update notes", move |c| {
            c.notes = Some(notes);
            Ok(())
        })
        .await
    }

    pub async fn save_prescription(
        &self,
        consultation_id: &str,
        medicines: Vec<Medicine>,
        notes: &str,
    ) -> ApiResponse<Consultation> {
        let notes = notes.to_string();
        self.modify_consultation(consultation_id, "Failed to save prescription", move |c| {
            c.prescription = medicines;
            c.notes = Some(notes);
            Ok(())
        })
        .await
    }

    /// Mark a consultation completed; completing twice keeps the first timestamp
    pub async fn complete_consultation(&self, consultation_id: &str) -> ApiResponse<Consultation> {
        self.modify_consultation(consultation_id, "Failed to complete consultation", |c| {
            if c.status != ConsultationStatus::Completed {
                c.status = ConsultationStatus::Completed;
                c.completed_at = Some(Utc::now());
            }
            Ok(())
        })
        .await
    }

    pub async fn create_prescription(&self, form: NewPrescription) -> ApiResponse<Prescription> {
        if form.medicines.is_empty() {
            return ApiResponse::err("At least one medicine is required");
        }

        let res = async {
            let Some(mut patient) = self.load::<Patient>(&form.patient_id).await? else {
                return Ok(ApiResponse::err(PATIENT_NOT_FOUND));
            };

            let prescription = Prescription {
                id: new_id("RX"),
                patient_id: form.patient_id,
                date: Utc::now(),
                medicines: form.medicines,
                instructions: form.instructions,
                doctor_notes: form.doctor_notes,
            };
            self.save(&prescription).await?;

            patient.prescriptions.push(prescription.clone());
            self.save(&patient).await?;

            info!("Created prescription {} for {}", prescription.id, patient.id);
            Ok::<_, SignAidError>(ApiResponse::ok(prescription))
        }
        .await;

        respond("Failed to create prescription", res)
    }

    pub async fn patient_prescriptions(&self, patient_id: &str) -> ApiResponse<Vec<Prescription>> {
        let patient_id = patient_id.to_string();
        let filter = move |p: &Prescription| p.patient_id == patient_id;
        let res = Repository::<Prescription>::find(self.store.as_ref(), &filter)
            .await
            .map(ApiResponse::ok);

        respond("Failed to fetch prescriptions", res)
    }
}
