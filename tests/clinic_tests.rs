//! 病历存储与问诊流程测试

use signaid::application::clinic::ClinicService;
use signaid::domain::records::{
    ConsultationStatus, Gender, Medicine, NewPatient, NewPrescription, Patient, Sender,
};
use signaid::domain::traits::Repository;
use signaid::infrastructure::storage::db::SqliteStore;
use signaid::infrastructure::storage::memory::MemoryStore;
use signaid::infrastructure::storage::ClinicStore;
use std::sync::Arc;

fn new_patient(cnic: &str, name: &str) -> NewPatient {
    NewPatient {
        cnic: cnic.to_string(),
        name: name.to_string(),
        age: 34,
        gender: Gender::Female,
        medical_history: "Asthma".to_string(),
        allergies: "Penicillin".to_string(),
        previous_treatments: String::new(),
        blood_type: "B+".to_string(),
        past_prescriptions: String::new(),
    }
}

fn medicine(name: &str) -> Medicine {
    Medicine {
        name: name.to_string(),
        dosage: "500mg".to_string(),
        frequency: "twice daily".to_string(),
        duration: "5 days".to_string(),
    }
}

async fn register_and_lookup<S: ClinicStore>(clinic: &ClinicService<S>) {
    let resp = clinic
        .register_patient(new_patient("3520212345671", "Ayesha"))
        .await;
    assert!(resp.success, "{:?}", resp.error);
    let patient = resp.data.expect("patient");
    assert_eq!(patient.cnic, "35202-1234567-1");
    assert!(patient.id.starts_with("P-"));

    // 带不带横杠都能查到
    let by_plain = clinic.patient_by_cnic("3520212345671").await;
    let by_dashed = clinic.patient_by_cnic("35202-1234567-1").await;
    assert_eq!(by_plain.data.expect("plain").id, patient.id);
    assert_eq!(by_dashed.data.expect("dashed").id, patient.id);

    let by_id = clinic.patient_by_id(&patient.id).await;
    assert_eq!(by_id.data.expect("by id").name, "Ayesha");

    let duplicate = clinic
        .register_patient(new_patient("35202-1234567-1", "Someone Else"))
        .await;
    assert!(!duplicate.success);
    assert_eq!(
        duplicate.error.as_deref(),
        Some("Patient with this CNIC already exists")
    );

    assert_eq!(clinic.patient_count().await.expect("count"), 1);
}

async fn consultation_flow<S: ClinicStore>(clinic: &ClinicService<S>) {
    let patient = clinic
        .register_patient(new_patient("4210112345679", "Bilal"))
        .await
        .into_result()
        .expect("patient");

    let consultation = clinic
        .start_consultation(&patient.id)
        .await
        .into_result()
        .expect("consultation");
    assert_eq!(consultation.status, ConsultationStatus::Active);

    let msg = clinic
        .add_message(&consultation.id, Sender::Patient, "I have a headache")
        .await;
    assert!(msg.success);
    clinic
        .add_message(&consultation.id, Sender::Doctor, "Since when?")
        .await
        .into_result()
        .expect("doctor message");

    let noted = clinic
        .update_notes(&consultation.id, "Tension headache")
        .await
        .into_result()
        .expect("notes");
    assert_eq!(noted.notes.as_deref(), Some("Tension headache"));

    let prescribed = clinic
        .save_prescription(&consultation.id, vec![medicine("Paracetamol")], "After meals")
        .await
        .into_result()
        .expect("prescription");
    assert_eq!(prescribed.prescription.len(), 1);
    assert_eq!(prescribed.notes.as_deref(), Some("After meals"));

    let completed = clinic
        .complete_consultation(&consultation.id)
        .await
        .into_result()
        .expect("complete");
    assert_eq!(completed.status, ConsultationStatus::Completed);
    let completed_at = completed.completed_at.expect("completed_at");

    // 重复完成不会改时间
    let again = clinic
        .complete_consultation(&consultation.id)
        .await
        .into_result()
        .expect("complete again");
    assert_eq!(again.completed_at, Some(completed_at));

    let late = clinic
        .add_message(&consultation.id, Sender::Patient, "One more thing")
        .await;
    assert_eq!(
        late.error.as_deref(),
        Some("Consultation is already completed")
    );

    let stored = clinic
        .consultation(&consultation.id)
        .await
        .into_result()
        .expect("stored");
    assert_eq!(stored.messages.len(), 2);
    assert_eq!(stored.messages[0].sender, Sender::Patient);
    assert_eq!(stored.messages[1].content, "Since when?");
}

async fn prescription_flow<S: ClinicStore>(clinic: &ClinicService<S>) {
    let patient = clinic
        .register_patient(new_patient("6110112345673", "Sana"))
        .await
        .into_result()
        .expect("patient");

    for name in ["Amoxicillin", "Ibuprofen"] {
        let form = NewPrescription {
            patient_id: patient.id.clone(),
            medicines: vec![medicine(name)],
            instructions: "Finish the course".to_string(),
            doctor_notes: String::new(),
        };
        clinic
            .create_prescription(form)
            .await
            .into_result()
            .expect("prescription");
    }

    let list = clinic
        .patient_prescriptions(&patient.id)
        .await
        .into_result()
        .expect("list");
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].medicines[0].name, "Amoxicillin");
    assert_eq!(list[1].medicines[0].name, "Ibuprofen");

    let refreshed = clinic
        .patient_by_id(&patient.id)
        .await
        .into_result()
        .expect("patient");
    assert_eq!(refreshed.prescriptions.len(), 2);

    let other = clinic
        .patient_prescriptions("P-unknown")
        .await
        .into_result()
        .expect("empty list");
    assert!(other.is_empty());
}

#[tokio::test]
async fn test_memory_store_register_and_lookup() {
    let clinic = ClinicService::new(Arc::new(MemoryStore::new()));
    register_and_lookup(&clinic).await;
}

#[tokio::test]
async fn test_memory_store_consultation_flow() {
    let clinic = ClinicService::new(Arc::new(MemoryStore::new()));
    consultation_flow(&clinic).await;
}

#[tokio::test]
async fn test_memory_store_prescription_flow() {
    let clinic = ClinicService::new(Arc::new(MemoryStore::new()));
    prescription_flow(&clinic).await;
}

#[tokio::test]
async fn test_sqlite_store_full_flow() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SqliteStore::open(&dir.path().join("signaid.db"))
        .await
        .expect("open");
    let clinic = ClinicService::new(Arc::new(store));

    register_and_lookup(&clinic).await;
    consultation_flow(&clinic).await;
    prescription_flow(&clinic).await;
}

#[tokio::test]
async fn test_sqlite_store_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("signaid.db");

    let patient_id = {
        let store = SqliteStore::open(&path).await.expect("open");
        let clinic = ClinicService::new(Arc::new(store));
        clinic
            .register_patient(new_patient("3740512345675", "Hamza"))
            .await
            .into_result()
            .expect("patient")
            .id
    };

    let store = SqliteStore::open(&path).await.expect("reopen");
    assert_eq!(store.count("patients").await.expect("count"), 1);
    let patient = Repository::<Patient>::get(&store, &patient_id)
        .await
        .expect("get");
    assert_eq!(patient.expect("persisted").name, "Hamza");
}

#[tokio::test]
async fn test_registration_validation() {
    let clinic = ClinicService::new(Arc::new(MemoryStore::new()));

    let short = clinic.register_patient(new_patient("12345", "Zara")).await;
    assert_eq!(
        short.error.as_deref(),
        Some("CNIC must be 13 digits (xxxxx-xxxxxxx-x)")
    );

    let nameless = clinic
        .register_patient(new_patient("3520212345671", "  "))
        .await;
    assert_eq!(nameless.error.as_deref(), Some("Patient name is required"));

    let missing = clinic.patient_by_cnic("3520212345671").await;
    assert_eq!(missing.error.as_deref(), Some("Patient not found"));
}

#[tokio::test]
async fn test_unknown_ids_report_not_found() {
    let clinic = ClinicService::new(Arc::new(MemoryStore::new()));

    let start = clinic.start_consultation("P-missing").await;
    assert_eq!(start.error.as_deref(), Some("Patient not found"));

    let notes = clinic.update_notes("C-missing", "notes").await;
    assert_eq!(notes.error.as_deref(), Some("Consultation not found"));

    let message = clinic.add_message("C-missing", Sender::Doctor, "hello").await;
    assert_eq!(message.error.as_deref(), Some("Consultation not found"));

    let empty = clinic.add_message("C-missing", Sender::Doctor, "   ").await;
    assert_eq!(empty.error.as_deref(), Some("Message content is required"));

    let rx = clinic
        .create_prescription(NewPrescription {
            patient_id: "P-missing".to_string(),
            medicines: vec![medicine("Cetirizine")],
            instructions: String::new(),
            doctor_notes: String::new(),
        })
        .await;
    assert_eq!(rx.error.as_deref(), Some("Patient not found"));

    let no_meds = clinic
        .create_prescription(NewPrescription {
            patient_id: "P-missing".to_string(),
            medicines: Vec::new(),
            instructions: String::new(),
            doctor_notes: String::new(),
        })
        .await;
    assert_eq!(
        no_meds.error.as_deref(),
        Some("At least one medicine is required")
    );
}

#[tokio::test]
async fn test_memory_store_put_replaces_in_place() {
    let store = MemoryStore::new();
    let clinic = ClinicService::new(Arc::new(MemoryStore::new()));
    let patient = clinic
        .register_patient(new_patient("3520212345671", "Ayesha"))
        .await
        .into_result()
        .expect("patient");

    Repository::<Patient>::put(&store, &patient)
        .await
        .expect("put");
    let mut renamed = patient.clone();
    renamed.name = "Ayesha Khan".to_string();
    Repository::<Patient>::put(&store, &renamed)
        .await
        .expect("replace");

    assert_eq!(store.len(), 1);
    let all = |_: &Patient| true;
    let found = Repository::<Patient>::find(&store, &all)
        .await
        .expect("find");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Ayesha Khan");
}

#[test]
fn test_medicine_parsing() {
    let med: Medicine = "Paracetamol:500mg:twice daily:5 days".parse().expect("parse");
    assert_eq!(med, medicine("Paracetamol"));

    assert!("Paracetamol:500mg".parse::<Medicine>().is_err());
    assert!(":500mg:daily:1 day".parse::<Medicine>().is_err());
}

#[test]
fn test_gender_and_sender_parsing() {
    assert_eq!("F".parse::<Gender>().expect("gender"), Gender::Female);
    assert_eq!("other".parse::<Gender>().expect("gender"), Gender::Other);
    assert!("unknown".parse::<Gender>().is_err());
    assert_eq!("Doctor".parse::<Sender>().expect("sender"), Sender::Doctor);
}
