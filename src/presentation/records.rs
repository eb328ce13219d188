// Plain-text rendering of clinic records
use crate::domain::records::{Consultation, ConsultationStatus, Patient, Prescription, Sender};
use crate::presentation::theme::Theme;
use std::fmt::Write;

fn field(output: &mut String, theme: &Theme, name: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    writeln!(output, "  {} {}", (theme.field)(&format!("{}:", name)), (theme.value)(value)).ok();
}

pub fn format_patient(patient: &Patient, theme: &Theme) -> String {
    let mut output = String::new();
    writeln!(output, "{} {}", (theme.title)(&patient.name), patient.id).ok();
    field(&mut output, theme, "CNIC", &patient.cnic);
    field(&mut output, theme, "Age", &patient.age.to_string());
    field(
        &mut output,
        theme,
        "Gender",
        &format!("{:?}", patient.gender).to_lowercase(),
    );
    field(&mut output, theme, "Blood type", &patient.blood_type);
    field(&mut output, theme, "Medical history", &patient.medical_history);
    field(&mut output, theme, "Allergies", &patient.allergies);
    field(&mut output, theme, "Previous treatments", &patient.previous_treatments);
    field(&mut output, theme, "Past prescriptions", &patient.past_prescriptions);
    if !patient.prescriptions.is_empty() {
        field(
            &mut output,
            theme,
            "Prescriptions",
            &patient.prescriptions.len().to_string(),
        );
    }
    output
}

pub fn format_prescription(prescription: &Prescription, theme: &Theme) -> String {
    let mut output = String::new();
    writeln!(
        output,
        "{} {}",
        (theme.title)(&prescription.id),
        prescription.date.format("%Y-%m-%d %H:%M")
    )
    .ok();

    let cutoff = "⸺".repeat(30);
    writeln!(output, "  {}", (theme.line)(&cutoff)).ok();
    for (i, med) in prescription.medicines.iter().enumerate() {
        writeln!(
            output,
            "  {}. {} {} · {} · {}",
            i + 1,
            (theme.value)(&med.name),
            med.dosage,
            med.frequency,
            med.duration
        )
        .ok();
    }
    field(&mut output, theme, "Instructions", &prescription.instructions);
    field(&mut output, theme, "Doctor notes", &prescription.doctor_notes);
    output
}

pub fn format_consultation(consultation: &Consultation, theme: &Theme) -> String {
    let mut output = String::new();
    let status = match consultation.status {
        ConsultationStatus::Active => "active",
        ConsultationStatus::Completed => "completed",
    };
    writeln!(
        output,
        "{} [{}] patient {}",
        (theme.title)(&consultation.id),
        status,
        consultation.patient_id
    )
    .ok();

    for message in &consultation.messages {
        let who = match message.sender {
            Sender::Doctor => "Doctor",
            Sender::Patient => "Patient",
            Sender::System => "System",
        };
        writeln!(
            output,
            "  {} {} {}",
            (theme.line)(&message.timestamp.format("%H:%M:%S").to_string()),
            (theme.field)(&format!("{}:", who)),
            message.content
        )
        .ok();
    }

    if let Some(notes) = &consultation.notes {
        field(&mut output, theme, "Notes", notes);
    }
    for med in &consultation.prescription {
        field(
            &mut output,
            theme,
            "Rx",
            &format!("{} {} {} {}", med.name, med.dosage, med.frequency, med.duration),
        );
    }
    output
}
