use crate::domain::records::{Gender, Medicine, Sender};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "signaid")]
#[command(about = "Sign-language translation and patient intake for SignAid consultations.")]
#[command(version)]
pub struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Choose color theme
    #[arg(short = 'T', long, global = true)]
    pub theme: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Override the translation backend URL
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Translate an English sentence to PSL
    Translate {
        /// Also print placeholder SiGML for the translation
        #[arg(long)]
        sigml: bool,

        #[arg(num_args = 1..)]
        sentence: Vec<String>,
    },

    /// Look up the HamNoSys representation of a word
    Lexicon {
        /// Also print placeholder SiGML for the word
        #[arg(long)]
        sigml: bool,

        word: String,
    },

    /// Submit every dictated line from stdin
    Dictate {
        /// Look up each utterance as a word instead of translating it
        #[arg(long)]
        lexicon: bool,
    },

    /// Patient records
    #[command(subcommand)]
    Patient(PatientCommand),

    /// Consultations
    #[command(subcommand)]
    Consult(ConsultCommand),

    /// Write a prescription for a patient
    Prescribe {
        patient_id: String,

        /// name:dosage:frequency:duration (repeatable)
        #[arg(short, long = "medicine", required = true)]
        medicines: Vec<Medicine>,

        #[arg(long, default_value = "")]
        instructions: String,

        #[arg(long, default_value = "")]
        notes: String,
    },
}

#[derive(Subcommand)]
pub enum PatientCommand {
    /// Register a new patient
    Register {
        #[arg(long)]
        cnic: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        age: u32,

        #[arg(long)]
        gender: Gender,

        #[arg(long, default_value = "")]
        blood_type: String,

        #[arg(long, default_value = "")]
        medical_history: String,

        #[arg(long, default_value = "")]
        allergies: String,

        #[arg(long, default_value = "")]
        previous_treatments: String,

        #[arg(long, default_value = "")]
        past_prescriptions: String,
    },

    /// Look up a patient by CNIC
    Show { cnic: String },

    /// List a patient's prescriptions
    Prescriptions { patient_id: String },
}

#[derive(Subcommand)]
pub enum ConsultCommand {
    /// Start a consultation for a patient id
    Start { patient_id: String },

    /// Show a consultation transcript
    Show { consultation_id: String },

    /// Add a message to the transcript
    Say {
        consultation_id: String,

        #[arg(long = "as", default_value = "patient")]
        sender: Sender,

        #[arg(num_args = 1..)]
        message: Vec<String>,
    },

    /// Replace the consultation notes
    Notes {
        consultation_id: String,

        #[arg(num_args = 1..)]
        notes: Vec<String>,
    },

    /// Attach a prescription to the consultation
    Prescribe {
        consultation_id: String,

        #[arg(short, long = "medicine", required = true)]
        medicines: Vec<Medicine>,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Mark the consultation completed
    Complete { consultation_id: String },
}
