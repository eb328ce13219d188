// Main entry point
use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use signaid::application::coordinator::Coordinator;
use signaid::application::sigml::{text_to_sigml, LogPlayer};
use signaid::application::speech::Transcript;
use signaid::domain::model::{ApiResponse, RequestKind};
use signaid::domain::records::{NewPatient, NewPrescription, Sender};
use signaid::domain::traits::{SigmlPlayer, SpeechRecognizer, SpeechResult};
use signaid::infrastructure::config::{self, load_config, Config};
use signaid::infrastructure::logging::init_logging;
use signaid::infrastructure::speech::LineRecognizer;
use signaid::infrastructure::storage::db::SqliteStore;
use signaid::infrastructure::storage::memory::MemoryStore;
use signaid::infrastructure::storage::ClinicStore;
use signaid::interfaces::cli::{Cli, Command, ConsultCommand, PatientCommand};
use signaid::presentation::records::{format_consultation, format_patient, format_prescription};
use signaid::presentation::theme::Theme;
use signaid::presentation::view::TerminalView;
use signaid::state::AppState;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = load_config()?;

    if let Some(backend) = &cli.backend {
        config.backend.base_url = backend.clone();
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }

    let store = open_store(&config).await?;
    let state = AppState::new(store, config.clone())?;

    // Load theme
    let theme_name = cli.theme.as_deref().unwrap_or(config.theme.as_str());
    let theme = Theme::from_name(theme_name);

    if cli.status {
        print_status(&state).await?;
        return Ok(());
    }

    let Some(command) = cli.command else {
        eprintln!("{}", "Please provide a command (see --help)".red());
        std::process::exit(1);
    };

    match command {
        Command::Translate { sigml, sentence } => {
            let text = sentence.join(" ");
            run_submission(&state, theme, RequestKind::Sentence, &text, sigml, cli.json).await
        }
        Command::Lexicon { sigml, word } => {
            run_submission(&state, theme, RequestKind::Word, &word, sigml, cli.json).await
        }
        Command::Dictate { lexicon } => {
            let kind = if lexicon {
                RequestKind::Word
            } else {
                RequestKind::Sentence
            };
            run_dictation(&state, theme, kind, cli.json).await
        }
        Command::Patient(cmd) => run_patient(&state, &theme, cmd, cli.json).await,
        Command::Consult(cmd) => run_consult(&state, &theme, cmd, cli.json).await,
        Command::Prescribe {
            patient_id,
            medicines,
            instructions,
            notes,
        } => {
            let form = NewPrescription {
                patient_id,
                medicines,
                instructions,
                doctor_notes: notes,
            };
            let resp = state.clinic().create_prescription(form).await;
            print_response(resp, cli.json, |p| format_prescription(p, &theme))
        }
    }
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn ClinicStore>> {
    if config.storage.in_memory {
        return Ok(Arc::new(MemoryStore::new()));
    }

    let db_path = config::get_database_path(config);
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(Arc::new(SqliteStore::open(&db_path).await?))
}

/// First Ctrl-C aborts the in-flight request; with nothing in flight it exits.
fn abort_on_ctrl_c(coordinator: Arc<Coordinator>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("Failed to listen for shutdown signal: {}", e);
                return;
            }
            if !coordinator.abort() {
                eprintln!("\n收到中断信号，正在退出...");
                std::process::exit(130);
            }
        }
    })
}

fn spawn_view(
    coordinator: &Coordinator,
    theme: Theme,
    enable_emoji: bool,
    json: bool,
) -> Option<JoinHandle<()>> {
    if json {
        return None;
    }
    let view = TerminalView::new(theme, enable_emoji);
    Some(tokio::spawn(view.run(coordinator.subscribe())))
}

async fn run_submission(
    state: &AppState,
    theme: Theme,
    kind: RequestKind,
    text: &str,
    sigml: bool,
    json: bool,
) -> anyhow::Result<()> {
    let enable_emoji = state.config.read().await.enable_emoji;
    let coordinator = Arc::new(state.coordinator().await?);
    let view_task = spawn_view(&coordinator, theme, enable_emoji, json);
    let signal_task = abort_on_ctrl_c(Arc::clone(&coordinator));

    let result = coordinator.submit(kind, text).await;

    // Dropping the last coordinator handle closes the view's channel
    signal_task.abort();
    let _ = signal_task.await;
    drop(coordinator);
    if let Some(task) = view_task {
        task.await?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    if sigml {
        if let Some(payload) = &result.payload {
            let source = match kind {
                RequestKind::Sentence => payload.as_str(),
                RequestKind::Word => text,
            };
            let doc = text_to_sigml(source);
            let player = LogPlayer;
            player.load("sigml-player");
            player.play(&doc);
            println!("{}", doc);
        }
    }

    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_dictation(
    state: &AppState,
    theme: Theme,
    kind: RequestKind,
    json: bool,
) -> anyhow::Result<()> {
    let (language, enable_emoji) = {
        let config = state.config.read().await;
        (config.speech.language.clone(), config.enable_emoji)
    };

    let recognizer = LineRecognizer::stdin(language);
    let (tx, mut rx) = mpsc::unbounded_channel::<SpeechResult>();
    recognizer.on_result(Box::new(move |result| {
        let _ = tx.send(result);
    }));

    let coordinator = Arc::new(state.coordinator().await?);
    let view_task = spawn_view(&coordinator, theme, enable_emoji, json);
    let signal_task = abort_on_ctrl_c(Arc::clone(&coordinator));

    recognizer.start().await?;
    eprintln!(
        "{}",
        "Listening: one utterance per line, Ctrl-D to finish".bright_black()
    );

    let mut transcript = Transcript::new();
    while let Some(result) = rx.recv().await {
        transcript.apply(&result);
        if !result.is_final {
            continue;
        }

        let utterance = transcript.take();
        let outcome = coordinator.submit(kind, &utterance).await;
        if json {
            println!("{}", serde_json::to_string(&outcome)?);
        }
    }

    recognizer.stop().await?;
    signal_task.abort();
    let _ = signal_task.await;
    drop(coordinator);
    if let Some(task) = view_task {
        task.await?;
    }

    Ok(())
}

fn print_response<T: Serialize>(
    resp: ApiResponse<T>,
    json: bool,
    render: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        let success = resp.success;
        println!("{}", serde_json::to_string_pretty(&resp)?);
        if !success {
            std::process::exit(1);
        }
        return Ok(());
    }

    match resp.into_result() {
        Ok(data) => print!("{}", render(&data)),
        Err(e) => {
            eprintln!("{}", format!("✘ {}", e).red());
            std::process::exit(1);
        }
    }
    Ok(())
}

async fn run_patient(
    state: &AppState,
    theme: &Theme,
    cmd: PatientCommand,
    json: bool,
) -> anyhow::Result<()> {
    let clinic = state.clinic();
    match cmd {
        PatientCommand::Register {
            cnic,
            name,
            age,
            gender,
            blood_type,
            medical_history,
            allergies,
            previous_treatments,
            past_prescriptions,
        } => {
            let form = NewPatient {
                cnic,
                name,
                age,
                gender,
                medical_history,
                allergies,
                previous_treatments,
                blood_type,
                past_prescriptions,
            };
            let resp = clinic.register_patient(form).await;
            print_response(resp, json, |p| format_patient(p, theme))
        }
        PatientCommand::Show { cnic } => {
            let resp = clinic.patient_by_cnic(&cnic).await;
            print_response(resp, json, |p| format_patient(p, theme))
        }
        PatientCommand::Prescriptions { patient_id } => {
            let resp = clinic.patient_prescriptions(&patient_id).await;
            print_response(resp, json, |list| {
                if list.is_empty() {
                    return "No prescriptions\n".to_string();
                }
                list.iter()
                    .map(|p| format_prescription(p, theme))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
    }
}

async fn run_consult(
    state: &AppState,
    theme: &Theme,
    cmd: ConsultCommand,
    json: bool,
) -> anyhow::Result<()> {
    let clinic = state.clinic();
    match cmd {
        ConsultCommand::Start { patient_id } => {
            let resp = clinic.start_consultation(&patient_id).await;
            print_response(resp, json, |c| format_consultation(c, theme))
        }
        ConsultCommand::Show { consultation_id } => {
            let resp = clinic.consultation(&consultation_id).await;
            print_response(resp, json, |c| format_consultation(c, theme))
        }
        ConsultCommand::Say {
            consultation_id,
            sender,
            message,
        } => {
            let content = message.join(" ");
            let resp = clinic.add_message(&consultation_id, sender, &content).await;

            // 医生的发言转成手语动画给患者看
            if resp.success && sender == Sender::Doctor {
                let player = LogPlayer;
                player.play(&text_to_sigml(&content));
            }
            print_response(resp, json, |m| format!("Message added ({})\n", m.id))
        }
        ConsultCommand::Notes {
            consultation_id,
            notes,
        } => {
            let resp = clinic.update_notes(&consultation_id, &notes.join(" ")).await;
            print_response(resp, json, |c| format_consultation(c, theme))
        }
        ConsultCommand::Prescribe {
            consultation_id,
            medicines,
            notes,
        } => {
            let resp = clinic
                .save_prescription(&consultation_id, medicines, &notes)
                .await;
            print_response(resp, json, |c| format_consultation(c, theme))
        }
        ConsultCommand::Complete { consultation_id } => {
            let resp = clinic.complete_consultation(&consultation_id).await;
            print_response(resp, json, |c| format_consultation(c, theme))
        }
    }
}

async fn print_status(state: &AppState) -> anyhow::Result<()> {
    println!("{}", "SignAid Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = state.config.read().await;
    println!(
        "Config: {}",
        config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
    println!(
        "Backend: {} (timeout {}s)",
        config.backend.base_url, config.backend.timeout_secs
    );

    let patients = state.clinic().patient_count().await?;
    if config.storage.in_memory {
        println!("Storage: in-memory ({} patients)", patients);
    } else {
        println!(
            "Storage: {} ({} patients)",
            config::get_database_path(&config).display(),
            patients
        );
    }

    Ok(())
}
