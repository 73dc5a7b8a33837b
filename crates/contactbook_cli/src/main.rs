//! Contactbook command-line front end.
//!
//! # Responsibility
//! - Resolve store/logging configuration from flags and environment.
//! - Route mutations through the action layer and reads through the service.
//! - Print JSON results; exit non-zero on failed actions or missing records.

use clap::{Args, Parser, Subcommand};
use contactbook_core::db::open_db;
use contactbook_core::{
    core_version, default_log_level, init_logging, ActionResult, ContactActions, ContactId,
    ContactService, FormData, LogInvalidator, SqliteContactRepository,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DB_FILE_NAME: &str = "contactbook.sqlite3";

#[derive(Parser, Debug)]
#[command(name = "contactbook", version = core_version(), about = "Manage contact records")]
struct Cli {
    /// SQLite database file.
    #[arg(long, env = "CONTACTBOOK_DB_PATH", global = true)]
    db: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "CONTACTBOOK_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "CONTACTBOOK_LOG_DIR", global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a contact
    Create(ContactFields),
    /// Update the given fields of a contact
    Update {
        id: ContactId,
        #[command(flatten)]
        fields: ContactFields,
    },
    /// Delete a contact permanently
    Delete { id: ContactId },
    /// List contacts, newest first
    List,
    /// Show one contact
    Show { id: ContactId },
    /// Print the number of stored contacts
    Count,
}

#[derive(Args, Debug, Default)]
struct ContactFields {
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    company: Option<String>,
}

impl ContactFields {
    fn to_form(&self) -> FormData {
        let mut form = FormData::new();
        let fields = [
            ("email", &self.email),
            ("name", &self.name),
            ("phone", &self.phone),
            ("company", &self.company),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                form.append(key, value.as_str());
            }
        }
        form
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("contactbook: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, String> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let db_path = resolve_db_path(cli.db.clone());
    let conn = open_db(&db_path).map_err(|err| format!("database open failed: {err}"))?;
    let repo = SqliteContactRepository::try_new(&conn)
        .map_err(|err| format!("repository init failed: {err}"))?;
    let actions = ContactActions::new(ContactService::new(repo), LogInvalidator);

    match &cli.command {
        Command::Create(fields) => print_action(&actions.create_contact(&fields.to_form())),
        Command::Update { id, fields } => {
            print_action(&actions.update_contact(*id, &fields.to_form()))
        }
        Command::Delete { id } => print_action(&actions.delete_contact(*id)),
        Command::List => {
            let contacts = actions
                .service()
                .find_all()
                .map_err(|err| format!("list failed: {err}"))?;
            print_json(&contacts)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Show { id } => {
            let contact = actions
                .service()
                .find_by_id(*id)
                .map_err(|err| format!("show failed: {err}"))?;
            match contact {
                Some(contact) => {
                    print_json(&contact)?;
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("contactbook: contact {id} not found");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Count => {
            let count = actions
                .service()
                .count()
                .map_err(|err| format!("count failed: {err}"))?;
            println!("{count}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_action<T: Serialize>(result: &ActionResult<T>) -> Result<ExitCode, String> {
    print_json(result)?;
    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let text =
        serde_json::to_string_pretty(value).map_err(|err| format!("JSON encode failed: {err}"))?;
    println!("{text}");
    Ok(())
}

fn resolve_db_path(flag: Option<PathBuf>) -> PathBuf {
    flag.filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
}
