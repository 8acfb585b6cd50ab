// Finanzas CLI - headless reconciliation and payroll operations

mod exit_codes;
mod load;
mod payroll;
mod recon;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use finanzas_client::{delete_auth, save_auth, AuthCredentials, Client};
use finanzas_config::{ActiveCompany, CompanyContext};

use exit_codes::{api_exit_code, EXIT_ERROR, EXIT_USAGE};
use payroll::{cmd_payroll, PayrollCommands};
use recon::{cmd_recon, ReconCommands};

/// Error carrying the exit code the shell contract promises.
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Parser)]
#[command(name = "finz")]
#[command(about = "Reconciliation and payroll for Finanzas (CLI mode, headless)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bank reconciliation: auto match, manual match, pending, history
    Recon {
        #[command(subcommand)]
        command: ReconCommands,
    },

    /// Payroll computation over a roster export
    Payroll {
        #[command(subcommand)]
        command: PayrollCommands,
    },

    /// Upload a bank-statement Excel file for server-side import
    #[command(after_help = "\
Examples:
  finz import estado-enero.xlsx --account 7 --bank BCP")]
    Import {
        /// Statement file (.xlsx)
        file: PathBuf,

        /// Bank account id
        #[arg(long)]
        account: i64,

        /// Bank code the importer should use (BCP, BBVA, ...)
        #[arg(long)]
        bank: String,
    },

    /// Save backend credentials
    Login {
        /// Bearer token
        #[arg(long)]
        token: String,

        /// API base URL
        #[arg(long, env = "FINANZAS_API_BASE")]
        api_base: String,

        /// Email, for display only
        #[arg(long)]
        email: Option<String>,
    },

    /// Delete saved backend credentials
    Logout,

    /// Show or change the active company
    Company {
        #[command(subcommand)]
        command: Option<CompanyCommands>,
    },
}

#[derive(Subcommand)]
enum CompanyCommands {
    /// Select the active company
    Select {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        nombre: String,

        #[arg(long)]
        ruc: Option<String>,
    },

    /// Clear the active company
    Clear,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(err.code)
        }
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Recon { command } => cmd_recon(command),
        Commands::Payroll { command } => cmd_payroll(command),
        Commands::Import { file, account, bank } => cmd_import(file, account, bank),
        Commands::Login { token, api_base, email } => cmd_login(token, api_base, email),
        Commands::Logout => cmd_logout(),
        Commands::Company { command } => cmd_company(command),
    }
}

fn general_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn cmd_import(file: PathBuf, account: i64, bank: String) -> Result<(), CliError> {
    if !file.exists() {
        return Err(general_err(EXIT_USAGE, format!("no such file: {}", file.display())));
    }

    let client = Client::from_saved_auth()
        .map_err(|e| CliError { code: api_exit_code(&e), message: e.to_string(), hint: None })?;
    let outcome = client
        .import_bank_excel(&file, account, &bank)
        .map_err(|e| CliError { code: api_exit_code(&e), message: e.to_string(), hint: None })?;

    eprintln!("imported {} movement(s)", outcome.imported);
    Ok(())
}

fn cmd_login(token: String, api_base: String, email: Option<String>) -> Result<(), CliError> {
    let mut creds = AuthCredentials::new(token, api_base);
    creds.email = email;
    save_auth(&creds).map_err(|e| general_err(EXIT_ERROR, e.to_string()))?;
    eprintln!("credentials saved");
    Ok(())
}

fn cmd_logout() -> Result<(), CliError> {
    delete_auth().map_err(|e| general_err(EXIT_ERROR, e.to_string()))?;
    eprintln!("credentials deleted");
    Ok(())
}

fn cmd_company(command: Option<CompanyCommands>) -> Result<(), CliError> {
    let mut context = CompanyContext::load();

    match command {
        None => {
            match context.active() {
                Some(company) => {
                    println!(
                        "{}  {} {}",
                        company.id,
                        company.nombre,
                        company.ruc.as_deref().unwrap_or("-"),
                    );
                }
                None => eprintln!("no active company — run `finz company select`"),
            }
            Ok(())
        }
        Some(CompanyCommands::Select { id, nombre, ruc }) => {
            context
                .select(ActiveCompany { id, nombre, ruc })
                .map_err(|e| general_err(EXIT_ERROR, e))?;
            eprintln!("active company set");
            Ok(())
        }
        Some(CompanyCommands::Clear) => {
            context.clear().map_err(|e| general_err(EXIT_ERROR, e))?;
            eprintln!("active company cleared");
            Ok(())
        }
    }
}
