use crate::export::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for the checador.
/// Attendance check-in application over SQLite.
#[derive(Parser)]
#[command(
    name = "checador",
    version = env!("CARGO_PKG_VERSION"),
    about = "Registro de asistencia: Entrada/Salida check-ins with SQLite and spreadsheet reports",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Manage the person directory
    Persona {
        #[command(subcommand)]
        action: PersonaAction,
    },

    /// Register an Entrada/Salida for a badge code
    Checar {
        /// Matricula read from the badge
        matricula: String,
    },

    /// Show the last registro and the next expected action for a badge code
    Status {
        matricula: String,
    },

    /// List raw attendance registros
    List {
        #[arg(long, help = "Only registros of this matricula")]
        matricula: Option<String>,

        #[arg(long = "from", help = "Range start (YYYY-MM-DD)")]
        from: Option<String>,

        #[arg(long = "to", help = "Range end (YYYY-MM-DD)")]
        to: Option<String>,
    },

    /// Delete an attendance registro by id
    Del {
        #[arg(long)]
        id: i64,
    },

    /// Generate an attendance report for a date range
    Report {
        #[arg(long = "from", help = "Range start (YYYY-MM-DD)")]
        from: String,

        #[arg(long = "to", help = "Range end (YYYY-MM-DD)")]
        to: String,

        #[arg(long, help = "Filter by category ('Todos' disables the filter)")]
        categoria: Option<String>,
    },

    /// Export an attendance report to a spreadsheet file
    Export {
        #[arg(long = "from", help = "Range start (YYYY-MM-DD)")]
        from: String,

        #[arg(long = "to", help = "Range end (YYYY-MM-DD)")]
        to: String,

        #[arg(long, help = "Filter by category ('Todos' disables the filter)")]
        categoria: Option<String>,

        #[arg(long, value_enum, default_value = "xlsx")]
        format: ExportFormat,

        #[arg(long = "dir", help = "Destination directory (default from config)")]
        dir: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PersonaAction {
    /// Add a persona to the directory
    Add {
        #[arg(long)]
        nombre: String,

        #[arg(long)]
        apellido: String,

        #[arg(long)]
        matricula: String,

        #[arg(long, help = "Category (e.g. Asesor, Brigadista, Administrativo)")]
        categoria: String,

        #[arg(long, help = "Photo file to store for this persona")]
        foto: Option<PathBuf>,

        #[arg(long, help = "Fingerprint blob file (stored, never compared)")]
        huella: Option<PathBuf>,
    },

    /// Update a persona (fields not given keep their current value)
    Update {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        nombre: Option<String>,

        #[arg(long)]
        apellido: Option<String>,

        #[arg(long)]
        matricula: Option<String>,

        #[arg(long)]
        categoria: Option<String>,

        #[arg(long, help = "Replacement photo file")]
        foto: Option<PathBuf>,
    },

    /// Delete a persona by id
    Del {
        #[arg(long)]
        id: i64,
    },

    /// List all personas
    List,

    /// Case-insensitive search over nombre, apellido and matricula
    Search {
        term: String,
    },

    /// Directory statistics and categories in use
    Stats,
}
