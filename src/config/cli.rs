use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sponsor-desk")]
#[command(about = "Admin panel for sponsors and sponsorship categories")]
pub struct Cli {
    /// TOML configuration file; environment variables are used when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List sponsors grouped by sponsorship category
    List,
    /// Add a sponsor
    Add(SponsorArgs),
    /// Edit fields of an existing sponsor
    Edit {
        /// Record id of the sponsor
        id: String,
        #[command(flatten)]
        args: EditArgs,
    },
    /// Delete a sponsor
    Remove {
        /// Record id of the sponsor
        id: String,
    },
    /// Manage sponsorship categories
    #[command(subcommand)]
    Category(CategoryCommand),
}

#[derive(Debug, Args)]
pub struct SponsorArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub industry: Option<String>,

    #[arg(long)]
    pub contact_person: String,

    #[arg(long)]
    pub contact_email: String,

    #[arg(long)]
    pub contact_phone: String,

    /// Sponsorship category the sponsor belongs to
    #[arg(long)]
    pub level: String,

    /// Contract end date, YYYY-MM-DD
    #[arg(long)]
    pub contract_end: String,

    /// Logo URL (only in url logo mode)
    #[arg(long, conflicts_with = "logo_file")]
    pub logo_url: Option<String>,

    /// Local logo file to upload (only in upload logo mode)
    #[arg(long)]
    pub logo_file: Option<PathBuf>,
}

#[derive(Debug, Args, Default)]
pub struct EditArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub industry: Option<String>,

    #[arg(long)]
    pub contact_person: Option<String>,

    #[arg(long)]
    pub contact_email: Option<String>,

    #[arg(long)]
    pub contact_phone: Option<String>,

    #[arg(long)]
    pub level: Option<String>,

    /// Contract end date, YYYY-MM-DD
    #[arg(long)]
    pub contract_end: Option<String>,

    /// Logo URL (only in url logo mode)
    #[arg(long, conflicts_with = "logo_file")]
    pub logo_url: Option<String>,

    /// Local logo file to upload (only in upload logo mode)
    #[arg(long)]
    pub logo_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    /// Create an empty category (a placeholder record carrying only the level)
    Add { name: String },
    /// Delete a category and every sponsor record in it
    Remove { name: String },
}
