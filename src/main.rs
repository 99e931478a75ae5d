use clap::Parser;
use sponsor_desk::config::cli::{CategoryCommand, Cli, Command, EditArgs, SponsorArgs};
use sponsor_desk::core::{Logo, SponsorForm, SponsorPatch};
use sponsor_desk::utils::validation::{validate_calendar_date, validate_url, Validate};
use sponsor_desk::utils::{error::DeskError, logger};
use sponsor_desk::{
    AirtableStore, AppConfig, LogoInputMode, PanelPhase, S3LogoStore, SponsorPanel,
    SponsorRepository,
};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting sponsor-desk");

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::from_env(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Could not load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let records = AirtableStore::new(&config.database);
    let logos = S3LogoStore::new(&config.storage);
    let repository = SponsorRepository::new(records, logos, config.panel);
    let mut panel = SponsorPanel::new(repository);

    let outcome = match cli.command {
        Command::List => {
            panel.load().await;
            match panel.phase() {
                PanelPhase::Loaded => {
                    render_list(&panel);
                    Ok(())
                }
                PanelPhase::LoadFailed(message) => Err(message.clone()),
                _ => unreachable!("load() always finishes in Loaded or LoadFailed"),
            }
        }
        Command::Add(args) => match sponsor_form(args, config.panel.logo_input_mode) {
            Ok(form) => panel.submit_add_sponsor(form).await,
            Err(e) => Err(e.user_friendly_message()),
        },
        Command::Edit { id, args } => match sponsor_patch(args, config.panel.logo_input_mode) {
            Ok(patch) => panel.submit_edit_sponsor(&id, patch).await,
            Err(e) => Err(e.user_friendly_message()),
        },
        Command::Remove { id } => panel.submit_delete_sponsor(&id).await,
        Command::Category(CategoryCommand::Add { name }) => {
            panel.submit_add_category(&name).await
        }
        Command::Category(CategoryCommand::Remove { name }) => {
            panel.submit_delete_category(&name).await
        }
    };

    match outcome {
        Ok(()) => {
            if *panel.phase() == PanelPhase::Loaded {
                println!(
                    "✅ Done. {} sponsor record(s) across {} categorie(s).",
                    panel.sponsors().len(),
                    panel.categories().len()
                );
            }
        }
        Err(message) => {
            eprintln!("❌ {}", message);
            std::process::exit(2);
        }
    }

    Ok(())
}

fn render_list<R, U>(panel: &SponsorPanel<R, U>)
where
    R: sponsor_desk::core::RecordStore,
    U: sponsor_desk::core::LogoStore,
{
    for category in panel.categories() {
        println!("== {} ==", category);
        for sponsor in panel.sponsors_in(category) {
            if sponsor.name.is_empty() {
                println!("  (empty category placeholder)  [{}]", sponsor.id);
                continue;
            }
            println!(
                "  {}  {} <{}> {}  until {}  [{}]",
                sponsor.name,
                sponsor.contact_person,
                sponsor.contact_email,
                sponsor.contact_phone,
                sponsor.contract_end,
                sponsor.id
            );
            if let Some(industry) = &sponsor.industry {
                println!("    industry: {}", industry);
            }
            if let Some(logo) = &sponsor.logo_url {
                println!("    logo: {}", logo);
            }
        }
    }
}

fn sponsor_form(
    args: SponsorArgs,
    mode: LogoInputMode,
) -> sponsor_desk::Result<SponsorForm> {
    validate_calendar_date("contract_end", &args.contract_end)?;
    let logo = logo_input(args.logo_url, args.logo_file.as_deref(), mode)?;

    Ok(SponsorForm {
        name: args.name,
        industry: args.industry,
        contact_person: args.contact_person,
        contact_email: args.contact_email,
        contact_phone: args.contact_phone,
        level: args.level,
        contract_end: args.contract_end,
        logo,
    })
}

fn sponsor_patch(args: EditArgs, mode: LogoInputMode) -> sponsor_desk::Result<SponsorPatch> {
    if let Some(contract_end) = &args.contract_end {
        validate_calendar_date("contract_end", contract_end)?;
    }
    let logo = logo_input(args.logo_url, args.logo_file.as_deref(), mode)?;

    Ok(SponsorPatch {
        name: args.name,
        industry: args.industry,
        contact_person: args.contact_person,
        contact_email: args.contact_email,
        contact_phone: args.contact_phone,
        level: args.level,
        contract_end: args.contract_end,
        logo,
    })
}

/// Turns the CLI's logo flags into the form-level logo value, enforcing the
/// configured input mode of this deployment.
fn logo_input(
    url: Option<String>,
    file: Option<&Path>,
    mode: LogoInputMode,
) -> sponsor_desk::Result<Option<Logo>> {
    match (url, file, mode) {
        (None, None, _) => Ok(None),
        (Some(url), None, LogoInputMode::Url) => {
            validate_url("logo_url", &url)?;
            Ok(Some(Logo::Remote(url)))
        }
        (Some(_), None, LogoInputMode::Upload) => Err(DeskError::UnsupportedError {
            operation: "logo by URL (this deployment uploads logo files)".to_string(),
        }),
        (None, Some(path), LogoInputMode::Upload) => {
            let bytes = std::fs::read(path)?;
            let content_type = infer::get(&bytes)
                .map(|kind| kind.mime_type())
                .unwrap_or("application/octet-stream")
                .to_string();
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| DeskError::InvalidConfigValueError {
                    field: "logo_file".to_string(),
                    value: path.display().to_string(),
                    reason: "not a valid file name".to_string(),
                })?
                .to_string();
            Ok(Some(Logo::Pending {
                bytes,
                file_name,
                content_type,
            }))
        }
        (None, Some(_), LogoInputMode::Url) => Err(DeskError::UnsupportedError {
            operation: "logo file upload (this deployment takes logo URLs)".to_string(),
        }),
        (Some(_), Some(_), _) => Err(DeskError::InvalidConfigValueError {
            field: "logo".to_string(),
            value: String::new(),
            reason: "give either --logo-url or --logo-file, not both".to_string(),
        }),
    }
}
