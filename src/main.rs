//! HotPatch Release - command-line front end.
//!
//! Drives the library against a configuration directory holding `release.yaml`:
//!
//! - `parse`: parse a pak list into the release config and save it
//! - `files`: list every extern file, with extern directories expanded
//! - `export`: write the JSON export to `<save_path>/<version_id>/`

use anyhow::Result;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use hotpatch_release::{APP_NAME, ConfigManager, ReleaseChange, ReleaseSession, VERSION};

#[derive(Parser)]
#[command(name = "hotpatch-release")]
#[command(about = "Release configuration and pak-list parsing for hot patch exports")]
struct Cli {
    /// Directory containing release.yaml
    #[arg(short, long, default_value = "HotPatch Data")]
    config_dir: Utf8PathBuf,

    /// Directory for log files
    #[arg(long, default_value = "logs")]
    log_dir: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a pak list into the release config and save it
    Parse {
        /// Pak list file; relative paths resolve against --base-dir
        pak_list: Utf8PathBuf,

        /// Base directory for relative pak-list paths
        #[arg(long, default_value = ".")]
        base_dir: Utf8PathBuf,

        /// Print the result without saving release.yaml
        #[arg(long)]
        dry_run: bool,
    },
    /// List all extern files, expanding extern directories
    Files {
        /// Compute a SHA-256 for every file
        #[arg(long)]
        hash: bool,
    },
    /// Write the JSON export of the release config
    Export {
        /// Print the JSON to stdout instead of writing it
        #[arg(long)]
        stdout: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = hotpatch_release::logging::setup_logging_with_console(
        &cli.log_dir,
        "hotpatch-release",
        cli.debug,
        true,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let config_manager = ConfigManager::new(&cli.config_dir)?;
    let release_config = config_manager.load_release_config()?;

    match cli.command {
        Commands::Parse {
            pak_list,
            base_dir,
            dry_run,
        } => {
            let mut session = ReleaseSession::with_config(base_dir, release_config);
            let changes = session.set_pak_list_path(pak_list);

            match changes
                .iter()
                .find(|c| matches!(c, ReleaseChange::PakListParsed { .. }))
            {
                Some(ReleaseChange::PakListParsed {
                    path,
                    assets,
                    extern_files,
                    dropped,
                }) => println!(
                    "{}: {} assets, {} extern files, {} dropped",
                    path, assets, extern_files, dropped
                ),
                _ => println!("Pak list not found, release config unchanged"),
            }

            if dry_run {
                println!("{}", session.config().serialize_to_string()?);
            } else {
                config_manager.save_release_config(session.config())?;
            }
        }
        Commands::Files { hash } => {
            for file in release_config.all_extern_files(hash) {
                match file.file_hash {
                    Some(file_hash) => {
                        println!("{}\t{}\t{}", file.file_path, file.mount_path, file_hash)
                    }
                    None => println!("{}\t{}", file.file_path, file.mount_path),
                }
            }
        }
        Commands::Export { stdout } => {
            if stdout {
                println!("{}", release_config.serialize_to_string()?);
            } else {
                match ConfigManager::export_release_config(&release_config)? {
                    Some(path) => println!("Exported release config to {}", path),
                    None => println!("save_release_config is off, nothing exported"),
                }
            }
        }
    }

    tracing::info!("Done");
    Ok(())
}
