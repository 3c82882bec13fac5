mod ui;

use anyhow::Result;
use clap::Parser;
use sitepass::{init_logging, load_master_password, load_sites, Site, Verbosity};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "sitepass",
    version,
    about = "Derives per-site passwords from a master password and a site list"
)]
struct Cli {
    /// Site list: site names, `# @filter` directives, blank lines reset filters
    #[arg(value_name = "SITES_FILE", env = "SITEPASS_SITES")]
    sites: PathBuf,

    /// File holding the master password; should be readable only by its owner
    #[arg(value_name = "MASTER_PASS_FILE", env = "SITEPASS_MASTER_FILE")]
    master_password: PathBuf,

    /// Only print these sites (repeatable)
    #[arg(short, long = "site", value_name = "NAME")]
    sites_only: Vec<String>,

    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    #[arg(short, long)]
    quiet: bool,

    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));

    let registry = load_sites(&cli.sites)?;
    let master = load_master_password(&cli.master_password)?;

    let selected: Vec<&Site> = if cli.sites_only.is_empty() {
        registry.iter().collect()
    } else {
        cli.sites_only
            .iter()
            .map(|name| {
                registry.get(name).ok_or_else(|| {
                    anyhow::anyhow!("Site '{}' is not in {}", name, cli.sites.display())
                })
            })
            .collect::<Result<_>>()?
    };

    debug!(selected = selected.len(), "Deriving passwords");

    let rows: Vec<ui::Row<'_>> = selected
        .iter()
        .map(|site| ui::Row {
            name: site.name(),
            outcome: site.password(&master),
        })
        .collect();

    let options = ui::DisplayOptions {
        color_support: !cli.no_color && ui::detect_color_support(),
    };
    ui::display_passwords(&rows, &options);

    let failed = rows.iter().filter(|row| row.outcome.is_err()).count();
    if failed > 0 {
        anyhow::bail!(
            "{} {} could not be derived",
            failed,
            if failed == 1 { "password" } else { "passwords" }
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_positional_and_repeated_sites() {
        let cli = Cli::try_parse_from([
            "sitepass",
            "sites.txt",
            "master",
            "-s",
            "a.com",
            "--site",
            "b.com",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.sites, PathBuf::from("sites.txt"));
        assert_eq!(cli.master_password, PathBuf::from("master"));
        assert_eq!(cli.sites_only, vec!["a.com", "b.com"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["sitepass", "s", "m", "-q", "-v"]).is_err());
    }
}
