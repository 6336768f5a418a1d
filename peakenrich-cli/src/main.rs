mod config;
mod enrich;
mod names;

use anyhow::Result;
use clap::{ArgAction, ArgMatches, Command, arg};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "peakenrich";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Score promoter binding-site enrichment between exogenous and endogenous ChIP-seq samples for up-regulated genes.")
        .subcommand_required(true)
        .arg(
            arg!(-v --verbose)
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug messages"),
        )
        .subcommand(enrich::cli::create_enrich_cli())
        .subcommand(names::cli::create_match_names_cli())
}

fn init_logging(matches: &ArgMatches) {
    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(&matches);

    match matches.subcommand() {
        //
        // ENRICHMENT RUN
        //
        Some((enrich::cli::ENRICH_CMD, matches)) => {
            enrich::handlers::run_enrich(matches)?;
        }

        //
        // GENE NAME MATCHING
        //
        Some((names::cli::MATCH_NAMES_CMD, matches)) => {
            names::handlers::run_match_names(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::*;

    #[rstest]
    fn test_parser_is_consistent() {
        build_parser().debug_assert();
    }

    #[rstest]
    fn test_subcommand_required() {
        assert!(build_parser().try_get_matches_from(["peakenrich"]).is_err());
    }

    #[rstest]
    fn test_verbose_is_global() {
        let matches = build_parser()
            .try_get_matches_from(["peakenrich", "match-names", "--working-dir", "w", "-v"])
            .unwrap();
        assert!(matches.get_flag("verbose"));
    }

    #[rstest]
    fn test_parser_metadata() {
        let parser = build_parser();
        assert_eq!(parser.get_name(), "peakenrich");
        assert_eq!(parser.get_version(), Some(consts::VERSION));
        assert_eq!(parser.get_author(), None);
    }
}
