use clap::{Arg, Command, arg, value_parser};

pub const ENRICH_CMD: &str = "enrich";

pub fn create_enrich_cli() -> Command {
    Command::new(ENRICH_CMD)
        .about("Score promoter peak enrichment for up-regulated genes and write the report tables.")
        .arg(
            Arg::new("working-dir")
                .long("working-dir")
                .required_unless_present("config")
                .help("Directory that relative input paths are resolved against"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .required_unless_present("config")
                .help("Directory holding peaks/ and aligned/ (default output location)"),
        )
        .arg(
            arg!(--config <TOML>)
                .required(false)
                .help("Run configuration with [layout] and [enrichment] tables; flags override it"),
        )
        .arg(
            arg!(--dea <CSV>)
                .required(false)
                .help("Differential expression table (default: <working-dir>/../DATA/DEA_NSC.csv)"),
        )
        .arg(
            arg!(--gtf <GTF>)
                .required(false)
                .help("Gene annotation GTF/GTF.gz (default: <working-dir>/../DATA/gencode.vM10.annotation.gtf)"),
        )
        .arg(
            arg!(--exo <SAMPLES>)
                .required(false)
                .value_delimiter(',')
                .help("Comma separated exogenous sample ids"),
        )
        .arg(
            arg!(--endo <SAMPLES>)
                .required(false)
                .value_delimiter(',')
                .help("Comma separated endogenous sample ids"),
        )
        .arg(
            arg!(--window <BP>)
                .required(false)
                .value_parser(value_parser!(u32))
                .help("Promoter half-width around the TSS [default: 2000]"),
        )
        .arg(
            arg!(--threads <N>)
                .required(false)
                .value_parser(value_parser!(usize))
                .help("Worker threads for gene scoring (default: all cores)"),
        )
        .arg(
            arg!(--output <DIR>)
                .required(false)
                .help("Directory for the report tables (default: data dir)"),
        )
        .arg(
            arg!(--label <LABEL>)
                .required(false)
                .help("Suffix of every report file name [default: NSC]"),
        )
        .arg(
            arg!(--methods <METHODS>)
                .required(false)
                .value_delimiter(',')
                .help("Comma separated subset of: signal_ratio, peak_count, combined_score, statistical, width_weighted, coverage_score, area_integration"),
        )
}
