use clap::{Arg, Command, arg, value_parser};

pub const MATCH_NAMES_CMD: &str = "match-names";
pub const DEFAULT_EXAMPLES: usize = 10;

pub fn create_match_names_cli() -> Command {
    Command::new(MATCH_NAMES_CMD)
        .about("Show how the first DEA gene names standardize and whether the annotation resolves them.")
        .arg(
            Arg::new("working-dir")
                .long("working-dir")
                .required(true)
                .help("Directory that relative input paths are resolved against"),
        )
        .arg(arg!(--dea <CSV>).required(false).help("Differential expression table"))
        .arg(arg!(--gtf <GTF>).required(false).help("Gene annotation GTF/GTF.gz"))
        .arg(
            arg!(--n <N>)
                .required(false)
                .value_parser(value_parser!(usize))
                .default_value("10")
                .help("Number of names to check"),
        )
}
