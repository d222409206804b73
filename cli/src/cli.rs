use anyhow::{anyhow, Context, Result};
use clap::{crate_authors, crate_version, App, AppSettings, Arg, ArgMatches};
use kmerfreq::CountParams;

pub fn build_cli() -> App<'static, 'static> {
    let app = App::new("kmerfreq")
        .version(crate_version!())
        .author(crate_authors!())
        .about("Report the k-mers of a file that occur at least a given fraction of the time")
        .setting(AppSettings::ArgRequiredElseHelp)
        .arg(
            Arg::with_name("INPUT")
                .help("The file to count k-mers in ('-' for stdin)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("kmer_length")
                .value_name("KMER_LENGTH")
                .help("Length of k-mers to count (2 to 100)")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("min_frequency")
                .value_name("MIN_FREQUENCY")
                .help("Only report k-mers making up at least this fraction of all k-mers")
                .required(true)
                .index(3),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("Output a JSON report instead of one line per k-mer"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log progress and summary statistics to stderr"),
        );
    add_output_options(app)
}

fn add_output_options<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.arg(
        Arg::with_name("output_file")
            .short("o")
            .long("output")
            .help("Output to this file")
            .takes_value(true),
    )
}

pub fn parse_count_options(matches: &ArgMatches) -> Result<CountParams> {
    let kmer_length = matches
        .value_of("kmer_length")
        .ok_or_else(|| anyhow!("Bad kmer-length"))?;
    let min_frequency = matches
        .value_of("min_frequency")
        .ok_or_else(|| anyhow!("Bad min-frequency"))?;
    CountParams::parse(kmer_length, min_frequency).with_context(|| {
        format!(
            "invalid k-mer length '{}' or minimum frequency '{}'",
            kmer_length, min_frequency
        )
    })
}
