use std::fs::File;
use std::io::{stdout, BufWriter, Write};

use anyhow::{Context, Result};

use crate::cli::parse_count_options;
use kmerfreq::serialization::{write_json, write_text, JSON_EXT, TEXT_EXT};
use kmerfreq::{frequent_kmers, open_input};

mod cli;
mod logging;

fn output_to<F>(output_fn: F, output: Option<&str>, extension: &str) -> Result<()>
where
    F: Fn(&mut dyn Write) -> Result<()>,
{
    match output {
        None => {
            let out = stdout();
            let mut out = BufWriter::new(out.lock());
            output_fn(&mut out)?;
        }
        Some(o) => {
            // if the filename doesn't have the right extension
            // add it on
            let filename = String::from(o);
            let out_filename = if filename.ends_with(extension) {
                filename
            } else {
                filename + extension
            };

            let out = File::create(&out_filename)
                .context(format!("unable to create '{}'", out_filename))?;
            output_fn(&mut BufWriter::new(out))?;
        }
    };
    Ok(())
}

fn run() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    logging::init_logger(matches.is_present("verbose"));

    let params = parse_count_options(&matches)?;
    let filename = matches.value_of("INPUT").unwrap_or("-");
    let data = open_input(filename)?;
    log::info!("read {} bytes from {}", data.len(), filename);

    let report = frequent_kmers(&data, &params)?;

    if matches.is_present("json") {
        output_to(
            |writer| Ok(write_json(writer, &report)?),
            matches.value_of("output_file"),
            JSON_EXT,
        )?;
    } else {
        output_to(
            |writer| Ok(write_text(writer, &report)?),
            matches.value_of("output_file"),
            TEXT_EXT,
        )?;
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }
}
