use std::{io, path::PathBuf};

use anyhow::Result;
use clap::{arg, crate_name, crate_version, value_parser, ArgMatches, Command};
use gnmap_svc::{config::Config, error::ExtractError, extract, logger};

fn parse_args(matches: ArgMatches) -> Result<Config, ExtractError> {
    let nmap_out = matches
        .get_one::<PathBuf>("nmap_out")
        .cloned()
        .ok_or(ExtractError::MissingFlag("nmap_out"))?;

    let service_substr = matches
        .get_one::<String>("service_substr")
        .cloned()
        .ok_or(ExtractError::MissingFlag("service_substr"))?;

    let verbosity = matches.get_one::<i32>("v").copied().unwrap_or_default();

    Config::new(nmap_out, service_substr, verbosity)
}

fn main() -> Result<()> {
    let arg_matches = Command::new(crate_name!())
        .about(
            "Prints `host:port` for every port in Nmap greppable output (-oG)\n\
            whose service name contains the given substring.",
        )
        .after_help(
            "Examples:\n  \
            gnmap-svc --nmap_out=/tmp/nmap-out.gnmap --service_substr=http\n  \
            gnmap-svc --nmap_out=/tmp/nmap-out.gnmap --service_substr= --v=1",
        )
        .version(crate_version!())
        .args([
            arg!(--nmap_out <PATH> "The file written by running nmap with '-oG'")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
            arg!(--service_substr <SUBSTR> "Service name substring to filter for, e.g. 'http'. Empty matches every port")
                .required(true),
            // Miscellaneous arguments.
            arg!(--v <LEVEL> "Log verbosity on stderr; 1 turns on debugging information")
                .value_parser(value_parser!(i32))
                .allow_negative_numbers(true)
                .default_value("0"),
        ])
        .get_matches();

    // Extract arguments.
    let config = parse_args(arg_matches)?;

    logger::init(config.verbosity);

    // Matches go straight to stdout for piping.
    extract::run(&config, &mut io::stdout().lock())?;

    Ok(())
}
