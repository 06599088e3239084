//! specvc CLI binary
use clap::{arg, Command};
use specvc_core::config::{core_config, CoreConfig};
use specvc_core::example::VcExample;
use specvc_core::keys::ExampleKeyring;
use specvc_html::process_document;
use specvc_secure::{enveloper, EnvelopeContext, Format};
use std::fs;
use std::io::{stdin, Read};
use std::str::FromStr;

fn cli() -> Command {
    Command::new("specvc CLI")
        .about(format!("specvc CLI v{}\n\nCommand line interface for securing Verifiable Credential examples in specification documents.", env!("CARGO_PKG_VERSION")))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("doc")
                .about("Document functionality: scan and secure examples.")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("process")
                        .about("Replaces credential examples in a rendered document with secured tab groups.")
                        .arg(arg!(-f --file <FILE>).required(false))
                        .arg(arg!(-o --output <OUTPUT>).required(false))
                        .arg(arg!(--tabs <TABS>).required(false)),
                ),
        )
        .subcommand(
            Command::new("vc")
                .about("Verifiable credential functionality: secure a single credential.")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("secure")
                        .about("Secures a credential with one envelope format and prints the raw envelope.")
                        .arg(arg!(-t --format <FORMAT>).required(true))
                        .arg(arg!(-f --credential_file <CREDENTIAL_FILE>).required(false)),
                ),
        )
}

/// Reads from a file path when given, otherwise from stdin.
fn read_input(path: Option<&String>) -> Result<String, std::io::Error> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("doc", sub_matches)) => match sub_matches.subcommand() {
            Some(("process", sub_matches)) => {
                let html = read_input(sub_matches.get_one::<String>("file"))?;
                let mut config: CoreConfig = core_config().clone();
                if let Some(tabs) = sub_matches.get_one::<String>("tabs") {
                    config.default_tabs = tabs.split_whitespace().map(String::from).collect();
                }
                let context = EnvelopeContext::new(ExampleKeyring::generate()?)
                    .with_contexts(config.context_map()?);
                let output = process_document(&html, &config, &context).await?;
                match sub_matches.get_one::<String>("output") {
                    Some(path) => fs::write(path, output)?,
                    None => println!("{}", output),
                }
            }
            _ => panic!("Unrecognised doc subcommand."),
        },
        Some(("vc", sub_matches)) => match sub_matches.subcommand() {
            Some(("secure", sub_matches)) => {
                let format = Format::from_str(
                    sub_matches
                        .get_one::<String>("format")
                        .expect("required argument"),
                )?;
                let text = read_input(sub_matches.get_one::<String>("credential_file"))?;
                let example = VcExample::new(1, text);
                let document = example.parse()?;
                let context = EnvelopeContext::new(ExampleKeyring::generate()?)
                    .with_contexts(core_config().context_map()?);
                let envelope = enveloper(format)
                    .envelope(&example, &document, &context)
                    .await?;
                println!("{}", envelope.raw);
            }
            _ => panic!("Unrecognised VC subcommand."),
        },
        _ => panic!("Unrecognised subcommand."),
    }
    Ok(())
}
