use clap::{ArgAction, Parser, Subcommand};
use iputil::{htonl, htons, inet_aton, inet_ntoa, ntohl, ntohs, ByteOrder, Format};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::io::{self, BufRead};
use std::process::ExitCode;

#[derive(Parser)]
#[command(author = "Daniel Yu", version, about = "IPv4 address and CIDR utilities")]
struct Opts {
    /// More log output, repeat for more
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse `a.b.c.d[/p]`, or one block per stdin line when TEXT is `-`
    Cidr {
        text: String,
        #[arg(short, long, default_value = "string")]
        format: Format,
        #[arg(short, long, default_value = "network")]
        byte_order: ByteOrder,
    },
    /// Parse a legacy address (`127.1`, `0x7f.1`) into a network-order integer
    Aton { text: String },
    /// Render a network-order integer as text or bytes
    Ntoa {
        value: u32,
        #[arg(short, long, default_value = "string")]
        format: Format,
        #[arg(short, long, default_value = "network")]
        byte_order: ByteOrder,
    },
    Htonl { value: u32 },
    Ntohl { value: u32 },
    Htons { value: u16 },
    Ntohs { value: u16 },
}

fn init_logging(verbose: u8) -> Result<(), Box<dyn Error>> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn print_cidr(text: &str, format: Format, order: ByteOrder) -> Result<(), Box<dyn Error>> {
    if text != "-" {
        print!("{}", iputil::cidr(text, format, order)?);
        return Ok(());
    }
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let l = line?;
        match iputil::cidr(l.trim(), format, order) {
            Ok(report) => println!("{}", report),
            Err(e) => log::warn!("skipping {:?}: {}", l, e),
        }
    }
    Ok(())
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Cidr {
            text,
            format,
            byte_order,
        } => print_cidr(&text, format, byte_order)?,
        Command::Aton { text } => println!("{}", inet_aton(&text)?),
        Command::Ntoa {
            value,
            format,
            byte_order,
        } => println!("{}", inet_ntoa(value, format, byte_order)?),
        Command::Htonl { value } => println!("{}", htonl(value)),
        Command::Ntohl { value } => println!("{}", ntohl(value)),
        Command::Htons { value } => println!("{}", htons(value)),
        Command::Ntohs { value } => println!("{}", ntohs(value)),
    }
    Ok(())
}

fn main() -> ExitCode {
    let opts = Opts::parse();
    if let Err(e) = init_logging(opts.verbose) {
        eprintln!("logging disabled: {}", e);
    }
    log::info!("#Start main()");
    match run(opts.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
