//! classify: run the default errcode coder chain over a described error.
//!
//! ```text
//! classify http 404            # NotFound (5)
//! classify grpc UNAVAILABLE    # Unavailable (14)
//! classify mysql 1213          # Aborted (10)
//! classify io permission-denied
//! classify context deadline
//! classify tagged data_loss
//! ```
//!
//! # Environment Variables
//!
//! - `ERRCODE_LOG=trace` - Log filter (tracing `EnvFilter` syntax, default `warn`)

use std::error::Error;
use std::io;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use errcode::{Code, CodedError, DynError, ErrorCoder, ErrorCoders};
use errcode_http::HttpError;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ERRCODE_LOG";

#[derive(Debug, Parser)]
#[command(name = "classify", version, about = "Map a described error to its canonical code")]
struct Cli {
    #[command(subcommand)]
    source: Source,
}

#[derive(Debug, Subcommand)]
enum Source {
    /// An error tagged with an HTTP status
    Http { status: u16 },
    /// A gRPC status with the given code (name or number)
    Grpc {
        #[arg(value_parser = parse_code)]
        code: Code,
    },
    /// A MySQL server error number
    Mysql { number: u32 },
    /// A filesystem error of the given kind
    Io {
        #[arg(value_enum)]
        kind: IoKind,
    },
    /// A cancellation signal
    Context {
        #[arg(value_enum)]
        signal: Signal,
    },
    /// An error explicitly tagged with a code (name or number)
    Tagged {
        #[arg(value_parser = parse_code)]
        code: Code,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IoKind {
    NotFound,
    AlreadyExists,
    PermissionDenied,
    InvalidInput,
    Other,
}

impl From<IoKind> for io::ErrorKind {
    fn from(kind: IoKind) -> Self {
        match kind {
            IoKind::NotFound => io::ErrorKind::NotFound,
            IoKind::AlreadyExists => io::ErrorKind::AlreadyExists,
            IoKind::PermissionDenied => io::ErrorKind::PermissionDenied,
            IoKind::InvalidInput => io::ErrorKind::InvalidInput,
            IoKind::Other => io::ErrorKind::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Signal {
    Canceled,
    Deadline,
}

fn parse_code(s: &str) -> Result<Code, String> {
    if let Ok(n) = s.parse::<i32>() {
        return match Code::from_i32(n) {
            code if code.as_i32() == n => Ok(code),
            _ => Err(format!("code number out of range: {n}")),
        };
    }
    s.parse::<Code>().map_err(|e| e.to_string())
}

/// The chain every described error runs through.
fn default_coders() -> ErrorCoders {
    errcode::compact([
        errcode::coded_error_coder(),
        errcode::context_error_coder(),
        errcode::file_system_error_coder(),
        errcode_cloud::error_coder(),
    ])
}

/// Build the error a source describes.
///
/// `None` for MySQL: constructing a driver error needs a live server, so
/// that source is classified through the number table instead.
fn build_error(source: &Source) -> Option<Box<dyn Error + Send + Sync>> {
    let synthetic = "synthetic failure";
    let err: Box<dyn Error + Send + Sync> = match *source {
        Source::Http { status } => Box::new(HttpError::new(status, synthetic)),
        Source::Grpc { code } => Box::new(tonic::Status::new(tonic::Code::from(code), synthetic)),
        Source::Mysql { .. } => return None,
        Source::Io { kind } => Box::new(io::Error::new(kind.into(), synthetic)),
        Source::Context { signal: Signal::Canceled } => Box::new(errcode::Canceled),
        Source::Context { signal: Signal::Deadline } => Box::new(errcode::DeadlineExceeded),
        Source::Tagged { code } => Box::new(CodedError::new(code, synthetic)),
    };
    Some(err)
}

fn classify(source: &Source) -> Code {
    let Some(err) = build_error(source) else {
        return match *source {
            Source::Mysql { number } => errcode_mysql::to_code(number),
            _ => Code::Unknown,
        };
    };
    tracing::debug!(error = %err, ?source, "classifying");
    default_coders().error_code(Some(&*err as &DynError))
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new("warn"))
        .with_context(|| format!("invalid {LOG_ENV} filter"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let code = classify(&cli.source);
    println!("{} ({})", code, code.as_i32());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn run(args: &[&str]) -> Code {
        let cli = Cli::try_parse_from(std::iter::once("classify").chain(args.iter().copied()))
            .unwrap();
        classify(&cli.source)
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn each_source() {
        assert_eq!(run(&["http", "404"]), Code::NotFound);
        assert_eq!(run(&["http", "502"]), Code::Unknown);
        assert_eq!(run(&["grpc", "UNAVAILABLE"]), Code::Unavailable);
        assert_eq!(run(&["grpc", "4"]), Code::DeadlineExceeded);
        assert_eq!(run(&["mysql", "1213"]), Code::Aborted);
        assert_eq!(run(&["mysql", "1"]), Code::Unknown);
        assert_eq!(run(&["io", "permission-denied"]), Code::PermissionDenied);
        assert_eq!(run(&["io", "invalid-input"]), Code::InvalidArgument);
        assert_eq!(run(&["io", "other"]), Code::Unknown);
        assert_eq!(run(&["context", "canceled"]), Code::Canceled);
        assert_eq!(run(&["context", "deadline"]), Code::DeadlineExceeded);
        assert_eq!(run(&["tagged", "data_loss"]), Code::DataLoss);
        assert_eq!(run(&["tagged", "ok"]), Code::Ok);
    }

    #[test]
    fn code_arguments() {
        assert_eq!(parse_code("NotFound"), Ok(Code::NotFound));
        assert_eq!(parse_code("16"), Ok(Code::Unauthenticated));
        assert!(parse_code("17").is_err());
        assert!(parse_code("-1").is_err());
        assert!(parse_code("nope").is_err());
        assert!(Cli::try_parse_from(["classify", "grpc", "nope"]).is_err());
    }

    #[test]
    fn only_mysql_skips_the_chain() {
        let mysql = Source::Mysql { number: 1205 };
        assert!(build_error(&mysql).is_none());
        assert_eq!(classify(&mysql), Code::DeadlineExceeded);
        assert!(build_error(&Source::Http { status: 404 }).is_some());
        assert!(build_error(&Source::Context { signal: Signal::Canceled }).is_some());
    }

    #[test]
    fn default_chain_is_flat() {
        let coders = default_coders();
        // coded, context, fs, grpc, http, api
        assert_eq!(coders.len(), 6);
        assert!(coders.iter().all(|c| c.as_coders().is_none()));
    }
}
