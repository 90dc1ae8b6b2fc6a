use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use viewport_core::{Resolution, ResolveRequest};
use viewport_observability::init_tracing;
use viewport_service::{Resolved, ViewService};

#[derive(Debug, Parser)]
#[command(name = "viewport")]
#[command(about = "Resolve a query or URL into something a sandboxed view can display")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Resolve {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value = "", env = "VIEWPORT_URL")]
        url: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    Classify {
        query: String,
    },
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Href,
    Body,
}

fn main() -> Result<()> {
    init_tracing("viewport_cli");
    let cli = Cli::parse();
    let service = ViewService::default();

    match cli.command {
        Command::Resolve { query, url, format } => {
            let resolved = service.resolve(&ResolveRequest::new(query, url));
            println!("{}", render(&resolved, format)?);
        }
        Command::Classify { query } => {
            let intent = service.classify(&query);
            println!("{}", serde_json::to_string_pretty(&intent)?);
        }
        Command::Interactive => run_interactive(&service)?,
    }

    Ok(())
}

fn render(resolved: &Resolved, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(resolved)?,
        OutputFormat::Href => resolved.href.clone(),
        OutputFormat::Body => match &resolved.resolution {
            Resolution::InlineDocument { body, .. } => body.clone(),
            Resolution::ExternalAddress { url } => url.clone(),
        },
    })
}

fn run_interactive(service: &ViewService) -> Result<()> {
    println!("viewport interactive mode. type 'exit' to quit.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let query = line.trim();
        if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
            break;
        }
        if query.is_empty() {
            continue;
        }

        let resolved = service.resolve(&ResolveRequest::query(query));
        println!("{}\n", resolved.href);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resolve_flags() {
        let cli = Cli::try_parse_from([
            "viewport",
            "resolve",
            "--query",
            "add 1 and 2",
            "--format",
            "href",
        ])
        .unwrap();
        match cli.command {
            Command::Resolve { query, format, .. } => {
                assert_eq!(query, "add 1 and 2");
                assert_eq!(format, OutputFormat::Href);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn body_format_prints_address_for_external() {
        let resolved = ViewService::default().resolve(&ResolveRequest::new("", "https://example.com"));
        assert_eq!(render(&resolved, OutputFormat::Body).unwrap(), "https://example.com");
    }

    #[test]
    fn body_format_prints_inline_document() {
        let resolved = ViewService::default().resolve(&ResolveRequest::query("add 300 and 200"));
        let body = render(&resolved, OutputFormat::Body).unwrap();
        assert!(body.contains("300 + 200 = 500"));
    }
}
