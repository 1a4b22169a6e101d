//! trellis CLI
//!
//! Loads a JSON route table and inspects it: lists the routes, resolves
//! requests and recovers case-mangled paths.

mod table;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use trellis_router::{Method, Mode, Params, Resolution, Router};

use crate::table::RouteTable;

/// Inspect radix-tree route tables.
#[derive(Parser)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Route table (JSON).
    #[arg(short, long)]
    table: PathBuf,

    /// Router mode (debug, release or test), overriding the table.
    #[arg(short, long, env = "TRELLIS_MODE")]
    mode: Option<Mode>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every registered route.
    Routes {
        /// Print the routes as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Resolve a request against the table.
    Match {
        /// HTTP method, such as GET.
        method: String,
        /// Request path.
        path: String,
    },

    /// Recover the registered spelling of a path, ignoring case.
    Fix {
        /// HTTP method, such as GET.
        method: String,
        /// Request path.
        path: String,

        /// Also add or remove a trailing slash when needed.
        #[arg(long)]
        trailing_slash: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let router = RouteTable::load(&cli.table)?.build(cli.mode)?;
    debug!(
        routes = router.routes().len(),
        max_params = router.max_params(),
        "route table loaded"
    );

    match cli.command {
        Commands::Routes { json } => print_routes(&router, json)?,
        Commands::Match { method, path } => {
            let method = parse_method(&method)?;
            print_resolution(&router, &method, &path);
        }
        Commands::Fix {
            method,
            path,
            trailing_slash,
        } => {
            let method = parse_method(&method)?;
            match router.find_case_corrected_path(&method, &path, trailing_slash) {
                Some(corrected) => println!("{corrected}"),
                None => info!("No route matches {method} {path}, ignoring case."),
            }
        }
    }

    Ok(())
}

fn parse_method(token: &str) -> anyhow::Result<Method> {
    Method::parse(token).with_context(|| format!("invalid method '{token}'"))
}

fn print_routes(router: &Router<String>, json: bool) -> anyhow::Result<()> {
    let routes = router.routes();
    if json {
        println!("{}", serde_json::to_string_pretty(&routes)?);
        return Ok(());
    }

    if routes.is_empty() {
        info!("The route table is empty.");
        return Ok(());
    }
    for route in &routes {
        println!(
            "{:<7} {:<40} --> {} ({} handlers)",
            route.method.as_str(),
            route.path,
            route.handler,
            route.handlers
        );
    }
    Ok(())
}

fn print_resolution(router: &Router<String>, method: &Method, path: &str) {
    let mut params = Params::with_capacity(router.max_params());
    match router.resolve(method, path, &mut params) {
        Resolution::Found {
            handlers,
            full_path,
        } => {
            let chain: Vec<&str> = handlers.iter().map(String::as_str).collect();
            println!("{method} {full_path} --> {}", chain.join(" -> "));
            for param in &params {
                println!("  {} = {}", param.key, param.value);
            }
        }
        Resolution::Redirect { location, status } => {
            println!("{status} redirect to {location}");
        }
        Resolution::MethodNotAllowed { allowed } => {
            let allowed: Vec<&str> = allowed.iter().map(Method::as_str).collect();
            println!("405 method not allowed (allow: {})", allowed.join(", "));
        }
        Resolution::NotFound => println!("404 not found"),
    }
}
