mod app_state;
mod handlers;
mod output;
mod routes;
mod templates;

use std::net::SocketAddr;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use enrollrows::config::{self, EnrollmentConfig, DEFAULT_PORT};
use enrollrows::dom::Document;
use enrollrows::enrollment::{container_html, replay, row_views, EnrollmentRows, ReplayOp};
use enrollrows::form_data::decode_additional_enrollments;

use app_state::AppState;
use output::ConsoleNotifier;

#[derive(Parser)]
#[command(
    name = "enrollrows",
    author,
    version,
    about = "Additional-enrollment rows for the course request form",
    long_about = r#"Builds and exercises the repeatable "additional enrollment" rows of the course request form.

Each row has a user field and a role selector whose names follow the
`additional_enrollments[n][user]` / `additional_enrollments[n][role]` convention.

Examples:
  1) Preview the form in a browser:
      enrollrows serve --rows 2
  2) Replay a sequence of clicks:
      enrollrows replay add add add remove:addEnroll-2 click:addEnroll-1
  3) Decode a submitted form body:
      enrollrows decode 'additional_enrollments[1][user]=JDoe&additional_enrollments[1][role]=TA'
"#,
    after_help = "Use `enrollrows <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the request form preview
    Serve {
        /// Host to bind to (defaults to ENROLL_HOST or 127.0.0.1)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (defaults to ENROLL_PORT or 8080)
        #[arg(long)]
        port: Option<u16>,
        /// Rows pre-rendered into the form
        #[arg(long, default_value_t = 0)]
        rows: usize,
    },
    /// Apply add/remove operations to an empty container and print the result
    #[command(
        about = "Replay row operations",
        long_about = "Each operation is one of `add`, `remove:<row-id>`, `remove:<container-id>:<row-id>` or `click:<row-id>` (activates the row's Delete control). Operations run in order against an empty container; failures are reported and the run continues."
    )]
    Replay {
        #[arg(required = true)]
        ops: Vec<ReplayOp>,
        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
        /// Also print the container markup
        #[arg(long)]
        html: bool,
    },
    /// Decode the additional enrollments from an urlencoded form body
    Decode {
        body: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration
    CheckConfig {
        #[arg(long)]
        json: bool,
    },
}

fn load_config() -> EnrollmentConfig {
    match EnrollmentConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(%e, "Invalid configuration");
            eprintln!("{}: {}", yansi::Paint::new("Invalid configuration").red(), e);
            process::exit(1);
        }
    }
}

async fn start_server(state: AppState, host: &str, port: u16) {
    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };
    let app = routes::build_router(state);
    tracing::info!(%addr, "Starting enrollment form preview");
    println!(
        "{} {}",
        yansi::Paint::new("Preview running on").green(),
        yansi::Paint::new(format!("http://{}", addr)).cyan()
    );
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", yansi::Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                yansi::Paint::new(format!("Failed to bind to {}", addr)).red(),
                e,
                yansi::Paint::new("Stop the process using this port, or pass a different --port value.").yellow()
            );
            process::exit(1);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("{}: {}", yansi::Paint::new("Failed to encode JSON").red(), e);
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    config::load_env_file(cli.env_file.as_deref());
    let enrollment_config = load_config();

    let command = cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
        rows: 0,
    });

    match command {
        Commands::Serve { host, port, rows } => {
            let host = host.unwrap_or_else(config::get_host);
            let port = match port.map(Ok).unwrap_or_else(config::get_port) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("Invalid configuration").red(), e);
                    process::exit(1);
                }
            };
            let state = AppState::new(enrollment_config, rows, config::get_pkg_dir());
            start_server(state, &host, port).await;
        }
        Commands::Replay { ops, json, html } => {
            let doc = Document::with_container(&enrollment_config.container_id);
            let mut rows = EnrollmentRows::new(doc, enrollment_config, ConsoleNotifier);
            let steps = replay(&mut rows, &ops);
            let views = row_views(rows.dom(), rows.config());
            if json {
                print_json(&serde_json::json!({
                    "steps": steps,
                    "rows": views,
                }));
            } else {
                output::print_steps(&steps);
                output::print_rows(&views);
            }
            if html {
                println!("{}", container_html(rows.dom(), rows.config()).unwrap_or_default());
            }
            if steps.iter().any(|s| !s.is_ok()) {
                process::exit(2);
            }
        }
        Commands::Decode { body, json } => {
            let entries = decode_additional_enrollments(&body, &enrollment_config.field_prefix);
            if json {
                print_json(&entries);
            } else {
                output::print_enrollments(&entries, &enrollment_config.roles);
            }
        }
        Commands::CheckConfig { json } => {
            if json {
                print_json(&enrollment_config);
                return;
            }
            println!("{} {}", yansi::Paint::new("Container:").bold(), enrollment_config.container_id);
            println!("{} {}", yansi::Paint::new("Row ids:").bold(), enrollment_config.row_id(1));
            println!("{} {}", yansi::Paint::new("Fields:").bold(), enrollment_config.field_name(1, "user"));
            let roles: Vec<String> = enrollment_config
                .roles
                .iter()
                .map(|r| format!("{} ({})", r.label, r.code))
                .collect();
            println!("{} {}", yansi::Paint::new("Roles:").bold(), roles.join(", "));
            println!(
                "{} http://{}:{}",
                yansi::Paint::new("Preview:").bold(),
                config::get_host(),
                config::get_port().unwrap_or(DEFAULT_PORT)
            );
            println!("{}", yansi::Paint::new("Configuration OK").green());
        }
    }
}
