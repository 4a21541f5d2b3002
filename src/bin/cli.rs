//! BizAnalystics CLI
//!
//! Command-line client for the BizAnalystics backend:
//! - Sign in, register, sign out
//! - Refresh tokens and inspect the session
//! - Fetch the profile, change the password
//! - Export the sales dashboard

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use bizanalytics::auth::{AuthFlows, ChangePasswordForm, FormOutcome, LoginForm, RegistrationForm};
use bizanalytics::client::{ApiClient, ReqwestTransport};
use bizanalytics::config::{generate_default_config, Config};
use bizanalytics::dashboard::DashboardExport;
use bizanalytics::logging;
use bizanalytics::pages::{guard, GuardDecision, Navigator, Page, Redirect, UserBadge};
use bizanalytics::session::{FileStore, Session};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "bizanalytics-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sign in to BizAnalystics and explore the sales dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding the config
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session file, overriding the config
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        email: String,
        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        full_name: String,
        email: String,
        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
        /// Read from stdin when omitted
        #[arg(long)]
        password_confirm: Option<String>,
    },

    /// Sign out and forget the stored tokens
    Logout,

    /// Exchange the refresh token for a new access token
    Refresh,

    /// Show the cached session
    Whoami {
        #[arg(long)]
        json: bool,
    },

    /// Fetch the profile from the backend
    Profile {
        #[arg(long)]
        json: bool,
    },

    /// Change the account password
    ChangePassword {
        #[arg(long)]
        old_password: Option<String>,
        #[arg(long)]
        new_password: Option<String>,
        #[arg(long)]
        new_password_confirm: Option<String>,
    },

    /// Export the sales dashboard
    Dashboard {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Json,
    Html,
}

/// Reports where the browser would go next
struct CliNavigator;

impl Navigator for CliNavigator {
    fn navigate(&self, redirect: Redirect) {
        println!("Next: {}", redirect.to.path());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(path) = cli.session_file {
        config.session.path = path;
    }

    if let Err(e) = logging::init(&config.logging) {
        eprintln!("Logging disabled: {}", e);
    }

    let store = FileStore::open(&config.session.path)
        .with_context(|| format!("opening session {}", config.session.path.display()))?;
    let session = Session::new(store);
    let client = ApiClient::new(config.api.base_url.clone(), ReqwestTransport::new());
    let flows = AuthFlows::new(&session, &client);
    let nav = CliNavigator;

    match cli.command {
        Commands::Login { email, password } => {
            if let GuardDecision::Redirect(to) = guard(Page::Login, session.is_logged_in()) {
                println!("Already signed in.");
                nav.navigate(Redirect::now(to));
                return Ok(());
            }
            let password = match password {
                Some(p) => p,
                None => read_secret("Password: ")?,
            };
            report(flows.login(&LoginForm::new(email, password)).await, &nav);
        }

        Commands::Register {
            full_name,
            email,
            password,
            password_confirm,
        } => {
            let password = match password {
                Some(p) => p,
                None => read_secret("Password: ")?,
            };
            let password_confirm = match password_confirm {
                Some(p) => p,
                None => read_secret("Confirm password: ")?,
            };
            let form = RegistrationForm {
                full_name,
                email,
                password,
                password_confirm,
            };
            report(flows.register(&form).await, &nav);
        }

        Commands::Logout => {
            let redirect = flows.logout().await;
            println!("Signed out.");
            nav.navigate(redirect);
        }

        Commands::Refresh => match flows.refresh().await {
            Ok(true) => println!("Access token refreshed."),
            Ok(false) => {
                eprintln!("Could not refresh the session. Sign in again.");
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Cannot reach server at {}", client.base_url());
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },

        Commands::Whoami { json } => {
            if json {
                let mut snapshot = session.snapshot();
                snapshot.access_token = snapshot.access_token.map(|t| mask(&t));
                snapshot.refresh_token = snapshot.refresh_token.map(|t| mask(&t));
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else if session.is_logged_in() {
                let badge = UserBadge::from_profile(session.user().as_ref());
                println!("Signed in as {} ({})", badge.name, badge.role);
                if session.refresh_token().is_none() {
                    println!("No refresh token stored.");
                }
            } else {
                println!("Not signed in.");
            }
        }

        Commands::Profile { json } => match flows.profile().await {
            Ok(user) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&user)?);
                } else {
                    let badge = UserBadge::from_profile(Some(&user));
                    println!("{:<14} {}", "Name:", badge.name);
                    println!("{:<14} {}", "Email:", user.email.as_deref().unwrap_or("-"));
                    println!("{:<14} {}", "Role:", badge.role);
                    println!("{:<14} {}", "Joined:", user.date_joined.as_deref().unwrap_or("-"));
                    println!(
                        "{:<14} {}",
                        "Last login:",
                        user.last_login.as_deref().unwrap_or("-")
                    );
                }
            }
            Err(e) => {
                eprintln!("Failed to fetch profile: {}", e);
                std::process::exit(1);
            }
        },

        Commands::ChangePassword {
            old_password,
            new_password,
            new_password_confirm,
        } => {
            let form = ChangePasswordForm {
                old_password: match old_password {
                    Some(p) => p,
                    None => read_secret("Current password: ")?,
                },
                new_password: match new_password {
                    Some(p) => p,
                    None => read_secret("New password: ")?,
                },
                new_password_confirm: match new_password_confirm {
                    Some(p) => p,
                    None => read_secret("Confirm new password: ")?,
                },
            };
            report(flows.change_password(&form).await, &nav);
        }

        Commands::Dashboard { format, output } => {
            if let GuardDecision::Redirect(to) = guard(Page::Dashboard, session.is_logged_in()) {
                eprintln!("Not signed in. Run `bizanalytics-cli login <email>` first.");
                nav.navigate(Redirect::now(to));
                std::process::exit(1);
            }

            let export = DashboardExport::standard();
            let content = match format {
                ExportFormat::Json => serde_json::to_string_pretty(&export)?,
                ExportFormat::Html => export.to_html()?,
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Dashboard written to {}", path.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

/// Print a form outcome the way the page would show it
fn report(outcome: FormOutcome, nav: &impl Navigator) {
    match outcome {
        FormOutcome::Success { message, redirect } => {
            println!("{}", message);
            if let Some(redirect) = redirect {
                nav.navigate(redirect);
            }
        }
        FormOutcome::Failure(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    }
}

/// One line from stdin, without the line ending
fn read_secret(prompt: &str) -> anyhow::Result<String> {
    eprint!("{}", prompt);
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Keep only the head of a token for display
fn mask(token: &str) -> String {
    let head: String = token.chars().take(8).collect();
    format!("{}…", head)
}
