use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use statement_core::{classify, money, render_reminder, respond, AccountBook};
use statement_finance::{
    export_csv_path, render_report, report, search_transactions, spending_by_category,
    total_spending, ReportConfig,
};
use statement_ingest::{save_snapshot, simulate_upload};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod chat;
mod chat_worker;
mod config;
mod state;

use state::{current_statement_path, resolve_statement, FileStore};

#[derive(Parser, Debug)]
#[command(name = "statement", version, about = "Credit-card statement assistant")]
struct Cli {
    /// Statement to use: a JSON snapshot or a PDF (defaults to the last upload, then the sample)
    #[arg(long, global = true)]
    statement: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// "Upload" a PDF statement and make it the current statement
    Upload {
        path: PathBuf,

        /// Skip the processing pause
        #[arg(long, default_value_t = false)]
        no_delay: bool,
    },

    /// Ask the assistant a single question
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,

        /// Print the matched intent before the answer
        #[arg(long, default_value_t = false)]
        explain: bool,
    },

    /// Chat with the assistant
    Chat {
        /// Read questions line by line from stdin instead of the full-screen UI
        #[arg(long, default_value_t = false)]
        plain: bool,
    },

    /// Account summary
    Summary,

    /// Spending per category
    Breakdown,

    /// Search transactions by description
    Search { term: String },

    /// Export transactions as CSV
    Export {
        #[arg(long, default_value = "transactions.csv")]
        out: PathBuf,
    },

    /// Printable report
    Report {
        #[arg(long, default_value_t = false)]
        no_summary: bool,
        #[arg(long, default_value_t = false)]
        no_analysis: bool,
        #[arg(long, default_value_t = false)]
        no_transactions: bool,

        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show the payment reminder email (nothing is sent)
    Remind {
        #[arg(long)]
        email: Option<String>,
    },

    /// Local demo accounts
    Account {
        #[command(subcommand)]
        command: AccountCommand,
    },

    /// Statements saved to your profile
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Configuration file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AccountCommand {
    Create {
        #[arg(long)]
        user: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        email: Option<String>,
    },
    Login {
        #[arg(long)]
        user: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Whoami,
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    /// Save the current statement to your profile
    Save,
    /// List saved statements
    List,
    /// Make a saved statement the current one
    Load { id: i64 },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write ~/.statement/config.toml with defaults
    Init,
    /// Print the effective configuration
    Show,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    tracing::debug!(build = env!("STATEMENT_BUILD_SHA"), "starting");

    match cli.command {
        Command::Upload { path, no_delay } => {
            println!("Processing {}...", path.display());
            let uploaded = simulate_upload(&path)?;
            if !no_delay && cfg.upload.processing_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(cfg.upload.processing_delay_ms)).await;
            }
            let current = current_statement_path()?;
            save_snapshot(&current, &uploaded.snapshot)?;
            println!("Extracted statement from {}\n", uploaded.file_name);
            print!("{}", report::account_summary(&uploaded.snapshot));
        }

        Command::Ask { question, explain } => {
            let data = resolve_statement(cli.statement.as_deref())?;
            let q = question.join(" ");
            if explain {
                println!("[{}]", classify(&q).label());
            }
            println!("{}", respond(&q, &data));
        }

        Command::Chat { plain } => {
            let data = resolve_statement(cli.statement.as_deref())?;
            if plain {
                chat::run_plain(data, &cfg.chat).await?;
            } else {
                chat::run_chat(data, &cfg.chat)?;
            }
        }

        Command::Summary => {
            let data = resolve_statement(cli.statement.as_deref())?;
            print!("{}", report::account_summary(&data));
        }

        Command::Breakdown => {
            let data = resolve_statement(cli.statement.as_deref())?;
            let breakdown = spending_by_category(&data.transactions);
            if breakdown.is_empty() {
                println!("No spending on this statement.");
                return Ok(());
            }
            let total = total_spending(&data.transactions);
            for c in &breakdown {
                let share = c.total / total * 100.0;
                let bar = "#".repeat((share / 2.0).round() as usize);
                println!(
                    "{:<20} ${:>9} {:>3}% {}",
                    c.category,
                    money(c.total),
                    statement_core::percent(share),
                    bar
                );
            }
            println!("{:<20} ${:>9}", "Total", money(total));
        }

        Command::Search { term } => {
            let data = resolve_statement(cli.statement.as_deref())?;
            let hits = search_transactions(&data.transactions, &term);
            print!("{}", report::transaction_history(hits.into_iter()));
        }

        Command::Export { out } => {
            let data = resolve_statement(cli.statement.as_deref())?;
            if data.transactions.is_empty() {
                bail!("no transactions to export");
            }
            export_csv_path(&data.transactions, &out)?;
            println!("Wrote {} transactions to {}", data.transactions.len(), out.display());
        }

        Command::Report {
            no_summary,
            no_analysis,
            no_transactions,
            out,
        } => {
            let data = resolve_statement(cli.statement.as_deref())?;
            let rc = ReportConfig {
                summary: cfg.report.summary && !no_summary,
                analysis: cfg.report.analysis && !no_analysis,
                transactions: cfg.report.transactions && !no_transactions,
            };
            if rc.is_empty() {
                bail!("all report sections are disabled");
            }
            let text = render_report(&data, rc);
            match out {
                Some(p) => {
                    std::fs::write(&p, text).with_context(|| format!("write {}", p.display()))?;
                    println!("Wrote {}", p.display());
                }
                None => print!("{text}"),
            }
        }

        Command::Remind { email } => {
            let data = resolve_statement(cli.statement.as_deref())?;
            let book = AccountBook::new(FileStore::open_default()?);
            let to = match email {
                Some(e) => e,
                None => book
                    .email_for_current()?
                    .unwrap_or_else(|| cfg.reminder.default_email.clone()),
            };
            println!("Email Reminder Set!\n");
            println!("{}", render_reminder(&data, Some(&to)).render());
        }

        Command::Account { command } => {
            let mut book = AccountBook::new(FileStore::open_default()?);
            match command {
                AccountCommand::Create {
                    user,
                    password,
                    email,
                } => {
                    book.create_account(&user, &password, email.as_deref())?;
                    println!("Welcome, {user}");
                }
                AccountCommand::Login { user, password } => {
                    book.login(&user, &password)?;
                    println!("Welcome, {user}");
                }
                AccountCommand::Logout => {
                    book.logout()?;
                    println!("Logged out");
                }
                AccountCommand::Whoami => match book.current_user()? {
                    Some(u) => println!("{u}"),
                    None => println!("Not logged in"),
                },
            }
        }

        Command::History { command } => {
            let mut book = AccountBook::new(FileStore::open_default()?);
            let Some(user) = book.current_user()? else {
                bail!("Log in first: statement account login --user <name> --password <pw>");
            };
            match command {
                HistoryCommand::Save => {
                    let data = resolve_statement(cli.statement.as_deref())?;
                    let entry = book.save_statement(&data, chrono::Utc::now())?;
                    println!("Statement saved to {user}'s profile! (id {})", entry.id);
                }
                HistoryCommand::List => {
                    let history = book.history()?;
                    if history.is_empty() {
                        println!("No saved statements");
                    }
                    for e in history {
                        println!(
                            "{}  Statement from {}  ({}, ${})",
                            e.id,
                            e.date,
                            e.data.card_provider,
                            money(e.data.total_balance)
                        );
                    }
                }
                HistoryCommand::Load { id } => {
                    let entry = book.load_statement(id)?;
                    save_snapshot(current_statement_path()?, &entry.data)?;
                    println!("Loaded history from {}", entry.date);
                }
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}
