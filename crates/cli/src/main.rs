//! Stage Tracker CLI - Command-line interface for the Stage Tracker daemon

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9640";
const DEFAULT_EXPORT_FILE: &str = "internship_applications.csv";

#[derive(Parser)]
#[command(name = "stage-tracker")]
#[command(about = "Track internship applications", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "STAGE_TRACKER_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,

    /// Bearer token identifying you to the daemon
    #[arg(long, env = "STAGE_TRACKER_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List your applications, newest first
    List,

    /// Record a new application
    Add {
        /// Company name
        #[arg(short, long)]
        company: String,

        /// Role applied for
        #[arg(short, long)]
        role: String,

        /// applied, interview, offer or rejected
        #[arg(short, long, default_value = "applied")]
        status: String,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Change the status of an application
    Status {
        /// Application ID
        id: String,

        /// applied, interview, offer or rejected
        status: String,
    },

    /// Delete an application
    Delete {
        /// Application ID
        id: String,
    },

    /// Show counts per status
    Stats,

    /// Export your applications as CSV
    Export {
        /// Destination file
        #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
    },
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize)]
struct ApplicationView {
    id: String,
    company: String,
    role: String,
    status: String,
    date_applied: i64,
    notes: Option<String>,
}

#[derive(Deserialize)]
struct ListResult {
    applications: Vec<ApplicationView>,
}

#[derive(Tabled)]
struct ApplicationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Applied")]
    date_applied: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl From<ApplicationView> for ApplicationRow {
    fn from(app: ApplicationView) -> Self {
        Self {
            id: app.id,
            company: app.company,
            role: app.role,
            status: app.status,
            date_applied: format_date(app.date_applied),
            notes: app.notes.unwrap_or_default(),
        }
    }
}

#[derive(Deserialize, Tabled)]
struct CreateResult {
    id: String,
    status: String,
}

#[derive(Deserialize)]
struct StatsResult {
    total: usize,
    applied: usize,
    interview: usize,
    offer: usize,
    rejected: usize,
}

#[derive(Deserialize)]
struct ExportResult {
    csv: String,
}

/// `YYYY-MM-DD` in UTC; falls back to the raw value when out of range
fn format_date(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| millis.to_string())
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let token = cli.token.clone();

    match cli.command {
        Commands::List => {
            let result = call_rpc(
                &cli.rpc_url,
                "applications.list.v1",
                json!({ "auth_token": token }),
            )
            .await?;
            let listed: ListResult = serde_json::from_value(result)?;

            if listed.applications.is_empty() {
                println!("{}", "No applications yet".yellow());
                if token.is_none() {
                    println!("  (no token given; pass --token or set STAGE_TRACKER_TOKEN)");
                }
                return Ok(());
            }

            let rows: Vec<ApplicationRow> = listed
                .applications
                .into_iter()
                .map(ApplicationRow::from)
                .collect();
            println!("{}", Table::new(rows));
        }

        Commands::Add {
            company,
            role,
            status,
            notes,
        } => {
            let params = json!({
                "auth_token": token,
                "company": company,
                "role": role,
                "status": status,
                "notes": notes,
            });

            let result = call_rpc(&cli.rpc_url, "applications.create.v1", params).await?;
            let created: CreateResult = serde_json::from_value(result)?;

            println!("{}", "✓ Application recorded".green().bold());
            println!();
            println!("{}", Table::new(vec![created]));
        }

        Commands::Status { id, status } => {
            let params = json!({
                "auth_token": token,
                "id": id,
                "status": status,
            });

            call_rpc(&cli.rpc_url, "applications.update_status.v1", params).await?;

            println!("{}", format!("✓ {} is now {}", id, status).green().bold());
        }

        Commands::Delete { id } => {
            let params = json!({
                "auth_token": token,
                "id": id,
            });

            call_rpc(&cli.rpc_url, "applications.delete.v1", params).await?;

            println!("{}", format!("✓ Application {} deleted", id).green().bold());
        }

        Commands::Stats => {
            let result = call_rpc(
                &cli.rpc_url,
                "applications.stats.v1",
                json!({ "auth_token": token }),
            )
            .await?;
            let stats: StatsResult = serde_json::from_value(result)?;

            println!("{}", "Application Stats".cyan().bold());
            println!();
            println!("  {} {}", "Total:".bold(), stats.total);
            println!("  {} {}", "Applied:".bold(), stats.applied);
            println!("  {} {}", "Interview:".bold(), stats.interview.to_string().yellow());
            println!("  {} {}", "Offer:".bold(), stats.offer.to_string().green());
            println!("  {} {}", "Rejected:".bold(), stats.rejected.to_string().red());
        }

        Commands::Export { output } => {
            let result = call_rpc(
                &cli.rpc_url,
                "applications.export.v1",
                json!({ "auth_token": token }),
            )
            .await?;
            let export: ExportResult = serde_json::from_value(result)?;

            tokio::fs::write(&output, export.csv.as_bytes())
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;

            let rows = export.csv.lines().count().saturating_sub(1);
            println!(
                "{}",
                format!("✓ Exported {} applications to {}", rows, output.display())
                    .green()
                    .bold()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(1_705_276_800_000), "2024-01-15");
        assert_eq!(format_date(i64::MAX), i64::MAX.to_string());
    }

    #[test]
    fn test_cli_parses_add() {
        let cli = Cli::try_parse_from([
            "stage-tracker",
            "--token",
            "tok",
            "add",
            "--company",
            "Acme",
            "--role",
            "Engineer",
        ])
        .unwrap();

        assert_eq!(cli.token.as_deref(), Some("tok"));
        match cli.command {
            Commands::Add { status, notes, .. } => {
                assert_eq!(status, "applied");
                assert!(notes.is_none());
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_export_default_output() {
        let cli = Cli::try_parse_from(["stage-tracker", "export"]).unwrap();
        match cli.command {
            Commands::Export { output } => assert_eq!(output, PathBuf::from(DEFAULT_EXPORT_FILE)),
            _ => panic!("expected export"),
        }
    }
}
