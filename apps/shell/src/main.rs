//! `ehub`: resolves a hostname against the configured tenants and reports
//! what the layout for a route would render. `ehub domains` manages the
//! domain registry seeded from the same config.

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use ehub::domain::config::AppConfig;
use ehub::domain::state::ResolutionState;
use ehub::features::tenancy::prelude::*;
use ehub::kernel::config::load_config;
use ehub_logger::Logger;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "ehub", version, about = "Resolve a tenant and show what a page would render")]
struct Cli {
    /// Config file; `config/ehub.toml` when present, else `ehub.toml` in the working directory.
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Hostname to resolve; overrides `tenancy.hostname`.
    #[arg(long, value_name = "HOSTNAME")]
    host: Option<String>,

    /// Route to render.
    #[arg(long, value_name = "ROUTE", default_value = "/")]
    path: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Super-admin domain management
    Domains {
        #[command(subcommand)]
        action: DomainAction,
    },
}

/// Changes apply to the registry loaded from config and are not written back.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum DomainAction {
    /// List every registered domain
    List,
    /// Register a domain as pending
    Register {
        domain: String,
        #[arg(long)]
        brand: String,
        #[arg(long, value_name = "EMAIL")]
        admin_email: Option<String>,
    },
    /// Change the status of a domain (active, pending, suspended)
    Status { domain: String, status: DomainStatus },
    /// Remove a domain
    Remove { domain: String },
}

#[ehub_runtime::main(ui)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let path = ehub::config_path(cli.config.as_deref(), Path::new(""));
    let config: AppConfig = load_config(path).context("Loading configuration")?;
    let _logger = Logger::from_config(env!("CARGO_BIN_NAME"), &config.logging)?;

    let document = Arc::new(MemoryDocument::new());
    let context = ehub::init(&config, document.clone())?;
    let mut out = io::stdout().lock();

    if let Some(Command::Domains { action }) = &cli.command {
        run_domains(&mut out, context.resolver().registry(), action)?;
        out.flush()?;
        return Ok(());
    }

    let hostname = ehub::hostname(&config, cli.host.as_deref());
    let phase = context.initialize(&hostname).await?;
    tracing::debug!(%hostname, %phase, "Resolution settled");

    write_report(&mut out, &hostname, &cli.path, &context.state(), &document)?;
    out.flush()?;

    context.dispose();
    Ok(())
}

fn run_domains(
    out: &mut impl Write,
    registry: &DomainRegistry,
    action: &DomainAction,
) -> anyhow::Result<()> {
    match action {
        DomainAction::List => {},
        DomainAction::Register { domain, brand, admin_email } => {
            let id = registry.register(NewDomain {
                domain: domain.clone(),
                brand_name: brand.clone(),
                admin_email: admin_email.clone(),
            })?;
            writeln!(out, "registered {domain} as {id} (pending)")?;
        },
        DomainAction::Status { domain, status } => {
            registry.set_status(domain, *status)?;
            writeln!(out, "{domain} is now {status}")?;
        },
        DomainAction::Remove { domain } => {
            registry
                .remove(domain)
                .ok_or_else(|| anyhow::anyhow!("domain '{domain}' is not registered"))?;
            writeln!(out, "removed {domain}")?;
        },
    }
    write_domains(out, registry)?;
    Ok(())
}

fn write_domains(out: &mut impl Write, registry: &DomainRegistry) -> io::Result<()> {
    for entry in registry.list() {
        writeln!(
            out,
            "{:<32} {:<10} {:<24} {}",
            entry.config.domain,
            entry.status,
            entry.config.brand_name,
            entry.admin_email.as_deref().unwrap_or("-"),
        )?;
    }
    Ok(())
}

fn write_report(
    out: &mut impl Write,
    hostname: &str,
    path: &str,
    state: &ResolutionState,
    document: &MemoryDocument,
) -> io::Result<()> {
    let branch = branch_for(path, state);
    writeln!(out, "host:   {hostname}")?;
    writeln!(out, "route:  {path} ({:?})", Route::classify(path))?;

    match &branch {
        RenderBranch::Content(tenant)
        | RenderBranch::SuperAdmin(Some(tenant))
        | RenderBranch::Stage(Some(tenant)) => {
            writeln!(out, "tenant: {} [{}]", tenant.brand_name, tenant.id)?;
            writeln!(
                out,
                "colors: primary={} secondary={} accent={}",
                tenant.primary_color, tenant.secondary_color, tenant.accent_color
            )?;
            writeln!(out, "features: {}", tenant.features.names().join(", "))?;
        },
        RenderBranch::SuperAdmin(None) => writeln!(out, "tenant: none (super-admin)")?,
        RenderBranch::Stage(None) => writeln!(out, "tenant: none (stage)")?,
        other => writeln!(out, "{}: {}", other.title(), other.message())?,
    }

    for node in document.nodes() {
        writeln!(out, "<{} id=\"{}\"> {} bytes", node.kind, node.id, node.text.len())?;
    }
    Ok(())
}
