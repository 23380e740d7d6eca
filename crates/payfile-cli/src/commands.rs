use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use payfile_ledger::{PaymentFileState, Timeline, WorkflowAudit};
use payfile_sdk::{
    AssignChannel, Command as PaymentCommand, CommandContext, CompleteFraudCheck, CorrelationId,
    CreateOptimizedFile, OptimizeFile, PaymentFileId, PaymentFiles, ReceiveFile, SubmitToBank,
    ValidateFile,
};
use serde_json::json;

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Command::Run(args) => cmd_run(args, &config, format),
        Command::Demo => cmd_demo(&config, format),
        Command::Audit(args) => cmd_audit(args, &config, format),
    }
}

fn cmd_run(args: RunArgs, config: &CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    let service = PaymentFiles::new();
    apply_script(&service, load_script(&args.script, config)?, config)?;

    match args.correlation {
        Some(raw) => {
            let id: CorrelationId = raw.parse()?;
            print_journey(&service, &id, format)
        }
        None => print_correlation_ids(&service, format),
    }
}

fn cmd_demo(config: &CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    let service = PaymentFiles::new();
    let (group, script) = demo_script();
    apply_script(&service, script, config)?;
    print_journey(&service, &group, format)
}

fn cmd_audit(args: AuditArgs, config: &CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    let service = PaymentFiles::new();
    apply_script(&service, load_script(&args.script, config)?, config)?;
    let audits = service.queries().audit_all()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&audits)?),
        OutputFormat::Text => {
            for audit in &audits {
                print_audit(audit);
            }
            let flagged = audits.iter().filter(|a| !a.is_clean()).count();
            println!("{} journey(s), {} with findings", audits.len(), flagged);
        }
    }
    Ok(())
}

/// Read a script and fill in the configured actor/source defaults.
fn load_script(path: &Path, config: &CliConfig) -> anyhow::Result<Vec<PaymentCommand>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    let mut commands = PaymentCommand::parse_script(&raw)
        .with_context(|| format!("parsing script {}", path.display()))?;
    for command in &mut commands {
        command.fill_defaults(&config.default_actor, &config.default_source);
    }
    Ok(commands)
}

fn apply_script(
    service: &PaymentFiles,
    commands: Vec<PaymentCommand>,
    config: &CliConfig,
) -> anyhow::Result<()> {
    let count = commands.len();
    service.execute_all(commands)?;
    tracing::info!(commands = count, "script applied");

    if config.audit_warnings {
        for audit in service.queries().audit_all()? {
            for finding in &audit.findings {
                tracing::warn!(
                    correlation = %audit.correlation_id,
                    position = finding.position,
                    event = %finding.event,
                    "{}",
                    finding.description
                );
            }
        }
    }
    Ok(())
}

/// The happy-path journey: receipt through submission, with the optimized
/// file kept in the original's correlation group.
fn demo_script() -> (CorrelationId, Vec<PaymentCommand>) {
    let id = PaymentFileId::new();
    let group = CorrelationId::from(id);
    let ctx = |actor: &str, source: &str| CommandContext::new(id, actor, source).correlated(group);

    let script = vec![
        PaymentCommand::Receive(
            ReceiveFile::new("storage://inbound/pain001-demo.xml", "alice", "upload-portal")
                .with_id(id),
        ),
        PaymentCommand::Validate(ValidateFile {
            context: ctx("validator", "schema-check"),
            is_valid: true,
        }),
        PaymentCommand::AssignChannel(AssignChannel {
            context: ctx("router", "channel-rules"),
            channel: "SWIFT".into(),
        }),
        PaymentCommand::CompleteFraudCheck(CompleteFraudCheck {
            context: ctx("fraud-engine", "screening"),
            passed: true,
            error: None,
        }),
        PaymentCommand::Optimize(OptimizeFile {
            context: ctx("optimizer", "batching"),
            optimized: true,
            details: "merged 3 batches into 1".into(),
        }),
        PaymentCommand::CreateOptimizedFile(CreateOptimizedFile {
            original_file_id: id,
            storage_ref: "storage://outbound/pain001-demo-optimized.xml".into(),
            actor: "optimizer".into(),
            source: "batching".into(),
            correlation_id: Some(group),
        }),
        PaymentCommand::SubmitToBank(SubmitToBank {
            context: ctx("gateway", "bank-connector"),
        }),
    ];
    (group, script)
}

fn print_correlation_ids(service: &PaymentFiles, format: OutputFormat) -> anyhow::Result<()> {
    let queries = service.queries();
    let ids = queries.correlation_ids()?;

    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = ids
                .iter()
                .map(|id| {
                    let events = queries.events_by_correlation_id(id).map(|e| e.len())?;
                    Ok(json!({ "correlationId": id, "events": events }))
                })
                .collect::<anyhow::Result<_>>()?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Text => {
            if ids.is_empty() {
                println!("No events recorded.");
            }
            for id in &ids {
                let events = queries.events_by_correlation_id(id)?;
                println!("{}  {} event(s)", id.to_string().cyan(), events.len());
            }
        }
    }
    Ok(())
}

fn print_journey(service: &PaymentFiles, id: &CorrelationId, format: OutputFormat) -> anyhow::Result<()> {
    let state = service.queries().state(id)?;
    let timeline = service.queries().timeline(id)?;

    match format {
        OutputFormat::Json => {
            let report = json!({ "state": state, "timeline": timeline });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("Journey {}", id.to_string().cyan().bold());
            if timeline.is_empty() {
                println!("  No events recorded.");
                return Ok(());
            }
            print_state(&state);
            println!();
            print_timeline(&timeline);
        }
    }
    Ok(())
}

fn print_state(state: &PaymentFileState) {
    let unset = || "-".dimmed().to_string();
    let file = state
        .file
        .as_ref()
        .map(|f| format!("{} ({})", f.id.short_id(), f.storage_ref))
        .unwrap_or_else(unset);
    let valid = match state.is_valid {
        Some(true) => "yes".green().to_string(),
        Some(false) => "no".red().to_string(),
        None => unset(),
    };
    let channel = state.channel.map(|c| c.to_string()).unwrap_or_else(unset);
    let fraud = match &state.fraud_check {
        Some(result) if result.is_passed() => result.to_string().green().to_string(),
        Some(result) => result.to_string().red().to_string(),
        None => unset(),
    };
    let optimization = state
        .optimization
        .as_ref()
        .map(|o| o.details.clone())
        .unwrap_or_else(unset);
    let optimized_file = state
        .optimized_file
        .as_ref()
        .map(|f| format!("{} ({})", f.id.short_id(), f.storage_ref))
        .unwrap_or_else(unset);
    let submitted = state
        .submitted_at
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(unset);

    println!("  File:           {file}");
    println!("  Valid:          {valid}");
    println!("  Channel:        {channel}");
    println!("  Fraud check:    {fraud}");
    println!("  Optimization:   {optimization}");
    println!("  Optimized file: {optimized_file}");
    println!("  Submitted at:   {submitted}");
}

fn print_timeline(timeline: &Timeline) {
    for entry in &timeline.entries {
        println!(
            "  {} {} {:<20} {} {}",
            format!("#{}", entry.position).yellow(),
            entry.created_at.format("%H:%M:%S%.3f").to_string().dimmed(),
            entry.kind.to_string().bold(),
            entry.summary,
            format!("[{} via {}]", entry.actor, entry.source).dimmed(),
        );
    }
}

fn print_audit(audit: &WorkflowAudit) {
    if audit.is_clean() {
        println!("{} {} ({} events)", "✓".green().bold(), audit.correlation_id, audit.event_count);
        return;
    }
    println!("{} {} ({} events)", "!".yellow().bold(), audit.correlation_id, audit.event_count);
    for finding in &audit.findings {
        println!(
            "    #{} {}: {}",
            finding.position,
            finding.event.to_string().bold(),
            finding.description
        );
    }
}
