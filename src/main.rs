use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use serde::Serialize;
use std::fmt::Display;
use zabbix_dependencies::prelude::{
    get_subscriber, init_subscriber, Application, BranchOptions, CliArgs, Command,
    DependencyOptions, OutputFormat, ZabbixConfig,
};

fn print<R: Display + Serialize>(report: &R, output: OutputFormat) -> anyhow::Result<()> {
    match output {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(report).context("Failed to serialize report")?
        ),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let args = CliArgs::parse();

    let subscriber = get_subscriber(
        "zabbix-dependencies".into(),
        args.log_level.as_filter().into(),
        std::io::stderr,
    );
    init_subscriber(subscriber)?;

    let configuration = ZabbixConfig::load().context("Failed to load configuration")?;
    let application = Application::start(&configuration)
        .await
        .context("Failed to connect to the Zabbix API")?;

    match args.command {
        Command::Run {
            host_id,
            parent_trigger_id,
            enabled_only,
            output,
        } => {
            let report = application
                .run(
                    &host_id,
                    &parent_trigger_id,
                    DependencyOptions { enabled_only },
                )
                .await?;
            print(&report, output)?;
        }
        Command::Branch {
            groups,
            parent_group,
            description,
            output,
        } => {
            let options = BranchOptions {
                groups,
                parent_group,
                description,
            };
            let report = application.branch(&options).await?;
            print(&report, output)?;
        }
    }

    Ok(())
}
