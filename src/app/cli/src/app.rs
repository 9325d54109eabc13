// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use cms_search_elasticsearch::ElasticsearchGateway;
use cms_search_inmem::*;
use cms_search_services::reporters::{LoggingProgressReporter, TracingErrorReporter};
use dill::{Catalog, CatalogBuilder};
use time_source::SystemTimeSourceDefault;

use crate::config::CLIConfig;
use crate::error::*;
use crate::output::OutputConfig;
use crate::{cli, cli_commands};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const BINARY_NAME: &str = "searchctl";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LOGGING_CONFIG: &str = "warn";
const INFO_LOGGING_CONFIG: &str = "info";
const VERBOSE_LOGGING_CONFIG: &str = "debug";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn run(args: cli::Cli) -> Result<(), CLIError> {
    let output_config = OutputConfig::detect(args.quiet, args.verbose);

    configure_logging(&output_config, args.log_json);
    tracing::info!(
        version = VERSION,
        args = ?std::env::args().collect::<Vec<_>>(),
        config_path = %args.config.display(),
        "Initializing {BINARY_NAME}"
    );

    let result = async {
        let config = CLIConfig::load(&args.config)?;
        tracing::info!(
            num_definitions = config.indexes.definitions.len(),
            elasticsearch_url = config.elasticsearch.as_ref().map(|c| c.url.as_str()),
            "Loaded configuration"
        );

        let catalog = configure_catalog(&config, output_config.clone()).build();

        execute(&catalog, args.command).await
    }
    .await;

    match &result {
        Ok(()) => {
            tracing::info!("Command successful");
        }
        Err(err) => {
            tracing::error!(
                error_dbg = ?err,
                error = %err.pretty(true),
                "Command failed",
            );

            eprintln!("{}", err.pretty(output_config.verbosity_level > 0));
        }
    }

    result
}

pub async fn execute(catalog: &Catalog, command: cli::Command) -> Result<(), CLIError> {
    let mut command = cli_commands::get_command(catalog, command)?;
    command.run().await
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Catalog
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn configure_catalog(config: &CLIConfig, output_config: OutputConfig) -> CatalogBuilder {
    let mut b = CatalogBuilder::new();

    b.add_value(config.indexes.clone());
    b.add_value(config.maintenance.clone());
    b.add_value(config.jobs.clone());
    b.add_value(output_config);

    b.add::<SystemTimeSourceDefault>();
    b.add::<TracingErrorReporter>();
    b.add::<LoggingProgressReporter>();

    cms_search_services::register_dependencies(&mut b);

    if let Some(es_config) = &config.elasticsearch {
        b.add_value(es_config.clone());
        b.add::<ElasticsearchGateway>();
    } else {
        tracing::warn!("No elasticsearch section configured, using a throwaway in-memory engine");
        b.add::<InMemorySearchEngine>();
    }

    // Content comes from export files and coordination state lives for the
    // duration of one command
    b.add::<InMemoryContentRepository>();
    b.add::<InMemoryLeaseStore>();
    b.add::<InMemoryLivenessCache>();
    b.add::<InMemorySearchJobQueue>();

    b
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Logging
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn configure_logging(output_config: &OutputConfig, json: bool) {
    use tracing_subscriber::EnvFilter;

    // Logging may be already initialized when running under tests
    if tracing::dispatcher::has_been_set() {
        return;
    }

    // Use configuration from RUST_LOG env var if provided
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match output_config.verbosity_level {
            0 => EnvFilter::new(DEFAULT_LOGGING_CONFIG),
            1 => EnvFilter::new(INFO_LOGGING_CONFIG),
            _ => EnvFilter::new(VERBOSE_LOGGING_CONFIG),
        },
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let res = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = res {
        eprintln!("Failed to initialize logging: {e}");
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
