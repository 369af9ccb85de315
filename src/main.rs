//! Storage Class Resolver CLI
//!
//! Resolves a storage class the same way the CSI controller does and prints
//! the result, checks volume/instance attach compatibility, or dumps the
//! volume type matrix.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use storage_class_resolver::{
    manifest, registry, required_bytes, CapacityRange, InstanceType, ResolverConfig,
    StorageClassResolver, Topology, VolumeType,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Storage Class Resolver - validate block storage classes against the cloud's type matrix
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true, env = "LOG_JSON")]
    log_json: bool,

    /// Volume type used when neither the class nor the topology picks one
    #[arg(long, global = true, env = "DEFAULT_VOLUME_TYPE")]
    default_volume_type: Option<VolumeType>,

    /// Filesystem used when fsType is unset or empty
    #[arg(long, global = true, env = "DEFAULT_FS_TYPE")]
    default_fs_type: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve storage class parameters into a volume configuration
    Resolve {
        /// StorageClass manifest or parameter map (YAML or JSON)
        #[arg(long, short)]
        file: Option<PathBuf>,

        /// Parameter as key=value; overrides values from --file
        #[arg(long = "param", short, value_parser = parse_key_value)]
        params: Vec<(String, String)>,

        /// Instance type of the consuming node (name or code)
        #[arg(long)]
        instance_type: Option<InstanceType>,

        /// Zone of the consuming node
        #[arg(long)]
        zone: Option<String>,

        /// Minimum volume size in bytes
        #[arg(long)]
        required_bytes: Option<i64>,

        /// Maximum volume size in bytes
        #[arg(long)]
        limit_bytes: Option<i64>,

        #[arg(long, short, value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,
    },

    /// Check whether a volume type can attach to an instance type
    AttachCheck {
        /// Volume type (name or code)
        #[arg(long)]
        volume_type: VolumeType,

        /// Instance type (name or code)
        #[arg(long)]
        instance_type: InstanceType,
    },

    /// Print every registered volume type with its constraints
    Matrix {
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {:?}", s))
}

// =============================================================================
// Output
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveOutput {
    volume_type: VolumeType,
    volume_type_name: &'static str,
    fs_type: String,
    replica: u32,
    tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    required_bytes: Option<i64>,
}

fn print<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

// =============================================================================
// Main
// =============================================================================

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&args);

    let mut config = ResolverConfig::default();
    if let Some(volume_type) = args.default_volume_type {
        config.default_volume_type = volume_type;
    }
    if let Some(fs_type) = &args.default_fs_type {
        config.default_fs_type = fs_type.clone();
    }
    let resolver = StorageClassResolver::with_config(config).context("invalid resolver defaults")?;

    match args.command {
        Command::Resolve {
            file,
            params,
            instance_type,
            zone,
            required_bytes: required,
            limit_bytes,
            output,
        } => {
            let mut parameters = BTreeMap::new();
            if let Some(path) = &file {
                parameters = manifest::parameters_from_path(path)
                    .with_context(|| format!("reading {}", path.display()))?;
            }
            parameters.extend(params);

            let topology = instance_type.map(|i| Topology {
                instance_type: i,
                zone,
            });

            let sc = resolver.resolve(&parameters, topology.as_ref())?;

            let required = match (required, limit_bytes) {
                (None, None) => None,
                (r, l) => {
                    let range = CapacityRange::new(r.unwrap_or(0), l.unwrap_or(0));
                    Some(required_bytes(Some(&range))?)
                }
            };

            info!(volume_type = %sc.volume_type(), "Storage class resolved");

            print(
                &ResolveOutput {
                    volume_type: sc.volume_type(),
                    volume_type_name: sc.volume_type().name(),
                    fs_type: sc.fs_type().to_string(),
                    replica: sc.replica(),
                    tags: sc.tags().to_vec(),
                    required_bytes: required,
                },
                output,
            )
        }

        Command::AttachCheck {
            volume_type,
            instance_type,
        } => {
            if !registry::is_attachable(volume_type, instance_type) {
                bail!("{} volumes cannot attach to {} instances", volume_type, instance_type);
            }
            println!("{} volumes can attach to {} instances", volume_type, instance_type);
            Ok(())
        }

        Command::Matrix { output } => print(&registry::matrix(), output),
    }
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // Logs go to stderr so stdout stays machine readable
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
