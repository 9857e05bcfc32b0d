use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use specbind::config::{load_settings, settings_stub, validate_settings, Settings};
use specbind::diagnostics::Diagnostics;
use specbind::enums::{EnumCollection, VendorSuffixes};
use specbind::processor::EnumProcessor;
use specbind::reader::SpecReader;
use specbind::typemap::{read_target_type_map, read_type_map, TypeMap};
use std::path::Path;

mod cli;

use cli::{Command, EnumsArgs, RootArgs, TypemapArgs};

/// Report schema version for `enums` output.
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnumsReport<'a> {
    schema_version: u32,
    api: &'a str,
    enums: EnumCollection,
    diagnostics: Diagnostics,
}

#[derive(Serialize)]
struct TypemapReport {
    types: TypeMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<TypeMap>,
    diagnostics: Diagnostics,
}

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Enums(args) => run_enums(args),
        Command::Typemap(args) => run_typemap(args),
        Command::SettingsStub => {
            println!("{}", settings_stub()?);
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("specbind=debug")
        } else {
            EnvFilter::new("specbind=warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn settings_from(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => load_settings(path),
        None => {
            let settings = Settings::default();
            validate_settings(&settings)?;
            Ok(settings)
        }
    }
}

fn run_enums(args: EnumsArgs) -> Result<()> {
    let settings = settings_from(args.settings.as_deref())?;

    let reader = SpecReader::new(&settings);
    let mut enums = EnumCollection::with_suffixes(VendorSuffixes::from_settings(&settings));
    let mut diagnostics = Diagnostics::new();
    for spec in &args.specs {
        diagnostics.extend(reader.read_enums(spec, &mut enums, &args.api, &args.versions)?);
    }

    let processor = EnumProcessor::new(&settings, args.overrides)?;
    let (enums, processed) = processor.process(enums, &args.api)?;
    diagnostics.extend(processed);

    tracing::info!(
        enums = enums.len(),
        warnings = diagnostics.len(),
        "processed enums"
    );
    let report = EnumsReport {
        schema_version: REPORT_SCHEMA_VERSION,
        api: &args.api,
        enums,
        diagnostics,
    };
    emit_json(args.out.as_deref(), &report)
}

fn run_typemap(args: TypemapArgs) -> Result<()> {
    let settings = settings_from(args.settings.as_deref())?;

    let (types, mut diagnostics) = read_type_map(&args.typemap)?;
    let target = match &args.target {
        Some(path) => {
            let (target, found) = read_target_type_map(path, &settings)?;
            diagnostics.extend(found);
            Some(target)
        }
        None => None,
    };
    let report = TypemapReport {
        types,
        target,
        diagnostics,
    };
    emit_json(None, &report)
}

fn emit_json<T: Serialize>(path: Option<&Path>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize report")?;
    match path {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote report");
        }
        None => println!("{json}"),
    }
    Ok(())
}
