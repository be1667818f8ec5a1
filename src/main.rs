//! Exif Probe - dump the Exif metadata of a JPEG file.

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use serde_json::json;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exif_probe::{
    config::{Config, OutputFormat},
    tiff::{FieldType, Ifd, IfdEntry, ResolvedValue},
    DecodeTrace, ExifDocument, LogTrace, NoopTrace,
};

fn main() -> ExitCode {
    let config = Config::parse();
    init_logging(config.verbose);

    let data = match fs::read(&config.file) {
        Ok(data) => data,
        Err(e) => {
            error!("could not read {}: {}", config.file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let trace: &dyn DecodeTrace = if config.verbose { &LogTrace } else { &NoopTrace };
    let document = match ExifDocument::from_jpeg_traced(&data, trace) {
        Ok(document) => document,
        Err(e) => {
            error!("could not decode {}: {}", config.file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    match config.format {
        OutputFormat::Text => print_text(&document),
        OutputFormat::Json => print_json(&document),
    }

    ExitCode::SUCCESS
}

fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "exif_probe=trace"
    } else {
        "exif_probe=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Text output
// =============================================================================

fn print_text(document: &ExifDocument) {
    for (name, ifd) in document.directories() {
        println!("[{}] at offset {:#x}, {} entries", name, ifd.offset, ifd.len());
        for entry in &ifd.entries {
            println!(
                "  {:#06x} {:<28} {:<9} x{:<5} {}",
                entry.tag,
                tag_name(entry),
                format!("{:?}", entry.value.field_type),
                entry.count,
                render_value(&entry.value),
            );
        }
    }
}

fn tag_name(entry: &IfdEntry) -> String {
    match entry.known_tag() {
        Some(tag) => format!("{tag:?}"),
        None => "-".to_string(),
    }
}

/// Render a value for one-line display, clipping long arrays.
fn render_value(value: &ResolvedValue) -> String {
    const MAX_ELEMENTS: u32 = 8;

    let clipped = value.count.min(MAX_ELEMENTS);
    let suffix = if value.count > MAX_ELEMENTS { ", ..." } else { "" };

    let body = match value.field_type {
        FieldType::Ascii => return format!("{:?}", value.as_string().unwrap_or_default()),
        FieldType::Byte | FieldType::Short | FieldType::Long => join(clipped, |i| {
            value.uint(i).map(|v| v.to_string()).unwrap_or_default()
        }),
        FieldType::SByte | FieldType::SShort | FieldType::SLong => join(clipped, |i| {
            value.sint(i).map(|v| v.to_string()).unwrap_or_default()
        }),
        FieldType::Rational => join(clipped, |i| {
            value
                .rational(i)
                .map(|(n, d)| format!("{n}/{d}"))
                .unwrap_or_default()
        }),
        FieldType::SRational => join(clipped, |i| {
            value
                .srational(i)
                .map(|(n, d)| format!("{n}/{d}"))
                .unwrap_or_default()
        }),
        FieldType::Float => join(clipped, |i| {
            value.float(i).map(|v| v.to_string()).unwrap_or_default()
        }),
        FieldType::Double => join(clipped, |i| {
            value.double(i).map(|v| v.to_string()).unwrap_or_default()
        }),
        FieldType::Undefined => {
            let bytes = value.bytes();
            let shown = bytes.len().min(MAX_ELEMENTS as usize);
            let hex: Vec<String> = bytes[..shown].iter().map(|b| format!("{b:02x}")).collect();
            let suffix = if bytes.len() > shown { " ..." } else { "" };
            return format!("[{}{}]", hex.join(" "), suffix);
        }
    };

    format!("{body}{suffix}")
}

fn join(count: u32, f: impl Fn(u32) -> String) -> String {
    (0..count).map(f).collect::<Vec<_>>().join(", ")
}

// =============================================================================
// JSON output
// =============================================================================

fn print_json(document: &ExifDocument) {
    let mut tree = serde_json::Map::new();
    for (name, ifd) in document.directories() {
        tree.insert(name.to_string(), ifd_to_json(ifd));
    }

    // Serializing an in-memory map cannot fail.
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::Value::Object(tree)).unwrap_or_default()
    );
}

fn ifd_to_json(ifd: &Ifd) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = ifd
        .entries
        .iter()
        .map(|entry| {
            json!({
                "tag": format!("{:#06x}", entry.tag),
                "name": entry.known_tag().map(|t| format!("{t:?}")),
                "type": format!("{:?}", entry.value.field_type),
                "count": entry.count,
                "value": value_to_json(&entry.value),
            })
        })
        .collect();

    json!({
        "offset": ifd.offset,
        "next_offset": ifd.next_offset,
        "entries": entries,
    })
}

fn value_to_json(value: &ResolvedValue) -> serde_json::Value {
    match value.field_type {
        FieldType::Ascii => json!(value.as_string()),
        FieldType::Byte | FieldType::Short | FieldType::Long => {
            json!((0..value.count).filter_map(|i| value.uint(i)).collect::<Vec<_>>())
        }
        FieldType::SByte | FieldType::SShort | FieldType::SLong => {
            json!((0..value.count).filter_map(|i| value.sint(i)).collect::<Vec<_>>())
        }
        FieldType::Rational => json!((0..value.count)
            .filter_map(|i| value.rational(i))
            .map(|(n, d)| json!([n, d]))
            .collect::<Vec<_>>()),
        FieldType::SRational => json!((0..value.count)
            .filter_map(|i| value.srational(i))
            .map(|(n, d)| json!([n, d]))
            .collect::<Vec<_>>()),
        FieldType::Float => {
            json!((0..value.count).filter_map(|i| value.float(i)).collect::<Vec<_>>())
        }
        FieldType::Double => {
            json!((0..value.count).filter_map(|i| value.double(i)).collect::<Vec<_>>())
        }
        FieldType::Undefined => json!(value
            .bytes()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<String>()),
    }
}
