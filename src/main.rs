//! Form Designer CLI.
//!
//! Lädt ein Formular (Envelope), gibt die Gliederung des Canvas aus und prüft
//! optional eine Werte-Datei gegen die Feldtypen.

use anyhow::Context;
use form_designer::submit::failed_ids;
use form_designer::{parse_envelope, parse_values, validate_all, DesignerOptions, FieldRegistry};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Form Designer v{} startet...", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let Some(form_path) = args.next() else {
        eprintln!("Aufruf: form-designer <form.json> [values.json]");
        std::process::exit(2);
    };
    let values_path = args.next();

    // Optionen aus TOML laden (oder Standardwerte)
    let options = DesignerOptions::load_from_file(&DesignerOptions::config_path());
    let registry = FieldRegistry::with_builtins();

    let content = std::fs::read_to_string(&form_path)
        .with_context(|| format!("Formular nicht lesbar: {}", form_path.display()))?;
    let canvas = parse_envelope(&content, &options.default_global_settings())?;

    println!(
        "{} ({} Elemente, Hintergrund {}, Submit {})",
        form_path.display(),
        canvas.len(),
        canvas.global_settings.background_color,
        if canvas.global_settings.show_submit { "an" } else { "aus" }
    );
    for (index, element) in canvas.elements.iter().enumerate() {
        let Some(field_type) = registry.lookup(&element.field_type) else {
            log::warn!(
                "Unbekannter Feldtyp '{}' ({}) übersprungen",
                element.field_type,
                element.id
            );
            continue;
        };
        let preview = field_type.designer_preview(element);
        println!(
            "{:>3}. {:<14} {:<36} {}{}",
            index + 1,
            field_type.palette_entry().label,
            element.id,
            preview.label,
            if preview.required { " *" } else { "" }
        );
    }

    let Some(values_path) = values_path else {
        return Ok(());
    };
    let raw_values = std::fs::read_to_string(&values_path)
        .with_context(|| format!("Werte nicht lesbar: {}", values_path.display()))?;
    let values = parse_values(&raw_values)?;
    let results = validate_all(&registry, &canvas.elements, &values);
    let failed = failed_ids(&results);
    if failed.is_empty() {
        println!("Alle {} Felder gültig", results.len());
        return Ok(());
    }
    for id in &failed {
        println!("ungültig: {id}");
    }
    log::warn!("{} von {} Feldern ungültig", failed.len(), results.len());
    std::process::exit(1);
}
