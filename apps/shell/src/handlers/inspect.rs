use anyhow::Result;
use pmark::annotations::Catalog;
use pmark::schema::{DefaultValue, Origin, PropertyDescriptor};
use serde_json::json;

/// Lists every registered model with its parent.
///
/// # Errors
/// Never fails today; the signature matches the other handlers.
pub fn list_models(catalog: &Catalog) -> Result<()> {
    let models = catalog.schema().models();

    println!("\nModels:\n");
    println!("{:<20} {:<20} {:>10}", "Model", "Parent", "Properties");
    println!("{:-<52}", "");
    for model in &models {
        println!(
            "{:<20} {:<20} {:>10}",
            model.name(),
            model.parent().unwrap_or("-"),
            model.descriptors().len()
        );
    }
    println!();

    Ok(())
}

/// Prints the resolved property table of `name`.
///
/// # Errors
/// Returns an error if the model is unknown or JSON encoding fails.
pub fn describe_model(catalog: &Catalog, name: &str, as_json: bool) -> Result<()> {
    let model = catalog.schema().model(name)?;

    if as_json {
        let document = json!({
            "name": model.name(),
            "parent": model.parent(),
            "help": model.help(),
            "properties": model.descriptors(),
        });
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    let parent = model.parent().map(|p| format!(" ({p})")).unwrap_or_default();
    println!("\n{}{parent}\n", model.name());
    println!("{:<28} {:<32} {:<14} {:<22} {}", "Property", "Kind", "Default", "Flags", "Origin");
    println!("{:-<110}", "");
    for descriptor in model.descriptors() {
        println!("{}", table_row(descriptor));
    }
    println!();

    Ok(())
}

fn table_row(descriptor: &PropertyDescriptor) -> String {
    let default = match descriptor.default() {
        DefaultValue::Unset => "<required>".to_owned(),
        DefaultValue::Value(value) => value.to_string(),
    };
    let origin = match descriptor.origin() {
        Origin::Declared { model } => model.clone(),
        Origin::Included { model, group, prefix } if prefix.is_empty() => {
            format!("{model} <- {group}")
        },
        Origin::Included { model, group, prefix } => format!("{model} <- {group} as {prefix}_"),
    };

    format!(
        "{:<28} {:<32} {:<14} {:<22} {}",
        descriptor.name(),
        descriptor.kind().to_string(),
        default,
        descriptor.flags().names().join(","),
        origin
    )
}
