use crate::models::args::ValueArgs;
use crate::services::values::collect_values;
use anyhow::Result;
use pmark::annotations::Catalog;

/// Constructs `model` from the given values and prints its snapshot.
///
/// # Errors
/// Returns an error if a value cannot be read or parsed, or if construction fails.
pub fn construct_model(catalog: &Catalog, model: &str, args: &ValueArgs) -> Result<()> {
    let values = collect_values(args)?;
    let instance = catalog.construct(model, values)?;

    println!("{}", serde_json::to_string_pretty(&instance.snapshot()?)?);
    Ok(())
}

/// Builds a label set through the deprecated constructor and prints both snapshots.
///
/// # Errors
/// Returns an error if a value cannot be read or parsed, or if construction fails.
pub fn label_set(catalog: &Catalog, args: &ValueArgs) -> Result<()> {
    let values = collect_values(args)?;
    let renderer = catalog.html_label_set(values)?;

    println!("{}", serde_json::to_string_pretty(&renderer.snapshot()?)?);
    Ok(())
}
