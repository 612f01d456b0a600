//! CLI command implementations.

use std::path::Path;

use orbis_io::contract::MatrixSummary;
use orbis_io::store::{self, StorageFormat};
use orbis_io::validator::validate_persisted;
use orbis_math::{DecompositionConfig, DecompositionContext};

/// Print the summary of a stored matrix.
pub fn inspect(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Orbis Matrix Inspector");
    println!("──────────────────────");
    println!();

    let matrix = store::load(path)?;
    let summary = MatrixSummary::from_matrix(&matrix);

    println!("Dimension:    {}", summary.dimension);
    println!("Factor rows:  {}", summary.transparent_dimension);
    println!("Trace:        {:.6e}", summary.trace);
    println!("Norm:         {:.6e}", summary.norm);
    println!("Frobenius:    {:.6e}", summary.frobenius_norm);
    println!("Entry range:  [{:.6e}, {:.6e}]", summary.min, summary.max);
    println!("Diagonal:     {}", if summary.is_diagonal { "yes" } else { "no" });

    Ok(())
}

/// Resize the factor of a stored matrix and write it back.
pub fn resize(input: &str, output: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Orbis Resize");
    println!("────────────");
    println!();

    let mut matrix = store::load(input)?;
    let before = matrix.transparent_dimension();
    matrix.resize_b();

    println!("Factor rows:  {before} → {}", matrix.transparent_dimension());
    store::save(output, &matrix)?;
    println!("Written to:   {output}");

    Ok(())
}

/// Invert a stored matrix with the configured strategy.
pub fn invert(input: &str, output: &str, config_path: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    println!("Orbis Invert");
    println!("────────────");
    println!();

    let config = match config_path {
        Some(path) => DecompositionConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => DecompositionConfig::default(),
    };
    let context = DecompositionContext::from_config(&config)?;
    println!("Strategy:     {}", context.strategy().name());

    let matrix = store::load(input)?;
    let inverse = matrix.inverse_with(context.strategy())?;

    println!("Dimension:    {}", inverse.dimension());
    store::save(output, &inverse)?;
    println!("Written to:   {output}");

    Ok(())
}

/// Validate a matrix file or a decomposition config.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Orbis Validator");
    println!("───────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let content = std::fs::read_to_string(path)?;
        match DecompositionConfig::from_toml_str(&content) {
            Ok(config) => println!("✅ Config is valid ({:?}, threshold {:e}).", config.strategy, config.singularity_threshold),
            Err(e) => println!("❌ Config validation failed: {e}"),
        }
        return Ok(());
    }

    let format = StorageFormat::from_path(Path::new(path))?;
    println!("Validating matrix: {path}");
    let persisted = format.decode(&std::fs::read(path)?)?;
    match validate_persisted(&persisted) {
        Ok(()) => println!(
            "✅ Matrix is valid ({0}x{0}, {1} factor rows).",
            persisted.dimension,
            persisted.factor_transpose.as_ref().map_or(0, Vec::len)
        ),
        Err(e) => println!("❌ Matrix validation failed: {e}"),
    }

    Ok(())
}
