pub mod detector;
pub mod display_width;
pub mod error;
pub mod fd_ast;
pub mod fd_parser;
pub mod layout;
pub mod normal_form;
pub mod options;
pub mod planner;
pub mod renderer;
pub mod samples;
pub mod sql_export;

pub use error::{Error, ParseError};
pub use fd_ast::{Analysis, AnalysisInput, AttributeSet, FunctionalDependency, SuggestedTable, Violation};
pub use normal_form::NormalForm;
pub use options::AnalysisOptions;

use tracing::info;

/// Parses the dependency text, then detects, classifies and plans.
pub fn analyze(input: &AnalysisInput, options: &AnalysisOptions) -> Result<Analysis, Error> {
    let dependencies =
        fd_parser::parse_dependencies(&input.attributes, &input.dependencies, options.mode)?;
    let violations = detector::detect(&dependencies, &input.primary_key);
    let label = normal_form::classify(&violations);
    let tables = planner::plan(
        &input.table_name,
        &input.attributes,
        &input.primary_key,
        &dependencies,
        &violations,
    );
    info!(table = %input.table_name, %label, violations = violations.len(), "analysis complete");

    Ok(Analysis {
        table_name: input.table_name.clone(),
        label,
        primary_key: input.primary_key.clone(),
        dependencies,
        violations,
        tables,
    })
}

/// Plain-text report with the suggested tables drawn as boxes.
pub fn render(input: &AnalysisInput) -> Result<String, Error> {
    render_with_options(input, &AnalysisOptions::default())
}

pub fn render_with_options(input: &AnalysisInput, options: &AnalysisOptions) -> Result<String, Error> {
    let analysis = analyze(input, options)?;
    let computed = match options.max_width {
        Some(w) => layout::compute_with_max_width(&analysis, w)?,
        None => layout::compute(&analysis),
    };
    Ok(renderer::render(&analysis, &computed, options.claim_bcnf))
}

pub fn render_json(input: &AnalysisInput, options: &AnalysisOptions) -> Result<String, Error> {
    let analysis = analyze(input, options)?;
    Ok(serde_json::to_string_pretty(&analysis)?)
}

pub fn render_sql(input: &AnalysisInput, options: &AnalysisOptions) -> Result<String, Error> {
    let analysis = analyze(input, options)?;
    Ok(sql_export::to_sql(&analysis.tables))
}
