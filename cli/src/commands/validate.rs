use alchemist_core::api as core_api;
use serde_json::json;

use super::cli::{OutputFormat, ValidateArgs};
use super::{to_json, CommandOutput};
use crate::input::load_dataset;

/// Exit code when any finding has error severity.
pub const EXIT_FINDINGS: i32 = 1;

pub async fn handle_validate(
    args: ValidateArgs,
    thresholds: core_api::ValidationThresholds,
    oracle: Option<&dyn core_api::AssistOracle>,
) -> Result<CommandOutput, core_api::CliError> {
    let data = load_dataset(&args.files, oracle).await?;
    let findings = core_api::DataValidator::new(thresholds).validate_dataset(&data);
    let corrections = if args.corrections {
        Some(core_api::suggest_corrections(oracle, &findings).await)
    } else {
        None
    };
    let report = core_api::ValidationReport::build(findings);

    let body = match args.format {
        OutputFormat::Json => to_json(&json!({
            "report": report,
            "corrections": corrections,
        }))?,
        OutputFormat::Text => {
            let mut out = report.format_text();
            if let Some(list) = &corrections {
                out.push_str("Corrections\n");
                for c in list {
                    out.push_str(&format!("- {}\n", c.finding_id));
                    for step in &c.corrections {
                        out.push_str(&format!("    * {step}\n"));
                    }
                }
            }
            out
        }
    };

    let exit_code = if report.has_errors() { EXIT_FINDINGS } else { 0 };
    Ok(CommandOutput { body, exit_code })
}
