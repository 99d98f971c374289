//! versions command - List supported metadata versions

use anyhow::Result;

use crate::cli::Context;
use crate::core::metadata::version::{VersionSpec, VERSION_TABLE};
use crate::core::metadata::LATEST_METADATA_VERSION;
use crate::ui::output;

/// Print one line per supported version with what it adds.
pub fn versions(ctx: &Context) -> Result<()> {
    let lines: Vec<String> = VERSION_TABLE.iter().map(describe).collect();
    output::print(output::format_list(&lines, ""), ctx.verbosity);
    Ok(())
}

fn describe(spec: &VersionSpec) -> String {
    let caps = &spec.capabilities;
    let features: Vec<&str> = [
        (caps.provides_extra, "provides-extra"),
        (caps.description_content_type, "description-content-type"),
        (caps.dynamic, "dynamic"),
        (caps.license_expression, "license-expression"),
        (caps.license_files, "license-file"),
    ]
    .into_iter()
    .filter_map(|(enabled, name)| enabled.then_some(name))
    .collect();

    let marker = if spec.version == LATEST_METADATA_VERSION {
        " (latest)"
    } else {
        ""
    };
    let features = if features.is_empty() {
        "baseline".to_string()
    } else {
        features.join(", ")
    };
    format!("{}{marker}\t{features}", spec.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::MetadataVersion;

    #[test]
    fn baseline_and_latest() {
        assert_eq!(describe(MetadataVersion::V1_2.spec()), "1.2\tbaseline");
        assert_eq!(
            describe(MetadataVersion::V2_4.spec()),
            "2.4 (latest)\tprovides-extra, description-content-type, dynamic, \
             license-expression, license-file"
        );
    }
}
