//! Options command handler

use super::write_output;
use crate::error::{CliError, CliResult};
use crate::{OptionsArgs, OptionsFormat};
use wdgen::options::FormatOptions;

/// Execute the options command
pub fn execute_options(args: &OptionsArgs) -> CliResult<()> {
    write_output(None, &render_default_options(args.format)?)
}

/// Default options in a form that `--options` accepts back.
pub fn render_default_options(format: OptionsFormat) -> CliResult<String> {
    let options = FormatOptions::default();
    match format {
        OptionsFormat::Yaml => {
            serde_yaml_ng::to_string(&options).map_err(|e| CliError::serialize(e.to_string()))
        }
        OptionsFormat::Json => serde_json::to_string_pretty(&options)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| CliError::serialize(e.to_string())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_round_trips() {
        let text = render_default_options(OptionsFormat::Yaml).unwrap();
        assert!(text.contains("rcHost: localhost"));
        assert_eq!(
            FormatOptions::from_yaml_str(&text).unwrap(),
            FormatOptions::default()
        );
    }

    #[test]
    fn test_json_round_trips() {
        let text = render_default_options(OptionsFormat::Json).unwrap();
        assert!(text.contains("\"showSelenese\": false"));
        assert_eq!(
            FormatOptions::from_json_str(&text).unwrap(),
            FormatOptions::default()
        );
    }
}
