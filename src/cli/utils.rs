use serde::Serialize;

use crate::cli::OutputFormat;

/// Print `data` as pretty JSON, or hand it to `text` for human output
pub fn output<T, F>(output_format: OutputFormat, data: &T, text: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T),
{
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Text => text(data),
    }
    Ok(())
}

/// Comma-separated list, or a dash when empty
pub fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_values() {
        assert_eq!(join_or_dash(&[]), "-");
        assert_eq!(join_or_dash(&["Spain".into(), "Chile".into()]), "Spain, Chile");
    }
}
