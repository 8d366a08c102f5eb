//! Output formatting utilities for the CLI.

use serde::Serialize;

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// Render an error the way `output` renders results
pub fn error_output(err: &anyhow::Error, json_mode: bool) -> String {
    if json_mode {
        serde_json::json!({ "success": false, "error": format!("{err:#}") }).to_string()
    } else {
        format!("{} {err:#}", console::style("error:").red().bold())
    }
}
