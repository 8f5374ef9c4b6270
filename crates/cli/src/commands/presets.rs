use plansim_core::catalog;

use crate::commands::CommandResult;

pub fn run(json: bool) -> CommandResult {
    let entries = catalog();

    if json {
        match serde_json::to_value(entries) {
            Ok(payload) => CommandResult::success_with_report(
                "presets",
                format!("{} presets available", entries.len()),
                payload,
            ),
            Err(error) => CommandResult::failure(
                "presets",
                "serialization",
                format!("could not serialize preset catalog: {error}"),
                4,
            ),
        }
    } else {
        let lines: Vec<String> = entries
            .iter()
            .map(|entry| {
                format!(
                    "{:<10} {:>7.0} GB down, {:>6.0} GB up, {} users: {}",
                    entry.kind.as_str(),
                    entry.download_gb,
                    entry.upload_gb,
                    entry.concurrent_users,
                    entry.description
                )
            })
            .collect();
        CommandResult::rendered(lines.join("\n"))
    }
}
