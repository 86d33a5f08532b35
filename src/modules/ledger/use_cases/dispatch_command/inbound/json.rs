// JSON inbound adapter: turns a `{ "type": ..., "payload": ... }` envelope into a command.

use crate::modules::ledger::core::commands::LedgerCommand;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("malformed command: {0}")]
pub struct MalformedCommand(#[from] serde_json::Error);

pub fn parse_command(text: &str) -> Result<LedgerCommand, MalformedCommand> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod json_inbound_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_parse_a_well_formed_envelope() {
        let command = parse_command(
            r#"{"type":"ApplyElectricityBill","payload":{"readingId":"e1"}}"#,
        )
        .unwrap();
        assert_eq!(
            command,
            LedgerCommand::ApplyElectricityBill {
                reading_id: "e1".into()
            }
        );
    }

    #[rstest]
    fn it_should_report_a_malformed_payload() {
        let error = parse_command(r#"{"type":"ApplyElectricityBill","payload":{"reading":1}}"#)
            .unwrap_err();
        assert!(error.to_string().starts_with("malformed command"));
    }
}
