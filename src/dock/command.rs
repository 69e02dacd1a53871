pub mod ir;

use ir::IrSend;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A text message sent to the dock.
///
/// The JSON root carries a `type` tag:
///    { "type": "auth", "token": "0000" }
///    { "type": "dock", "id": 1, "command": "ir_send", ... }
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Auth { token: SmolStr },
    Dock(DockPayload),
}

impl Request {
    pub fn auth(token: impl Into<SmolStr>) -> Self {
        Request::Auth {
            token: token.into(),
        }
    }

    pub fn dock(id: u32, command: DockCommand) -> Self {
        Request::Dock(DockPayload { id, command })
    }

    /// Message id, if the message carries one.
    pub fn id(&self) -> Option<u32> {
        match self {
            Request::Auth { .. } => None,
            Request::Dock(payload) => Some(payload.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockPayload {
    pub id: u32,

    // Flattened so the command tag sits next to the id:
    // { "id": 1, "command": "ir_stop" }
    #[serde(flatten)]
    pub command: DockCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum DockCommand {
    #[serde(rename = "ir_send")]
    IrSend(IrSend),
    #[serde(rename = "ir_stop")]
    IrStop,
}

/// Per-connection message id source. The first id handed out is 1.
#[derive(Debug, Default)]
pub struct SequenceId(u32);

impl SequenceId {
    pub fn next_id(&mut self) -> u32 {
        self.0 += 1;
        self.0
    }

    /// Last id handed out, 0 before the first call.
    pub fn current(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ir::{IrFormat, IrOutputs};
    use serde_json::json;

    #[test]
    fn test_auth() {
        let actual = serde_json::to_value(Request::auth("0000")).unwrap();
        assert_eq!(actual, json!({"type": "auth", "token": "0000"}));
    }

    #[test]
    fn test_ir_send_with_repeat() {
        let cmd = Request::dock(
            7,
            DockCommand::IrSend(IrSend::new("17;0x2A4C0A8A0282;48;3").with_repeat(3)),
        );
        let actual = serde_json::to_value(&cmd).unwrap();
        let expected = json!({
            "type": "dock",
            "id": 7,
            "command": "ir_send",
            "code": "17;0x2A4C0A8A0282;48;3",
            "format": "hex",
            "repeat": 3,
            "int_side": true,
            "int_top": false,
            "ext1": true,
            "ext2": true
        });
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_ir_send_without_repeat() {
        let cmd = Request::dock(1, DockCommand::IrSend(IrSend::new("0000 006C 0022")));
        let actual = serde_json::to_value(&cmd).unwrap();
        let expected = json!({
            "type": "dock",
            "id": 1,
            "command": "ir_send",
            "code": "0000 006C 0022",
            "format": "pronto",
            "int_side": true,
            "int_top": false,
            "ext1": true,
            "ext2": true
        });
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_ir_stop() {
        let actual = serde_json::to_value(Request::dock(123, DockCommand::IrStop)).unwrap();
        assert_eq!(
            actual,
            json!({"type": "dock", "id": 123, "command": "ir_stop"})
        );
    }

    #[test]
    fn decode_gc_send() {
        let raw = json!({
            "type": "dock",
            "id": 2,
            "command": "ir_send",
            "code": "sendir,1:1,1,38000",
            "format": "gc",
            "int_side": false,
            "int_top": true,
            "ext1": false,
            "ext2": false
        });
        let actual = serde_json::from_value::<Request>(raw).unwrap();
        assert_eq!(
            actual,
            Request::dock(
                2,
                DockCommand::IrSend(IrSend {
                    code: "sendir,1:1,1,38000".into(),
                    format: IrFormat::Gc,
                    repeat: None,
                    outputs: IrOutputs {
                        int_side: false,
                        int_top: true,
                        ext1: false,
                        ext2: false,
                    },
                })
            )
        );
    }

    #[test]
    fn sequence_ids_increase_from_one() {
        let mut ids = SequenceId::default();
        assert_eq!(ids.current(), 0);
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.current(), 2);
    }
}
