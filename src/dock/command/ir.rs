use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Textual encoding of an IR code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IrFormat {
    /// `<protocol>;<hex code>;<bits>;<repeat>`
    Hex,
    /// Global Caché `sendir,...`
    Gc,
    Pronto,
}

impl IrFormat {
    /// Infers the format from the code syntax.
    ///
    /// The `sendir` prefix wins over the `;` delimiter.
    pub fn infer(code: &str) -> Self {
        if code.starts_with("sendir") {
            IrFormat::Gc
        } else if code.contains(';') {
            IrFormat::Hex
        } else {
            IrFormat::Pronto
        }
    }
}

/// IR emitter selection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrOutputs {
    pub int_side: bool,
    pub int_top: bool,
    pub ext1: bool,
    pub ext2: bool,
}

impl Default for IrOutputs {
    fn default() -> Self {
        Self {
            int_side: true,
            int_top: false,
            ext1: true,
            ext2: true,
        }
    }
}

/// Payload of an `ir_send` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrSend {
    pub code: SmolStr,
    pub format: IrFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<u32>,
    #[serde(flatten)]
    pub outputs: IrOutputs,
}

impl IrSend {
    /// Builds an `ir_send` payload with the format inferred from `code`.
    pub fn new(code: impl Into<SmolStr>) -> Self {
        let code = code.into();
        Self {
            format: IrFormat::infer(&code),
            code,
            repeat: None,
            outputs: IrOutputs::default(),
        }
    }

    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = Some(repeat);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_hex() {
        assert_eq!(IrFormat::infer("17;0x2A4C0A8A0282;48;3"), IrFormat::Hex);
        assert_eq!(IrFormat::infer(";"), IrFormat::Hex);
    }

    #[test]
    fn infer_global_cache() {
        assert_eq!(
            IrFormat::infer("sendir,1:1,1,38000,1,1,172,172,22,64,22,1820"),
            IrFormat::Gc
        );
    }

    #[test]
    fn sendir_prefix_wins_over_delimiter() {
        assert_eq!(IrFormat::infer("sendir,1:1;38000"), IrFormat::Gc);
    }

    #[test]
    fn infer_pronto_fallback() {
        assert_eq!(
            IrFormat::infer("0000 006C 0022 0002 015B 00AD 0016 0016"),
            IrFormat::Pronto
        );
        assert_eq!(IrFormat::infer(""), IrFormat::Pronto);
        // Prefix must be at the start.
        assert_eq!(IrFormat::infer(" sendir,1:1"), IrFormat::Pronto);
    }

    #[test]
    fn new_payload_uses_default_outputs() {
        let payload = IrSend::new("sendir,1:1,1,38000");
        assert_eq!(payload.format, IrFormat::Gc);
        assert_eq!(payload.repeat, None);
        assert_eq!(payload.outputs, IrOutputs::default());
        assert_eq!(IrSend::new("1;2").with_repeat(3).repeat, Some(3));
    }
}
