use crate::config::GeneratorConfig;

/// Derives enumeration constant names from key code identifiers
#[derive(Debug, Clone, Copy)]
pub struct EnumNaming<'c> {
    prefix: &'c str,
}

impl<'c> EnumNaming<'c> {
    pub fn new(prefix: &'c str) -> Self {
        Self { prefix }
    }

    pub fn from_config(config: &'c GeneratorConfig) -> Self {
        Self::new(&config.enum_prefix)
    }

    /// `esc` → `Q_KEY_CODE_ESC`
    pub fn enum_name(&self, id: &str) -> String {
        format!("{}{}", self.prefix, id.to_uppercase())
    }
}
