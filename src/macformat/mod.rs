use std::fmt::Display;

use log::debug;
use serde::Deserialize;
use serde_json::Value;

pub mod config;
pub mod error;
pub mod mac;

use self::config::MacFormatConfig;
use self::error::{InvalidField, MacResult, TransformError};
use self::mac::MacAddr;

/// One row of the record stream.
pub type Record = serde_json::Map<String, Value>;

pub const DEFAULT_INPUT: &str = "macaddress";

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MacFormat {
    /// 1122.3344.5566
    Cisco,
    /// 11-22-33-44-55-66
    Dash,
    /// 11:22:33:44:55:66
    Ieee,
    /// 112233445566
    #[default]
    None,
}

impl MacFormat {
    pub const ALL: [MacFormat; 4] = [MacFormat::Cisco, MacFormat::Dash, MacFormat::Ieee, MacFormat::None];

    pub fn separator(self) -> &'static str {
        match self {
            MacFormat::Cisco => ".",
            MacFormat::Dash => "-",
            MacFormat::Ieee => ":",
            MacFormat::None => "",
        }
    }

    pub fn group_width(self) -> usize {
        match self {
            MacFormat::Cisco => 4,
            MacFormat::Dash | MacFormat::Ieee | MacFormat::None => 2,
        }
    }
}

impl Display for MacFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MacFormat::Cisco => "cisco",
            MacFormat::Dash => "dash",
            MacFormat::Ieee => "ieee",
            MacFormat::None => "none",
        };
        f.write_str(name)
    }
}

/// Resolved settings for one run of the transformer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    format: MacFormat,
    inputs: Vec<String>,
    outputs: Vec<String>,
}

impl Settings {
    /// `outputs` defaults to `inputs`. A shorter `outputs` is filled up with
    /// the remaining `inputs`.
    pub fn new(format: MacFormat, inputs: Vec<String>, outputs: Option<Vec<String>>) -> Self {
        let mut outputs = outputs.unwrap_or_else(|| inputs.clone());
        if outputs.len() < inputs.len() {
            outputs.extend_from_slice(&inputs[outputs.len()..]);
        }

        Self { format, inputs, outputs }
    }

    /// Explicit options win over the configuration layers, which win over the
    /// built-in defaults.
    pub fn resolve(
        format: Option<MacFormat>,
        inputs: Option<Vec<String>>,
        outputs: Option<Vec<String>>,
        config: &MacFormatConfig,
    ) -> Self {
        let format = format.or(config.format()).unwrap_or_default();
        let inputs = inputs
            .filter(|i| !i.is_empty())
            .or_else(|| config.inputs().filter(|i| !i.is_empty()))
            .unwrap_or_else(|| vec![String::from(DEFAULT_INPUT)]);
        let outputs = outputs.filter(|o| !o.is_empty());

        let settings = Self::new(format, inputs, outputs);
        debug!("Resolved settings: format = {}, inputs = {:?}, outputs = {:?}", settings.format, settings.inputs, settings.outputs);
        settings
    }

    pub fn format(&self) -> MacFormat {
        self.format
    }

    pub fn inputs(&self) -> &[String] {
        self.inputs.as_ref()
    }

    pub fn outputs(&self) -> &[String] {
        self.outputs.as_ref()
    }

    /// Rewrite one record in place. Absent (or `null`) input fields are
    /// skipped. Nothing is written unless every present field is valid.
    pub fn apply(&self, record: &mut Record) -> Result<(), InvalidField> {
        let mut rewritten = Vec::with_capacity(self.inputs.len());

        for (input, output) in self.inputs.iter().zip(self.outputs.iter()) {
            let mac = match record.get(input) {
                None | Some(Value::Null) => continue,
                Some(Value::String(s)) => s.to_owned(),
                Some(v) => v.to_string(),
            };
            let formatted = self.render(&mac).map_err(|e| InvalidField::new(input, e))?;
            rewritten.push((output.to_owned(), formatted));
        }

        for (output, formatted) in rewritten {
            record.insert(output, Value::String(formatted));
        }
        Ok(())
    }

    pub fn render(&self, mac: &str) -> MacResult<String> {
        mac.to_format(self.format)
    }
}

/// Lazily rewrites a record stream, one record at a time.
pub struct Transform<'a, I> {
    records: I,
    settings: &'a Settings,
}

pub fn transform<I>(records: I, settings: &Settings) -> Transform<'_, I::IntoIter>
where
    I: IntoIterator<Item = Record>,
{
    Transform { records: records.into_iter(), settings }
}

impl<I: Iterator<Item = Record>> Iterator for Transform<'_, I> {
    type Item = Result<Record, TransformError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = self.records.next()?;
        match self.settings.apply(&mut record) {
            Ok(()) => Some(Ok(record)),
            Err(invalid) => Some(Err(TransformError::new(record, invalid))),
        }
    }
}
