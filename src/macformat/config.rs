use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use super::MacFormat;

/// The `macformat` section of one configuration layer.
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MacFormatConfig {
    pub(crate) format: Option<MacFormat>,
    pub(crate) inputs: Option<FieldList>,
}

impl MacFormatConfig {
    pub fn format(&self) -> Option<MacFormat> {
        self.format
    }

    pub fn inputs(&self) -> Option<Vec<String>> {
        self.inputs.as_ref().map(FieldList::names)
    }

    /// Per key, values of `local` win over ours.
    pub fn merge(self, local: Self) -> Self {
        Self {
            format: local.format.or(self.format),
            inputs: local.inputs.or(self.inputs),
        }
    }
}

/// Field names given either as a YAML list or as one string separated by
/// whitespace and/or commas.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldList {
    List(Vec<String>),
    Text(String),
}

impl FieldList {
    pub fn names(&self) -> Vec<String> {
        match self {
            FieldList::List(names) => names
                .iter()
                .map(|n| n.trim().to_owned())
                .filter(|n| !n.is_empty())
                .collect(),
            FieldList::Text(text) => split_field_names(text),
        }
    }
}

static DELIMS: OnceLock<Regex> = OnceLock::new();

fn delims() -> &'static Regex {
    DELIMS.get_or_init(|| Regex::new(r"[\s,]+").expect("valid delimiter pattern"))
}

fn split_field_names(text: &str) -> Vec<String> {
    delims()
        .split(text)
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_macformat_config() {
        let cfg = serde_yaml_ng::from_str::<MacFormatConfig>(r#"---
        format: cisco
        inputs: src_mac, dest_mac
        "#);
        assert!(cfg.is_ok());
        let cfg = cfg.unwrap();
        assert_eq!(cfg.format(), Some(MacFormat::Cisco));
        assert_eq!(cfg.inputs().unwrap(), vec!["src_mac", "dest_mac"]);
    }

    #[test]
    fn it_parses_inputs_as_list() {
        let cfg = serde_yaml_ng::from_str::<MacFormatConfig>(r#"---
        inputs:
            - src_mac
            - dest_mac
        "#).unwrap();
        assert_eq!(cfg.format(), None);
        assert_eq!(cfg.inputs().unwrap(), vec!["src_mac", "dest_mac"]);
    }

    #[test]
    fn it_splits_on_whitespace_and_commas() {
        let inputs = FieldList::Text(String::from(" a,b  c ,\td "));
        assert_eq!(inputs.names(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn it_splits_repeatedly() {
        let first = FieldList::Text(String::from("a b"));
        let second = FieldList::Text(String::from("c,d"));
        assert_eq!(first.names(), vec!["a", "b"]);
        assert_eq!(second.names(), vec!["c", "d"]);
        assert!(std::ptr::eq(delims(), delims()));
    }

    #[test]
    fn it_rejects_unknown_formats() {
        let cfg = serde_yaml_ng::from_str::<MacFormatConfig>(r#"---
        format: colon
        "#);
        assert!(cfg.is_err());
    }

    #[test]
    fn it_prefers_the_local_layer() {
        let default = MacFormatConfig {
            format: Some(MacFormat::Dash),
            inputs: Some(FieldList::Text(String::from("mac"))),
        };
        let local = MacFormatConfig {
            format: Some(MacFormat::Ieee),
            inputs: None,
        };
        let merged = default.merge(local);
        assert_eq!(merged.format(), Some(MacFormat::Ieee));
        assert_eq!(merged.inputs().unwrap(), vec!["mac"]);
    }
}
