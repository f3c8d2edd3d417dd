use std::{io::{self, Write}, sync::OnceLock};

use log::debug;
use regex::{Captures, Regex};
use serde::Deserialize;

pub mod source;

pub const OUI_DATASET_URL: &str = "http://standards-oui.ieee.org/oui/oui.txt";

pub const CSV_HEADER: &str = "mac,mac_vendor,mac_vendor_address,mac_vendor_address2,mac_vendor_country";

/// One `(base 16)` block: prefix, vendor name line, then up to two indented
/// address lines and an optional indented two letter country.
const BLOCK_PATTERN: &str = concat!(
    r"(?m)^(?P<mac>[0-9A-Fa-f]{6})[ \t]+\(base 16\)[ \t]+(?P<vendor>\S[^\n]*)(?:\n|\z)",
    r"(?:[ \t]+(?P<address>\S[^\n]*)(?:\n|\z))?",
    r"(?:[ \t]+(?P<address2>\S[^\n]*)(?:\n|\z))?",
    r"(?:[ \t]+(?P<country>[A-Za-z]{2})[ \t]*(?:\n|\z))?",
);

static BLOCK: OnceLock<Regex> = OnceLock::new();
static WHITESPACE: OnceLock<Regex> = OnceLock::new();

fn block() -> &'static Regex {
    BLOCK.get_or_init(|| Regex::new(BLOCK_PATTERN).expect("valid block pattern"))
}

fn whitespace() -> &'static Regex {
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default)]
pub struct OuiConfig {
    url: Option<String>,
}

impl OuiConfig {
    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or(OUI_DATASET_URL)
    }

    pub fn merge(self, local: Self) -> Self {
        Self { url: local.url.or(self.url) }
    }
}

/// Field order is the sort order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct OuiRecord {
    mac_prefix: String,
    vendor: String,
    address: String,
    address2: String,
    country: String,
}

impl OuiRecord {
    fn from_captures(caps: &Captures) -> Self {
        let field = |name: &str| caps.name(name).map_or("", |m| m.as_str());

        let mut address = collapse(field("address"));
        let mut address2 = collapse(field("address2"));
        let mut country = field("country").to_owned();

        // The optional address slots are greedy and take a trailing country line.
        if country.is_empty() {
            if !address2.is_empty() {
                if is_country(&address2) {
                    country = std::mem::take(&mut address2);
                }
            } else if is_country(&address) {
                country = std::mem::take(&mut address);
            }
        }

        Self {
            mac_prefix: field("mac").to_ascii_lowercase(),
            vendor: field("vendor").trim().to_owned(),
            address,
            address2,
            country,
        }
    }

    /// Six lowercase hex digits.
    pub fn mac_prefix(&self) -> &str {
        self.mac_prefix.as_ref()
    }

    pub fn vendor(&self) -> &str {
        self.vendor.as_ref()
    }

    pub fn address(&self) -> &str {
        self.address.as_ref()
    }

    pub fn address2(&self) -> &str {
        self.address2.as_ref()
    }

    pub fn country(&self) -> &str {
        self.country.as_ref()
    }

    /// `"00:11:22*","Acme Corp","123 Main St","","US"`
    pub fn to_csv_row(&self) -> String {
        let mac = &self.mac_prefix;
        let prefix = format!("{}:{}:{}*", &mac[0..2], &mac[2..4], &mac[4..6]);

        [prefix.as_str(), self.vendor.as_str(), self.address.as_str(), self.address2.as_str(), self.country.as_str()]
            .iter()
            .map(|f| quote(f))
            .collect::<Vec<String>>()
            .join(",")
    }
}

/// A block ends at a blank line, the end of the text or an unindented line.
/// Another indented line means the block has more lines than it may have.
fn ends_block(rest: &str) -> bool {
    let line = rest.split('\n').next().unwrap_or_default();
    line.trim().is_empty() || !line.starts_with([' ', '\t'])
}

fn collapse(text: &str) -> String {
    whitespace().replace_all(text, " ").trim().to_owned()
}

fn is_country(text: &str) -> bool {
    text.len() == 2 && text.chars().all(|c| c.is_ascii_alphabetic())
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Every well formed block of the registry text, sorted by prefix. Anything
/// else in the text is skipped.
pub fn extract(text: &str) -> Vec<OuiRecord> {
    let text = text.replace('\r', "");

    let mut records: Vec<OuiRecord> = block()
        .captures_iter(&text)
        .filter(|caps| caps.get(0).is_some_and(|m| ends_block(&text[m.end()..])))
        .map(|caps| OuiRecord::from_captures(&caps))
        .collect();
    debug!("there are {} matches", records.len());

    records.sort();
    records
}

pub fn write_csv<W: Write>(records: &[OuiRecord], mut out: W) -> io::Result<()> {
    writeln!(out, "{}", CSV_HEADER)?;
    for record in records {
        writeln!(out, "{}", record.to_csv_row())?;
    }
    out.flush()
}
