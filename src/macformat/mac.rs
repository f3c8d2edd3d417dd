use super::error::{InvalidMacAddress, MacResult};
use super::MacFormat;

const RAW_LEN: usize = 12;

pub trait MacAddr {
    fn to_raw(&self) -> MacResult<String>;
    fn to_format(&self, format: MacFormat) -> MacResult<String>;
}

impl MacAddr for str {
    fn to_raw(&self) -> MacResult<String> {
        to_raw(self)
    }

    fn to_format(&self, format: MacFormat) -> MacResult<String> {
        from_raw(self, format)
    }
}

/// Canonical form: 12 lowercase hex digits, no delimiters.
///
/// Every single non-hex character is a delimiter, so `11::22` has three
/// groups. Accepted shapes are six groups of one or two digits, three groups
/// of exactly four digits, or one group of up to twelve digits.
pub fn to_raw(mac: &str) -> MacResult<String> {
    let lower = mac.trim().to_ascii_lowercase();
    let groups: Vec<&str> = lower.split(|c: char| !c.is_ascii_hexdigit()).collect();

    let padded = match groups.len() {
        6 if groups.iter().all(|g| (1..=2).contains(&g.len())) => {
            groups.iter().map(|g| format!("{:0>2}", g)).collect::<String>()
        }
        3 if groups.iter().all(|g| g.len() == 4) => groups.concat(),
        1 if (1..=RAW_LEN).contains(&groups[0].len()) => format!("{:0>12}", groups[0]),
        _ => return Err(InvalidMacAddress::new(mac)),
    };

    Ok(padded)
}

pub fn from_raw(mac: &str, format: MacFormat) -> MacResult<String> {
    let raw = to_raw(mac)?;
    let width = format.group_width();

    Ok((0..RAW_LEN)
        .step_by(width)
        .map(|i| &raw[i..i + width])
        .collect::<Vec<&str>>()
        .join(format.separator()))
}
