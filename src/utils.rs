// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

const UA: &str = concat!("beneficios/", env!("CARGO_PKG_VERSION"));

pub fn http_client() -> reqwest::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    let s = s.trim();
    // Accept the Brazilian decimal comma for plain amounts like "30,50".
    let normalized = if s.contains(',') && !s.contains('.') {
        s.replace(',', ".")
    } else {
        s.to_string()
    };
    normalized
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Formats an amount the way the original screens did: `R$ 1.234,56`.
pub fn fmt_brl(d: &Decimal) -> String {
    let rounded = d.round_dp(2);
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}R$ {grouped},{frac_part}")
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Asks a yes/no question; anything but `y`/`yes` counts as no.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<bool> {
    write!(out, "{} [y/N] ", question)?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brl_formatting() {
        assert_eq!(fmt_brl(&Decimal::new(123456, 2)), "R$ 1.234,56");
        assert_eq!(fmt_brl(&Decimal::new(5, 1)), "R$ 0,50");
        assert_eq!(fmt_brl(&Decimal::from(1_000_000)), "R$ 1.000.000,00");
        assert_eq!(fmt_brl(&Decimal::new(-9999, 2)), "-R$ 99,99");
        assert_eq!(fmt_brl(&Decimal::new(-1, 3)), "R$ 0,00");
    }

    #[test]
    fn decimal_accepts_comma() {
        assert_eq!(parse_decimal(" 30,50 ").unwrap(), Decimal::new(3050, 2));
        assert_eq!(parse_decimal("1000.25").unwrap(), Decimal::new(100025, 2));
        assert!(parse_decimal("1.000,25").is_err());
        assert!(parse_decimal("abc").is_err());
    }

    #[test]
    fn confirm_reads_answer() {
        let mut out = Vec::new();
        assert!(confirm(&mut "Y\n".as_bytes(), &mut out, "Go?").unwrap());
        assert!(!confirm(&mut "\n".as_bytes(), &mut out, "Go?").unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "Go? [y/N] Go? [y/N] ");
    }
}
