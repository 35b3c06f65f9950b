use anyhow::{anyhow, Result};
use colored::Colorize;
use screen_router::{Params, Value};

use crate::demo;

pub fn execute(name: &str, params: &[String]) -> Result<()> {
    let params = parse_params(params)?;
    let router = demo::router()?;

    let url = router.url_for(name, &params)?;
    println!("{}", url.green());

    Ok(())
}

/// Parses `key=value` pairs; all-digit values become integers
fn parse_params(pairs: &[String]) -> Result<Params> {
    pairs
        .iter()
        .map(|pair| -> Result<(String, Value)> {
            let (key, raw) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("Expected key=value, got {:?}", pair))?;
            let value = match raw.parse::<i64>() {
                Ok(n) if raw.bytes().all(|b| b.is_ascii_digit()) => Value::Int(n),
                _ => Value::from(raw),
            };
            Ok((key.to_string(), value))
        })
        .collect()
}
