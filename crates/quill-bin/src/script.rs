//! Key script parsing: one chord per line, `#` starts a comment, blank lines
//! are skipped.

use anyhow::{Context, Result};
use core_events::KeyEvent;

pub fn parse_script(src: &str) -> Result<Vec<KeyEvent>> {
    let mut keys = Vec::new();
    for (i, raw) in src.lines().enumerate() {
        let line = raw.split_once('#').map_or(raw, |(chord, _)| chord).trim();
        if line.is_empty() {
            continue;
        }
        let key = KeyEvent::parse(line).with_context(|| format!("line {}: `{line}`", i + 1))?;
        keys.push(key);
    }
    Ok(keys)
}
