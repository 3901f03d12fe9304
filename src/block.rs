//! Site block text handling: rendering, locating, and upstream scanning.
//!
//! A label file is never parsed as Caddyfile. Blocks are found by
//! line-anchored pattern matching over the raw text so every byte outside a
//! matched span survives an edit untouched.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;
use crate::types::{Host, Upstream};

/// Captures the token after every `reverse_proxy` directive in a file.
#[allow(clippy::expect_used, reason = "pattern is a compile-time constant")]
static REVERSE_PROXY_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"reverse_proxy\s+([^\s}]+)").expect("valid regex");
});

/// Find the first block opened by `<host> {` at the start of a line.
///
/// The span runs from the host token through the first line starting with
/// `}`, including whatever trails the brace on that line (stray spaces, a
/// `\r`) and its newline, or up to end of input. Only the nearest closing
/// line counts, so a later block is never swallowed into this one.
///
/// # Errors
///
/// Returns `Error::Pattern` if the locator pattern fails to compile.
pub fn locate(content: &str, host: &Host) -> Result<Option<Range<usize>>, Error> {
    let pattern = block_pattern(host)?;
    let span = pattern.find(content).map(|m| return m.range());
    tracing::trace!(host = %host, ?span, "located block");
    return Ok(span);
}

/// Build the anchored, non-greedy locator pattern for one host.
///
/// # Errors
///
/// Returns `Error::Pattern` if the pattern fails to compile.
fn block_pattern(host: &Host) -> Result<Regex, Error> {
    let source = format!(r"(?ms)^{}[ \t]*\{{.*?\n\}}[^\n]*(?:\n|\z)", regex::escape(host.as_str()));
    return Ok(Regex::new(&source)?);
}

/// Render the block written for every entry.
pub fn render(host: &Host, upstream: &Upstream) -> String {
    return format!("{host} {{\n\timport common\n\treverse_proxy {upstream}\n}}\n");
}

/// Every upstream token referenced by a `reverse_proxy` directive, in file order.
pub fn reverse_proxy_targets(content: &str) -> impl Iterator<Item = &str> {
    return REVERSE_PROXY_TARGET
        .captures_iter(content)
        .filter_map(|cap| return cap.get(1).map(|m| return m.as_str()));
}

/// Whether `upstream` already appears verbatim as a `reverse_proxy` target.
/// No normalization: `10.0.0.5` and `10.0.0.5:80` are different upstreams.
pub fn upstream_in_use(content: &str, upstream: &Upstream) -> bool {
    return reverse_proxy_targets(content).any(|target| return target == upstream.as_str());
}
