//! Report rendering: offender tables and hex-dump diffs of byte spans.
//!
//! Byte-level rendering is delegated to an external hex-dump utility behind
//! the narrow [`HexRenderer`] trait, so the diff core never depends on any
//! particular tool and tests can substitute a canned renderer.

use std::path::Path;
use std::process::Command;

use color_eyre::eyre::{Result, WrapErr, eyre};
use similar::TextDiff;

use linkdiff_analyze::{ByteSpan, WorstOffender};

/// Block size the hex view is aligned to.
pub const HEX_BLOCK: u64 = 512;

/// Renders a byte range of a file as text lines.
pub trait HexRenderer {
    /// Render `length` bytes of `path` starting at `offset`.
    fn render(&self, path: &Path, offset: u64, length: u64) -> Result<Vec<String>>;
}

/// Production renderer: shells out to `hexdump -C`.
#[derive(Debug, Clone)]
pub struct HexdumpCommand {
    program: String,
}

impl Default for HexdumpCommand {
    fn default() -> Self {
        Self {
            program: "hexdump".to_string(),
        }
    }
}

impl HexRenderer for HexdumpCommand {
    fn render(&self, path: &Path, offset: u64, length: u64) -> Result<Vec<String>> {
        let output = Command::new(&self.program)
            .arg("-C")
            .arg("-s")
            .arg(offset.to_string())
            .arg("-n")
            .arg(length.to_string())
            .arg(path)
            .output()
            .wrap_err_with(|| format!("failed to run {}", self.program))?;

        if !output.status.success() {
            return Err(eyre!(
                "{} exited with {} for {}",
                self.program,
                output.status,
                path.display()
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect())
    }
}

/// Round a span outward to `HEX_BLOCK`-byte boundaries.
///
/// Returns `(offset, length)` of the aligned region, which is what the
/// hex-dump tool is asked to render so the surrounding context stays on
/// stable offsets.
pub fn align_span(span: &ByteSpan) -> (u64, u64) {
    let start = span.start / HEX_BLOCK * HEX_BLOCK;
    let end = span.end.div_ceil(HEX_BLOCK) * HEX_BLOCK;
    (start, end - start)
}

/// Unified diff of the hex renderings of one span in each file.
pub fn render_span_diff(
    renderer: &dyn HexRenderer,
    left_path: &Path,
    right_path: &Path,
    span: &ByteSpan,
) -> Result<String> {
    let (offset, length) = align_span(span);
    let left_lines = renderer.render(left_path, offset, length)?.join("\n");
    let right_lines = renderer.render(right_path, offset, length)?.join("\n");

    let diff = TextDiff::from_lines(left_lines.as_str(), right_lines.as_str());
    Ok(diff
        .unified_diff()
        .header(
            &left_path.display().to_string(),
            &right_path.display().to_string(),
        )
        .to_string())
}

/// Format the worst-offender table, one `(offender, differing byte count)`
/// row per diverged path, ascending so the worst offender reads last.
pub fn format_offender_table(rows: &[(WorstOffender, u64)]) -> String {
    let path_width = rows
        .iter()
        .map(|(o, _)| o.path.display().to_string().len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut out = String::new();
    out.push_str(&format!(
        "| {:<path_width$} | {:>9} | {:>9} | {:>9} |\n",
        "Path", "Left", "Right", "Diff"
    ));
    out.push_str(&format!(
        "| {:<path_width$} | {:>9} | {:>9} | {:>9} |\n",
        "----", "----", "-----", "----"
    ));
    for (offender, differing_bytes) in rows {
        out.push_str(&format!(
            "| {:<path_width$} | {:>9} | {:>9} | {:>9} |\n",
            offender.path.display().to_string(),
            offender.left_bytes,
            offender.right_bytes,
            differing_bytes
        ));
    }
    out
}
