//! Report files: the sweep CSV table and retrying writes.

use crate::error::{CliError, CliResult};
use std::io::{self, BufRead, Write};
use std::path::Path;
use ucn_app::{SourceResult, SweepSeries};

/// Write `contents` to `path`, asking the user to retry while the file is
/// locked (e.g. open in a viewer).
pub fn save_with_retry(path: &Path, contents: &[u8]) -> io::Result<()> {
    let stdin = io::stdin();
    save_with_prompt(
        path,
        |p| std::fs::write(p, contents),
        &mut stdin.lock(),
        &mut io::stderr(),
    )
}

/// Retry loop behind [`save_with_retry`]. Gives up with the original error
/// once `input` reaches EOF.
fn save_with_prompt(
    path: &Path,
    mut write: impl FnMut(&Path) -> io::Result<()>,
    input: &mut impl BufRead,
    prompt: &mut impl Write,
) -> io::Result<()> {
    loop {
        match write(path) {
            Ok(()) => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                tracing::warn!(path = %path.display(), "output file is locked");
                writeln!(
                    prompt,
                    "Could not save {}. Press ENTER to try again.",
                    path.display()
                )?;
                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    return Err(e);
                }
            }
            Err(e) => return Err(e),
        }
    }
}

/// Every sweep point as one CSV row: swept parameter, its value, then the
/// result record.
pub fn sweep_table(sweeps: &[SweepSeries]) -> CliResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["parameter".to_string(), "value".to_string()];
    header.extend(
        SourceResult::default()
            .entries()
            .iter()
            .map(|(name, _)| name.to_string()),
    );
    wtr.write_record(&header)?;

    for sweep in sweeps {
        for (value, result) in sweep.values.iter().zip(&sweep.results) {
            let mut row = vec![sweep.parameter.name().to_string(), value.to_string()];
            row.extend(result.entries().iter().map(|(_, v)| v.to_string()));
            wtr.write_record(&row)?;
        }
    }

    wtr.into_inner()
        .map_err(|e| CliError::Io(io::Error::other(e.to_string())))
}
