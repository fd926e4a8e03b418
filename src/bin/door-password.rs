#![deny(unsafe_code)]

use mimalloc::MiMalloc;

/// High-performance memory allocator for improved allocation throughput.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::io::{self, Write};
use std::process::ExitCode;

use door::{SearchConfig, SearchError, solve};
use tracing_subscriber::EnvFilter;

const PROGRAM: &str = "door-password";

fn main() -> ExitCode {
    init_tracing();

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    run_with(SearchConfig::from_env(), &mut stdout, &mut stderr)
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, `warn` by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_with<Out, Err>(
    config: Result<SearchConfig, SearchError>,
    stdout: &mut Out,
    stderr: &mut Err,
) -> ExitCode
where
    Out: Write,
    Err: Write,
{
    match config.and_then(|config| solve(&config)) {
        Ok(passwords) => {
            let written = writeln!(stdout, "Part 1: {}", passwords.sequential)
                .and_then(|()| writeln!(stdout, "Part 2: {}", passwords.positional));
            if let Err(error) = written {
                let _ = writeln!(stderr, "{PROGRAM}: failed to write output: {error}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::debug!(%error, "search failed");
            let _ = writeln!(stderr, "{PROGRAM}: {error}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_both_parts() {
        let config = SearchConfig::new("abc")
            .with_leading_zeros(2)
            .with_password_len(4);
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let code = run_with(Ok(config), &mut stdout, &mut stderr);

        assert_eq!(code, ExitCode::SUCCESS);
        let stdout = String::from_utf8(stdout).unwrap();
        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Part 1: "));
        assert!(lines[1].starts_with("Part 2: "));
        assert!(stderr.is_empty());
    }

    #[test]
    fn reports_configuration_errors() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let code = run_with(Err(SearchError::ChunkSize), &mut stdout, &mut stderr);

        assert_eq!(code, ExitCode::FAILURE);
        assert!(stdout.is_empty());
        assert_eq!(
            String::from_utf8(stderr).unwrap(),
            "door-password: chunk size must be greater than zero\n"
        );
    }
}
