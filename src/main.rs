use mazeway::app::{self, Config, RunOutcome};

const USAGE: &str = "\
Usage: mazeway [OPTIONS] <COLS> <ROWS>

Generates a perfect maze and animates solving it in the terminal.

Options:
  --seed <N>       Seed the carve for a reproducible maze
  --cell-size <N>  Pixel edge length for cell bounding boxes (default 16)
  --generate-only  Carve and display the maze without solving it
";

/// Exit code for configuration errors (bad arguments, zero dimensions).
const EXIT_CONFIG_ERROR: i32 = 2;
/// Exit code when solving found no path to the exit.
const EXIT_NO_PATH: i32 = 1;

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Config, String> {
    let mut dims: Vec<u16> = Vec::new();
    let mut seed = None;
    let mut cell_size = 16;
    let mut generate_only = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().ok_or("--seed requires a value")?;
                seed = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| format!("invalid seed: {value}"))?,
                );
            }
            "--cell-size" => {
                let value = args.next().ok_or("--cell-size requires a value")?;
                cell_size = value
                    .parse::<u16>()
                    .map_err(|_| format!("invalid cell size: {value}"))?;
            }
            "--generate-only" => generate_only = true,
            other if other.starts_with("--") => {
                return Err(format!("unknown option: {other}"));
            }
            other => {
                let dim = other
                    .parse::<u16>()
                    .map_err(|_| format!("invalid dimension: {other}"))?;
                dims.push(dim);
            }
        }
    }

    let [num_cols, num_rows] = dims.as_slice() else {
        return Err("expected exactly two dimensions: <COLS> <ROWS>".to_string());
    };
    if *num_cols < 1 || *num_rows < 1 {
        return Err("maze dimensions must be at least 1x1".to_string());
    }

    Ok(Config {
        num_cols: *num_cols,
        num_rows: *num_rows,
        cell_size,
        seed,
        generate_only,
    })
}

/// Route logs to a file: the terminal is in raw mode while the app runs, so
/// writing them to stdout would corrupt the drawing.
fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", "mazeway.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    guard
}

fn main() -> std::io::Result<()> {
    let _log_guard = init_logging();

    let config = match parse_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("error: {msg}\n\n{USAGE}");
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };
    tracing::info!("Starting with {config:?}");

    let mut stdout = std::io::stdout();
    app::setup_terminal(&mut stdout)?;
    let result = app::run(&config, &mut stdout);
    app::restore_terminal(&mut stdout)?;

    match result? {
        RunOutcome::Solved(false) => std::process::exit(EXIT_NO_PATH),
        RunOutcome::Cancelled => {
            eprintln!("Cancelled (Esc pressed or terminal too small, see mazeway.log).");
            Ok(())
        }
        RunOutcome::Solved(true) | RunOutcome::GenerateOnly => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_parse_minimal() {
        let config = parse_args(args(&["20", "10"])).unwrap();
        assert_eq!((config.num_cols, config.num_rows), (20, 10));
        assert_eq!(config.cell_size, 16);
        assert_eq!(config.seed, None);
        assert!(!config.generate_only);
    }

    #[test]
    fn test_parse_options() {
        let config =
            parse_args(args(&["--seed", "7", "8", "8", "--cell-size", "25", "--generate-only"]))
                .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.cell_size, 25);
        assert!(config.generate_only);
    }

    #[test]
    fn test_zero_dimensions_are_a_config_error() {
        assert!(parse_args(args(&["0", "5"])).is_err());
        assert!(parse_args(args(&["5", "0"])).is_err());
    }

    #[test]
    fn test_missing_or_extra_dimensions_rejected() {
        assert!(parse_args(args(&["5"])).is_err());
        assert!(parse_args(args(&["5", "5", "5"])).is_err());
        assert!(parse_args(args(&["--unknown", "5", "5"])).is_err());
    }
}
