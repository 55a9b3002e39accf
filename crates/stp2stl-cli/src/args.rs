//! Command-line arguments and their mapping onto [`ConversionOptions`].

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use stp2stl::ConversionOptions;

/// Convert a STEP solid model into an STL mesh.
#[derive(Parser, Debug)]
#[command(name = "stp2stl", long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Input STEP file (.step or .stp)
    pub input: Option<OsString>,

    /// Output STL file
    pub output: Option<OsString>,

    /// Linear deflection (default: 0.001)
    #[arg(long, value_name = "V", value_parser = positive_f64)]
    pub deflection: Option<f64>,

    /// Angular deflection in degrees (default: 20)
    #[arg(long, value_name = "DEG", value_parser = positive_f64)]
    pub angle: Option<f64>,

    /// Use relative deflection (default)
    #[arg(long, overrides_with = "absolute")]
    pub relative: bool,

    /// Use absolute deflection
    #[arg(long, overrides_with = "relative")]
    pub absolute: bool,

    /// Write binary STL (default)
    #[arg(long, overrides_with = "ascii")]
    pub binary: bool,

    /// Write ASCII STL
    #[arg(long, overrides_with = "binary")]
    pub ascii: bool,

    /// Scale factor applied about the origin (default: 1.0)
    #[arg(long, value_name = "V", value_parser = positive_f64)]
    pub scale: Option<f64>,

    /// Parallel meshing (default: off)
    #[arg(long)]
    pub parallel: bool,

    /// Read option defaults from a TOML file; flags override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More log output (repeat for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print version
    // Acted on by `early_exit`; declared so clap documents and accepts it.
    #[allow(dead_code)]
    #[arg(long)]
    pub version: bool,
}

fn positive_f64(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err("expects a positive number".to_string())
    }
}

/// Informational flags that win over every other argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EarlyExit {
    /// `-h` or `--help`
    Help,
    /// `--version`
    Version,
}

/// First `-h`/`--help`/`--version` in `args` (program name excluded).
///
/// Checked before parsing so that these flags succeed even next to missing
/// or malformed arguments.
pub fn early_exit<I, S>(args: I) -> Option<EarlyExit>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    args.into_iter().find_map(|arg| match arg.as_ref().to_str()? {
        "-h" | "--help" => Some(EarlyExit::Help),
        "--version" => Some(EarlyExit::Version),
        _ => None,
    })
}

impl Cli {
    /// Build options: defaults, then the config file, then flags.
    pub fn options(&self) -> Result<ConversionOptions> {
        let mut opts = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                let opts: ConversionOptions = toml::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?;
                opts.validate()
                    .with_context(|| format!("invalid config {}", path.display()))?;
                opts
            }
            None => ConversionOptions::default(),
        };

        if let Some(v) = self.deflection {
            opts.linear_deflection = v;
        }
        if let Some(v) = self.angle {
            opts.angular_deflection = v;
        }
        if self.relative {
            opts.relative_deflection = true;
        }
        if self.absolute {
            opts.relative_deflection = false;
        }
        if self.binary {
            opts.binary_output = true;
        }
        if self.ascii {
            opts.binary_output = false;
        }
        if let Some(v) = self.scale {
            opts.scale = v;
        }
        if self.parallel {
            opts.parallel = true;
        }
        Ok(opts)
    }

    /// Log filter implied by `-v`.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
