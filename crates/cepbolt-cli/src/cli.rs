//! CLI argument definitions for cepbolt.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `serve` | Run the HTTP service |
//! | `address` | Race the address providers for one CEP |
//! | `weather` | Resolve a CEP to its city's current temperature |
//! | `sources` | List configured providers |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--deadline-ms` | `1000` | Race deadline in ms |
//! | `--timeout-ms` | `3000` | Per-request timeout in ms |
//! | `--providers` | `viacep,brasilapi` | Address providers, in preference order |
//!
//! Unset options fall back to the `CEPBOLT_*` environment variables, then to
//! the defaults above.
//!
//! # Examples
//!
//! ```bash
//! cepbolt address 01001000 --pretty
//! cepbolt weather 01001000
//! cepbolt serve --bind 127.0.0.1:8080
//! ```

use clap::{Args, Parser, Subcommand};
use cepbolt_core::ProviderId;

/// cepbolt - Brazilian postal code lookups raced across providers
#[derive(Debug, Parser)]
#[command(
    name = "cepbolt",
    author,
    version,
    about = "Brazilian postal code lookups raced across providers",
    long_about = "cepbolt resolves a CEP into an address by querying ViaCEP and BrasilAPI \
concurrently and keeping the first answer, and reports the current temperature for the \
city behind a CEP through WeatherAPI.\n\
\n\
Use 'cepbolt <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Race deadline in milliseconds.
    #[arg(long, global = true)]
    pub deadline_ms: Option<u64>,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Comma-separated address providers to race. The first one also serves
    /// the weather pipeline.
    #[arg(long, global = true, value_delimiter = ',')]
    pub providers: Vec<ProviderId>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service (`/cep/:cep`, `/address/:cep`, `/health`).
    ///
    /// # Examples
    ///
    ///   cepbolt serve
    ///   cepbolt serve --bind 127.0.0.1:9000 --deadline-ms 800
    Serve(ServeArgs),

    /// Race every address provider and print the first address.
    ///
    /// # Examples
    ///
    ///   cepbolt address 01001000
    ///   cepbolt address 01001000 --providers brasilapi
    Address(CepArgs),

    /// Print the current temperature for the city behind a CEP.
    ///
    /// Requires CEPBOLT_WEATHER_API_KEY (or WEATHER_API_KEY).
    Weather(CepArgs),

    /// List providers and the effective configuration.
    Sources,
}

/// Arguments for the `serve` command.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Socket address to listen on.
    #[arg(long, env = "CEPBOLT_BIND", default_value = "0.0.0.0:8080")]
    pub bind: String,
}

/// Arguments for commands that take one CEP.
#[derive(Debug, Args)]
pub struct CepArgs {
    /// Eight-digit postal code, without separators.
    pub cep: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn providers_flag_accepts_comma_separated_ids() {
        let cli = Cli::try_parse_from(["cepbolt", "address", "01001000", "--providers", "brasilapi,viacep"])
            .expect("valid args");

        assert_eq!(cli.providers, vec![ProviderId::BrasilApi, ProviderId::ViaCep]);
        assert!(matches!(cli.command, Command::Address(CepArgs { ref cep }) if cep == "01001000"));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!(Cli::try_parse_from(["cepbolt", "sources", "--providers", "correios"]).is_err());
    }

    #[test]
    fn global_timing_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["cepbolt", "weather", "01001000", "--deadline-ms", "500", "--timeout-ms", "900"])
            .expect("valid args");

        assert_eq!(cli.deadline_ms, Some(500));
        assert_eq!(cli.timeout_ms, Some(900));
        assert!(!cli.pretty);
    }
}
