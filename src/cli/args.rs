//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Localized route generator for app-directory frameworks
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: i18n.toml, searched upward)
    #[arg(short = 'C', long, global = true, default_value = "i18n.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate the localized route tree and the route schema
    #[command(visible_alias = "g")]
    Generate {
        /// Keep watching the origin directory and regenerate on change
        #[arg(short, long)]
        watch: bool,
    },

    /// Print the route table of the origin tree
    #[command(visible_alias = "r")]
    Routes {
        /// Print the raw schema as JSON
        #[arg(long)]
        json: bool,
    },

    /// Match a localized pathname against the route schema
    #[command(visible_alias = "m")]
    Match {
        /// Locale the pathname belongs to
        locale: String,
        /// Pathname without domain, e.g. /en/images/3
        pathname: String,
    },

    /// Build the localized href of a route
    Href {
        #[command(flatten)]
        target: RouteArgs,

        /// Target locale (default: the default locale)
        #[arg(short, long)]
        locale: Option<String>,

        /// Query parameter as key=value (repeatable)
        #[arg(short, long = "query", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        query: Vec<(String, String)>,

        /// Prefix the href with the locale's domain when it has one
        #[arg(long)]
        domain: bool,
    },

    /// Print the language alternates of a route
    #[command(visible_alias = "a")]
    Alternates {
        #[command(flatten)]
        target: RouteArgs,
    },
}

/// A route name plus its parameters.
#[derive(clap::Args, Debug, Clone)]
pub struct RouteArgs {
    /// Route name (e.g. /images/[id]) or a raw path
    pub route: String,

    /// Route parameter as key=value; repeat a key for catch-all segments
    #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
    if key.is_empty() {
        return Err(format!("empty key in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(parse_key_val("id=3"), Ok(("id".into(), "3".into())));
        assert_eq!(parse_key_val("q=a=b"), Ok(("q".into(), "a=b".into())));
        assert!(parse_key_val("id").is_err());
        assert!(parse_key_val("=3").is_err());
    }

    #[test]
    fn test_parse_href() {
        let cli = Cli::try_parse_from([
            "globegen", "href", "/docs/[[...rest]]", "-l", "en", "-p", "rest=a", "-p", "rest=b",
        ])
        .unwrap();
        let Commands::Href { target, locale, .. } = cli.command else {
            panic!("expected href");
        };
        assert_eq!(locale.as_deref(), Some("en"));
        assert_eq!(target.params.len(), 2);
        assert_eq!(cli.config, PathBuf::from("i18n.toml"));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
