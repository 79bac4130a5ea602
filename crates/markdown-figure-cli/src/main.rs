use anyhow::{Context, Result, bail};
use markdown_figure_config::{Config, UnclosedAltSetting};
use markdown_figure_engine::{FigureOptions, Options, Pipeline, UnclosedAlt};
use std::{
    env,
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process,
};
use xi_rope::Rope;

const USAGE: &str = "Usage: markdown-figure [--config PATH] [--init-config] [FILE...]";

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config_path: Option<PathBuf>,
    init_config: bool,
    help: bool,
    files: Vec<PathBuf>,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let Some(path) = args.next() else {
                    bail!("--config needs a path");
                };
                parsed.config_path = Some(Config::expand_path(Path::new(&path)));
            }
            "--init-config" => parsed.init_config = true,
            "-h" | "--help" => parsed.help = true,
            "-" => parsed.files.push(PathBuf::from("-")),
            flag if flag.starts_with('-') => bail!("unknown option {flag}"),
            other => parsed.files.push(PathBuf::from(other)),
        }
    }
    Ok(parsed)
}

fn options_from_config(config: &Config) -> Options {
    Options {
        max_nesting: config.max_nesting,
        figures: FigureOptions {
            enabled: config.figure.enabled,
            id_prefix: config.figure.id_prefix.clone(),
            unclosed_alt: match config.figure.unclosed_alt {
                UnclosedAltSetting::Reject => UnclosedAlt::Reject,
                UnclosedAltSetting::Ignore => UnclosedAlt::Ignore,
            },
        },
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config_path = explicit.map_or_else(Config::config_path, Path::to_path_buf);
    match Config::load_from_path(&config_path)? {
        Some(config) => {
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        }
        None if explicit.is_some() => {
            bail!("config file {} does not exist", config_path.display())
        }
        None => {
            log::debug!("No config at {}, using defaults", config_path.display());
            Ok(Config::default())
        }
    }
}

fn init_config(explicit: Option<&Path>) -> Result<PathBuf> {
    let config_path = explicit.map_or_else(Config::config_path, Path::to_path_buf);
    if config_path.exists() {
        bail!("config file {} already exists", config_path.display());
    }
    Config::default()
        .save_to_path(&config_path)
        .with_context(|| format!("writing {}", config_path.display()))?;
    Ok(config_path)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("reading stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn render_inputs(pipeline: &Pipeline, files: &[PathBuf], out: &mut impl Write) -> Result<()> {
    let stdin = [PathBuf::from("-")];
    let files = if files.is_empty() { &stdin[..] } else { files };
    for path in files {
        let content = read_input(path)?;
        log::debug!("Rendering {} ({} bytes)", path.display(), content.len());
        out.write_all(pipeline.render(&Rope::from(content.as_str())).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

fn run() -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    if args.init_config {
        let path = init_config(args.config_path.as_deref())?;
        eprintln!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = load_config(args.config_path.as_deref())?;
    let pipeline = Pipeline::new(options_from_config(&config)).context("invalid configuration")?;
    render_inputs(&pipeline, &args.files, &mut io::stdout().lock())
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    if let Err(e) = run() {
        log::error!("{e:#}");
        eprintln!("Error: {e:#}");
        eprintln!("{USAGE}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown_figure_config::FigureConfig;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_files_and_flags() {
        let parsed = args(&["--config", "/tmp/c.toml", "a.md", "-", "b.md"]).unwrap();
        assert_eq!(
            parsed,
            Args {
                config_path: Some(PathBuf::from("/tmp/c.toml")),
                init_config: false,
                help: false,
                files: vec!["a.md".into(), "-".into(), "b.md".into()],
            }
        );
    }

    #[test]
    fn test_parse_rejects_bad_args() {
        assert!(args(&["--config"]).is_err());
        assert!(args(&["--verbose"]).is_err());
    }

    #[test]
    fn test_options_from_config() {
        let config = Config {
            max_nesting: 3,
            figure: FigureConfig {
                enabled: false,
                id_prefix: "f".to_string(),
                unclosed_alt: UnclosedAltSetting::Ignore,
            },
        };
        let options = options_from_config(&config);
        assert_eq!(options.max_nesting, 3);
        assert!(!options.figures.enabled);
        assert_eq!(options.figures.id_prefix, "f");
        assert_eq!(options.figures.unclosed_alt, UnclosedAlt::Ignore);
    }

    #[test]
    fn test_default_config_gives_default_options() {
        assert_eq!(options_from_config(&Config::default()), Options::default());
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_config(Some(temp_dir.path().join("none.toml").as_path())).is_err());
    }

    #[test]
    fn test_init_config_writes_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        assert_eq!(init_config(Some(path.as_path())).unwrap(), path);
        assert_eq!(load_config(Some(path.as_path())).unwrap(), Config::default());
        assert!(init_config(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_render_files_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("a.md");
        let second = temp_dir.path().join("b.md");
        std::fs::write(&first, "#1[One](/1.png)\n").unwrap();
        std::fs::write(&second, "two\n").unwrap();

        let pipeline = Pipeline::new(Options::default()).unwrap();
        let mut out = Vec::new();
        render_inputs(&pipeline, &[first, second], &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<p><figure id=\"figure-1\"><img src=\"/1.png\"/><figcaption>One</figcaption></figure></p>\n<p>two</p>\n"
        );
    }

    #[test]
    fn test_missing_input_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let pipeline = Pipeline::new(Options::default()).unwrap();
        let mut out = Vec::new();
        let err = render_inputs(&pipeline, &[temp_dir.path().join("gone.md")], &mut out)
            .unwrap_err();
        assert!(err.to_string().contains("gone.md"));
    }
}
