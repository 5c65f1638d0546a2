use clap::Parser;
use alchemist_cli::commands::{self, cli, CommandOutput};
use alchemist_core::api as core_api;
use alchemist_core::config;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, core_api::CliError> {
    let args = cli::Args::parse();
    let cfg = match args.config.as_deref() {
        Some(path) => {
            let mut cfg = config::load_from_path(path)?;
            config::apply_env_overrides(&mut cfg, |k| std::env::var(k).ok());
            cfg
        }
        None => config::load_default()?,
    };
    init_tracing(&cfg.logging).map_err(core_api::CliError::Command)?;

    let oracle = if args.no_oracle {
        None
    } else {
        alchemist_plugins::factory::build_oracle(&cfg.oracle)?
    };
    tracing::debug!(
        target: "alchemist.cli",
        stage = "cli.start",
        oracle = oracle.as_ref().map(|o| o.name()).unwrap_or("none")
    );

    let out = dispatch(args.command, cfg, oracle.as_deref()).await?;
    println!("{}", out.body.trim_end());
    Ok(out.exit_code)
}

fn exit_code_for_error(e: &core_api::CliError) -> i32 {
    // 0: success
    // 1: validation produced error-severity findings (returned as a normal exit code)
    // 11: config error
    // 20: IO / command error
    // 30: input contract violation
    // 50: internal/uncategorized
    match e {
        core_api::CliError::Config(_) => 11,
        core_api::CliError::Io(_) => 20,
        core_api::CliError::Command(_) => 20,
        core_api::CliError::Ingest(_) => 30,
        core_api::CliError::Rule(_) => 30,
        core_api::CliError::Anyhow(_) => 50,
    }
}

async fn dispatch(
    cmd: cli::Commands,
    cfg: core_api::AppConfig,
    oracle: Option<&dyn core_api::AssistOracle>,
) -> Result<CommandOutput, core_api::CliError> {
    match cmd {
        cli::Commands::Ingest(a) => commands::ingest::handle_ingest(a, oracle).await,
        cli::Commands::Validate(a) => {
            commands::validate::handle_validate(a, cfg.validation, oracle).await
        }
        cli::Commands::Rule(a) => commands::rule::handle_rule(a, oracle).await,
        cli::Commands::Recommend(a) => commands::rule::handle_recommend(a, oracle).await,
        cli::Commands::Query(a) => commands::query::handle_query(a, oracle).await,
        cli::Commands::Modify(a) => {
            commands::modify::handle_modify(a, cfg.validation, oracle).await
        }
    }
}

fn init_tracing(logging: &core_api::LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("alchemist"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("alchemist.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok(())
}
