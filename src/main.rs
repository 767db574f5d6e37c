use anyhow::Context;
use clap::Parser;
use portfolio_prep::cli::Args;
use portfolio_prep::logger::{set_quiet_mode, set_verbose_mode};
use portfolio_prep::{error, info, verbose, Config, Session, TextConsole};
use std::process;
use std::thread;

fn main() {
    let args = Args::parse();
    set_quiet_mode(args.quiet);
    set_verbose_mode(args.verbose);

    watch_for_interrupt();

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = Config::from_args(args).context("Invalid configuration")?;
    verbose!("Using configuration {:?}", config);

    let mut console = TextConsole::stdio();
    let summary = Session::new(&config, &mut console)
        .run()
        .context("Portfolio preprocessing failed")?;

    if summary.failed > 0 {
        info!("{} images could not be compressed", summary.failed);
    }
    Ok(())
}

/// Ctrl-C ends the session immediately with a notice and a zero exit status.
fn watch_for_interrupt() {
    let spawned = thread::Builder::new()
        .name("interrupt".into())
        .spawn(|| {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_io()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    verbose!("Interrupt handling unavailable: {}", e);
                    return;
                }
            };

            if runtime.block_on(tokio::signal::ctrl_c()).is_ok() {
                println!("\n\n⚠️  Interrupted by user");
                process::exit(0);
            }
        });

    if let Err(e) = spawned {
        verbose!("Could not start interrupt watcher: {}", e);
    }
}
