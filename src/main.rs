//! pi-led - play LED patterns read from stdin on GPIO output pins.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use pi_led::{
    ChannelMap, Context, DryRunPins, PinDriver, SYSFS_GPIO_ROOT, SysfsGpio, ThreadClock,
    default_config_path,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pi-led")]
#[command(author, version, about = "Play LED patterns on GPIO pins", long_about = None)]
struct Cli {
    /// Configuration file mapping LEDs and channels to pins [default: ~/.pi-led.ini]
    #[arg(short = 'c', long = "config-file", value_name = "PATH")]
    config_file: Option<PathBuf>,

    /// Log pin changes instead of driving GPIO.
    #[arg(long)]
    dry_run: bool,

    /// Sysfs GPIO directory.
    #[arg(long, value_name = "PATH", default_value = SYSFS_GPIO_ROOT)]
    gpio_root: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let path = cli.config_file.unwrap_or_else(default_config_path);
    let map = ChannelMap::load(&path)?;
    tracing::info!(config = %path.display(), leds = map.leds().len(), "loaded channel map");

    if cli.dry_run {
        run(map, DryRunPins)
    } else {
        run(map, SysfsGpio::with_root(cli.gpio_root))
    }
}

fn run<D: PinDriver + 'static>(map: ChannelMap, driver: D) -> anyhow::Result<()> {
    let context = Context::new(map, driver);
    context
        .configure_outputs()
        .context("failed to configure output pins")?;

    let on_signal = context.clone();
    ctrlc::set_handler(move || {
        on_signal.shut_down();
        std::process::exit(0);
    })?;

    // Detached: a player inside a long pause only notices closing afterwards,
    // and the sealed output bank already ignores anything it writes.
    let _player = context
        .player(ThreadClock)
        .spawn(Arc::clone(context.closing()))?;

    tracing::info!("reading patterns from stdin");
    context.session().run(io::stdin().lock())?;
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}
