use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "maze_carver=info";

/// Installs the global subscriber, writing to stderr so stdout carries only the maze.
///
/// `RUST_LOG` overrides the default filter. Returns `false` when another
/// subscriber was already installed.
pub(crate) fn init() -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true),
    );

    if subscriber.try_init().is_err() {
        return false;
    }

    install_panic_hook();

    true
}

/// Logs panics through `tracing`, then hands them to the hook that was installed before.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        tracing::error!(panic = %panic_info, "panic");
        previous(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::install_panic_hook;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn panic_hook_keeps_the_previous_hook_running() {
        static PREVIOUS_RAN: AtomicBool = AtomicBool::new(false);

        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| PREVIOUS_RAN.store(true, Ordering::SeqCst)));
        install_panic_hook();

        let outcome = std::panic::catch_unwind(|| {
            panic!("maze generation aborted");
        });

        let _ = std::panic::take_hook();
        std::panic::set_hook(original);

        assert!(outcome.is_err());
        assert!(PREVIOUS_RAN.load(Ordering::SeqCst));
    }
}
