//! Tracing subscriber setup.

use crate::config::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Installs the global tracing subscriber.
///
/// Production emits flattened JSON events. Development emits pretty,
/// human-readable output. `RUST_LOG` overrides the default filter, which is
/// `info` in production and `debug` in development.
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init_tracing(environment: Environment) {
    let filter = env_filter(environment);
    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().pretty())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(()) => info!(environment = environment.as_str(), "tracing initialised"),
        Err(_) => debug!("tracing already initialised"),
    }
}

/// Reads `RUST_LOG`, falling back to the environment's default directives.
fn env_filter(environment: Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if environment.is_production() {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("debug,tower_http=debug")
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tracing_subscriber::filter::LevelFilter;

    #[rstest]
    #[case(Environment::Development, LevelFilter::DEBUG)]
    #[case(Environment::Production, LevelFilter::INFO)]
    fn default_filter_follows_the_environment(
        #[case] environment: Environment,
        #[case] expected: LevelFilter,
    ) {
        temp_env::with_var_unset("RUST_LOG", || {
            assert_eq!(env_filter(environment).max_level_hint(), Some(expected));
        });
    }

    #[rstest]
    fn rust_log_overrides_the_default_filter() {
        temp_env::with_var("RUST_LOG", Some("warn"), || {
            assert_eq!(
                env_filter(Environment::Development).max_level_hint(),
                Some(LevelFilter::WARN)
            );
        });
    }

    #[rstest]
    fn init_tracing_installs_a_global_subscriber_once() {
        init_tracing(Environment::Development);
        init_tracing(Environment::Production);
        assert!(tracing::dispatcher::has_been_set());
    }
}
