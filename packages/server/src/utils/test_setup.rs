use dotenvy::dotenv;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn setup_test_env() {
    INIT.call_once(|| {
        dotenv().ok();
        // fall back to short phases when no .env is present
        if std::env::var("NIGHT_DURATION_SECONDS").is_err() {
            std::env::set_var("NIGHT_DURATION_SECONDS", "2");
        }
        if std::env::var("DAY_DURATION_SECONDS").is_err() {
            std::env::set_var("DAY_DURATION_SECONDS", "4");
        }
        if std::env::var("MANUAL_ADVANCE").is_err() {
            std::env::set_var("MANUAL_ADVANCE", "true");
        }
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
