use std::sync::LazyLock;

use derive_from_env::FromEnv;

#[derive(FromEnv)]
#[from_env(prefix = "ROTLOG")]
#[allow(non_snake_case)]
pub struct RotLogConfig {
    #[from_env(default = "1024")]
    pub QUEUE_CAPACITY: u64,
    #[from_env(default = "500")]
    pub FIRST_FLUSH_MS: u64,
    #[from_env(default = "1000")]
    pub FLUSH_INTERVAL_MS: u64,
    #[from_env(default = "10000")]
    pub ROTATE_INTERVAL_MS: u64,
}

pub static ROTLOG_CONFIG: LazyLock<RotLogConfig> = LazyLock::new(|| {
    RotLogConfig::from_env().expect("Invalid ROTLOG_* environment configuration")
});
