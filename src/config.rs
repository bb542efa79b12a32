/// Which `UserStore` adapter backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl StoreBackend {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "memory" | "mem" => Ok(Self::Memory),
            other => anyhow::bail!("unknown USER_STORE `{}` (expected postgres or memory)", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreBackend,
    pub db: Option<DbConfig>,
    pub template_dir: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let store = match get("USER_STORE") {
            Some(v) => StoreBackend::parse(&v)?,
            None => StoreBackend::Postgres,
        };

        let db = match store {
            StoreBackend::Postgres => {
                let url = get("DATABASE_URL")
                    .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set for USER_STORE=postgres"))?;
                let max_connections = match get("DB_MAX_CONNECTIONS") {
                    Some(v) => v
                        .trim()
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a positive integer, got `{}`", v))?,
                    None => 10,
                };
                Some(DbConfig { url, max_connections })
            }
            StoreBackend::Memory => None,
        };

        let port = match get("APP_PORT") {
            Some(v) => v.parse::<u16>()?,
            None => 8080,
        };

        Ok(Self {
            store,
            db,
            template_dir: get("TEMPLATE_DIR").unwrap_or_else(|| "templates".into()),
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
        })
    }
}
