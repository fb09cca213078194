use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// Knobs for the food listing and the dashboard filter form.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub default_page_size: u32,
    pub search_debounce_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            search_debounce_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub catalog: CatalogConfig,
    /// Emails that register with the admin role.
    pub admin_emails: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "foodboard".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "foodboard-admin".into()),
            ttl_minutes: env_parse("JWT_TTL_MINUTES").unwrap_or(60),
            refresh_ttl_minutes: env_parse("JWT_REFRESH_TTL_MINUTES").unwrap_or(60 * 24 * 14),
        };
        let defaults = CatalogConfig::default();
        let catalog = CatalogConfig {
            default_page_size: env_parse::<u32>("DEFAULT_PAGE_SIZE")
                .filter(|v| (1..=100).contains(v))
                .unwrap_or(defaults.default_page_size),
            search_debounce_ms: env_parse("SEARCH_DEBOUNCE_MS")
                .unwrap_or(defaults.search_debounce_ms),
        };
        let admin_emails = std::env::var("ADMIN_EMAILS")
            .map(|v| parse_email_list(&v))
            .unwrap_or_default();
        Ok(Self {
            database_url,
            jwt,
            catalog,
            admin_emails,
        })
    }

    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails.iter().any(|e| e == email)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}
