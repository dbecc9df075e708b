use super::error::{CouchDaoError, CouchResult};

/// Database used when `COUCH_DB` is not set.
pub const DEFAULT_DATABASE: &str = "courtcaller";

/// Basic-auth login for the CouchDB server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// CouchDB user name.
    pub username: String,
    /// Password for [`Credentials::username`].
    pub password: String,
}

/// Where the match cache lives in CouchDB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouchConfig {
    /// Server root, without the database segment.
    pub base_url: String,
    /// Database holding the snapshot documents.
    pub database: String,
    /// Login sent with every request, when the server needs one.
    pub credentials: Option<Credentials>,
}

impl CouchConfig {
    /// Anonymous access to `database` on the server at `base_url`.
    pub fn new(base_url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            database: database.into(),
            credentials: None,
        }
    }

    /// Log in as `username` on every request.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Read `COUCH_BASE_URL`, `COUCH_DB`, `COUCH_USERNAME` and `COUCH_PASSWORD`.
    pub fn from_env() -> CouchResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`CouchConfig::from_env`] with variables resolved through `lookup`.
    ///
    /// Blank values count as unset. A user name without a password is rejected
    /// rather than silently connecting anonymously.
    pub fn from_lookup<F>(lookup: F) -> CouchResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let base_url = var("COUCH_BASE_URL").ok_or(CouchDaoError::MissingEnvVar {
            var: "COUCH_BASE_URL",
        })?;
        let database = var("COUCH_DB").unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        let config = Self::new(base_url, database);

        match (var("COUCH_USERNAME"), var("COUCH_PASSWORD")) {
            (Some(username), Some(password)) => Ok(config.with_credentials(username, password)),
            (Some(_), None) => Err(CouchDaoError::MissingEnvVar {
                var: "COUCH_PASSWORD",
            }),
            (None, _) => Ok(config),
        }
    }
}
