use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub inference: InferenceConfig,
    pub retrieval: RetrievalConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the CLIP / speech-to-text inference service.
    pub base_url: String,
    pub embedding_dimension: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalConfig {
    pub default_top_k: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            inference: InferenceConfig {
                base_url: "http://localhost:9000".to_string(),
                embedding_dimension: 512,
            },
            retrieval: RetrievalConfig { default_top_k: 3 },
            cors: CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            },
        }
    }
}

impl Config {
    /// Builds the configuration from environment variables, falling back to
    /// defaults for anything unset. Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("SERVER_HOST") {
            config.server.host = host;
        }
        if let Some(port) = env_parse("SERVER_PORT") {
            config.server.port = port;
        }
        if let Ok(url) = std::env::var("INFERENCE_URL") {
            config.inference.base_url = url;
        }
        if let Some(dim) = env_parse("EMBEDDING_DIMENSION") {
            config.inference.embedding_dimension = dim;
        }
        if let Some(top_k) = env_parse("RETRIEVAL_TOP_K") {
            config.retrieval.default_top_k = top_k;
        }
        if let Ok(origins) = std::env::var("CORS_ALLOWED_ORIGINS") {
            config.cors.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
