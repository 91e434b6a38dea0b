use super::Config;

/// Split a comma separated origin list, dropping blanks.
pub(super) fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY")
            && !key.trim().is_empty()
        {
            self.api_key = Some(key);
        }

        if let Ok(model) = std::env::var("DRAFTWRIGHT_MODEL")
            && !model.is_empty()
        {
            self.model = model;
        }

        if let Ok(temp_str) = std::env::var("DRAFTWRIGHT_TEMPERATURE")
            && let Ok(temp) = temp_str.parse::<f64>()
            && (0.0..=2.0).contains(&temp)
        {
            self.temperature = Some(temp);
        }

        if let Ok(base_url) = std::env::var("DRAFTWRIGHT_AGENT_BASE_URL")
            && !base_url.is_empty()
        {
            self.agent_base_url = base_url;
        }

        if let Ok(secs_str) = std::env::var("DRAFTWRIGHT_AGENT_TIMEOUT_SECS")
            && let Ok(secs) = secs_str.parse::<u64>()
            && secs > 0
        {
            self.agent_timeout_secs = secs;
        }

        if let Ok(origins) = std::env::var("CORS_ALLOW_ORIGINS") {
            self.gateway.cors_allow_origins = parse_origins(&origins);
        }

        if let Ok(host) = std::env::var("DRAFTWRIGHT_HOST").or_else(|_| std::env::var("HOST"))
            && !host.is_empty()
        {
            self.gateway.host = host;
        }

        if let Ok(port_str) = std::env::var("DRAFTWRIGHT_PORT").or_else(|_| std::env::var("PORT"))
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }
    }
}
