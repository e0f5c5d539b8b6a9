use anyhow::bail;
use clap::Args;

/// Wordnik account details, from flags or the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct CredentialArgs {
    /// Wordnik API key
    #[arg(long, env = "WORDNIK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Wordnik username
    #[arg(long, env = "WORDNIK_USERNAME")]
    pub username: Option<String>,
    /// Wordnik password
    #[arg(long, env = "WORDNIK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordnikConfig {
    pub api_key: String,
    pub username: String,
    pub password: String,
}

impl CredentialArgs {
    /// Everything needed to talk to the API, or an error naming every missing piece.
    pub fn require(&self) -> anyhow::Result<WordnikConfig> {
        let missing: Vec<&str> = [
            (&self.api_key, "--api-key / WORDNIK_API_KEY"),
            (&self.username, "--username / WORDNIK_USERNAME"),
            (&self.password, "--password / WORDNIK_PASSWORD"),
        ]
        .into_iter()
        .filter(|(value, _)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(_, name)| name)
        .collect();

        match (&self.api_key, &self.username, &self.password) {
            (Some(api_key), Some(username), Some(password)) if missing.is_empty() => {
                Ok(WordnikConfig {
                    api_key: api_key.clone(),
                    username: username.clone(),
                    password: password.clone(),
                })
            }
            _ => bail!("Wordnik credentials missing: {}", missing.join(", ")),
        }
    }
}
