use clap::{Parser, Subcommand};
use serde_json::Value;
use url::Url;

#[derive(Parser)]
#[command(name = "siege-cli")]
#[command(about = "Query a running siege-proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3031", env = "SIEGE_PROXY_URL")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a user with project details
    User {
        /// Siege user id
        id: String,
    },
    /// Fetch the leaderboard
    Leaderboard,
    /// Check that the proxy is up
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let url = endpoint(&cli.url, &cli.command)?;

    let res = client.get(url).send().await?;
    print_response(res).await
}

/// Build the proxy URL for `command`, with the user id as one encoded segment.
fn endpoint(base: &str, command: &Commands) -> Result<Url, String> {
    let segments: Vec<&str> = match command {
        Commands::User { id } if id == "." || id == ".." => {
            return Err(format!("invalid id '{}'", id));
        }
        Commands::User { id } => vec!["api", "siege", "user", id.as_str()],
        Commands::Leaderboard => vec!["api", "siege", "leaderboard", ""],
        Commands::Health => vec!["health"],
    };

    let mut url = Url::parse(base).map_err(|e| format!("invalid proxy url '{}': {}", base, e))?;
    url.path_segments_mut()
        .map_err(|_| format!("invalid proxy url '{}': cannot be a base", base))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Err(format!("proxy returned status {}", status).into());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> Commands {
        Commands::User { id: id.to_string() }
    }

    #[test]
    fn test_user_id_is_one_segment() {
        let url = endpoint("http://localhost:3031", &user("a/b?c#d")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3031/api/siege/user/a%2Fb%3Fc%23d");
    }

    #[test]
    fn test_base_with_trailing_slash() {
        let url = endpoint("http://localhost:3031/", &Commands::Leaderboard).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3031/api/siege/leaderboard/");

        let url = endpoint("http://localhost:3031/", &Commands::Health).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3031/health");
    }

    #[test]
    fn test_dot_ids_are_rejected() {
        assert_eq!(endpoint("http://localhost:3031", &user("..")).unwrap_err(), "invalid id '..'");
        assert!(endpoint("http://localhost:3031", &user(".")).is_err());
        assert!(endpoint("http://localhost:3031", &user("...")).is_ok());
    }

    #[test]
    fn test_bad_base_url() {
        assert!(endpoint("not a url", &Commands::Health).is_err());
        assert!(endpoint("mailto:x@y", &Commands::Health).is_err());
    }
}
