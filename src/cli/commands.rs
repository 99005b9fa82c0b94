use std::path::Path;

use crate::api;
use crate::app::{AppContext, Result, SocialError};
use crate::config::{Config, ServerConfig};
use crate::domain::Platform;

/// Load `path` if given, otherwise the default config file.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    loaded.map_err(|e| SocialError::Config(e.to_string()))
}

pub async fn serve(
    ctx: AppContext,
    server: &ServerConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let server = ServerConfig {
        host: host.unwrap_or_else(|| server.host.clone()),
        port: port.unwrap_or(server.port),
    };
    let addr = server
        .socket_addr()
        .map_err(|e| SocialError::Config(e.to_string()))?;

    api::serve(ctx, addr).await?;
    Ok(())
}

pub async fn info(ctx: &AppContext, url: &str, platform: Option<Platform>) -> Result<()> {
    let result = match platform {
        Some(platform) => ctx.social_info_as(url, platform).await?,
        None => ctx.social_info(url).await?,
    };

    let json = serde_json::to_string_pretty(&result)
        .map_err(|e| SocialError::Render(format!("Failed to encode result: {}", e)))?;
    println!("{}", json);
    Ok(())
}

pub async fn screenshot(ctx: &AppContext, url: &str, output: &Path) -> Result<()> {
    let png = ctx.screenshot(url).await?;
    tokio::fs::write(output, &png).await?;
    println!("Saved {} bytes to {}", png.len(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::scraper::fake::{FakePage, FakeRenderer, FAKE_PNG};
    use crate::scraper::ScraperConfig;

    #[test]
    fn test_load_config_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.toml");
        std::fs::write(&path, "[scraper]\nmax_concurrency = 2\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.scraper.max_concurrency, 2);
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, SocialError::Config(_)));
    }

    #[tokio::test]
    async fn test_screenshot_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("shot.png");
        let renderer = Arc::new(FakeRenderer::new(FakePage::default()));
        let ctx = AppContext::with_renderer(renderer.clone(), ScraperConfig::default());

        screenshot(&ctx, "https://example.com", &output).await.unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), FAKE_PNG);
        assert_eq!(renderer.closes(), 1);
    }

    #[tokio::test]
    async fn test_serve_rejects_bad_host() {
        let ctx = AppContext::with_renderer(
            Arc::new(FakeRenderer::new(FakePage::default())),
            ScraperConfig::default(),
        );
        let err = serve(ctx, &ServerConfig::default(), Some("not a host".into()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SocialError::Config(_)));
    }
}
