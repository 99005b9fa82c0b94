//! # socialprobe
//!
//! Extracts public metadata (display name, follower count, views,
//! interactions, publish date) and mobile screenshots from social media URLs
//! by rendering them in headless Chrome.
//!
//! ## Architecture
//!
//! ```text
//! URL → Platform → SessionGateway → ExtractionStrategy → Normalizer → ExtractionResult
//! ```
//!
//! - [`domain`]: Platform classification and the result model
//! - [`scraper`]: Browser sessions with guaranteed release
//! - [`strategy`]: Per-platform field extractors
//! - [`normalizer`]: Count and date normalization
//! - [`api`]: HTTP endpoints built with axum
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the HTTP API on port 3000
//! socialprobe serve
//!
//! # One-off extraction
//! socialprobe info https://www.tiktok.com/@someone
//!
//! # Capture a screenshot
//! socialprobe screenshot https://www.instagram.com/someone -o shot.png
//! ```

/// HTTP API.
///
/// - `GET /api/social-info?url=` returns an [`ExtractionResult`](domain::ExtractionResult)
/// - `GET /api/screenshot?url=` returns a PNG
pub mod api;

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the session
/// gateway and the strategy registry.
pub mod app;

/// Command-line interface using clap.
///
/// - `serve [--host] [--port]` - Run the HTTP API
/// - `info <url> [--platform]` - Print extracted metadata
/// - `screenshot <url> [-o]` - Save a PNG
pub mod cli;

/// Configuration loaded from `~/.config/socialprobe/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Platform`](domain::Platform): URL classification
/// - [`ExtractionResult`](domain::ExtractionResult): Normalized output
pub mod domain;

/// Count and date normalization.
pub mod normalizer;

/// Headless Chrome rendering.
///
/// - [`Renderer`](scraper::Renderer): Async trait for browser backends
/// - [`ChromeRenderer`](scraper::ChromeRenderer): chromiumoxide implementation
/// - [`SessionGateway`](scraper::SessionGateway): Bounded, scoped sessions
pub mod scraper;

/// Per-platform extraction strategies.
pub mod strategy;
