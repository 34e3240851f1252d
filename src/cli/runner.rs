//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::HttpClientConfig;
use crate::error::{Result, ResultExt};
use crate::source::{MediaItem, MediaSource};
use crate::sources::reddit::{Reddit, RedditParams};
use crate::sources::unsplash::{self, Unsplash};
use crate::sources::wallhaven::{self, Wallhaven};
use futures::TryStreamExt;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, returning the number of items emitted
    pub async fn run(&self) -> Result<usize> {
        let mut stdout = std::io::stdout();
        self.run_to(&mut stdout).await
    }

    /// Run the CLI command, writing one JSON object per item to `out`
    pub async fn run_to<W: Write + Send>(&self, out: &mut W) -> Result<usize> {
        if let Some(dir) = &self.cli.download {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        match &self.cli.command {
            Commands::Wallhaven {
                query,
                api_key,
                sorting,
                order,
                purity,
                categories,
                top_range,
                resolution,
                ratio,
                colors,
                seed,
                page,
            } => {
                let mut builder = Wallhaven::builder().config(self.http_config());
                if let Some(key) = api_key {
                    builder = builder.api_key(key);
                }
                let client = builder.build()?;

                let mut params = wallhaven::SearchParams::builder()
                    .sorting(*sorting)
                    .order(*order)
                    .purity(purity.iter().copied())
                    .page(*page);
                if let Some(query) = query {
                    params = params.query(query);
                }
                if !categories.is_empty() {
                    params = params.categories(categories.iter().copied());
                }
                if let Some(range) = top_range {
                    params = params.top_range(*range);
                }
                for value in resolution {
                    params = params.resolution(value);
                }
                for value in ratio {
                    params = params.ratio(value);
                }
                for color in colors {
                    params = params.color(*color);
                }
                if let Some(seed) = seed {
                    params = params.seed(seed);
                }

                self.drain(&client, params.build()?, out).await
            }

            Commands::Unsplash {
                query,
                access_key,
                per_page,
                order_by,
                orientation,
                color,
                safe,
                page,
            } => {
                let mut builder = Unsplash::builder().config(self.http_config());
                if let Some(key) = access_key {
                    builder = builder.access_key(key);
                }
                let client = builder.build()?;

                let mut params = unsplash::SearchParams::builder(query)
                    .per_page(*per_page)
                    .order_by(*order_by)
                    .page(*page);
                if let Some(orientation) = orientation {
                    params = params.orientation(*orientation);
                }
                if let Some(color) = color {
                    params = params.color(*color);
                }
                if *safe {
                    params = params.content_filter(unsplash::ContentFilter::High);
                }

                self.drain(&client, params.build()?, out).await
            }

            Commands::Reddit {
                subreddit,
                client_id,
                client_secret,
                user_agent,
                sort,
                time,
                page_size,
                media_type,
                nsfw,
            } => {
                let mut builder = Reddit::builder().config(self.http_config());
                if let Some(id) = client_id {
                    builder = builder.client_id(id);
                }
                if let Some(secret) = client_secret {
                    builder = builder.client_secret(secret);
                }
                if let Some(agent) = user_agent {
                    builder = builder.user_agent(agent);
                }
                let client = builder.build()?;

                let params = RedditParams::builder(subreddit)
                    .sort(*sort)
                    .time_filter(*time)
                    .limit(*page_size)
                    .media_type(*media_type)
                    .include_nsfw(*nsfw)
                    .build()?;

                self.drain(&client, params, out).await
            }
        }
    }

    /// Transport settings from the global flags
    fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.cli.timeout))
            .max_retries(self.cli.max_retries);
        if let Some(url) = &self.cli.base_url {
            builder = builder.base_url(url);
        }
        builder.build()
    }

    /// Walk every item of `source`, printing and optionally downloading each
    async fn drain<S, W>(&self, source: &S, params: S::Params, out: &mut W) -> Result<usize>
    where
        S: MediaSource,
        S::Item: Serialize,
        W: Write + Send,
    {
        let mut items = source.items(params);
        let mut count = 0;

        while self.cli.limit.map_or(true, |limit| count < limit) {
            let Some(item) = items.try_next().await? else {
                break;
            };

            let line = serde_json::to_string(&item)?;
            writeln!(out, "{line}").context("Failed to write output")?;

            if let Some(dir) = &self.cli.download {
                let path = dir.join(item.file_name());
                source.download_to(&item, &path).await?;
            }
            count += 1;
        }

        info!("Emitted {} items from {}", count, source.name());
        Ok(count)
    }
}
