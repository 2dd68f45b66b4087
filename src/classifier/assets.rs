use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::config::ModelConfig;

/// (path inside the model repository, file name in the local directory)
const MODEL_FILES: [(&str, &str); 3] = [
    ("onnx/model.onnx", "model.onnx"),
    ("config.json", "config.json"),
    ("preprocessor_config.json", "preprocessor_config.json"),
];

/// Local paths of everything the classifier needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAssets {
    pub model: PathBuf,
    pub config: PathBuf,
    pub preprocessor: PathBuf,
}

impl ModelAssets {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            model: dir.join(MODEL_FILES[0].1),
            config: dir.join(MODEL_FILES[1].1),
            preprocessor: dir.join(MODEL_FILES[2].1),
        }
    }
}

/// Makes sure every model file exists locally, downloading the missing ones.
pub async fn ensure_assets(config: &ModelConfig) -> anyhow::Result<ModelAssets> {
    tokio::fs::create_dir_all(&config.dir)
        .await
        .with_context(|| format!("creating {}", config.dir.display()))?;

    let client = reqwest::Client::new();
    for (remote, local) in MODEL_FILES {
        let target = config.dir.join(local);
        if tokio::fs::try_exists(&target).await.unwrap_or(false) {
            continue;
        }

        let Some(repo) = &config.repo_url else {
            bail!(
                "{} is missing and MODEL_REPO_URL is empty, so it cannot be downloaded",
                target.display()
            );
        };

        let url = format!("{repo}/{remote}");
        download(&client, &url, &target).await?;
    }

    Ok(ModelAssets::in_dir(&config.dir))
}

async fn download(client: &reqwest::Client, url: &str, target: &Path) -> anyhow::Result<()> {
    info!(%url, target = %target.display(), "downloading model file");

    let mut response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()
        .with_context(|| format!("downloading {url}"))?;

    let partial = target.with_extension("part");
    let mut file = tokio::fs::File::create(&partial)
        .await
        .with_context(|| format!("creating {}", partial.display()))?;

    let mut written = 0u64;
    while let Some(chunk) = response
        .chunk()
        .await
        .with_context(|| format!("reading body of {url}"))?
    {
        file.write_all(&chunk)
            .await
            .with_context(|| format!("writing {}", partial.display()))?;
        written += chunk.len() as u64;
    }
    file.flush()
        .await
        .with_context(|| format!("writing {}", partial.display()))?;
    drop(file);

    tokio::fs::rename(&partial, target)
        .await
        .with_context(|| format!("moving {} into place", target.display()))?;

    info!(bytes = written, target = %target.display(), "model file saved");
    Ok(())
}
