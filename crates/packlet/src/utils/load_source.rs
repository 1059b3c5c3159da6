use packlet_error::BuildResult;

pub struct LoadedSource {
  pub content: String,
  /// The file was not valid UTF-8 and was decoded lossily.
  pub is_lossy: bool,
}

pub async fn load_source(path: &str) -> BuildResult<LoadedSource> {
  let bytes = tokio::fs::read(path).await.map_err(|err| {
    anyhow::Error::from(err).context(format!("Failed to read \"{path}\""))
  })?;

  Ok(match String::from_utf8(bytes) {
    Ok(content) => LoadedSource { content, is_lossy: false },
    Err(err) => LoadedSource {
      content: String::from_utf8_lossy(err.as_bytes()).into_owned(),
      is_lossy: true,
    },
  })
}
