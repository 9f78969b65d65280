use anyhow::Result;
use veil_config::{Config, ExtractorKind};
use veil_engine::Pipeline;
use veil_server::VeilServer;

pub async fn handle(
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
    extractor: Option<ExtractorKind>,
) -> Result<()> {
    if let Some(extractor) = extractor {
        config.extractor = extractor;
        config.validate()?;
    }
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    let pipeline = Pipeline::from_config(&config)?;

    println!("Starting veil server on {}:{} ({} extractor)", host, port, config.extractor);
    VeilServer::new(pipeline).serve(&host, port).await?;

    Ok(())
}
