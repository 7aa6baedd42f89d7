use crate::config::{ConfigLoader, CrawlArgs, ProviderArgs};
use clap::Args;
use feltscan_core::processors::deployment_block;
use feltscan_sdk::Felt;

#[derive(Args, Debug)]
pub struct FindDeploymentArgs {
    #[command(flatten)]
    pub provider: ProviderArgs,

    /// Contract address to locate
    #[arg(short = 'c', long)]
    pub contract: Felt,
}

/// Prints the first block at which the contract has code.
pub async fn run(args: FindDeploymentArgs) -> anyhow::Result<()> {
    let loaded = ConfigLoader::new(args.provider, CrawlArgs::default()).load()?;
    let client = loaded.provider.client()?;

    let block = deployment_block(&client, args.contract).await?;
    println!("{block}");
    Ok(())
}
