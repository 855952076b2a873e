use crate::error::{self, Result};
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_ec2::model::Tag;
use aws_sdk_ec2::{Client, Region};
use log::{debug, info};
use snafu::{OptionExt, ResultExt};

/// The region used for tag lookups when none is requested.
pub const DEFAULT_REGION: &str = "us-east-1";

/// The EC2 clients used by the checker.
///
/// Subnet discovery uses the ambient region from the environment; tag lookups
/// are pinned to the requested region.
pub struct AwsClients {
    /// Lists the subnets visible to the caller's credentials.
    pub subnet_client: Client,
    /// Fetches per-subnet tag collections.
    pub tag_client: Client,
}

impl AwsClients {
    pub async fn new(region: Option<&str>) -> Self {
        let ambient_config = aws_config::from_env().load().await;
        let region_provider =
            RegionProviderChain::first_try(region.map(|region| Region::new(region.to_string())))
                .or_else(Region::new(DEFAULT_REGION));
        let scoped_config = aws_config::from_env().region(region_provider).load().await;
        Self {
            subnet_client: Client::new(&ambient_config),
            tag_client: Client::new(&scoped_config),
        }
    }
}

/// List the ids of all subnets visible to the caller's credentials.
pub async fn subnet_ids(client: &Client) -> Result<Vec<String>> {
    info!("Listing subnets");
    let describe_results = client
        .describe_subnets()
        .send()
        .await
        .context(error::ProviderUnavailableSnafu {
            what: "listing subnets",
        })?;
    let subnets = describe_results
        .subnets
        .context(error::MalformedResponseSnafu {
            what: "the subnets field",
        })?;
    debug!("DescribeSubnets returned {} subnets", subnets.len());
    subnets
        .into_iter()
        .map(|subnet| {
            subnet.subnet_id.context(error::MalformedResponseSnafu {
                what: "a subnet id",
            })
        })
        .collect()
}

/// Fetch the tag collection for a single subnet. `None` means the subnet
/// carries no tags at all.
pub async fn subnet_tags(client: &Client, subnet_id: &str) -> Result<Option<Vec<Tag>>> {
    debug!("Describing subnet '{}'", subnet_id);
    let describe_results = client
        .describe_subnets()
        .subnet_ids(subnet_id)
        .send()
        .await
        .context(error::ProviderUnavailableSnafu {
            what: format!("describing subnet '{}'", subnet_id),
        })?;
    let subnet = describe_results
        .subnets
        .and_then(|subnets| subnets.into_iter().next())
        .context(error::MalformedResponseSnafu {
            what: format!("subnet '{}' in the describe results", subnet_id),
        })?;
    Ok(subnet.tags)
}
